//! 认证资源族：登录 / 注册 / 刷新 / 登出

use super::error::Endpoint;
use super::{ApiError, LocaffyApi};
use gloo_net::http::Request;
use locaffy_shared::protocol::{AuthResponse, LoginRequest, RefreshRequest, RegisterRequest};
use locaffy_shared::{BEARER_PREFIX, HEADER_AUTHORIZATION};

const LOGIN: Endpoint = Endpoint::new("auth.login");
const REGISTER: Endpoint = Endpoint::new("auth.register");
const REFRESH: Endpoint = Endpoint::new("auth.refresh");
const LOGOUT: Endpoint = Endpoint::new("auth.logout");

impl LocaffyApi {
    /// 登录，返回 token 对与用户快照
    pub async fn login(&self, req: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let res = Request::post(&self.url("/auth/login"))
            .json(req)
            .map_err(ApiError::parse)?
            .send()
            .await;
        Self::expect_json(res, &LOGIN).await
    }

    /// 注册普通用户账号
    pub async fn register(&self, req: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        let res = Request::post(&self.url("/auth/register"))
            .json(req)
            .map_err(ApiError::parse)?
            .send()
            .await;
        Self::expect_json(res, &REGISTER).await
    }

    /// 用 refresh token 换新的 token 对
    ///
    /// 失败意味着会话死亡，调用方须清除本地会话。
    pub async fn refresh(&self, refresh_token: String) -> Result<AuthResponse, ApiError> {
        let res = Request::post(&self.url("/auth/refresh"))
            .json(&RefreshRequest { refresh_token })
            .map_err(ApiError::parse)?
            .send()
            .await;
        Self::expect_json(res, &REFRESH).await
    }

    /// 通知后端作废会话
    ///
    /// 本地会话清除先于此调用发生，因此 token 由调用方在清除前
    /// 捕获并显式传入；调用方不依赖此结果。
    pub async fn logout(&self, access_token: Option<String>) -> Result<(), ApiError> {
        let mut req = Request::post(&self.url("/auth/logout"));
        if let Some(token) = access_token {
            req = req.header(HEADER_AUTHORIZATION, &format!("{BEARER_PREFIX}{token}"));
        }
        let res = req.send().await;
        Self::expect_ok(res, &LOGOUT).await
    }
}
