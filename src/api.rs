//! Locaffy REST API 客户端
//!
//! 所有 HTTP 出口的单一配置点：基地址拼接与 Bearer 头附加都
//! 在这里完成。每个资源族一个子模块，每个服务函数对应一次
//! 逻辑 HTTP 操作（个别两次，如"创建菜品后上传图片"），返回
//! 解析后的成功体或归一化的 `ApiError`。

mod admin;
mod application;
mod auth;
mod business;
mod error;
mod image;
mod menu;
mod reservation;
mod review;

pub use error::{ApiError, ApiErrorKind};

use crate::session::Session;
use error::{Endpoint, map_status};
use gloo_net::http::{RequestBuilder, Response};
use locaffy_shared::protocol::ErrorBody;
use locaffy_shared::{BEARER_PREFIX, HEADER_AUTHORIZATION};
use serde::de::DeserializeOwned;

/// API 基地址；部署差异由外部协作方处理，这里固定开发地址
pub const DEFAULT_API_BASE: &str = "http://localhost:8080/api";

/// 从 Context 获取 API 客户端
pub fn use_api() -> LocaffyApi {
    leptos::prelude::use_context::<LocaffyApi>().expect("LocaffyApi should be provided")
}

/// Locaffy API 客户端
#[derive(Clone, Debug, PartialEq)]
pub struct LocaffyApi {
    pub base_url: String,
}

impl Default for LocaffyApi {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE.to_string())
    }
}

impl LocaffyApi {
    pub fn new(base_url: String) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self { base_url }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 附加 Bearer 认证头（会话缺失 token 时原样返回）
    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match Session::access_token() {
            Some(token) => req.header(HEADER_AUTHORIZATION, &format!("{BEARER_PREFIX}{token}")),
            None => req,
        }
    }

    /// 公共错误检查：网络失败与非 2xx 状态都归一化为 `ApiError`
    async fn check(
        res: Result<Response, gloo_net::Error>,
        endpoint: &Endpoint,
    ) -> Result<Response, ApiError> {
        // 请求没到达服务器：固定文案，重试即可恢复
        let res = res.map_err(|_| ApiError::network())?;
        if res.ok() {
            return Ok(res);
        }
        let status = res.status();
        // 探测后端错误体；解析失败按空错误体处理
        let body: ErrorBody = res.json().await.unwrap_or_default();
        let err = map_status(status, &body, endpoint, Session::role());
        web_sys::console::warn_1(
            &format!("[Api] {} -> HTTP {status} ({})", endpoint.name, err.kind.code()).into(),
        );
        Err(err)
    }

    /// 检查响应并解析 JSON 成功体
    async fn expect_json<T: DeserializeOwned>(
        res: Result<Response, gloo_net::Error>,
        endpoint: &Endpoint,
    ) -> Result<T, ApiError> {
        let res = Self::check(res, endpoint).await?;
        res.json::<T>().await.map_err(ApiError::parse)
    }

    /// 检查响应，忽略成功体
    async fn expect_ok(
        res: Result<Response, gloo_net::Error>,
        endpoint: &Endpoint,
    ) -> Result<(), ApiError> {
        Self::check(res, endpoint).await.map(|_| ())
    }
}
