//! 入驻申请资源族
//!
//! approve / reject 是终态操作，服务端有幂等守卫：
//! 重复处理返回 409，前端提示并刷新列表（本地乐观状态可能已过期）。

use super::error::Endpoint;
use super::{ApiError, LocaffyApi};
use gloo_net::http::Request;
use locaffy_shared::BusinessApplication;
use locaffy_shared::protocol::{ApplicationRequest, ApplicationStats, RejectRequest};

const LIST: Endpoint = Endpoint::new("application.list");
const SUBMIT: Endpoint = Endpoint::new("application.submit");
const APPROVE: Endpoint = Endpoint::new("application.approve");
const REJECT: Endpoint = Endpoint::new("application.reject");
// 统计接口偶发 500，文案里带上后端细节方便排障
const STATS: Endpoint = Endpoint::new("application.stats").with_verbose_server_error();

impl LocaffyApi {
    /// 全部入驻申请（超管）
    pub async fn business_applications(&self) -> Result<Vec<BusinessApplication>, ApiError> {
        let res = self
            .authorize(Request::get(&self.url("/business-applications")))
            .send()
            .await;
        Self::expect_json(res, &LIST).await
    }

    /// 提交入驻申请（营销站表单，免登录）
    pub async fn submit_application(&self, req: &ApplicationRequest) -> Result<(), ApiError> {
        let res = Request::post(&self.url("/business-applications"))
            .json(req)
            .map_err(ApiError::parse)?
            .send()
            .await;
        Self::expect_ok(res, &SUBMIT).await
    }

    /// 通过申请（终态，重复操作 409）
    pub async fn approve_application(&self, id: i64) -> Result<(), ApiError> {
        let res = self
            .authorize(Request::put(
                &self.url(&format!("/business-applications/{id}/approve")),
            ))
            .send()
            .await;
        Self::expect_ok(res, &APPROVE).await
    }

    /// 拒绝申请并附原因（终态，重复操作 409）
    pub async fn reject_application(&self, id: i64, reason: String) -> Result<(), ApiError> {
        let res = self
            .authorize(Request::put(
                &self.url(&format!("/business-applications/{id}/reject")),
            ))
            .json(&RejectRequest { reason })
            .map_err(ApiError::parse)?
            .send()
            .await;
        Self::expect_ok(res, &REJECT).await
    }

    /// 申请统计
    pub async fn application_stats(&self) -> Result<ApplicationStats, ApiError> {
        let res = self
            .authorize(Request::get(&self.url("/business-applications/stats")))
            .send()
            .await;
        Self::expect_json(res, &STATS).await
    }
}
