//! 评价资源族
//!
//! 端点由调用方的角色决定：超管走 `/admin/reviews`，
//! 商家走 `/business/reviews`。管理界面只有删除，没有编辑。

use super::error::Endpoint;
use super::{ApiError, LocaffyApi};
use gloo_net::http::Request;
use locaffy_shared::Review;
use locaffy_shared::role::Role;

const LIST: Endpoint = Endpoint::new("review.list");
const DELETE: Endpoint = Endpoint::new("review.delete").with_role_on_forbidden();

/// 按角色选择评价接口的基路径
fn base_path(role: Role) -> &'static str {
    match role {
        Role::Admin => "/admin/reviews",
        _ => "/business/reviews",
    }
}

impl LocaffyApi {
    /// 当前角色可见的评价列表
    pub async fn reviews(&self, role: Role) -> Result<Vec<Review>, ApiError> {
        let res = self
            .authorize(Request::get(&self.url(base_path(role))))
            .send()
            .await;
        Self::expect_json(res, &LIST).await
    }

    /// 删除一条评价
    pub async fn delete_review(&self, role: Role, id: i64) -> Result<(), ApiError> {
        let res = self
            .authorize(Request::delete(
                &self.url(&format!("{}/{id}", base_path(role))),
            ))
            .send()
            .await;
        Self::expect_ok(res, &DELETE).await
    }
}
