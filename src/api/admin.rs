//! 超管资源族：商家管理、用户管理、仪表盘统计
//!
//! 部分变更接口后端尚未实现：创建商家根本不发请求，直接返回
//! `Unimplemented`；统计接口打了 404 哨兵标记，调用方据此降级
//! （显示零值而非错误横幅），界面层对应控件保持禁用。

use super::error::Endpoint;
use super::{ApiError, LocaffyApi};
use gloo_net::http::Request;
use locaffy_shared::protocol::{DashboardStats, PlaceSettingsUpdate};
use locaffy_shared::{Place, UserAccount};

const PLACES: Endpoint = Endpoint::new("admin.places").with_role_on_forbidden();
const DELETE_PLACE: Endpoint = Endpoint::new("admin.delete_place");
const TOGGLE_STATUS: Endpoint = Endpoint::new("admin.toggle_status");
const USERS: Endpoint = Endpoint::new("admin.users").with_verbose_server_error();
const STATS: Endpoint = Endpoint::new("admin.stats").unimplemented_server_side();

impl LocaffyApi {
    /// 平台全部商家门店
    pub async fn admin_places(&self) -> Result<Vec<Place>, ApiError> {
        let res = self
            .authorize(Request::get(&self.url("/admin/places")))
            .send()
            .await;
        Self::expect_json(res, &PLACES).await
    }

    /// 创建商家：后端未实现，不发请求
    pub async fn admin_create_place(&self, _update: &PlaceSettingsUpdate) -> Result<Place, ApiError> {
        Err(ApiError::unimplemented())
    }

    /// 删除商家
    pub async fn admin_delete_place(&self, id: i64) -> Result<(), ApiError> {
        let res = self
            .authorize(Request::delete(&self.url(&format!("/admin/places/{id}"))))
            .send()
            .await;
        Self::expect_ok(res, &DELETE_PLACE).await
    }

    /// 启用 / 停用商家
    pub async fn admin_toggle_place_status(&self, id: i64) -> Result<(), ApiError> {
        let res = self
            .authorize(Request::put(
                &self.url(&format!("/admin/places/{id}/toggle-status")),
            ))
            .send()
            .await;
        Self::expect_ok(res, &TOGGLE_STATUS).await
    }

    /// 平台账号列表（计数器由服务端计算）
    pub async fn admin_users(&self) -> Result<Vec<UserAccount>, ApiError> {
        let res = self
            .authorize(Request::get(&self.url("/admin/users")))
            .send()
            .await;
        Self::expect_json(res, &USERS).await
    }

    /// 超管仪表盘统计（后端未实现时降级为零值由调用方处理）
    pub async fn admin_dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        let res = self
            .authorize(Request::get(&self.url("/admin/stats")))
            .send()
            .await;
        Self::expect_json(res, &STATS).await
    }
}
