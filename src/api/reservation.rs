//! 预订资源族与过期清理批次

use super::error::Endpoint;
use super::{ApiError, LocaffyApi};
use futures::future::join_all;
use gloo_net::http::Request;
use locaffy_shared::date::Timestamp;
use locaffy_shared::protocol::StatusUpdateRequest;
use locaffy_shared::{Reservation, ReservationStatus, expired_pending_ids};

const LIST: Endpoint = Endpoint::new("reservation.list");
const UPDATE_STATUS: Endpoint =
    Endpoint::new("reservation.update_status").with_role_on_forbidden();

impl LocaffyApi {
    /// 拉取门店的全部预订
    pub async fn reservations_by_place(
        &self,
        place_id: i64,
    ) -> Result<Vec<Reservation>, ApiError> {
        let res = self
            .authorize(Request::get(&self.url(&format!("/reservations/place/{place_id}"))))
            .send()
            .await;
        Self::expect_json(res, &LIST).await
    }

    /// 预订状态转移 `{status, rejectionReason?}`
    ///
    /// 对已决预订重复转移会得到 409，调用方据此刷新列表。
    pub async fn update_reservation_status(
        &self,
        id: i64,
        status: ReservationStatus,
        rejection_reason: Option<String>,
    ) -> Result<(), ApiError> {
        let body = StatusUpdateRequest {
            status,
            rejection_reason,
        };
        let res = self
            .authorize(Request::put(&self.url(&format!("/reservations/{id}/status"))))
            .json(&body)
            .map_err(ApiError::parse)?
            .send()
            .await;
        Self::expect_ok(res, &UPDATE_STATUS).await
    }

    /// 取消一条预订
    pub async fn cancel_reservation(&self, id: i64) -> Result<(), ApiError> {
        self.update_reservation_status(id, ReservationStatus::Cancelled, None)
            .await
    }

    /// 加载门店预订列表并执行过期清理批次
    ///
    /// 流程：读取 -> 对每条"过期待确认"预订独立发出取消 ->
    /// 全部落定后整体重读。这是尽力而为的批次，不是原子事务：
    /// 单条失败只记录日志，不影响其他取消；状态绝不本地改写，
    /// 以重读后的权威列表为准。取消失败的条目下次加载会重试。
    ///
    /// `now` 由调用方在批次开始前计算一次，保证统一截止点。
    pub async fn load_reconciled(
        &self,
        place_id: i64,
        now: Timestamp,
    ) -> Result<Vec<Reservation>, ApiError> {
        let list = self.reservations_by_place(place_id).await?;

        let expired = expired_pending_ids(&list, now);
        if expired.is_empty() {
            return Ok(list);
        }

        // 并发发出全部取消请求（fire many, await all），
        // 单条之间没有顺序保证；唯一的顺序契约是重读严格在
        // 所有取消落定之后。
        let cancellations = expired.iter().map(|id| self.cancel_reservation(*id));
        for (id, outcome) in expired.iter().zip(join_all(cancellations).await) {
            if let Err(e) = outcome {
                web_sys::console::warn_1(
                    &format!("[Sweep] 取消过期预订 {id} 失败: {e}").into(),
                );
            }
        }

        self.reservations_by_place(place_id).await
    }
}
