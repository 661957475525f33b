//! REST 请求 / 响应 DTO 定义
//!
//! 与后端的线上契约：JSON 体，字段 camelCase。权威定义在
//! 后端，这里按实际用法建模。

use crate::{ReservationStatus, UserProfile};
use serde::{Deserialize, Serialize};

// =========================================================
// 认证 (Auth)
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// 登录 / 注册 / 刷新的统一响应：token 对 + 用户快照
///
/// 角色可能不在响应体里而嵌在 JWT payload 中，
/// 读取方通过 `role::decode_role` 兜底。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

// =========================================================
// 预订 (Reservation)
// =========================================================

/// 预订状态转移请求 `{status, rejectionReason?}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateRequest {
    pub status: ReservationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

// =========================================================
// 门店设置 (Place Settings)
// =========================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceSettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub opening_time: String,
    pub closing_time: String,
    pub working_days: Vec<String>,
}

// =========================================================
// 菜单 (Menu)
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemRequest {
    pub name: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub available: bool,
    /// 逗号分隔的标签串
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i32>,
}

// =========================================================
// 入驻申请 (Business Application)
// =========================================================

/// 提交入驻申请：商家元数据 + 为其创建账号的凭据
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRequest {
    pub business_name: String,
    pub owner_name: String,
    pub tax_number: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    pub opening_time: String,
    pub closing_time: String,
    pub working_days: Vec<String>,
    pub username: String,
    pub password: String,
}

/// 拒绝操作携带的原因
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectRequest {
    pub reason: String,
}

/// 申请统计
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ApplicationStats {
    #[serde(default)]
    pub pending: u32,
    #[serde(default)]
    pub approved: u32,
    #[serde(default)]
    pub rejected: u32,
}

// =========================================================
// 管理端 (Admin)
// =========================================================

/// 超管仪表盘统计；对应接口后端尚未实现时整体退化为零值
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub total_places: u32,
    #[serde(default)]
    pub total_users: u32,
    #[serde(default)]
    pub total_reservations: u32,
}

// =========================================================
// 错误响应体
// =========================================================

/// 后端错误体探测：`message` 或 `error` 字段二选一
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// 取后端给出的可读文案（如有）
    pub fn text(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .filter(|s| !s.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_update_omits_absent_reason() {
        let req = StatusUpdateRequest {
            status: ReservationStatus::Cancelled,
            rejection_reason: None,
        };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["status"], "CANCELLED");
        assert!(v.get("rejectionReason").is_none());

        let req = StatusUpdateRequest {
            status: ReservationStatus::Rejected,
            rejection_reason: Some("满座".into()),
        };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["rejectionReason"], "满座");
    }

    #[test]
    fn error_body_probes_both_fields() {
        let b: ErrorBody = serde_json::from_str(r#"{"message": "重复提交"}"#).unwrap();
        assert_eq!(b.text(), Some("重复提交"));
        let b: ErrorBody = serde_json::from_str(r#"{"error": "bad request"}"#).unwrap();
        assert_eq!(b.text(), Some("bad request"));
        let b: ErrorBody = serde_json::from_str(r#"{"message": "  "}"#).unwrap();
        assert_eq!(b.text(), None);
        let b: ErrorBody = serde_json::from_str("{}").unwrap();
        assert_eq!(b.text(), None);
    }

    #[test]
    fn auth_response_wire_shape() {
        let json = r#"{
            "accessToken": "a.b.c",
            "refreshToken": "r",
            "user": {"id": 1, "username": "marko", "role": "ROLE_BUSINESS_OWNER"}
        }"#;
        let res: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(res.access_token, "a.b.c");
        assert_eq!(
            res.user.parsed_role(),
            Some(crate::role::Role::BusinessOwner)
        );
    }
}
