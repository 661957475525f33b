//! Locaffy 共享领域模型
//!
//! 前后端之间的实体定义与纯业务逻辑。所有实体都由后端拥有，
//! 前端只持有按视图拉取的临时副本；这里同时承载可在本机直接
//! 测试的纯函数（预订清理、标签解析、分类去重等）。

use serde::{Deserialize, Serialize};

pub mod date;
pub mod protocol;
pub mod query;
pub mod role;
pub mod upload;

use date::Timestamp;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const BEARER_PREFIX: &str = "Bearer ";

/// 仪表盘"最近预订"条数
pub const RECENT_RESERVATION_COUNT: usize = 5;

/// 营业日枚举值（与后端的 workingDays 令牌一致）
pub const WEEKDAYS: [&str; 7] = [
    "MONDAY",
    "TUESDAY",
    "WEDNESDAY",
    "THURSDAY",
    "FRIDAY",
    "SATURDAY",
    "SUNDAY",
];

// =========================================================
// 预订 (Reservation)
// =========================================================

/// 预订生命周期状态
///
/// 后端保证的状态机：仅 PENDING 可转入 APPROVED / REJECTED；
/// PENDING 与 APPROVED 可转入 CANCELLED；其余转移一律被拒绝。
/// 前端在未收到后端确认前绝不假定转移已生效。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
    Completed,
    NoShow,
}

impl ReservationStatus {
    /// 是否允许审批（通过 / 拒绝），仅 PENDING
    pub fn can_decide(&self) -> bool {
        matches!(self, ReservationStatus::Pending)
    }

    /// 是否允许取消，PENDING 或 APPROVED
    pub fn can_cancel(&self) -> bool {
        matches!(
            self,
            ReservationStatus::Pending | ReservationStatus::Approved
        )
    }

    /// 界面显示名
    pub fn label(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "待确认",
            ReservationStatus::Approved => "已确认",
            ReservationStatus::Rejected => "已拒绝",
            ReservationStatus::Cancelled => "已取消",
            ReservationStatus::Completed => "已完成",
            ReservationStatus::NoShow => "未到店",
        }
    }
}

/// 预订实体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: i64,
    pub user_id: i64,
    pub user_name: String,
    pub place_id: i64,
    /// 预订到店时间
    pub reservation_time: Timestamp,
    pub number_of_people: u32,
    #[serde(default)]
    pub note: Option<String>,
    pub status: ReservationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl Reservation {
    /// 是否为"过期待确认"：仍在 PENDING 且到店时间严格早于 now
    pub fn is_expired_pending(&self, now: Timestamp) -> bool {
        self.status == ReservationStatus::Pending && self.reservation_time < now
    }

    /// 用于"最近预订"排序的时间：createdAt 缺失时退回到店时间
    pub fn sort_instant(&self) -> Timestamp {
        self.created_at.unwrap_or(self.reservation_time)
    }
}

/// 清理批次的纯核心：找出所有过期待确认预订的 id
///
/// `now` 由调用方在整个批次开始前计算一次，保证统一的截止点。
pub fn expired_pending_ids(list: &[Reservation], now: Timestamp) -> Vec<i64> {
    list.iter()
        .filter(|r| r.is_expired_pending(now))
        .map(|r| r.id)
        .collect()
}

/// 最近预订：按 sort_instant 降序取前 limit 条
pub fn recent_reservations(list: &[Reservation], limit: usize) -> Vec<Reservation> {
    let mut sorted: Vec<Reservation> = list.to_vec();
    sorted.sort_by(|a, b| b.sort_instant().cmp(&a.sort_instant()));
    sorted.truncate(limit);
    sorted
}

// =========================================================
// 商家门店 (Place)
// =========================================================

/// 门店实体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: i64,
    pub name: String,
    /// logo 与横幅共用一个字段，沿用后端数据模型
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub opening_time: Option<String>,
    #[serde(default)]
    pub closing_time: Option<String>,
    #[serde(default)]
    pub working_days: Vec<String>,
    #[serde(default)]
    pub active: Option<bool>,
}

impl Place {
    pub fn is_active(&self) -> bool {
        self.active.unwrap_or(true)
    }
}

// =========================================================
// 菜单项 (MenuItem)
// =========================================================

/// 菜单项实体
///
/// 分类是自由文本而非外键，分类列表由条目去重派生。
/// 可用性字段有两个名字：后端字段为 `available`，历史接口
/// 还会回传 `isAvailable`，以 `availability()` 统一读取。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub available: Option<bool>,
    #[serde(default)]
    pub is_available: Option<bool>,
    /// 逗号分隔的标签串，客户端解析为列表
    #[serde(default)]
    pub tags: Option<String>,
    /// 升序排序键，相同时保持原始顺序
    #[serde(default)]
    pub display_order: Option<i32>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl MenuItem {
    /// 读取可用性，兼容两种字段名；双缺省按可用处理
    pub fn availability(&self) -> bool {
        self.available.or(self.is_available).unwrap_or(true)
    }

    /// 解析标签列表
    pub fn tag_list(&self) -> Vec<String> {
        self.tags.as_deref().map(parse_tags).unwrap_or_default()
    }
}

/// 解析逗号分隔的标签串：逐段 trim，丢弃空段
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// 序列化标签列表；与 `parse_tags` 往返幂等
pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}

/// 从条目派生去重后的分类列表，保持首次出现顺序
pub fn distinct_categories(items: &[MenuItem]) -> Vec<String> {
    let mut seen = Vec::new();
    for item in items {
        if let Some(cat) = item.category.as_deref() {
            let cat = cat.trim();
            if !cat.is_empty() && !seen.iter().any(|s: &String| s == cat) {
                seen.push(cat.to_string());
            }
        }
    }
    seen
}

/// 按 displayOrder 升序稳定排序，缺失排序键的条目排在末尾
pub fn sort_menu_items(items: &mut [MenuItem]) {
    items.sort_by_key(|i| i.display_order.unwrap_or(i32::MAX));
}

/// 按分类分组（沿用 `distinct_categories` 的顺序），
/// 无分类的条目归入"其他"
pub fn group_by_category(items: &[MenuItem]) -> Vec<(String, Vec<MenuItem>)> {
    let mut groups: Vec<(String, Vec<MenuItem>)> = distinct_categories(items)
        .into_iter()
        .map(|c| (c, Vec::new()))
        .collect();
    let mut uncategorized = Vec::new();
    for item in items {
        match item.category.as_deref().map(str::trim) {
            Some(cat) if !cat.is_empty() => {
                if let Some((_, bucket)) = groups.iter_mut().find(|(c, _)| c == cat) {
                    bucket.push(item.clone());
                }
            }
            _ => uncategorized.push(item.clone()),
        }
    }
    if !uncategorized.is_empty() {
        groups.push(("其他".to_string(), uncategorized));
    }
    groups
}

// =========================================================
// 入驻申请 (BusinessApplication)
// =========================================================

/// 入驻申请生命周期状态
///
/// 状态只转移一次：PENDING -> APPROVED | REJECTED。已决申请
/// 的重复操作会被后端以 409 拒绝，前端据此刷新列表。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn can_decide(&self) -> bool {
        matches!(self, ApplicationStatus::Pending)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "待审核",
            ApplicationStatus::Approved => "已通过",
            ApplicationStatus::Rejected => "已拒绝",
        }
    }
}

/// 入驻申请实体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessApplication {
    pub id: i64,
    pub business_name: String,
    pub owner_name: String,
    #[serde(default)]
    pub tax_number: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub opening_time: Option<String>,
    #[serde(default)]
    pub closing_time: Option<String>,
    #[serde(default)]
    pub working_days: Vec<String>,
    pub status: ApplicationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

// =========================================================
// 评价 (Review)
// =========================================================

/// 评价实体；管理界面只有删除，没有编辑路径
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub place_id: i64,
    /// 1-5 的整数评分
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

// =========================================================
// 账号 (User)
// =========================================================

/// 管理端看到的平台账号，计数器由服务端计算
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub total_reservations: u32,
    #[serde(default)]
    pub cancelled_reservations: u32,
    #[serde(default)]
    pub total_reviews: u32,
}

/// 会话中缓存的浅层用户快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl UserProfile {
    /// 快照中的角色，经由统一归一化入口解析
    pub fn parsed_role(&self) -> Option<role::Role> {
        self.role.as_deref().and_then(role::Role::parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn reservation(id: i64, status: ReservationStatus, time: Timestamp) -> Reservation {
        Reservation {
            id,
            user_id: 7,
            user_name: "测试用户".into(),
            place_id: 1,
            reservation_time: time,
            number_of_people: 2,
            note: None,
            status,
            rejection_reason: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn expired_pending_partition() {
        let now = Timestamp::new(1_000_000);
        let yesterday = now - Duration::from_secs(24 * 3600);
        let tomorrow = now + Duration::from_secs(24 * 3600);
        let list = vec![
            reservation(1, ReservationStatus::Pending, yesterday),
            reservation(2, ReservationStatus::Pending, tomorrow),
            reservation(3, ReservationStatus::Approved, yesterday),
            reservation(4, ReservationStatus::Cancelled, yesterday),
        ];
        // 只有 1 号：过期且仍待确认；2 号未到期，3/4 号状态不符
        assert_eq!(expired_pending_ids(&list, now), vec![1]);
    }

    #[test]
    fn sweep_is_idempotent_after_successful_cancellation() {
        let now = Timestamp::new(1_000_000);
        let past = now - Duration::from_secs(3600);
        let mut list = vec![
            reservation(1, ReservationStatus::Pending, past),
            reservation(2, ReservationStatus::Pending, now + Duration::from_secs(3600)),
        ];
        let first = expired_pending_ids(&list, now);
        assert_eq!(first, vec![1]);
        // 模拟后端确认取消后的权威刷新
        for r in &mut list {
            if first.contains(&r.id) {
                r.status = ReservationStatus::Cancelled;
            }
        }
        // 时间不推进，第二轮不再产生任何取消请求
        assert!(expired_pending_ids(&list, now).is_empty());
    }

    #[test]
    fn boundary_time_is_not_expired() {
        // 到店时间等于 now 不算过期（严格早于）
        let now = Timestamp::new(5_000);
        let r = reservation(1, ReservationStatus::Pending, now);
        assert!(!r.is_expired_pending(now));
    }

    #[test]
    fn recent_reservations_prefers_created_at_and_caps_at_limit() {
        let base = Timestamp::new(0);
        let mut list: Vec<Reservation> = (1..=7)
            .map(|i| {
                let mut r = reservation(
                    i,
                    ReservationStatus::Approved,
                    base + Duration::from_secs(i as u64),
                );
                // 偶数条目带 createdAt，且晚于所有 reservationTime
                if i % 2 == 0 {
                    r.created_at = Some(base + Duration::from_secs(100 + i as u64));
                }
                r
            })
            .collect();
        list.reverse();

        let recent = recent_reservations(&list, RECENT_RESERVATION_COUNT);
        assert_eq!(recent.len(), 5);
        // createdAt 的条目(6,4,2)排最前，其余按 reservationTime 降序
        let ids: Vec<i64> = recent.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![6, 4, 2, 7, 5]);
    }

    #[test]
    fn status_gates_for_action_buttons() {
        assert!(ReservationStatus::Pending.can_decide());
        assert!(ReservationStatus::Pending.can_cancel());
        assert!(ReservationStatus::Approved.can_cancel());
        for terminal in [
            ReservationStatus::Approved,
            ReservationStatus::Rejected,
            ReservationStatus::Cancelled,
            ReservationStatus::Completed,
            ReservationStatus::NoShow,
        ] {
            assert!(!terminal.can_decide());
        }
        assert!(!ReservationStatus::Rejected.can_cancel());
        assert!(ApplicationStatus::Pending.can_decide());
        assert!(!ApplicationStatus::Approved.can_decide());
    }

    #[test]
    fn tag_parsing_round_trip() {
        let parsed = parse_tags("vegan, popular,spicy");
        assert_eq!(parsed, vec!["vegan", "popular", "spicy"]);
        // 往返幂等
        let joined = join_tags(&parsed);
        assert_eq!(parse_tags(&joined), parsed);
        // 空段丢弃
        assert_eq!(parse_tags(" , vegan ,, "), vec!["vegan"]);
        assert!(parse_tags("").is_empty());
    }

    #[test]
    fn categories_are_derived_distinct_in_first_seen_order() {
        let item = |cat: Option<&str>| MenuItem {
            id: 0,
            name: "x".into(),
            price: 1.0,
            category: cat.map(str::to_string),
            available: None,
            is_available: None,
            tags: None,
            display_order: None,
            image_url: None,
        };
        let items = vec![
            item(Some("咖啡")),
            item(Some("甜点")),
            item(Some("咖啡")),
            item(None),
            item(Some(" ")),
        ];
        assert_eq!(distinct_categories(&items), vec!["咖啡", "甜点"]);
        let groups = group_by_category(&items);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[2].0, "其他");
        assert_eq!(groups[2].1.len(), 2);
    }

    #[test]
    fn availability_mirrors_both_field_names() {
        let mut item = MenuItem {
            id: 1,
            name: "拿铁".into(),
            price: 4.5,
            category: None,
            available: None,
            is_available: None,
            tags: None,
            display_order: None,
            image_url: None,
        };
        assert!(item.availability());
        item.is_available = Some(false);
        assert!(!item.availability());
        // 新字段优先于历史字段
        item.available = Some(true);
        assert!(item.availability());
    }

    #[test]
    fn menu_sort_is_ascending_with_missing_keys_last() {
        let item = |id: i64, order: Option<i32>| MenuItem {
            id,
            name: "x".into(),
            price: 1.0,
            category: None,
            available: None,
            is_available: None,
            tags: None,
            display_order: order,
            image_url: None,
        };
        let mut items = vec![
            item(1, Some(2)),
            item(2, None),
            item(3, Some(1)),
            item(4, Some(2)),
        ];
        sort_menu_items(&mut items);
        let ids: Vec<i64> = items.iter().map(|i| i.id).collect();
        // 相同排序键 (1,4) 保持原始顺序
        assert_eq!(ids, vec![3, 1, 4, 2]);
    }

    #[test]
    fn wire_shapes_are_camel_case_and_screaming_statuses() {
        let json = r#"{
            "id": 1, "userId": 9, "userName": "ana", "placeId": 3,
            "reservationTime": "2026-08-30T19:00:00", "numberOfPeople": 4,
            "status": "NO_SHOW", "createdAt": 1756500000000
        }"#;
        let r: Reservation = serde_json::from_str(json).unwrap();
        assert_eq!(r.status, ReservationStatus::NoShow);
        assert_eq!(r.number_of_people, 4);
        let back = serde_json::to_value(&r).unwrap();
        assert_eq!(back["userName"], "ana");
        assert_eq!(back["status"], "NO_SHOW");
        assert!(back.get("rejectionReason").is_none());
    }
}
