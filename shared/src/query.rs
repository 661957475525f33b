//! 列表视图模型模块
//!
//! 对已获取的数组做内存内的过滤 / 排序 / 分页。列表规模以
//! 百为单位，因此全部采用"依赖变化即整体重算"的纯函数，不做
//! 增量更新。组合规则：
//! - 全文搜索在各可搜索字段间取 OR（不区分大小写的子串匹配）
//! - 精确过滤彼此以及与搜索之间取 AND
//! - 分页作用在过滤并排序之后的数组上

use crate::date::{DateRange, LocalClock};
use crate::{ApplicationStatus, BusinessApplication, Review};
use std::cmp::Ordering;

// =========================================================
// 搜索
// =========================================================

/// 不区分大小写的子串匹配，OR 遍历所有可搜索字段
///
/// 空搜索词匹配一切（恒等过滤）。
pub fn matches_search(needle: &str, haystacks: &[&str]) -> bool {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    haystacks
        .iter()
        .any(|h| h.to_lowercase().contains(&needle))
}

// =========================================================
// 实体过滤条件
// =========================================================

/// 评价列表的过滤条件
///
/// `Default` 即全空条件，对任何数组都是恒等过滤。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewFilter {
    /// 按用户名与评价内容搜索
    pub search: String,
    /// 精确匹配的星级
    pub rating: Option<u8>,
    pub date: Option<DateRange>,
}

impl ReviewFilter {
    /// 各活跃条件取 AND；缺失创建时间的条目不匹配任何日期区间
    pub fn matches(&self, review: &Review, clock: LocalClock) -> bool {
        matches_search(
            &self.search,
            &[
                review.username.as_str(),
                review.comment.as_deref().unwrap_or(""),
            ],
        ) && self.rating.is_none_or(|r| review.rating == r)
            && self.date.is_none_or(|dr| {
                review.created_at.is_some_and(|ts| dr.contains(ts, clock))
            })
    }
}

/// 入驻申请列表的过滤条件
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationFilter {
    /// 按商户名、申请人与邮箱搜索
    pub search: String,
    pub status: Option<ApplicationStatus>,
    pub date: Option<DateRange>,
}

impl ApplicationFilter {
    pub fn matches(&self, app: &BusinessApplication, clock: LocalClock) -> bool {
        matches_search(
            &self.search,
            &[
                app.business_name.as_str(),
                app.owner_name.as_str(),
                app.email.as_deref().unwrap_or(""),
            ],
        ) && self.status.is_none_or(|s| app.status == s)
            && self.date.is_none_or(|dr| {
                app.created_at.is_some_and(|ts| dr.contains(ts, clock))
            })
    }
}

// =========================================================
// 排序
// =========================================================

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// 单字段排序状态
///
/// 重复选择同一字段时翻转方向；切换字段时回到升序。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub field: &'static str,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(field: &'static str) -> Self {
        Self {
            field,
            direction: SortDirection::Ascending,
        }
    }

    pub fn toggle(&mut self, field: &'static str) {
        if self.field == field {
            self.direction = self.direction.flip();
        } else {
            self.field = field;
            self.direction = SortDirection::Ascending;
        }
    }
}

/// 按给定比较器做稳定排序
///
/// 降序通过交换比较器实参实现，相等元素在两个方向上都保持
/// 输入顺序（`sort_by` 本身稳定，相等时不移动）。
pub fn sort_items<T>(
    items: &mut [T],
    direction: SortDirection,
    mut cmp: impl FnMut(&T, &T) -> Ordering,
) {
    match direction {
        SortDirection::Ascending => items.sort_by(|a, b| cmp(a, b)),
        SortDirection::Descending => items.sort_by(|a, b| cmp(b, a)),
    }
}

// =========================================================
// 分页
// =========================================================

/// 分页窗口
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 页索引（从 0 起）
    pub page: usize,
    /// 每页条数（恒大于 0）
    pub page_size: usize,
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 0,
            page_size: page_size.max(1),
        }
    }

    /// 总页数（空数组记 1 页，便于界面显示 "1 / 1"）
    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.page_size).max(1)
    }

    /// 把页索引钳制到最后一个有效页
    ///
    /// 非空数组绝不会因为越界的页索引渲染成空页。
    pub fn clamped_page(&self, len: usize) -> usize {
        self.page.min(self.total_pages(len) - 1)
    }

    /// 对已过滤并排序的数组取当前页窗口
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let page = self.clamped_page(items.len());
        let start = page * self.page_size;
        let end = (start + self.page_size).min(items.len());
        if start >= items.len() {
            &[]
        } else {
            &items[start..end]
        }
    }

    /// 修改每页条数并把页索引重置到 0
    ///
    /// 避免改变页大小后落在越界页上。
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::Timestamp;

    fn review(id: i64, username: &str, rating: u8, created_days_ago: Option<u64>) -> Review {
        let now = Timestamp::new(100 * 24 * 3600 * 1000);
        Review {
            id,
            user_id: id,
            username: username.to_string(),
            place_id: 1,
            rating,
            comment: Some(format!("comment {id}")),
            created_at: created_days_ago
                .map(|d| now - std::time::Duration::from_secs(d * 24 * 3600)),
        }
    }

    fn application(
        id: i64,
        business_name: &str,
        status: ApplicationStatus,
        created_days_ago: Option<u64>,
    ) -> BusinessApplication {
        let now = Timestamp::new(100 * 24 * 3600 * 1000);
        BusinessApplication {
            id,
            business_name: business_name.to_string(),
            owner_name: "Ana Petrova".to_string(),
            tax_number: None,
            phone: None,
            email: None,
            address: None,
            latitude: None,
            longitude: None,
            opening_time: None,
            closing_time: None,
            working_days: Vec::new(),
            status,
            rejection_reason: None,
            created_at: created_days_ago
                .map(|d| now - std::time::Duration::from_secs(d * 24 * 3600)),
        }
    }

    fn test_clock() -> LocalClock {
        LocalClock::utc(Timestamp::new(100 * 24 * 3600 * 1000))
    }

    #[test]
    fn empty_needle_matches_everything() {
        assert!(matches_search("", &["anything"]));
        assert!(matches_search("   ", &[]));
    }

    #[test]
    fn search_is_case_insensitive_or_across_fields() {
        let fields = ["Ana Petrova", "great coffee", "42"];
        assert!(matches_search("COFFEE", &fields));
        assert!(matches_search("petrova", &fields));
        assert!(matches_search("42", &fields));
        assert!(!matches_search("tea", &fields));
    }

    #[test]
    fn rating_filter_matches_exactly() {
        let filter = ReviewFilter {
            rating: Some(4),
            ..Default::default()
        };
        let clock = test_clock();
        assert!(filter.matches(&review(1, "ana", 4, Some(1)), clock));
        // 不是 "4 星及以上"：5 星与 3 星都不匹配
        assert!(!filter.matches(&review(2, "bob", 5, Some(1)), clock));
        assert!(!filter.matches(&review(3, "eve", 3, Some(1)), clock));
    }

    #[test]
    fn empty_filters_keep_every_element() {
        let clock = test_clock();
        let reviews = vec![
            review(1, "ana", 5, Some(1)),
            review(2, "bob", 1, None),
            review(3, "eve", 3, Some(40)),
        ];
        let filter = ReviewFilter::default();
        let kept: Vec<&Review> = reviews.iter().filter(|r| filter.matches(r, clock)).collect();
        assert_eq!(kept.len(), reviews.len());

        let apps = vec![
            application(1, "Cafe Mondo", ApplicationStatus::Pending, Some(2)),
            application(2, "Bistro 42", ApplicationStatus::Rejected, None),
        ];
        let filter = ApplicationFilter::default();
        assert!(apps.iter().all(|a| filter.matches(a, clock)));
    }

    #[test]
    fn combined_filters_take_the_intersection() {
        let clock = test_clock();
        let apps = vec![
            // 通过全部三个条件
            application(1, "Cafe Mondo", ApplicationStatus::Pending, Some(2)),
            // 搜索不命中
            application(2, "Bistro 42", ApplicationStatus::Pending, Some(2)),
            // 状态不符
            application(3, "Cafe Aroma", ApplicationStatus::Approved, Some(2)),
            // 超出日期区间
            application(4, "Cafe Nero", ApplicationStatus::Pending, Some(10)),
            // 没有创建时间，日期过滤下一律排除
            application(5, "Cafe Luna", ApplicationStatus::Pending, None),
        ];
        let filter = ApplicationFilter {
            search: "cafe".to_string(),
            status: Some(ApplicationStatus::Pending),
            date: Some(DateRange::Last7Days),
        };

        let kept: Vec<&BusinessApplication> =
            apps.iter().filter(|a| filter.matches(a, clock)).collect();
        assert_eq!(kept.iter().map(|a| a.id).collect::<Vec<_>>(), vec![1]);
        // 每个留存元素都满足所有活跃条件
        for a in kept {
            assert!(matches_search(&filter.search, &[a.business_name.as_str()]));
            assert_eq!(Some(a.status), filter.status);
            assert!(a.created_at.is_some_and(|ts| DateRange::Last7Days.contains(ts, clock)));
        }
    }

    #[test]
    fn toggle_flips_same_field_and_resets_on_new_field() {
        let mut sort = SortState::new("createdAt");
        assert_eq!(sort.direction, SortDirection::Ascending);
        sort.toggle("createdAt");
        assert_eq!(sort.direction, SortDirection::Descending);
        sort.toggle("rating");
        assert_eq!(sort.field, "rating");
        assert_eq!(sort.direction, SortDirection::Ascending);
    }

    #[test]
    fn sort_is_stable_for_equal_keys_in_both_directions() {
        // (key, 原始序号)
        let base = vec![(2, 0), (1, 1), (2, 2), (1, 3)];

        let mut asc = base.clone();
        sort_items(&mut asc, SortDirection::Ascending, |a, b| a.0.cmp(&b.0));
        assert_eq!(asc, vec![(1, 1), (1, 3), (2, 0), (2, 2)]);

        let mut desc = base;
        sort_items(&mut desc, SortDirection::Descending, |a, b| a.0.cmp(&b.0));
        assert_eq!(desc, vec![(2, 0), (2, 2), (1, 1), (1, 3)]);
    }

    #[test]
    fn last_page_holds_remainder() {
        let items: Vec<u32> = (0..23).collect();
        let mut p = Pagination::new(10);
        assert_eq!(p.total_pages(items.len()), 3);
        p.page = 2;
        assert_eq!(p.slice(&items), &items[20..23]);

        // 整除时最后一页是满页
        let even: Vec<u32> = (0..20).collect();
        assert_eq!(p.clamped_page(even.len()), 1);
        assert_eq!(p.slice(&even).len(), 10);
    }

    #[test]
    fn out_of_range_page_clamps_to_last_valid_page() {
        let items: Vec<u32> = (0..5).collect();
        let p = Pagination {
            page: 99,
            page_size: 2,
        };
        assert_eq!(p.slice(&items), &items[4..5]);
        assert!(!p.slice(&items).is_empty());
    }

    #[test]
    fn changing_page_size_resets_page_index() {
        let mut p = Pagination::new(10);
        p.page = 4;
        p.set_page_size(25);
        assert_eq!(p.page, 0);
        assert_eq!(p.page_size, 25);
    }

    #[test]
    fn empty_array_renders_a_single_empty_page() {
        let p = Pagination::new(10);
        let items: Vec<u32> = vec![];
        assert_eq!(p.total_pages(0), 1);
        assert_eq!(p.slice(&items), &[] as &[u32]);
    }
}
