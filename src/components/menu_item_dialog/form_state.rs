//! 菜品表单状态管理模块
//!
//! 将零散的 signal 整合为 `FormState` 结构体，负责：
//! - 数据的持有（新建与编辑复用同一份）
//! - 数据的重置 / 从已有菜品回填
//! - 数据到请求对象的转换

use leptos::prelude::*;
use locaffy_shared::protocol::MenuItemRequest;
use locaffy_shared::{MenuItem, join_tags, parse_tags};

/// 表单状态结构体
///
/// 使用 `RwSignal` 因为它实现了 `Copy` trait，非常适合作为 Props 在组件间传递。
/// 文件信号单独持有（`web_sys::File` 只能 Clone），价格与排序键
/// 以字符串形态持有，提交时再解析。
#[derive(Clone, Copy)]
pub struct FormState {
    /// 编辑模式下的菜品 id；None 表示新建
    pub editing_id: RwSignal<Option<i64>>,
    pub name: RwSignal<String>,
    pub price: RwSignal<String>,
    pub category: RwSignal<String>,
    pub available: RwSignal<bool>,
    /// 逗号分隔的标签串，提交前会规整（trim、去空段）
    pub tags: RwSignal<String>,
    pub display_order: RwSignal<String>,
    // File 不是 Send，走线程本地存储的信号变体
    pub image: RwSignal<Option<web_sys::File>, LocalStorage>,
}

impl FormState {
    /// 创建新的表单状态，所有字段使用默认值
    pub fn new() -> Self {
        Self {
            editing_id: RwSignal::new(None),
            name: RwSignal::new(String::new()),
            price: RwSignal::new(String::new()),
            category: RwSignal::new(String::new()),
            available: RwSignal::new(true),
            tags: RwSignal::new(String::new()),
            display_order: RwSignal::new(String::new()),
            image: RwSignal::new_local(None),
        }
    }

    /// 重置表单到初始状态
    pub fn reset(&self) {
        self.editing_id.set(None);
        self.name.set(String::new());
        self.price.set(String::new());
        self.category.set(String::new());
        self.available.set(true);
        self.tags.set(String::new());
        self.display_order.set(String::new());
        self.image.set(None);
    }

    /// 从已有菜品回填（编辑模式）
    pub fn load(&self, item: &MenuItem) {
        self.editing_id.set(Some(item.id));
        self.name.set(item.name.clone());
        self.price.set(format!("{:.2}", item.price));
        self.category.set(item.category.clone().unwrap_or_default());
        self.available.set(item.availability());
        self.tags.set(item.tags.clone().unwrap_or_default());
        self.display_order.set(
            item.display_order
                .map(|o| o.to_string())
                .unwrap_or_default(),
        );
        self.image.set(None);
    }

    /// 将表单状态转换为 API 请求对象
    ///
    /// 价格无法解析时返回 None，由调用方提示用户。
    pub fn to_request(&self) -> Option<MenuItemRequest> {
        let price = self.price.get().trim().parse::<f64>().ok()?;
        if price < 0.0 {
            return None;
        }

        let category = self.category.get();
        let category = match category.trim() {
            "" => None,
            c => Some(c.to_string()),
        };

        // 标签串先解析再拼回，规整形态
        let tags = parse_tags(&self.tags.get());
        let tags = if tags.is_empty() {
            None
        } else {
            Some(join_tags(&tags))
        };

        let display_order = self.display_order.get().trim().parse::<i32>().ok();

        Some(MenuItemRequest {
            name: self.name.get(),
            price,
            category,
            available: self.available.get(),
            tags,
            display_order,
        })
    }
}
