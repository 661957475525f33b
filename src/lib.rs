//! Locaffy 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth` / `session`: 认证状态与持久化会话
//! - `api`: REST 客户端与错误映射
//! - `components`: UI 组件层

mod api;
mod auth;
mod components {
    pub mod applications;
    mod banner;
    pub mod businesses;
    mod confirm_dialog;
    pub mod dashboard;
    pub mod guard;
    pub mod home;
    mod icons;
    pub mod login;
    pub mod menu_editor;
    mod menu_item_dialog;
    mod nav;
    pub mod place_settings;
    pub mod qr_menu;
    pub mod reviews;
    pub mod users;
}
mod session;

use crate::api::LocaffyApi;
use crate::auth::{AuthContext, init_auth};
use crate::components::applications::ApplicationsPage;
use crate::components::businesses::BusinessesPage;
use crate::components::dashboard::DashboardPage;
use crate::components::guard::RoleGuard;
use crate::components::home::HomePage;
use crate::components::login::LoginPage;
use crate::components::menu_editor::MenuEditorPage;
use crate::components::place_settings::PlaceSettingsPage;
use crate::components::qr_menu::QrMenuPage;
use crate::components::reviews::ReviewsPage;
use crate::components::users::UsersPage;

use leptos::prelude::*;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web {
    pub mod route;
    pub mod router;
    mod storage;

    pub use storage::LocalStorage;
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。路由层只挡未登录；
/// 特权页面再套一层 `RoleGuard` 按白名单复核角色。
fn route_matcher(route: AppRoute) -> AnyView {
    // 白名单从路由定义取，特权页面与守卫天然一致
    fn guarded(route: AppRoute, page: fn() -> AnyView) -> AnyView {
        let allowed = route.allowed_roles().unwrap_or_default();
        view! { <RoleGuard allowed=allowed>{move || page()}</RoleGuard> }.into_any()
    }

    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::QrMenu(place_id) => view! { <QrMenuPage place_id=place_id /> }.into_any(),
        AppRoute::Dashboard => guarded(route, || view! { <DashboardPage /> }.into_any()),
        AppRoute::Menu => guarded(route, || view! { <MenuEditorPage /> }.into_any()),
        AppRoute::Settings => guarded(route, || view! { <PlaceSettingsPage /> }.into_any()),
        AppRoute::Reviews => guarded(route, || view! { <ReviewsPage /> }.into_any()),
        AppRoute::AdminApplications => {
            guarded(route, || view! { <ApplicationsPage /> }.into_any())
        }
        AppRoute::AdminBusinesses => guarded(route, || view! { <BusinessesPage /> }.into_any()),
        AppRoute::AdminUsers => guarded(route, || view! { <UsersPage /> }.into_any()),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"页面未找到"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建认证上下文与 API 客户端
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);
    let api = LocaffyApi::default();
    provide_context(api.clone());

    // 2. 初始化认证状态（从 LocalStorage 恢复会话并后台刷新）
    init_auth(&auth_ctx, &api);

    // 3. 获取认证 / 角色信号，用于注入路由服务（解耦！）
    let is_authenticated = auth_ctx.is_authenticated_signal();
    let role = auth_ctx.role_signal();

    view! {
        // 4. 路由器组件：注入认证信号实现守卫
        <Router is_authenticated=is_authenticated role=role>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
