//! 页面级角色守卫
//!
//! 路由层只挡未登录；角色白名单由每个特权页面在挂载时独立
//! 复核：先看缓存的用户快照，快照没有角色再解码本地 token，
//! 绝不信任跨刷新缓存的"已授权"布尔值。白名单不匹配时渲染
//! 错误提示，约 3 秒后重定向到中立首页。
//!
//! 这只是界面层的便捷门禁，不是安全边界；后端独立鉴权。

use crate::auth::use_auth;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use leptos::prelude::*;
use locaffy_shared::role::{Role, is_allowed};
use std::time::Duration;

#[component]
pub fn RoleGuard(
    /// 本页面的角色白名单
    allowed: &'static [Role],
    children: ChildrenFn,
) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    // 挂载时重新推导一次角色；解不出角色即未授权
    let role = auth.current_role();
    let permitted = is_allowed(role, allowed);

    if !permitted {
        web_sys::console::log_1(
            &format!("[Guard] Role {:?} not in allow-list, redirecting.", role).into(),
        );
        set_timeout(
            move || router.navigate(AppRoute::Home),
            Duration::from_secs(3),
        );
    }

    view! {
        <Show
            when=move || permitted
            fallback=|| {
                view! {
                    <div class="flex items-center justify-center min-h-screen bg-base-200">
                        <div role="alert" class="alert alert-error max-w-md shadow-lg">
                            <span>"没有访问该页面的权限，即将返回首页…"</span>
                        </div>
                    </div>
                }
            }
        >
            {children()}
        </Show>
    }
}
