use crate::api::use_api;
use crate::auth::{logout, use_auth};
use crate::components::icons::{LogOut, ShieldCheck, Store};
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use leptos::prelude::*;
use locaffy_shared::role::Role;

/// 角色对应的门户页签
fn tabs_for(role: Option<Role>) -> &'static [(AppRoute, &'static str)] {
    match role {
        Some(Role::Admin) => &[
            (AppRoute::AdminApplications, "入驻审核"),
            (AppRoute::AdminBusinesses, "门店管理"),
            (AppRoute::AdminUsers, "用户"),
            (AppRoute::Reviews, "评价"),
        ],
        Some(Role::BusinessOwner) => &[
            (AppRoute::Dashboard, "控制台"),
            (AppRoute::Menu, "菜单"),
            (AppRoute::Settings, "门店设置"),
            (AppRoute::Reviews, "评价"),
        ],
        _ => &[],
    }
}

/// 门户顶栏：按角色展示页签 + 当前账号 + 注销
#[component]
pub fn PortalNav(
    /// 当前高亮的页签
    active: AppRoute,
) -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let router = use_router();
    let auth_state = auth.state;

    let tabs = tabs_for(auth.current_role());

    let on_logout = {
        let api = api.clone();
        move |_| {
            // 导航由路由服务的认证监听自动处理
            logout(&auth, &api);
        }
    };

    view! {
        <div class="navbar bg-base-100 rounded-box shadow-xl">
            <div class="flex-1 gap-1">
                <Store attr:class="text-primary h-6 w-6" />
                <a class="btn btn-ghost text-xl">"Locaffy"</a>
                <div class="tabs tabs-boxed bg-transparent hidden md:flex">
                    {tabs.iter().map(|(route, label)| {
                        let route = *route;
                        let is_active = route == active;
                        view! {
                            <a
                                class=if is_active { "tab tab-active" } else { "tab" }
                                on:click=move |_| router.navigate(route)
                            >
                                {*label}
                            </a>
                        }
                    }).collect_view()}
                </div>
            </div>
            <div class="flex-none gap-2">
                <span class="badge badge-neutral gap-1 hidden md:inline-flex">
                    <Show when=move || auth.current_role() == Some(Role::Admin)>
                        <ShieldCheck attr:class="h-3 w-3" />
                    </Show>
                    {move || auth_state.get().user.map(|u| u.username).unwrap_or_default()}
                </span>
                <button on:click=on_logout class="btn btn-outline btn-error btn-sm gap-2">
                    <LogOut attr:class="h-4 w-4" /> "注销"
                </button>
            </div>
        </div>
    }
}
