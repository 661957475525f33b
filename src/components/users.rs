use crate::api::use_api;
use crate::components::banner::{Notification, Toast};
use crate::components::icons::{RefreshCw, Users};
use crate::components::nav::PortalNav;
use crate::web::route::AppRoute;
use leptos::prelude::*;
use leptos::task::spawn_local;
use locaffy_shared::UserAccount;
use locaffy_shared::protocol::DashboardStats;
use locaffy_shared::query::{Pagination, matches_search};
use locaffy_shared::role::Role;

const PAGE_SIZE: usize = 15;

/// 超管用户管理页
///
/// 只读视图：账号、角色与行为计数器。平台统计接口后端尚未
/// 实现时整行退化为零值，列表本身不受影响。
#[component]
pub fn UsersPage() -> impl IntoView {
    let api = use_api();

    let (users, set_users) = signal(Vec::<UserAccount>::new());
    let (stats, set_stats) = signal(DashboardStats::default());
    let (loading, set_loading) = signal(true);
    let notification = RwSignal::new(Notification::None);

    let (search, set_search) = signal(String::new());
    let pagination = RwSignal::new(Pagination::new(PAGE_SIZE));

    let load = {
        let api = api.clone();
        move || {
            let api = api.clone();
            set_loading.set(true);
            spawn_local(async move {
                match api.admin_users().await {
                    Ok(list) => set_users.set(list),
                    Err(e) => notification.set(Some((format!("加载用户失败: {e}"), true))),
                }
                match api.admin_dashboard_stats().await {
                    Ok(s) => set_stats.set(s),
                    Err(e) => {
                        web_sys::console::warn_1(&format!("[Stats] 平台统计不可用: {e}").into());
                        set_stats.set(DashboardStats::default());
                    }
                }
                set_loading.set(false);
            });
        }
    };

    {
        let load = load.clone();
        Effect::new(move |_| {
            load();
        });
    }

    let visible = Memo::new(move |_| {
        let needle = search.get();
        users.with(|all| {
            all.iter()
                .filter(|u| {
                    matches_search(
                        &needle,
                        &[u.username.as_str(), u.email.as_deref().unwrap_or("")],
                    )
                })
                .cloned()
                .collect::<Vec<UserAccount>>()
        })
    });

    let page_items = move || {
        let p = pagination.get();
        visible.with(|v| p.slice(v).to_vec())
    };
    let total_pages = move || pagination.get().total_pages(visible.with(|v| v.len()));
    let current_page = move || pagination.get().clamped_page(visible.with(|v| v.len()));

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-8">
                <Toast notification=notification />
                <PortalNav active=AppRoute::AdminUsers />

                <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                    <div class="stat">
                        <div class="stat-figure text-primary">
                            <Users attr:class="inline-block w-8 h-8" />
                        </div>
                        <div class="stat-title">"注册用户"</div>
                        <div class="stat-value text-primary">{move || stats.get().total_users}</div>
                    </div>
                    <div class="stat">
                        <div class="stat-title">"门店总数"</div>
                        <div class="stat-value">{move || stats.get().total_places}</div>
                    </div>
                    <div class="stat">
                        <div class="stat-title">"预订总数"</div>
                        <div class="stat-value">{move || stats.get().total_reservations}</div>
                    </div>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0">
                        <div class="flex items-center justify-between p-6 pb-2">
                            <div>
                                <h3 class="card-title">"用户"</h3>
                                <p class="text-base-content/70 text-sm">"平台全部账号与行为计数。"</p>
                            </div>
                            <div class="flex items-center gap-2">
                                <input
                                    type="text"
                                    placeholder="搜索用户名 / 邮箱"
                                    class="input input-bordered input-sm w-56"
                                    on:input=move |ev| {
                                        set_search.set(event_target_value(&ev));
                                        pagination.update(|p| p.page = 0);
                                    }
                                    prop:value=search
                                />
                                <select
                                    class="select select-bordered select-sm"
                                    on:change=move |ev| {
                                        if let Ok(n) = event_target_value(&ev).parse::<usize>() {
                                            pagination.update(|p| p.set_page_size(n));
                                        }
                                    }
                                >
                                    <option value="15">"每页 15"</option>
                                    <option value="30">"每页 30"</option>
                                    <option value="50">"每页 50"</option>
                                </select>
                                <button
                                    on:click={
                                        let load = load.clone();
                                        move |_| load()
                                    }
                                    disabled=move || loading.get()
                                    class="btn btn-ghost btn-circle btn-sm"
                                >
                                    <RefreshCw attr:class=move || if loading.get() { "h-4 w-4 animate-spin" } else { "h-4 w-4" } />
                                </button>
                            </div>
                        </div>

                        <div class="overflow-x-auto w-full">
                            <table class="table table-zebra w-full">
                                <thead>
                                    <tr>
                                        <th>"用户名"</th>
                                        <th class="hidden md:table-cell">"邮箱"</th>
                                        <th>"角色"</th>
                                        <th>"预订"</th>
                                        <th>"已取消"</th>
                                        <th>"评价"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <Show when=move || visible.with(|v| v.is_empty()) && !loading.get()>
                                        <tr>
                                            <td colspan="6" class="text-center py-8 text-base-content/50">
                                                "没有符合条件的用户。"
                                            </td>
                                        </tr>
                                    </Show>
                                    <Show when=move || loading.get() && visible.with(|v| v.is_empty())>
                                        <tr>
                                            <td colspan="6" class="text-center py-8 text-base-content/50">
                                                <span class="loading loading-spinner loading-md"></span> " 加载中..."
                                            </td>
                                        </tr>
                                    </Show>
                                    <For
                                        each=page_items
                                        key=|u| u.id
                                        children=move |user| {
                                            let role_label = user
                                                .role
                                                .as_deref()
                                                .and_then(Role::parse)
                                                .map(|r| r.label())
                                                .unwrap_or("用户");
                                            view! {
                                                <tr>
                                                    <td class="font-bold">{user.username.clone()}</td>
                                                    <td class="hidden md:table-cell text-sm opacity-70">
                                                        {user.email.clone().unwrap_or_default()}
                                                    </td>
                                                    <td>
                                                        <span class="badge badge-outline">{role_label}</span>
                                                    </td>
                                                    <td class="font-mono">{user.total_reservations}</td>
                                                    <td class="font-mono">{user.cancelled_reservations}</td>
                                                    <td class="font-mono">{user.total_reviews}</td>
                                                </tr>
                                            }
                                        }
                                    />
                                </tbody>
                            </table>
                        </div>

                        <div class="flex items-center justify-center gap-4 p-4">
                            <button
                                class="btn btn-ghost btn-sm"
                                disabled=move || current_page() == 0
                                on:click=move |_| pagination.update(|p| p.page = p.page.saturating_sub(1))
                            >"上一页"</button>
                            <span class="text-sm text-base-content/70">
                                {move || format!("{} / {}", current_page() + 1, total_pages())}
                            </span>
                            <button
                                class="btn btn-ghost btn-sm"
                                disabled=move || current_page() + 1 >= total_pages()
                                on:click=move |_| pagination.update(|p| p.page += 1)
                            >"下一页"</button>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}
