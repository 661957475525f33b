use crate::api::use_api;
use crate::components::banner::{Notification, Toast};
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::icons::{Plus, QrCode, RefreshCw, Store, Trash2};
use crate::components::nav::PortalNav;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;
use locaffy_shared::Place;
use locaffy_shared::query::{Pagination, matches_search};

const PAGE_SIZE: usize = 10;

/// 超管门店管理页
///
/// 列表 / 上下线 / 删除可用；新建后端尚未提供接口，
/// 入口保留但会立即得到"尚未实现"的提示。
#[component]
pub fn BusinessesPage() -> impl IntoView {
    let api = use_api();
    let router = use_router();

    let (places, set_places) = signal(Vec::<Place>::new());
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
                match api.admin_places().await {
                    Ok(list) => set_places.set(list),
                    Err(e) => notification.set(Some((format!("加载门店失败: {e}"), true))),
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
        places.with(|all| {
            all.iter()
                .filter(|p| {
                    matches_search(
                        &needle,
                        &[p.name.as_str(), p.address.as_deref().unwrap_or("")],
                    )
                })
                .cloned()
                .collect::<Vec<Place>>()
        })
    });

    let page_items = move || {
        let p = pagination.get();
        visible.with(|v| p.slice(v).to_vec())
    };
    let total_pages = move || pagination.get().total_pages(visible.with(|v| v.len()));
    let current_page = move || pagination.get().clamped_page(visible.with(|v| v.len()));

    let toggle_status = {
        let api = api.clone();
        let load = load.clone();
        move |id: i64| {
            let api = api.clone();
            let load = load.clone();
            spawn_local(async move {
                match api.admin_toggle_place_status(id).await {
                    Ok(()) => {
                        notification.set(Some(("门店状态已切换".to_string(), false)));
                        load();
                    }
                    Err(e) => notification.set(Some((format!("切换状态失败: {e}"), true))),
                }
            });
        }
    };

    // 后端未提供新建接口，点击即得到"尚未实现"提示
    let on_create = {
        let api = api.clone();
        move |_| {
            let api = api.clone();
            spawn_local(async move {
                if let Err(e) = api.admin_create_place(&Default::default()).await {
                    notification.set(Some((e.to_string(), true)));
                }
            });
        }
    };

    let delete_open = RwSignal::new(false);
    let (pending_delete, set_pending_delete) = signal(Option::<(i64, String)>::None);

    let on_confirm_delete = {
        let api = api.clone();
        let load = load.clone();
        move |_| {
            if let Some((id, _)) = pending_delete.get_untracked() {
                let api = api.clone();
                let load = load.clone();
                spawn_local(async move {
                    match api.admin_delete_place(id).await {
                        Ok(()) => {
                            notification.set(Some(("门店已删除".to_string(), false)));
                            load();
                        }
                        Err(e) => notification.set(Some((format!("删除门店失败: {e}"), true))),
                    }
                });
            }
        }
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-8">
                <Toast notification=notification />
                <PortalNav active=AppRoute::AdminBusinesses />

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0">
                        <div class="flex flex-wrap items-center justify-between gap-3 p-6 pb-2">
                            <div>
                                <h3 class="card-title">"门店"</h3>
                                <p class="text-base-content/70 text-sm">"平台全部门店的上下线与删除。"</p>
                            </div>
                            <div class="flex items-center gap-2">
                                <input
                                    type="text"
                                    placeholder="搜索门店 / 地址"
                                    class="input input-bordered input-sm w-56"
                                    on:input=move |ev| {
                                        set_search.set(event_target_value(&ev));
                                        pagination.update(|p| p.page = 0);
                                    }
                                    prop:value=search
                                />
                                <button class="btn btn-primary btn-sm gap-1" on:click=on_create>
                                    <Plus attr:class="h-4 w-4" /> "添加门店"
                                </button>
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
                                        <th>"门店"</th>
                                        <th class="hidden md:table-cell">"地址"</th>
                                        <th class="hidden md:table-cell">"联系方式"</th>
                                        <th>"在线"</th>
                                        <th></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <Show when=move || visible.with(|v| v.is_empty()) && !loading.get()>
                                        <tr>
                                            <td colspan="5" class="text-center py-8 text-base-content/50">
                                                "没有符合条件的门店。"
                                            </td>
                                        </tr>
                                    </Show>
                                    <Show when=move || loading.get() && visible.with(|v| v.is_empty())>
                                        <tr>
                                            <td colspan="5" class="text-center py-8 text-base-content/50">
                                                <span class="loading loading-spinner loading-md"></span> " 加载中..."
                                            </td>
                                        </tr>
                                    </Show>
                                    <For
                                        each=page_items
                                        key=|p| (p.id, p.is_active())
                                        children={
                                            let toggle_status = toggle_status.clone();
                                            move |place| {
                                                let id = place.id;
                                                let name = place.name.clone();
                                                let active = place.is_active();
                                                let toggle_status = toggle_status.clone();
                                                view! {
                                                    <tr>
                                                        <td>
                                                            <div class="flex items-center gap-2 font-bold">
                                                                <Store attr:class="h-4 w-4 opacity-50" />
                                                                {place.name.clone()}
                                                            </div>
                                                        </td>
                                                        <td class="hidden md:table-cell text-sm opacity-70">
                                                            {place.address.clone().unwrap_or_default()}
                                                        </td>
                                                        <td class="hidden md:table-cell text-sm opacity-70">
                                                            {place.phone.clone().unwrap_or_default()}
                                                        </td>
                                                        <td>
                                                            <input type="checkbox" class="toggle toggle-success toggle-sm"
                                                                prop:checked=active
                                                                on:change=move |_| toggle_status(id)
                                                            />
                                                        </td>
                                                        <td>
                                                            <div class="flex gap-1 justify-end">
                                                                <button
                                                                    class="btn btn-ghost btn-xs gap-1"
                                                                    on:click=move |_| router.navigate(AppRoute::QrMenu(id))
                                                                >
                                                                    <QrCode attr:class="h-4 w-4" /> "菜单"
                                                                </button>
                                                                <button
                                                                    class="btn btn-ghost btn-xs text-error"
                                                                    on:click=move |_| {
                                                                        set_pending_delete.set(Some((id, name.clone())));
                                                                        delete_open.set(true);
                                                                    }
                                                                >
                                                                    <Trash2 attr:class="h-4 w-4" />
                                                                </button>
                                                            </div>
                                                        </td>
                                                    </tr>
                                                }
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

            <ConfirmDialog
                open=delete_open
                title="删除门店".to_string()
                message=Signal::derive(move || {
                    format!(
                        "确定删除门店「{}」吗？其菜单与预订数据将一并失效。",
                        pending_delete.get().map(|(_, n)| n).unwrap_or_default()
                    )
                })
                on_confirm=on_confirm_delete
            />
        </div>
    }
}
