use crate::api::use_api;
use crate::components::banner::{Notification, Toast};
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::icons::{MoreHorizontal, RefreshCw, Trash2};
use crate::components::menu_item_dialog::{MenuItemDialog, form_state::FormState};
use crate::components::nav::PortalNav;
use crate::web::route::AppRoute;
use leptos::prelude::*;
use leptos::task::spawn_local;
use locaffy_shared::protocol::MenuItemRequest;
use locaffy_shared::{MenuItem, distinct_categories, sort_menu_items};

/// 商家菜单管理页
///
/// 列表按 displayOrder 升序展示；每次变更（新建 / 编辑 /
/// 删除 / 上下架）成功后整表重读，绝不信任本地改写。
#[component]
pub fn MenuEditorPage() -> impl IntoView {
    let api = use_api();

    let (items, set_items) = signal(Vec::<MenuItem>::new());
    let (categories, set_categories) = signal(Vec::<String>::new());
    let (loading, set_loading) = signal(true);
    let notification = RwSignal::new(Notification::None);

    let form = FormState::new();
    let dialog_open = RwSignal::new(false);

    let delete_open = RwSignal::new(false);
    let (pending_delete, set_pending_delete) = signal(Option::<(i64, String)>::None);

    let load_items = {
        let api = api.clone();
        move || {
            let api = api.clone();
            set_loading.set(true);
            spawn_local(async move {
                match api.my_menu_items().await {
                    Ok(mut list) => {
                        sort_menu_items(&mut list);
                        // 分类接口失败时退回从条目派生
                        let cats = match api.my_menu_categories().await {
                            Ok(cats) if !cats.is_empty() => cats,
                            _ => distinct_categories(&list),
                        };
                        set_categories.set(cats);
                        set_items.set(list);
                    }
                    Err(e) => notification.set(Some((format!("加载菜单失败: {e}"), true))),
                }
                set_loading.set(false);
            });
        }
    };

    // 初始加载
    {
        let load_items = load_items.clone();
        Effect::new(move |_| {
            load_items();
        });
    }

    // 快捷上下架：整单体提交当前字段 + 翻转后的可用位
    let toggle_availability = {
        let api = api.clone();
        let load_items = load_items.clone();
        move |item: MenuItem| {
            let api = api.clone();
            let load_items = load_items.clone();
            let req = MenuItemRequest {
                name: item.name.clone(),
                price: item.price,
                category: item.category.clone(),
                available: !item.availability(),
                tags: item.tags.clone(),
                display_order: item.display_order,
            };
            spawn_local(async move {
                match api.update_menu_item(item.id, &req).await {
                    Ok(_) => load_items(),
                    Err(e) => notification.set(Some((format!("更新菜品失败: {e}"), true))),
                }
            });
        }
    };

    let on_confirm_delete = {
        let api = api.clone();
        let load_items = load_items.clone();
        move |_| {
            if let Some((id, _)) = pending_delete.get_untracked() {
                let api = api.clone();
                let load_items = load_items.clone();
                spawn_local(async move {
                    match api.delete_menu_item(id).await {
                        Ok(()) => {
                            notification.set(Some(("菜品已删除".to_string(), false)));
                            load_items();
                        }
                        Err(e) => notification.set(Some((format!("删除菜品失败: {e}"), true))),
                    }
                });
            }
        }
    };

    let total = move || items.with(|i| i.len());

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-8">
                <Toast notification=notification />
                <PortalNav active=AppRoute::Menu />

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0">
                        <div class="flex items-center justify-between p-6 pb-2">
                            <div>
                                <h3 class="card-title">"菜单"</h3>
                                <p class="text-base-content/70 text-sm">"维护菜品、分类与上下架状态。"</p>
                            </div>
                            <div class="flex items-center gap-2">
                                <MenuItemDialog
                                    state=form
                                    open=dialog_open
                                    categories=categories
                                    notification=notification
                                    on_saved={
                                        let load_items = load_items.clone();
                                        move |_: ()| load_items()
                                    }
                                />
                                <button
                                    on:click={
                                        let load_items = load_items.clone();
                                        move |_| load_items()
                                    }
                                    disabled=move || loading.get()
                                    class="btn btn-ghost btn-circle"
                                >
                                    <RefreshCw attr:class=move || if loading.get() { "h-5 w-5 animate-spin" } else { "h-5 w-5" } />
                                </button>
                            </div>
                        </div>

                        <div class="overflow-x-auto w-full">
                            <table class="table table-zebra w-full">
                                <thead>
                                    <tr>
                                        <th>"菜品"</th>
                                        <th>"分类"</th>
                                        <th>"价格"</th>
                                        <th class="hidden md:table-cell">"标签"</th>
                                        <th>"上架"</th>
                                        <th></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <Show when=move || total() == 0 && !loading.get()>
                                        <tr>
                                            <td colspan="6" class="text-center py-8 text-base-content/50">
                                                "菜单为空。添加第一道菜品以开始。"
                                            </td>
                                        </tr>
                                    </Show>
                                    <Show when=move || loading.get() && total() == 0>
                                        <tr>
                                            <td colspan="6" class="text-center py-8 text-base-content/50">
                                                <span class="loading loading-spinner loading-md"></span> " 加载中..."
                                            </td>
                                        </tr>
                                    </Show>
                                    <For
                                        each=move || items.get()
                                        key=|i| i.id
                                        children={
                                            let toggle_availability = toggle_availability.clone();
                                            move |item| {
                                                let id = item.id;
                                                let name = item.name.clone();
                                                let available = item.availability();
                                                let tags = item.tag_list();
                                                let edit_item = item.clone();
                                                let toggle_item = item.clone();
                                                let toggle_availability = toggle_availability.clone();
                                                view! {
                                                    <tr>
                                                        <td>
                                                            <div class="flex items-center gap-3">
                                                                {item.image_url.clone().map(|url| view! {
                                                                    <img src=url alt=item.name.clone() class="w-10 h-10 rounded object-cover" />
                                                                })}
                                                                <span class="font-bold">{item.name.clone()}</span>
                                                            </div>
                                                        </td>
                                                        <td>{item.category.clone().unwrap_or_default()}</td>
                                                        <td class="font-mono">{format!("¥{:.2}", item.price)}</td>
                                                        <td class="hidden md:table-cell">
                                                            <div class="flex flex-wrap gap-1">
                                                                {tags.iter().map(|t| view! {
                                                                    <span class="badge badge-outline badge-sm">{t.clone()}</span>
                                                                }).collect_view()}
                                                            </div>
                                                        </td>
                                                        <td>
                                                            <input type="checkbox" class="toggle toggle-success toggle-sm"
                                                                prop:checked=available
                                                                on:change=move |_| toggle_availability(toggle_item.clone())
                                                            />
                                                        </td>
                                                        <td>
                                                            <div class="dropdown dropdown-end">
                                                                <div tabindex="0" role="button" class="btn btn-ghost btn-sm btn-square">
                                                                    <MoreHorizontal attr:class="h-4 w-4" />
                                                                </div>
                                                                <ul tabindex="0" class="dropdown-content z-[1] menu p-2 shadow bg-base-200 rounded-box w-40">
                                                                    <li>
                                                                        <a on:click=move |_| {
                                                                            form.load(&edit_item);
                                                                            dialog_open.set(true);
                                                                        }>"编辑"</a>
                                                                    </li>
                                                                    <li>
                                                                        <a
                                                                            class="text-error hover:bg-error/10"
                                                                            on:click=move |_| {
                                                                                set_pending_delete.set(Some((id, name.clone())));
                                                                                delete_open.set(true);
                                                                            }
                                                                        >
                                                                            <Trash2 attr:class="mr-2 h-4 w-4" />
                                                                            "删除"
                                                                        </a>
                                                                    </li>
                                                                </ul>
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
                    </div>
                </div>
            </div>

            <ConfirmDialog
                open=delete_open
                title="删除菜品".to_string()
                message=Signal::derive(move || {
                    format!(
                        "确定删除菜品「{}」吗？该操作不可撤销。",
                        pending_delete.get().map(|(_, n)| n).unwrap_or_default()
                    )
                })
                on_confirm=on_confirm_delete
            />
        </div>
    }
}
