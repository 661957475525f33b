use crate::api::use_api;
use crate::components::icons::Utensils;
use leptos::prelude::*;
use leptos::task::spawn_local;
use locaffy_shared::{MenuItem, group_by_category, sort_menu_items};

/// 扫码菜单页（公开，免登录）
///
/// 顾客扫码直达 `/qr/{placeId}`。菜品按分类分组、按
/// displayOrder 升序展示；不可用菜品置灰但保留在列表里。
#[component]
pub fn QrMenuPage(
    /// 路径中的门店 id
    place_id: i64,
) -> impl IntoView {
    let api = use_api();

    let (groups, set_groups) = signal(Vec::<(String, Vec<MenuItem>)>::new());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    Effect::new(move |_| {
        let api = api.clone();
        spawn_local(async move {
            match api.public_menu(place_id).await {
                Ok(mut items) => {
                    sort_menu_items(&mut items);
                    set_groups.set(group_by_category(&items));
                }
                Err(e) => set_error_msg.set(Some(format!("菜单加载失败: {e}"))),
            }
            set_loading.set(false);
        });
    });

    view! {
        <div class="min-h-screen bg-base-200 pb-16">
            <div class="bg-base-100 shadow-sm py-6 mb-6">
                <div class="max-w-xl mx-auto px-4 flex items-center gap-3">
                    <div class="p-2 bg-primary/10 rounded-xl text-primary">
                        <Utensils attr:class="h-6 w-6" />
                    </div>
                    <div>
                        <h1 class="text-2xl font-bold">"菜单"</h1>
                        <p class="text-sm text-base-content/60">"由 Locaffy 提供"</p>
                    </div>
                </div>
            </div>

            <div class="max-w-xl mx-auto px-4 space-y-8">
                <Show when=move || loading.get()>
                    <div class="text-center py-16">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                    </div>
                </Show>

                <Show when=move || error_msg.get().is_some()>
                    <div role="alert" class="alert alert-error">
                        <span>{move || error_msg.get().unwrap()}</span>
                    </div>
                </Show>

                <Show when=move || !loading.get() && error_msg.get().is_none() && groups.with(|g| g.is_empty())>
                    <div class="text-center py-16 text-base-content/50">
                        "该门店暂未发布菜单。"
                    </div>
                </Show>

                <For
                    each=move || groups.get()
                    key=|(cat, _)| cat.clone()
                    children=move |(category, items)| {
                        view! {
                            <section>
                                <h2 class="text-lg font-bold mb-3 border-b border-base-300 pb-1">
                                    {category}
                                </h2>
                                <ul class="space-y-3">
                                    {items.into_iter().map(|item| {
                                        let unavailable = !item.availability();
                                        let tags = item.tag_list();
                                        view! {
                                            <li class=if unavailable {
                                                "card bg-base-100 shadow-sm opacity-50"
                                            } else {
                                                "card bg-base-100 shadow-sm"
                                            }>
                                                <div class="card-body p-4 flex-row items-center gap-4">
                                                    {item.image_url.clone().map(|url| view! {
                                                        <img src=url alt=item.name.clone() class="w-16 h-16 rounded-lg object-cover" />
                                                    })}
                                                    <div class="flex-1">
                                                        <div class="flex items-center gap-2">
                                                            <span class="font-bold">{item.name.clone()}</span>
                                                            <Show when=move || unavailable>
                                                                <span class="badge badge-ghost badge-sm">"暂时售罄"</span>
                                                            </Show>
                                                        </div>
                                                        <div class="flex flex-wrap gap-1 mt-1">
                                                            {tags.iter().map(|t| view! {
                                                                <span class="badge badge-outline badge-sm">{t.clone()}</span>
                                                            }).collect_view()}
                                                        </div>
                                                    </div>
                                                    <span class="font-mono font-bold text-primary">
                                                        {format!("¥{:.2}", item.price)}
                                                    </span>
                                                </div>
                                            </li>
                                        }
                                    }).collect_view()}
                                </ul>
                            </section>
                        }
                    }
                />
            </div>
        </div>
    }
}
