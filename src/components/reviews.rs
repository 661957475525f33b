use crate::api::use_api;
use crate::auth::use_auth;
use crate::components::banner::{Notification, Toast};
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::icons::{RefreshCw, Star, Trash2};
use crate::components::nav::PortalNav;
use crate::web::route::AppRoute;
use leptos::prelude::*;
use leptos::task::spawn_local;
use locaffy_shared::Review;
use locaffy_shared::date::{DateRange, LocalClock, Timestamp};
use locaffy_shared::query::{Pagination, ReviewFilter, SortDirection, SortState, sort_items};
use locaffy_shared::role::Role;

const PAGE_SIZE: usize = 10;

fn local_clock() -> LocalClock {
    let js_now = js_sys::Date::new_0();
    LocalClock::new(
        Timestamp::new(js_now.get_time() as i64),
        -(js_now.get_timezone_offset() as i32),
    )
}

/// 评价管理页（商家与超管共用）
///
/// 两种角色看同一张表，差别只在数据范围：商家走自家门店的
/// 接口，超管走平台全量接口。界面上只有删除，没有编辑。
#[component]
pub fn ReviewsPage() -> impl IntoView {
    let api = use_api();
    let auth = use_auth();

    // 挂载时定一次角色，决定走哪个接口
    let role = auth.current_role().unwrap_or(Role::BusinessOwner);

    let (reviews, set_reviews) = signal(Vec::<Review>::new());
    let (loading, set_loading) = signal(true);
    let notification = RwSignal::new(Notification::None);

    let (search, set_search) = signal(String::new());
    let (rating_filter, set_rating_filter) = signal(Option::<u8>::None);
    let (date_filter, set_date_filter) = signal(Option::<DateRange>::None);
    let sort = RwSignal::new(SortState {
        field: "createdAt",
        direction: SortDirection::Descending,
    });
    let pagination = RwSignal::new(Pagination::new(PAGE_SIZE));

    let load = {
        let api = api.clone();
        move || {
            let api = api.clone();
            set_loading.set(true);
            spawn_local(async move {
                match api.reviews(role).await {
                    Ok(list) => set_reviews.set(list),
                    Err(e) => notification.set(Some((format!("加载评价失败: {e}"), true))),
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
        let clock = local_clock();
        let filter = ReviewFilter {
            search: search.get(),
            rating: rating_filter.get(),
            date: date_filter.get(),
        };
        let sort = sort.get();

        let mut list: Vec<Review> = reviews.with(|all| {
            all.iter()
                .filter(|r| filter.matches(r, clock))
                .cloned()
                .collect()
        });

        match sort.field {
            "rating" => sort_items(&mut list, sort.direction, |a, b| a.rating.cmp(&b.rating)),
            _ => sort_items(&mut list, sort.direction, |a, b| {
                a.created_at.cmp(&b.created_at)
            }),
        }
        list
    });

    let page_items = move || {
        let p = pagination.get();
        visible.with(|v| p.slice(v).to_vec())
    };
    let total_pages = move || pagination.get().total_pages(visible.with(|v| v.len()));
    let current_page = move || pagination.get().clamped_page(visible.with(|v| v.len()));

    let toggle_sort = move |field: &'static str| {
        sort.update(|s| s.toggle(field));
    };

    // 显示用的时区偏移整页取一次即可
    let tz_offset = local_clock().offset_minutes;

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
                    match api.delete_review(role, id).await {
                        Ok(()) => {
                            notification.set(Some(("评价已删除".to_string(), false)));
                            load();
                        }
                        Err(e) => notification.set(Some((format!("删除评价失败: {e}"), true))),
                    }
                });
            }
        }
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-8">
                <Toast notification=notification />
                <PortalNav active=AppRoute::Reviews />

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0">
                        <div class="flex flex-wrap items-center justify-between gap-3 p-6 pb-2">
                            <div>
                                <h3 class="card-title">"评价"</h3>
                                <p class="text-base-content/70 text-sm">
                                    {if role == Role::Admin { "平台全部评价。" } else { "您门店收到的评价。" }}
                                </p>
                            </div>
                            <div class="flex flex-wrap items-center gap-2">
                                <input
                                    type="text"
                                    placeholder="搜索用户 / 内容"
                                    class="input input-bordered input-sm w-48"
                                    on:input=move |ev| {
                                        set_search.set(event_target_value(&ev));
                                        pagination.update(|p| p.page = 0);
                                    }
                                    prop:value=search
                                />
                                <select
                                    class="select select-bordered select-sm"
                                    on:change=move |ev| {
                                        set_rating_filter.set(event_target_value(&ev).parse::<u8>().ok());
                                        pagination.update(|p| p.page = 0);
                                    }
                                >
                                    <option value="">"全部评分"</option>
                                    <option value="5">"5 星"</option>
                                    <option value="4">"4 星"</option>
                                    <option value="3">"3 星"</option>
                                    <option value="2">"2 星"</option>
                                    <option value="1">"1 星"</option>
                                </select>
                                <select
                                    class="select select-bordered select-sm"
                                    on:change=move |ev| {
                                        set_date_filter.set(match event_target_value(&ev).as_str() {
                                            "today" => Some(DateRange::Today),
                                            "7d" => Some(DateRange::Last7Days),
                                            "30d" => Some(DateRange::Last30Days),
                                            _ => None,
                                        });
                                        pagination.update(|p| p.page = 0);
                                    }
                                >
                                    <option value="">"全部时间"</option>
                                    <option value="today">"今天"</option>
                                    <option value="7d">"近 7 天"</option>
                                    <option value="30d">"近 30 天"</option>
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
                                        <th>"用户"</th>
                                        <th class="cursor-pointer select-none" on:click=move |_| toggle_sort("rating")>
                                            "评分"
                                        </th>
                                        <th>"内容"</th>
                                        <th class="cursor-pointer select-none" on:click=move |_| toggle_sort("createdAt")>
                                            "时间"
                                        </th>
                                        <th></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <Show when=move || visible.with(|v| v.is_empty()) && !loading.get()>
                                        <tr>
                                            <td colspan="5" class="text-center py-8 text-base-content/50">
                                                "没有符合条件的评价。"
                                            </td>
                                        </tr>
                                    </Show>
                                    <For
                                        each=page_items
                                        key=|r| r.id
                                        children=move |review| {
                                            let id = review.id;
                                            let name = review.username.clone();
                                            let rating = review.rating;
                                            view! {
                                                <tr>
                                                    <td class="font-bold">{review.username.clone()}</td>
                                                    <td>
                                                        <div class="flex items-center gap-0.5 text-warning">
                                                            {(0..rating.min(5)).map(|_| view! {
                                                                <Star attr:class="h-4 w-4 fill-current" />
                                                            }).collect_view()}
                                                        </div>
                                                    </td>
                                                    <td class="text-sm opacity-80 max-w-md truncate">
                                                        {review.comment.clone().unwrap_or_default()}
                                                    </td>
                                                    <td class="font-mono text-sm">
                                                        {review.created_at.map(|t| t.display(tz_offset)).unwrap_or_else(|| "-".into())}
                                                    </td>
                                                    <td class="text-right">
                                                        <button
                                                            class="btn btn-ghost btn-xs text-error"
                                                            on:click=move |_| {
                                                                set_pending_delete.set(Some((id, name.clone())));
                                                                delete_open.set(true);
                                                            }
                                                        >
                                                            <Trash2 attr:class="h-4 w-4" />
                                                        </button>
                                                    </td>
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

            <ConfirmDialog
                open=delete_open
                title="删除评价".to_string()
                message=Signal::derive(move || {
                    format!(
                        "确定删除 {} 的评价吗？该操作不可撤销。",
                        pending_delete.get().map(|(_, n)| n).unwrap_or_default()
                    )
                })
                on_confirm=on_confirm_delete
            />
        </div>
    }
}
