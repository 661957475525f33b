use crate::api::use_api;
use crate::components::banner::{Notification, Toast};
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::icons::RefreshCw;
use crate::components::nav::PortalNav;
use crate::web::route::AppRoute;
use leptos::prelude::*;
use leptos::task::spawn_local;
use locaffy_shared::date::{DateRange, LocalClock, Timestamp};
use locaffy_shared::protocol::ApplicationStats;
use locaffy_shared::query::{ApplicationFilter, Pagination, SortState, sort_items};
use locaffy_shared::{ApplicationStatus, BusinessApplication};

const PAGE_SIZE: usize = 10;

fn local_clock() -> LocalClock {
    let js_now = js_sys::Date::new_0();
    LocalClock::new(
        Timestamp::new(js_now.get_time() as i64),
        -(js_now.get_timezone_offset() as i32),
    )
}

fn status_badge(status: ApplicationStatus) -> &'static str {
    match status {
        ApplicationStatus::Pending => "badge badge-warning badge-outline",
        ApplicationStatus::Approved => "badge badge-success badge-outline",
        ApplicationStatus::Rejected => "badge badge-error badge-outline",
    }
}

/// 超管入驻审核页
///
/// 搜索 / 状态 / 日期过滤彼此取 AND；排序与分页作用在过滤后
/// 的数组上。通过与拒绝都要确认；对已决申请重复操作会得到
/// 409，此时刷新列表以对齐权威状态。
#[component]
pub fn ApplicationsPage() -> impl IntoView {
    let api = use_api();

    let (apps, set_apps) = signal(Vec::<BusinessApplication>::new());
    let (stats, set_stats) = signal(ApplicationStats::default());
    let (loading, set_loading) = signal(true);
    let notification = RwSignal::new(Notification::None);

    // 视图模型状态
    let (search, set_search) = signal(String::new());
    let (status_filter, set_status_filter) = signal(Option::<ApplicationStatus>::None);
    let (date_filter, set_date_filter) = signal(Option::<DateRange>::None);
    let sort = RwSignal::new(SortState::new("createdAt"));
    let pagination = RwSignal::new(Pagination::new(PAGE_SIZE));

    let load = {
        let api = api.clone();
        move || {
            let api = api.clone();
            set_loading.set(true);
            spawn_local(async move {
                match api.business_applications().await {
                    Ok(list) => set_apps.set(list),
                    Err(e) => notification.set(Some((format!("加载申请失败: {e}"), true))),
                }
                // 统计失败只记日志，列表照常可用
                match api.application_stats().await {
                    Ok(s) => set_stats.set(s),
                    Err(e) => {
                        web_sys::console::warn_1(&format!("[Stats] 申请统计不可用: {e}").into());
                        set_stats.set(ApplicationStats::default());
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

    // 过滤 + 排序后的数组；分页在渲染时对它取窗口
    let visible = Memo::new(move |_| {
        let clock = local_clock();
        let filter = ApplicationFilter {
            search: search.get(),
            status: status_filter.get(),
            date: date_filter.get(),
        };
        let sort = sort.get();

        let mut list: Vec<BusinessApplication> = apps.with(|all| {
            all.iter()
                .filter(|a| filter.matches(a, clock))
                .cloned()
                .collect()
        });

        match sort.field {
            "businessName" => sort_items(&mut list, sort.direction, |a, b| {
                a.business_name.cmp(&b.business_name)
            }),
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

    // 审批确认
    let approve_open = RwSignal::new(false);
    let (pending_approve, set_pending_approve) = signal(Option::<(i64, String)>::None);
    // 拒绝原因对话框
    let reject_open = RwSignal::new(false);
    let (pending_reject, set_pending_reject) = signal(Option::<(i64, String)>::None);
    let (reject_reason, set_reject_reason) = signal(String::new());

    let on_confirm_approve = {
        let api = api.clone();
        let load = load.clone();
        move |_| {
            if let Some((id, _)) = pending_approve.get_untracked() {
                let api = api.clone();
                let load = load.clone();
                spawn_local(async move {
                    match api.approve_application(id).await {
                        Ok(()) => {
                            notification.set(Some(("申请已通过，商家账号已开通".to_string(), false)));
                            load();
                        }
                        Err(e) if e.should_refresh() => {
                            notification.set(Some((format!("该申请已被处理: {e}"), true)));
                            load();
                        }
                        Err(e) => notification.set(Some((format!("审批失败: {e}"), true))),
                    }
                });
            }
        }
    };

    let on_submit_reject = {
        let api = api.clone();
        let load = load.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            let Some((id, _)) = pending_reject.get_untracked() else {
                return;
            };
            let reason = reject_reason.get_untracked();
            if reason.trim().is_empty() {
                return;
            }
            reject_open.set(false);
            set_reject_reason.set(String::new());

            let api = api.clone();
            let load = load.clone();
            spawn_local(async move {
                match api.reject_application(id, reason).await {
                    Ok(()) => {
                        notification.set(Some(("申请已拒绝".to_string(), false)));
                        load();
                    }
                    Err(e) if e.should_refresh() => {
                        notification.set(Some((format!("该申请已被处理: {e}"), true)));
                        load();
                    }
                    Err(e) => notification.set(Some((format!("拒绝失败: {e}"), true))),
                }
            });
        }
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-8">
                <Toast notification=notification />
                <PortalNav active=AppRoute::AdminApplications />

                <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                    <div class="stat">
                        <div class="stat-title">"待审核"</div>
                        <div class="stat-value text-warning">{move || stats.get().pending}</div>
                    </div>
                    <div class="stat">
                        <div class="stat-title">"已通过"</div>
                        <div class="stat-value text-success">{move || stats.get().approved}</div>
                    </div>
                    <div class="stat">
                        <div class="stat-title">"已拒绝"</div>
                        <div class="stat-value text-error">{move || stats.get().rejected}</div>
                    </div>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0">
                        <div class="flex flex-wrap items-center justify-between gap-3 p-6 pb-2">
                            <div>
                                <h3 class="card-title">"入驻申请"</h3>
                                <p class="text-base-content/70 text-sm">"审核商家入驻申请。"</p>
                            </div>
                            <div class="flex flex-wrap items-center gap-2">
                                <input
                                    type="text"
                                    placeholder="搜索店名 / 负责人 / 邮箱"
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
                                        set_status_filter.set(match event_target_value(&ev).as_str() {
                                            "PENDING" => Some(ApplicationStatus::Pending),
                                            "APPROVED" => Some(ApplicationStatus::Approved),
                                            "REJECTED" => Some(ApplicationStatus::Rejected),
                                            _ => None,
                                        });
                                        pagination.update(|p| p.page = 0);
                                    }
                                >
                                    <option value="">"全部状态"</option>
                                    <option value="PENDING">"待审核"</option>
                                    <option value="APPROVED">"已通过"</option>
                                    <option value="REJECTED">"已拒绝"</option>
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
                                        <th class="cursor-pointer select-none" on:click=move |_| toggle_sort("businessName")>
                                            "店铺"
                                        </th>
                                        <th>"负责人"</th>
                                        <th class="hidden md:table-cell">"联系方式"</th>
                                        <th class="cursor-pointer select-none" on:click=move |_| toggle_sort("createdAt")>
                                            "提交时间"
                                        </th>
                                        <th>"状态"</th>
                                        <th></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <Show when=move || visible.with(|v| v.is_empty()) && !loading.get()>
                                        <tr>
                                            <td colspan="6" class="text-center py-8 text-base-content/50">
                                                "没有符合条件的申请。"
                                            </td>
                                        </tr>
                                    </Show>
                                    <For
                                        each=page_items
                                        key=|a| (a.id, a.status)
                                        children=move |app| {
                                            let id = app.id;
                                            let approve_name = app.business_name.clone();
                                            let reject_name = app.business_name.clone();
                                            let status = app.status;
                                            view! {
                                                <tr>
                                                    <td class="font-bold">{app.business_name.clone()}</td>
                                                    <td>{app.owner_name.clone()}</td>
                                                    <td class="hidden md:table-cell text-sm opacity-70">
                                                        {app.email.clone().unwrap_or_default()}
                                                        <br/>
                                                        {app.phone.clone().unwrap_or_default()}
                                                    </td>
                                                    <td class="font-mono text-sm">
                                                        {app.created_at.map(|t| t.display(tz_offset)).unwrap_or_else(|| "-".into())}
                                                    </td>
                                                    <td>
                                                        <span class=status_badge(status)>{status.label()}</span>
                                                    </td>
                                                    <td>
                                                        <Show when=move || status.can_decide()>
                                                            <div class="flex gap-1 justify-end">
                                                                <button
                                                                    class="btn btn-success btn-xs"
                                                                    on:click={
                                                                        let name = approve_name.clone();
                                                                        move |_| {
                                                                            set_pending_approve.set(Some((id, name.clone())));
                                                                            approve_open.set(true);
                                                                        }
                                                                    }
                                                                >"通过"</button>
                                                                <button
                                                                    class="btn btn-error btn-outline btn-xs"
                                                                    on:click={
                                                                        let name = reject_name.clone();
                                                                        move |_| {
                                                                            set_pending_reject.set(Some((id, name.clone())));
                                                                            reject_open.set(true);
                                                                        }
                                                                    }
                                                                >"拒绝"</button>
                                                            </div>
                                                        </Show>
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
                open=approve_open
                title="通过申请".to_string()
                message=Signal::derive(move || {
                    format!(
                        "确定通过「{}」的入驻申请吗？将为其开通商家账号并创建门店。",
                        pending_approve.get().map(|(_, n)| n).unwrap_or_default()
                    )
                })
                on_confirm=on_confirm_approve
            />

            <dialog class="modal" class:modal-open=move || reject_open.get()>
                <div class="modal-box">
                    <h3 class="font-bold text-lg">
                        {move || format!(
                            "拒绝「{}」的申请",
                            pending_reject.get().map(|(_, n)| n).unwrap_or_default()
                        )}
                    </h3>
                    <form on:submit=on_submit_reject class="space-y-4 mt-4">
                        <div class="form-control">
                            <label class="label" for="app_reject_reason">
                                <span class="label-text">"拒绝原因（必填，会通知申请人）"</span>
                            </label>
                            <textarea
                                id="app_reject_reason"
                                required
                                class="textarea textarea-bordered"
                                placeholder="例如：资质材料不完整"
                                on:input=move |ev| set_reject_reason.set(event_target_value(&ev))
                                prop:value=reject_reason
                            ></textarea>
                        </div>
                        <div class="modal-action">
                            <button type="button" class="btn btn-ghost" on:click=move |_| reject_open.set(false)>"取消"</button>
                            <button type="submit" class="btn btn-error">"拒绝申请"</button>
                        </div>
                    </form>
                </div>
            </dialog>
        </div>
    }
}
