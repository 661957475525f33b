use crate::api::use_api;
use crate::components::banner::{Notification, Toast};
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::icons::{CalendarCheck, QrCode, RefreshCw, Users};
use crate::components::nav::PortalNav;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;
use locaffy_shared::date::Timestamp;
use locaffy_shared::{
    Place, RECENT_RESERVATION_COUNT, Reservation, ReservationStatus, recent_reservations,
};

/// 浏览器时钟的当前毫秒时间戳
fn now_ts() -> Timestamp {
    Timestamp::new(js_sys::Date::now() as i64)
}

/// 浏览器本地时区相对 UTC 的分钟偏移（东为正）
fn tz_offset_min() -> i32 {
    -(js_sys::Date::new_0().get_timezone_offset() as i32)
}

/// 预订状态的徽章样式
fn status_badge(status: ReservationStatus) -> &'static str {
    match status {
        ReservationStatus::Pending => "badge badge-warning badge-outline",
        ReservationStatus::Approved => "badge badge-success badge-outline",
        ReservationStatus::Rejected | ReservationStatus::Cancelled => {
            "badge badge-error badge-outline"
        }
        ReservationStatus::Completed => "badge badge-info badge-outline",
        ReservationStatus::NoShow => "badge badge-ghost",
    }
}

/// 商家控制台：门店预订总览
///
/// 每次加载都会执行过期清理批次（对过期待确认预订逐条发出
/// 取消，然后整体重读），表格里因此绝不出现过期的待确认行。
#[component]
pub fn DashboardPage() -> impl IntoView {
    let api = use_api();
    let router = use_router();

    let (places, set_places) = signal(Vec::<Place>::new());
    let (selected_place, set_selected_place) = signal(Option::<i64>::None);
    let (reservations, set_reservations) = signal(Vec::<Reservation>::new());
    let (loading, set_loading) = signal(true);
    let notification = RwSignal::new(Notification::None);

    // 确认 / 取消对话框
    let approve_open = RwSignal::new(false);
    let (pending_approve, set_pending_approve) = signal(Option::<i64>::None);
    let cancel_open = RwSignal::new(false);
    let (pending_cancel, set_pending_cancel) = signal(Option::<i64>::None);
    // 拒绝原因对话框
    let reject_open = RwSignal::new(false);
    let (pending_reject, set_pending_reject) = signal(Option::<i64>::None);
    let (reject_reason, set_reject_reason) = signal(String::new());

    let load_reservations = {
        let api = api.clone();
        move |place_id: i64| {
            let api = api.clone();
            set_loading.set(true);
            spawn_local(async move {
                // now 在批次开始前取一次，整批共用同一截止点
                match api.load_reconciled(place_id, now_ts()).await {
                    Ok(list) => set_reservations.set(list),
                    Err(e) => notification.set(Some((format!("加载预订失败: {e}"), true))),
                }
                set_loading.set(false);
            });
        }
    };

    // 初始加载：先取名下门店，再取默认门店的预订
    {
        let api = api.clone();
        let load_reservations = load_reservations.clone();
        Effect::new(move |_| {
            let api = api.clone();
            let load_reservations = load_reservations.clone();
            spawn_local(async move {
                match api.my_places().await {
                    Ok(list) => {
                        let first = list.first().map(|p| p.id);
                        set_places.set(list);
                        set_selected_place.set(first);
                        match first {
                            Some(id) => load_reservations(id),
                            None => set_loading.set(false),
                        }
                    }
                    Err(e) => {
                        notification.set(Some((format!("加载门店失败: {e}"), true)));
                        set_loading.set(false);
                    }
                }
            });
        });
    }

    let reload = {
        let load_reservations = load_reservations.clone();
        move || {
            if let Some(id) = selected_place.get_untracked() {
                load_reservations(id);
            }
        }
    };

    // 状态转移：成功与 409 冲突都以重读后的权威列表为准
    let transition = {
        let api = api.clone();
        let reload = reload.clone();
        move |id: i64, status: ReservationStatus, reason: Option<String>, ok_msg: &'static str| {
            let api = api.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match api.update_reservation_status(id, status, reason).await {
                    Ok(()) => {
                        notification.set(Some((ok_msg.to_string(), false)));
                        reload();
                    }
                    Err(e) if e.should_refresh() => {
                        notification.set(Some((format!("该预订状态已变化: {e}"), true)));
                        reload();
                    }
                    Err(e) => notification.set(Some((format!("操作失败: {e}"), true))),
                }
            });
        }
    };

    let on_confirm_approve = {
        let transition = transition.clone();
        move |_| {
            if let Some(id) = pending_approve.get_untracked() {
                transition(id, ReservationStatus::Approved, None, "预订已确认");
            }
        }
    };

    let on_confirm_cancel = {
        let transition = transition.clone();
        move |_| {
            if let Some(id) = pending_cancel.get_untracked() {
                transition(id, ReservationStatus::Cancelled, None, "预订已取消");
            }
        }
    };

    let on_submit_reject = {
        let transition = transition.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            if let Some(id) = pending_reject.get_untracked() {
                let reason = reject_reason.get_untracked();
                let reason = if reason.trim().is_empty() {
                    None
                } else {
                    Some(reason)
                };
                transition(id, ReservationStatus::Rejected, reason, "预订已拒绝");
            }
            reject_open.set(false);
            set_reject_reason.set(String::new());
        }
    };

    // 统计派生值
    let total = move || reservations.with(|r| r.len());
    let pending_count = move || {
        reservations.with(|r| {
            r.iter()
                .filter(|x| x.status == ReservationStatus::Pending)
                .count()
        })
    };
    let approved_count = move || {
        reservations.with(|r| {
            r.iter()
                .filter(|x| x.status == ReservationStatus::Approved)
                .count()
        })
    };
    let recent = move || {
        reservations.with(|r| recent_reservations(r, RECENT_RESERVATION_COUNT))
    };

    // 显示用的时区偏移整页取一次即可
    let tz_offset = tz_offset_min();

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-8">
                <Toast notification=notification />
                <PortalNav active=AppRoute::Dashboard />

                <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                    <div class="stat">
                        <div class="stat-figure text-primary">
                            <CalendarCheck attr:class="inline-block w-8 h-8" />
                        </div>
                        <div class="stat-title">"预订总数"</div>
                        <div class="stat-value text-primary">{total}</div>
                    </div>
                    <div class="stat">
                        <div class="stat-figure text-warning">
                            <Users attr:class="inline-block w-8 h-8" />
                        </div>
                        <div class="stat-title">"待确认"</div>
                        <div class="stat-value text-warning">{pending_count}</div>
                    </div>
                    <div class="stat">
                        <div class="stat-title">"已确认"</div>
                        <div class="stat-value text-success">{approved_count}</div>
                        <div class="stat-desc">"过期的待确认预订已自动清理"</div>
                    </div>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0">
                        <div class="flex items-center justify-between p-6 pb-2">
                            <div>
                                <h3 class="card-title">"门店预订"</h3>
                                <p class="text-base-content/70 text-sm">"确认、拒绝或取消到店预订。"</p>
                            </div>
                            <div class="flex items-center gap-2">
                                <Show when=move || places.with(|p| p.len() > 1)>
                                    <select
                                        class="select select-bordered select-sm"
                                        on:change={
                                            let load_reservations = load_reservations.clone();
                                            move |ev| {
                                                if let Ok(id) = event_target_value(&ev).parse::<i64>() {
                                                    set_selected_place.set(Some(id));
                                                    load_reservations(id);
                                                }
                                            }
                                        }
                                    >
                                        <For
                                            each=move || places.get()
                                            key=|p| p.id
                                            children=move |place| {
                                                let id = place.id;
                                                view! {
                                                    <option value=id.to_string() selected=move || selected_place.get() == Some(id)>
                                                        {place.name.clone()}
                                                    </option>
                                                }
                                            }
                                        />
                                    </select>
                                </Show>
                                <Show when=move || selected_place.get().is_some()>
                                    <button
                                        class="btn btn-ghost btn-sm gap-1"
                                        on:click=move |_| {
                                            if let Some(id) = selected_place.get_untracked() {
                                                router.navigate(AppRoute::QrMenu(id));
                                            }
                                        }
                                    >
                                        <QrCode attr:class="h-4 w-4" /> "扫码菜单"
                                    </button>
                                </Show>
                                <button
                                    on:click={
                                        let reload = reload.clone();
                                        move |_| reload()
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
                                        <th>"客人"</th>
                                        <th>"到店时间"</th>
                                        <th>"人数"</th>
                                        <th class="hidden md:table-cell">"备注"</th>
                                        <th>"状态"</th>
                                        <th></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <Show when=move || total() == 0 && !loading.get()>
                                        <tr>
                                            <td colspan="6" class="text-center py-8 text-base-content/50">
                                                "暂无预订。"
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
                                        each=move || reservations.get()
                                        key=|r| (r.id, r.status)
                                        children={
                                            move |r| {
                                                let id = r.id;
                                                let status = r.status;
                                                view! {
                                                    <tr>
                                                        <td class="font-bold">{r.user_name.clone()}</td>
                                                        <td class="font-mono text-sm">{r.reservation_time.display(tz_offset)}</td>
                                                        <td>{r.number_of_people}</td>
                                                        <td class="hidden md:table-cell text-sm opacity-70">
                                                            {r.note.clone().unwrap_or_default()}
                                                        </td>
                                                        <td>
                                                            <span class=status_badge(status)>{status.label()}</span>
                                                        </td>
                                                        <td>
                                                            <div class="flex gap-1 justify-end">
                                                                <Show when=move || status.can_decide()>
                                                                    <button
                                                                        class="btn btn-success btn-xs"
                                                                        on:click=move |_| {
                                                                            set_pending_approve.set(Some(id));
                                                                            approve_open.set(true);
                                                                        }
                                                                    >"确认"</button>
                                                                    <button
                                                                        class="btn btn-error btn-outline btn-xs"
                                                                        on:click=move |_| {
                                                                            set_pending_reject.set(Some(id));
                                                                            reject_open.set(true);
                                                                        }
                                                                    >"拒绝"</button>
                                                                </Show>
                                                                <Show when=move || status.can_cancel()>
                                                                    <button
                                                                        class="btn btn-ghost btn-xs"
                                                                        on:click=move |_| {
                                                                            set_pending_cancel.set(Some(id));
                                                                            cancel_open.set(true);
                                                                        }
                                                                    >"取消"</button>
                                                                </Show>
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

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <h3 class="card-title">"最近预订"</h3>
                        <ul class="space-y-2">
                            <For
                                each=recent
                                key=|r| r.id
                                children=move |r| view! {
                                    <li class="flex items-center justify-between text-sm">
                                        <span class="font-bold">{r.user_name.clone()}</span>
                                        <span class="font-mono opacity-70">{r.sort_instant().display(tz_offset)}</span>
                                        <span class=status_badge(r.status)>{r.status.label()}</span>
                                    </li>
                                }
                            />
                        </ul>
                    </div>
                </div>
            </div>

            <ConfirmDialog
                open=approve_open
                title="确认预订".to_string()
                message=Signal::derive(move || {
                    format!(
                        "确定接受预订 #{} 吗？客人会收到确认通知。",
                        pending_approve.get().unwrap_or_default()
                    )
                })
                on_confirm=on_confirm_approve
            />

            <ConfirmDialog
                open=cancel_open
                title="取消预订".to_string()
                message=Signal::derive(move || {
                    format!(
                        "确定取消预订 #{} 吗？该操作不可撤销。",
                        pending_cancel.get().unwrap_or_default()
                    )
                })
                on_confirm=on_confirm_cancel
            />

            <dialog class="modal" class:modal-open=move || reject_open.get()>
                <div class="modal-box">
                    <h3 class="font-bold text-lg">"拒绝预订"</h3>
                    <form on:submit=on_submit_reject class="space-y-4 mt-4">
                        <div class="form-control">
                            <label class="label" for="reject_reason">
                                <span class="label-text">"拒绝原因（可选）"</span>
                            </label>
                            <textarea
                                id="reject_reason"
                                class="textarea textarea-bordered"
                                placeholder="例如：该时段已满座"
                                on:input=move |ev| set_reject_reason.set(event_target_value(&ev))
                                prop:value=reject_reason
                            ></textarea>
                        </div>
                        <div class="modal-action">
                            <button type="button" class="btn btn-ghost" on:click=move |_| reject_open.set(false)>"取消"</button>
                            <button type="submit" class="btn btn-error">"拒绝预订"</button>
                        </div>
                    </form>
                </div>
            </dialog>
        </div>
    }
}
