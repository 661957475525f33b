use crate::api::use_api;
use crate::auth::use_auth;
use crate::components::banner::{Notification, Toast};
use crate::components::icons::{CalendarCheck, QrCode, Store, Utensils};
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;
use locaffy_shared::WEEKDAYS;
use locaffy_shared::protocol::ApplicationRequest;

/// 营销首页：平台介绍 + 商家入驻申请入口
///
/// 未登录也完整可用；入驻申请是公开接口。
#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let auth_state = auth.state;

    let notification = RwSignal::new(Notification::None);

    view! {
        <div class="min-h-screen bg-base-200">
            <Toast notification=notification />

            <div class="navbar bg-base-100 shadow-sm px-4 md:px-8">
                <div class="flex-1 gap-2">
                    <Store attr:class="h-6 w-6 text-primary" />
                    <a class="btn btn-ghost text-xl">"Locaffy"</a>
                </div>
                <div class="flex-none">
                    {move || if auth_state.get().is_authenticated {
                        view! {
                            <button class="btn btn-primary btn-sm" on:click=move |_| {
                                let target = AppRoute::auth_success_redirect(auth.current_role());
                                router.navigate(target);
                            }>"进入控制台"</button>
                        }.into_any()
                    } else {
                        view! {
                            <button class="btn btn-primary btn-sm" on:click=move |_| router.navigate(AppRoute::Login)>
                                "商家登录"
                            </button>
                        }.into_any()
                    }}
                </div>
            </div>

            <div class="hero py-20">
                <div class="hero-content text-center">
                    <div class="max-w-2xl">
                        <h1 class="text-5xl font-bold">"发现身边的好店"</h1>
                        <p class="py-6 text-base-content/70">
                            "Locaffy 帮助餐厅与咖啡馆管理预订、维护线上菜单，
                            并通过扫码菜单触达到店顾客。"
                        </p>
                        <ApplyDialog notification=notification />
                    </div>
                </div>
            </div>

            <div class="max-w-5xl mx-auto px-4 pb-20 grid grid-cols-1 md:grid-cols-3 gap-6">
                <div class="card bg-base-100 shadow-md">
                    <div class="card-body items-center text-center">
                        <CalendarCheck attr:class="h-10 w-10 text-primary" />
                        <h3 class="card-title">"预订管理"</h3>
                        <p class="text-base-content/70 text-sm">"集中查看、确认与取消到店预订，过期请求自动清理。"</p>
                    </div>
                </div>
                <div class="card bg-base-100 shadow-md">
                    <div class="card-body items-center text-center">
                        <Utensils attr:class="h-10 w-10 text-primary" />
                        <h3 class="card-title">"菜单维护"</h3>
                        <p class="text-base-content/70 text-sm">"按分类整理菜品，随时调整价格、标签与可用状态。"</p>
                    </div>
                </div>
                <div class="card bg-base-100 shadow-md">
                    <div class="card-body items-center text-center">
                        <QrCode attr:class="h-10 w-10 text-primary" />
                        <h3 class="card-title">"扫码菜单"</h3>
                        <p class="text-base-content/70 text-sm">"顾客扫码即看最新菜单，无需安装任何应用。"</p>
                    </div>
                </div>
            </div>
        </div>
    }
}

/// 商家入驻申请对话框
///
/// 提交成功后后台创建 PENDING 申请等待超管审核；
/// 表单字段对应后端的申请实体，凭据用于审核通过后开通账号。
#[component]
fn ApplyDialog(notification: RwSignal<Notification>) -> impl IntoView {
    let api = use_api();

    let (open, set_open) = signal(false);
    let (loading, set_loading) = signal(false);
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    // 表单字段
    let (business_name, set_business_name) = signal(String::new());
    let (owner_name, set_owner_name) = signal(String::new());
    let (tax_number, set_tax_number) = signal(String::new());
    let (phone, set_phone) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (address, set_address) = signal(String::new());
    let (opening_time, set_opening_time) = signal("09:00".to_string());
    let (closing_time, set_closing_time) = signal("22:00".to_string());
    let working_days = RwSignal::new(vec![
        "MONDAY".to_string(),
        "TUESDAY".to_string(),
        "WEDNESDAY".to_string(),
        "THURSDAY".to_string(),
        "FRIDAY".to_string(),
    ]);
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if open.get() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else {
                if dialog.open() {
                    dialog.close();
                }
            }
        }
    });

    let toggle_day = move |day: &'static str| {
        working_days.update(|days| {
            if let Some(pos) = days.iter().position(|d| d == day) {
                days.remove(pos);
            } else {
                days.push(day.to_string());
            }
        });
    };

    let on_submit = {
        let api = api.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            set_loading.set(true);

            let req = ApplicationRequest {
                business_name: business_name.get(),
                owner_name: owner_name.get(),
                tax_number: tax_number.get(),
                phone: phone.get(),
                email: email.get(),
                address: address.get(),
                latitude: None,
                longitude: None,
                opening_time: opening_time.get(),
                closing_time: closing_time.get(),
                working_days: working_days.get(),
                username: username.get(),
                password: password.get(),
            };

            let api = api.clone();
            spawn_local(async move {
                match api.submit_application(&req).await {
                    Ok(()) => {
                        notification.set(Some(("申请已提交，审核通过后我们会邮件通知您".to_string(), false)));
                        set_open.set(false);
                    }
                    Err(e) => {
                        notification.set(Some((format!("提交申请失败: {e}"), true)));
                    }
                }
                set_loading.set(false);
            });
        }
    };

    view! {
        <button class="btn btn-primary btn-lg" on:click=move |_| set_open.set(true)>
            "申请入驻"
        </button>

        <dialog class="modal" node_ref=dialog_ref on:close=move |_| set_open.set(false)>
            <div class="modal-box max-w-2xl">
                <h3 class="font-bold text-lg">"商家入驻申请"</h3>
                <p class="py-4 text-base-content/70">"填写您的店铺信息，审核通过后即可开始使用。"</p>

                <form on:submit=on_submit class="space-y-4">
                    <div class="grid grid-cols-2 gap-4">
                        <div class="form-control">
                            <label for="business_name" class="label">
                                <span class="label-text">"店铺名称"</span>
                            </label>
                            <input id="business_name" required
                                type="text"
                                placeholder="蓝山咖啡"
                                on:input=move |ev| set_business_name.set(event_target_value(&ev))
                                prop:value=business_name
                                class="input input-bordered w-full"
                            />
                        </div>
                        <div class="form-control">
                            <label for="owner_name" class="label">
                                <span class="label-text">"负责人姓名"</span>
                            </label>
                            <input id="owner_name" required
                                type="text"
                                on:input=move |ev| set_owner_name.set(event_target_value(&ev))
                                prop:value=owner_name
                                class="input input-bordered w-full"
                            />
                        </div>
                    </div>

                    <div class="grid grid-cols-2 gap-4">
                        <div class="form-control">
                            <label for="tax_number" class="label">
                                <span class="label-text">"税号"</span>
                            </label>
                            <input id="tax_number" required
                                type="text"
                                on:input=move |ev| set_tax_number.set(event_target_value(&ev))
                                prop:value=tax_number
                                class="input input-bordered w-full"
                            />
                        </div>
                        <div class="form-control">
                            <label for="apply_phone" class="label">
                                <span class="label-text">"联系电话"</span>
                            </label>
                            <input id="apply_phone" required
                                type="tel"
                                on:input=move |ev| set_phone.set(event_target_value(&ev))
                                prop:value=phone
                                class="input input-bordered w-full"
                            />
                        </div>
                    </div>

                    <div class="grid grid-cols-2 gap-4">
                        <div class="form-control">
                            <label for="apply_email" class="label">
                                <span class="label-text">"邮箱"</span>
                            </label>
                            <input id="apply_email" required
                                type="email"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered w-full"
                            />
                        </div>
                        <div class="form-control">
                            <label for="apply_address" class="label">
                                <span class="label-text">"店铺地址"</span>
                            </label>
                            <input id="apply_address" required
                                type="text"
                                on:input=move |ev| set_address.set(event_target_value(&ev))
                                prop:value=address
                                class="input input-bordered w-full"
                            />
                        </div>
                    </div>

                    <div class="grid grid-cols-2 gap-4">
                        <div class="form-control">
                            <label for="apply_open" class="label">
                                <span class="label-text">"开门时间"</span>
                            </label>
                            <input id="apply_open" required
                                type="time"
                                on:input=move |ev| set_opening_time.set(event_target_value(&ev))
                                prop:value=opening_time
                                class="input input-bordered w-full"
                            />
                        </div>
                        <div class="form-control">
                            <label for="apply_close" class="label">
                                <span class="label-text">"关门时间"</span>
                            </label>
                            <input id="apply_close" required
                                type="time"
                                on:input=move |ev| set_closing_time.set(event_target_value(&ev))
                                prop:value=closing_time
                                class="input input-bordered w-full"
                            />
                        </div>
                    </div>

                    <div class="form-control">
                        <label class="label">
                            <span class="label-text">"营业日"</span>
                        </label>
                        <div class="flex flex-wrap gap-2">
                            {WEEKDAYS.iter().map(|day| {
                                let day: &'static str = *day;
                                view! {
                                    <button type="button"
                                        class=move || if working_days.get().iter().any(|d| d == day) {
                                            "btn btn-sm btn-primary"
                                        } else {
                                            "btn btn-sm btn-outline"
                                        }
                                        on:click=move |_| toggle_day(day)
                                    >
                                        {weekday_label(day)}
                                    </button>
                                }
                            }).collect_view()}
                        </div>
                    </div>

                    <div class="divider text-sm text-base-content/50">"管理账号凭据"</div>

                    <div class="grid grid-cols-2 gap-4">
                        <div class="form-control">
                            <label for="apply_username" class="label">
                                <span class="label-text">"用户名"</span>
                            </label>
                            <input id="apply_username" required
                                type="text"
                                on:input=move |ev| set_username.set(event_target_value(&ev))
                                prop:value=username
                                class="input input-bordered w-full"
                            />
                        </div>
                        <div class="form-control">
                            <label for="apply_password" class="label">
                                <span class="label-text">"密码"</span>
                            </label>
                            <input id="apply_password" required
                                type="password"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered w-full"
                            />
                        </div>
                    </div>

                    <div class="modal-action">
                        <button type="button" class="btn btn-ghost" on:click=move |_| set_open.set(false)>"取消"</button>
                        <button type="submit" disabled=move || loading.get() class="btn btn-primary">
                            {move || if loading.get() {
                                view! { <span class="loading loading-spinner"></span> "提交中..." }.into_any()
                            } else {
                                "提交申请".into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}

/// 营业日的界面显示名
pub fn weekday_label(day: &str) -> &'static str {
    match day {
        "MONDAY" => "周一",
        "TUESDAY" => "周二",
        "WEDNESDAY" => "周三",
        "THURSDAY" => "周四",
        "FRIDAY" => "周五",
        "SATURDAY" => "周六",
        _ => "周日",
    }
}
