use crate::api::use_api;
use crate::components::banner::{Notification, Toast};
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::home::weekday_label;
use crate::components::nav::PortalNav;
use crate::web::route::AppRoute;
use leptos::prelude::*;
use leptos::task::spawn_local;
use locaffy_shared::protocol::PlaceSettingsUpdate;
use locaffy_shared::{Place, WEEKDAYS};
use wasm_bindgen::JsCast;

/// 门店设置页：基本信息、营业时间、营业日与门店 logo
///
/// 保存后以接口返回的权威门店状态回填表单。
#[component]
pub fn PlaceSettingsPage() -> impl IntoView {
    let api = use_api();

    let (place, set_place) = signal(Option::<Place>::None);
    let (loading, set_loading) = signal(true);
    let (saving, set_saving) = signal(false);
    let notification = RwSignal::new(Notification::None);

    // 表单字段
    let (name, set_name) = signal(String::new());
    let (address, set_address) = signal(String::new());
    let (phone, set_phone) = signal(String::new());
    let (opening_time, set_opening_time) = signal(String::new());
    let (closing_time, set_closing_time) = signal(String::new());
    let working_days = RwSignal::new(Vec::<String>::new());

    let logo_delete_open = RwSignal::new(false);

    let apply_place = move |p: &Place| {
        set_name.set(p.name.clone());
        set_address.set(p.address.clone().unwrap_or_default());
        set_phone.set(p.phone.clone().unwrap_or_default());
        set_opening_time.set(p.opening_time.clone().unwrap_or_default());
        set_closing_time.set(p.closing_time.clone().unwrap_or_default());
        working_days.set(p.working_days.clone());
        set_place.set(Some(p.clone()));
    };

    // 初始加载：设置页作用于名下第一家门店
    {
        let api = api.clone();
        Effect::new(move |_| {
            let api = api.clone();
            spawn_local(async move {
                match api.my_places().await {
                    Ok(list) => {
                        if let Some(p) = list.first() {
                            apply_place(p);
                        }
                    }
                    Err(e) => notification.set(Some((format!("加载门店失败: {e}"), true))),
                }
                set_loading.set(false);
            });
        });
    }

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
            set_saving.set(true);

            let update = PlaceSettingsUpdate {
                name: Some(name.get()),
                address: Some(address.get()),
                phone: Some(phone.get()),
                opening_time: opening_time.get(),
                closing_time: closing_time.get(),
                working_days: working_days.get(),
            };

            let api = api.clone();
            spawn_local(async move {
                match api.update_place_settings(&update).await {
                    Ok(updated) => {
                        // 以权威返回值回填
                        apply_place(&updated);
                        notification.set(Some(("门店设置已保存".to_string(), false)));
                    }
                    Err(e) => notification.set(Some((format!("保存设置失败: {e}"), true))),
                }
                set_saving.set(false);
            });
        }
    };

    let on_logo_change = {
        let api = api.clone();
        move |ev: leptos::web_sys::Event| {
            let Some(input) = ev
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            else {
                return;
            };
            let Some(file) = input.files().and_then(|list| list.get(0)) else {
                return;
            };
            let Some(place_id) = place.get_untracked().map(|p| p.id) else {
                return;
            };

            let api = api.clone();
            spawn_local(async move {
                match api.upload_place_logo(place_id, &file).await {
                    Ok(()) => {
                        notification.set(Some(("logo 已更新".to_string(), false)));
                        // 重读拿新的图片地址
                        if let Ok(list) = api.my_places().await {
                            if let Some(p) = list.iter().find(|p| p.id == place_id) {
                                apply_place(p);
                            }
                        }
                    }
                    Err(e) => notification.set(Some((format!("上传 logo 失败: {e}"), true))),
                }
            });
        }
    };

    let on_confirm_logo_delete = {
        let api = api.clone();
        move |_| {
            let Some(place_id) = place.get_untracked().map(|p| p.id) else {
                return;
            };
            let api = api.clone();
            spawn_local(async move {
                match api.delete_place_logo(place_id).await {
                    Ok(()) => {
                        notification.set(Some(("logo 已删除".to_string(), false)));
                        set_place.update(|p| {
                            if let Some(p) = p {
                                p.image_url = None;
                            }
                        });
                    }
                    Err(e) => notification.set(Some((format!("删除 logo 失败: {e}"), true))),
                }
            });
        }
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-3xl mx-auto space-y-8">
                <Toast notification=notification />
                <PortalNav active=AppRoute::Settings />

                <Show when=move || loading.get()>
                    <div class="text-center py-16">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                    </div>
                </Show>

                <Show when=move || !loading.get() && place.get().is_none()>
                    <div role="alert" class="alert alert-warning">
                        <span>"名下暂无门店。入驻审核通过后门店会自动创建。"</span>
                    </div>
                </Show>

                <Show when=move || place.get().is_some()>
                    <div class="card bg-base-100 shadow-xl">
                        <div class="card-body">
                            <h3 class="card-title">"门店 logo"</h3>
                            <p class="text-base-content/70 text-sm">
                                "该图片同时用作门店横幅。JPEG/PNG/GIF/WebP，2MB 以内。"
                            </p>
                            <div class="flex items-center gap-4 mt-2">
                                {move || place.get().and_then(|p| p.image_url).map(|url| view! {
                                    <img src=url alt="门店 logo" class="w-20 h-20 rounded-xl object-cover" />
                                })}
                                <input
                                    type="file"
                                    accept="image/jpeg,image/png,image/gif,image/webp"
                                    on:change=on_logo_change.clone()
                                    class="file-input file-input-bordered file-input-sm"
                                />
                                <Show when=move || place.get().is_some_and(|p| p.image_url.is_some())>
                                    <button class="btn btn-outline btn-error btn-sm" on:click=move |_| logo_delete_open.set(true)>
                                        "删除 logo"
                                    </button>
                                </Show>
                            </div>
                        </div>
                    </div>

                    <div class="card bg-base-100 shadow-xl">
                        <form class="card-body space-y-4" on:submit=on_submit.clone()>
                            <h3 class="card-title">"基本信息与营业时间"</h3>

                            <div class="grid grid-cols-2 gap-4">
                                <div class="form-control">
                                    <label for="place_name" class="label">
                                        <span class="label-text">"门店名称"</span>
                                    </label>
                                    <input id="place_name" required
                                        type="text"
                                        on:input=move |ev| set_name.set(event_target_value(&ev))
                                        prop:value=name
                                        class="input input-bordered w-full"
                                    />
                                </div>
                                <div class="form-control">
                                    <label for="place_phone" class="label">
                                        <span class="label-text">"联系电话"</span>
                                    </label>
                                    <input id="place_phone"
                                        type="tel"
                                        on:input=move |ev| set_phone.set(event_target_value(&ev))
                                        prop:value=phone
                                        class="input input-bordered w-full"
                                    />
                                </div>
                            </div>

                            <div class="form-control">
                                <label for="place_address" class="label">
                                    <span class="label-text">"地址"</span>
                                </label>
                                <input id="place_address"
                                    type="text"
                                    on:input=move |ev| set_address.set(event_target_value(&ev))
                                    prop:value=address
                                    class="input input-bordered w-full"
                                />
                            </div>

                            <div class="grid grid-cols-2 gap-4">
                                <div class="form-control">
                                    <label for="place_open" class="label">
                                        <span class="label-text">"开门时间"</span>
                                    </label>
                                    <input id="place_open" required
                                        type="time"
                                        on:input=move |ev| set_opening_time.set(event_target_value(&ev))
                                        prop:value=opening_time
                                        class="input input-bordered w-full"
                                    />
                                </div>
                                <div class="form-control">
                                    <label for="place_close" class="label">
                                        <span class="label-text">"关门时间"</span>
                                    </label>
                                    <input id="place_close" required
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

                            <div class="card-actions justify-end mt-4">
                                <button type="submit" disabled=move || saving.get() class="btn btn-primary">
                                    {move || if saving.get() {
                                        view! { <span class="loading loading-spinner"></span> "保存中..." }.into_any()
                                    } else {
                                        "保存设置".into_any()
                                    }}
                                </button>
                            </div>
                        </form>
                    </div>
                </Show>
            </div>

            <ConfirmDialog
                open=logo_delete_open
                title="删除门店 logo".to_string()
                message="确定删除当前 logo 吗？顾客端将不再显示门店图片。".to_string()
                on_confirm=on_confirm_logo_delete
            />
        </div>
    }
}
