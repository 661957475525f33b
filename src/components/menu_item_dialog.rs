//! 菜品新建 / 编辑对话框
//!
//! 新建与编辑共用一个表单：`FormState.editing_id` 区分模式。
//! 新建时的图片上传是两步串联（先创建拿 id，再上传），
//! 编辑时图片直接对已有 id 上传。

pub mod form_state;

use crate::api::use_api;
use crate::components::banner::Notification;
use crate::components::icons::Plus;
use form_state::FormState;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

#[component]
pub fn MenuItemDialog(
    /// 表单状态（由菜单页持有，编辑时预先回填）
    state: FormState,
    /// 打开状态（由菜单页持有，行内"编辑"也会打开它）
    open: RwSignal<bool>,
    /// 已有分类，用于输入联想
    #[prop(into)]
    categories: Signal<Vec<String>>,
    /// 页面级通知
    notification: RwSignal<Notification>,
    /// 保存成功后的回调（触发整表重读）
    #[prop(into)]
    on_saved: Callback<()>,
) -> impl IntoView {
    let api = use_api();

    let (loading, set_loading) = signal(false);
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if open.get() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    let on_file_change = move |ev: leptos::web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        let file = input.files().and_then(|list| list.get(0));
        state.image.set(file);
    };

    let on_submit = {
        let api = api.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();

            let Some(req) = state.to_request() else {
                notification.set(Some(("价格格式不正确".to_string(), true)));
                return;
            };
            set_loading.set(true);

            let api = api.clone();
            let image = state.image.get_untracked();
            let editing = state.editing_id.get_untracked();
            spawn_local(async move {
                let outcome = match editing {
                    // 编辑：更新字段，图片（如选择了）单独上传
                    Some(id) => {
                        let mut result = api.update_menu_item(id, &req).await.map(|_| ());
                        if result.is_ok() {
                            if let Some(file) = image {
                                result = api.upload_menu_item_image(id, &file).await;
                            }
                        }
                        result
                    }
                    // 新建：两步串联由 API 层负责
                    None => api.create_menu_item_with_image(&req, image).await.map(|_| ()),
                };

                match outcome {
                    Ok(()) => {
                        notification.set(Some(("菜品已保存".to_string(), false)));
                        open.set(false);
                        state.reset();
                        on_saved.run(());
                    }
                    Err(e) => notification.set(Some((format!("保存菜品失败: {e}"), true))),
                }
                set_loading.set(false);
            });
        }
    };

    view! {
        // 触发按钮（新建模式）
        <button
            class="btn btn-primary gap-2"
            on:click=move |_| {
                state.reset();
                open.set(true);
            }
        >
            <Plus attr:class="h-4 w-4" /> "添加菜品"
        </button>

        // 模态框内容
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| open.set(false)>
            <div class="modal-box">
                <h3 class="font-bold text-lg">
                    {move || if state.editing_id.get().is_some() { "编辑菜品" } else { "添加菜品" }}
                </h3>

                <form on:submit=on_submit class="space-y-4 mt-4">
                    <div class="grid grid-cols-2 gap-4">
                        <div class="form-control">
                            <label for="item_name" class="label">
                                <span class="label-text">"名称"</span>
                            </label>
                            <input id="item_name" required
                                type="text"
                                placeholder="拿铁"
                                on:input=move |ev| state.name.set(event_target_value(&ev))
                                prop:value=move || state.name.get()
                                class="input input-bordered w-full"
                            />
                        </div>
                        <div class="form-control">
                            <label for="item_price" class="label">
                                <span class="label-text">"价格"</span>
                            </label>
                            <input id="item_price" required
                                type="number" step="0.01" min="0"
                                placeholder="28.00"
                                on:input=move |ev| state.price.set(event_target_value(&ev))
                                prop:value=move || state.price.get()
                                class="input input-bordered w-full"
                            />
                        </div>
                    </div>

                    <div class="grid grid-cols-2 gap-4">
                        <div class="form-control">
                            <label for="item_category" class="label">
                                <span class="label-text">"分类"</span>
                            </label>
                            <input id="item_category"
                                type="text"
                                placeholder="咖啡"
                                list="category_options"
                                on:input=move |ev| state.category.set(event_target_value(&ev))
                                prop:value=move || state.category.get()
                                class="input input-bordered w-full"
                            />
                            <datalist id="category_options">
                                {move || categories.get().into_iter().map(|c| view! {
                                    <option value=c></option>
                                }).collect_view()}
                            </datalist>
                        </div>
                        <div class="form-control">
                            <label for="item_order" class="label">
                                <span class="label-text">"排序键 (可选)"</span>
                            </label>
                            <input id="item_order"
                                type="number"
                                placeholder="10"
                                on:input=move |ev| state.display_order.set(event_target_value(&ev))
                                prop:value=move || state.display_order.get()
                                class="input input-bordered w-full"
                            />
                        </div>
                    </div>

                    <div class="form-control">
                        <label for="item_tags" class="label">
                            <span class="label-text">"标签（逗号分隔）"</span>
                        </label>
                        <input id="item_tags"
                            type="text"
                            placeholder="招牌, 素食"
                            on:input=move |ev| state.tags.set(event_target_value(&ev))
                            prop:value=move || state.tags.get()
                            class="input input-bordered w-full"
                        />
                    </div>

                    <div class="form-control">
                        <label for="item_image" class="label">
                            <span class="label-text">"图片（JPEG/PNG/GIF/WebP，2MB 以内）"</span>
                        </label>
                        <input id="item_image"
                            type="file"
                            accept="image/jpeg,image/png,image/gif,image/webp"
                            on:change=on_file_change
                            class="file-input file-input-bordered w-full"
                        />
                    </div>

                    <div class="form-control">
                        <label class="label cursor-pointer">
                            <span class="label-text font-bold">"上架（对顾客可见可点）"</span>
                            <input type="checkbox" class="toggle toggle-primary"
                                prop:checked=move || state.available.get()
                                on:change=move |ev| state.available.set(event_target_checked(&ev))
                            />
                        </label>
                    </div>

                    <div class="modal-action">
                        <button type="button" class="btn btn-ghost" on:click=move |_| open.set(false)>"取消"</button>
                        <button type="submit" disabled=move || loading.get() class="btn btn-primary">
                            {move || if loading.get() {
                                view! { <span class="loading loading-spinner"></span> "保存中..." }.into_any()
                            } else {
                                "保存".into_any()
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
