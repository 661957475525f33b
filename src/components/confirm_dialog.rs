//! 确认对话框组件
//!
//! 所有破坏性 / 状态变更操作（通过、拒绝、取消、删除）都经由
//! 这层显式确认，避免误触。

use leptos::prelude::*;

#[component]
pub fn ConfirmDialog(
    /// 打开状态（由调用方持有）
    open: RwSignal<bool>,
    /// 标题
    #[prop(into)]
    title: Signal<String>,
    /// 正文说明
    #[prop(into)]
    message: Signal<String>,
    /// 确认回调
    #[prop(into)]
    on_confirm: Callback<()>,
) -> impl IntoView {
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

    view! {
        <dialog node_ref=dialog_ref class="modal" on:close=move |_| open.set(false)>
            <div class="modal-box">
                <h3 class="font-bold text-lg">{title}</h3>
                <p class="py-4 text-base-content/80">{message}</p>
                <div class="modal-action">
                    <button class="btn btn-ghost" on:click=move |_| open.set(false)>
                        "取消"
                    </button>
                    <button
                        class="btn btn-primary"
                        on:click=move |_| {
                            open.set(false);
                            on_confirm.run(());
                        }
                    >
                        "确认"
                    </button>
                </div>
            </div>
        </dialog>
    }
}
