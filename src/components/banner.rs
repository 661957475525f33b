//! 通知横幅组件
//!
//! 页面把 (文案, 是否出错) 放进共享的信号：成功横幅约 3 秒后
//! 自动消失，错误横幅常驻直到手动关闭或被新通知覆盖。

use leptos::prelude::*;
use std::time::Duration;

/// 页面级通知信号：(文案, 是否出错)
pub type Notification = Option<(String, bool)>;

#[component]
pub fn Toast(notification: RwSignal<Notification>) -> impl IntoView {
    // 成功通知 3 秒后清除；错误通知常驻
    Effect::new(move |_| {
        if let Some((_, is_err)) = notification.get() {
            if !is_err {
                set_timeout(
                    move || notification.set(None),
                    Duration::from_secs(3),
                );
            }
        }
    });

    view! {
        <Show when=move || notification.get().is_some()>
            <div class="toast toast-top toast-end z-50">
                <div class=move || {
                    let (_, is_err) = notification.get().unwrap();
                    if is_err {
                        "alert alert-error shadow-lg"
                    } else {
                        "alert alert-success shadow-lg"
                    }
                }>
                    <span>{move || notification.get().unwrap().0}</span>
                    <Show when=move || notification.get().is_some_and(|(_, e)| e)>
                        <button
                            class="btn btn-ghost btn-xs"
                            on:click=move |_| notification.set(None)
                        >
                            "关闭"
                        </button>
                    </Show>
                </div>
            </div>
        </Show>
    }
}
