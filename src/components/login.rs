use crate::api::use_api;
use crate::auth::{login, register, use_auth};
use crate::components::icons::Store;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let auth_state = auth.state;

    let (register_mode, set_register_mode) = signal(false);
    let (username, set_username) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // 会话恢复期间不渲染表单，避免已登录用户闪现登录页。
    // 登录成功后的跳转由路由服务的认证监听统一处理。
    let is_loading = move || auth_state.get().is_loading;

    view! {
        <Show when=move || !is_loading() fallback=|| view! { <div class="flex items-center justify-center min-h-screen"><span class="loading loading-spinner loading-lg text-primary"></span></div> }>
            {
                let api = api.clone();
                let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
                    ev.prevent_default();
                    if username.get().is_empty() || password.get().is_empty() {
                        set_error_msg.set(Some("请填写所有字段".to_string()));
                        return;
                    }
                    if register_mode.get() && email.get().is_empty() {
                        set_error_msg.set(Some("请填写邮箱".to_string()));
                        return;
                    }

                    set_is_submitting.set(true);
                    set_error_msg.set(None);

                    let api = api.clone();
                    spawn_local(async move {
                        let outcome = if register_mode.get_untracked() {
                            register(&auth, &api, username.get_untracked(), email.get_untracked(), password.get_untracked()).await
                        } else {
                            login(&auth, &api, username.get_untracked(), password.get_untracked()).await
                        };
                        if let Err(e) = outcome {
                            set_error_msg.set(Some(e.to_string()));
                        }
                        set_is_submitting.set(false);
                    });
                };

                view! {
                    <div class="hero min-h-screen bg-base-200">
                        <div class="hero-content flex-col w-full max-w-md">
                            <div class="text-center mb-4">
                                <div class="flex flex-col items-center gap-2">
                                    <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                                        <Store attr:class="h-8 w-8" />
                                    </div>
                                    <h1 class="text-3xl font-bold">"Locaffy"</h1>
                                    <p class="text-base-content/70">
                                        {move || if register_mode.get() { "创建您的账号" } else { "登录以管理您的门店" }}
                                    </p>
                                </div>
                            </div>

                            <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                                <form class="card-body" on:submit=on_submit>
                                    <Show when=move || error_msg.get().is_some()>
                                        <div role="alert" class="alert alert-error text-sm py-2">
                                            <span>{move || error_msg.get().unwrap()}</span>
                                        </div>
                                    </Show>

                                    <div class="form-control">
                                        <label class="label" for="username">
                                            <span class="label-text">"用户名"</span>
                                        </label>
                                        <input
                                            id="username"
                                            type="text"
                                            placeholder="username"
                                            on:input=move |ev| set_username.set(event_target_value(&ev))
                                            prop:value=username
                                            class="input input-bordered"
                                            required
                                        />
                                    </div>
                                    <Show when=move || register_mode.get()>
                                        <div class="form-control">
                                            <label class="label" for="email">
                                                <span class="label-text">"邮箱"</span>
                                            </label>
                                            <input
                                                id="email"
                                                type="email"
                                                placeholder="you@example.com"
                                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                                prop:value=email
                                                class="input input-bordered"
                                            />
                                        </div>
                                    </Show>
                                    <div class="form-control">
                                        <label class="label" for="password">
                                            <span class="label-text">"密码"</span>
                                        </label>
                                        <input
                                            id="password"
                                            type="password"
                                            placeholder="••••••••"
                                            on:input=move |ev| set_password.set(event_target_value(&ev))
                                            prop:value=password
                                            class="input input-bordered"
                                            required
                                        />
                                    </div>
                                    <div class="form-control mt-6">
                                        <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                            {move || if is_submitting.get() {
                                                view! { <span class="loading loading-spinner"></span> "提交中..." }.into_any()
                                            } else if register_mode.get() {
                                                "注册".into_any()
                                            } else {
                                                "登录".into_any()
                                            }}
                                        </button>
                                    </div>
                                    <div class="text-center mt-2">
                                        <a
                                            class="link link-hover text-sm text-base-content/70"
                                            on:click=move |_| {
                                                set_register_mode.update(|m| *m = !*m);
                                                set_error_msg.set(None);
                                            }
                                        >
                                            {move || if register_mode.get() { "已有账号？登录" } else { "没有账号？注册" }}
                                        </a>
                                    </div>
                                </form>
                            </div>
                        </div>
                    </div>
                }
            }
        </Show>
    }
}
