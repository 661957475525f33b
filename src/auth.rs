//! 认证模块
//!
//! 管理用户认证状态，与路由系统解耦。
//! 路由服务通过注入的认证 / 角色信号来检查状态；
//! 持久化读写全部经由 `Session`，本模块只持有内存信号。

use crate::api::{ApiError, ApiErrorKind, LocaffyApi};
use crate::session::Session;
use leptos::prelude::*;
use leptos::task::spawn_local;
use locaffy_shared::UserProfile;
use locaffy_shared::protocol::{LoginRequest, RegisterRequest};
use locaffy_shared::role::Role;

/// 认证状态
#[derive(Clone, Default)]
pub struct AuthState {
    /// 缓存的用户快照（仅在认证成功后存在）
    pub user: Option<UserProfile>,
    /// 是否已认证
    pub is_authenticated: bool,
    /// 是否正在恢复会话
    pub is_loading: bool,
}

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 认证状态（只读）
    pub state: ReadSignal<AuthState>,
    /// 设置认证状态（写入）
    pub set_state: WriteSignal<AuthState>,
}

impl AuthContext {
    /// 创建新的认证上下文
    pub fn new() -> Self {
        let (state, set_state) = signal(AuthState {
            is_loading: true,
            ..AuthState::default()
        });
        Self { state, set_state }
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().is_authenticated)
    }

    /// 获取当前角色信号
    ///
    /// 快照缺失角色时回退解码本地 token；未认证时恒为 None。
    pub fn role_signal(&self) -> Signal<Option<Role>> {
        let state = self.state;
        Signal::derive(move || {
            let s = state.get();
            if !s.is_authenticated {
                return None;
            }
            s.user
                .as_ref()
                .and_then(|u| u.parsed_role())
                .or_else(Session::role)
        })
    }

    /// 当前角色的一次性读取（非响应式）
    pub fn current_role(&self) -> Option<Role> {
        let s = self.state.get_untracked();
        if !s.is_authenticated {
            return None;
        }
        s.user
            .as_ref()
            .and_then(|u| u.parsed_role())
            .or_else(Session::role)
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 初始化认证状态
///
/// 从 Session 恢复持久化会话，并在后台刷新 token 对；
/// 刷新被拒绝（非网络原因）意味着会话死亡，清除本地状态。
pub fn init_auth(ctx: &AuthContext, api: &LocaffyApi) {
    let has_session = Session::access_token().is_some();
    ctx.set_state.update(|state| {
        state.is_loading = false;
        if has_session {
            state.user = Session::user();
            state.is_authenticated = true;
        }
    });

    if !has_session {
        return;
    }

    if let Some(refresh_token) = Session::refresh_token() {
        let api = api.clone();
        let set_state = ctx.set_state;
        spawn_local(async move {
            match api.refresh(refresh_token).await {
                Ok(auth) => {
                    Session::set(&auth);
                    set_state.update(|state| state.user = Some(auth.user.clone()));
                }
                // 网络不通时保留现有会话，下次加载重试
                Err(e) if e.kind == ApiErrorKind::Network => {}
                Err(_) => {
                    Session::clear();
                    set_state.update(|state| {
                        state.user = None;
                        state.is_authenticated = false;
                    });
                }
            }
        });
    }
}

/// 登录并持久化会话
pub async fn login(
    ctx: &AuthContext,
    api: &LocaffyApi,
    username: String,
    password: String,
) -> Result<(), ApiError> {
    let auth = api.login(&LoginRequest { username, password }).await?;
    Session::set(&auth);
    ctx.set_state.update(|state| {
        state.user = Some(auth.user.clone());
        state.is_authenticated = true;
    });
    Ok(())
}

/// 注册并持久化会话
pub async fn register(
    ctx: &AuthContext,
    api: &LocaffyApi,
    username: String,
    email: String,
    password: String,
) -> Result<(), ApiError> {
    let auth = api
        .register(&RegisterRequest {
            username,
            email,
            password,
        })
        .await?;
    Session::set(&auth);
    ctx.set_state.update(|state| {
        state.user = Some(auth.user.clone());
        state.is_authenticated = true;
    });
    Ok(())
}

/// 注销并清除状态
///
/// 本地会话立即清除，离线时同样生效；服务端作废只是尽力通知。
/// 导航由路由服务的认证状态监听自动处理。
pub fn logout(ctx: &AuthContext, api: &LocaffyApi) {
    // 先于清除捕获 token，服务端作废仍需要它
    let token = Session::access_token();
    Session::clear();
    ctx.set_state.update(|state| {
        state.user = None;
        state.is_authenticated = false;
    });

    let api = api.clone();
    spawn_local(async move {
        if let Err(e) = api.logout(token).await {
            web_sys::console::warn_1(&format!("[Auth] 服务端注销失败: {e}").into());
        }
    });
}
