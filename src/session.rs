//! 会话存储模块
//!
//! 持久化状态只有三项：access / refresh token 与用户快照。
//! 生命周期：登录或注册成功时写入，每次带认证的请求时读取，
//! 登出或刷新失败时清除。除本模块外不允许任何调用点直接碰
//! LocalStorage 里的认证数据。

use crate::web::LocalStorage;
use locaffy_shared::UserProfile;
use locaffy_shared::protocol::AuthResponse;
use locaffy_shared::role::{self, Role};

const ACCESS_TOKEN_KEY: &str = "locaffy_access_token";
const REFRESH_TOKEN_KEY: &str = "locaffy_refresh_token";
const USER_PROFILE_KEY: &str = "locaffy_user";

/// 会话存储的唯一接口
pub struct Session;

impl Session {
    /// 当前的 access token
    pub fn access_token() -> Option<String> {
        LocalStorage::get(ACCESS_TOKEN_KEY)
    }

    /// 当前的 refresh token
    pub fn refresh_token() -> Option<String> {
        LocalStorage::get(REFRESH_TOKEN_KEY)
    }

    /// 缓存的用户快照
    pub fn user() -> Option<UserProfile> {
        let raw = LocalStorage::get(USER_PROFILE_KEY)?;
        serde_json::from_str(&raw).ok()
    }

    /// 当前角色：优先取快照，快照缺失角色时回退解码 token
    pub fn role() -> Option<Role> {
        Self::user()
            .and_then(|u| u.parsed_role())
            .or_else(|| Self::access_token().as_deref().and_then(role::decode_role))
    }

    /// 写入一次完整会话（登录 / 注册 / 刷新成功后）
    pub fn set(auth: &AuthResponse) {
        LocalStorage::set(ACCESS_TOKEN_KEY, &auth.access_token);
        LocalStorage::set(REFRESH_TOKEN_KEY, &auth.refresh_token);
        if let Ok(json) = serde_json::to_string(&auth.user) {
            LocalStorage::set(USER_PROFILE_KEY, &json);
        }
    }

    /// 清除全部会话状态
    ///
    /// 登出必须在离线时也本地生效，因此不依赖任何网络结果。
    pub fn clear() {
        LocalStorage::delete(ACCESS_TOKEN_KEY);
        LocalStorage::delete(REFRESH_TOKEN_KEY);
        LocalStorage::delete(USER_PROFILE_KEY);
    }
}
