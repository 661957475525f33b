//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由、其访问要求与重定向目标。

use locaffy_shared::role::Role;
use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 营销首页（公开，也是越权访问的中立落点）
    #[default]
    Home,
    /// 登录 / 注册页
    Login,
    /// 扫码菜单页（公开、免登录），携带门店 id
    QrMenu(i64),
    /// 商家仪表盘（预订管理）
    Dashboard,
    /// 商家菜单管理
    Menu,
    /// 门店设置
    Settings,
    /// 评价管理（商家或超管）
    Reviews,
    /// 超管：入驻申请管理
    AdminApplications,
    /// 超管：商家管理
    AdminBusinesses,
    /// 超管：用户管理
    AdminUsers,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        // 扫码菜单带路径参数，单独处理
        if let Some(rest) = path.strip_prefix("/qr/") {
            return match rest.trim_end_matches('/').parse::<i64>() {
                Ok(id) => Self::QrMenu(id),
                Err(_) => Self::NotFound,
            };
        }
        match path {
            "/" => Self::Home,
            "/login" => Self::Login,
            "/dashboard" => Self::Dashboard,
            "/menu" => Self::Menu,
            "/settings" => Self::Settings,
            "/reviews" => Self::Reviews,
            "/admin/applications" => Self::AdminApplications,
            "/admin/businesses" => Self::AdminBusinesses,
            "/admin/users" => Self::AdminUsers,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::QrMenu(id) => format!("/qr/{id}"),
            Self::Dashboard => "/dashboard".to_string(),
            Self::Menu => "/menu".to_string(),
            Self::Settings => "/settings".to_string(),
            Self::Reviews => "/reviews".to_string(),
            Self::AdminApplications => "/admin/applications".to_string(),
            Self::AdminBusinesses => "/admin/businesses".to_string(),
            Self::AdminUsers => "/admin/users".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// 该路由的角色白名单；None 表示公开路由
    ///
    /// 这只是界面层的便捷门禁，真正的鉴权在后端。
    pub fn allowed_roles(&self) -> Option<&'static [Role]> {
        const OWNER: &[Role] = &[Role::BusinessOwner];
        const ADMIN: &[Role] = &[Role::Admin];
        const STAFF: &[Role] = &[Role::Admin, Role::BusinessOwner];
        match self {
            Self::Dashboard | Self::Menu | Self::Settings => Some(OWNER),
            Self::Reviews => Some(STAFF),
            Self::AdminApplications | Self::AdminBusinesses | Self::AdminUsers => Some(ADMIN),
            _ => None,
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        self.allowed_roles().is_some()
    }

    /// 定义已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取认证成功时按角色的落点（从登录页）
    pub fn auth_success_redirect(role: Option<Role>) -> Self {
        match role {
            Some(Role::Admin) => Self::AdminApplications,
            Some(Role::BusinessOwner) => Self::Dashboard,
            _ => Self::Home,
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_paths_including_qr_param() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Home);
        assert_eq!(AppRoute::from_path("/qr/42"), AppRoute::QrMenu(42));
        assert_eq!(AppRoute::from_path("/qr/42/"), AppRoute::QrMenu(42));
        assert_eq!(AppRoute::from_path("/qr/abc"), AppRoute::NotFound);
        assert_eq!(
            AppRoute::from_path("/admin/applications"),
            AppRoute::AdminApplications
        );
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
    }

    #[test]
    fn path_round_trip() {
        for route in [
            AppRoute::Home,
            AppRoute::Login,
            AppRoute::QrMenu(7),
            AppRoute::Dashboard,
            AppRoute::Menu,
            AppRoute::Settings,
            AppRoute::Reviews,
            AppRoute::AdminApplications,
            AppRoute::AdminBusinesses,
            AppRoute::AdminUsers,
        ] {
            assert_eq!(AppRoute::from_path(&route.to_path()), route);
        }
    }

    #[test]
    fn guard_matrix() {
        assert!(!AppRoute::QrMenu(1).requires_auth());
        assert!(!AppRoute::Home.requires_auth());
        assert!(AppRoute::Dashboard.requires_auth());
        assert_eq!(
            AppRoute::AdminUsers.allowed_roles(),
            Some(&[Role::Admin][..])
        );
        assert!(
            AppRoute::Reviews
                .allowed_roles()
                .unwrap()
                .contains(&Role::BusinessOwner)
        );
    }

    #[test]
    fn role_aware_login_landing() {
        assert_eq!(
            AppRoute::auth_success_redirect(Some(Role::Admin)),
            AppRoute::AdminApplications
        );
        assert_eq!(
            AppRoute::auth_success_redirect(Some(Role::BusinessOwner)),
            AppRoute::Dashboard
        );
        assert_eq!(AppRoute::auth_success_redirect(None), AppRoute::Home);
    }
}
