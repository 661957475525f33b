//! API 错误类型与状态码映射
//!
//! 服务层绝不让原始传输错误逃逸：每个失败都归一化为一个
//! `ApiError`，携带错误种类与可直接展示的文案。页面层把文案
//! 放进本地错误信号并渲染为横幅，不再向上传播。

use locaffy_shared::protocol::ErrorBody;
use locaffy_shared::role::Role;
use std::fmt;

// =========================================================
// 错误种类枚举
// =========================================================

/// 错误种类（语义，不是状态码）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 请求根本没到达服务器；重试即可恢复
    Network,
    /// 400: 数据校验失败
    InvalidInput,
    /// 401: 未认证或会话失效
    Unauthorized,
    /// 403: 权限不足
    Forbidden,
    /// 404: 资源不存在
    NotFound,
    /// 已知后端尚未实现的接口，调用方应优雅降级
    Unimplemented,
    /// 409: 状态转移冲突（重复处理），调用方应刷新列表而非重试
    Conflict,
    /// 500: 服务端故障
    Server,
    /// 客户端文件校验失败（未发起网络请求）
    FileValidation,
}

impl ApiErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ApiErrorKind::Network => "NETWORK",
            ApiErrorKind::InvalidInput => "INVALID_INPUT",
            ApiErrorKind::Unauthorized => "UNAUTHORIZED",
            ApiErrorKind::Forbidden => "FORBIDDEN",
            ApiErrorKind::NotFound => "NOT_FOUND",
            ApiErrorKind::Unimplemented => "UNIMPLEMENTED",
            ApiErrorKind::Conflict => "CONFLICT",
            ApiErrorKind::Server => "SERVER",
            ApiErrorKind::FileValidation => "FILE_VALIDATION",
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// 归一化的 API 错误：种类 + 用户可读文案
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    // --- Convenience constructors ---

    pub fn network() -> Self {
        Self::new(ApiErrorKind::Network, "网络连接失败，请检查网络后重试")
    }

    pub fn unimplemented() -> Self {
        Self::new(ApiErrorKind::Unimplemented, "该功能后端尚未实现")
    }

    pub fn file_validation(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::FileValidation, message)
    }

    /// 响应解析失败按服务端故障处理
    pub fn parse(detail: impl fmt::Display) -> Self {
        Self::new(
            ApiErrorKind::Server,
            format!("响应解析失败: {detail}"),
        )
    }

    /// 该错误是否应触发调用方自动刷新列表
    pub fn should_refresh(&self) -> bool {
        self.kind == ApiErrorKind::Conflict
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<locaffy_shared::upload::UploadError> for ApiError {
    fn from(e: locaffy_shared::upload::UploadError) -> Self {
        Self::file_validation(e.to_string())
    }
}

// =========================================================
// 端点标记
// =========================================================

/// 端点级别的映射开关
///
/// 少数接口有特殊映射需求：已知未实现的接口把 404 变成
/// `Unimplemented` 哨兵；个别接口在 403 时附加当前角色、在
/// 500 时附加后端原始细节以便排障。
#[derive(Debug, Clone, Copy)]
pub struct Endpoint {
    pub name: &'static str,
    /// 已知后端尚未实现；404 映射为 Unimplemented
    pub known_unimplemented: bool,
    /// 403 时附加本地解码出的角色，辅助诊断
    pub role_on_forbidden: bool,
    /// 500 时附加后端原始细节
    pub verbose_server_error: bool,
}

impl Endpoint {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            known_unimplemented: false,
            role_on_forbidden: false,
            verbose_server_error: false,
        }
    }

    pub const fn unimplemented_server_side(mut self) -> Self {
        self.known_unimplemented = true;
        self
    }

    pub const fn with_role_on_forbidden(mut self) -> Self {
        self.role_on_forbidden = true;
        self
    }

    pub const fn with_verbose_server_error(mut self) -> Self {
        self.verbose_server_error = true;
        self
    }
}

/// 把 HTTP 状态码与后端错误体映射为归一化错误
///
/// `role` 是调用时本地解码出的角色，仅在打了
/// `role_on_forbidden` 标记的端点上拼进 403 文案。
pub fn map_status(
    status: u16,
    body: &ErrorBody,
    endpoint: &Endpoint,
    role: Option<Role>,
) -> ApiError {
    let backend_text = body.text();
    match status {
        400 => ApiError::new(
            ApiErrorKind::InvalidInput,
            backend_text.unwrap_or("提交的数据无效，请检查后重试"),
        ),
        401 => ApiError::new(
            ApiErrorKind::Unauthorized,
            backend_text.unwrap_or("登录已过期，请重新登录"),
        ),
        403 => {
            let base = backend_text.unwrap_or("没有执行该操作的权限").to_string();
            let message = if endpoint.role_on_forbidden {
                let role_text = role.map(|r| r.as_str()).unwrap_or("未知");
                format!("{base}（当前角色: {role_text}）")
            } else {
                base
            };
            ApiError::new(ApiErrorKind::Forbidden, message)
        }
        404 if endpoint.known_unimplemented => ApiError::unimplemented(),
        404 => ApiError::new(
            ApiErrorKind::NotFound,
            backend_text.unwrap_or("请求的资源不存在"),
        ),
        409 => ApiError::new(
            ApiErrorKind::Conflict,
            backend_text.unwrap_or("该请求已被处理，列表将自动刷新"),
        ),
        500..=599 => {
            let message = match (endpoint.verbose_server_error, backend_text) {
                (true, Some(detail)) => {
                    format!("服务器开小差了，请稍后重试（{detail}）")
                }
                _ => "服务器开小差了，请稍后重试".to_string(),
            };
            ApiError::new(ApiErrorKind::Server, message)
        }
        // 其余状态码按服务端故障兜底
        _ => ApiError::new(
            ApiErrorKind::Server,
            backend_text
                .map(str::to_string)
                .unwrap_or_else(|| format!("请求失败: HTTP {status}")),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(message: Option<&str>) -> ErrorBody {
        ErrorBody {
            message: message.map(str::to_string),
            error: None,
        }
    }

    const PLAIN: Endpoint = Endpoint::new("test");

    #[test]
    fn validation_surfaces_backend_message_verbatim() {
        let err = map_status(400, &body(Some("营业时间格式错误")), &PLAIN, None);
        assert_eq!(err.kind, ApiErrorKind::InvalidInput);
        assert_eq!(err.message, "营业时间格式错误");

        let err = map_status(400, &body(None), &PLAIN, None);
        assert!(err.message.contains("无效"));
    }

    #[test]
    fn forbidden_appends_role_only_when_flagged() {
        const FLAGGED: Endpoint = Endpoint::new("test").with_role_on_forbidden();
        let err = map_status(403, &body(None), &FLAGGED, Some(Role::BusinessOwner));
        assert!(err.message.contains("BUSINESS_OWNER"));

        let err = map_status(403, &body(None), &PLAIN, Some(Role::BusinessOwner));
        assert!(!err.message.contains("BUSINESS_OWNER"));
    }

    #[test]
    fn known_unimplemented_endpoints_get_a_sentinel() {
        const STUBBED: Endpoint = Endpoint::new("stats").unimplemented_server_side();
        let err = map_status(404, &body(None), &STUBBED, None);
        assert_eq!(err.kind, ApiErrorKind::Unimplemented);

        let err = map_status(404, &body(None), &PLAIN, None);
        assert_eq!(err.kind, ApiErrorKind::NotFound);
    }

    #[test]
    fn conflict_signals_refresh_not_retry() {
        let err = map_status(409, &body(Some("申请已被处理")), &PLAIN, None);
        assert_eq!(err.kind, ApiErrorKind::Conflict);
        assert!(err.should_refresh());
        assert!(!map_status(400, &body(None), &PLAIN, None).should_refresh());
    }

    #[test]
    fn server_detail_appended_only_when_flagged() {
        const FRAGILE: Endpoint = Endpoint::new("fragile").with_verbose_server_error();
        let err = map_status(500, &body(Some("NullPointerException")), &FRAGILE, None);
        assert!(err.message.contains("NullPointerException"));

        let err = map_status(500, &body(Some("NullPointerException")), &PLAIN, None);
        assert!(!err.message.contains("NullPointerException"));
    }
}
