//! 角色与令牌解析模块
//!
//! 后端在不同接口里返回的角色字符串形态不一致（`ROLE_ADMIN` 与
//! `ADMIN` 都出现过），因此归一化只在这里做一次：`Role::parse`
//! 是唯一的字符串到角色的入口，页面层只比较封闭枚举。
//!
//! JWT 解码只取 payload 段做 UI 层的便捷判断，不校验签名；
//! 真正的鉴权由后端完成，这里解不出角色就按"未授权"处理。

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use percent_encoding::percent_decode;
use serde::{Deserialize, Serialize};

/// 平台角色（封闭枚举）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// 平台超级管理员
    Admin,
    /// 商家（Place 所有者）
    BusinessOwner,
    /// 普通用户
    User,
}

impl Role {
    /// 解析角色字符串，归一化 `ROLE_` 前缀与大小写
    ///
    /// 返回 None 表示无法识别，调用方必须按未授权处理
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().to_ascii_uppercase();
        let normalized = normalized.strip_prefix("ROLE_").unwrap_or(&normalized);
        match normalized {
            "ADMIN" | "SUPER_ADMIN" => Some(Role::Admin),
            "BUSINESS_OWNER" | "OWNER" => Some(Role::BusinessOwner),
            "USER" => Some(Role::User),
            _ => None,
        }
    }

    /// 规范化的角色字符串
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::BusinessOwner => "BUSINESS_OWNER",
            Role::User => "USER",
        }
    }

    /// 界面显示名
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "平台管理员",
            Role::BusinessOwner => "商家",
            Role::User => "用户",
        }
    }
}

/// 统一的权限检查入口
pub fn is_allowed(role: Option<Role>, allowed: &[Role]) -> bool {
    role.is_some_and(|r| allowed.contains(&r))
}

// =========================================================
// JWT payload 解码
// =========================================================

/// 从 Bearer token 中提取角色声明
///
/// 流程：取第二段 -> base64url 解码 -> 百分号解码为 UTF-8 ->
/// JSON 解析 -> 依次探测 `role` / `authorities[0]` / `authority`。
/// 任何一步失败都返回 None，绝不 panic。
pub fn decode_role(token: &str) -> Option<Role> {
    let payload = decode_payload(token)?;
    let claim = role_claim(&payload)?;
    Role::parse(&claim)
}

/// 解码 token 的 payload 段为 JSON
pub fn decode_payload(token: &str) -> Option<serde_json::Value> {
    let segment = token.split('.').nth(1)?;
    // 兼容带填充的变体
    let segment = segment.trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD.decode(segment).ok()?;
    let text = percent_decode(&bytes).decode_utf8().ok()?;
    serde_json::from_str(&text).ok()
}

/// 依次探测各种后端形态下的角色声明
fn role_claim(payload: &serde_json::Value) -> Option<String> {
    if let Some(role) = payload.get("role").and_then(|v| v.as_str()) {
        return Some(role.to_string());
    }
    if let Some(first) = payload.get("authorities").and_then(|v| v.get(0)) {
        // Spring 风格：字符串数组或 [{ "authority": "..." }]
        if let Some(s) = first.as_str() {
            return Some(s.to_string());
        }
        if let Some(s) = first.get("authority").and_then(|v| v.as_str()) {
            return Some(s.to_string());
        }
    }
    payload
        .get("authority")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 构造一个未签名的测试 token（header.payload.signature）
    fn token_with_payload(payload: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes());
        format!("{header}.{body}.sig")
    }

    #[test]
    fn parse_normalizes_prefix_and_case() {
        assert_eq!(Role::parse("ROLE_ADMIN"), Some(Role::Admin));
        assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::parse("role_business_owner"), Some(Role::BusinessOwner));
        assert_eq!(Role::parse(" user "), Some(Role::User));
        assert_eq!(Role::parse("WAITER"), None);
    }

    #[test]
    fn decodes_role_claim_variants() {
        let direct = token_with_payload(&serde_json::json!({"sub": "u1", "role": "ROLE_ADMIN"}));
        assert_eq!(decode_role(&direct), Some(Role::Admin));

        let authorities =
            token_with_payload(&serde_json::json!({"authorities": ["BUSINESS_OWNER"]}));
        assert_eq!(decode_role(&authorities), Some(Role::BusinessOwner));

        let spring = token_with_payload(
            &serde_json::json!({"authorities": [{"authority": "ROLE_USER"}]}),
        );
        assert_eq!(decode_role(&spring), Some(Role::User));

        let single = token_with_payload(&serde_json::json!({"authority": "ADMIN"}));
        assert_eq!(decode_role(&single), Some(Role::Admin));
    }

    #[test]
    fn malformed_tokens_decode_to_none() {
        assert_eq!(decode_role(""), None);
        assert_eq!(decode_role("not-a-jwt"), None);
        assert_eq!(decode_role("a.!!!invalid-base64!!!.c"), None);
        // payload 不是 JSON
        let bad = format!("h.{}.s", URL_SAFE_NO_PAD.encode(b"plain text"));
        assert_eq!(decode_role(&bad), None);
        // payload 是 JSON 但没有角色声明
        let no_claim = token_with_payload(&serde_json::json!({"sub": "u1"}));
        assert_eq!(decode_role(&no_claim), None);
    }

    #[test]
    fn tolerates_padded_payload_segment() {
        let body = base64::engine::general_purpose::URL_SAFE
            .encode(br#"{"role":"ADMIN"}"#);
        let token = format!("h.{body}.s");
        assert_eq!(decode_role(&token), Some(Role::Admin));
    }

    #[test]
    fn allow_list_check() {
        assert!(is_allowed(Some(Role::Admin), &[Role::Admin]));
        assert!(!is_allowed(Some(Role::User), &[Role::Admin, Role::BusinessOwner]));
        assert!(!is_allowed(None, &[Role::Admin]));
        assert!(!is_allowed(Some(Role::Admin), &[]));
    }
}
