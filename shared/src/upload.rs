//! 图片上传校验模块
//!
//! 在发起任何网络请求前完成文件类型与大小校验，省掉一次
//! 注定失败的往返。限制与后端一致：2 MiB，仅限常见图片格式。

use std::fmt;

/// 允许上传的图片 MIME 类型
pub const ALLOWED_IMAGE_TYPES: [&str; 4] =
    ["image/jpeg", "image/png", "image/gif", "image/webp"];

/// 图片大小上限（字节）
pub const MAX_IMAGE_BYTES: u64 = 2 * 1024 * 1024;

/// 客户端文件校验失败
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    /// 文件超过大小上限，携带实际字节数
    TooLarge(u64),
    /// 不支持的 MIME 类型，携带实际类型
    UnsupportedType(String),
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::TooLarge(size) => write!(
                f,
                "图片过大（{:.1} MB），最大支持 2 MB",
                *size as f64 / (1024.0 * 1024.0)
            ),
            UploadError::UnsupportedType(ty) => write!(
                f,
                "不支持的图片类型 {}，仅支持 JPEG、PNG、GIF、WebP",
                if ty.is_empty() { "(未知)" } else { ty }
            ),
        }
    }
}

impl std::error::Error for UploadError {}

/// 校验图片的类型与大小
pub fn validate_image(content_type: &str, size: u64) -> Result<(), UploadError> {
    let normalized = content_type.trim().to_ascii_lowercase();
    if !ALLOWED_IMAGE_TYPES.contains(&normalized.as_str()) {
        return Err(UploadError::UnsupportedType(content_type.to_string()));
    }
    if size > MAX_IMAGE_BYTES {
        return Err(UploadError::TooLarge(size));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_allowed_types_within_limit() {
        for ty in ALLOWED_IMAGE_TYPES {
            assert_eq!(validate_image(ty, 1024), Ok(()));
        }
        assert_eq!(validate_image("IMAGE/PNG", MAX_IMAGE_BYTES), Ok(()));
    }

    #[test]
    fn rejects_bmp_before_any_network_call() {
        // 1MB 的 bmp：大小合规，类型不合规
        let err = validate_image("image/bmp", 1024 * 1024).unwrap_err();
        assert_eq!(err, UploadError::UnsupportedType("image/bmp".into()));
        let msg = err.to_string();
        assert!(msg.contains("JPEG"));
        assert!(msg.contains("WebP"));
    }

    #[test]
    fn rejects_oversized_files() {
        let err = validate_image("image/jpeg", MAX_IMAGE_BYTES + 1).unwrap_err();
        assert!(matches!(err, UploadError::TooLarge(_)));
        assert!(err.to_string().contains("2 MB"));
    }
}
