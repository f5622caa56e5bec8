//! Authorization 头解析

use arx_errors::{AppError, AppResult};

pub const BEARER_PREFIX: &str = "Bearer ";

/// 从 Authorization 头中提取裸令牌
///
/// 头缺失或为空、缺少 `Bearer ` 前缀都是调用方可纠正的输入错误。
pub fn extract_bearer(authorization: Option<&str>) -> AppResult<&str> {
    let header = authorization
        .filter(|header| !header.is_empty())
        .ok_or_else(|| AppError::validation("No authorization token provided"))?;

    header.strip_prefix(BEARER_PREFIX).ok_or_else(|| {
        AppError::validation(format!(
            "Invalid authorization token format. Expected {}<token>",
            BEARER_PREFIX
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_token_after_prefix() {
        assert_eq!(extract_bearer(Some("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_missing_header_rejected() {
        assert!(matches!(
            extract_bearer(None),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            extract_bearer(Some("")),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_wrong_prefix_rejected() {
        assert!(extract_bearer(Some("Basic abc")).is_err());
        assert!(extract_bearer(Some("bearer abc")).is_err());
        assert!(extract_bearer(Some("abc.def.ghi")).is_err());
    }
}
