use std::fmt;

use crate::web::HttpError;

/// 未提供服务端消息时的兜底文案
pub const GENERIC_FAILURE: &str = "操作失败，请稍后重试";
const NETWORK_FAILURE: &str = "网络异常，请检查网络后重试";
const UNEXPECTED_FAILURE: &str = "系统繁忙，请稍后再试";

// =========================================================
// 错误类别
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    /// 请求未到达服务端或连接中断
    Network,
    /// 服务端明确返回失败
    Api,
    /// 响应格式异常等意料之外的错误
    Unexpected,
}

impl AuthErrorKind {
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthErrorKind::Network => "NETWORK_ERROR",
            AuthErrorKind::Api => "API_REJECTED",
            AuthErrorKind::Unexpected => "UNEXPECTED",
        }
    }
}

// =========================================================
// AuthError
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthError {
    pub kind: AuthErrorKind,
    pub message: String,
    /// HTTP 状态码（如果有）
    pub status: Option<u16>,
}

impl AuthError {
    pub fn new(kind: AuthErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(AuthErrorKind::Network, message)
    }

    /// 服务端拒绝；消息可能为空，展示时使用兜底文案
    pub fn api(message: Option<String>) -> Self {
        Self::new(AuthErrorKind::Api, message.unwrap_or_default())
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(AuthErrorKind::Unexpected, message)
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn is_unexpected(&self) -> bool {
        self.kind == AuthErrorKind::Unexpected
    }

    /// 面向用户的提示文案
    pub fn user_message(&self) -> String {
        match self.kind {
            AuthErrorKind::Api if !self.message.trim().is_empty() => self.message.clone(),
            AuthErrorKind::Api => GENERIC_FAILURE.to_string(),
            AuthErrorKind::Network => NETWORK_FAILURE.to_string(),
            AuthErrorKind::Unexpected => UNEXPECTED_FAILURE.to_string(),
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.error_code(), self.message)?;
        if let Some(status) = self.status {
            write!(f, " (HTTP {})", status)?;
        }
        Ok(())
    }
}

impl std::error::Error for AuthError {}

pub type AuthResult<T> = std::result::Result<T, AuthError>;

// =========================================================
// 类型转换
// =========================================================

impl From<HttpError> for AuthError {
    fn from(e: HttpError) -> Self {
        match e {
            HttpError::NetworkError(_) => AuthError::network(e.to_string()),
            HttpError::RequestBuildFailed(_) | HttpError::ResponseParseFailed(_) => {
                AuthError::unexpected(e.to_string())
            }
        }
    }
}

impl From<serde_json_wasm::de::Error> for AuthError {
    fn from(e: serde_json_wasm::de::Error) -> Self {
        AuthError::unexpected(format!("响应解析失败: {}", e))
    }
}

impl From<serde_json_wasm::ser::Error> for AuthError {
    fn from(e: serde_json_wasm::ser::Error) -> Self {
        AuthError::unexpected(format!("请求序列化失败: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_without_message_uses_fallback() {
        assert_eq!(AuthError::api(None).user_message(), GENERIC_FAILURE);
        assert_eq!(
            AuthError::api(Some("  ".into())).user_message(),
            GENERIC_FAILURE
        );
        assert_eq!(
            AuthError::api(Some("验证码错误".into())).user_message(),
            "验证码错误"
        );
    }

    #[test]
    fn test_internal_details_are_not_shown_to_users() {
        let err = AuthError::unexpected("missing field `token`");
        assert_eq!(err.user_message(), UNEXPECTED_FAILURE);
        assert!(err.is_unexpected());

        let err = AuthError::network("fetch failed");
        assert_eq!(err.user_message(), NETWORK_FAILURE);
    }

    #[test]
    fn test_display_includes_code_and_status() {
        let err = AuthError::api(Some("账号已存在".into())).with_status(409);
        assert_eq!(err.to_string(), "[API_REJECTED] 账号已存在 (HTTP 409)");
    }

    #[test]
    fn test_from_http_error() {
        let err: AuthError = HttpError::NetworkError("offline".into()).into();
        assert_eq!(err.kind, AuthErrorKind::Network);

        let err: AuthError = HttpError::ResponseParseFailed("bad".into()).into();
        assert_eq!(err.kind, AuthErrorKind::Unexpected);
    }
}
