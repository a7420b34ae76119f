use serde::{Deserialize, Serialize};

pub mod config;
pub mod protocol;
pub mod validation;

pub use config::{AuthConfig, DurationSecs};
pub use protocol::{
    ApiRequest, CodeLoginRequest, CreateQrRequest, PasswordLoginRequest, PollQrRequest,
    RegisterRequest, ResetPasswordRequest, SendCodeRequest,
};
pub use validation::{FieldErrors, ValidationResult, Validator};

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// 二维码加载完成前显示的占位图
pub const PLACEHOLDER_QR_IMAGE: &str = "/assets/qr-placeholder.svg";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 验证码用途
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodePurpose {
    Login,
    Register,
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// 登录成功后由服务端签发的会话（仅保存在内存中）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
}

/// 服务端为扫码登录分配的票据
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrTicket {
    pub ticket: String,
    pub image_url: String,
}

/// 扫码登录轮询结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QrStatus {
    Pending,
    Scanned,
    Confirmed { session: Session },
    Expired,
}

/// 统一响应信封
///
/// 所有认证接口都返回 `{ success, message?, data? }`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn session() -> Session {
        Session {
            token: "t-1".into(),
            user: UserProfile {
                id: "42".into(),
                username: "alice".into(),
                phone: Some("13800138000".into()),
                avatar_url: None,
            },
        }
    }

    #[test]
    fn test_qr_status_is_tagged_by_status_field() {
        let pending: QrStatus = serde_json::from_value(json!({ "status": "pending" })).unwrap();
        assert_eq!(pending, QrStatus::Pending);

        let confirmed: QrStatus = serde_json::from_value(json!({
            "status": "confirmed",
            "session": {
                "token": "t-1",
                "user": { "id": "42", "username": "alice", "phone": "13800138000" }
            }
        }))
        .unwrap();
        assert_eq!(confirmed, QrStatus::Confirmed { session: session() });
    }

    #[test]
    fn test_envelope_without_data_or_message() {
        let res: ApiResponse<()> = serde_json::from_value(json!({ "success": true })).unwrap();
        assert!(res.success);
        assert!(res.message.is_none());
        assert!(res.data.is_none());

        let res: ApiResponse<Session> =
            serde_json::from_value(json!({ "success": false, "message": "密码错误" })).unwrap();
        assert!(!res.success);
        assert_eq!(res.message.as_deref(), Some("密码错误"));
    }

    #[test]
    fn test_envelope_carries_confirmed_qr_status() {
        let res: ApiResponse<QrStatus> = serde_json::from_value(json!({
            "success": true,
            "data": {
                "status": "confirmed",
                "session": {
                    "token": "t-1",
                    "user": { "id": "42", "username": "alice", "phone": "13800138000" }
                }
            }
        }))
        .unwrap();
        assert_eq!(
            res.data,
            Some(QrStatus::Confirmed {
                session: session()
            })
        );
    }

    #[test]
    fn test_code_purpose_wire_names() {
        assert_eq!(serde_json::to_value(CodePurpose::Reset).unwrap(), json!("reset"));
        assert_eq!(
            serde_json::to_value(CodePurpose::Register).unwrap(),
            json!("register")
        );
    }
}
