use crate::{CodePurpose, QrStatus, QrTicket, Session};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// A trait that defines the request-response relationship for an auth endpoint.
///
/// Every endpoint is a JSON `POST`; the response body is wrapped in
/// [`crate::ApiResponse`].
pub trait ApiRequest: Serialize {
    /// The payload carried in the envelope's `data` field.
    type Response: DeserializeOwned;
    /// The URL path relative to the API base.
    const PATH: &'static str;
}

// =========================================================
// Request Definitions
// =========================================================

/// Ask the server to text a verification code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendCodeRequest {
    pub phone: String,
    pub purpose: CodePurpose,
}

impl ApiRequest for SendCodeRequest {
    type Response = ();
    const PATH: &'static str = "/auth/code";
}

/// Account (username or phone) + password login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordLoginRequest {
    pub account: String,
    pub password: String,
}

impl ApiRequest for PasswordLoginRequest {
    type Response = Session;
    const PATH: &'static str = "/auth/login";
}

/// Phone + verification code login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeLoginRequest {
    pub phone: String,
    pub code: String,
}

impl ApiRequest for CodeLoginRequest {
    type Response = Session;
    const PATH: &'static str = "/auth/login/code";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub phone: String,
    pub code: String,
    pub password: String,
}

impl ApiRequest for RegisterRequest {
    type Response = ();
    const PATH: &'static str = "/auth/register";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    pub phone: String,
    pub code: String,
    pub new_password: String,
}

impl ApiRequest for ResetPasswordRequest {
    type Response = ();
    const PATH: &'static str = "/auth/password/reset";
}

/// Allocate a fresh QR login ticket
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateQrRequest {}

impl ApiRequest for CreateQrRequest {
    type Response = QrTicket;
    const PATH: &'static str = "/auth/qr";
}

/// Check the scan status of a ticket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollQrRequest {
    pub ticket: String,
}

impl ApiRequest for PollQrRequest {
    type Response = QrStatus;
    const PATH: &'static str = "/auth/qr/poll";
}
