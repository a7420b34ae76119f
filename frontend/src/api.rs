//! 认证后端
//!
//! [`AuthBackend`] 是页面与服务端之间的接缝，[`AuthApi`] 是基于 fetch 的实现。

use async_trait::async_trait;
use authdesk_shared::{
    ApiRequest, ApiResponse, CONTENT_TYPE_JSON, CodeLoginRequest, CreateQrRequest,
    HEADER_CONTENT_TYPE, PasswordLoginRequest, PollQrRequest, QrStatus, QrTicket,
    RegisterRequest, ResetPasswordRequest, SendCodeRequest, Session,
};

use crate::error::{AuthError, AuthResult};
use crate::web::{HttpClient, HttpResponse};

#[async_trait(?Send)]
pub trait AuthBackend {
    async fn send_code(&self, req: SendCodeRequest) -> AuthResult<()>;
    async fn login(&self, req: PasswordLoginRequest) -> AuthResult<Session>;
    async fn login_with_code(&self, req: CodeLoginRequest) -> AuthResult<Session>;
    async fn register(&self, req: RegisterRequest) -> AuthResult<()>;
    async fn reset_password(&self, req: ResetPasswordRequest) -> AuthResult<()>;
    async fn create_qr(&self) -> AuthResult<QrTicket>;
    async fn poll_qr(&self, ticket: String) -> AuthResult<QrStatus>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct AuthApi {
    pub base_url: String,
}

impl AuthApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    async fn call<R: ApiRequest>(&self, req: &R) -> AuthResult<ApiResponse<R::Response>> {
        let body = serde_json_wasm::to_string(req)?;
        let res = HttpClient::post(&self.url(R::PATH))
            .header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON)
            .body(body)
            .send()
            .await?;
        decode_envelope(res)
    }

    /// 只关心成功与否的接口
    async fn call_unit<R: ApiRequest<Response = ()>>(&self, req: &R) -> AuthResult<()> {
        self.call(req).await.map(|_| ())
    }

    /// 成功时必须携带 `data` 的接口
    async fn call_data<R: ApiRequest>(&self, req: &R) -> AuthResult<R::Response> {
        self.call(req)
            .await?
            .data
            .ok_or_else(|| AuthError::unexpected(format!("{} 响应缺少 data", R::PATH)))
    }
}

/// 解析响应信封
///
/// 非 2xx 时尽量取出服务端消息；`success: false` 一律视为服务端拒绝。
fn decode_envelope<T>(res: HttpResponse) -> AuthResult<ApiResponse<T>>
where
    T: serde::de::DeserializeOwned,
{
    if !res.ok() {
        let message = serde_json_wasm::from_str::<ApiResponse<serde::de::IgnoredAny>>(&res.body)
            .ok()
            .and_then(|env| env.message);
        return Err(AuthError::api(message).with_status(res.status));
    }

    let envelope: ApiResponse<T> = serde_json_wasm::from_str(&res.body)?;
    if !envelope.success {
        return Err(AuthError::api(envelope.message).with_status(res.status));
    }
    Ok(envelope)
}

#[async_trait(?Send)]
impl AuthBackend for AuthApi {
    async fn send_code(&self, req: SendCodeRequest) -> AuthResult<()> {
        self.call_unit(&req).await
    }

    async fn login(&self, req: PasswordLoginRequest) -> AuthResult<Session> {
        self.call_data(&req).await
    }

    async fn login_with_code(&self, req: CodeLoginRequest) -> AuthResult<Session> {
        self.call_data(&req).await
    }

    async fn register(&self, req: RegisterRequest) -> AuthResult<()> {
        self.call_unit(&req).await
    }

    async fn reset_password(&self, req: ResetPasswordRequest) -> AuthResult<()> {
        self.call_unit(&req).await
    }

    async fn create_qr(&self) -> AuthResult<QrTicket> {
        self.call_data(&CreateQrRequest::default()).await
    }

    async fn poll_qr(&self, ticket: String) -> AuthResult<QrStatus> {
        self.call_data(&PollQrRequest { ticket }).await
    }
}
