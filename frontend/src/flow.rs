//! 认证流程编排
//!
//! 把页面产出的请求交给后端，并把结果翻译成提示与 [`SubmitOutcome`]。
//! 三类错误的处理：
//! - 本地校验：在 `PageState` 中完成，不会走到这里
//! - 接口失败：提示服务端消息，没有消息时使用兜底文案
//! - 意外错误：记录日志，提示通用文案

use authdesk_shared::{QrStatus, QrTicket, SendCodeRequest};

use crate::api::AuthBackend;
use crate::error::AuthError;
use crate::page::{SubmitOutcome, SubmitPayload};
use crate::toast::Notifier;

#[derive(Clone)]
pub struct AuthFlow<B, N> {
    backend: B,
    notifier: N,
}

impl<B, N> AuthFlow<B, N>
where
    B: AuthBackend,
    N: Notifier,
{
    pub fn new(backend: B, notifier: N) -> Self {
        Self { backend, notifier }
    }

    pub async fn submit(&self, payload: SubmitPayload) -> Option<SubmitOutcome> {
        let (action, result) = match payload {
            SubmitPayload::PasswordLogin(req) => (
                "login",
                self.backend.login(req).await.map(SubmitOutcome::LoggedIn),
            ),
            SubmitPayload::CodeLogin(req) => (
                "login_with_code",
                self.backend
                    .login_with_code(req)
                    .await
                    .map(SubmitOutcome::LoggedIn),
            ),
            SubmitPayload::Register(req) => (
                "register",
                self.backend
                    .register(req)
                    .await
                    .map(|_| SubmitOutcome::Registered),
            ),
            SubmitPayload::Reset(req) => (
                "reset_password",
                self.backend
                    .reset_password(req)
                    .await
                    .map(|_| SubmitOutcome::PasswordReset),
            ),
        };

        match result {
            Ok(outcome) => {
                self.notifier.success(success_message(&outcome));
                Some(outcome)
            }
            Err(e) => {
                self.report(action, &e);
                None
            }
        }
    }

    /// 发送验证码，返回是否成功
    pub async fn send_code(&self, req: SendCodeRequest) -> bool {
        match self.backend.send_code(req).await {
            Ok(()) => {
                self.notifier.success("验证码已发送");
                true
            }
            Err(e) => {
                self.report("send_code", &e);
                false
            }
        }
    }

    pub async fn request_qr(&self) -> Option<QrTicket> {
        match self.backend.create_qr().await {
            Ok(ticket) => Some(ticket),
            Err(e) => {
                self.report("create_qr", &e);
                None
            }
        }
    }

    /// 轮询失败只记录日志，下一次轮询会重试
    pub async fn poll_qr(&self, ticket: String) -> Option<QrStatus> {
        match self.backend.poll_qr(ticket).await {
            Ok(status) => Some(status),
            Err(e) => {
                log_warn!("[Auth] poll_qr failed: {}", e);
                None
            }
        }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    fn report(&self, action: &str, err: &AuthError) {
        if err.is_unexpected() {
            log_error!("[Auth] {} failed unexpectedly: {}", action, err);
        } else {
            log_warn!("[Auth] {} failed: {}", action, err);
        }
        self.notifier.error(err.user_message());
    }
}

fn success_message(outcome: &SubmitOutcome) -> String {
    match outcome {
        SubmitOutcome::LoggedIn(session) => format!("欢迎回来，{}", session.user.username),
        SubmitOutcome::Registered => "注册成功，请登录".to_string(),
        SubmitOutcome::PasswordReset => "密码已重置，请使用新密码登录".to_string(),
    }
}
