//! 认证页面状态
//!
//! 不依赖 DOM 与响应式系统的纯状态机，组件层只负责把它放进信号里。
//! 定时器句柄类型 `H` 由调度器决定（浏览器为 `web::Timer`）。

pub mod countdown;
pub mod forms;
pub mod mode;
pub mod qr;
pub mod timer;

use authdesk_shared::validation::{FieldName, field};
use authdesk_shared::{
    CodeLoginRequest, FieldErrors, PasswordLoginRequest, RegisterRequest, ResetPasswordRequest,
    SendCodeRequest, Session, Validator,
};

use countdown::Countdown;
use forms::{CodeLoginForm, ForgotForm, PasswordLoginForm, RegisterForm};
use mode::{AuthMode, LoginMethod};
use qr::QrSession;

/// 校验通过后交给后端的请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitPayload {
    PasswordLogin(PasswordLoginRequest),
    CodeLogin(CodeLoginRequest),
    Register(RegisterRequest),
    Reset(ResetPasswordRequest),
}

/// 提交成功的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    LoggedIn(Session),
    Registered,
    PasswordReset,
}

pub struct PageState<H> {
    mode: AuthMode,
    login_method: LoginMethod,

    pub password_login: PasswordLoginForm,
    pub code_login: CodeLoginForm,
    pub register: RegisterForm,
    pub forgot: ForgotForm,

    login_errors: FieldErrors,
    register_errors: FieldErrors,
    forgot_errors: FieldErrors,

    pub countdown: Countdown<H>,
    pub qr: QrSession<H>,
    submitting: bool,
}

impl<H> PageState<H> {
    pub fn new() -> Self {
        Self {
            mode: AuthMode::Login,
            login_method: LoginMethod::Code,
            password_login: PasswordLoginForm::default(),
            code_login: CodeLoginForm::default(),
            register: RegisterForm::default(),
            forgot: ForgotForm::default(),
            login_errors: FieldErrors::new(),
            register_errors: FieldErrors::new(),
            forgot_errors: FieldErrors::new(),
            countdown: Countdown::new(),
            qr: QrSession::new(),
            submitting: false,
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn login_method(&self) -> LoginMethod {
        self.login_method
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn errors(&self, mode: AuthMode) -> &FieldErrors {
        match mode {
            AuthMode::Login => &self.login_errors,
            AuthMode::Register => &self.register_errors,
            AuthMode::Forgot => &self.forgot_errors,
        }
    }

    fn errors_mut(&mut self, mode: AuthMode) -> &mut FieldErrors {
        match mode {
            AuthMode::Login => &mut self.login_errors,
            AuthMode::Register => &mut self.register_errors,
            AuthMode::Forgot => &mut self.forgot_errors,
        }
    }

    pub fn field_error(&self, mode: AuthMode, name: FieldName) -> Option<String> {
        self.errors(mode).get(name).map(str::to_owned)
    }

    /// 切换表单
    ///
    /// 清空三张错误表；离开登录页时关闭扫码面板。
    pub fn switch_mode(&mut self, mode: AuthMode) {
        self.mode = mode;
        self.login_errors.clear();
        self.register_errors.clear();
        self.forgot_errors.clear();
        if mode != AuthMode::Login {
            self.qr.close();
        }
    }

    pub fn set_login_method(&mut self, method: LoginMethod) {
        if self.login_method != method {
            self.login_method = method;
            self.login_errors.clear();
        }
    }

    /// 用户修改字段时清除该字段的错误提示
    pub fn clear_field_error(&mut self, mode: AuthMode, name: FieldName) {
        self.errors_mut(mode).remove(name);
    }

    /// 校验当前表单
    ///
    /// 失败时把错误合并进当前表单的错误表并返回 `None`；
    /// 成功时进入提交中状态并返回请求。
    pub fn prepare_submit(&mut self, validator: &Validator) -> Option<SubmitPayload> {
        if self.submitting {
            return None;
        }
        let mode = self.mode;
        let (result, payload) = match mode {
            AuthMode::Login => match self.login_method {
                LoginMethod::Password => (
                    self.password_login.validate(validator),
                    SubmitPayload::PasswordLogin(self.password_login.to_request()),
                ),
                LoginMethod::Code => (
                    self.code_login.validate(validator),
                    SubmitPayload::CodeLogin(self.code_login.to_request()),
                ),
            },
            AuthMode::Register => (
                self.register.validate(validator),
                SubmitPayload::Register(self.register.to_request()),
            ),
            AuthMode::Forgot => (
                self.forgot.validate(validator),
                SubmitPayload::Reset(self.forgot.to_request()),
            ),
        };

        let errors = self.errors_mut(mode);
        if !result.is_valid {
            errors.merge(result.errors);
            return None;
        }
        errors.clear();
        self.submitting = true;
        Some(payload)
    }

    /// 提交结束（无论成败）
    pub fn finish_submit(&mut self, outcome: Option<&SubmitOutcome>) {
        self.submitting = false;
        match outcome {
            Some(SubmitOutcome::LoggedIn(_)) => {
                self.password_login.password.clear();
                self.code_login.code.clear();
                self.qr.close();
            }
            Some(SubmitOutcome::Registered) => {
                let phone = self.register.phone.trim().to_string();
                self.register = RegisterForm::default();
                self.password_login = PasswordLoginForm {
                    account: phone,
                    password: String::new(),
                };
                self.login_method = LoginMethod::Password;
                self.switch_mode(AuthMode::Login);
            }
            Some(SubmitOutcome::PasswordReset) => {
                self.forgot = ForgotForm::default();
                self.switch_mode(AuthMode::Login);
            }
            None => {}
        }
    }

    /// 当前表单中用于收取验证码的手机号
    pub fn code_phone(&self) -> &str {
        match self.mode {
            AuthMode::Login => &self.code_login.phone,
            AuthMode::Register => &self.register.phone,
            AuthMode::Forgot => &self.forgot.phone,
        }
    }

    /// 发送验证码前的检查
    ///
    /// 倒计时未结束或正在发送时直接拒绝；手机号不合法时写入错误表。
    pub fn prepare_send_code(&mut self, validator: &Validator) -> Option<SendCodeRequest> {
        if !self.countdown.can_send() {
            return None;
        }
        let mode = self.mode;
        let phone = self.code_phone().trim().to_string();
        let result = validator.validate_phone(&phone);
        if !result.is_valid {
            self.errors_mut(mode).merge(result.errors);
            return None;
        }
        self.errors_mut(mode).remove(field::PHONE);
        self.countdown.begin_send();
        Some(SendCodeRequest {
            phone,
            purpose: mode.code_purpose(),
        })
    }

    /// 组件卸载：取消所有定时器
    pub fn teardown(&mut self) {
        self.qr.close();
        self.countdown.cancel();
    }
}

impl<H> Default for PageState<H> {
    fn default() -> Self {
        Self::new()
    }
}
