//! 表单记录
//!
//! 每个表单负责：
//! - 组合字段校验，产出 `ValidationResult`
//! - 转换为 trim 后的请求对象

use authdesk_shared::validation::field;
use authdesk_shared::{
    CodeLoginRequest, FieldErrors, PasswordLoginRequest, RegisterRequest, ResetPasswordRequest,
    ValidationResult, Validator,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordLoginForm {
    pub account: String,
    pub password: String,
}

impl PasswordLoginForm {
    pub fn validate(&self, v: &Validator) -> ValidationResult {
        let mut errors = FieldErrors::new();
        errors.check(field::ACCOUNT, v.check_account(&self.account));
        errors.check(
            field::PASSWORD,
            v.check_required(&self.password, "请输入密码"),
        );
        errors.into()
    }

    pub fn to_request(&self) -> PasswordLoginRequest {
        PasswordLoginRequest {
            account: self.account.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeLoginForm {
    pub phone: String,
    pub code: String,
}

impl CodeLoginForm {
    pub fn validate(&self, v: &Validator) -> ValidationResult {
        let mut errors = FieldErrors::new();
        errors.check(field::PHONE, v.check_phone(&self.phone));
        errors.check(field::CODE, v.check_code(&self.code));
        errors.into()
    }

    pub fn to_request(&self) -> CodeLoginRequest {
        CodeLoginRequest {
            phone: self.phone.trim().to_string(),
            code: self.code.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub username: String,
    pub phone: String,
    pub code: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn validate(&self, v: &Validator) -> ValidationResult {
        let mut errors = FieldErrors::new();
        errors.check(field::USERNAME, v.check_username(&self.username));
        errors.check(field::PHONE, v.check_phone(&self.phone));
        errors.check(field::CODE, v.check_code(&self.code));
        errors.check(field::PASSWORD, v.check_password(&self.password));
        errors.check(
            field::CONFIRM_PASSWORD,
            v.check_confirm(&self.password, &self.confirm_password),
        );
        errors.into()
    }

    pub fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            username: self.username.trim().to_string(),
            phone: self.phone.trim().to_string(),
            code: self.code.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForgotForm {
    pub phone: String,
    pub code: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl ForgotForm {
    pub fn validate(&self, v: &Validator) -> ValidationResult {
        let mut errors = FieldErrors::new();
        errors.check(field::PHONE, v.check_phone(&self.phone));
        errors.check(field::CODE, v.check_code(&self.code));
        errors.check(field::NEW_PASSWORD, v.check_password(&self.new_password));
        errors.check(
            field::CONFIRM_PASSWORD,
            v.check_confirm(&self.new_password, &self.confirm_password),
        );
        errors.into()
    }

    pub fn to_request(&self) -> ResetPasswordRequest {
        ResetPasswordRequest {
            phone: self.phone.trim().to_string(),
            code: self.code.trim().to_string(),
            new_password: self.new_password.clone(),
        }
    }
}
