//! 表单字段校验
//!
//! 纯函数，不依赖 DOM。每个检查返回 `Option<String>`（错误消息），
//! 由前端表单组合成 [`ValidationResult`]。

use crate::config::{
    AuthConfig, DEFAULT_CODE_LENGTH, DEFAULT_PASSWORD_MAX_LEN, DEFAULT_PASSWORD_MIN_LEN,
    DEFAULT_PHONE_PATTERN,
};
use regex::Regex;
use std::collections::BTreeMap;

pub type FieldName = &'static str;

/// 表单字段名
pub mod field {
    use super::FieldName;

    pub const ACCOUNT: FieldName = "account";
    pub const PASSWORD: FieldName = "password";
    pub const PHONE: FieldName = "phone";
    pub const CODE: FieldName = "code";
    pub const USERNAME: FieldName = "username";
    pub const CONFIRM_PASSWORD: FieldName = "confirm_password";
    pub const NEW_PASSWORD: FieldName = "new_password";
}

const USERNAME_PATTERN: &str = r"^[A-Za-z0-9_]{3,20}$";

// =========================================================
// 错误表
// =========================================================

/// 字段名 → 错误消息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<FieldName, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FieldName, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// 仅在检查失败时写入
    pub fn check(&mut self, field: FieldName, result: Option<String>) {
        if let Some(message) = result {
            self.insert(field, message);
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.0.remove(field)
    }

    /// 合并另一张错误表，同名字段以新消息为准
    pub fn merge(&mut self, other: FieldErrors) {
        self.0.extend(other.0);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: FieldErrors,
}

impl From<FieldErrors> for ValidationResult {
    fn from(errors: FieldErrors) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

// =========================================================
// Validator
// =========================================================

#[derive(Debug, Clone)]
pub struct Validator {
    phone: Regex,
    username: Regex,
    code_length: usize,
    password_min_len: usize,
    password_max_len: usize,
}

impl Validator {
    pub fn new(config: &AuthConfig) -> Result<Self, regex::Error> {
        Ok(Self {
            phone: Regex::new(&config.phone_pattern)?,
            username: Regex::new(USERNAME_PATTERN)?,
            code_length: config.code_length,
            password_min_len: config.password_min_len,
            password_max_len: config.password_max_len,
        })
    }

    pub fn check_required(&self, value: &str, message: &str) -> Option<String> {
        value.trim().is_empty().then(|| message.to_string())
    }

    pub fn check_account(&self, account: &str) -> Option<String> {
        self.check_required(account, "请输入账号或手机号")
    }

    pub fn check_phone(&self, phone: &str) -> Option<String> {
        let phone = phone.trim();
        if phone.is_empty() {
            return Some("请输入手机号".to_string());
        }
        (!self.phone.is_match(phone)).then(|| "手机号格式不正确".to_string())
    }

    pub fn check_code(&self, code: &str) -> Option<String> {
        let code = code.trim();
        if code.is_empty() {
            return Some("请输入验证码".to_string());
        }
        let well_formed =
            code.chars().count() == self.code_length && code.chars().all(|c| c.is_ascii_digit());
        (!well_formed).then(|| format!("验证码为{}位数字", self.code_length))
    }

    pub fn check_username(&self, username: &str) -> Option<String> {
        let username = username.trim();
        if username.is_empty() {
            return Some("请输入用户名".to_string());
        }
        (!self.username.is_match(username))
            .then(|| "用户名为3-20位字母、数字或下划线".to_string())
    }

    /// 密码不做 trim，空格也算字符
    pub fn check_password(&self, password: &str) -> Option<String> {
        if password.is_empty() {
            return Some("请输入密码".to_string());
        }
        let len = password.chars().count();
        (len < self.password_min_len || len > self.password_max_len).then(|| {
            format!(
                "密码长度为{}-{}位",
                self.password_min_len, self.password_max_len
            )
        })
    }

    pub fn check_confirm(&self, password: &str, confirm: &str) -> Option<String> {
        if confirm.is_empty() {
            return Some("请再次输入密码".to_string());
        }
        (password != confirm).then(|| "两次输入的密码不一致".to_string())
    }

    /// 发送验证码前的手机号校验
    pub fn validate_phone(&self, phone: &str) -> ValidationResult {
        let mut errors = FieldErrors::new();
        errors.check(field::PHONE, self.check_phone(phone));
        errors.into()
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            phone: Regex::new(DEFAULT_PHONE_PATTERN).expect("default phone pattern compiles"),
            username: Regex::new(USERNAME_PATTERN).expect("username pattern compiles"),
            code_length: DEFAULT_CODE_LENGTH,
            password_min_len: DEFAULT_PASSWORD_MIN_LEN,
            password_max_len: DEFAULT_PASSWORD_MAX_LEN,
        }
    }
}
