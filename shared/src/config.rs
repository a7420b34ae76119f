//! 页面运行时配置
//!
//! 所有字段都有默认值，可通过键值查找函数覆盖（前端在构建期注入）。

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::time::Duration;

// =========================================================
// 默认值
// =========================================================

pub const DEFAULT_APP_NAME: &str = "AuthDesk";
pub const DEFAULT_API_BASE: &str = "/api";
/// 中国大陆手机号
pub const DEFAULT_PHONE_PATTERN: &str = r"^1[3-9]\d{9}$";
pub const DEFAULT_CODE_LENGTH: usize = 6;
pub const DEFAULT_PASSWORD_MIN_LEN: usize = 6;
pub const DEFAULT_PASSWORD_MAX_LEN: usize = 20;
pub const DEFAULT_CODE_RESEND_SECS: u64 = 60;
pub const DEFAULT_QR_POLL_SECS: u64 = 2;
pub const DEFAULT_QR_EXPIRY_SECS: u64 = 5 * 60;
pub const DEFAULT_TOAST_SECS: u64 = 3;

// 覆盖项的键名
pub const KEY_APP_NAME: &str = "AUTHDESK_APP_NAME";
pub const KEY_API_BASE: &str = "AUTHDESK_API_BASE";
pub const KEY_PHONE_PATTERN: &str = "AUTHDESK_PHONE_PATTERN";
pub const KEY_CODE_RESEND_SECS: &str = "AUTHDESK_CODE_RESEND_SECS";
pub const KEY_QR_POLL_SECS: &str = "AUTHDESK_QR_POLL_SECS";
pub const KEY_QR_EXPIRY_SECS: &str = "AUTHDESK_QR_EXPIRY_SECS";

// =========================================================
// DurationSecs
// =========================================================

/// 以秒为单位的时长，序列化为整数
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DurationSecs(u64);

impl DurationSecs {
    #[inline]
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    #[inline]
    pub const fn as_secs(&self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn as_millis(&self) -> u64 {
        self.0 * 1000
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl From<DurationSecs> for Duration {
    fn from(d: DurationSecs) -> Self {
        Duration::from_secs(d.0)
    }
}

// =========================================================
// AuthConfig
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// 页面标题中显示的应用名
    pub app_name: String,
    /// 认证接口前缀
    pub api_base_url: String,
    pub phone_pattern: String,
    pub code_length: usize,
    pub password_min_len: usize,
    pub password_max_len: usize,
    /// 验证码重发冷却
    pub code_resend_interval: DurationSecs,
    pub qr_poll_interval: DurationSecs,
    pub qr_expiry: DurationSecs,
    pub toast_duration: DurationSecs,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            api_base_url: DEFAULT_API_BASE.to_string(),
            phone_pattern: DEFAULT_PHONE_PATTERN.to_string(),
            code_length: DEFAULT_CODE_LENGTH,
            password_min_len: DEFAULT_PASSWORD_MIN_LEN,
            password_max_len: DEFAULT_PASSWORD_MAX_LEN,
            code_resend_interval: DurationSecs::from_secs(DEFAULT_CODE_RESEND_SECS),
            qr_poll_interval: DurationSecs::from_secs(DEFAULT_QR_POLL_SECS),
            qr_expiry: DurationSecs::from_secs(DEFAULT_QR_EXPIRY_SECS),
            toast_duration: DurationSecs::from_secs(DEFAULT_TOAST_SECS),
        }
    }
}

impl AuthConfig {
    /// 从键值查找函数构建配置
    ///
    /// 查找不到的键、无法解析的数值、无法编译的正则都回退到默认值。
    /// 时长类覆盖必须大于零。
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let text = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let secs = |key: &str| {
            text(key)
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|v| *v > 0)
                .map(DurationSecs::from_secs)
        };

        if let Some(name) = text(KEY_APP_NAME) {
            config.app_name = name;
        }
        if let Some(base) = text(KEY_API_BASE) {
            config.api_base_url = base.trim_end_matches('/').to_string();
        }
        if let Some(pattern) = text(KEY_PHONE_PATTERN).filter(|p| Regex::new(p).is_ok()) {
            config.phone_pattern = pattern;
        }
        if let Some(d) = secs(KEY_CODE_RESEND_SECS) {
            config.code_resend_interval = d;
        }
        if let Some(d) = secs(KEY_QR_POLL_SECS) {
            config.qr_poll_interval = d;
        }
        if let Some(d) = secs(KEY_QR_EXPIRY_SECS) {
            config.qr_expiry = d;
        }
        config
    }
}
