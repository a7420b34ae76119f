//! 路由定义模块 - 领域模型
//!
//! 纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录 / 注册 / 找回密码 (默认路由)
    #[default]
    Auth,
    /// 登录后的首页
    Home,
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "" | "/login" | "/auth" => Self::Auth,
            "/home" => Self::Home,
            _ => Self::NotFound,
        }
    }

    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Auth => "/",
            Self::Home => "/home",
            Self::NotFound => "/404",
        }
    }

    /// 该路由是否需要登录
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Home)
    }

    /// 已登录用户是否应离开此路由
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Auth)
    }

    /// **守卫：根据认证状态决定实际落地的路由**
    pub fn resolve(self, is_authenticated: bool) -> Self {
        if self.requires_auth() && !is_authenticated {
            Self::Auth
        } else if self.should_redirect_when_authenticated() && is_authenticated {
            Self::Home
        } else {
            self
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}
