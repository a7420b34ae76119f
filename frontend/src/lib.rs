//! AuthDesk 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `page`: 页面状态（纯逻辑，可在原生环境测试）
//! - `flow`: 认证流程，连接后端与提示
//! - `web::route` / `web::router`: 路由定义与路由服务
//! - `auth`: 会话状态
//! - `components`: UI 组件层

// =========================================================
// 日志宏
// =========================================================

#[cfg(target_arch = "wasm32")]
macro_rules! log_info {
    ($($t:tt)*) => (web_sys::console::log_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_info {
    ($($t:tt)*) => (println!($($t)*))
}

#[cfg(target_arch = "wasm32")]
macro_rules! log_warn {
    ($($t:tt)*) => (web_sys::console::warn_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_warn {
    ($($t:tt)*) => (eprintln!($($t)*))
}

#[cfg(target_arch = "wasm32")]
macro_rules! log_error {
    ($($t:tt)*) => (web_sys::console::error_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_error {
    ($($t:tt)*) => (eprintln!($($t)*))
}

mod api;
mod auth;
mod error;
mod flow;
mod page;
mod toast;
mod components {
    pub mod auth_page;
    mod fields;
    mod forgot_form;
    pub mod home;
    mod icons;
    mod login_form;
    mod qr_panel;
    mod register_form;
}

use authdesk_shared::config::{
    KEY_API_BASE, KEY_APP_NAME, KEY_CODE_RESEND_SECS, KEY_PHONE_PATTERN, KEY_QR_EXPIRY_SECS,
    KEY_QR_POLL_SECS,
};
use authdesk_shared::{AuthConfig, Validator};
use leptos::prelude::*;

use crate::api::AuthApi;
use crate::auth::AuthContext;
use crate::components::auth_page::AuthPage;
use crate::components::home::HomePage;
use crate::toast::{ToastContext, ToastHost};

// 原生 Web API 封装模块
// 对 fetch / History / 定时器的轻量封装，替代 gloo-* 系列 crate
pub(crate) mod web {
    mod http;
    pub mod route;
    pub mod router;
    mod timer;

    pub use http::{HttpClient, HttpError, HttpResponse};
    pub use timer::{Timer, WebScheduler};
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 构建时注入的配置（`AUTHDESK_*` 环境变量）
fn build_time_var(key: &str) -> Option<String> {
    let value = match key {
        KEY_APP_NAME => option_env!("AUTHDESK_APP_NAME"),
        KEY_API_BASE => option_env!("AUTHDESK_API_BASE"),
        KEY_PHONE_PATTERN => option_env!("AUTHDESK_PHONE_PATTERN"),
        KEY_CODE_RESEND_SECS => option_env!("AUTHDESK_CODE_RESEND_SECS"),
        KEY_QR_POLL_SECS => option_env!("AUTHDESK_QR_POLL_SECS"),
        KEY_QR_EXPIRY_SECS => option_env!("AUTHDESK_QR_EXPIRY_SECS"),
        _ => None,
    };
    value.map(str::to_string)
}

fn load_config() -> AuthConfig {
    AuthConfig::from_lookup(build_time_var)
}

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Auth => view! { <AuthPage /> }.into_any(),
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"页面未找到"</p>
                    <a class="btn btn-primary mt-6" href="/">"返回登录"</a>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 配置与校验器
    let config = load_config();
    let validator = Validator::new(&config).unwrap_or_else(|e| {
        log_error!(
            "[App] invalid phone pattern {:?}, using default: {}",
            config.phone_pattern,
            e
        );
        Validator::default()
    });

    // 2. 共享服务
    let auth_ctx = AuthContext::new();
    provide_context(AuthApi::new(config.api_base_url.clone()));
    provide_context(ToastContext::new(config.toast_duration.into()));
    provide_context(auth_ctx);
    provide_context(validator);
    provide_context(config);

    // 3. 认证信号注入路由服务
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        <Router is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
        <ToastHost />
    }
}
