//! 认证状态管理
//!
//! 会话只保存在内存中，刷新页面即失效。
//! 路由服务通过注入的认证信号检查状态，不直接依赖本模块。

use authdesk_shared::Session;
use leptos::prelude::*;

#[derive(Clone, Default, PartialEq)]
pub struct AuthState {
    pub session: Option<Session>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }
}

/// 认证上下文，通过 Context 在组件间共享
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: ReadSignal<AuthState>,
    set_state: WriteSignal<AuthState>,
}

impl AuthContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(AuthState::default());
        Self { state, set_state }
    }

    /// 认证状态信号（注入路由服务）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(AuthState::is_authenticated))
    }

    /// 保存登录结果；路由服务会监听到变化并跳转首页
    pub fn sign_in(&self, session: Session) {
        log_info!("[Auth] signed in as {}", session.user.username);
        self.set_state.set(AuthState {
            session: Some(session),
        });
    }

    pub fn sign_out(&self) {
        self.set_state.set(AuthState::default());
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}
