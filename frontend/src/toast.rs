//! 消息提示
//!
//! 页面逻辑只依赖 [`Notifier`]，[`ToastContext`] 负责在右上角渲染并定时消失。

use leptos::prelude::*;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
    Info,
}

impl ToastLevel {
    fn alert_class(&self) -> &'static str {
        match self {
            ToastLevel::Success => "alert alert-success shadow-lg",
            ToastLevel::Error => "alert alert-error shadow-lg",
            ToastLevel::Info => "alert alert-info shadow-lg",
        }
    }
}

/// 即发即弃的提示服务
pub trait Notifier {
    fn notify(&self, level: ToastLevel, message: String);

    fn success(&self, message: impl Into<String>) {
        self.notify(ToastLevel::Success, message.into());
    }

    fn error(&self, message: impl Into<String>) {
        self.notify(ToastLevel::Error, message.into());
    }

    fn info(&self, message: impl Into<String>) {
        self.notify(ToastLevel::Info, message.into());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
}

#[derive(Clone, Copy)]
pub struct ToastContext {
    toasts: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
    duration: Duration,
}

impl ToastContext {
    pub fn new(duration: Duration) -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(0),
            duration,
        }
    }

    pub fn toasts(&self) -> ReadSignal<Vec<Toast>> {
        self.toasts.read_only()
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.try_update(|list| list.retain(|t| t.id != id));
    }
}

impl Notifier for ToastContext {
    fn notify(&self, level: ToastLevel, message: String) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        self.toasts.update(|list| list.push(Toast { id, level, message }));

        let ctx = *self;
        set_timeout(move || ctx.dismiss(id), self.duration);
    }
}

/// 从 Context 获取提示服务
pub fn use_toasts() -> ToastContext {
    use_context::<ToastContext>().expect("ToastContext should be provided")
}

/// 提示渲染区域，放在应用根部
#[component]
pub fn ToastHost() -> impl IntoView {
    let ctx = use_toasts();
    let toasts = ctx.toasts();

    view! {
        <div class="toast toast-top toast-end z-50">
            <For
                each=move || toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.level.alert_class() on:click=move |_| ctx.dismiss(id)>
                            <span>{toast.message}</span>
                        </div>
                    }
                }
            />
        </div>
    }
}
