//! 表单字段组件
//!
//! 字段的值和错误都从 `PageState` 派生为 Memo，
//! 只有真正变化时才触发 DOM 更新。

use authdesk_shared::validation::FieldName;
use leptos::prelude::*;

use super::auth_page::{PageController, Reader, Writer};
use crate::page::mode::AuthMode;

fn input_class(has_error: bool, extra: &'static str) -> String {
    if has_error {
        format!("input input-bordered input-error {extra}")
    } else {
        format!("input input-bordered {extra}")
    }
}

#[component]
fn FieldError(error: Memo<Option<String>>) -> impl IntoView {
    move || {
        error.get().map(|msg| {
            view! {
                <label class="label">
                    <span class="label-text-alt text-error">{msg}</span>
                </label>
            }
        })
    }
}

#[component]
pub fn TextField(
    ctrl: PageController,
    mode: AuthMode,
    name: FieldName,
    label: &'static str,
    placeholder: &'static str,
    #[prop(default = "text")] input_type: &'static str,
    read: Reader,
    write: Writer,
) -> impl IntoView {
    let value = ctrl.field_value(read);
    let error = ctrl.field_error(mode, name);

    view! {
        <div class="form-control">
            <label class="label" for=name>
                <span class="label-text">{label}</span>
            </label>
            <input
                id=name
                type=input_type
                placeholder=placeholder
                on:input=move |ev| ctrl.edit(mode, name, write, event_target_value(&ev))
                prop:value=move || value.get()
                class=move || input_class(error.with(Option::is_some), "")
            />
            <FieldError error=error />
        </div>
    }
}

/// 验证码输入框 + 发送按钮
///
/// 倒计时在三个表单之间共享，按钮状态随之同步。
#[component]
pub fn CodeField(
    ctrl: PageController,
    mode: AuthMode,
    name: FieldName,
    read: Reader,
    write: Writer,
) -> impl IntoView {
    let value = ctrl.field_value(read);
    let error = ctrl.field_error(mode, name);
    let page = ctrl.page;
    let can_send = Memo::new(move |_| page.with(|p| p.countdown.can_send()));
    let button_label = Memo::new(move |_| page.with(|p| p.countdown.label()));

    view! {
        <div class="form-control">
            <label class="label" for=name>
                <span class="label-text">"验证码"</span>
            </label>
            <div class="join w-full">
                <input
                    id=name
                    type="text"
                    inputmode="numeric"
                    placeholder="请输入验证码"
                    on:input=move |ev| ctrl.edit(mode, name, write, event_target_value(&ev))
                    prop:value=move || value.get()
                    class=move || input_class(error.with(Option::is_some), "join-item w-full")
                />
                <button
                    type="button"
                    class="btn btn-outline join-item min-w-32"
                    disabled=move || !can_send.get()
                    on:click=move |_| ctrl.send_code()
                >
                    {move || button_label.get()}
                </button>
            </div>
            <FieldError error=error />
        </div>
    }
}

#[component]
pub fn SubmitButton(ctrl: PageController, mode: AuthMode) -> impl IntoView {
    let page = ctrl.page;
    let submitting = Memo::new(move |_| page.with(|p| p.is_submitting()));

    view! {
        <div class="form-control mt-6">
            <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                {move || if submitting.get() {
                    view! { <span class="loading loading-spinner"></span> "处理中..." }.into_any()
                } else {
                    mode.submit_label().into_any()
                }}
            </button>
        </div>
    }
}

/// 切换到另一个表单的文字链接
#[component]
pub fn ModeLink(ctrl: PageController, target: AuthMode, label: &'static str) -> impl IntoView {
    view! {
        <button type="button" class="link link-hover link-primary text-sm" on:click=move |_| ctrl.switch_mode(target)>
            {label}
        </button>
    }
}
