use authdesk_shared::validation::field;
use leptos::prelude::*;

use super::auth_page::PageController;
use super::fields::{CodeField, ModeLink, SubmitButton, TextField};
use super::icons::QrCode;
use super::qr_panel::QrPanel;
use crate::page::mode::{AuthMode, LoginMethod};

const MODE: AuthMode = AuthMode::Login;

#[component]
fn MethodTabs(ctrl: PageController) -> impl IntoView {
    let method = ctrl.login_method();
    let tab = move |m: LoginMethod| {
        view! {
            <button
                type="button"
                role="tab"
                class=move || if method.get() == m { "tab tab-active" } else { "tab" }
                on:click=move |_| ctrl.set_login_method(m)
            >
                {m.label()}
            </button>
        }
    };

    view! {
        <div role="tablist" class="tabs tabs-boxed mb-2">
            {tab(LoginMethod::Code)}
            {tab(LoginMethod::Password)}
        </div>
    }
}

#[component]
fn CodeLoginFields(ctrl: PageController) -> impl IntoView {
    view! {
        <TextField
            ctrl=ctrl
            mode=MODE
            name=field::PHONE
            label="手机号"
            placeholder="请输入手机号"
            input_type="tel"
            read=|p| p.code_login.phone.clone()
            write=|p, v| p.code_login.phone = v
        />
        <CodeField
            ctrl=ctrl
            mode=MODE
            name=field::CODE
            read=|p| p.code_login.code.clone()
            write=|p, v| p.code_login.code = v
        />
    }
}

#[component]
fn PasswordLoginFields(ctrl: PageController) -> impl IntoView {
    view! {
        <TextField
            ctrl=ctrl
            mode=MODE
            name=field::ACCOUNT
            label="账号"
            placeholder="用户名或手机号"
            read=|p| p.password_login.account.clone()
            write=|p, v| p.password_login.account = v
        />
        <TextField
            ctrl=ctrl
            mode=MODE
            name=field::PASSWORD
            label="密码"
            placeholder="请输入密码"
            input_type="password"
            read=|p| p.password_login.password.clone()
            write=|p, v| p.password_login.password = v
        />
    }
}

/// 登录表单；扫码面板打开时替换账号登录区域
#[component]
pub fn LoginPanel(ctrl: PageController) -> impl IntoView {
    let method = ctrl.login_method();
    let page = ctrl.page;
    let qr_visible = Memo::new(move |_| page.with(|p| p.qr.is_visible()));

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        ctrl.submit();
    };

    view! {
        <Show when=move || !qr_visible.get() fallback=move || view! { <QrPanel ctrl=ctrl /> }>
            <MethodTabs ctrl=ctrl />
            <form on:submit=on_submit>
                {move || match method.get() {
                    LoginMethod::Code => view! { <CodeLoginFields ctrl=ctrl /> }.into_any(),
                    LoginMethod::Password => view! { <PasswordLoginFields ctrl=ctrl /> }.into_any(),
                }}
                <SubmitButton ctrl=ctrl mode=MODE />
            </form>

            <div class="flex justify-between mt-2">
                <ModeLink ctrl=ctrl target=AuthMode::Forgot label="忘记密码？" />
                <ModeLink ctrl=ctrl target=AuthMode::Register label="注册账号" />
            </div>

            <div class="divider text-sm text-base-content/60">"其他登录方式"</div>
            <button type="button" class="btn btn-outline btn-success w-full gap-2" on:click=move |_| ctrl.open_qr()>
                <QrCode attr:class="h-5 w-5" />
                "微信扫码登录"
            </button>
        </Show>
    }
}
