use authdesk_shared::validation::field;
use leptos::prelude::*;

use super::auth_page::PageController;
use super::fields::{CodeField, ModeLink, SubmitButton, TextField};
use crate::page::mode::AuthMode;

const MODE: AuthMode = AuthMode::Forgot;

#[component]
pub fn ForgotPanel(ctrl: PageController) -> impl IntoView {
    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        ctrl.submit();
    };

    view! {
        <form on:submit=on_submit>
            <TextField
                ctrl=ctrl
                mode=MODE
                name=field::PHONE
                label="手机号"
                placeholder="请输入注册时使用的手机号"
                input_type="tel"
                read=|p| p.forgot.phone.clone()
                write=|p, v| p.forgot.phone = v
            />
            <CodeField
                ctrl=ctrl
                mode=MODE
                name=field::CODE
                read=|p| p.forgot.code.clone()
                write=|p, v| p.forgot.code = v
            />
            <TextField
                ctrl=ctrl
                mode=MODE
                name=field::NEW_PASSWORD
                label="新密码"
                placeholder="请输入新密码"
                input_type="password"
                read=|p| p.forgot.new_password.clone()
                write=|p, v| p.forgot.new_password = v
            />
            <TextField
                ctrl=ctrl
                mode=MODE
                name=field::CONFIRM_PASSWORD
                label="确认新密码"
                placeholder="请再次输入新密码"
                input_type="password"
                read=|p| p.forgot.confirm_password.clone()
                write=|p, v| p.forgot.confirm_password = v
            />
            <SubmitButton ctrl=ctrl mode=MODE />
        </form>

        <div class="text-center mt-2">
            <ModeLink ctrl=ctrl target=AuthMode::Login label="返回登录" />
        </div>
    }
}
