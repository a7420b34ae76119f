use authdesk_shared::validation::field;
use leptos::prelude::*;

use super::auth_page::PageController;
use super::fields::{CodeField, ModeLink, SubmitButton, TextField};
use crate::page::mode::AuthMode;

const MODE: AuthMode = AuthMode::Register;

#[component]
pub fn RegisterPanel(ctrl: PageController) -> impl IntoView {
    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        ctrl.submit();
    };

    view! {
        <form on:submit=on_submit>
            <TextField
                ctrl=ctrl
                mode=MODE
                name=field::USERNAME
                label="用户名"
                placeholder="3-20 位字母、数字或下划线"
                read=|p| p.register.username.clone()
                write=|p, v| p.register.username = v
            />
            <TextField
                ctrl=ctrl
                mode=MODE
                name=field::PHONE
                label="手机号"
                placeholder="请输入手机号"
                input_type="tel"
                read=|p| p.register.phone.clone()
                write=|p, v| p.register.phone = v
            />
            <CodeField
                ctrl=ctrl
                mode=MODE
                name=field::CODE
                read=|p| p.register.code.clone()
                write=|p, v| p.register.code = v
            />
            <TextField
                ctrl=ctrl
                mode=MODE
                name=field::PASSWORD
                label="密码"
                placeholder="请输入密码"
                input_type="password"
                read=|p| p.register.password.clone()
                write=|p, v| p.register.password = v
            />
            <TextField
                ctrl=ctrl
                mode=MODE
                name=field::CONFIRM_PASSWORD
                label="确认密码"
                placeholder="请再次输入密码"
                input_type="password"
                read=|p| p.register.confirm_password.clone()
                write=|p, v| p.register.confirm_password = v
            />
            <SubmitButton ctrl=ctrl mode=MODE />
        </form>

        <div class="text-center mt-2 text-sm">
            "已有账号？"
            <ModeLink ctrl=ctrl target=AuthMode::Login label="去登录" />
        </div>
    }
}
