use authdesk_shared::AuthConfig;
use leptos::prelude::*;

use super::icons::{Logout, ShieldCheck};
use crate::auth::use_auth;
use crate::toast::{Notifier, use_toasts};

/// 登录后的落地页
#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();
    let app_name = use_context::<AuthConfig>()
        .map(|c| c.app_name)
        .unwrap_or_default();

    let user = move || auth.state.with(|s| s.session.as_ref().map(|s| s.user.clone()));
    let username = move || user().map(|u| u.username).unwrap_or_default();
    let phone = move || user().and_then(|u| u.phone);

    let on_logout = move |_| {
        auth.sign_out();
        toasts.info("已退出登录");
    };

    view! {
        <div class="min-h-screen bg-base-200">
            <div class="navbar bg-base-100 shadow-sm px-4">
                <div class="flex-1 gap-2">
                    <ShieldCheck attr:class="h-6 w-6 text-primary" />
                    <span class="text-xl font-bold">{app_name}</span>
                </div>
                <div class="flex-none">
                    <button class="btn btn-ghost btn-sm gap-2" on:click=on_logout>
                        <Logout attr:class="h-4 w-4" />
                        "退出登录"
                    </button>
                </div>
            </div>

            <div class="container mx-auto p-6">
                <div class="card bg-base-100 shadow-xl max-w-lg mx-auto">
                    <div class="card-body">
                        <h2 class="card-title">{move || format!("欢迎，{}", username())}</h2>
                        {move || phone().map(|p| view! { <p class="text-base-content/70">"手机号：" {p}</p> })}
                    </div>
                </div>
            </div>
        </div>
    }
}
