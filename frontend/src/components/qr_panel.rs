//! 微信扫码登录面板

use leptos::prelude::*;

use super::auth_page::PageController;

#[component]
pub fn QrPanel(ctrl: PageController) -> impl IntoView {
    let page = ctrl.page;
    let phase = Memo::new(move |_| page.with(|p| p.qr.phase()));
    let image = Memo::new(move |_| page.with(|p| p.qr.image().to_string()));
    let expired = Memo::new(move |_| page.with(|p| p.qr.is_expired()));
    let scanned = Memo::new(move |_| page.with(|p| p.qr.is_scanned()));

    view! {
        <div class="flex flex-col items-center gap-4 py-2">
            <h2 class="text-lg font-semibold">"微信扫码登录"</h2>
            <div class="relative">
                <img
                    src=move || image.get()
                    alt="登录二维码"
                    class=move || if expired.get() {
                        "w-48 h-48 rounded-lg border border-base-300 opacity-20"
                    } else {
                        "w-48 h-48 rounded-lg border border-base-300"
                    }
                />
                <Show when=move || expired.get()>
                    <div class="absolute inset-0 flex items-center justify-center">
                        <button type="button" class="btn btn-primary btn-sm" on:click=move |_| ctrl.open_qr()>
                            "刷新二维码"
                        </button>
                    </div>
                </Show>
            </div>
            <p class=move || if scanned.get() { "text-success text-sm" } else { "text-base-content/70 text-sm" }>
                {move || phase.get().hint()}
            </p>
            <div class="flex gap-2">
                <button type="button" class="btn btn-ghost btn-sm" on:click=move |_| ctrl.open_qr()>
                    "刷新"
                </button>
                <button type="button" class="btn btn-ghost btn-sm" on:click=move |_| ctrl.close_qr()>
                    "返回账号登录"
                </button>
            </div>
        </div>
    }
}
