//! 认证页面
//!
//! `PageState` 放在一个本地信号里（定时器句柄不是 `Send`），
//! 所有副作用都经由 [`PageController`] 发起：
//! - 提交与发送验证码交给 `AuthFlow`
//! - 定时器通过 `WebScheduler` 创建，句柄归 `PageState` 所有
//! - 组件卸载时 `teardown` 取消全部定时器

use authdesk_shared::validation::FieldName;
use authdesk_shared::{AuthConfig, Validator};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::AuthApi;
use crate::auth::{AuthContext, use_auth};
use crate::components::forgot_form::ForgotPanel;
use crate::components::icons::ShieldCheck;
use crate::components::login_form::LoginPanel;
use crate::components::register_form::RegisterPanel;
use crate::flow::AuthFlow;
use crate::page::mode::{AuthMode, LoginMethod};
use crate::page::qr::QrTiming;
use crate::page::{PageState, SubmitOutcome};
use crate::toast::{Notifier, ToastContext, use_toasts};
use crate::web::{Timer, WebScheduler};

pub type Page = RwSignal<PageState<Timer>, LocalStorage>;
type Flow = AuthFlow<AuthApi, ToastContext>;

/// 读取 / 写入某个表单字段
pub type Reader = fn(&PageState<Timer>) -> String;
pub type Writer = fn(&mut PageState<Timer>, String);

#[derive(Clone, Copy)]
pub struct PageController {
    pub page: Page,
    flow: StoredValue<Flow>,
    validator: StoredValue<Validator>,
    config: StoredValue<AuthConfig>,
    auth: AuthContext,
}

impl PageController {
    pub fn new(
        api: AuthApi,
        toasts: ToastContext,
        validator: Validator,
        config: AuthConfig,
        auth: AuthContext,
    ) -> Self {
        Self {
            page: RwSignal::new_local(PageState::new()),
            flow: StoredValue::new(AuthFlow::new(api, toasts)),
            validator: StoredValue::new(validator),
            config: StoredValue::new(config),
            auth,
        }
    }

    pub fn mode(&self) -> Memo<AuthMode> {
        let page = self.page;
        Memo::new(move |_| page.with(|p| p.mode()))
    }

    pub fn login_method(&self) -> Memo<LoginMethod> {
        let page = self.page;
        Memo::new(move |_| page.with(|p| p.login_method()))
    }

    pub fn field_value(&self, read: Reader) -> Memo<String> {
        let page = self.page;
        Memo::new(move |_| page.with(read))
    }

    pub fn field_error(&self, mode: AuthMode, name: FieldName) -> Memo<Option<String>> {
        let page = self.page;
        Memo::new(move |_| page.with(|p| p.field_error(mode, name)))
    }

    pub fn switch_mode(&self, mode: AuthMode) {
        self.page.update(|p| p.switch_mode(mode));
    }

    pub fn set_login_method(&self, method: LoginMethod) {
        self.page.update(|p| p.set_login_method(method));
    }

    /// 用户输入：写入字段并清除该字段的错误
    pub fn edit(&self, mode: AuthMode, name: FieldName, write: Writer, value: String) {
        self.page.update(|p| {
            write(p, value);
            p.clear_field_error(mode, name);
        });
    }

    pub fn submit(&self) {
        let ctrl = *self;
        let payload = self
            .validator
            .with_value(|v| self.page.try_update(|p| p.prepare_submit(v)))
            .flatten();
        let Some(payload) = payload else {
            return;
        };

        let flow = self.flow.get_value();
        spawn_local(async move {
            let outcome = flow.submit(payload).await;
            ctrl.page.try_update(|p| p.finish_submit(outcome.as_ref()));
            if let Some(SubmitOutcome::LoggedIn(session)) = outcome {
                ctrl.auth.sign_in(session);
            }
        });
    }

    pub fn send_code(&self) {
        let ctrl = *self;
        let req = self
            .validator
            .with_value(|v| self.page.try_update(|p| p.prepare_send_code(v)))
            .flatten();
        let Some(req) = req else {
            return;
        };

        let flow = self.flow.get_value();
        let resend = self.config.with_value(|c| c.code_resend_interval);
        spawn_local(async move {
            let sent = flow.send_code(req).await;
            ctrl.page.try_update(|p| {
                if sent {
                    let on_tick = Box::new(move || {
                        ctrl.page.try_update(|p| {
                            p.countdown.tick();
                        });
                    });
                    p.countdown.start(&WebScheduler, resend, on_tick);
                } else {
                    p.countdown.abort_send();
                }
            });
        });
    }

    /// 打开或刷新扫码面板
    pub fn open_qr(&self) {
        let ctrl = *self;
        let timing = self.config.with_value(|c| QrTiming::from(c));
        let generation = self.page.try_update(|p| {
            p.qr.open(
                &WebScheduler,
                timing,
                Box::new(move || ctrl.poll_qr()),
                Box::new(move || {
                    log_info!("[QR] code expired");
                    ctrl.page.try_update(|p| p.qr.expire());
                }),
            )
        });
        let Some(generation) = generation else {
            return;
        };

        let flow = self.flow.get_value();
        spawn_local(async move {
            match flow.request_qr().await {
                Some(ticket) => {
                    ctrl.page.try_update(|p| p.qr.attach_ticket(generation, ticket));
                }
                None => {
                    ctrl.page.try_update(|p| p.qr.fail(generation));
                }
            }
        });
    }

    pub fn close_qr(&self) {
        self.page.update(|p| p.qr.close());
    }

    fn poll_qr(&self) {
        let ctrl = *self;
        let Some(flow) = self.flow.try_get_value() else {
            return;
        };
        // 票据还没到或上一次轮询未返回，等下一个 tick
        let Some((generation, ticket)) = self
            .page
            .try_update_untracked(|p| p.qr.begin_poll())
            .flatten()
        else {
            return;
        };

        spawn_local(async move {
            let status = flow.poll_qr(ticket).await;
            let confirmed = ctrl
                .page
                .try_update(|p| {
                    p.qr.end_poll(generation);
                    status.and_then(|s| p.qr.apply_status(generation, s))
                })
                .flatten();
            if let Some(session) = confirmed {
                flow.notifier()
                    .success(format!("欢迎回来，{}", session.user.username));
                ctrl.auth.sign_in(session);
            }
        });
    }

    pub fn teardown(&self) {
        self.page.try_update_untracked(|p| p.teardown());
    }
}

#[component]
pub fn AuthPage() -> impl IntoView {
    let config = use_context::<AuthConfig>().expect("AuthConfig should be provided");
    let validator = use_context::<Validator>().expect("Validator should be provided");
    let api = use_context::<AuthApi>().expect("AuthApi should be provided");
    let app_name = config.app_name.clone();

    let ctrl = PageController::new(api, use_toasts(), validator, config, use_auth());
    on_cleanup(move || ctrl.teardown());

    let mode = ctrl.mode();

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <ShieldCheck attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">{app_name}</h1>
                        <p class="text-base-content/70">{move || mode.get().title()}</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <div class="card-body">
                        {move || match mode.get() {
                            AuthMode::Login => view! { <LoginPanel ctrl=ctrl /> }.into_any(),
                            AuthMode::Register => view! { <RegisterPanel ctrl=ctrl /> }.into_any(),
                            AuthMode::Forgot => view! { <ForgotPanel ctrl=ctrl /> }.into_any(),
                        }}
                    </div>
                </div>
            </div>
        </div>
    }
}
