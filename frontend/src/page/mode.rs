use authdesk_shared::CodePurpose;

/// 页面当前显示的表单，三者互斥
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
    Forgot,
}

impl AuthMode {
    pub fn title(&self) -> &'static str {
        match self {
            AuthMode::Login => "登录",
            AuthMode::Register => "注册账号",
            AuthMode::Forgot => "找回密码",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            AuthMode::Login => "登录",
            AuthMode::Register => "注册",
            AuthMode::Forgot => "重置密码",
        }
    }

    /// 该表单发送验证码时的用途
    pub fn code_purpose(&self) -> CodePurpose {
        match self {
            AuthMode::Login => CodePurpose::Login,
            AuthMode::Register => CodePurpose::Register,
            AuthMode::Forgot => CodePurpose::Reset,
        }
    }
}

/// 登录方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginMethod {
    #[default]
    Code,
    Password,
}

impl LoginMethod {
    pub fn label(&self) -> &'static str {
        match self {
            LoginMethod::Code => "验证码登录",
            LoginMethod::Password => "密码登录",
        }
    }
}
