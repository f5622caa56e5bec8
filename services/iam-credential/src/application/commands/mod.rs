//! 命令定义

use arx_cqrs_core::Command;
use serde::Serialize;

/// 注册新用户
#[derive(Debug, Clone)]
pub struct RegisterCommand {
    pub username: String,
    pub password: String,
}

impl Command for RegisterCommand {
    type Result = AuthResponse;
}

/// 用户名密码登录
#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub username: String,
    pub password: String,
}

impl Command for LoginCommand {
    type Result = AuthResponse;
}

/// 登出：撤销请求携带的令牌
///
/// 输入是原始的 Authorization 头（可能缺失）。
#[derive(Debug, Clone)]
pub struct LogoutCommand {
    pub authorization: Option<String>,
}

impl Command for LogoutCommand {
    type Result = ();
}

/// 注册/登录成功的返回
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub user_id: String,
    pub token: String,
}
