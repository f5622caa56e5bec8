//! IAM Credential Service
//!
//! 凭据签发、校验与撤销：注册 / 登录 / 登出 / 授权

pub mod application;
pub mod domain;
pub mod infrastructure;
