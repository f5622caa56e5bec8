//! 查询定义

use arx_cqrs_core::Query;

/// 授权：校验请求携带的令牌，返回 subject
#[derive(Debug, Clone)]
pub struct AuthorizeQuery {
    pub authorization: Option<String>,
}

impl Query for AuthorizeQuery {
    type Result = String;
}
