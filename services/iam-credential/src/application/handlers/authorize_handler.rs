//! 授权处理器

use std::sync::Arc;

use arx_auth_core::{TokenBlacklist, TokenService};
use arx_cqrs_core::QueryHandler;
use arx_errors::{AppError, AppResult};
use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use crate::application::bearer::extract_bearer;
use crate::application::queries::AuthorizeQuery;
use crate::infrastructure::observability;

pub struct AuthorizeHandler {
    tokens: Arc<TokenService>,
    blacklist: Arc<TokenBlacklist>,
}

impl AuthorizeHandler {
    pub fn new(tokens: Arc<TokenService>, blacklist: Arc<TokenBlacklist>) -> Self {
        Self { tokens, blacklist }
    }
}

#[async_trait]
impl QueryHandler<AuthorizeQuery> for AuthorizeHandler {
    async fn handle(&self, query: AuthorizeQuery) -> AppResult<String> {
        let token = extract_bearer(query.authorization.as_deref())?;

        if self.blacklist.is_revoked(token) {
            observability::record_authorization(false);
            return Err(AppError::unauthorized("Authorization token is revoked"));
        }

        let parsed = self.tokens.parse(token).map_err(|e| {
            observability::record_authorization(false);
            AppError::unauthorized(format!("Invalid authorization token: {}", e))
        })?;

        // 过期强制不只依赖解码器内部的时钟处理，这里再复查一次
        if parsed.expires_at <= Utc::now() {
            observability::record_authorization(false);
            return Err(AppError::unauthorized("Authorization token expired"));
        }

        observability::record_authorization(true);
        debug!(subject = %parsed.subject, "Token authorized");
        Ok(parsed.subject)
    }
}
