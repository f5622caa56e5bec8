//! 登出处理器

use std::sync::Arc;

use arx_auth_core::{TokenBlacklist, TokenService};
use arx_cqrs_core::CommandHandler;
use arx_errors::{AppError, AppResult};
use async_trait::async_trait;
use tracing::info;

use crate::application::bearer::extract_bearer;
use crate::application::commands::LogoutCommand;
use crate::infrastructure::observability;

pub struct LogoutHandler {
    tokens: Arc<TokenService>,
    blacklist: Arc<TokenBlacklist>,
}

impl LogoutHandler {
    pub fn new(tokens: Arc<TokenService>, blacklist: Arc<TokenBlacklist>) -> Self {
        Self { tokens, blacklist }
    }
}

#[async_trait]
impl CommandHandler<LogoutCommand> for LogoutHandler {
    async fn handle(&self, command: LogoutCommand) -> AppResult<()> {
        let token = extract_bearer(command.authorization.as_deref())?;

        // 解析失败意味着没有可撤销的东西
        let parsed = self
            .tokens
            .parse(token)
            .map_err(|e| AppError::unauthorized(format!("Invalid authorization token: {}", e)))?;

        // 幂等：重复登出只是覆盖已记录的过期时间
        self.blacklist.revoke_until(token, parsed.expires_at);

        observability::record_token_revoked();
        observability::set_revoked_tokens(self.blacklist.len());
        info!(subject = %parsed.subject, "Token revoked");
        Ok(())
    }
}
