//! 登录处理器

use std::sync::Arc;

use arx_auth_core::{Argon2idHasher, HashError, TokenService};
use arx_cqrs_core::CommandHandler;
use arx_errors::{AppError, AppResult};
use async_trait::async_trait;
use tracing::info;

use crate::application::commands::{AuthResponse, LoginCommand};
use crate::domain::repositories::UserRecordStore;
use crate::domain::value_objects::Username;
use crate::infrastructure::observability;

pub struct LoginHandler {
    store: Arc<dyn UserRecordStore>,
    hasher: Arc<Argon2idHasher>,
    tokens: Arc<TokenService>,
}

impl LoginHandler {
    pub fn new(
        store: Arc<dyn UserRecordStore>,
        hasher: Arc<Argon2idHasher>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            store,
            hasher,
            tokens,
        }
    }
}

#[async_trait]
impl CommandHandler<LoginCommand> for LoginHandler {
    async fn handle(&self, command: LoginCommand) -> AppResult<AuthResponse> {
        let username = Username::new(&command.username)?;

        let record = self
            .store
            .find_by_username(username.as_str())
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("User with username '{}' not found", username))
            })?;

        let salt = record.salt_bytes();
        match self
            .hasher
            .verify(command.password.as_bytes(), &salt, record.password_hash.as_bytes())
        {
            Ok(()) => {}
            Err(HashError::Mismatch) => {
                observability::record_login_attempt(false);
                return Err(AppError::unauthorized(format!(
                    "Invalid password for user '{}'",
                    username
                )));
            }
            Err(e) => {
                return Err(AppError::internal(format!(
                    "Password verification failed: {}",
                    e
                )));
            }
        }

        let token = self
            .tokens
            .issue(&record.username)
            .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

        observability::record_login_attempt(true);
        info!(username = %username, "User logged in");

        Ok(AuthResponse {
            user_id: record.id.to_string(),
            token,
        })
    }
}
