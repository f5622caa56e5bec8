//! 注册处理器

use std::sync::Arc;

use arx_auth_core::{Argon2idHasher, HashError, TokenService};
use arx_cqrs_core::CommandHandler;
use arx_errors::{AppError, AppResult};
use async_trait::async_trait;
use tracing::info;

use crate::application::commands::{AuthResponse, RegisterCommand};
use crate::domain::entities::CredentialRecord;
use crate::domain::repositories::UserRecordStore;
use crate::domain::value_objects::Username;
use crate::infrastructure::observability;

pub struct RegisterHandler {
    store: Arc<dyn UserRecordStore>,
    hasher: Arc<Argon2idHasher>,
    tokens: Arc<TokenService>,
}

impl RegisterHandler {
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
impl CommandHandler<RegisterCommand> for RegisterHandler {
    async fn handle(&self, command: RegisterCommand) -> AppResult<AuthResponse> {
        let username = Username::new(&command.username)?;

        // 注册路径：空盐让哈希器生成随机盐
        let hash_salt = self
            .hasher
            .derive_hash(command.password.as_bytes(), &[])
            .map_err(|e| match e {
                HashError::RandomSource(_) => {
                    AppError::internal(format!("Secure random source unavailable: {}", e))
                }
                other => AppError::internal(format!("Failed to hash password: {}", other)),
            })?;

        let record = CredentialRecord::new(username.as_str(), hash_salt.hash, &hash_salt.salt);

        let user_id = self
            .store
            .insert_if_absent(record)
            .await?
            .ok_or_else(|| {
                observability::record_registration(false);
                AppError::conflict("User already exists")
            })?;

        let token = self
            .tokens
            .issue(username.as_str())
            .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

        observability::record_registration(true);
        info!(username = %username, user_id = %user_id, "User registered");

        Ok(AuthResponse {
            user_id: user_id.to_string(),
            token,
        })
    }
}
