//! 凭据服务装配

use std::sync::Arc;

use arx_auth_core::{Argon2idHasher, CostParams, TokenBlacklist, TokenService};
use arx_config::AppConfig;
use arx_cqrs_core::{CommandHandler, QueryHandler};
use arx_errors::{AppError, AppResult};
use chrono::Duration;
use secrecy::ExposeSecret;

use crate::application::commands::{AuthResponse, LoginCommand, LogoutCommand, RegisterCommand};
use crate::application::handlers::{
    AuthorizeHandler, LoginHandler, LogoutHandler, RegisterHandler,
};
use crate::application::queries::AuthorizeQuery;
use crate::domain::repositories::UserRecordStore;

/// 凭据服务
///
/// 对上层暴露注册 / 登录 / 登出 / 授权四个操作，黑名单实例由
/// 登出和授权两个处理器共享。
pub struct CredentialService {
    register: RegisterHandler,
    login: LoginHandler,
    logout: LogoutHandler,
    authorize: AuthorizeHandler,
    blacklist: Arc<TokenBlacklist>,
}

impl CredentialService {
    pub fn new(
        store: Arc<dyn UserRecordStore>,
        hasher: Arc<Argon2idHasher>,
        tokens: Arc<TokenService>,
    ) -> Self {
        let blacklist = Arc::new(TokenBlacklist::new());

        Self {
            register: RegisterHandler::new(
                Arc::clone(&store),
                Arc::clone(&hasher),
                Arc::clone(&tokens),
            ),
            login: LoginHandler::new(store, hasher, Arc::clone(&tokens)),
            logout: LogoutHandler::new(Arc::clone(&tokens), Arc::clone(&blacklist)),
            authorize: AuthorizeHandler::new(tokens, Arc::clone(&blacklist)),
            blacklist,
        }
    }

    /// 从应用配置装配服务
    pub fn from_config(config: &AppConfig, store: Arc<dyn UserRecordStore>) -> AppResult<Self> {
        let hasher = Argon2idHasher::new(CostParams {
            time_cost: config.argon2.time_cost,
            memory_cost: config.argon2.memory_cost,
            parallelism: config.argon2.parallelism,
            key_length: config.argon2.key_length,
            salt_length: config.argon2.salt_length,
        })
        .map_err(|e| AppError::internal(format!("Invalid argon2 parameters: {}", e)))?;

        let tokens = TokenService::new(
            config.jwt.secret.expose_secret().as_bytes(),
            Duration::seconds(config.jwt.expires_in as i64),
        );

        Ok(Self::new(store, Arc::new(hasher), Arc::new(tokens)))
    }

    pub async fn register(&self, username: &str, password: &str) -> AppResult<AuthResponse> {
        self.register
            .handle(RegisterCommand {
                username: username.to_string(),
                password: password.to_string(),
            })
            .await
    }

    pub async fn login(&self, username: &str, password: &str) -> AppResult<AuthResponse> {
        self.login
            .handle(LoginCommand {
                username: username.to_string(),
                password: password.to_string(),
            })
            .await
    }

    pub async fn logout(&self, authorization: Option<&str>) -> AppResult<()> {
        self.logout
            .handle(LogoutCommand {
                authorization: authorization.map(str::to_string),
            })
            .await
    }

    pub async fn authorize(&self, authorization: Option<&str>) -> AppResult<String> {
        self.authorize
            .handle(AuthorizeQuery {
                authorization: authorization.map(str::to_string),
            })
            .await
    }

    pub fn blacklist(&self) -> &Arc<TokenBlacklist> {
        &self.blacklist
    }
}
