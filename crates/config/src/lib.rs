//! arx-config - 配置加载库

use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] figment::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// JWT 配置
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: Secret<String>,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

/// Argon2id 成本参数配置
///
/// 进程级不可变配置，所有哈希/验证调用共享。
#[derive(Debug, Clone, Deserialize)]
pub struct Argon2Config {
    #[serde(default = "default_time_cost")]
    pub time_cost: u32,
    /// 内存成本（KiB）
    #[serde(default = "default_memory_cost")]
    pub memory_cost: u32,
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
    #[serde(default = "default_key_length")]
    pub key_length: usize,
    #[serde(default = "default_salt_length")]
    pub salt_length: usize,
}

fn default_time_cost() -> u32 {
    5
}

fn default_memory_cost() -> u32 {
    7 * 1024
}

fn default_parallelism() -> u32 {
    4
}

fn default_key_length() -> usize {
    32
}

fn default_salt_length() -> usize {
    16
}

impl Default for Argon2Config {
    fn default() -> Self {
        Self {
            time_cost: default_time_cost(),
            memory_cost: default_memory_cost(),
            parallelism: default_parallelism(),
            key_length: default_key_length(),
            salt_length: default_salt_length(),
        }
    }
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// 遥测配置
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

/// 应用配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app_name: String,
    pub app_env: String,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub argon2: Argon2Config,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config: Self = Figment::new()
            .merge(Toml::file(format!("{}/default.toml", config_dir)))
            .merge(Toml::file(format!("{}/{}.toml", config_dir, env)))
            .merge(Env::prefixed("").split("_"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// 启动时校验：缺失签名密钥是致命错误，必须在接受流量前终止进程
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.expose_secret().is_empty() {
            return Err(ConfigError::Invalid(
                "jwt.secret must be non-empty; refusing to start with an unsigned token key"
                    .to_string(),
            ));
        }
        if self.argon2.key_length == 0 || self.argon2.salt_length == 0 {
            return Err(ConfigError::Invalid(
                "argon2.key_length and argon2.salt_length must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }

    /// 是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app_env == "development"
    }
}

#[cfg(test)]
mod tests;
