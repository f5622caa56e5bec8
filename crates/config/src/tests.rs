use crate::{AppConfig, Argon2Config, JwtConfig, ServerConfig, TelemetryConfig};
use secrecy::Secret;

fn base_config(secret: &str) -> AppConfig {
    AppConfig {
        app_name: "iam-credential".to_string(),
        app_env: "development".to_string(),
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        },
        jwt: JwtConfig {
            secret: Secret::new(secret.to_string()),
            expires_in: 3600,
        },
        argon2: Argon2Config::default(),
        telemetry: TelemetryConfig {
            log_level: "info".to_string(),
        },
    }
}

#[test]
fn test_secret_redaction() {
    let secret = Secret::new("my_secret_password".to_string());
    let debug_output = format!("{:?}", secret);
    assert!(debug_output.contains("Secret([REDACTED"));
    assert!(!debug_output.contains("my_secret_password"));
}

#[test]
fn test_config_struct_redaction() {
    let config = base_config("super-secret-signing-key");
    let debug_output = format!("{:?}", config);
    assert!(!debug_output.contains("super-secret-signing-key"));
    assert!(debug_output.contains("Secret([REDACTED"));
}

#[test]
fn test_empty_jwt_secret_is_fatal() {
    let config = base_config("");
    assert!(config.validate().is_err());
}

#[test]
fn test_valid_config_passes_validation() {
    let config = base_config("test-secret-key");
    assert!(config.validate().is_ok());
}

#[test]
fn test_argon2_defaults() {
    let argon2 = Argon2Config::default();
    assert_eq!(argon2.time_cost, 5);
    assert_eq!(argon2.memory_cost, 7 * 1024);
    assert_eq!(argon2.parallelism, 4);
    assert_eq!(argon2.key_length, 32);
    assert_eq!(argon2.salt_length, 16);
}

#[test]
fn test_zero_key_length_rejected() {
    let mut config = base_config("test-secret-key");
    config.argon2.key_length = 0;
    assert!(config.validate().is_err());
}
