//! 凭据记录实体

use arx_common::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 当前记录格式版本
pub const CREDENTIAL_SCHEMA_VERSION: i32 = 1;

/// 存储的用户凭据
///
/// 由持久化协作方拥有；本服务只在注册时产生一条新记录，登录时读取，
/// 从不删除。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub id: UserId,
    pub username: String,
    /// hex 编码的派生密钥
    pub password_hash: String,
    /// hex 编码的盐；旧格式记录可能保存原始字符串
    pub salt: String,
    pub created_at: DateTime<Utc>,
    pub schema_version: i32,
}

impl CredentialRecord {
    pub fn new(username: impl Into<String>, password_hash: String, salt: &[u8]) -> Self {
        Self {
            id: UserId::new(),
            username: username.into(),
            password_hash,
            salt: hex::encode(salt),
            created_at: Utc::now(),
            schema_version: CREDENTIAL_SCHEMA_VERSION,
        }
    }

    /// 解码存储的盐
    ///
    /// 先按 hex 解码；旧格式记录的盐不是合法 hex，此时按原始字节
    /// 回退，保证旧凭据仍可登录。
    pub fn salt_bytes(&self) -> Vec<u8> {
        hex::decode(&self.salt).unwrap_or_else(|_| self.salt.clone().into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_salt_roundtrips_through_hex() {
        let salt = vec![0xde, 0xad, 0xbe, 0xef];
        let record = CredentialRecord::new("alice", "abcd".to_string(), &salt);

        assert_eq!(record.salt, "deadbeef");
        assert_eq!(record.salt_bytes(), salt);
    }

    #[test]
    fn test_legacy_raw_salt_falls_back_to_raw_bytes() {
        let mut record = CredentialRecord::new("alice", "abcd".to_string(), b"ignored");
        // 旧格式：盐字段保存的是原始字符串而不是 hex
        record.salt = "not-hex-salt!".to_string();

        assert_eq!(record.salt_bytes(), b"not-hex-salt!".to_vec());
    }

    #[test]
    fn test_new_record_carries_schema_version() {
        let record = CredentialRecord::new("alice", "abcd".to_string(), &[1, 2, 3]);
        assert_eq!(record.schema_version, CREDENTIAL_SCHEMA_VERSION);
    }
}
