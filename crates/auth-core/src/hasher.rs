//! Argon2id 密码哈希
//!
//! 盐随存储的哈希一起保存，验证时用相同成本参数重新推导后比对。

use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;
use rand::rngs::OsRng;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HashError {
    #[error("Invalid hasher parameters: {0}")]
    Params(String),

    #[error("Secure random source unavailable: {0}")]
    RandomSource(#[from] rand::Error),

    #[error("Hashing failed: {0}")]
    Hash(String),

    #[error("Password verification failed")]
    Mismatch,
}

/// Argon2id 成本参数
///
/// 进程级不可变，运行期所有哈希/验证调用共享同一份。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostParams {
    pub time_cost: u32,
    /// 内存成本（KiB）
    pub memory_cost: u32,
    pub parallelism: u32,
    pub key_length: usize,
    pub salt_length: usize,
}

impl Default for CostParams {
    fn default() -> Self {
        Self {
            time_cost: 5,
            memory_cost: 7 * 1024,
            parallelism: 4,
            key_length: 32,
            salt_length: 16,
        }
    }
}

/// 哈希结果：hex 编码的派生密钥 + 使用的盐
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashSalt {
    pub hash: String,
    pub salt: Vec<u8>,
}

/// Argon2id 哈希器
///
/// 无共享可变状态，可被任意数量的并发请求使用。
pub struct Argon2idHasher {
    argon2: Argon2<'static>,
    params: CostParams,
}

impl Argon2idHasher {
    /// 创建哈希器；非法成本参数在构造期拒绝，不会泄漏到请求路径
    pub fn new(params: CostParams) -> Result<Self, HashError> {
        let inner = Params::new(
            params.memory_cost,
            params.time_cost,
            params.parallelism,
            Some(params.key_length),
        )
        .map_err(|e| HashError::Params(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, inner),
            params,
        })
    }

    pub fn params(&self) -> &CostParams {
        &self.params
    }

    /// 对 (password, salt) 推导哈希
    ///
    /// 空盐表示注册路径：生成配置长度的随机盐。相同 (password, salt, 参数)
    /// 的调用结果是确定的，空密码是合法输入。
    pub fn derive_hash(&self, password: &[u8], salt: &[u8]) -> Result<HashSalt, HashError> {
        let salt = if salt.is_empty() {
            self.generate_salt()?
        } else {
            salt.to_vec()
        };

        let mut key = vec![0u8; self.params.key_length];
        self.argon2
            .hash_password_into(password, &salt, &mut key)
            .map_err(|e| HashError::Hash(e.to_string()))?;

        Ok(HashSalt {
            hash: hex::encode(key),
            salt,
        })
    }

    /// 用相同成本参数重新推导并全宽比对
    pub fn verify(
        &self,
        password: &[u8],
        salt: &[u8],
        expected_hash: &[u8],
    ) -> Result<(), HashError> {
        let derived = self.derive_hash(password, salt)?;

        if fixed_time_eq(derived.hash.as_bytes(), expected_hash) {
            Ok(())
        } else {
            Err(HashError::Mismatch)
        }
    }

    fn generate_salt(&self) -> Result<Vec<u8>, HashError> {
        let mut salt = vec![0u8; self.params.salt_length];
        OsRng.try_fill_bytes(&mut salt)?;
        Ok(salt)
    }
}

/// 全宽比较，不因前缀不匹配提前返回
fn fixed_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    // 测试用低成本参数，避免每个用例跑满生产级内存成本
    fn test_hasher() -> Argon2idHasher {
        Argon2idHasher::new(CostParams {
            time_cost: 1,
            memory_cost: 8,
            parallelism: 1,
            key_length: 32,
            salt_length: 16,
        })
        .unwrap()
    }

    #[test]
    fn test_derive_hash_is_deterministic() {
        let hasher = test_hasher();
        let salt = b"fixed-salt-12345";

        let first = hasher.derive_hash(b"hunter2", salt).unwrap();
        let second = hasher.derive_hash(b"hunter2", salt).unwrap();

        assert_eq!(first.hash, second.hash);
        assert_eq!(first.salt, salt.to_vec());
    }

    #[test]
    fn test_empty_salt_generates_random_salt() {
        let hasher = test_hasher();

        let first = hasher.derive_hash(b"hunter2", &[]).unwrap();
        let second = hasher.derive_hash(b"hunter2", &[]).unwrap();

        assert_eq!(first.salt.len(), 16);
        assert_ne!(first.salt, second.salt);
        assert_ne!(first.hash, second.hash);
    }

    #[test]
    fn test_distinct_salts_decorrelate_identical_passwords() {
        let hasher = test_hasher();

        for _ in 0..8 {
            let a = hasher.derive_hash(b"same-password", &[]).unwrap();
            let b = hasher.derive_hash(b"same-password", &[]).unwrap();
            assert_ne!(a.hash, b.hash);
        }
    }

    #[test]
    fn test_verify_accepts_matching_password() {
        let hasher = test_hasher();
        let stored = hasher.derive_hash(b"correct horse", &[]).unwrap();

        assert!(
            hasher
                .verify(b"correct horse", &stored.salt, stored.hash.as_bytes())
                .is_ok()
        );
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let hasher = test_hasher();
        let stored = hasher.derive_hash(b"correct horse", &[]).unwrap();

        let err = hasher
            .verify(b"battery staple", &stored.salt, stored.hash.as_bytes())
            .unwrap_err();
        assert!(matches!(err, HashError::Mismatch));
    }

    #[test]
    fn test_empty_password_is_valid_input() {
        let hasher = test_hasher();
        let stored = hasher.derive_hash(b"", &[]).unwrap();

        assert!(
            hasher
                .verify(b"", &stored.salt, stored.hash.as_bytes())
                .is_ok()
        );
        assert!(
            hasher
                .verify(b"not-empty", &stored.salt, stored.hash.as_bytes())
                .is_err()
        );
    }

    #[test]
    fn test_empty_attempt_against_stored_hash_fails() {
        let hasher = test_hasher();
        let stored = hasher.derive_hash(b"real-password", &[]).unwrap();

        let err = hasher
            .verify(b"", &stored.salt, stored.hash.as_bytes())
            .unwrap_err();
        assert!(matches!(err, HashError::Mismatch));
    }

    #[test]
    fn test_hash_is_fixed_width_hex() {
        let hasher = test_hasher();
        let stored = hasher.derive_hash(b"whatever", &[]).unwrap();

        assert_eq!(stored.hash.len(), 64);
        assert!(stored.hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_invalid_params_rejected_at_construction() {
        let result = Argon2idHasher::new(CostParams {
            time_cost: 0,
            memory_cost: 8,
            parallelism: 1,
            key_length: 32,
            salt_length: 16,
        });
        assert!(matches!(result, Err(HashError::Params(_))));
    }

    #[test]
    fn test_fixed_time_eq() {
        assert!(fixed_time_eq(b"abc", b"abc"));
        assert!(!fixed_time_eq(b"abc", b"abd"));
        assert!(!fixed_time_eq(b"abc", b"abcd"));
        assert!(fixed_time_eq(b"", b""));
    }
}
