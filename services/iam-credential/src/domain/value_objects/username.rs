//! 用户名值对象

use arx_errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

const MAX_USERNAME_LEN: usize = 64;

/// 校验过的用户名
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
    pub fn new(raw: &str) -> AppResult<Self> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(AppError::validation("Username cannot be empty"));
        }
        if trimmed.len() > MAX_USERNAME_LEN {
            return Err(AppError::validation(format!(
                "Username must be at most {} characters",
                MAX_USERNAME_LEN
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
