//! arx-auth-core - 认证核心库
//!
//! Argon2id 哈希 / JWT 签发校验 / Token 黑名单

mod blacklist;
mod hasher;
mod token;

pub use blacklist::*;
pub use hasher::*;
pub use token::*;
