//! Token 黑名单
//!
//! 令牌自包含且无法伪造，但也因此无法收回；黑名单让登出在令牌
//! 自然过期之前生效。条目随令牌自身的过期时间失效，由读取路径
//! 惰性清理，没有后台清扫线程。

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// 进程内 Token 黑名单
///
/// 读多写少：每个受保护请求都读，只有登出会写。读路径走共享锁，
/// 需要清理时再升级为独占锁并复查条件。操作永不失败，条目缺失
/// 是正常状态。
#[derive(Debug, Default)]
pub struct TokenBlacklist {
    entries: RwLock<HashMap<String, DateTime<Utc>>>,
}

impl TokenBlacklist {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// 在 `expires_at` 之前拒绝该令牌
    ///
    /// 幂等：重复撤销同一令牌只会覆盖记录的过期时间。
    pub fn revoke_until(&self, token: &str, expires_at: DateTime<Utc>) {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        entries.insert(token.to_string(), expires_at);
    }

    /// 仅当存在条目且其记录的过期时间仍在未来时返回 true
    ///
    /// 命中已过期条目时返回 false，并顺带删除该条目。
    pub fn is_revoked(&self, token: &str) -> bool {
        let now = Utc::now();

        {
            let entries = self
                .entries
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            match entries.get(token) {
                None => return false,
                Some(expires_at) if now < *expires_at => return true,
                Some(_) => {}
            }
        }

        // 条目已过期：拿独占锁后复查，另一个线程可能已经清理或重新撤销
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(expires_at) = entries.get(token) {
            if now >= *expires_at {
                entries.remove(token);
            }
        }

        false
    }

    /// 当前条目数（含尚未被惰性清理的过期条目）
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
