//! 内存用户凭据存储
//!
//! 默认装配与测试用实现；文档型存储放在同一 trait 之后接入。

use std::collections::HashMap;

use arx_common::UserId;
use arx_errors::AppResult;
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::entities::CredentialRecord;
use crate::domain::repositories::UserRecordStore;

#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    records: RwLock<HashMap<String, CredentialRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl UserRecordStore for InMemoryUserStore {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<CredentialRecord>> {
        let records = self.records.read().await;
        Ok(records.get(username).cloned())
    }

    async fn insert_if_absent(&self, record: CredentialRecord) -> AppResult<Option<UserId>> {
        // 检查并插入在同一把写锁下完成
        let mut records = self.records.write().await;
        if records.contains_key(&record.username) {
            return Ok(None);
        }

        let id = record.id.clone();
        records.insert(record.username.clone(), record);
        Ok(Some(id))
    }
}
