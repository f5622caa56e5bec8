//! 用户凭据存储 trait

use arx_common::UserId;
use arx_errors::AppResult;
use async_trait::async_trait;

use crate::domain::entities::CredentialRecord;

/// 用户凭据存储
///
/// 本服务唯一的持久化协作方。实现方必须提供原子的检查并插入语义。
#[async_trait]
pub trait UserRecordStore: Send + Sync {
    /// 根据用户名查找记录
    async fn find_by_username(&self, username: &str) -> AppResult<Option<CredentialRecord>>;

    /// 以用户名为唯一键插入记录
    ///
    /// 已存在同名记录时返回 None，不覆盖。
    async fn insert_if_absent(&self, record: CredentialRecord) -> AppResult<Option<UserId>>;
}
