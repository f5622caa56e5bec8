//! 存储协作方故障传播测试

use std::sync::Arc;

use arx_auth_core::{Argon2idHasher, CostParams, TokenService};
use arx_common::UserId;
use arx_errors::{AppError, AppResult};
use async_trait::async_trait;
use chrono::Duration;
use iam_credential::application::CredentialService;
use iam_credential::domain::entities::CredentialRecord;
use iam_credential::domain::repositories::UserRecordStore;
use mockall::mock;

mock! {
    pub Store {}

    #[async_trait]
    impl UserRecordStore for Store {
        async fn find_by_username(&self, username: &str) -> AppResult<Option<CredentialRecord>>;
        async fn insert_if_absent(&self, record: CredentialRecord) -> AppResult<Option<UserId>>;
    }
}

fn service_with_store(store: MockStore) -> CredentialService {
    let hasher = Arc::new(
        Argon2idHasher::new(CostParams {
            time_cost: 1,
            memory_cost: 8,
            parallelism: 1,
            key_length: 32,
            salt_length: 16,
        })
        .unwrap(),
    );
    let tokens = Arc::new(TokenService::new(b"test-secret-key", Duration::hours(1)));
    CredentialService::new(Arc::new(store), hasher, tokens)
}

#[tokio::test]
async fn test_login_propagates_store_failure() {
    let mut store = MockStore::new();
    store
        .expect_find_by_username()
        .returning(|_| Err(AppError::internal("store unreachable")));

    let service = service_with_store(store);
    let err = service.login("alice", "hunter2").await.unwrap_err();
    assert!(matches!(err, AppError::Internal(_)));
}

#[tokio::test]
async fn test_register_propagates_store_failure() {
    let mut store = MockStore::new();
    store
        .expect_insert_if_absent()
        .returning(|_| Err(AppError::internal("store unreachable")));

    let service = service_with_store(store);
    let err = service.register("alice", "hunter2").await.unwrap_err();
    assert!(matches!(err, AppError::Internal(_)));
}

#[tokio::test]
async fn test_register_conflict_issues_no_token() {
    let mut store = MockStore::new();
    // 存储报告同名记录已存在
    store.expect_insert_if_absent().returning(|_| Ok(None));

    let service = service_with_store(store);
    let err = service.register("alice", "hunter2").await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}
