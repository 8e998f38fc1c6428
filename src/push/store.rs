use async_trait::async_trait;

use crate::error::SyncResult;

use super::types::{PushRecord, PushRecordInput};

#[async_trait]
pub trait PushRecordStore: Send + Sync {
    async fn insert(&self, push: &PushRecordInput) -> SyncResult<i64>;

    async fn batch_insert(&self, pushes: &[PushRecordInput]) -> SyncResult<()>;

    /// No ordering guarantee.
    async fn get_by_type(&self, news_type: &str) -> SyncResult<Vec<PushRecord>>;

    /// Returns the number of rows removed.
    async fn delete_by_source_and_type(&self, source_id: i32, news_type: &str) -> SyncResult<u64>;
}
