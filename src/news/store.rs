use async_trait::async_trait;

use crate::error::SyncResult;

use super::types::{NewsRecord, NewsRecordInput};

#[async_trait]
pub trait NewsRecordStore: Send + Sync {
    /// Most recent first. A source with no rows yields an empty vec, not an error.
    async fn get_latest_by_source(&self, source_id: i32, limit: i64) -> SyncResult<Vec<NewsRecord>>;

    /// Returns the assigned identity; `created_at` is stamped at call time.
    async fn insert(&self, record: &NewsRecordInput) -> SyncResult<i64>;

    /// One statement for the whole slice: either every row lands or none does.
    async fn batch_insert(&self, records: &[NewsRecordInput]) -> SyncResult<()>;
}
