use chrono::{DateTime, Utc};
use serde::Serialize;

pub const NEWS_TYPE_NEWS: &str = "news";

/// A delivery marker for one news record. `news_record_id` is a plain id, not
/// an owning reference: deleting pushes never touches news rows.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct PushRecord {
    pub id: i64,
    pub source_id: i32,
    pub source_name: String,
    pub news_record_id: i64,
    pub news_type: String,
    pub status: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PushRecordInput {
    pub source_id: i32,
    pub source_name: String,
    pub news_record_id: i64,
    pub news_type: String,
    pub status: i32,
}

impl PushRecordInput {
    /// Fresh push for a just-inserted news record; status starts at 0.
    pub fn pending(source_id: i32, source_name: &str, news_record_id: i64, news_type: &str) -> Self {
        PushRecordInput {
            source_id,
            source_name: source_name.to_string(),
            news_record_id,
            news_type: news_type.to_string(),
            status: 0,
        }
    }
}

#[derive(Serialize)]
pub struct PushList {
    pub news_type: String,
    pub records: Vec<PushRecord>,
}

#[derive(Serialize)]
pub struct PushResetPlan {
    pub action: &'static str,
    pub source_id: i32,
    pub news_type: String,
}

#[derive(Serialize)]
pub struct PushResetResult {
    pub source_id: i32,
    pub news_type: String,
    pub deleted: u64,
}
