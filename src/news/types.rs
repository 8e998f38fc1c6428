use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored news item. Rows are never updated or deleted once written.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct NewsRecord {
    pub id: i64,
    pub origin_id: String,
    pub title: String,
    pub url: String,
    pub source_id: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsRecordInput {
    pub origin_id: String,
    pub title: String,
    pub url: String,
    pub source_id: i32,
}

#[derive(Serialize)]
pub struct NewsList {
    pub source_id: i32,
    pub limit: i64,
    pub records: Vec<NewsRecord>,
}

#[derive(Serialize)]
pub struct NewsImportPlan {
    pub source_id: i32,
    pub file: String,
    pub items: usize,
}

#[derive(Serialize)]
pub struct NewsImportResult {
    pub source_id: i32,
    pub inserted: usize,
}
