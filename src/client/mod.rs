use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::SyncResult;
use crate::news::NewsRecordInput;

mod http;

pub use http::HttpFeedClient;

pub const STATUS_SUCCESS: &str = "success";

#[async_trait]
pub trait NewsFeedClient: Send + Sync {
    /// Current items for one source. Transport and decode failures are
    /// `SyncError::Fetch`; a decoded body with a non-success status is
    /// returned as-is for the caller to judge.
    async fn fetch_by_source(&self, source_id: i32) -> SyncResult<FeedResult>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedResult {
    pub status: String,
    #[serde(default)]
    pub items: Vec<FeedItem>,
}

impl FeedResult {
    pub fn success(items: Vec<FeedItem>) -> Self {
        FeedResult { status: STATUS_SUCCESS.to_string(), items }
    }

    pub fn is_success(&self) -> bool { self.status == STATUS_SUCCESS }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedItem {
    /// Remote id, normalized to a string whether the API sends `101` or `"101"`.
    #[serde(deserialize_with = "origin_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
}

impl FeedItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>, url: impl Into<String>) -> Self {
        FeedItem { id: id.into(), title: title.into(), url: url.into() }
    }

    pub fn to_record(&self, source_id: i32) -> NewsRecordInput {
        NewsRecordInput {
            origin_id: self.id.clone(),
            title: self.title.clone(),
            url: self.url.clone(),
            source_id,
        }
    }
}

fn origin_id<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(d)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("unsupported item id: {other}"))),
    }
}
