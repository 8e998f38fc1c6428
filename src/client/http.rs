use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

use crate::error::{SyncError, SyncResult};

use super::{FeedResult, NewsFeedClient};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Talks to the news API: `GET {base_url}/{source_id}` answers a `FeedResult`.
pub struct HttpFeedClient {
    client: Client,
    base_url: Url,
}

impl HttpFeedClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url).with_context(|| format!("invalid news API url: {base_url}"))?;
        // keep the last path segment when joining
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(HttpFeedClient { client, base_url })
    }

    /// `join` drops the query, so the base URL's one (e.g. an API key) is
    /// carried over by hand.
    pub fn source_url(&self, source_id: i32) -> SyncResult<Url> {
        let mut url = self.base_url
            .join(&source_id.to_string())
            .map_err(|e| SyncError::fetch(source_id, e))?;
        url.set_query(self.base_url.query());
        Ok(url)
    }
}

fn decode_body(source_id: i32, body: &[u8]) -> SyncResult<FeedResult> {
    serde_json::from_slice(body).map_err(|e| SyncError::fetch(source_id, format!("bad response body: {e}")))
}

#[async_trait]
impl NewsFeedClient for HttpFeedClient {
    async fn fetch_by_source(&self, source_id: i32) -> SyncResult<FeedResult> {
        let url = self.source_url(source_id)?;
        let resp = self.client.get(url).send().await.map_err(|e| SyncError::fetch(source_id, e))?;
        let resp = resp.error_for_status().map_err(|e| SyncError::fetch(source_id, e))?;
        let body = resp.bytes().await.map_err(|e| SyncError::fetch(source_id, e))?;
        decode_body(source_id, &body)
    }
}
