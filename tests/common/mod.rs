#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use newsfeed_sync::client::{FeedItem, FeedResult, NewsFeedClient};
use newsfeed_sync::error::{SyncError, SyncResult};
use newsfeed_sync::news::{NewsRecord, NewsRecordInput, NewsRecordStore};
use newsfeed_sync::push::{PushRecord, PushRecordInput, PushRecordStore};
use newsfeed_sync::sources::SourceConfig;

#[derive(Default)]
pub struct MemNewsStore {
    rows: Mutex<Vec<NewsRecord>>,
    pub fail_lookup: AtomicBool,
    fail_origin_ids: Mutex<HashSet<String>>,
}

impl MemNewsStore {
    pub fn seed(&self, source_id: i32, origin_ids: &[&str]) {
        let mut rows = self.rows.lock().unwrap();
        for oid in origin_ids {
            let id = rows.len() as i64 + 1;
            rows.push(NewsRecord {
                id,
                origin_id: oid.to_string(),
                title: format!("seed {oid}"),
                url: format!("https://news.test/{oid}"),
                source_id,
                created_at: Utc::now(),
            });
        }
    }

    pub fn fail_insert_of(&self, origin_id: &str) {
        self.fail_origin_ids.lock().unwrap().insert(origin_id.to_string());
    }

    pub fn rows(&self) -> Vec<NewsRecord> { self.rows.lock().unwrap().clone() }

    pub fn origin_ids(&self, source_id: i32) -> Vec<String> {
        self.rows().into_iter().filter(|r| r.source_id == source_id).map(|r| r.origin_id).collect()
    }
}

#[async_trait]
impl NewsRecordStore for MemNewsStore {
    async fn get_latest_by_source(&self, source_id: i32, limit: i64) -> SyncResult<Vec<NewsRecord>> {
        if self.fail_lookup.load(Ordering::SeqCst) {
            return Err(SyncError::Storage("lookup refused".into()));
        }
        let mut rows: Vec<NewsRecord> = self.rows().into_iter().filter(|r| r.source_id == source_id).collect();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        rows.truncate(limit.max(0) as usize);
        Ok(rows)
    }

    async fn insert(&self, record: &NewsRecordInput) -> SyncResult<i64> {
        if self.fail_origin_ids.lock().unwrap().contains(&record.origin_id) {
            return Err(SyncError::Storage(format!("insert refused for {}", record.origin_id)));
        }
        let mut rows = self.rows.lock().unwrap();
        let id = rows.len() as i64 + 1;
        rows.push(NewsRecord {
            id,
            origin_id: record.origin_id.clone(),
            title: record.title.clone(),
            url: record.url.clone(),
            source_id: record.source_id,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn batch_insert(&self, records: &[NewsRecordInput]) -> SyncResult<()> {
        let refused = self.fail_origin_ids.lock().unwrap().clone();
        if records.iter().any(|r| refused.contains(&r.origin_id)) {
            return Err(SyncError::Storage("batch refused".into()));
        }
        for r in records { self.insert(r).await?; }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemPushStore {
    rows: Mutex<Vec<PushRecord>>,
    pub fail_insert: AtomicBool,
    pub fail_delete: AtomicBool,
    deletes: Mutex<Vec<(i32, String)>>,
}

impl MemPushStore {
    pub fn rows(&self) -> Vec<PushRecord> { self.rows.lock().unwrap().clone() }

    pub fn deletes(&self) -> Vec<(i32, String)> { self.deletes.lock().unwrap().clone() }
}

#[async_trait]
impl PushRecordStore for MemPushStore {
    async fn insert(&self, push: &PushRecordInput) -> SyncResult<i64> {
        if self.fail_insert.load(Ordering::SeqCst) {
            return Err(SyncError::Storage("push insert refused".into()));
        }
        let mut rows = self.rows.lock().unwrap();
        let id = rows.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        rows.push(PushRecord {
            id,
            source_id: push.source_id,
            source_name: push.source_name.clone(),
            news_record_id: push.news_record_id,
            news_type: push.news_type.clone(),
            status: push.status,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn batch_insert(&self, pushes: &[PushRecordInput]) -> SyncResult<()> {
        if self.fail_insert.load(Ordering::SeqCst) {
            return Err(SyncError::Storage("batch refused".into()));
        }
        for p in pushes { self.insert(p).await?; }
        Ok(())
    }

    async fn get_by_type(&self, news_type: &str) -> SyncResult<Vec<PushRecord>> {
        Ok(self.rows().into_iter().filter(|r| r.news_type == news_type).collect())
    }

    async fn delete_by_source_and_type(&self, source_id: i32, news_type: &str) -> SyncResult<u64> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(SyncError::Storage("delete refused".into()));
        }
        self.deletes.lock().unwrap().push((source_id, news_type.to_string()));
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| !(r.source_id == source_id && r.news_type == news_type));
        Ok((before - rows.len()) as u64)
    }
}

/// Answers each source id from a fixed script; unscripted ids fail.
#[derive(Default)]
pub struct ScriptedClient {
    answers: Mutex<HashMap<i32, Result<FeedResult, String>>>,
    calls: Mutex<Vec<i32>>,
}

impl ScriptedClient {
    pub fn ok(&self, source_id: i32, items: Vec<FeedItem>) {
        self.answers.lock().unwrap().insert(source_id, Ok(FeedResult::success(items)));
    }

    pub fn status(&self, source_id: i32, status: &str) {
        self.answers.lock().unwrap().insert(source_id, Ok(FeedResult { status: status.to_string(), items: Vec::new() }));
    }

    pub fn transport_error(&self, source_id: i32, msg: &str) {
        self.answers.lock().unwrap().insert(source_id, Err(msg.to_string()));
    }

    pub fn calls(&self) -> Vec<i32> { self.calls.lock().unwrap().clone() }
}

#[async_trait]
impl NewsFeedClient for ScriptedClient {
    async fn fetch_by_source(&self, source_id: i32) -> SyncResult<FeedResult> {
        self.calls.lock().unwrap().push(source_id);
        match self.answers.lock().unwrap().get(&source_id) {
            Some(Ok(res)) => Ok(res.clone()),
            Some(Err(msg)) => Err(SyncError::fetch(source_id, msg)),
            None => Err(SyncError::fetch(source_id, "no scripted answer")),
        }
    }
}

pub fn source(id: i32, name: &str) -> SourceConfig {
    SourceConfig { id, name: name.to_string() }
}

pub fn item(id: &str) -> FeedItem {
    FeedItem::new(id, format!("title {id}"), format!("https://news.test/{id}"))
}

pub fn items(ids: &[&str]) -> Vec<FeedItem> {
    ids.iter().map(|id| item(id)).collect()
}
