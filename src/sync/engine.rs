use std::collections::HashSet;
use tracing::Instrument;

use crate::client::{FeedItem, NewsFeedClient};
use crate::error::{SyncError, SyncResult};
use crate::news::NewsRecordStore;
use crate::push::{PushRecordInput, PushRecordStore, NEWS_TYPE_NEWS};
use crate::sources::SourceConfig;
use crate::telemetry::{self};
use crate::telemetry::ctx::LogCtx;
use crate::telemetry::ops::sync::{Phase as SyncPhase, SyncJob};

use super::types::{
    InsertedItem, ItemError, ReconcileResult, SourceFailure, SourceOutcome, SourcePlan, Stage, SyncReport,
};

pub const DEFAULT_WINDOW: i64 = 30;

#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// How many of a source's most recent records count as "known".
    pub window: i64,
    /// Clear the source's push rows of `news_type` before writing new ones.
    pub reset_push: bool,
    pub news_type: String,
}

impl Default for SyncOptions {
    fn default() -> Self {
        SyncOptions { window: DEFAULT_WINDOW, reset_push: false, news_type: NEWS_TYPE_NEWS.to_string() }
    }
}

/// Items whose id is not already known, in feed order. Repeats inside one
/// batch are kept: only the stored set is consulted.
pub fn select_new_items<'a>(known: &HashSet<String>, items: &'a [FeedItem]) -> Vec<&'a FeedItem> {
    items.iter().filter(|it| !known.contains(&it.id)).collect()
}

pub struct ReconciliationEngine<'a> {
    news: &'a dyn NewsRecordStore,
    push: &'a dyn PushRecordStore,
    client: &'a dyn NewsFeedClient,
    opts: SyncOptions,
    log: LogCtx<SyncJob>,
}

impl<'a> ReconciliationEngine<'a> {
    pub fn new(
        news: &'a dyn NewsRecordStore,
        push: &'a dyn PushRecordStore,
        client: &'a dyn NewsFeedClient,
        opts: SyncOptions,
    ) -> Self {
        ReconciliationEngine { news, push, client, opts, log: telemetry::sync() }
    }

    pub fn options(&self) -> &SyncOptions { &self.opts }

    /// Reconcile every source in order. A failing source is recorded and the
    /// loop moves on.
    pub async fn run(&self, sources: &[SourceConfig]) -> SyncReport {
        let mut report = SyncReport::default();
        if sources.is_empty() {
            self.log.info("ℹ️  No sources configured; nothing to do");
        }
        for source in sources {
            let span = self.log.span_kv(&SyncPhase::Source, [
                ("source_id", source.id.to_string()),
                ("source_name", source.name.clone()),
            ]);
            let outcome = match self.reconcile_source(source).instrument(span).await {
                Ok(result) => SourceOutcome::Done(result),
                Err(e) => {
                    self.log.error_kv(&format!("❌ {e}"), [("source_id", source.id.to_string()), ("kind", e.kind().to_string())]);
                    SourceOutcome::Failed(SourceFailure {
                        source_id: source.id,
                        source_name: source.name.clone(),
                        error: e.to_string(),
                    })
                }
            };
            report.push(outcome);
        }
        let t = &report.totals;
        self.log.totals(t.sources, t.failed, t.inserted, t.pushed, t.errors);
        report
    }

    /// One fetch → diff → insert → push pass. Only a fetch failure is an `Err`;
    /// storage failures are contained and listed in `errors`.
    pub async fn reconcile_source(&self, source: &SourceConfig) -> SyncResult<ReconcileResult> {
        let mut result = ReconcileResult {
            source_id: source.id,
            source_name: source.name.clone(),
            ..Default::default()
        };

        let known = self.load_known(source, &mut result.errors).await;
        result.known = known.len();

        let items = self.fetch(source).await?;
        result.fetched = items.len();

        let new_items = {
            let _s = self.log.span(&SyncPhase::Diff).entered();
            select_new_items(&known, &items)
        };
        result.new = new_items.len();
        self.log.info_kv(
            &format!("found {} new of {} fetched ({} known)", result.new, result.fetched, result.known),
            [("source_id", source.id.to_string())],
        );

        // an empty feed must not wipe the current push snapshot
        if self.opts.reset_push && !new_items.is_empty() {
            match self
                .push
                .delete_by_source_and_type(source.id, &self.opts.news_type)
                .instrument(self.log.span(&SyncPhase::ResetPush))
                .await
            {
                Ok(n) => {
                    self.log.info_kv(&format!("🧹 cleared {n} push records"), [("news_type", self.opts.news_type.clone())]);
                    result.reset_deleted = Some(n);
                }
                Err(e) => {
                    self.log.warn_kv(&format!("⚠️ push reset failed: {e}"), [("source_id", source.id.to_string())]);
                    result.errors.push(ItemError { stage: Stage::ResetPush, origin_id: None, message: e.to_string() });
                }
            }
        }

        for item in new_items {
            self.write_item(source, item, &mut result).await;
        }

        self.log.source_summary(&result);
        Ok(result)
    }

    /// Read-only half of a pass: what `reconcile_source` would insert.
    pub async fn plan_source(&self, source: &SourceConfig, sample: usize) -> SyncResult<SourcePlan> {
        let mut ignored = Vec::new();
        let known = self.load_known(source, &mut ignored).await;
        let items = self.fetch(source).await?;
        let new_items = select_new_items(&known, &items);
        Ok(SourcePlan {
            source_id: source.id,
            source_name: source.name.clone(),
            known: known.len(),
            fetched: items.len(),
            new: new_items.len(),
            would_reset: self.opts.reset_push && !new_items.is_empty(),
            sample_new: new_items.into_iter().take(sample).cloned().collect(),
        })
    }

    pub async fn plan(&self, sources: &[SourceConfig], sample: usize) -> Vec<SourceOutcome<SourcePlan>> {
        let mut out = Vec::with_capacity(sources.len());
        for source in sources {
            let outcome = match self.plan_source(source, sample).await {
                Ok(p) => SourceOutcome::Done(p),
                Err(e) => {
                    self.log.error_kv(&format!("❌ {e}"), [("source_id", source.id.to_string())]);
                    SourceOutcome::Failed(SourceFailure { source_id: source.id, source_name: source.name.clone(), error: e.to_string() })
                }
            };
            out.push(outcome);
        }
        out
    }

    // A failed lookup degrades to "nothing known"; duplicates may follow.
    async fn load_known(&self, source: &SourceConfig, errors: &mut Vec<ItemError>) -> HashSet<String> {
        match self
            .news
            .get_latest_by_source(source.id, self.opts.window)
            .instrument(self.log.span(&SyncPhase::LoadKnown))
            .await
        {
            Ok(rows) => {
                self.log.debug(format!("loaded {} known records", rows.len()));
                rows.into_iter().map(|r| r.origin_id).collect()
            }
            Err(e) => {
                self.log.warn_kv(&format!("⚠️ known-record lookup failed, treating as empty: {e}"), [("source_id", source.id.to_string())]);
                errors.push(ItemError { stage: Stage::LoadKnown, origin_id: None, message: e.to_string() });
                HashSet::new()
            }
        }
    }

    async fn fetch(&self, source: &SourceConfig) -> SyncResult<Vec<FeedItem>> {
        let res = self.client.fetch_by_source(source.id).instrument(self.log.span(&SyncPhase::Fetch)).await?;
        if !res.is_success() {
            return Err(SyncError::fetch(source.id, format!("status={}", res.status)));
        }
        Ok(res.items)
    }

    // News then push, deliberately not in one transaction: a news row can
    // outlive a failed push insert.
    async fn write_item(&self, source: &SourceConfig, item: &FeedItem, result: &mut ReconcileResult) {
        let record = item.to_record(source.id);
        let news_id = match self.news.insert(&record).instrument(self.log.span(&SyncPhase::WriteNews)).await {
            Ok(id) => id,
            Err(e) => {
                self.log.error_kv(&format!("❌ news insert failed: {e}"), [("origin_id", item.id.clone())]);
                result.errors.push(ItemError { stage: Stage::WriteNews, origin_id: Some(item.id.clone()), message: e.to_string() });
                return;
            }
        };
        result.inserted += 1;
        self.log.info_kv(&format!("➕ insert {}", preview(&item.title)), [("origin_id", item.id.clone()), ("news_id", news_id.to_string())]);

        let push = PushRecordInput::pending(source.id, &source.name, news_id, &self.opts.news_type);
        let push_id = match self.push.insert(&push).instrument(self.log.span(&SyncPhase::WritePush)).await {
            Ok(id) => {
                result.pushed += 1;
                self.log.debug_kv("📬 push created", [("push_id", id.to_string()), ("news_id", news_id.to_string())]);
                Some(id)
            }
            Err(e) => {
                self.log.error_kv(&format!("❌ push insert failed: {e}"), [("news_id", news_id.to_string())]);
                result.errors.push(ItemError { stage: Stage::WritePush, origin_id: Some(item.id.clone()), message: e.to_string() });
                None
            }
        };
        result.items.push(InsertedItem { origin_id: item.id.clone(), news_record_id: news_id, push_id });
    }
}

fn preview(title: &str) -> String {
    let mut chars = title.chars();
    let head: String = chars.by_ref().take(30).collect();
    if chars.next().is_some() { format!("{head}...") } else { head }
}
