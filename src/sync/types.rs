use serde::Serialize;

use crate::client::FeedItem;

/// Where inside a source pass a contained failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage { LoadKnown, ResetPush, WriteNews, WritePush }

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemError {
    pub stage: Stage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_id: Option<String>,
    pub message: String,
}

/// One news row written during a pass, with the push that followed it (if it landed).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsertedItem {
    pub origin_id: String,
    pub news_record_id: i64,
    pub push_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReconcileResult {
    pub source_id: i32,
    pub source_name: String,
    pub known: usize,
    pub fetched: usize,
    pub new: usize,
    pub inserted: usize,
    pub pushed: usize,
    /// Rows removed by the push reset, when it ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_deleted: Option<u64>,
    pub items: Vec<InsertedItem>,
    pub errors: Vec<ItemError>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourcePlan {
    pub source_id: i32,
    pub source_name: String,
    pub known: usize,
    pub fetched: usize,
    pub new: usize,
    pub would_reset: bool,
    pub sample_new: Vec<FeedItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceFailure {
    pub source_id: i32,
    pub source_name: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SourceOutcome<T> {
    Done(T),
    Failed(SourceFailure),
}

impl<T> SourceOutcome<T> {
    pub fn done(&self) -> Option<&T> {
        match self { SourceOutcome::Done(t) => Some(t), SourceOutcome::Failed(_) => None }
    }

    pub fn is_failed(&self) -> bool { matches!(self, SourceOutcome::Failed(_)) }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SyncTotals {
    pub sources: usize,
    pub failed: usize,
    pub fetched: usize,
    pub new: usize,
    pub inserted: usize,
    pub pushed: usize,
    pub errors: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SyncReport {
    pub totals: SyncTotals,
    pub per_source: Vec<SourceOutcome<ReconcileResult>>,
}

impl SyncReport {
    pub fn push(&mut self, outcome: SourceOutcome<ReconcileResult>) {
        self.totals.sources += 1;
        match &outcome {
            SourceOutcome::Done(r) => {
                self.totals.fetched += r.fetched;
                self.totals.new += r.new;
                self.totals.inserted += r.inserted;
                self.totals.pushed += r.pushed;
                self.totals.errors += r.errors.len();
            }
            SourceOutcome::Failed(_) => self.totals.failed += 1,
        }
        self.per_source.push(outcome);
    }
}

#[derive(Serialize)]
pub struct SyncPlan {
    pub sources: usize,
    pub window: i64,
    pub reset_push: bool,
    pub news_type: String,
    pub per_source: Vec<SourceOutcome<SourcePlan>>,
}
