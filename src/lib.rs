pub mod client;
pub mod error;
pub mod init;
pub mod news;
pub mod output;
pub mod push;
pub mod sources;
pub mod sync;
pub mod telemetry;

pub use client::{FeedItem, FeedResult, HttpFeedClient, NewsFeedClient};
pub use error::{SyncError, SyncResult};
pub use news::{NewsRecord, NewsRecordInput, NewsRecordStore, PgNewsStore};
pub use push::{PgPushStore, PushRecord, PushRecordInput, PushRecordStore};
pub use sources::SourceConfig;
pub use sync::{ReconcileResult, ReconciliationEngine, SourceOutcome, SyncOptions, SyncReport};
