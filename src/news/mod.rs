use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use sqlx::PgPool;
use std::path::PathBuf;

use crate::client::FeedItem;
use crate::telemetry::{self};
use crate::telemetry::ops::news::Phase as NewsPhase;

pub mod db;
pub mod store;
pub mod types;

pub use db::PgNewsStore;
pub use store::NewsRecordStore;
pub use types::{NewsRecord, NewsRecordInput};

/// newsfeed news ls/import
#[derive(Args)]
pub struct NewsCmd {
    #[command(subcommand)]
    pub cmd: NewsSub,
}

#[derive(Subcommand)]
pub enum NewsSub {
    // latest stored records for a source, newest first
    Ls {
        #[arg(long)]
        source: i32,
        #[arg(long, default_value_t = 30)]
        limit: i64,
    },
    // batch-insert a JSON array of feed items (plan-only by default; use --apply to write)
    Import {
        #[arg(long)]
        source: i32,
        file: PathBuf,
        #[arg(long, default_value_t = false)]
        apply: bool,
    },
}

pub async fn run(pool: &PgPool, args: NewsCmd) -> Result<()> {
    let store = PgNewsStore::new(pool.clone());
    match args.cmd {
        NewsSub::Ls { source, limit } => ls_news(&store, source, limit).await?,
        NewsSub::Import { source, file, apply } => import_news(&store, source, file, apply).await?,
    }
    Ok(())
}

async fn ls_news(store: &dyn NewsRecordStore, source_id: i32, limit: i64) -> Result<()> {
    let log = telemetry::news();
    let _g = log.root_span_kv([("source_id", source_id.to_string()), ("limit", limit.to_string())]).entered();
    let _s = log.span(&NewsPhase::List).entered();
    let records = store.get_latest_by_source(source_id, limit).await?;
    log.info(format!("📰 News for source {} ({} rows):", source_id, records.len()));
    for r in &records {
        log.info(format!("[{}] orig={} {} <{}> at={}", r.id, r.origin_id, r.title, r.url, r.created_at));
    }
    if telemetry::config::json_mode() {
        log.result(&types::NewsList { source_id, limit, records })?;
    }
    Ok(())
}

pub fn read_import_file(path: &std::path::Path, source_id: i32) -> Result<Vec<NewsRecordInput>> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let items: Vec<FeedItem> = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(items.iter().map(|it| it.to_record(source_id)).collect())
}

async fn import_news(store: &dyn NewsRecordStore, source_id: i32, file: PathBuf, apply: bool) -> Result<()> {
    let log = telemetry::news();
    let _g = log.root_span_kv([
        ("mode", if apply { "apply".to_string() } else { "plan".to_string() }),
        ("source_id", source_id.to_string()),
        ("file", file.display().to_string()),
    ]).entered();

    let records = read_import_file(&file, source_id)?;

    if !apply {
        let _s = log.span(&NewsPhase::Plan).entered();
        log.info(format!("📝 Import plan — source={} items={} file={}", source_id, records.len(), file.display()));
        log.info("   Use --apply to execute.");
        if telemetry::config::json_mode() {
            let plan = types::NewsImportPlan { source_id, file: file.display().to_string(), items: records.len() };
            log.plan(&plan)?;
        }
        return Ok(());
    }

    let _s = log.span(&NewsPhase::Import).entered();
    store.batch_insert(&records).await.context("batch insert news")?;
    log.info(format!("➕ Imported {} news records", records.len()));
    if telemetry::config::json_mode() {
        log.result(&types::NewsImportResult { source_id, inserted: records.len() })?;
    }
    Ok(())
}
