use anyhow::Result;
use clap::{Args, Subcommand};
use sqlx::PgPool;

use crate::telemetry::{self};
use crate::telemetry::ops::push::Phase as PushPhase;

pub mod db;
pub mod store;
pub mod types;

pub use db::PgPushStore;
pub use store::PushRecordStore;
pub use types::{PushRecord, PushRecordInput, NEWS_TYPE_NEWS};

/// newsfeed push ls/reset
#[derive(Args)]
pub struct PushCmd {
    #[command(subcommand)]
    pub cmd: PushSub,
}

#[derive(Subcommand)]
pub enum PushSub {
    // list push records of a type
    Ls {
        #[arg(long = "type", default_value = NEWS_TYPE_NEWS)]
        news_type: String,
    },
    // drop push records for a source/type (plan-only by default; use --apply to write)
    Reset {
        #[arg(long)]
        source: i32,
        #[arg(long = "type", default_value = NEWS_TYPE_NEWS)]
        news_type: String,
        #[arg(long, default_value_t = false)]
        apply: bool,
    },
}

pub async fn run(pool: &PgPool, args: PushCmd) -> Result<()> {
    let store = PgPushStore::new(pool.clone());
    match args.cmd {
        PushSub::Ls { news_type } => ls_push(&store, news_type).await?,
        PushSub::Reset { source, news_type, apply } => reset_push(&store, source, news_type, apply).await?,
    }
    Ok(())
}

async fn ls_push(store: &dyn PushRecordStore, news_type: String) -> Result<()> {
    let log = telemetry::push();
    let _g = log.root_span_kv([("news_type", news_type.clone())]).entered();
    let _s = log.span(&PushPhase::List).entered();
    let records = store.get_by_type(&news_type).await?;
    log.info(format!("📬 Push records type={} ({} rows):", news_type, records.len()));
    for p in &records {
        log.info(format!(
            "[{}] source={}({}) news={} status={} at={}",
            p.id, p.source_name, p.source_id, p.news_record_id, p.status, p.created_at
        ));
    }
    if telemetry::config::json_mode() {
        log.result(&types::PushList { news_type, records })?;
    }
    Ok(())
}

async fn reset_push(store: &dyn PushRecordStore, source_id: i32, news_type: String, apply: bool) -> Result<()> {
    let log = telemetry::push();
    let _g = log.root_span_kv([
        ("mode", if apply { "apply".to_string() } else { "plan".to_string() }),
        ("source_id", source_id.to_string()),
        ("news_type", news_type.clone()),
    ]).entered();

    if !apply {
        let _s = log.span(&PushPhase::Plan).entered();
        log.info(format!("📝 Push reset plan — source={} type={}", source_id, news_type));
        log.info("   Use --apply to execute.");
        if telemetry::config::json_mode() {
            log.plan(&types::PushResetPlan { action: "reset", source_id, news_type })?;
        }
        return Ok(());
    }

    let _s = log.span(&PushPhase::Reset).entered();
    let deleted = store.delete_by_source_and_type(source_id, &news_type).await?;
    log.info(format!("🧹 Removed {} push records (source={} type={})", deleted, source_id, news_type));
    if telemetry::config::json_mode() {
        log.result(&types::PushResetResult { source_id, news_type, deleted })?;
    }
    Ok(())
}
