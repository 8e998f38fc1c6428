use anyhow::{anyhow, Result};
use clap::Args;
use sqlx::PgPool;
use std::path::PathBuf;
use std::time::Instant;

use crate::client::HttpFeedClient;
use crate::news::PgNewsStore;
use crate::output::types::RunMeta;
use crate::push::{PgPushStore, NEWS_TYPE_NEWS};
use crate::sources::{self};
use crate::telemetry::{self};
use crate::telemetry::ops::sync::Phase as SyncPhase;

pub mod engine;
pub mod types;

pub use engine::{select_new_items, ReconciliationEngine, SyncOptions, DEFAULT_WINDOW};
pub use types::{ReconcileResult, SourceOutcome, SourcePlan, SyncReport};

/// newsfeed sync: reconcile every configured source against the news API
#[derive(Args)]
pub struct SyncCmd {
    /// JSON source list. Falls back to NEWS_SOURCES_PATH, then news-source.json.
    #[arg(long)] pub sources: Option<PathBuf>,
    /// News API base URL. Falls back to NEWS_API_URL.
    #[arg(long)] pub api_url: Option<String>,
    /// Dedup window: recent records per source considered known.
    #[arg(long, default_value_t = DEFAULT_WINDOW)] pub window: i64,
    /// Clear this type's push records for a source before writing its new items.
    #[arg(long, default_value_t = false)] pub reset_push: bool,
    #[arg(long, default_value = NEWS_TYPE_NEWS)] pub news_type: String,
    /// Compute the diff only; write nothing.
    #[arg(long, default_value_t = false)] pub plan: bool,
    #[arg(long, default_value_t = 10)] pub plan_limit: usize,
}

pub async fn run(pool: &PgPool, args: SyncCmd) -> Result<()> {
    let log = telemetry::sync();
    let sources_path = sources::resolve_path(args.sources.clone());
    let _g = log.root_span_kv([
        ("mode", if args.plan { "plan".to_string() } else { "apply".to_string() }),
        ("sources", sources_path.display().to_string()),
        ("window", args.window.to_string()),
        ("reset_push", args.reset_push.to_string()),
        ("news_type", args.news_type.clone()),
    ]).entered();

    let api_url = args
        .api_url
        .clone()
        .or_else(|| std::env::var("NEWS_API_URL").ok())
        .ok_or_else(|| anyhow!("Please provide --api-url or set NEWS_API_URL in .env"))?;

    let sources = {
        let _s = log.span(&SyncPhase::LoadSources).entered();
        sources::load_or_empty(&sources_path)
    };

    let news = PgNewsStore::new(pool.clone());
    let push = PgPushStore::new(pool.clone());
    let client = HttpFeedClient::new(&api_url)?;
    let opts = SyncOptions { window: args.window.max(0), reset_push: args.reset_push, news_type: args.news_type.clone() };
    let engine = ReconciliationEngine::new(&news, &push, &client, opts);

    if args.plan {
        let per_source = engine.plan(&sources, args.plan_limit).await;
        for p in per_source.iter().filter_map(|o| o.done()) {
            log.info(format!(
                "📝 Sync plan — source={}({}) known={} fetched={} new={} reset={}",
                p.source_name, p.source_id, p.known, p.fetched, p.new, p.would_reset
            ));
            for item in &p.sample_new { log.info(format!("  + {} {}", item.id, item.title)); }
        }
        log.info("   Drop --plan to execute.");
        if telemetry::config::json_mode() {
            let o = engine.options();
            let plan = types::SyncPlan {
                sources: sources.len(),
                window: o.window,
                reset_push: o.reset_push,
                news_type: o.news_type.clone(),
                per_source,
            };
            log.plan(&plan)?;
        }
        return Ok(());
    }

    let t0 = Instant::now();
    let report = engine.run(&sources).await;
    if telemetry::config::json_mode() {
        let meta = RunMeta { duration_ms: t0.elapsed().as_millis(), sources: report.totals.sources, failed: report.totals.failed };
        log.result_with_meta(&report, meta)?;
    }
    Ok(())
}
