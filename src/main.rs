use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use std::env;

use newsfeed_sync::{init, news, push, sources, sync, telemetry};

#[derive(Parser)]
#[command(name = "newsfeed", about = "Sync configured news sources into storage and queue push records")]
struct Cli {
    #[arg(global = true, short, long)]
    dsn: Option<String>,
    /// Emit a single JSON envelope to stdout; logs go to stderr
    #[arg(global = true, long, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the news schema
    Init,
    Sources(sources::SourcesCmd),
    Sync(sync::SyncCmd),
    News(news::NewsCmd),
    Push(push::PushCmd),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    telemetry::config::set_json_mode(cli.json);

    // initialize logging/tracing (stderr). Respect RUST_LOG and NEWSFEED_LOG_FORMAT
    telemetry::config::init_tracing();

    if let Err(e) = dispatch(cli).await {
        tracing::error!("❌ run failed: {e:#}");
        return Err(e);
    }
    Ok(())
}

async fn dispatch(cli: Cli) -> Result<()> {
    // source listing is file-only; everything else needs the database
    let command = match cli.command {
        Commands::Sources(args) => return sources::run(args).await,
        other => other,
    };

    let dsn = cli
        .dsn
        .or_else(|| env::var("DATABASE_URL").ok())
        .ok_or_else(|| anyhow!("Please provide --dsn or set DATABASE_URL in .env"))?;
    let pool = init::connect(&dsn).await?;

    match command {
        Commands::Init => init::run(&pool).await?,
        Commands::Sync(args) => sync::run(&pool, args).await?,
        Commands::News(args) => news::run(&pool, args).await?,
        Commands::Push(args) => push::run(&pool, args).await?,
        Commands::Sources(_) => {}
    }
    Ok(())
}
