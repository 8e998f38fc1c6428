use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

use crate::error::{SyncError, SyncResult};
use crate::telemetry::{self};
use crate::telemetry::ops::sources::Phase as SourcesPhase;

pub mod types;

pub use types::SourceConfig;

pub const DEFAULT_SOURCES_PATH: &str = "news-source.json";

/// newsfeed sources ls
#[derive(Args)]
pub struct SourcesCmd {
    #[command(subcommand)]
    pub cmd: SourcesSub,
}

#[derive(Subcommand)]
pub enum SourcesSub {
    // list configured sources
    Ls {
        /// Path to the JSON source list. Falls back to NEWS_SOURCES_PATH.
        #[arg(long)]
        sources: Option<PathBuf>,
    },
}

pub async fn run(args: SourcesCmd) -> Result<()> {
    match args.cmd {
        SourcesSub::Ls { sources } => ls_sources(&resolve_path(sources)),
    }
}

fn ls_sources(path: &Path) -> Result<()> {
    let log = telemetry::sources();
    let _g = log.root_span_kv([("path", path.display().to_string())]).entered();
    let _s = log.span(&SourcesPhase::Load).entered();
    let sources = load_or_empty(path);
    log.info(format!("📡 Sources ({}):", sources.len()));
    for s in &sources {
        log.info(format!("[{}] {}", s.id, s.name));
    }
    if telemetry::config::json_mode() {
        let list = types::SourceList { path: path.display().to_string(), sources };
        log.result(&list)?;
    }
    Ok(())
}

/// CLI flag, then NEWS_SOURCES_PATH, then `news-source.json` in the cwd.
pub fn resolve_path(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| std::env::var("NEWS_SOURCES_PATH").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCES_PATH))
}

pub fn load(path: &Path) -> SyncResult<Vec<SourceConfig>> {
    let config_err = |reason: String| SyncError::ConfigLoad { path: path.display().to_string(), reason };
    let raw = std::fs::read_to_string(path).map_err(|e| config_err(e.to_string()))?;
    serde_json::from_str(&raw).map_err(|e| config_err(e.to_string()))
}

/// A missing or malformed source list is not fatal: the run becomes a no-op.
pub fn load_or_empty(path: &Path) -> Vec<SourceConfig> {
    let log = telemetry::sources();
    match load(path) {
        Ok(sources) => {
            log.info_kv(&format!("loaded {} sources", sources.len()), [("path", path.display().to_string())]);
            sources
        }
        Err(e) => {
            log.error_kv(&format!("❌ {e}"), [("kind", e.kind().to_string())]);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_sources_in_file_order() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"[{{"id": 3, "name": "Wire"}}, {{"id": 1, "name": "X"}}]"#).unwrap();
        let sources = load(f.path()).unwrap();
        assert_eq!(sources, vec![
            SourceConfig { id: 3, name: "Wire".into() },
            SourceConfig { id: 1, name: "X".into() },
        ]);
    }

    #[test]
    fn missing_file_is_a_config_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("nope.json")).unwrap_err();
        assert_eq!(err.kind(), "config_load");
    }

    #[test]
    fn malformed_file_falls_back_to_empty() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "{{ not json").unwrap();
        assert!(load_or_empty(f.path()).is_empty());
    }

    #[test]
    fn flag_wins_over_default() {
        let p = resolve_path(Some(PathBuf::from("custom.json")));
        assert_eq!(p, PathBuf::from("custom.json"));
    }
}
