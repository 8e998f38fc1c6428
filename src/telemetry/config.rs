use std::fs::{File, OpenOptions};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

static JSON_MODE: AtomicBool = AtomicBool::new(false);

/// `--json`: emit one structured envelope on stdout.
pub fn set_json_mode(on: bool) { JSON_MODE.store(on, Ordering::SeqCst); }

pub fn json_mode() -> bool { JSON_MODE.load(Ordering::SeqCst) }

pub fn logs_are_json() -> bool {
    matches!(std::env::var("NEWSFEED_LOG_FORMAT").as_deref(), Ok("json"))
}

fn log_file() -> Option<File> {
    let path = std::env::var("NEWSFEED_LOG_FILE").ok().filter(|p| !p.trim().is_empty())?;
    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(f) => Some(f),
        Err(e) => {
            eprintln!("cannot open log file {path}: {e}; logging to stderr only");
            None
        }
    }
}

/// Initialize tracing/logging according to RUST_LOG and NEWSFEED_LOG_FORMAT.
/// - Defaults to `info` if `RUST_LOG` is unset
/// - Supports `NEWSFEED_LOG_FORMAT=json` for JSON logs (stderr)
/// - `NEWSFEED_LOG_FILE=path` additionally appends plain-text logs to a file
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};
    use tracing_subscriber::prelude::*; // for .with()

    // Default filter if RUST_LOG unset
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    let file_layer = log_file().map(|f| fmt::layer().with_target(false).with_ansi(false).with_writer(Mutex::new(f)));
    let builder = tracing_subscriber::registry().with(filter).with(file_layer);

    match std::env::var("NEWSFEED_LOG_FORMAT").as_deref() {
        Ok("json") => {
            let _ = builder.with(fmt_layer.json().flatten_event(true)).try_init();
        }
        _ => {
            // human-friendly compact text
            let _ = builder.with(fmt_layer.compact()).try_init();
        }
    }
}
