//! File logging for the terminal host.
//!
//! The alternate screen owns stdout, so events go to a daily-rolled file
//! under the platform cache dir. `RUST_LOG` overrides the default filter.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "rangeslider=info,rangeslider_core=info,rangeslider_tui=info";
const LOG_FILE: &str = "rangeslider.log";

/// Keeps the background writer alive; drop it last to flush pending lines.
pub struct LoggingGuard {
    _guard: WorkerGuard,
    log_dir: PathBuf,
}

impl LoggingGuard {
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

/// `<cache dir>/rangeslider/logs`, falling back to the temp dir.
pub fn log_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("rangeslider")
        .join("logs")
}

fn ensure_log_dir() -> Option<PathBuf> {
    let preferred = log_dir();
    if std::fs::create_dir_all(&preferred).is_ok() {
        return Some(preferred);
    }
    let fallback = std::env::temp_dir().join("rangeslider").join("logs");
    std::fs::create_dir_all(&fallback).ok()?;
    Some(fallback)
}

/// Install the global subscriber. Returns `None` when no log dir can be
/// created or a subscriber is already set.
pub fn init() -> Option<LoggingGuard> {
    let log_dir = ensure_log_dir()?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true),
    );

    if subscriber.try_init().is_err() {
        return None;
    }

    tracing::info!(log_dir = %log_dir.display(), "tracing initialized");

    Some(LoggingGuard {
        _guard: guard,
        log_dir,
    })
}
