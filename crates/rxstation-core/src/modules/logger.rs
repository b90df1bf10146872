//! Tracing subscriber setup.
//!
//! Console output goes to stderr so stdout stays clean for `--json`
//! output. `RUST_LOG` takes precedence over the configured level.

use std::path::Path;
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, EnvFilter};

const LOG_FILE_PREFIX: &str = "rxstation.log";

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("failed to prepare log directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to install subscriber: {0}")]
    Init(#[from] TryInitError),
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber.
///
/// With `log_dir`, events are also written to a daily-rolling file; keep the
/// returned guard alive for as long as file logging should flush.
pub fn init_logger(level: &str, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>, LoggerError> {
    let console = fmt::layer().with_target(false).with_writer(std::io::stderr);
    let registry = tracing_subscriber::registry().with(env_filter(level)).with(console);

    match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            registry.with(fmt::layer().with_ansi(false).with_writer(writer)).try_init()?;
            Ok(Some(guard))
        },
        None => {
            registry.try_init()?;
            Ok(None)
        },
    }
}
