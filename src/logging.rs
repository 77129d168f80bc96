//! File-based logging.
//!
//! The TUI owns the terminal, so tracing output goes to a daily rotated file
//! instead of stdout.

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::config::LoggingSettings;

const LOG_FILE_PREFIX: &str = "spotify-triage";

/// Initialize the logging system.
///
/// Logs are written to `<directory>/spotify-triage.YYYY-MM-DD.log`. `RUST_LOG`
/// overrides the configured filter. The returned guard flushes the writer on
/// drop and must live as long as the application.
pub fn init_logging(settings: &LoggingSettings) -> anyhow::Result<WorkerGuard> {
    let log_dir = Path::new(&settings.directory);
    if !log_dir.exists() {
        std::fs::create_dir_all(log_dir)?;
    }

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_PREFIX);

    // Non-blocking writer; the guard flushes it
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.filter));

    let fmt_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::info!("Logging initialized - logs written to {}/", settings.directory);

    Ok(guard)
}
