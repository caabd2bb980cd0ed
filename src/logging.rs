//! Tracing setup: stderr always, plus a daily rolling file when the log
//! directory is usable.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_PREFIX: &str = "employee-registry";

/// Build the daily rolling appender, creating `log_dir` if needed.
pub fn file_appender(log_dir: &Path) -> Result<RollingFileAppender, InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_PREFIX)
        .filename_suffix("log")
        .build(log_dir)
}

/// Install the global subscriber.
///
/// Falls back to stderr only when the log file cannot be opened. The returned
/// guard must live until exit so buffered file output is flushed.
pub fn init(log_dir: &Path) -> Option<WorkerGuard> {
    let (file_layer, guard, file_error) = match file_appender(log_dir) {
        Ok(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard), None)
        }
        Err(e) => (None, None, Some(e)),
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    if let Some(e) = file_error {
        tracing::warn!("File logging disabled ({}): {}", log_dir.display(), e);
    }

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_appender_creates_dir() {
        let dir = std::env::temp_dir().join(format!("employee-registry-logs-{}", std::process::id()));

        assert!(file_appender(&dir).is_ok());
        assert!(dir.is_dir());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_file_appender_unusable_dir_is_error() {
        // A regular file where the directory should be.
        let blocker = std::env::temp_dir().join(format!("employee-registry-log-blocker-{}", std::process::id()));
        std::fs::write(&blocker, "not a directory").unwrap();

        assert!(file_appender(&blocker.join("logs")).is_err());

        let _ = std::fs::remove_file(&blocker);
    }
}
