//! Tracing subscriber setup for the binary.

use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{LOG_FILE_PREFIX, LOG_FILE_SUFFIX, LOG_MAX_FILES};
use crate::error::BoxError;

/// Daily-rotated `parser.<date>.log` files in `log_dir`, keeping the newest
/// [`LOG_MAX_FILES`].
pub fn rolling_appender(log_dir: &Path) -> Result<RollingFileAppender, BoxError> {
    fs::create_dir_all(log_dir)?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(LOG_MAX_FILES)
        .build(log_dir)?;
    Ok(appender)
}

/// Install a subscriber writing to stderr and to rotated files in `log_dir`.
///
/// Verbosity follows `RUST_LOG` and defaults to `info`. The returned guard
/// flushes the file writer when dropped and must live until the program
/// exits. If the log directory is unusable, logging continues on stderr only.
pub fn init(log_dir: &Path) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, guard, file_error) = match rolling_appender(log_dir) {
        Ok(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard), None)
        }
        Err(e) => (None, None, Some(e)),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    if let Some(e) = file_error {
        tracing::warn!(path = %log_dir.display(), error = %e, "File logging disabled");
    }
    guard
}
