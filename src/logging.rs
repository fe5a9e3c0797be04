// src/logging.rs

use crate::error::PickerError;
use log::{info, warn};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Daily log files are named `log.YYYY-MM-DD.log`.
const LOG_FILE_PREFIX: &str = "log";
const LOG_FILE_SUFFIX: &str = "log";

/// Daily-rotating appender writing into `log_dir`.
pub fn file_appender(log_dir: &Path) -> Result<RollingFileAppender, InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix(LOG_FILE_SUFFIX)
        .build(log_dir)
}

/// Installs the process-wide subscriber: a console layer on stderr and, when
/// `log_dir` resolves, a daily file layer. `RUST_LOG` overrides the default
/// `info` level. `log` records from every module are routed through it.
///
/// `log_dir` is `None` when file logging is disabled. A directory that could
/// not be determined or opened is reported as a warning once logging is up.
pub fn init_logger(log_dir: Option<Result<PathBuf, PickerError>>) {
    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let mut file_error: Option<String> = None;
    let mut file_dir: Option<PathBuf> = None;
    let file_layer = match log_dir {
        None => None,
        Some(Err(e)) => {
            file_error = Some(e.to_string());
            None
        }
        Some(Ok(dir)) => match file_appender(&dir) {
            Ok(appender) => {
                file_dir = Some(dir);
                Some(fmt::layer().with_writer(appender).with_ansi(false))
            }
            Err(e) => {
                file_error = Some(format!("'{}': {}", dir.display(), e));
                None
            }
        },
    };

    let installed = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(true),
        )
        .with(file_layer)
        .with(filter_layer)
        .try_init();
    if installed.is_err() {
        return;
    }

    if let Some(dir) = file_dir {
        info!("Logging to daily files in '{}'.", dir.display());
    }
    if let Some(e) = file_error {
        warn!("Could not open log file, logging to console only: {}", e);
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_file_appender_writes_daily_file() {
        let dir = tempdir().unwrap();
        let mut appender = file_appender(dir.path()).unwrap();

        appender.write_all(b"first line\n").unwrap();
        appender.flush().unwrap();

        let files: Vec<PathBuf> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        assert_eq!(files.len(), 1);
        let name = files[0].file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("log."), "unexpected name {name}");
        assert!(name.ends_with(".log"), "unexpected name {name}");
        assert_eq!(fs::read_to_string(&files[0]).unwrap(), "first line\n");
    }

    #[test]
    fn test_capturing_logger_sees_records() {
        testing::capture_logs();
        log::warn!("capture check 7f3a");
        assert!(testing::captured_lines()
            .iter()
            .any(|line| line == "WARN capture check 7f3a"));
    }
}
