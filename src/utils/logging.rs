//! Log file setup
//!
//! Writes `tracing` output to `%APPDATA%\ColorClock\saver.log`. Each launch
//! shifts the previous logs one slot down (`saver.log` becomes `saver.log.1`,
//! and so on) and drops the oldest, so the last [`KEPT_LOG_FILES`] runs stay on
//! disk. Screensaver launches are short and frequent; per-run files keep each
//! one readable on its own.

use crate::config::app_data_dir;
use crate::error::{ColorClockError, Result, StringError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt};

/// Historical log files kept next to the live one
pub const KEPT_LOG_FILES: u8 = 9;

const LOG_PREFIX: &str = "saver";
const LOG_SUFFIX: &str = "log";

/// Initialize file logging under the application data directory
///
/// The level defaults to INFO and can be overridden with `RUST_LOG`.
pub fn init_logging() -> Result<PathBuf> {
    init_logging_in(&app_data_dir())
}

/// Initialize file logging in `log_dir`, returning the live log path
pub fn init_logging_in(log_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(log_dir)?;

    let rotation = LogRotation::new(log_dir.join(format!("{LOG_PREFIX}.{LOG_SUFFIX}")));
    let shifted = rotation.rotate()?;

    // Rotation is done by hand above, so the appender never rolls on its own
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_PREFIX)
        .filename_suffix(LOG_SUFFIX)
        .build(log_dir)
        .map_err(|e| ColorClockError::LoggingError(Box::new(e)))?;

    let subscriber = fmt()
        .with_writer(file_appender)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| ColorClockError::LoggingError(Box::new(e)))?;

    tracing::debug!("Shifted {} previous log file(s)", shifted);
    Ok(rotation.live_path().to_path_buf())
}

/// Startup rotation of one log file and its numbered history
#[derive(Debug, Clone)]
pub struct LogRotation {
    live: PathBuf,
    keep: u8,
}

impl LogRotation {
    /// Rotation for `live` keeping [`KEPT_LOG_FILES`] historical files
    pub const fn new(live: PathBuf) -> Self {
        Self::with_history(live, KEPT_LOG_FILES)
    }

    /// Rotation for `live` keeping `keep` historical files
    pub const fn with_history(live: PathBuf, keep: u8) -> Self {
        Self { live, keep }
    }

    /// Path of the log the current run writes to
    pub fn live_path(&self) -> &Path {
        &self.live
    }

    /// Path of historical file `index` (1 is the most recent)
    pub fn history_path(&self, index: u8) -> Result<PathBuf> {
        let name = self.live.file_name().ok_or_else(|| {
            ColorClockError::LoggingError(StringError::new(format!(
                "log path {} has no file name",
                self.live.display()
            )))
        })?;
        let mut numbered = name.to_os_string();
        numbered.push(format!(".{index}"));
        Ok(self.live.with_file_name(numbered))
    }

    /// Shift existing logs down one slot, returning how many files moved
    ///
    /// Does nothing when the live log does not exist yet.
    pub fn rotate(&self) -> Result<usize> {
        if !self.live.exists() || self.keep == 0 {
            return Ok(0);
        }

        let oldest = self.history_path(self.keep)?;
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }

        let mut moved = 0;
        for index in (1..self.keep).rev() {
            let from = self.history_path(index)?;
            if from.exists() {
                fs::rename(&from, self.history_path(index + 1)?)?;
                moved += 1;
            }
        }

        fs::rename(&self.live, self.history_path(1)?)?;
        Ok(moved + 1)
    }
}
