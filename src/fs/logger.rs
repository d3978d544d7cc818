//! Console and file logger for [`log`].
//!
//! Every line carries the level, the time since the program started and the
//! module the message came from:
//!
//! ```text
//! INFO [1s 230ms] rev::motion::reckless - Reckless goal completed at (20.01 in, 0.02 in, 0.3 deg)
//! WARN [2s 10ms] rev::motion::odom::tracker - Odometry Sensor Error, holding pose: sensor disconnected
//! ```
//!
//! # Example
//!
//! ```ignore
//! use log::LevelFilter;
//! use rev::fs::logger;
//!
//! // Mirror everything into log.txt on the SD card.
//! logger::init_with_file(LevelFilter::Debug, "log.txt")?;
//! ```

use std::{
    fs::{File, OpenOptions},
    io::{BufWriter, Write},
    path::Path,
    sync::{Mutex, OnceLock, PoisonError},
    time::Duration,
};

use humantime::format_duration;
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};

use crate::clock;

/// Logger printing to the console and optionally mirroring into a file.
pub struct RevLogger {
    file: Mutex<Option<BufWriter<File>>>,
}

impl RevLogger {
    /// A logger that only prints to the console.
    pub fn console() -> Self { Self { file: Mutex::new(None) } }

    /// A logger that also writes into `path`, truncating it.
    ///
    /// Falls back to console output when the file can't be opened, e.g.
    /// when no SD card is inserted.
    pub fn with_file(path: impl AsRef<Path>) -> Self {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
            .ok()
            .map(BufWriter::new);
        Self { file: Mutex::new(file) }
    }

    /// Whether lines are being mirrored into a file.
    pub fn has_file(&self) -> bool {
        self.file.lock().unwrap_or_else(PoisonError::into_inner).is_some()
    }
}

impl log::Log for RevLogger {
    fn enabled(&self, metadata: &Metadata) -> bool { metadata.level() <= log::max_level() }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record.level(), clock::uptime(), record.target(), &record.args().to_string());
        print!("{line}");

        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(writer) = file.as_mut() {
            let _ = writer.write_all(line.as_bytes());
        }
    }

    fn flush(&self) {
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(writer) = file.as_mut() {
            let _ = writer.flush();
        }
    }
}

/// Formats one log line, newline included. Uptime is shown to the millisecond.
pub fn format_line(level: Level, uptime: Duration, target: &str, message: &str) -> String {
    let uptime = Duration::from_millis(uptime.as_millis() as u64);
    format!("{level} [{}] {target} - {message}\n", format_duration(uptime))
}

static LOGGER: OnceLock<RevLogger> = OnceLock::new();

fn install(logger: RevLogger, level: LevelFilter) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| logger);
    log::set_logger(logger).map(|()| log::set_max_level(level))
}

/// Installs a console-only logger.
///
/// # Errors
///
/// Returns [`SetLoggerError`] if a logger has already been set.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> { install(RevLogger::console(), level) }

/// Installs a logger that also mirrors every line into `path`.
///
/// # Errors
///
/// Returns [`SetLoggerError`] if a logger has already been set.
pub fn init_with_file(level: LevelFilter, path: impl AsRef<Path>) -> Result<(), SetLoggerError> {
    install(RevLogger::with_file(path), level)
}

#[cfg(test)]
mod tests {
    use log::Log;

    use super::*;

    #[test]
    fn line_format() {
        let line = format_line(Level::Warn, Duration::from_micros(2_010_700), "rev::motion", "glitch");
        assert_eq!(line, "WARN [2s 10ms] rev::motion - glitch\n");
    }

    #[test]
    fn missing_directory_falls_back_to_console() {
        let logger = RevLogger::with_file("/nonexistent-rev-dir/log.txt");
        assert!(!logger.has_file());
    }

    #[test]
    fn mirrors_into_file() {
        let path = std::env::temp_dir().join(format!("rev-logger-{}.txt", std::process::id()));
        init_with_file(LevelFilter::Info, &path).expect("logger already set");

        log::info!(target: "rev::test", "odometry started");
        log::debug!(target: "rev::test", "filtered out");
        log::logger().flush();

        let contents = std::fs::read_to_string(&path).expect("log file missing");
        let _ = std::fs::remove_file(&path);
        assert!(contents.contains("INFO ["));
        assert!(contents.contains("] rev::test - odometry started\n"));
        assert!(!contents.contains("filtered out"));
    }
}
