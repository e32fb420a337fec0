//! File logger for the controller and the CLI hosts.
//!
//! Lines go to `~/.config/projector/logs/projector.log`. Before a line
//! would push the file past `max_file_mb`, the file is renamed to
//! `projector.log.1` (replacing any older backup) and a fresh one started.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use serde::{Deserialize, Serialize};

static LOGGER: OnceLock<Mutex<Logger>> = OnceLock::new();

const LOG_FILE_NAME: &str = "projector.log";
const BACKUP_FILE_NAME: &str = "projector.log.1";
const BYTES_PER_MB: u64 = 1024 * 1024;

/// Largest accepted `max_file_mb`; `Config::validate` clamps to it.
pub const MAX_FILE_MB: u64 = 1024;

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Whether file logging is enabled. Defaults to `false`.
    pub enabled: bool,
    /// Minimum log level: "debug", "info", "warn", or "error".
    pub level: String,
    /// Log file size in megabytes that triggers rotation.
    pub max_file_mb: u64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".into(),
            max_file_mb: 10,
        }
    }
}

impl LogConfig {
    /// Rotation threshold in bytes. Never overflows, whatever the config says.
    pub fn max_bytes(&self) -> u64 {
        self.max_file_mb.saturating_mul(BYTES_PER_MB)
    }
}

/// Log severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    fn tag(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }

    fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Self::Debug,
            "warn" => Self::Warn,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }
}

struct Logger {
    file: File,
    path: PathBuf,
    min_level: Level,
    max_bytes: u64,
    size: u64,
}

impl Logger {
    fn open(log_dir: &Path, config: &LogConfig) -> io::Result<Self> {
        fs::create_dir_all(log_dir)?;
        let path = log_dir.join(LOG_FILE_NAME);
        let file = append_to(&path)?;
        let size = file.metadata().map_or(0, |m| m.len());

        Ok(Self {
            file,
            path,
            min_level: Level::parse(&config.level),
            max_bytes: config.max_bytes(),
            size,
        })
    }

    /// Appends one line, rotating first if it would overflow the file.
    fn append(&mut self, line: &str) -> io::Result<()> {
        let len = line.len() as u64;
        if self.size > 0 && self.size.saturating_add(len) > self.max_bytes {
            self.rotate()?;
        }
        self.file.write_all(line.as_bytes())?;
        self.size = self.size.saturating_add(len);
        Ok(())
    }

    fn rotate(&mut self) -> io::Result<()> {
        fs::rename(&self.path, self.path.with_file_name(BACKUP_FILE_NAME))?;
        self.file = append_to(&self.path)?;
        self.size = 0;
        Ok(())
    }
}

fn append_to(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Starts the global logger under `~/.config/projector/logs/`.
///
/// Does nothing when `config.enabled` is `false`. Only the first call
/// takes effect.
pub fn init(config: &LogConfig) {
    if !config.enabled {
        return;
    }
    let Some(dir) = crate::config::config_dir() else {
        return;
    };
    match Logger::open(&dir.join("logs"), config) {
        Ok(logger) => {
            let _ = LOGGER.set(Mutex::new(logger));
        }
        Err(e) => eprintln!("Warning: file logging disabled: {e}"),
    }
}

/// Writes a line if the logger is running and `level` passes its filter.
pub fn write(level: Level, args: fmt::Arguments<'_>) {
    let Some(mutex) = LOGGER.get() else {
        return;
    };
    let Ok(mut logger) = mutex.lock() else {
        return;
    };
    if level < logger.min_level {
        return;
    }
    let _ = logger.append(&format_line(&timestamp(), level, args));
}

fn format_line(now: &str, level: Level, args: fmt::Arguments<'_>) -> String {
    format!("{now} [{}] {args}\n", level.tag())
}

/// UTC time of day, seconds resolution.
fn timestamp() -> String {
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| d.as_secs());
    format!(
        "{:02}:{:02}:{:02}",
        secs / 3600 % 24,
        secs / 60 % 60,
        secs % 60
    )
}

/// Logs at DEBUG level.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Debug, format_args!($($arg)*)) };
}

/// Logs at INFO level.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Info, format_args!($($arg)*)) };
}

/// Logs at WARN level.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Warn, format_args!($($arg)*)) };
}

/// Logs at ERROR level.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Error, format_args!($($arg)*)) };
}
