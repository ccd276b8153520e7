//! framekit's diagnostic log.
//!
//! Fallback decisions (an entry point missing on this OS, a DWM call
//! failing, a metric replaced by its constant) are reported here rather
//! than returned, since every query still produces an answer. Lines go
//! to `~/.config/framekit/logs/framekit.log`, rotated to
//! `framekit.log.1` past the configured size.
//!
//! Lines logged before [`init`] (config loading runs first) are held in
//! a small backlog and written once the file is open.
//!
//! A thread can also capture its own lines in memory with [`capture`],
//! so a GUI shell or a test can surface warnings without the file.

use std::cell::RefCell;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use serde::{Deserialize, Serialize};

/// `None` until [`init`] runs; then the file sink, if logging is enabled.
static SINK: OnceLock<Option<Mutex<Sink>>> = OnceLock::new();
static BACKLOG: Mutex<Backlog> = Mutex::new(Backlog::new());

thread_local! {
    static CAPTURED: RefCell<Option<Vec<(Level, String)>>> = const { RefCell::new(None) };
}

const LOG_FILE_NAME: &str = "framekit.log";
const ROTATED_FILE_NAME: &str = "framekit.log.1";
const BACKLOG_CAPACITY: usize = 64;

/// The `[log]` section of `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Defaults to `false`.
    pub enabled: bool,
    /// "debug", "info", "warn" or "error". Fallback notices are warnings.
    pub level: String,
    /// Size in megabytes at which the file is rotated.
    pub max_file_mb: u64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "warn".into(),
            max_file_mb: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }

    /// Unknown names mean `Warn`.
    fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Self::Debug,
            "info" => Self::Info,
            "error" => Self::Error,
            _ => Self::Warn,
        }
    }
}

/// Formatted lines logged before the sink exists.
struct Backlog {
    lines: Vec<(Level, String)>,
    dropped: usize,
}

impl Backlog {
    const fn new() -> Self {
        Self {
            lines: Vec::new(),
            dropped: 0,
        }
    }

    /// Keeps the first lines; later ones are only counted.
    fn push(&mut self, level: Level, line: String) {
        if self.lines.len() < BACKLOG_CAPACITY {
            self.lines.push((level, line));
        } else {
            self.dropped += 1;
        }
    }

    /// Empties the backlog, keeping lines at `min_level` or above.
    fn drain(&mut self, min_level: Level) -> (Vec<String>, usize) {
        let dropped = std::mem::take(&mut self.dropped);
        let lines = std::mem::take(&mut self.lines)
            .into_iter()
            .filter(|(level, _)| *level >= min_level)
            .map(|(_, line)| line)
            .collect();
        (lines, dropped)
    }
}

struct Sink {
    file: File,
    path: PathBuf,
    min_level: Level,
    max_bytes: u64,
    written: u64,
}

impl Sink {
    fn open(config: &LogConfig) -> Option<Self> {
        let log_dir = crate::config::config_dir()?.join("logs");
        let _ = fs::create_dir_all(&log_dir);
        let path = log_dir.join(LOG_FILE_NAME);
        let file = OpenOptions::new().create(true).append(true).open(&path).ok()?;
        let written = file.metadata().map(|m| m.len()).unwrap_or(0);
        Some(Self {
            file,
            path,
            min_level: Level::parse(&config.level),
            max_bytes: config.max_file_mb * 1024 * 1024,
            written,
        })
    }

    fn append(&mut self, line: &str) {
        let _ = self.file.write_all(line.as_bytes());
        self.written += line.len() as u64;
        if self.max_bytes > 0 && self.written >= self.max_bytes {
            self.rotate();
        }
    }

    fn rotate(&mut self) {
        let rotated = self.path.with_file_name(ROTATED_FILE_NAME);
        let _ = fs::rename(&self.path, &rotated);
        if let Ok(f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            self.file = f;
        }
        self.written = 0;
    }
}

/// Opens the log file per `config` and flushes the backlog into it.
///
/// Only the first call has an effect. With logging disabled the
/// backlog is discarded.
pub fn init(config: &LogConfig) {
    let sink = if config.enabled { Sink::open(config) } else { None };
    if SINK.set(sink.map(Mutex::new)).is_err() {
        return;
    }
    let Ok(mut backlog) = BACKLOG.lock() else {
        return;
    };
    let Some(Some(mutex)) = SINK.get() else {
        *backlog = Backlog::new();
        return;
    };
    let Ok(mut sink) = mutex.lock() else {
        return;
    };
    let (lines, dropped) = backlog.drain(sink.min_level);
    for line in lines {
        sink.append(&line);
    }
    if dropped > 0 {
        let line = format_line(Level::Warn, format_args!("{dropped} early log lines were dropped"));
        sink.append(&line);
    }
}

/// Starts capturing this thread's log lines in memory.
///
/// Captured lines are kept whatever the file's level.
pub fn capture() {
    CAPTURED.with(|c| *c.borrow_mut() = Some(Vec::new()));
}

/// Returns and clears the lines captured on this thread.
pub fn take_captured() -> Vec<(Level, String)> {
    CAPTURED.with(|c| c.borrow_mut().as_mut().map(std::mem::take).unwrap_or_default())
}

/// Backs the `log_*!` macros.
pub fn write(level: Level, args: fmt::Arguments<'_>) {
    CAPTURED.with(|c| {
        if let Some(lines) = c.borrow_mut().as_mut() {
            lines.push((level, args.to_string()));
        }
    });

    match SINK.get() {
        None => {
            if let Ok(mut backlog) = BACKLOG.lock() {
                backlog.push(level, format_line(level, args));
            }
        }
        Some(None) => {}
        Some(Some(mutex)) => {
            let Ok(mut sink) = mutex.lock() else {
                return;
            };
            if level >= sink.min_level {
                sink.append(&format_line(level, args));
            }
        }
    }
}

fn format_line(level: Level, args: fmt::Arguments<'_>) -> String {
    format!("{} [{}] {args}\n", timestamp(), level.as_str())
}

/// UTC wall-clock time of day.
fn timestamp() -> String {
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let (h, m, s) = (secs / 3600 % 24, secs / 60 % 60, secs % 60);
    format!("{h:02}:{m:02}:{s:02}")
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Debug, format_args!($($arg)*)) };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Info, format_args!($($arg)*)) };
}

/// Used for every fallback taken because the OS could not answer.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Warn, format_args!($($arg)*)) };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Error, format_args!($($arg)*)) };
}
