//! Win32 implementation of the framekit platform layer.
//!
//! Everything version-dependent is reached through [`dynamic`], which
//! binds optional entry points at runtime so the same binary runs from
//! Windows 7 onward.
#![cfg(windows)]

/// Typed accessors for optional OS entry points.
mod dynamic;

/// Conversion of Win32 failures into framekit errors.
mod error;

/// DWM frame queries and frame extension.
mod frame;

/// System32-only library loading.
mod loader;

/// System menu display.
mod menu;

/// Monitor lookup and full-screen detection.
mod monitor;

/// `Platform` implementation.
pub mod platform;

/// Read-only registry access.
mod registry;

/// DPI and awareness queries.
mod dpi;

/// High contrast and dark mode.
mod theme;

/// OS version detection.
mod version;

/// Window state, styles and properties.
mod window;

use framekit_core::{Chrome, config, log, log_info};

pub use platform::Win32Platform;

/// Loads the configuration, starts logging and creates the chrome
/// context for this process.
///
/// Config problems are logged before the log file is open; they are
/// held back and written by `log::init`.
pub fn startup() -> Chrome<Win32Platform> {
    let config = config::load();
    log::init(&config.log);
    log_info!("framekit starting");
    Chrome::with_fallback(Win32Platform::new(), config.fallback)
}

/// Encodes `s` as a nul-terminated UTF-16 string.
pub(crate) fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}
