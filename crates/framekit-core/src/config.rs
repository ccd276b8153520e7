use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::log::LogConfig;

/// Top-level configuration for framekit.
///
/// Loaded from `~/.config/framekit/config.toml`. Missing sections
/// fall back to defaults thanks to `#[serde(default)]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// File logging settings.
    pub log: LogConfig,
    /// Constants used when the OS reports no usable metric.
    pub fallback: FallbackMetrics,
}

/// Chrome metrics assumed when the OS cannot provide them, in 96-DPI pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackMetrics {
    /// Resize border with DWM composition active (frame + padded border).
    pub resize_border_aero: u32,
    /// Resize border without composition, where the padded border is gone.
    pub resize_border_classic: u32,
    /// Caption (title text row) height.
    pub caption_height: u32,
}

impl Default for FallbackMetrics {
    fn default() -> Self {
        Self {
            resize_border_aero: 8,
            resize_border_classic: 4,
            caption_height: 23,
        }
    }
}

const MIN_FALLBACK: u32 = 1;
const MAX_FALLBACK: u32 = 64;

impl FallbackMetrics {
    /// Clamps every constant into `1..=64` pixels.
    pub fn validate(&mut self) {
        for value in [
            &mut self.resize_border_aero,
            &mut self.resize_border_classic,
            &mut self.caption_height,
        ] {
            *value = (*value).clamp(MIN_FALLBACK, MAX_FALLBACK);
        }
    }
}

impl Config {
    /// Clamps values to safe ranges.
    pub fn validate(&mut self) {
        self.fallback.validate();
        if self.log.max_file_mb == 0 {
            self.log.max_file_mb = LogConfig::default().max_file_mb;
        }
    }

    /// Parses and validates a TOML document.
    pub fn from_toml(content: &str) -> Result<Self, String> {
        let mut config: Config = toml::from_str(content).map_err(|e| e.to_string())?;
        config.validate();
        Ok(config)
    }
}

/// Returns the config directory: `~/.config/framekit/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("framekit"))
}

/// Returns the config file path: `~/.config/framekit/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Tries to load and parse `config.toml`.
///
/// Returns `Ok(Config)` on success, or an error string describing
/// what went wrong (IO error, parse error, etc.).
pub fn try_load() -> Result<Config, String> {
    let path = config_path().ok_or("could not determine config path")?;
    let content = std::fs::read_to_string(&path).map_err(|e| format!("{}: {e}", path.display()))?;
    Config::from_toml(&content).map_err(|e| format!("{}: {e}", path.display()))
}

/// Loads the configuration from disk, falling back to defaults.
///
/// A missing file silently returns defaults; any other failure is
/// logged as a warning.
pub fn load() -> Config {
    let exists = config_path().is_some_and(|p| p.exists());
    if !exists {
        return Config::default();
    }
    match try_load() {
        Ok(config) => config,
        Err(e) => {
            crate::log_warn!("failed to load config: {e}");
            Config::default()
        }
    }
}
