pub mod actuator;
pub mod chrome;
pub mod color;
pub mod config;
pub mod dpi;
pub mod error;
pub mod log;
pub mod metrics;
pub mod platform;
pub mod resolver;
pub mod strategy;
pub mod theme;
pub mod tier;
pub mod window;

#[cfg(test)]
mod fake;

pub use chrome::Chrome;
pub use color::Color;
pub use config::{Config, FallbackMetrics};
pub use dpi::{DpiAwareness, USER_DEFAULT_SCREEN_DPI, scale_for_dpi};
pub use error::{ApiError, ApiResult, SystemError, nonzero};
pub use metrics::{ChromeMetrics, SystemMetric};
pub use platform::{MonitorTarget, Platform, RawMetric, RegistryKey};
pub use resolver::{Export, Library, Loader, Resolver, Symbol, SymbolStatus};
pub use theme::{ColorizationArea, SystemTheme, ThemeSnapshot};
pub use tier::{CapabilityTier, OsVersion};
pub use window::{Margins, MenuId, Point, SystemCommand, WindowId};
