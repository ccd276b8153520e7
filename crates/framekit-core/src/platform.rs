//! The OS seam.
//!
//! [`Platform`] is the full set of primitive OS operations framekit
//! needs. Each method is one query or one side effect with no fallback
//! logic of its own: choosing between sources, substituting defaults and
//! sequencing multi-step operations all happen in [`crate::Chrome`].
//!
//! Methods backed by an optional entry point return
//! [`ApiError::Unavailable`](crate::ApiError::Unavailable) when the
//! running OS does not export it.

use crate::dpi::DpiAwareness;
use crate::error::ApiResult;
use crate::tier::OsVersion;
use crate::window::{Margins, MenuId, Point, SystemCommand, WindowId};

/// `WS_THICKFRAME`: the sizing-border window style.
pub const WS_THICKFRAME: u32 = 0x0004_0000;

/// Which monitor a per-monitor DPI query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorTarget {
    NearestToWindow(WindowId),
    NearestToCursor,
}

/// The raw system metrics chrome geometry is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawMetric {
    /// `SM_CXSIZEFRAME`
    SizeFrame,
    /// `SM_CXPADDEDBORDER`
    PaddedBorder,
    /// `SM_CYCAPTION`
    Caption,
}

/// Per-user registry keys the theme queries read (under `HKCU`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistryKey {
    /// `Software\Microsoft\Windows\CurrentVersion\Themes\Personalize`
    Personalize,
    /// `Software\Microsoft\Windows\DWM`
    Dwm,
}

impl RegistryKey {
    pub fn path(self) -> &'static str {
        match self {
            Self::Personalize => r"Software\Microsoft\Windows\CurrentVersion\Themes\Personalize",
            Self::Dwm => r"Software\Microsoft\Windows\DWM",
        }
    }
}

pub trait Platform {
    /// The running OS version.
    fn os_version(&self) -> OsVersion;

    // DPI

    /// `GetDpiForWindow`.
    fn dpi_for_window(&self, window: WindowId) -> ApiResult<u32>;
    /// `GetDpiForMonitor` with `MDT_EFFECTIVE_DPI`, as `(x, y)`.
    fn dpi_for_monitor(&self, target: MonitorTarget) -> ApiResult<(u32, u32)>;
    /// `GetSystemDpiForProcess` for the current process.
    fn system_dpi_for_process(&self) -> ApiResult<u32>;
    /// `GetDpiForSystem`.
    fn dpi_for_system(&self) -> ApiResult<u32>;
    /// `LOGPIXELSX`/`LOGPIXELSY` of the screen device context.
    fn device_context_dpi(&self) -> ApiResult<(u32, u32)>;

    // Awareness. An `Ok(Invalid)` means the source answered with an
    // unrecognized context.

    fn window_dpi_awareness(&self, window: WindowId) -> ApiResult<DpiAwareness>;
    fn thread_dpi_awareness(&self) -> ApiResult<DpiAwareness>;
    /// `GetProcessDpiAwareness` for the current process.
    fn process_dpi_awareness(&self) -> ApiResult<DpiAwareness>;
    /// `IsProcessDPIAware`, present on every supported OS.
    fn is_process_dpi_aware(&self) -> bool;

    // Metrics

    /// `GetSystemMetricsForDpi`.
    fn system_metric_for_dpi(&self, metric: RawMetric, dpi: u32) -> ApiResult<i32>;
    /// `GetSystemMetrics`, reported at the process's current DPI.
    fn system_metric(&self, metric: RawMetric) -> i32;
    /// `DWMWA_VISIBLE_FRAME_BORDER_THICKNESS`.
    fn visible_frame_border_thickness(&self, window: WindowId) -> ApiResult<u32>;

    // Window state

    fn is_maximized(&self, window: WindowId) -> bool;
    fn is_minimized(&self, window: WindowId) -> bool;
    /// Whether the window rect covers its whole monitor.
    fn is_full_screen(&self, window: WindowId) -> ApiResult<bool>;
    /// Whether the window placement's show command is `SW_SHOWNORMAL`.
    fn is_normal(&self, window: WindowId) -> ApiResult<bool>;
    /// Whether the window has `WS_EX_LAYOUTRTL`.
    fn is_right_to_left(&self, window: WindowId) -> bool;

    // Theme

    /// `SPI_GETHIGHCONTRAST` with `HCF_HIGHCONTRASTON`.
    fn high_contrast_enabled(&self) -> ApiResult<bool>;
    /// UxTheme ordinal 132.
    fn should_apps_use_dark_mode(&self) -> ApiResult<bool>;
    /// `DwmIsCompositionEnabled`.
    fn dwm_composition_enabled(&self) -> ApiResult<bool>;
    /// `DwmGetColorizationColor`, as `0xAARRGGBB`.
    fn dwm_colorization_color(&self) -> ApiResult<u32>;
    /// A `REG_DWORD` value under `HKCU`, or `None` if absent.
    fn registry_dword(&self, key: RegistryKey, name: &str) -> Option<u32>;

    // Frame

    /// `DwmExtendFrameIntoClientArea`.
    fn extend_frame_into_client_area(&self, window: WindowId, margins: Margins) -> ApiResult<()>;
    /// Tags the window with the client-area margins the windowing layer applies.
    fn set_custom_margins(&self, window: WindowId, margins: Margins) -> ApiResult<()>;
    fn custom_margins(&self, window: WindowId) -> Option<Margins>;
    /// Drops the tag; absent tags are ignored.
    fn clear_custom_margins(&self, window: WindowId);
    /// `SetWindowPos` with `SWP_FRAMECHANGED` and nothing else changed.
    fn refresh_frame(&self, window: WindowId) -> ApiResult<()>;
    fn window_style(&self, window: WindowId) -> ApiResult<u32>;
    fn set_window_style(&self, window: WindowId, style: u32) -> ApiResult<()>;

    // System menu

    fn system_menu(&self, window: WindowId) -> ApiResult<MenuId>;
    fn set_menu_item_enabled(
        &self,
        menu: MenuId,
        command: SystemCommand,
        enabled: bool,
    ) -> ApiResult<()>;
    fn clear_menu_default_item(&self, menu: MenuId) -> ApiResult<()>;
    fn cursor_position(&self) -> ApiResult<Point>;
    /// Shows the menu modally and returns the chosen command id, if any.
    fn track_menu(
        &self,
        menu: MenuId,
        window: WindowId,
        position: Point,
        right_to_left: bool,
    ) -> Option<u32>;
    /// Posts `WM_SYSCOMMAND` to the window.
    fn post_system_command(&self, window: WindowId, command: u32) -> ApiResult<()>;
}
