use framekit_core::{
    ApiResult, DpiAwareness, Margins, MenuId, MonitorTarget, OsVersion, Platform, Point, RawMetric,
    RegistryKey, Symbol, SymbolStatus, SystemCommand, WindowId,
};

use crate::dynamic::EntryPoints;
use crate::registry::{self, Hive};
use crate::window::hwnd;
use crate::{dpi, frame, menu, monitor, theme, version, window};

/// The live Win32 platform.
///
/// Instances are cheap: all of them share the process-wide entry-point
/// table, so each optional function is resolved once per process. It
/// normally lives inside the [`framekit_core::Chrome`] context created
/// by [`crate::startup`].
pub struct Win32Platform {
    entry: &'static EntryPoints,
}

impl Win32Platform {
    pub fn new() -> Self {
        Self {
            entry: EntryPoints::shared(),
        }
    }

    /// Whether an optional entry point has been bound, for diagnostics.
    pub fn symbol_status(&self, symbol: Symbol) -> SymbolStatus {
        self.entry.status(symbol)
    }
}

impl Default for Win32Platform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for Win32Platform {
    fn os_version(&self) -> OsVersion {
        version::os_version(self.entry)
    }

    fn dpi_for_window(&self, window: WindowId) -> ApiResult<u32> {
        dpi::for_window(self.entry, hwnd(window))
    }

    fn dpi_for_monitor(&self, target: MonitorTarget) -> ApiResult<(u32, u32)> {
        dpi::for_monitor(self.entry, target)
    }

    fn system_dpi_for_process(&self) -> ApiResult<u32> {
        dpi::system_for_process(self.entry)
    }

    fn dpi_for_system(&self) -> ApiResult<u32> {
        dpi::for_system(self.entry)
    }

    fn device_context_dpi(&self) -> ApiResult<(u32, u32)> {
        dpi::device_context()
    }

    fn window_dpi_awareness(&self, window: WindowId) -> ApiResult<DpiAwareness> {
        dpi::window_awareness(self.entry, hwnd(window))
    }

    fn thread_dpi_awareness(&self) -> ApiResult<DpiAwareness> {
        dpi::thread_awareness(self.entry)
    }

    fn process_dpi_awareness(&self) -> ApiResult<DpiAwareness> {
        dpi::process_awareness(self.entry)
    }

    fn is_process_dpi_aware(&self) -> bool {
        dpi::is_process_aware()
    }

    fn system_metric_for_dpi(&self, metric: RawMetric, dpi: u32) -> ApiResult<i32> {
        dpi::metric_for_dpi(self.entry, metric, dpi)
    }

    fn system_metric(&self, metric: RawMetric) -> i32 {
        dpi::metric(metric)
    }

    fn visible_frame_border_thickness(&self, window: WindowId) -> ApiResult<u32> {
        frame::visible_border_thickness(self.entry, hwnd(window))
    }

    fn is_maximized(&self, window: WindowId) -> bool {
        window::is_maximized(hwnd(window))
    }

    fn is_minimized(&self, window: WindowId) -> bool {
        window::is_minimized(hwnd(window))
    }

    fn is_full_screen(&self, window: WindowId) -> ApiResult<bool> {
        monitor::is_full_screen(hwnd(window))
    }

    fn is_normal(&self, window: WindowId) -> ApiResult<bool> {
        window::is_normal(hwnd(window))
    }

    fn is_right_to_left(&self, window: WindowId) -> bool {
        window::is_right_to_left(hwnd(window))
    }

    fn high_contrast_enabled(&self) -> ApiResult<bool> {
        theme::high_contrast_enabled()
    }

    fn should_apps_use_dark_mode(&self) -> ApiResult<bool> {
        theme::should_apps_use_dark_mode(self.entry)
    }

    fn dwm_composition_enabled(&self) -> ApiResult<bool> {
        frame::composition_enabled(self.entry)
    }

    fn dwm_colorization_color(&self) -> ApiResult<u32> {
        frame::colorization_color(self.entry)
    }

    fn registry_dword(&self, key: RegistryKey, name: &str) -> Option<u32> {
        registry::read_dword(Hive::CurrentUser, key.path(), name)
    }

    fn extend_frame_into_client_area(&self, window: WindowId, margins: Margins) -> ApiResult<()> {
        frame::extend_into_client_area(self.entry, hwnd(window), margins)
    }

    fn set_custom_margins(&self, window: WindowId, margins: Margins) -> ApiResult<()> {
        window::set_margins(hwnd(window), margins)
    }

    fn custom_margins(&self, window: WindowId) -> Option<Margins> {
        window::margins(hwnd(window))
    }

    fn clear_custom_margins(&self, window: WindowId) {
        window::clear_margins(hwnd(window))
    }

    fn refresh_frame(&self, window: WindowId) -> ApiResult<()> {
        window::refresh_frame(hwnd(window))
    }

    fn window_style(&self, window: WindowId) -> ApiResult<u32> {
        window::style(hwnd(window))
    }

    fn set_window_style(&self, window: WindowId, style: u32) -> ApiResult<()> {
        window::set_style(hwnd(window), style)
    }

    fn system_menu(&self, window: WindowId) -> ApiResult<MenuId> {
        menu::system_menu(hwnd(window))
    }

    fn set_menu_item_enabled(
        &self,
        menu: MenuId,
        command: SystemCommand,
        enabled: bool,
    ) -> ApiResult<()> {
        menu::set_item_enabled(menu, command, enabled)
    }

    fn clear_menu_default_item(&self, menu: MenuId) -> ApiResult<()> {
        menu::clear_default_item(menu)
    }

    fn cursor_position(&self) -> ApiResult<Point> {
        monitor::cursor_position()
    }

    fn track_menu(
        &self,
        menu: MenuId,
        window: WindowId,
        position: Point,
        right_to_left: bool,
    ) -> Option<u32> {
        menu::track(menu, hwnd(window), position, right_to_left)
    }

    fn post_system_command(&self, window: WindowId, command: u32) -> ApiResult<()> {
        menu::post_command(hwnd(window), command)
    }
}
