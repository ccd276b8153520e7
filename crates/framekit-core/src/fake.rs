//! Scripted [`Platform`] for tests.
//!
//! Every field is the canned answer of one OS call. Every call is
//! recorded by name (with its interesting arguments) so tests can assert
//! which calls were made and which were not.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::dpi::{DpiAwareness, scale_for_dpi};
use crate::error::ApiResult;
use crate::platform::{MonitorTarget, Platform, RawMetric, RegistryKey, WS_THICKFRAME};
use crate::tier::OsVersion;
use crate::window::{Margins, MenuId, Point, SystemCommand, WindowId};

const WS_CAPTION: u32 = 0x00C0_0000;

pub(crate) struct FakePlatform {
    pub version: OsVersion,

    pub window_dpi: ApiResult<u32>,
    pub monitor_dpi: ApiResult<(u32, u32)>,
    pub system_dpi_process: ApiResult<u32>,
    pub system_dpi: ApiResult<u32>,
    pub dc_dpi: ApiResult<(u32, u32)>,

    pub window_awareness: ApiResult<DpiAwareness>,
    pub thread_awareness: ApiResult<DpiAwareness>,
    pub process_awareness: ApiResult<DpiAwareness>,
    pub process_dpi_aware: bool,

    /// 96-DPI values served by `GetSystemMetricsForDpi`; `None` when the
    /// API is missing. Absent entries read as 0.
    pub per_dpi_metrics: Option<HashMap<RawMetric, i32>>,
    /// Values served by legacy `GetSystemMetrics`.
    pub legacy_metrics: HashMap<RawMetric, i32>,
    pub frame_border: ApiResult<u32>,

    pub maximized: bool,
    pub minimized: bool,
    pub full_screen: ApiResult<bool>,
    pub normal: ApiResult<bool>,
    pub rtl: bool,

    pub high_contrast: ApiResult<bool>,
    pub dark_mode: ApiResult<bool>,
    pub composition: ApiResult<bool>,
    pub colorization: ApiResult<u32>,
    pub registry: HashMap<(RegistryKey, String), u32>,

    pub extend_result: ApiResult<()>,
    pub extended: RefCell<Vec<Margins>>,
    pub custom: RefCell<HashMap<WindowId, Margins>>,
    pub refresh_result: ApiResult<()>,
    pub style: Cell<u32>,

    pub menu: ApiResult<MenuId>,
    pub menu_item_result: ApiResult<()>,
    pub cursor: ApiResult<Point>,
    pub tracked: Option<u32>,

    calls: RefCell<Vec<String>>,
}

impl FakePlatform {
    /// A healthy system at `version`, 96 DPI, stock metrics.
    pub fn at(version: OsVersion) -> Self {
        let metrics = HashMap::from([
            (RawMetric::SizeFrame, 4),
            (RawMetric::PaddedBorder, 4),
            (RawMetric::Caption, 23),
        ]);
        Self {
            version,
            window_dpi: Ok(96),
            monitor_dpi: Ok((96, 96)),
            system_dpi_process: Ok(96),
            system_dpi: Ok(96),
            dc_dpi: Ok((96, 96)),
            window_awareness: Ok(DpiAwareness::PerMonitorV2),
            thread_awareness: Ok(DpiAwareness::PerMonitorV2),
            process_awareness: Ok(DpiAwareness::PerMonitor),
            process_dpi_aware: true,
            per_dpi_metrics: Some(metrics.clone()),
            legacy_metrics: metrics,
            frame_border: Ok(1),
            maximized: false,
            minimized: false,
            full_screen: Ok(false),
            normal: Ok(true),
            rtl: false,
            high_contrast: Ok(false),
            dark_mode: Ok(false),
            composition: Ok(true),
            colorization: Ok(0xC400_78D7),
            registry: HashMap::new(),
            extend_result: Ok(()),
            extended: RefCell::new(Vec::new()),
            custom: RefCell::new(HashMap::new()),
            refresh_result: Ok(()),
            style: Cell::new(WS_CAPTION | WS_THICKFRAME),
            menu: Ok(MenuId(0x50)),
            menu_item_result: Ok(()),
            cursor: Ok(Point::new(100, 200)),
            tracked: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Windows 10 22H2.
    pub fn win10() -> Self {
        Self::at(OsVersion::new(10, 0, 19045))
    }

    /// Windows 7 SP1.
    pub fn win7() -> Self {
        Self::at(OsVersion::new(6, 1, 7601))
    }

    pub fn set_registry(&mut self, key: RegistryKey, name: &str, value: u32) {
        self.registry.insert((key, name.to_string()), value);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Whether any recorded call starts with `prefix`.
    pub fn called(&self, prefix: &str) -> bool {
        self.count(prefix) > 0
    }

    /// Number of recorded calls starting with `prefix`.
    pub fn count(&self, prefix: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.borrow_mut().push(call.into());
    }
}

impl Platform for FakePlatform {
    fn os_version(&self) -> OsVersion {
        self.record("os_version");
        self.version
    }

    fn dpi_for_window(&self, _window: WindowId) -> ApiResult<u32> {
        self.record("dpi_for_window");
        self.window_dpi.clone()
    }

    fn dpi_for_monitor(&self, target: MonitorTarget) -> ApiResult<(u32, u32)> {
        let target = match target {
            MonitorTarget::NearestToWindow(_) => "NearestToWindow",
            MonitorTarget::NearestToCursor => "NearestToCursor",
        };
        self.record(format!("dpi_for_monitor({target})"));
        self.monitor_dpi.clone()
    }

    fn system_dpi_for_process(&self) -> ApiResult<u32> {
        self.record("system_dpi_for_process");
        self.system_dpi_process.clone()
    }

    fn dpi_for_system(&self) -> ApiResult<u32> {
        self.record("dpi_for_system");
        self.system_dpi.clone()
    }

    fn device_context_dpi(&self) -> ApiResult<(u32, u32)> {
        self.record("device_context_dpi");
        self.dc_dpi.clone()
    }

    fn window_dpi_awareness(&self, _window: WindowId) -> ApiResult<DpiAwareness> {
        self.record("window_dpi_awareness");
        self.window_awareness.clone()
    }

    fn thread_dpi_awareness(&self) -> ApiResult<DpiAwareness> {
        self.record("thread_dpi_awareness");
        self.thread_awareness.clone()
    }

    fn process_dpi_awareness(&self) -> ApiResult<DpiAwareness> {
        self.record("process_dpi_awareness");
        self.process_awareness.clone()
    }

    fn is_process_dpi_aware(&self) -> bool {
        self.record("is_process_dpi_aware");
        self.process_dpi_aware
    }

    fn system_metric_for_dpi(&self, metric: RawMetric, dpi: u32) -> ApiResult<i32> {
        self.record(format!("system_metric_for_dpi({metric:?}, {dpi})"));
        match &self.per_dpi_metrics {
            Some(metrics) => {
                let base = metrics.get(&metric).copied().unwrap_or(0);
                Ok(scale_for_dpi(base.max(0) as u32, dpi) as i32)
            }
            None => Err(crate::ApiError::Unavailable("GetSystemMetricsForDpi")),
        }
    }

    fn system_metric(&self, metric: RawMetric) -> i32 {
        self.record(format!("system_metric({metric:?})"));
        self.legacy_metrics.get(&metric).copied().unwrap_or(0)
    }

    fn visible_frame_border_thickness(&self, _window: WindowId) -> ApiResult<u32> {
        self.record("visible_frame_border_thickness");
        self.frame_border.clone()
    }

    fn is_maximized(&self, _window: WindowId) -> bool {
        self.record("is_maximized");
        self.maximized
    }

    fn is_minimized(&self, _window: WindowId) -> bool {
        self.record("is_minimized");
        self.minimized
    }

    fn is_full_screen(&self, _window: WindowId) -> ApiResult<bool> {
        self.record("is_full_screen");
        self.full_screen.clone()
    }

    fn is_normal(&self, _window: WindowId) -> ApiResult<bool> {
        self.record("is_normal");
        self.normal.clone()
    }

    fn is_right_to_left(&self, _window: WindowId) -> bool {
        self.record("is_right_to_left");
        self.rtl
    }

    fn high_contrast_enabled(&self) -> ApiResult<bool> {
        self.record("high_contrast_enabled");
        self.high_contrast.clone()
    }

    fn should_apps_use_dark_mode(&self) -> ApiResult<bool> {
        self.record("should_apps_use_dark_mode");
        self.dark_mode.clone()
    }

    fn dwm_composition_enabled(&self) -> ApiResult<bool> {
        self.record("dwm_composition_enabled");
        self.composition.clone()
    }

    fn dwm_colorization_color(&self) -> ApiResult<u32> {
        self.record("dwm_colorization_color");
        self.colorization.clone()
    }

    fn registry_dword(&self, key: RegistryKey, name: &str) -> Option<u32> {
        self.record(format!("registry_dword({key:?}, {name})"));
        self.registry.get(&(key, name.to_string())).copied()
    }

    fn extend_frame_into_client_area(&self, _window: WindowId, margins: Margins) -> ApiResult<()> {
        self.record("extend_frame_into_client_area");
        self.extend_result.clone()?;
        self.extended.borrow_mut().push(margins);
        Ok(())
    }

    fn set_custom_margins(&self, window: WindowId, margins: Margins) -> ApiResult<()> {
        self.record("set_custom_margins");
        self.custom.borrow_mut().insert(window, margins);
        Ok(())
    }

    fn custom_margins(&self, window: WindowId) -> Option<Margins> {
        self.record("custom_margins");
        self.custom.borrow().get(&window).copied()
    }

    fn clear_custom_margins(&self, window: WindowId) {
        self.record("clear_custom_margins");
        self.custom.borrow_mut().remove(&window);
    }

    fn refresh_frame(&self, _window: WindowId) -> ApiResult<()> {
        self.record("refresh_frame");
        self.refresh_result.clone()
    }

    fn window_style(&self, _window: WindowId) -> ApiResult<u32> {
        self.record("window_style");
        Ok(self.style.get())
    }

    fn set_window_style(&self, _window: WindowId, style: u32) -> ApiResult<()> {
        self.record(format!("set_window_style(0x{style:X})"));
        self.style.set(style);
        Ok(())
    }

    fn system_menu(&self, _window: WindowId) -> ApiResult<MenuId> {
        self.record("system_menu");
        self.menu.clone()
    }

    fn set_menu_item_enabled(
        &self,
        _menu: MenuId,
        command: SystemCommand,
        enabled: bool,
    ) -> ApiResult<()> {
        self.record(format!("set_menu_item_enabled({command:?}, {enabled})"));
        self.menu_item_result.clone()
    }

    fn clear_menu_default_item(&self, _menu: MenuId) -> ApiResult<()> {
        self.record("clear_menu_default_item");
        Ok(())
    }

    fn cursor_position(&self) -> ApiResult<Point> {
        self.record("cursor_position");
        self.cursor.clone()
    }

    fn track_menu(
        &self,
        _menu: MenuId,
        _window: WindowId,
        position: Point,
        right_to_left: bool,
    ) -> Option<u32> {
        let direction = if right_to_left { "rtl" } else { "ltr" };
        self.record(format!("track_menu({}, {}, {direction})", position.x, position.y));
        self.tracked
    }

    fn post_system_command(&self, _window: WindowId, command: u32) -> ApiResult<()> {
        self.record(format!("post_system_command(0x{command:X})"));
        Ok(())
    }
}
