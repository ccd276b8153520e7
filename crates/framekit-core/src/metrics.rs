//! Chrome geometry.
//!
//! Every value here is recomputed from OS state on each call. Callers
//! re-query after DPI changes, theme changes and maximize/restore.

use crate::chrome::Chrome;
use crate::dpi::{USER_DEFAULT_SCREEN_DPI, scale_for_dpi};
use crate::error::ApiError;
use crate::platform::{Platform, RawMetric};
use crate::tier::CapabilityTier;
use crate::window::WindowId;
use crate::{log_debug, log_warn};

/// The four metrics custom chrome is laid out with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemMetric {
    /// Width of the invisible sizing border, padded border included.
    ResizeBorderThickness,
    /// Height of the caption (the title text row).
    CaptionHeight,
    /// Caption plus, for restored windows, the top resize border.
    TitleBarHeight,
    /// Width of the thin visible frame line DWM draws.
    FrameBorderThickness,
}

/// All four metrics of one window, taken together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChromeMetrics {
    pub resize_border_thickness: u32,
    pub caption_height: u32,
    pub title_bar_height: u32,
    pub frame_border_thickness: u32,
}

impl<P: Platform> Chrome<P> {
    /// Computes `kind` for `window`, in physical pixels at the window's
    /// effective DPI when `dpi_scale` is set, otherwise at 96 DPI.
    ///
    /// When the OS reports nothing, the configured fallback constants are
    /// used, multiplied by effective DPI / 96 if `dpi_scale` is set.
    ///
    /// Returns 0 for the null window.
    pub fn metric(&self, window: WindowId, kind: SystemMetric, dpi_scale: bool) -> u32 {
        if !self.check_window(window, "metric") {
            return 0;
        }
        let dpi = self.metric_dpi(window, dpi_scale);
        match kind {
            SystemMetric::ResizeBorderThickness => self.resize_border_thickness(dpi),
            SystemMetric::CaptionHeight => self.caption_height(dpi),
            SystemMetric::TitleBarHeight => self.title_bar_height(window, dpi),
            SystemMetric::FrameBorderThickness => self.frame_border_thickness(window, dpi_scale, dpi),
        }
    }

    /// Computes all four metrics against a single DPI reading.
    pub fn chrome_metrics(&self, window: WindowId, dpi_scale: bool) -> ChromeMetrics {
        if !self.check_window(window, "chrome_metrics") {
            return ChromeMetrics::default();
        }
        let dpi = self.metric_dpi(window, dpi_scale);
        let resize_border_thickness = self.resize_border_thickness(dpi);
        let caption_height = self.caption_height(dpi);
        let title_bar_height = if self.is_maximized_or_full_screen(window) {
            caption_height
        } else {
            caption_height + resize_border_thickness
        };
        ChromeMetrics {
            resize_border_thickness,
            caption_height,
            title_bar_height,
            frame_border_thickness: self.frame_border_thickness(window, dpi_scale, dpi),
        }
    }

    pub fn is_maximized(&self, window: WindowId) -> bool {
        self.check_window(window, "is_maximized") && self.platform.is_maximized(window)
    }

    pub fn is_minimized(&self, window: WindowId) -> bool {
        self.check_window(window, "is_minimized") && self.platform.is_minimized(window)
    }

    /// Whether the window exactly covers its monitor.
    pub fn is_full_screen(&self, window: WindowId) -> bool {
        if !self.check_window(window, "is_full_screen") {
            return false;
        }
        self.platform.is_full_screen(window).unwrap_or_else(|e| {
            log_warn!("{e}");
            false
        })
    }

    /// Whether the window is in the restored (neither maximized nor
    /// minimized) placement.
    pub fn is_normal(&self, window: WindowId) -> bool {
        if !self.check_window(window, "is_normal") {
            return false;
        }
        self.platform.is_normal(window).unwrap_or_else(|e| {
            log_warn!("{e}");
            false
        })
    }

    pub fn is_maximized_or_full_screen(&self, window: WindowId) -> bool {
        self.is_maximized(window) || self.is_full_screen(window)
    }

    fn metric_dpi(&self, window: WindowId, dpi_scale: bool) -> u32 {
        if dpi_scale {
            self.effective_dpi(Some(window))
        } else {
            USER_DEFAULT_SCREEN_DPI
        }
    }

    fn resize_border_thickness(&self, dpi: u32) -> u32 {
        let result =
            self.raw_metric(RawMetric::SizeFrame, dpi) + self.raw_metric(RawMetric::PaddedBorder, dpi);
        if result > 0 {
            return result;
        }
        // Without composition the padded border disappears.
        let fallback = if self.is_composition_enabled() {
            self.fallback.resize_border_aero
        } else {
            self.fallback.resize_border_classic
        };
        log_debug!("no resize border metric, using {fallback}px at 96 DPI");
        scale_for_dpi(fallback, dpi)
    }

    fn caption_height(&self, dpi: u32) -> u32 {
        match self.raw_metric(RawMetric::Caption, dpi) {
            0 => scale_for_dpi(self.fallback.caption_height, dpi),
            height => height,
        }
    }

    fn title_bar_height(&self, window: WindowId, dpi: u32) -> u32 {
        let caption = self.caption_height(dpi);
        if self.is_maximized_or_full_screen(window) {
            caption
        } else {
            caption + self.resize_border_thickness(dpi)
        }
    }

    fn frame_border_thickness(&self, window: WindowId, dpi_scale: bool, dpi: u32) -> u32 {
        if !self.supports(CapabilityTier::Win10) {
            return 1;
        }
        let thickness = match self.platform.visible_frame_border_thickness(window) {
            Ok(value) => value,
            Err(e @ ApiError::Unavailable(_)) => {
                log_warn!("{e}");
                1
            }
            // Builds predating the attribute reject it as an invalid
            // parameter; that is expected and not worth a warning.
            Err(_) => 1,
        };
        if dpi_scale {
            scale_for_dpi(thickness, dpi)
        } else {
            thickness
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FallbackMetrics;
    use crate::error::SystemError;
    use crate::fake::FakePlatform;
    use crate::log::{self, Level};

    const WINDOW: WindowId = WindowId(0x2002);

    /// A Windows 10 platform whose per-DPI and legacy metrics are all zero.
    fn no_metrics() -> FakePlatform {
        let mut platform = FakePlatform::win10();
        platform.per_dpi_metrics = Some(Default::default());
        platform.legacy_metrics = Default::default();
        platform
    }

    #[test]
    fn resize_border_is_frame_plus_padding() {
        let chrome = Chrome::new(FakePlatform::win10());

        assert_eq!(chrome.metric(WINDOW, SystemMetric::ResizeBorderThickness, false), 8);
    }

    #[test]
    fn scaled_metrics_use_window_dpi() {
        let mut platform = FakePlatform::win10();
        platform.window_dpi = Ok(144);
        let chrome = Chrome::new(platform);

        assert_eq!(chrome.metric(WINDOW, SystemMetric::ResizeBorderThickness, true), 12);
        assert_eq!(chrome.metric(WINDOW, SystemMetric::CaptionHeight, true), 35); // 34.5
    }

    #[test]
    fn unscaled_metrics_never_query_dpi() {
        let chrome = Chrome::new(FakePlatform::win10());

        let _ = chrome.metric(WINDOW, SystemMetric::CaptionHeight, false);

        assert!(!chrome.platform().called("dpi_for_window"));
    }

    #[test]
    fn zero_metrics_fall_back_to_aero_constant() {
        let chrome = Chrome::new(no_metrics());

        assert_eq!(chrome.metric(WINDOW, SystemMetric::ResizeBorderThickness, false), 8);
        assert_eq!(chrome.metric(WINDOW, SystemMetric::CaptionHeight, false), 23);
    }

    #[test]
    fn zero_per_dpi_metrics_ignore_legacy_values() {
        let mut platform = FakePlatform::win10();
        platform.per_dpi_metrics = Some(Default::default());
        platform.legacy_metrics = [
            (RawMetric::SizeFrame, 5),
            (RawMetric::PaddedBorder, 5),
            (RawMetric::Caption, 31),
        ]
        .into_iter()
        .collect();
        let chrome = Chrome::new(platform);

        assert_eq!(chrome.metric(WINDOW, SystemMetric::ResizeBorderThickness, false), 8);
        assert_eq!(chrome.metric(WINDOW, SystemMetric::CaptionHeight, false), 23);
        assert!(!chrome.platform().called("system_metric("));
    }

    #[test]
    fn classic_fallback_without_composition() {
        // Arrange: Windows 7 with composition off and no metrics.
        let mut platform = FakePlatform::win7();
        platform.legacy_metrics = Default::default();
        platform.composition = Ok(false);
        platform.dc_dpi = Ok((144, 144));
        let chrome = Chrome::new(platform);

        // Act
        let unscaled = chrome.metric(WINDOW, SystemMetric::ResizeBorderThickness, false);
        let scaled = chrome.metric(WINDOW, SystemMetric::ResizeBorderThickness, true);

        // Assert
        assert_eq!(unscaled, 4);
        assert_eq!(scaled, 6);
    }

    #[test]
    fn configured_fallbacks_are_used() {
        let fallback = FallbackMetrics {
            caption_height: 30,
            ..FallbackMetrics::default()
        };

        let chrome = Chrome::with_fallback(no_metrics(), fallback);

        assert_eq!(chrome.metric(WINDOW, SystemMetric::CaptionHeight, false), 30);
    }

    #[test]
    fn title_bar_includes_resize_border_when_restored() {
        let chrome = Chrome::new(FakePlatform::win10());

        let caption = chrome.metric(WINDOW, SystemMetric::CaptionHeight, false);
        let border = chrome.metric(WINDOW, SystemMetric::ResizeBorderThickness, false);
        let title_bar = chrome.metric(WINDOW, SystemMetric::TitleBarHeight, false);

        assert_eq!(title_bar, caption + border);
    }

    #[test]
    fn title_bar_is_caption_when_maximized_or_full_screen() {
        let mut maximized = FakePlatform::win10();
        maximized.maximized = true;
        let mut full_screen = FakePlatform::win10();
        full_screen.full_screen = Ok(true);

        for platform in [maximized, full_screen] {
            let chrome = Chrome::new(platform);
            assert_eq!(
                chrome.metric(WINDOW, SystemMetric::TitleBarHeight, false),
                chrome.metric(WINDOW, SystemMetric::CaptionHeight, false)
            );
        }
    }

    #[test]
    fn frame_border_is_one_before_windows_10() {
        let mut platform = FakePlatform::at(crate::tier::OsVersion::new(6, 3, 9600));
        platform.frame_border = Ok(3);
        platform.window_dpi = Ok(192);
        let chrome = Chrome::new(platform);

        assert_eq!(chrome.metric(WINDOW, SystemMetric::FrameBorderThickness, false), 1);
        assert_eq!(chrome.metric(WINDOW, SystemMetric::FrameBorderThickness, true), 1);
        assert!(!chrome.platform().called("visible_frame_border_thickness"));
    }

    #[test]
    fn frame_border_from_dwm_on_windows_10() {
        let mut platform = FakePlatform::win10();
        platform.frame_border = Ok(1);
        platform.window_dpi = Ok(192);
        let chrome = Chrome::new(platform);

        assert_eq!(chrome.metric(WINDOW, SystemMetric::FrameBorderThickness, false), 1);
        assert_eq!(chrome.metric(WINDOW, SystemMetric::FrameBorderThickness, true), 2);
    }

    #[test]
    fn frame_border_attribute_error_is_silent() {
        let mut platform = FakePlatform::win10();
        platform.frame_border =
            Err(SystemError::new("DwmGetWindowAttribute", 87, "The parameter is incorrect.").into());
        let chrome = Chrome::new(platform);
        log::capture();

        let thickness = chrome.metric(WINDOW, SystemMetric::FrameBorderThickness, false);

        assert_eq!(thickness, 1);
        assert!(log::take_captured().iter().all(|(level, _)| *level != Level::Warn));
    }

    #[test]
    fn snapshot_matches_individual_metrics() {
        let chrome = Chrome::new(FakePlatform::win10());

        let snapshot = chrome.chrome_metrics(WINDOW, false);

        assert_eq!(
            snapshot,
            ChromeMetrics {
                resize_border_thickness: 8,
                caption_height: 23,
                title_bar_height: 31,
                frame_border_thickness: 1,
            }
        );
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "null window handle")]
    fn null_window_asserts_in_debug() {
        let chrome = Chrome::new(FakePlatform::win10());
        let _ = chrome.metric(WindowId(0), SystemMetric::CaptionHeight, false);
    }
}
