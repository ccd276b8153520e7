//! DPI and DPI-awareness resolution.
//!
//! Both queries walk an ordered list of sources, newest API first, and
//! never fail: `effective_dpi` bottoms out at 96 and `awareness` at the
//! legacy `IsProcessDPIAware` answer.

use crate::chrome::Chrome;
use crate::error::{ApiError, ApiResult, nonzero};
use crate::log_warn;
use crate::platform::{MonitorTarget, Platform, RawMetric};
use crate::strategy::{Strategy, first_success};
use crate::tier::CapabilityTier;
use crate::window::WindowId;

/// The DPI at which a scale factor of 1.0 applies.
pub const USER_DEFAULT_SCREEN_DPI: u32 = 96;

/// How a process, thread or window reacts to DPI changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DpiAwareness {
    /// Bitmap-stretched by the OS; always sees 96 DPI.
    Unaware,
    /// Sees the primary monitor's DPI at login.
    System,
    PerMonitor,
    PerMonitorV2,
    /// The query exists but failed or returned an unknown context.
    Invalid,
}

/// Scales a 96-DPI pixel value to `dpi`, rounding to nearest.
pub fn scale_for_dpi(value: u32, dpi: u32) -> u32 {
    rescale(value as f64, dpi, USER_DEFAULT_SCREEN_DPI) as u32
}

fn rescale(value: f64, to: u32, from: u32) -> f64 {
    (value * f64::from(to) / f64::from(from)).round()
}

fn average(x: u32, y: u32) -> u32 {
    (x + y + 1) / 2
}

type DpiStrategy<P> = Strategy<Chrome<P>, Option<WindowId>, u32>;
type AwarenessStrategy<P> = Strategy<Chrome<P>, Option<WindowId>, DpiAwareness>;

impl<P: Platform> Chrome<P> {
    /// The DPI that applies to `window`, or to the monitor under the
    /// cursor when no window is given. Never zero.
    pub fn effective_dpi(&self, window: Option<WindowId>) -> u32 {
        let window = window.filter(|w| self.check_window(*w, "effective_dpi"));
        let strategies: [DpiStrategy<P>; 5] = [
            Strategy {
                name: "per-window DPI",
                precondition: |c, w| w.is_some() && c.supports(CapabilityTier::Win10Rs1),
                run: Self::window_dpi,
            },
            Strategy {
                name: "per-monitor DPI",
                precondition: |c, _| c.supports(CapabilityTier::Win8_1),
                run: Self::monitor_dpi,
            },
            Strategy {
                name: "per-process system DPI",
                precondition: |c, _| c.supports(CapabilityTier::Win10Rs1),
                run: |c, _| nonzero("GetSystemDpiForProcess", c.platform.system_dpi_for_process()?),
            },
            Strategy {
                name: "system DPI",
                precondition: |c, _| c.supports(CapabilityTier::Win10Rs1),
                run: |c, _| nonzero("GetDpiForSystem", c.platform.dpi_for_system()?),
            },
            Strategy {
                name: "screen device context DPI",
                precondition: |_, _| true,
                run: |c, _| {
                    let (x, y) = c.platform.device_context_dpi()?;
                    nonzero("GetDeviceCaps", average(x, y))
                },
            },
        ];
        first_success(self, window, &strategies).unwrap_or(USER_DEFAULT_SCREEN_DPI)
    }

    fn window_dpi(&self, window: Option<WindowId>) -> ApiResult<u32> {
        let window = window.ok_or(ApiError::Empty("GetDpiForWindow"))?;
        nonzero("GetDpiForWindow", self.platform.dpi_for_window(window)?)
    }

    fn monitor_dpi(&self, window: Option<WindowId>) -> ApiResult<u32> {
        let target = window.map_or(MonitorTarget::NearestToCursor, MonitorTarget::NearestToWindow);
        let (x, y) = self.platform.dpi_for_monitor(target)?;
        if x == 0 || y == 0 {
            return Err(ApiError::Empty("GetDpiForMonitor"));
        }
        Ok(average(x, y))
    }

    /// The DPI awareness of `window`, or of the calling thread/process.
    pub fn awareness(&self, window: Option<WindowId>) -> DpiAwareness {
        let window = window.filter(|w| self.check_window(*w, "awareness"));
        let strategies: [AwarenessStrategy<P>; 4] = [
            Strategy {
                name: "window awareness context",
                precondition: |c, w| w.is_some() && c.supports(CapabilityTier::Win10Rs1),
                run: |c, w| match w {
                    Some(w) => answered(c.platform.window_dpi_awareness(w)),
                    None => Err(ApiError::Empty("GetWindowDpiAwarenessContext")),
                },
            },
            Strategy {
                name: "thread awareness context",
                precondition: |c, _| c.supports(CapabilityTier::Win10Rs1),
                run: |c, _| answered(c.platform.thread_dpi_awareness()),
            },
            Strategy {
                name: "process awareness",
                precondition: |c, _| c.supports(CapabilityTier::Win8_1),
                run: |c, _| answered(c.platform.process_dpi_awareness()),
            },
            Strategy {
                name: "legacy process awareness",
                precondition: |_, _| true,
                run: |c, _| {
                    Ok(if c.platform.is_process_dpi_aware() {
                        DpiAwareness::System
                    } else {
                        DpiAwareness::Unaware
                    })
                },
            },
        ];
        first_success(self, window, &strategies).unwrap_or(DpiAwareness::Unaware)
    }

    /// Converts a metric reported by legacy `GetSystemMetrics` (at the
    /// process's current DPI) to `dpi`.
    pub fn correct_legacy_metric(&self, value: i32, dpi: u32) -> i32 {
        match self.awareness(None) {
            DpiAwareness::Invalid => 0,
            DpiAwareness::Unaware => rescale(f64::from(value), dpi, USER_DEFAULT_SCREEN_DPI) as i32,
            _ => {
                let current = self.effective_dpi(None);
                if current == 0 {
                    0
                } else if current == dpi {
                    value
                } else {
                    rescale(f64::from(value), dpi, current) as i32
                }
            }
        }
    }

    /// A raw system metric at `dpi`, or 0 when no source has one.
    ///
    /// Where `GetSystemMetricsForDpi` exists its answer is final; the
    /// legacy metric is only consulted when it is missing.
    pub(crate) fn raw_metric(&self, metric: RawMetric, dpi: u32) -> u32 {
        if self.supports(CapabilityTier::Win10Rs1) {
            match self.platform.system_metric_for_dpi(metric, dpi) {
                Ok(value) => return value.max(0) as u32,
                Err(e @ ApiError::Unavailable(_)) => log_warn!("{e}"),
                Err(e) => {
                    log_warn!("{e}");
                    return 0;
                }
            }
        }
        let legacy = self.platform.system_metric(metric);
        self.correct_legacy_metric(legacy, dpi).max(0) as u32
    }
}

/// An awareness source that exists but errors reports `Invalid` rather
/// than deferring to the next source.
fn answered(result: ApiResult<DpiAwareness>) -> ApiResult<DpiAwareness> {
    match result {
        Err(ApiError::Unavailable(name)) => Err(ApiError::Unavailable(name)),
        Err(e) => {
            log_warn!("{e}");
            Ok(DpiAwareness::Invalid)
        }
        ok => ok,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SystemError;
    use crate::fake::FakePlatform;
    use crate::tier::OsVersion;

    const WINDOW: WindowId = WindowId(0x1001);

    fn failed(op: &'static str) -> ApiError {
        SystemError::new(op, 1400, "Invalid window handle.").into()
    }

    #[test]
    fn scale_rounds_to_nearest() {
        assert_eq!(scale_for_dpi(8, 96), 8);
        assert_eq!(scale_for_dpi(8, 144), 12);
        assert_eq!(scale_for_dpi(23, 120), 29); // 28.75
        assert_eq!(scale_for_dpi(23, 168), 40); // 40.25
    }

    #[test]
    fn per_window_dpi_preferred_on_rs1() {
        let mut platform = FakePlatform::win10();
        platform.window_dpi = Ok(144);
        platform.monitor_dpi = Ok((120, 120));

        let chrome = Chrome::new(platform);

        assert_eq!(chrome.effective_dpi(Some(WINDOW)), 144);
        assert!(!chrome.platform().called("dpi_for_monitor"));
    }

    #[test]
    fn without_window_uses_monitor_under_cursor() {
        let mut platform = FakePlatform::win10();
        platform.monitor_dpi = Ok((120, 120));

        let chrome = Chrome::new(platform);

        assert_eq!(chrome.effective_dpi(None), 120);
        assert!(!chrome.platform().called("dpi_for_window"));
        assert!(chrome.platform().called("dpi_for_monitor(NearestToCursor)"));
    }

    #[test]
    fn failing_sources_fall_through_in_order() {
        // Arrange
        let mut platform = FakePlatform::win10();
        platform.window_dpi = Err(failed("GetDpiForWindow"));
        platform.monitor_dpi = Err(ApiError::Unavailable("GetDpiForMonitor"));
        platform.system_dpi_process = Ok(0);
        platform.system_dpi = Ok(168);
        let chrome = Chrome::new(platform);

        // Act
        let dpi = chrome.effective_dpi(Some(WINDOW));

        // Assert
        assert_eq!(dpi, 168);
        assert_eq!(
            chrome.platform().calls(),
            vec![
                "os_version",
                "dpi_for_window",
                "dpi_for_monitor(NearestToWindow)",
                "system_dpi_for_process",
                "dpi_for_system",
            ]
        );
    }

    #[test]
    fn legacy_os_uses_device_context_average() {
        let mut platform = FakePlatform::win7();
        platform.dc_dpi = Ok((120, 121));

        let chrome = Chrome::new(platform);

        assert_eq!(chrome.effective_dpi(Some(WINDOW)), 121);
        assert!(!chrome.platform().called("dpi_for_window"));
        assert!(!chrome.platform().called("dpi_for_monitor"));
        assert!(!chrome.platform().called("dpi_for_system"));
    }

    #[test]
    fn everything_failing_yields_96() {
        let mut platform = FakePlatform::win7();
        platform.dc_dpi = Err(failed("GetDC"));

        let chrome = Chrome::new(platform);

        assert_eq!(chrome.effective_dpi(None), USER_DEFAULT_SCREEN_DPI);
    }

    #[test]
    fn effective_dpi_is_idempotent() {
        let mut platform = FakePlatform::win10();
        platform.window_dpi = Ok(120);
        let chrome = Chrome::new(platform);

        let first = chrome.effective_dpi(Some(WINDOW));
        let second = chrome.effective_dpi(Some(WINDOW));

        assert_eq!(first, second);
    }

    #[test]
    fn window_awareness_preferred_on_rs1() {
        let chrome = Chrome::new(FakePlatform::win10());

        assert_eq!(chrome.awareness(Some(WINDOW)), DpiAwareness::PerMonitorV2);
        assert!(!chrome.platform().called("thread_dpi_awareness"));
    }

    #[test]
    fn failing_awareness_source_is_invalid_not_unaware() {
        let mut platform = FakePlatform::win10();
        platform.window_awareness = Err(failed("GetWindowDpiAwarenessContext"));

        let chrome = Chrome::new(platform);

        assert_eq!(chrome.awareness(Some(WINDOW)), DpiAwareness::Invalid);
        assert!(!chrome.platform().called("thread_dpi_awareness"));
    }

    #[test]
    fn unavailable_awareness_source_falls_through() {
        let mut platform = FakePlatform::at(OsVersion::new(6, 3, 9600));
        platform.process_awareness = Err(ApiError::Unavailable("GetProcessDpiAwareness"));
        platform.process_dpi_aware = true;

        let chrome = Chrome::new(platform);

        assert_eq!(chrome.awareness(None), DpiAwareness::System);
    }

    #[test]
    fn legacy_os_uses_is_process_dpi_aware() {
        let mut platform = FakePlatform::win7();
        platform.process_dpi_aware = false;

        let chrome = Chrome::new(platform);

        assert_eq!(chrome.awareness(Some(WINDOW)), DpiAwareness::Unaware);
        assert!(!chrome.platform().called("process_dpi_awareness"));
    }

    #[test]
    fn legacy_metric_correction() {
        // Unaware: the OS reports 96-DPI values.
        let mut platform = FakePlatform::win7();
        platform.process_dpi_aware = false;
        let chrome = Chrome::new(platform);
        assert_eq!(chrome.correct_legacy_metric(4, 144), 6);

        // System aware at 120: values are rescaled from the current DPI.
        let mut platform = FakePlatform::win7();
        platform.process_dpi_aware = true;
        platform.dc_dpi = Ok((120, 120));
        let chrome = Chrome::new(platform);
        assert_eq!(chrome.correct_legacy_metric(5, 120), 5);
        assert_eq!(chrome.correct_legacy_metric(5, 192), 8);
    }

    #[test]
    fn invalid_awareness_zeroes_legacy_metric() {
        let mut platform = FakePlatform::at(OsVersion::new(6, 3, 9600));
        platform.process_awareness = Err(failed("GetProcessDpiAwareness"));

        let chrome = Chrome::new(platform);

        assert_eq!(chrome.correct_legacy_metric(4, 96), 0);
    }

    #[test]
    fn raw_metric_prefers_per_dpi_api() {
        let chrome = Chrome::new(FakePlatform::win10());

        assert_eq!(chrome.raw_metric(RawMetric::Caption, 192), 46);
        assert!(!chrome.platform().called("system_metric("));
    }

    #[test]
    fn raw_metric_falls_back_to_legacy_when_per_dpi_is_missing() {
        let mut platform = FakePlatform::win10();
        platform.per_dpi_metrics = None;
        platform.window_awareness = Ok(DpiAwareness::PerMonitor);
        platform.thread_awareness = Ok(DpiAwareness::PerMonitor);
        platform.monitor_dpi = Ok((96, 96));
        let chrome = Chrome::new(platform);

        assert_eq!(chrome.raw_metric(RawMetric::SizeFrame, 96), 4);
        assert_eq!(chrome.raw_metric(RawMetric::SizeFrame, 144), 6);
    }

    #[test]
    fn per_dpi_api_answer_is_final() {
        let mut platform = FakePlatform::win10();
        platform.per_dpi_metrics = Some(Default::default());
        platform.legacy_metrics.insert(RawMetric::Caption, 31);
        let chrome = Chrome::new(platform);

        assert_eq!(chrome.raw_metric(RawMetric::Caption, 96), 0);
        assert!(!chrome.platform().called("system_metric("));
    }
}
