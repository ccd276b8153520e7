//! Raw DPI and awareness queries, one OS source each.

use framekit_core::{ApiError, ApiResult, DpiAwareness, MonitorTarget, RawMetric, nonzero};
use windows::Win32::Foundation::{HANDLE, HWND};
use windows::Win32::Graphics::Gdi::{
    GET_DEVICE_CAPS_INDEX, GetDC, GetDeviceCaps, HDC, LOGPIXELSX, LOGPIXELSY, ReleaseDC,
};
use windows::Win32::System::Threading::GetCurrentProcess;
use windows::Win32::UI::WindowsAndMessaging::{
    GetSystemMetrics, IsProcessDPIAware, SM_CXPADDEDBORDER, SM_CXSIZEFRAME, SM_CYCAPTION,
    SYSTEM_METRICS_INDEX,
};

use crate::dynamic::{DpiAwarenessContext, EntryPoints, PER_MONITOR_AWARE_V2};
use crate::error;
use crate::monitor;

/// `MDT_EFFECTIVE_DPI`
const MDT_EFFECTIVE_DPI: i32 = 0;

pub(crate) fn for_window(entry: &EntryPoints, window: HWND) -> ApiResult<u32> {
    let get_dpi_for_window = entry.get_dpi_for_window()?;
    // SAFETY: GetDpiForWindow returns 0 for an invalid handle.
    let dpi = unsafe { get_dpi_for_window(window) };
    if dpi == 0 {
        return Err(error::last_error("GetDpiForWindow").into());
    }
    Ok(dpi)
}

pub(crate) fn for_monitor(entry: &EntryPoints, target: MonitorTarget) -> ApiResult<(u32, u32)> {
    let get_dpi_for_monitor = entry.get_dpi_for_monitor()?;
    let monitor = monitor::nearest(target)?;
    let (mut x, mut y) = (0, 0);
    // SAFETY: `monitor` is a live monitor handle; `x` and `y` are valid
    // out pointers.
    let hr = unsafe { get_dpi_for_monitor(monitor, MDT_EFFECTIVE_DPI, &mut x, &mut y) };
    error::check("GetDpiForMonitor", hr)?;
    Ok((x, y))
}

pub(crate) fn system_for_process(entry: &EntryPoints) -> ApiResult<u32> {
    let get_system_dpi_for_process = entry.get_system_dpi_for_process()?;
    // SAFETY: the pseudo handle of the current process is always valid.
    let dpi = unsafe { get_system_dpi_for_process(GetCurrentProcess()) };
    nonzero("GetSystemDpiForProcess", dpi)
}

pub(crate) fn for_system(entry: &EntryPoints) -> ApiResult<u32> {
    let get_dpi_for_system = entry.get_dpi_for_system()?;
    // SAFETY: takes no arguments.
    nonzero("GetDpiForSystem", unsafe { get_dpi_for_system() })
}

/// A screen device context, released on drop.
struct ScreenDc(HDC);

impl ScreenDc {
    fn acquire() -> ApiResult<Self> {
        // SAFETY: GetDC(None) returns the screen DC or null.
        let hdc = unsafe { GetDC(None) };
        if hdc.is_invalid() {
            return Err(ApiError::Empty("GetDC"));
        }
        Ok(Self(hdc))
    }

    fn caps(&self, index: GET_DEVICE_CAPS_INDEX) -> u32 {
        // SAFETY: `self.0` is a live DC until drop.
        let value = unsafe { GetDeviceCaps(Some(self.0), index) };
        value.max(0) as u32
    }
}

impl Drop for ScreenDc {
    fn drop(&mut self) {
        // SAFETY: the DC was obtained with GetDC(None) and is released once.
        let _ = unsafe { ReleaseDC(None, self.0) };
    }
}

/// `LOGPIXELSX`/`LOGPIXELSY` of the screen.
pub(crate) fn device_context() -> ApiResult<(u32, u32)> {
    let dc = ScreenDc::acquire()?;
    Ok((dc.caps(LOGPIXELSX), dc.caps(LOGPIXELSY)))
}

pub(crate) fn window_awareness(entry: &EntryPoints, window: HWND) -> ApiResult<DpiAwareness> {
    let get_context = entry.get_window_dpi_awareness_context()?;
    // SAFETY: returns null for an invalid handle.
    let context = unsafe { get_context(window) };
    if context == 0 {
        return Err(error::last_error("GetWindowDpiAwarenessContext").into());
    }
    context_awareness(entry, context)
}

pub(crate) fn thread_awareness(entry: &EntryPoints) -> ApiResult<DpiAwareness> {
    let get_context = entry.get_thread_dpi_awareness_context()?;
    // SAFETY: takes no arguments.
    let context = unsafe { get_context() };
    context_awareness(entry, context)
}

fn context_awareness(entry: &EntryPoints, context: DpiAwarenessContext) -> ApiResult<DpiAwareness> {
    // V2 reports plain per-monitor awareness, so it has to be detected
    // by comparing contexts.
    if let Ok(are_equal) = entry.are_dpi_awareness_contexts_equal() {
        // SAFETY: both arguments are awareness context values.
        if unsafe { are_equal(context, PER_MONITOR_AWARE_V2) } != 0 {
            return Ok(DpiAwareness::PerMonitorV2);
        }
    }
    let get_awareness = entry.get_awareness_from_dpi_awareness_context()?;
    // SAFETY: returns DPI_AWARENESS_INVALID (-1) for unknown contexts.
    Ok(from_raw(unsafe { get_awareness(context) }))
}

pub(crate) fn process_awareness(entry: &EntryPoints) -> ApiResult<DpiAwareness> {
    let get_process_dpi_awareness = entry.get_process_dpi_awareness()?;
    let mut value = 0;
    // SAFETY: a null process handle means the current process.
    let hr = unsafe { get_process_dpi_awareness(HANDLE::default(), &mut value) };
    error::check("GetProcessDpiAwareness", hr)?;
    Ok(from_raw(value))
}

pub(crate) fn is_process_aware() -> bool {
    // SAFETY: takes no arguments.
    unsafe { IsProcessDPIAware().as_bool() }
}

/// Maps `DPI_AWARENESS` / `PROCESS_DPI_AWARENESS`, which share values.
fn from_raw(value: i32) -> DpiAwareness {
    match value {
        0 => DpiAwareness::Unaware,
        1 => DpiAwareness::System,
        2 => DpiAwareness::PerMonitor,
        _ => DpiAwareness::Invalid,
    }
}

fn index(metric: RawMetric) -> SYSTEM_METRICS_INDEX {
    match metric {
        RawMetric::SizeFrame => SM_CXSIZEFRAME,
        RawMetric::PaddedBorder => SM_CXPADDEDBORDER,
        RawMetric::Caption => SM_CYCAPTION,
    }
}

pub(crate) fn metric_for_dpi(entry: &EntryPoints, metric: RawMetric, dpi: u32) -> ApiResult<i32> {
    let get_system_metrics_for_dpi = entry.get_system_metrics_for_dpi()?;
    // SAFETY: plain integer arguments.
    Ok(unsafe { get_system_metrics_for_dpi(index(metric).0, dpi) })
}

pub(crate) fn metric(metric: RawMetric) -> i32 {
    // SAFETY: plain integer argument.
    unsafe { GetSystemMetrics(index(metric)) }
}
