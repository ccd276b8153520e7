use std::mem;

use framekit_core::{ApiError, ApiResult, MonitorTarget, Point};
use windows::Win32::Foundation::{HWND, POINT, RECT};
use windows::Win32::Graphics::Gdi::{
    GetMonitorInfoW, HMONITOR, MONITOR_DEFAULTTONEAREST, MONITORINFO, MonitorFromPoint,
    MonitorFromWindow,
};
use windows::Win32::UI::WindowsAndMessaging::{GetCursorPos, GetWindowRect};

use crate::error;
use crate::window::hwnd;

/// The monitor a per-monitor query applies to.
pub(crate) fn nearest(target: MonitorTarget) -> ApiResult<HMONITOR> {
    // SAFETY: both lookups accept any handle/point and fall back to the
    // nearest monitor.
    let monitor = match target {
        MonitorTarget::NearestToWindow(window) => unsafe {
            MonitorFromWindow(hwnd(window), MONITOR_DEFAULTTONEAREST)
        },
        MonitorTarget::NearestToCursor => {
            let cursor = cursor_position()?;
            unsafe { MonitorFromPoint(POINT { x: cursor.x, y: cursor.y }, MONITOR_DEFAULTTONEAREST) }
        }
    };
    if monitor.is_invalid() {
        return Err(ApiError::Empty("MonitorFromWindow"));
    }
    Ok(monitor)
}

pub(crate) fn cursor_position() -> ApiResult<Point> {
    let mut point = POINT::default();
    // SAFETY: `point` is a valid out pointer.
    let result = unsafe { GetCursorPos(&mut point) };
    result.map_err(|e| error::from_windows("GetCursorPos", e))?;
    Ok(Point::new(point.x, point.y))
}

/// Whether the window rect equals the full (not work-area) rect of its
/// monitor.
pub(crate) fn is_full_screen(window: HWND) -> ApiResult<bool> {
    let mut rect = RECT::default();
    // SAFETY: `rect` is a valid out pointer.
    let result = unsafe { GetWindowRect(window, &mut rect) };
    result.map_err(|e| error::from_windows("GetWindowRect", e))?;

    // SAFETY: MonitorFromWindow accepts any window handle.
    let monitor = unsafe { MonitorFromWindow(window, MONITOR_DEFAULTTONEAREST) };
    let mut info = MONITORINFO {
        cbSize: mem::size_of::<MONITORINFO>() as u32,
        ..Default::default()
    };
    // SAFETY: cbSize is set as the API requires.
    if !unsafe { GetMonitorInfoW(monitor, &mut info) }.as_bool() {
        return Err(error::last_error("GetMonitorInfoW").into());
    }

    let screen = info.rcMonitor;
    Ok(rect.left == screen.left
        && rect.top == screen.top
        && rect.right == screen.right
        && rect.bottom == screen.bottom)
}
