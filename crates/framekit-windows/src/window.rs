use std::mem;

use framekit_core::{ApiResult, Margins, WindowId};
use windows::Win32::Foundation::{HANDLE, HWND, SetLastError, WIN32_ERROR};
use windows::Win32::UI::WindowsAndMessaging::{
    GWL_EXSTYLE, GWL_STYLE, GetPropW, GetWindowLongPtrW, GetWindowPlacement, IsIconic, IsZoomed,
    RemovePropW, SW_SHOWNORMAL, SWP_FRAMECHANGED, SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOOWNERZORDER,
    SWP_NOSIZE, SWP_NOZORDER, SetPropW, SetWindowLongPtrW, SetWindowPos, WINDOWPLACEMENT,
    WS_EX_LAYOUTRTL,
};
use windows::core::PCWSTR;

use crate::error;
use crate::wide;

/// Property marking that custom margins were stored, so that all-zero
/// margins can be told apart from none.
const MARGINS_PROP: &str = "framekit.margins";
const MARGIN_PROPS: [&str; 4] = [
    "framekit.margins.left",
    "framekit.margins.top",
    "framekit.margins.right",
    "framekit.margins.bottom",
];

pub(crate) fn hwnd(window: WindowId) -> HWND {
    HWND(window.0 as *mut _)
}

pub(crate) fn is_maximized(window: HWND) -> bool {
    // SAFETY: IsZoomed accepts any window handle.
    unsafe { IsZoomed(window).as_bool() }
}

pub(crate) fn is_minimized(window: HWND) -> bool {
    // SAFETY: IsIconic accepts any window handle.
    unsafe { IsIconic(window).as_bool() }
}

pub(crate) fn is_normal(window: HWND) -> ApiResult<bool> {
    let mut placement = WINDOWPLACEMENT {
        length: mem::size_of::<WINDOWPLACEMENT>() as u32,
        ..Default::default()
    };
    // SAFETY: `length` is set as the API requires.
    let result = unsafe { GetWindowPlacement(window, &mut placement) };
    result.map_err(|e| error::from_windows("GetWindowPlacement", e))?;
    Ok(placement.showCmd == SW_SHOWNORMAL.0 as u32)
}

pub(crate) fn is_right_to_left(window: HWND) -> bool {
    // SAFETY: reading the extended style of any handle is harmless.
    let ex_style = unsafe { GetWindowLongPtrW(window, GWL_EXSTYLE) } as u32;
    ex_style & WS_EX_LAYOUTRTL.0 != 0
}

pub(crate) fn style(window: HWND) -> ApiResult<u32> {
    // GetWindowLongPtrW returns 0 both for an empty style and on error.
    // SAFETY: SetLastError only writes thread-local state.
    unsafe { SetLastError(WIN32_ERROR(0)) };
    // SAFETY: reading the style of any handle is harmless.
    let style = unsafe { GetWindowLongPtrW(window, GWL_STYLE) };
    if style == 0 {
        let err = error::last_error("GetWindowLongPtrW");
        if err.code != 0 {
            return Err(err.into());
        }
    }
    Ok(style as u32)
}

pub(crate) fn set_style(window: HWND, style: u32) -> ApiResult<()> {
    // SAFETY: SetLastError only writes thread-local state.
    unsafe { SetLastError(WIN32_ERROR(0)) };
    // SAFETY: GWL_STYLE takes a plain integer; the caller triggers a
    // frame change afterwards.
    let previous = unsafe { SetWindowLongPtrW(window, GWL_STYLE, style as isize) };
    if previous == 0 {
        let err = error::last_error("SetWindowLongPtrW");
        if err.code != 0 {
            return Err(err.into());
        }
    }
    Ok(())
}

/// Makes the OS recalculate the non-client area without moving,
/// resizing, activating or reordering the window.
pub(crate) fn refresh_frame(window: HWND) -> ApiResult<()> {
    let flags = SWP_FRAMECHANGED
        | SWP_NOACTIVATE
        | SWP_NOSIZE
        | SWP_NOMOVE
        | SWP_NOZORDER
        | SWP_NOOWNERZORDER;
    // SAFETY: SetWindowPos with a window handle and no geometry change.
    let result = unsafe { SetWindowPos(window, None, 0, 0, 0, 0, flags) };
    result.map_err(|e| error::from_windows("SetWindowPos", e))?;
    Ok(())
}

/// Stores margins as window properties.
///
/// The marker is dropped first and set last, so a failure part way
/// leaves the window without margins rather than with a mix.
pub(crate) fn set_margins(window: HWND, margins: Margins) -> ApiResult<()> {
    remove_prop(window, MARGINS_PROP);
    let values = [margins.left, margins.top, margins.right, margins.bottom];
    for (name, value) in MARGIN_PROPS.iter().zip(values) {
        set_prop(window, name, value as isize)?;
    }
    set_prop(window, MARGINS_PROP, 1)
}

/// Removes every margin property. Must run before the window is
/// destroyed.
pub(crate) fn clear_margins(window: HWND) {
    remove_prop(window, MARGINS_PROP);
    for name in MARGIN_PROPS {
        remove_prop(window, name);
    }
}

pub(crate) fn margins(window: HWND) -> Option<Margins> {
    get_prop(window, MARGINS_PROP)?;
    let [left, top, right, bottom] =
        MARGIN_PROPS.map(|name| get_prop(window, name).unwrap_or(0) as i32);
    Some(Margins::new(left, top, right, bottom))
}

fn set_prop(window: HWND, name: &str, value: isize) -> ApiResult<()> {
    let wide_name = wide(name);
    // SAFETY: `wide_name` is nul-terminated; the value is stored as an
    // integer and never dereferenced.
    let result =
        unsafe { SetPropW(window, PCWSTR(wide_name.as_ptr()), Some(HANDLE(value as *mut _))) };
    result.map_err(|e| error::from_windows("SetPropW", e))?;
    Ok(())
}

/// `None` if the property is absent (or zero).
fn get_prop(window: HWND, name: &str) -> Option<isize> {
    let wide_name = wide(name);
    // SAFETY: `wide_name` is nul-terminated.
    let value = unsafe { GetPropW(window, PCWSTR(wide_name.as_ptr())) };
    if value.0.is_null() {
        return None;
    }
    Some(value.0 as isize)
}

/// Absent properties are ignored.
fn remove_prop(window: HWND, name: &str) {
    let wide_name = wide(name);
    // SAFETY: `wide_name` is nul-terminated. The returned value is the
    // stored integer, not a handle to release.
    let _ = unsafe { RemovePropW(window, PCWSTR(wide_name.as_ptr())) };
}
