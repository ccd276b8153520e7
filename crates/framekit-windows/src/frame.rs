use std::ffi::c_void;
use std::mem;

use framekit_core::{ApiResult, Margins};
use windows::Win32::Foundation::HWND;

use crate::dynamic::{EntryPoints, RawMargins};
use crate::error;

/// `DWMWA_VISIBLE_FRAME_BORDER_THICKNESS`, missing from older SDKs.
const DWMWA_VISIBLE_FRAME_BORDER_THICKNESS: u32 = 37;

/// Width of the visible frame line DWM draws around the window.
pub(crate) fn visible_border_thickness(entry: &EntryPoints, window: HWND) -> ApiResult<u32> {
    let get_attribute = entry.dwm_get_window_attribute()?;
    let mut value: u32 = 0;
    // SAFETY: `value` is a u32 out buffer of the size passed.
    let hr = unsafe {
        get_attribute(
            window,
            DWMWA_VISIBLE_FRAME_BORDER_THICKNESS,
            &mut value as *mut u32 as *mut c_void,
            mem::size_of::<u32>() as u32,
        )
    };
    error::check("DwmGetWindowAttribute", hr)?;
    Ok(value)
}

pub(crate) fn extend_into_client_area(
    entry: &EntryPoints,
    window: HWND,
    margins: Margins,
) -> ApiResult<()> {
    let extend = entry.dwm_extend_frame_into_client_area()?;
    let raw = RawMargins {
        left: margins.left,
        right: margins.right,
        top: margins.top,
        bottom: margins.bottom,
    };
    // SAFETY: `raw` has the MARGINS layout and outlives the call.
    let hr = unsafe { extend(window, &raw) };
    error::check("DwmExtendFrameIntoClientArea", hr)?;
    Ok(())
}

pub(crate) fn composition_enabled(entry: &EntryPoints) -> ApiResult<bool> {
    let is_enabled = entry.dwm_is_composition_enabled()?;
    let mut enabled = 0;
    // SAFETY: `enabled` is a BOOL out pointer.
    let hr = unsafe { is_enabled(&mut enabled) };
    error::check("DwmIsCompositionEnabled", hr)?;
    Ok(enabled != 0)
}

/// The colorization color as `0xAARRGGBB`.
pub(crate) fn colorization_color(entry: &EntryPoints) -> ApiResult<u32> {
    let get_color = entry.dwm_get_colorization_color()?;
    let (mut color, mut opaque) = (0u32, 0);
    // SAFETY: both are valid out pointers.
    let hr = unsafe { get_color(&mut color, &mut opaque) };
    error::check("DwmGetColorizationColor", hr)?;
    Ok(color)
}
