use std::mem;

use framekit_core::ApiResult;
use windows::Win32::UI::Accessibility::{HCF_HIGHCONTRASTON, HIGHCONTRASTW};
use windows::Win32::UI::WindowsAndMessaging::{
    SPI_GETHIGHCONTRAST, SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS, SystemParametersInfoW,
};

use crate::dynamic::EntryPoints;
use crate::error;

pub(crate) fn high_contrast_enabled() -> ApiResult<bool> {
    let mut info = HIGHCONTRASTW {
        cbSize: mem::size_of::<HIGHCONTRASTW>() as u32,
        ..Default::default()
    };
    // SAFETY: `info` is a sized HIGHCONTRASTW and outlives the call.
    let result = unsafe {
        SystemParametersInfoW(
            SPI_GETHIGHCONTRAST,
            info.cbSize,
            Some(&mut info as *mut HIGHCONTRASTW as *mut _),
            SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS(0),
        )
    };
    result.map_err(|e| error::from_windows("SystemParametersInfoW", e))?;
    Ok(info.dwFlags.0 & HCF_HIGHCONTRASTON.0 != 0)
}

/// UxTheme's undocumented app-mode query.
pub(crate) fn should_apps_use_dark_mode(entry: &EntryPoints) -> ApiResult<bool> {
    let should_use = entry.should_apps_use_dark_mode()?;
    // SAFETY: takes no arguments.
    Ok(unsafe { should_use() } != 0)
}
