use std::mem;

use framekit_core::{ApiError, ApiResult, MenuId, Point, SystemCommand};
use windows::Win32::Foundation::{HWND, LPARAM, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    GetSystemMenu, HMENU, MENUITEMINFOW, MFS_DISABLED, MFS_ENABLED, MFT_STRING, MIIM_STATE,
    PostMessageW, SetMenuDefaultItem, SetMenuItemInfoW, TPM_LAYOUTRTL, TPM_RETURNCMD,
    TrackPopupMenuEx, WM_SYSCOMMAND,
};

use crate::error;

fn hmenu(menu: MenuId) -> HMENU {
    HMENU(menu.0 as *mut _)
}

pub(crate) fn system_menu(window: HWND) -> ApiResult<MenuId> {
    // SAFETY: GetSystemMenu without reverting returns the window's copy.
    let menu = unsafe { GetSystemMenu(window, false) };
    if menu.is_invalid() {
        return Err(ApiError::Empty("GetSystemMenu"));
    }
    Ok(MenuId(menu.0 as usize))
}

pub(crate) fn set_item_enabled(menu: MenuId, command: SystemCommand, enabled: bool) -> ApiResult<()> {
    let info = MENUITEMINFOW {
        cbSize: mem::size_of::<MENUITEMINFOW>() as u32,
        fMask: MIIM_STATE,
        fType: MFT_STRING,
        fState: if enabled { MFS_ENABLED } else { MFS_DISABLED },
        ..Default::default()
    };
    // SAFETY: `info` is sized and only the state is applied.
    let result = unsafe { SetMenuItemInfoW(hmenu(menu), command.id(), false, &info) };
    result.map_err(|e| error::from_windows("SetMenuItemInfoW", e))?;
    Ok(())
}

/// Removes the bold default item.
pub(crate) fn clear_default_item(menu: MenuId) -> ApiResult<()> {
    // SAFETY: an item of -1 means "no default".
    let result = unsafe { SetMenuDefaultItem(hmenu(menu), u32::MAX, 0) };
    result.map_err(|e| error::from_windows("SetMenuDefaultItem", e))?;
    Ok(())
}

/// Shows the menu modally; returns the chosen command id, if any.
pub(crate) fn track(menu: MenuId, window: HWND, position: Point, right_to_left: bool) -> Option<u32> {
    let mut flags = TPM_RETURNCMD.0;
    if right_to_left {
        flags |= TPM_LAYOUTRTL.0;
    }
    // SAFETY: `window` owns the menu; with TPM_RETURNCMD the result is
    // the selected id, or 0 when dismissed.
    let command = unsafe { TrackPopupMenuEx(hmenu(menu), flags, position.x, position.y, window, None) };
    match command.0 {
        0 => None,
        id => Some(id as u32),
    }
}

pub(crate) fn post_command(window: HWND, command: u32) -> ApiResult<()> {
    // SAFETY: posting a system command to a window of this thread.
    let result = unsafe {
        PostMessageW(Some(window), WM_SYSCOMMAND, WPARAM(command as usize), LPARAM(0))
    };
    result.map_err(|e| error::from_windows("PostMessageW", e))?;
    Ok(())
}
