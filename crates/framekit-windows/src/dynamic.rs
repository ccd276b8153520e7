//! Typed views of the resolver's table.
//!
//! Only this module turns resolved addresses into callable function
//! pointers. Each accessor returns the function if the running OS
//! exports it, or [`ApiError::Unavailable`] naming it.
//!
//! Signatures use plain integers where the Win32 type is a handle-like
//! value framekit only compares or passes through (awareness contexts)
//! or a `BOOL` it only tests for non-zero.

use std::ffi::c_void;
use std::sync::OnceLock;

use framekit_core::{ApiError, ApiResult, Resolver, Symbol, SymbolStatus};
use windows::Win32::Foundation::{HANDLE, HWND};
use windows::Win32::Graphics::Gdi::HMONITOR;
use windows::Win32::System::SystemInformation::OSVERSIONINFOW;
use windows::core::HRESULT;

use crate::loader::SystemLoader;

/// `DPI_AWARENESS_CONTEXT` as its raw handle value.
pub(crate) type DpiAwarenessContext = isize;

/// `DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2`.
pub(crate) const PER_MONITOR_AWARE_V2: DpiAwarenessContext = -4;

/// Layout of the Win32 `MARGINS` structure.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct RawMargins {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

pub(crate) type GetDpiForWindowFn = unsafe extern "system" fn(HWND) -> u32;
pub(crate) type GetSystemDpiForProcessFn = unsafe extern "system" fn(HANDLE) -> u32;
pub(crate) type GetDpiForSystemFn = unsafe extern "system" fn() -> u32;
pub(crate) type GetSystemMetricsForDpiFn = unsafe extern "system" fn(i32, u32) -> i32;
pub(crate) type GetWindowDpiAwarenessContextFn =
    unsafe extern "system" fn(HWND) -> DpiAwarenessContext;
pub(crate) type GetThreadDpiAwarenessContextFn = unsafe extern "system" fn() -> DpiAwarenessContext;
pub(crate) type GetAwarenessFromDpiAwarenessContextFn =
    unsafe extern "system" fn(DpiAwarenessContext) -> i32;
pub(crate) type AreDpiAwarenessContextsEqualFn =
    unsafe extern "system" fn(DpiAwarenessContext, DpiAwarenessContext) -> i32;
pub(crate) type GetDpiForMonitorFn =
    unsafe extern "system" fn(HMONITOR, i32, *mut u32, *mut u32) -> HRESULT;
pub(crate) type GetProcessDpiAwarenessFn = unsafe extern "system" fn(HANDLE, *mut i32) -> HRESULT;
pub(crate) type DwmIsCompositionEnabledFn = unsafe extern "system" fn(*mut i32) -> HRESULT;
pub(crate) type DwmGetColorizationColorFn = unsafe extern "system" fn(*mut u32, *mut i32) -> HRESULT;
pub(crate) type DwmExtendFrameIntoClientAreaFn =
    unsafe extern "system" fn(HWND, *const RawMargins) -> HRESULT;
pub(crate) type DwmGetWindowAttributeFn =
    unsafe extern "system" fn(HWND, u32, *mut c_void, u32) -> HRESULT;
/// Exported by ordinal only; returns a C++ `bool`.
pub(crate) type ShouldAppsUseDarkModeFn = unsafe extern "system" fn() -> u8;
/// Returns an `NTSTATUS`.
pub(crate) type RtlGetVersionFn = unsafe extern "system" fn(*mut OSVERSIONINFOW) -> i32;

/// Process-wide optional entry points.
pub(crate) struct EntryPoints {
    resolver: Resolver<SystemLoader>,
}

macro_rules! entry_points {
    ($($method:ident => $symbol:ident: $ty:ty;)*) => {
        impl EntryPoints {
            $(
                pub(crate) fn $method(&self) -> ApiResult<$ty> {
                    let address = self
                        .resolver
                        .resolve(Symbol::$symbol)
                        .ok_or(ApiError::Unavailable(Symbol::$symbol.name()))?;
                    // SAFETY: the address was exported under this symbol's
                    // name (or ordinal) and `$ty` is its documented signature.
                    Ok(unsafe { std::mem::transmute::<usize, $ty>(address.get()) })
                }
            )*
        }
    };
}

entry_points! {
    get_dpi_for_window => GetDpiForWindow: GetDpiForWindowFn;
    get_system_dpi_for_process => GetSystemDpiForProcess: GetSystemDpiForProcessFn;
    get_dpi_for_system => GetDpiForSystem: GetDpiForSystemFn;
    get_system_metrics_for_dpi => GetSystemMetricsForDpi: GetSystemMetricsForDpiFn;
    get_window_dpi_awareness_context => GetWindowDpiAwarenessContext: GetWindowDpiAwarenessContextFn;
    get_thread_dpi_awareness_context => GetThreadDpiAwarenessContext: GetThreadDpiAwarenessContextFn;
    get_awareness_from_dpi_awareness_context =>
        GetAwarenessFromDpiAwarenessContext: GetAwarenessFromDpiAwarenessContextFn;
    are_dpi_awareness_contexts_equal => AreDpiAwarenessContextsEqual: AreDpiAwarenessContextsEqualFn;
    get_dpi_for_monitor => GetDpiForMonitor: GetDpiForMonitorFn;
    get_process_dpi_awareness => GetProcessDpiAwareness: GetProcessDpiAwarenessFn;
    dwm_is_composition_enabled => DwmIsCompositionEnabled: DwmIsCompositionEnabledFn;
    dwm_get_colorization_color => DwmGetColorizationColor: DwmGetColorizationColorFn;
    dwm_extend_frame_into_client_area => DwmExtendFrameIntoClientArea: DwmExtendFrameIntoClientAreaFn;
    dwm_get_window_attribute => DwmGetWindowAttribute: DwmGetWindowAttributeFn;
    should_apps_use_dark_mode => ShouldAppsUseDarkMode: ShouldAppsUseDarkModeFn;
    rtl_get_version => RtlGetVersion: RtlGetVersionFn;
}

impl EntryPoints {
    pub(crate) fn new() -> Self {
        Self {
            resolver: Resolver::new(SystemLoader),
        }
    }

    /// The process-wide table every [`crate::Win32Platform`] resolves through.
    pub(crate) fn shared() -> &'static Self {
        static SHARED: OnceLock<EntryPoints> = OnceLock::new();
        SHARED.get_or_init(Self::new)
    }

    pub(crate) fn status(&self, symbol: Symbol) -> SymbolStatus {
        self.resolver.status(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn margins_match_win32_layout() {
        assert_eq!(std::mem::size_of::<RawMargins>(), 16);
    }

    #[test]
    fn version_entry_point_resolves_lazily() {
        let entry = EntryPoints::new();

        // Present on every supported system.
        assert!(entry.rtl_get_version().is_ok());
        assert_eq!(entry.status(Symbol::RtlGetVersion), SymbolStatus::Bound);
        assert_eq!(entry.status(Symbol::GetDpiForWindow), SymbolStatus::Unresolved);
    }

    #[test]
    fn shared_table_is_one_instance() {
        assert!(std::ptr::eq(EntryPoints::shared(), EntryPoints::shared()));
    }
}
