use std::ffi::c_void;
use std::num::NonZeroUsize;

use framekit_core::{Export, Library, Loader, Symbol, SystemError};
use windows::Win32::Foundation::HMODULE;
use windows::Win32::System::LibraryLoader::{
    GetProcAddress, LOAD_LIBRARY_SEARCH_SYSTEM32, LoadLibraryExW,
};
use windows::core::{PCSTR, PCWSTR};

use crate::error;
use crate::wide;

/// Loads libraries from System32 only, never the application directory
/// or `PATH`.
pub(crate) struct SystemLoader;

impl Loader for SystemLoader {
    fn load_library(&self, library: Library) -> Result<NonZeroUsize, SystemError> {
        let name = wide(library.file_name());
        // SAFETY: `name` is a nul-terminated UTF-16 string that outlives
        // the call. Loaded modules are never freed.
        let module = unsafe {
            LoadLibraryExW(PCWSTR(name.as_ptr()), None, LOAD_LIBRARY_SEARCH_SYSTEM32)
        }
        .map_err(|e| error::from_windows("LoadLibraryExW", e))?;
        NonZeroUsize::new(module.0 as usize).ok_or_else(|| error::last_error("LoadLibraryExW"))
    }

    fn find_symbol(
        &self,
        module: NonZeroUsize,
        symbol: Symbol,
    ) -> Result<NonZeroUsize, SystemError> {
        let module = HMODULE(module.get() as *mut c_void);
        let address = match symbol.export() {
            Export::Name(name) => {
                let name: Vec<u8> = name.bytes().chain(std::iter::once(0)).collect();
                // SAFETY: `module` came from LoadLibraryExW and is never
                // freed; `name` is nul-terminated.
                unsafe { GetProcAddress(module, PCSTR(name.as_ptr())) }
            }
            // An ordinal is passed in place of the name pointer, as
            // MAKEINTRESOURCEA does.
            Export::Ordinal(ordinal) => unsafe {
                // SAFETY: GetProcAddress treats pointer values below 0x10000
                // as ordinals and never dereferences them.
                GetProcAddress(module, PCSTR(usize::from(ordinal) as *const u8))
            },
        };
        address
            .and_then(|f| NonZeroUsize::new(f as usize))
            .ok_or_else(|| error::last_error("GetProcAddress"))
    }
}
