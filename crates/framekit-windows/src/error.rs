use framekit_core::SystemError;
use windows::Win32::Foundation::GetLastError;
use windows::core::HRESULT;

/// The calling thread's last error, attributed to `operation`.
pub(crate) fn last_error(operation: &'static str) -> SystemError {
    // SAFETY: GetLastError only reads thread-local state.
    let code = unsafe { GetLastError() };
    from_hresult(operation, code.to_hresult())
}

/// Builds the error from an `HRESULT`, keeping its low word as the code.
pub(crate) fn from_hresult(operation: &'static str, hr: HRESULT) -> SystemError {
    SystemError::new(operation, hr.0 as u32 & 0xFFFF, hr.message())
}

pub(crate) fn from_windows(operation: &'static str, err: windows::core::Error) -> SystemError {
    from_hresult(operation, err.code())
}

/// `Ok` for a successful `HRESULT`.
pub(crate) fn check(operation: &'static str, hr: HRESULT) -> Result<(), SystemError> {
    if hr.is_ok() {
        Ok(())
    } else {
        Err(from_hresult(operation, hr))
    }
}
