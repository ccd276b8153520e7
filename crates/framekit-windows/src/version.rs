use std::mem;

use framekit_core::{OsVersion, log_warn};
use windows::Win32::System::SystemInformation::OSVERSIONINFOW;

use crate::dynamic::EntryPoints;
use crate::registry::{self, Hive};

const CURRENT_VERSION_KEY: &str = r"SOFTWARE\Microsoft\Windows NT\CurrentVersion";

/// The true OS version.
///
/// `GetVersionExW` answers according to the application manifest, so
/// the version is read from `RtlGetVersion`, then the registry.
pub(crate) fn os_version(entry: &EntryPoints) -> OsVersion {
    if let Some(version) = rtl_version(entry).or_else(registry_version) {
        return version;
    }
    log_warn!("could not determine the OS version, assuming {}", OsVersion::FALLBACK);
    OsVersion::FALLBACK
}

fn rtl_version(entry: &EntryPoints) -> Option<OsVersion> {
    let rtl_get_version = match entry.rtl_get_version() {
        Ok(f) => f,
        Err(e) => {
            log_warn!("{e}");
            return None;
        }
    };
    let mut info = OSVERSIONINFOW {
        dwOSVersionInfoSize: mem::size_of::<OSVERSIONINFOW>() as u32,
        ..Default::default()
    };
    // SAFETY: `info` is a properly sized OSVERSIONINFOW.
    let status = unsafe { rtl_get_version(&mut info) };
    if status != 0 {
        log_warn!("RtlGetVersion failed with status 0x{status:08X}.");
        return None;
    }
    Some(OsVersion::new(info.dwMajorVersion, info.dwMinorVersion, info.dwBuildNumber))
}

fn registry_version() -> Option<OsVersion> {
    let read_dword = |name| registry::read_dword(Hive::LocalMachine, CURRENT_VERSION_KEY, name);
    let read_string = |name| registry::read_string(Hive::LocalMachine, CURRENT_VERSION_KEY, name);

    let build: u32 = read_string("CurrentBuildNumber")?.trim().parse().ok()?;
    // The numeric values only exist from Windows 10 on; older systems
    // keep a "6.1"-style string.
    let (major, minor) = match (
        read_dword("CurrentMajorVersionNumber"),
        read_dword("CurrentMinorVersionNumber"),
    ) {
        (Some(major), Some(minor)) => (major, minor),
        _ => {
            let version: OsVersion = read_string("CurrentVersion")?.parse().ok()?;
            (version.major, version.minor)
        }
    };
    Some(OsVersion::new(major, minor, build))
}
