//! Read-only registry access.
//!
//! Theme flags live under `HKEY_CURRENT_USER`, the OS version under
//! `HKEY_LOCAL_MACHINE`. Missing keys and values read as `None`; they
//! are routine (e.g. `AppsUseLightTheme` before the user first changes
//! the app mode) and are not logged.

use windows::Win32::System::Registry::{
    HKEY, HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE, KEY_QUERY_VALUE, REG_DWORD, REG_SZ,
    REG_VALUE_TYPE, RegCloseKey, RegOpenKeyExW, RegQueryValueExW,
};
use windows::core::PCWSTR;

use crate::wide;

#[derive(Debug, Clone, Copy)]
pub(crate) enum Hive {
    CurrentUser,
    LocalMachine,
}

/// An open key, closed on drop.
struct Key(HKEY);

impl Key {
    fn open(hive: Hive, path: &str) -> Option<Self> {
        let root = match hive {
            Hive::CurrentUser => HKEY_CURRENT_USER,
            Hive::LocalMachine => HKEY_LOCAL_MACHINE,
        };
        let wide_path = wide(path);
        let mut key = HKEY::default();
        // SAFETY: `wide_path` is nul-terminated and `key` is a valid out
        // pointer. The key is closed by `Drop`.
        let status =
            unsafe { RegOpenKeyExW(root, PCWSTR(wide_path.as_ptr()), None, KEY_QUERY_VALUE, &mut key) };
        if status.is_err() {
            return None;
        }
        Some(Self(key))
    }

    /// Reads raw value bytes into `data`, returning the value type and
    /// the number of bytes written.
    fn query(&self, name: &str, data: Option<&mut [u8]>) -> Option<(REG_VALUE_TYPE, u32)> {
        let wide_name = wide(name);
        let mut kind = REG_VALUE_TYPE::default();
        let (ptr, mut size) = match data {
            Some(buf) => (Some(buf.as_mut_ptr()), buf.len() as u32),
            None => (None, 0),
        };
        // SAFETY: `ptr` (when present) points to `size` writable bytes.
        let status = unsafe {
            RegQueryValueExW(
                self.0,
                PCWSTR(wide_name.as_ptr()),
                None,
                Some(&mut kind as *mut _),
                ptr,
                Some(&mut size as *mut _),
            )
        };
        if status.is_err() {
            return None;
        }
        Some((kind, size))
    }
}

impl Drop for Key {
    fn drop(&mut self) {
        // SAFETY: the key was opened by RegOpenKeyExW and is closed once.
        let _ = unsafe { RegCloseKey(self.0) };
    }
}

/// Reads a `REG_DWORD` value.
pub(crate) fn read_dword(hive: Hive, path: &str, name: &str) -> Option<u32> {
    let key = Key::open(hive, path)?;
    let mut data = [0u8; 4];
    let (kind, size) = key.query(name, Some(&mut data[..]))?;
    if kind != REG_DWORD || size != 4 {
        return None;
    }
    Some(u32::from_le_bytes(data))
}

/// Reads a `REG_SZ` value.
pub(crate) fn read_string(hive: Hive, path: &str, name: &str) -> Option<String> {
    let key = Key::open(hive, path)?;
    let (kind, size) = key.query(name, None)?;
    if kind != REG_SZ {
        return None;
    }
    let mut data = vec![0u8; size as usize];
    let (_, size) = key.query(name, Some(&mut data[..]))?;
    data.truncate(size as usize);

    let units: Vec<u16> = data
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .take_while(|unit| *unit != 0)
        .collect();
    String::from_utf16(&units).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURRENT_VERSION: &str = r"SOFTWARE\Microsoft\Windows NT\CurrentVersion";

    #[test]
    fn reads_build_number_string() {
        let build = read_string(Hive::LocalMachine, CURRENT_VERSION, "CurrentBuildNumber");

        let build = build.expect("CurrentBuildNumber is always present");
        assert!(build.parse::<u32>().is_ok(), "{build}");
    }

    #[test]
    fn missing_values_are_none() {
        assert_eq!(read_dword(Hive::CurrentUser, r"Software\framekit-missing-key", "x"), None);
        assert_eq!(read_dword(Hive::LocalMachine, CURRENT_VERSION, "NoSuchValue"), None);
    }

    #[test]
    fn type_mismatch_is_none() {
        // CurrentBuildNumber is a REG_SZ.
        assert_eq!(read_dword(Hive::LocalMachine, CURRENT_VERSION, "CurrentBuildNumber"), None);
    }
}
