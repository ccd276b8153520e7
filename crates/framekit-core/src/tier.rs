//! OS version classification.
//!
//! Every version-dependent decision in framekit goes through
//! [`CapabilityTier`]. Raw version numbers are compared in exactly one
//! place, [`CapabilityTier::from_version`], so the threshold table below
//! is the whole of the OS-version policy.

use std::fmt;
use std::str::FromStr;

/// A Windows version as `major.minor.build`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OsVersion {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
}

impl OsVersion {
    pub const fn new(major: u32, minor: u32, build: u32) -> Self {
        Self {
            major,
            minor,
            build,
        }
    }

    /// Windows 7 RTM, assumed when the real version cannot be read.
    pub const FALLBACK: Self = Self::new(6, 1, 7600);
}

impl fmt::Display for OsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.build)
    }
}

impl FromStr for OsVersion {
    type Err = String;

    /// Parses `"major.minor"` or `"major.minor.build"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<u32> = s
            .trim()
            .split('.')
            .map(|p| p.parse().map_err(|_| format!("invalid version: {s}")))
            .collect::<Result<_, _>>()?;
        match parts.as_slice() {
            [major, minor] => Ok(Self::new(*major, *minor, 0)),
            [major, minor, build] => Ok(Self::new(*major, *minor, *build)),
            _ => Err(format!("invalid version: {s}")),
        }
    }
}

/// OS release milestones, oldest first.
///
/// Variants are ordered, so `tier >= CapabilityTier::Win10` reads as
/// "Windows 10 or newer".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CapabilityTier {
    /// Windows 7 and older. DWM composition can be switched off.
    Legacy,
    /// Windows 8. Composition is always on.
    Win8,
    /// Windows 8.1. Per-monitor DPI (`GetDpiForMonitor`).
    Win8_1,
    /// Windows 10 RTM. Colorization areas, visible frame border.
    Win10,
    /// Windows 10 1607. Per-window DPI and per-DPI system metrics.
    Win10Rs1,
    /// Windows 10 1903. `ShouldAppsUseDarkMode` is no longer trustworthy.
    Win10_19H1,
}

impl CapabilityTier {
    /// Minimum version of each tier, newest first.
    const THRESHOLDS: [(OsVersion, CapabilityTier); 5] = [
        (OsVersion::new(10, 0, 18362), Self::Win10_19H1),
        (OsVersion::new(10, 0, 14393), Self::Win10Rs1),
        (OsVersion::new(10, 0, 10240), Self::Win10),
        (OsVersion::new(6, 3, 0), Self::Win8_1),
        (OsVersion::new(6, 2, 0), Self::Win8),
    ];

    /// Classifies an OS version.
    pub fn from_version(version: OsVersion) -> Self {
        Self::THRESHOLDS
            .iter()
            .find(|(minimum, _)| version >= *minimum)
            .map(|(_, tier)| *tier)
            .unwrap_or(Self::Legacy)
    }

    /// Human-readable name for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::Legacy => "Windows 7 or older",
            Self::Win8 => "Windows 8",
            Self::Win8_1 => "Windows 8.1",
            Self::Win10 => "Windows 10",
            Self::Win10Rs1 => "Windows 10 1607",
            Self::Win10_19H1 => "Windows 10 1903",
        }
    }
}
