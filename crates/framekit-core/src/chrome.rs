use crate::config::FallbackMetrics;
use crate::log_info;
use crate::log_warn;
use crate::platform::Platform;
use crate::tier::CapabilityTier;
use crate::window::WindowId;

/// The chrome context.
///
/// Created once at startup and passed by reference to whatever needs
/// chrome metrics or theme state. It owns the platform, the capability
/// tier (computed here, never again) and the fallback constants.
///
/// Queries are spread over several modules: DPI in `dpi.rs`, metrics in
/// `metrics.rs`, theme in `theme.rs` and window mutation in
/// `actuator.rs`.
pub struct Chrome<P> {
    pub(crate) platform: P,
    pub(crate) tier: CapabilityTier,
    pub(crate) fallback: FallbackMetrics,
}

impl<P: Platform> Chrome<P> {
    /// Creates a context with the default fallback constants.
    pub fn new(platform: P) -> Self {
        Self::with_fallback(platform, FallbackMetrics::default())
    }

    pub fn with_fallback(platform: P, fallback: FallbackMetrics) -> Self {
        let version = platform.os_version();
        let tier = CapabilityTier::from_version(version);
        log_info!("OS version {version} classified as {}", tier.name());
        Self {
            platform,
            tier,
            fallback,
        }
    }

    pub fn tier(&self) -> CapabilityTier {
        self.tier
    }

    /// Whether the running OS is at least `tier`.
    pub fn supports(&self, tier: CapabilityTier) -> bool {
        self.tier >= tier
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn fallback(&self) -> &FallbackMetrics {
        &self.fallback
    }

    /// Rejects the null window: asserts in debug builds, logs otherwise.
    pub(crate) fn check_window(&self, window: WindowId, operation: &str) -> bool {
        debug_assert!(!window.is_null(), "{operation}: null window handle");
        if window.is_null() {
            log_warn!("{operation}: null window handle");
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakePlatform;
    use crate::tier::OsVersion;

    #[test]
    fn tier_is_computed_once_at_creation() {
        let platform = FakePlatform::at(OsVersion::new(10, 0, 17763));

        let chrome = Chrome::new(platform);
        let _ = chrome.tier();
        let _ = chrome.supports(CapabilityTier::Win10);

        assert_eq!(chrome.tier(), CapabilityTier::Win10Rs1);
        assert_eq!(chrome.platform().count("os_version"), 1);
    }

    #[test]
    fn supports_is_inclusive() {
        let chrome = Chrome::new(FakePlatform::at(OsVersion::new(6, 3, 9600)));

        assert!(chrome.supports(CapabilityTier::Legacy));
        assert!(chrome.supports(CapabilityTier::Win8_1));
        assert!(!chrome.supports(CapabilityTier::Win10));
    }

    #[test]
    fn custom_fallbacks_are_kept() {
        let fallback = FallbackMetrics {
            caption_height: 30,
            ..FallbackMetrics::default()
        };

        let chrome = Chrome::with_fallback(FakePlatform::win10(), fallback);

        assert_eq!(chrome.fallback().caption_height, 30);
    }
}
