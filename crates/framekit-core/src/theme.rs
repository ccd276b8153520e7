//! Theme, accent color and compositor state.

use crate::chrome::Chrome;
use crate::color::Color;
use crate::error::ApiError;
use crate::{log_debug, log_warn};
use crate::platform::{Platform, RegistryKey};
use crate::strategy::{Strategy, first_success};
use crate::tier::CapabilityTier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemTheme {
    Light,
    Dark,
    /// Takes precedence over the light/dark setting.
    HighContrast,
}

/// Where the user asked Windows to show the accent color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorizationArea {
    None,
    StartMenuTaskBarActionCenter,
    TitleBarWindowBorder,
    All,
}

impl ColorizationArea {
    /// Combines the two `ColorPrevalence` flags: the personalization
    /// key's (start menu, taskbar) and the DWM key's (title bars).
    pub fn from_flags(theme: bool, dwm: bool) -> Self {
        match (theme, dwm) {
            (true, true) => Self::All,
            (true, false) => Self::StartMenuTaskBarActionCenter,
            (false, true) => Self::TitleBarWindowBorder,
            (false, false) => Self::None,
        }
    }
}

/// Theme state taken together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeSnapshot {
    pub theme: SystemTheme,
    pub composition_enabled: bool,
    pub colorization_color: Color,
    pub colorization_area: ColorizationArea,
}

const COLOR_PREVALENCE: &str = "ColorPrevalence";

type FlagStrategy<P> = Strategy<Chrome<P>, (), bool>;

impl<P: Platform> Chrome<P> {
    /// Whether DWM composition is active.
    pub fn is_composition_enabled(&self) -> bool {
        let strategies: [FlagStrategy<P>; 3] = [
            Strategy {
                name: "always composited since Windows 8",
                precondition: |c, _| c.supports(CapabilityTier::Win8),
                run: |_, _| Ok(true),
            },
            Strategy {
                name: "DwmIsCompositionEnabled",
                precondition: |_, _| true,
                run: |c, _| c.platform.dwm_composition_enabled(),
            },
            Strategy {
                name: "DWM Composition registry flag",
                precondition: |_, _| true,
                run: |c, _| Ok(c.registry_flag(RegistryKey::Dwm, "Composition")),
            },
        ];
        first_success(self, (), &strategies).unwrap_or(false)
    }

    pub fn system_theme(&self) -> SystemTheme {
        if self.is_high_contrast() {
            SystemTheme::HighContrast
        } else if self.should_apps_use_dark_mode() {
            SystemTheme::Dark
        } else {
            SystemTheme::Light
        }
    }

    pub fn is_high_contrast(&self) -> bool {
        self.platform.high_contrast_enabled().unwrap_or_else(|e| {
            log_warn!("{e}");
            false
        })
    }

    /// Whether the user picked the dark app mode.
    ///
    /// From 19H1 on, `ShouldAppsUseDarkMode` answers non-zero regardless
    /// of the setting, so only the registry is trusted there.
    pub fn should_apps_use_dark_mode(&self) -> bool {
        let strategies: [FlagStrategy<P>; 3] = [
            Strategy {
                name: "AppsUseLightTheme registry value",
                precondition: |c, _| c.supports(CapabilityTier::Win10_19H1),
                run: |c, _| Ok(c.registry_dark_mode()),
            },
            Strategy {
                name: "ShouldAppsUseDarkMode",
                precondition: |c, _| {
                    c.supports(CapabilityTier::Win10Rs1) && !c.supports(CapabilityTier::Win10_19H1)
                },
                run: |c, _| c.platform.should_apps_use_dark_mode(),
            },
            Strategy {
                name: "AppsUseLightTheme registry value",
                precondition: |c, _| {
                    c.supports(CapabilityTier::Win10Rs1) && !c.supports(CapabilityTier::Win10_19H1)
                },
                run: |c, _| Ok(c.registry_dark_mode()),
            },
        ];
        first_success(self, (), &strategies).unwrap_or(false)
    }

    /// The accent color DWM paints frames with, gray if unknown.
    pub fn colorization_color(&self) -> Color {
        match self.platform.dwm_colorization_color() {
            Ok(argb) => return Color::from_argb(argb),
            Err(e @ ApiError::Unavailable(_)) | Err(e @ ApiError::Failed(_)) => log_warn!("{e}"),
            Err(ApiError::Empty(_)) => {}
        }
        let color = match self.platform.registry_dword(RegistryKey::Dwm, "ColorizationColor") {
            Some(argb) if argb != 0 => Color::from_argb(argb),
            _ => Color::GRAY,
        };
        log_debug!("colorization color {color} read from the registry");
        color
    }

    pub fn colorization_area(&self) -> ColorizationArea {
        if !self.supports(CapabilityTier::Win10) {
            return ColorizationArea::None;
        }
        ColorizationArea::from_flags(
            self.registry_flag(RegistryKey::Personalize, COLOR_PREVALENCE),
            self.registry_flag(RegistryKey::Dwm, COLOR_PREVALENCE),
        )
    }

    pub fn theme_snapshot(&self) -> ThemeSnapshot {
        ThemeSnapshot {
            theme: self.system_theme(),
            composition_enabled: self.is_composition_enabled(),
            colorization_color: self.colorization_color(),
            colorization_area: self.colorization_area(),
        }
    }

    fn registry_flag(&self, key: RegistryKey, name: &str) -> bool {
        self.platform.registry_dword(key, name).is_some_and(|v| v != 0)
    }

    /// A missing value means light.
    fn registry_dark_mode(&self) -> bool {
        self.platform
            .registry_dword(RegistryKey::Personalize, "AppsUseLightTheme")
            == Some(0)
    }
}
