//! Operations that change a live window.
//!
//! Each returns whether it fully succeeded. Multi-step operations stop
//! at the first failing step.

use crate::chrome::Chrome;
use crate::error::ApiResult;
use crate::metrics::SystemMetric;
use crate::platform::{Platform, WS_THICKFRAME};
use crate::window::{Margins, Point, SystemCommand, WindowId};
use crate::{log_debug, log_warn};

impl<P: Platform> Chrome<P> {
    /// Extends the DWM frame into the client area by the visible frame
    /// border, or removes the extension when `reset` is set.
    ///
    /// Always fails without composition, since DWM rejects the call then.
    pub fn update_frame_margins(&self, window: WindowId, reset: bool) -> bool {
        if !self.is_composition_enabled() {
            return false;
        }
        if !self.check_window(window, "update_frame_margins") {
            return false;
        }
        let margin = if reset {
            0
        } else {
            self.metric(window, SystemMetric::FrameBorderThickness, false) as i32
        };
        match self.platform.extend_frame_into_client_area(window, Margins::uniform(margin)) {
            Ok(()) => true,
            Err(e) => {
                log_warn!("{e}");
                false
            }
        }
    }

    /// The client-area margins custom chrome needs.
    ///
    /// Negative values grow the client area over the native frame: the
    /// title bar on top and the resize border elsewhere. Everything is
    /// zero when `enable` is false; the resize border is also zero while
    /// the window is maximized or full screen.
    pub fn compute_custom_margins(&self, window: WindowId, enable: bool) -> Margins {
        if !self.check_window(window, "compute_custom_margins") {
            return Margins::default();
        }
        let use_resize_border = enable && !self.is_maximized_or_full_screen(window);
        let resize_border = if use_resize_border {
            self.metric(window, SystemMetric::ResizeBorderThickness, true) as i32
        } else {
            0
        };
        let title_bar = if enable {
            self.metric(window, SystemMetric::TitleBarHeight, true) as i32
        } else {
            0
        };
        Margins::new(-resize_border, -title_bar, -resize_border, -resize_border)
    }

    /// Computes the custom margins and tags them to the window.
    pub fn update_custom_margins(&self, window: WindowId, enable: bool) -> Margins {
        let margins = self.compute_custom_margins(window, enable);
        if window.is_null() {
            return margins;
        }
        if let Err(e) = self.platform.set_custom_margins(window, margins) {
            log_warn!("{e}");
        }
        margins
    }

    /// The margins last stored by [`Chrome::update_custom_margins`].
    pub fn custom_margins(&self, window: WindowId) -> Option<Margins> {
        if !self.check_window(window, "custom_margins") {
            return None;
        }
        self.platform.custom_margins(window)
    }

    /// Forgets the margins stored for `window`. Call before the window is
    /// destroyed (e.g. on `WM_NCDESTROY`).
    pub fn reset_custom_margins(&self, window: WindowId) {
        if !self.check_window(window, "reset_custom_margins") {
            return;
        }
        self.platform.clear_custom_margins(window);
    }

    /// Makes the OS recompute the non-client area after a style or
    /// margin change.
    pub fn trigger_frame_change(&self, window: WindowId) -> bool {
        if !self.check_window(window, "trigger_frame_change") {
            return false;
        }
        match self.platform.refresh_frame(window) {
            Ok(()) => true,
            Err(e) => {
                log_warn!("{e}");
                false
            }
        }
    }

    /// Shows the native system menu at `position` (the cursor when
    /// `None`) and forwards the chosen command to the window.
    pub fn display_system_menu(&self, window: WindowId, position: Option<Point>) -> bool {
        if !self.check_window(window, "display_system_menu") {
            return false;
        }
        match self.try_display_system_menu(window, position) {
            Ok(()) => true,
            Err(e) => {
                log_warn!("{e}");
                false
            }
        }
    }

    fn try_display_system_menu(&self, window: WindowId, position: Option<Point>) -> ApiResult<()> {
        let menu = self.platform.system_menu(window)?;

        let max_or_full = self.is_maximized_or_full_screen(window);
        let states = [
            (SystemCommand::Restore, max_or_full),
            (SystemCommand::Move, !max_or_full),
            (SystemCommand::Size, !max_or_full),
            (SystemCommand::Minimize, true),
            (SystemCommand::Maximize, !max_or_full),
            (SystemCommand::Close, true),
        ];
        for (command, enabled) in states {
            self.platform.set_menu_item_enabled(menu, command, enabled)?;
        }
        self.platform.clear_menu_default_item(menu)?;

        let position = match position {
            Some(p) => p,
            None => self.platform.cursor_position()?,
        };
        let rtl = self.platform.is_right_to_left(window);
        let Some(command) = self.platform.track_menu(menu, window, position, rtl) else {
            log_debug!("system menu dismissed");
            return Ok(());
        };
        log_debug!("system menu chose {:?}", SystemCommand::from_id(command));
        self.platform.post_system_command(window, command)
    }

    /// Adds or removes the sizing border, then refreshes the frame.
    pub fn set_resizable(&self, window: WindowId, resizable: bool) -> bool {
        if !self.check_window(window, "set_resizable") {
            return false;
        }
        let result = self.platform.window_style(window).and_then(|style| {
            let updated = if resizable {
                style | WS_THICKFRAME
            } else {
                style & !WS_THICKFRAME
            };
            if updated == style {
                return Ok(());
            }
            self.platform.set_window_style(window, updated)
        });
        if let Err(e) = result {
            log_warn!("{e}");
            return false;
        }
        self.trigger_frame_change(window)
    }
}
