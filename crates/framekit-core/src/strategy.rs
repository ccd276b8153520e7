//! Ordered fallback chains.
//!
//! Each OS query that has several possible sources is written as a list
//! of [`Strategy`] values and evaluated by [`first_success`]. The order
//! of the list is the preference order.

use crate::error::{ApiError, ApiResult};
use crate::{log_debug, log_warn};

/// One way of obtaining a value.
pub struct Strategy<C: ?Sized, A, T> {
    /// Name used in diagnostics.
    pub name: &'static str,
    /// Whether this source applies at all (OS tier, arguments).
    pub precondition: fn(&C, A) -> bool,
    /// Performs the query.
    pub run: fn(&C, A) -> ApiResult<T>,
}

/// Runs the strategies in order and returns the first successful value.
///
/// Strategies whose precondition fails are skipped silently. A strategy
/// that runs and fails is logged as a warning, except for
/// [`ApiError::Empty`] which is an expected "no answer here" outcome.
pub fn first_success<C: ?Sized, A: Copy, T>(
    ctx: &C,
    arg: A,
    strategies: &[Strategy<C, A, T>],
) -> Option<T> {
    for strategy in strategies {
        if !(strategy.precondition)(ctx, arg) {
            continue;
        }
        match (strategy.run)(ctx, arg) {
            Ok(value) => {
                log_debug!("{}: answered", strategy.name);
                return Some(value);
            }
            Err(ApiError::Empty(what)) => log_debug!("{}: {what} gave nothing", strategy.name),
            Err(e) => log_warn!("{e}"),
        }
    }
    None
}
