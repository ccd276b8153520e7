use std::fmt;

/// A failed OS call, carrying the system error code and its description.
///
/// Displays as `"<operation> failed with error <code>: <description>."`,
/// the format every fallback warning in framekit is logged with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemError {
    pub operation: &'static str,
    pub code: u32,
    pub message: String,
}

impl SystemError {
    /// Creates an error for `operation`.
    ///
    /// Trailing whitespace and periods are stripped from `message` since
    /// system-provided descriptions usually end in `".\r\n"`.
    pub fn new(operation: &'static str, code: u32, message: impl Into<String>) -> Self {
        let message = message.into();
        let trimmed = message.trim_end().trim_end_matches('.').to_string();
        Self {
            operation,
            code,
            message: trimmed,
        }
    }
}

impl fmt::Display for SystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            return write!(f, "{} failed with error {}.", self.operation, self.code);
        }
        write!(
            f,
            "{} failed with error {}: {}.",
            self.operation, self.code, self.message
        )
    }
}

impl std::error::Error for SystemError {}

/// Why an optional OS query produced no value.
///
/// None of these are fatal: every caller has a fallback for each kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The entry point does not exist on this OS.
    Unavailable(&'static str),
    /// The entry point exists but the call reported an error.
    Failed(SystemError),
    /// The call succeeded but returned nothing usable (zero, missing value).
    Empty(&'static str),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(name) => write!(f, "{name}() is not available."),
            Self::Failed(err) => err.fmt(f),
            Self::Empty(name) => write!(f, "{name} returned no usable value."),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<SystemError> for ApiError {
    fn from(err: SystemError) -> Self {
        Self::Failed(err)
    }
}

/// Result of a single optional OS query.
pub type ApiResult<T> = Result<T, ApiError>;

/// Turns a zero reading into [`ApiError::Empty`].
///
/// Several OS queries signal failure by returning 0 rather than an
/// error code.
pub fn nonzero(name: &'static str, value: u32) -> ApiResult<u32> {
    if value == 0 {
        Err(ApiError::Empty(name))
    } else {
        Ok(value)
    }
}
