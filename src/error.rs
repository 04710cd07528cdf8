//! Error types for `ColorClock`
//!
//! The color and layout math is total and never fails. Everything here comes from
//! launch argument validation, the logging setup, or the platform windowing layer.
//!
//! Error variants use `#[source]` to preserve error chains for the log file.

use thiserror::Error;

/// Simple error type for wrapping string messages while implementing `std::error::Error`
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StringError(pub String);

impl StringError {
    /// Create a new `StringError` from a string message
    pub fn new(msg: impl Into<String>) -> Box<Self> {
        Box::new(Self(msg.into()))
    }
}

/// Main error type for `ColorClock`
#[derive(Debug, Error)]
pub enum ColorClockError {
    /// Preview mode was requested without a host window handle
    #[error("Preview mode requires a host window handle")]
    MissingPreviewHandle,

    /// The preview host window handle could not be parsed
    #[error("Invalid preview host window handle: {0}")]
    InvalidPreviewHandle(String),

    /// Active display regions could not be enumerated
    /// Preserves the underlying error source for full error chain transparency
    #[error("Display enumeration failed: {0}")]
    DisplayEnumerationFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A rendering surface could not be created, attached or resized
    /// Preserves the underlying error source for full error chain transparency
    #[error("Surface error: {0}")]
    SurfaceError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Logging setup error
    /// Preserves the underlying error source for full error chain transparency
    #[error("Logging error: {0}")]
    LoggingError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Windows API error
    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    WindowsApiError(#[from] windows::core::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ColorClockError {
    /// Whether the launch arguments named an unusable preview host
    ///
    /// These are the only failures the process reports through its exit code.
    pub const fn is_invalid_launch(&self) -> bool {
        matches!(
            self,
            Self::MissingPreviewHandle | Self::InvalidPreviewHandle(_)
        )
    }
}

/// Result type alias for `ColorClock` operations
pub type Result<T> = std::result::Result<T, ColorClockError>;
