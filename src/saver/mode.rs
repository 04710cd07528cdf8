//! Launch mode selection
//!
//! Windows starts screensavers with `/s` (run), `/p <hwnd>` (preview inside the
//! settings dialog) or `/c[:hwnd]` (configure). The first token is trimmed,
//! lowercased and cut to two characters before comparison, so `/c:1234` and `/P`
//! are recognized too. Anything else runs full-screen.

use crate::error::{ColorClockError, Result};
use std::fmt;
use tracing::debug;

/// Opaque native handle of the window hosting the preview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HostHandle(pub isize);

impl HostHandle {
    /// Parse a decimal handle as passed on the command line
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let value: i64 = trimmed
            .parse()
            .map_err(|_| ColorClockError::InvalidPreviewHandle(raw.to_string()))?;
        let value = isize::try_from(value)
            .map_err(|_| ColorClockError::InvalidPreviewHandle(raw.to_string()))?;
        Ok(Self(value))
    }

    /// Raw handle value
    pub const fn raw(&self) -> isize {
        self.0
    }
}

impl fmt::Display for HostHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// How the process was asked to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchMode {
    /// One full-screen surface per monitor, exit on input
    FullScreen,
    /// One surface embedded in the given host window, no exit on input
    Preview(HostHandle),
    /// Show the "no options" message and exit
    Configure,
}

impl LaunchMode {
    /// Select the mode from the process arguments (without the program name)
    ///
    /// Missing or unrecognized flags select [`LaunchMode::FullScreen`]. A preview
    /// flag without a valid numeric handle is an error.
    pub fn from_args<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut args = args.into_iter();
        let Some(first) = args.next() else {
            debug!("No launch flag, running full-screen");
            return Ok(Self::FullScreen);
        };

        let flag = first.as_ref().trim().to_lowercase();
        let mode = match flag.get(..2) {
            Some("/p") => {
                let raw = args.next().ok_or(ColorClockError::MissingPreviewHandle)?;
                Self::Preview(HostHandle::parse(raw.as_ref())?)
            }
            Some("/c") => Self::Configure,
            _ => Self::FullScreen,
        };

        debug!("Launch flag {:?} selected {}", first.as_ref(), mode);
        Ok(mode)
    }
}

impl fmt::Display for LaunchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FullScreen => write!(f, "full-screen"),
            Self::Preview(host) => write!(f, "preview (host {host})"),
            Self::Configure => write!(f, "configure"),
        }
    }
}
