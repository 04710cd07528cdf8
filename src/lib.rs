//! `ColorClock` - A clock screensaver for Windows
//!
//! Paints the current time as an `HH:MM:SS` label over a radial gradient whose
//! color is the time itself: hours drive red, minutes green and seconds blue.
//! The hex code of that color sits under the clock.
//!
//! The crate is split into platform-neutral logic and a Win32 backend:
//!
//! - [`clock`]: time sampling and the time-to-color mapping
//! - [`render`]: layout, gradient rasterization and frame composition
//! - [`saver`]: launch mode parsing, input handling and the mode selector
//! - `win32`: windows, GDI painting and the message loop (Windows only)
//!
//! # Launch Modes
//!
//! - `/p <hwnd>`: preview inside the screensaver settings dialog
//! - `/c`: configuration (there is nothing to configure)
//! - anything else: full-screen on every monitor until input arrives

pub mod clock;
pub mod config;
pub mod error;
pub mod geometry;
pub mod render;
pub mod saver;
pub mod utils;

#[cfg(windows)]
pub mod win32;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types
pub use error::{ColorClockError, Result};
