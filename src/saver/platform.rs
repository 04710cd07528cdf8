//! Capabilities the screensaver needs from the windowing system
//!
//! The mode selector only talks to these traits. The Win32 implementation lives
//! in `crate::win32`; tests drive the selector with a recording fake.

use crate::error::Result;
use crate::geometry::{Rect, Size};
use crate::saver::{HostHandle, InputSession};
use std::time::Duration;

/// A rendering surface that can be embedded in a foreign host window
pub trait EmbeddableSurface {
    /// Re-parent the surface into `host` as a child, so it dies with the host
    fn attach_to(&mut self, host: HostHandle) -> Result<()>;

    /// Move the surface to its parent's origin and resize it
    fn resize(&mut self, size: Size) -> Result<()>;

    /// Repaint the surface every `interval` until it is destroyed
    fn start_repaint_timer(&mut self, interval: Duration) -> Result<()>;

    /// Make the surface visible and paint its first frame
    fn show(&mut self) -> Result<()>;
}

/// Windowing system services used by the mode selector
pub trait SaverPlatform {
    /// Concrete surface type
    type Surface: EmbeddableSurface;

    /// Bounds of every active monitor in virtual-screen coordinates
    fn display_regions(&mut self) -> Result<Vec<Rect>>;

    /// Client-area size of the preview host window
    fn host_client_size(&mut self, host: HostHandle) -> Result<Size>;

    /// Create a hidden, top-level surface covering `bounds`
    ///
    /// `input` decides whether keyboard and mouse input on the surface end the
    /// process.
    fn create_surface(&mut self, bounds: Rect, input: InputSession) -> Result<Self::Surface>;

    /// Hide the pointer for the rest of the process
    fn hide_cursor(&mut self) -> Result<()>;

    /// Show a blocking informational message
    fn show_message(&mut self, title: &str, message: &str) -> Result<()>;

    /// Dispatch events until the process is asked to exit
    ///
    /// Takes ownership of the surfaces so they live exactly as long as the loop.
    fn run_event_loop(&mut self, surfaces: Vec<Self::Surface>) -> Result<()>;
}
