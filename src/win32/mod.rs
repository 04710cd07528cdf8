//! Win32 windowing backend
//!
//! Implements [`SaverPlatform`] with raw Win32 windows and GDI painting. All
//! surfaces share one window class and run on the calling thread's message
//! loop.

pub mod display;
pub mod gdi;
pub mod surface;

pub use surface::{SurfaceClass, Win32Surface};

use crate::config::SaverSettings;
use crate::error::{ColorClockError, Result, StringError};
use crate::geometry::{Rect, Size};
use crate::saver::{HostHandle, InputSession, SaverPlatform};
use tracing::{debug, info};
use windows::Win32::UI::WindowsAndMessaging::{
    DispatchMessageW, GetMessageW, MSG, ShowCursor, TranslateMessage,
};

/// Screensaver platform backed by the Win32 API
pub struct Win32Platform {
    settings: SaverSettings,
    class: Option<SurfaceClass>,
}

impl Win32Platform {
    /// Create the platform; the window class is registered on first use
    pub const fn new(settings: SaverSettings) -> Self {
        Self {
            settings,
            class: None,
        }
    }

    fn class(&mut self) -> Result<&SurfaceClass> {
        if self.class.is_none() {
            self.class = Some(SurfaceClass::register(&self.settings.window_class)?);
        }
        self.class.as_ref().ok_or_else(|| {
            ColorClockError::SurfaceError(StringError::new("window class not registered"))
        })
    }
}

impl SaverPlatform for Win32Platform {
    type Surface = Win32Surface;

    fn display_regions(&mut self) -> Result<Vec<Rect>> {
        display::monitor_bounds()
    }

    fn host_client_size(&mut self, host: HostHandle) -> Result<Size> {
        let hwnd = surface::host_hwnd(host)?;
        surface::client_size(hwnd)
    }

    fn create_surface(&mut self, bounds: Rect, input: InputSession) -> Result<Self::Surface> {
        let title = self.settings.title.clone();
        let font_face = self.settings.font_face.clone();
        self.class()?
            .create_surface(&title, bounds, input, &font_face)
    }

    #[allow(unsafe_code)] // Windows FFI for cursor visibility
    fn hide_cursor(&mut self) -> Result<()> {
        let count = unsafe { ShowCursor(false) };
        debug!("Cursor hidden (display count {})", count);
        Ok(())
    }

    fn show_message(&mut self, title: &str, message: &str) -> Result<()> {
        use rfd::MessageDialog;

        MessageDialog::new()
            .set_title(title)
            .set_description(message)
            .set_buttons(rfd::MessageButtons::Ok)
            .set_level(rfd::MessageLevel::Info)
            .show();
        Ok(())
    }

    #[allow(unsafe_code)] // Windows FFI for the message loop
    fn run_event_loop(&mut self, surfaces: Vec<Self::Surface>) -> Result<()> {
        info!("Entering message loop with {} surface(s)", surfaces.len());

        unsafe {
            let mut msg = MSG::default();
            while GetMessageW(&raw mut msg, None, 0, 0).as_bool() {
                let _ = TranslateMessage(&raw const msg);
                DispatchMessageW(&raw const msg);
            }
        }

        info!(
            "Message loop finished, {} surface(s) still open",
            surface::live_surface_count()
        );
        drop(surfaces);
        Ok(())
    }
}

impl Drop for Win32Platform {
    fn drop(&mut self) {
        if surface::live_surface_count() == 0
            && let Some(class) = self.class.take()
        {
            class.unregister();
        }
    }
}
