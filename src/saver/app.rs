//! Mode selector
//!
//! Turns a [`LaunchMode`] into surfaces on a [`SaverPlatform`] and hands control
//! to the platform's event loop. The decision is made once; nothing here runs
//! after the loop starts.

use crate::config::SaverSettings;
use crate::error::{ColorClockError, Result, StringError};
use crate::geometry::Rect;
use crate::saver::{EmbeddableSurface, HostHandle, InputSession, LaunchMode, SaverPlatform};
use tracing::{debug, info};

/// Screensaver entry state machine
#[derive(Debug, Clone, Default)]
pub struct ScreenSaver {
    settings: SaverSettings,
}

impl ScreenSaver {
    /// Create a screensaver with the given settings
    pub const fn new(settings: SaverSettings) -> Self {
        Self { settings }
    }

    /// Settings in use
    pub const fn settings(&self) -> &SaverSettings {
        &self.settings
    }

    /// Run `mode` on `platform` until the process should exit
    pub fn run<P: SaverPlatform>(&self, mode: LaunchMode, platform: &mut P) -> Result<()> {
        info!("Running in {} mode", mode);
        match mode {
            LaunchMode::FullScreen => self.run_full_screen(platform),
            LaunchMode::Preview(host) => self.run_preview(platform, host),
            LaunchMode::Configure => self.run_configure(platform),
        }
    }

    fn run_full_screen<P: SaverPlatform>(&self, platform: &mut P) -> Result<()> {
        let regions = platform.display_regions()?;
        if regions.is_empty() {
            return Err(ColorClockError::DisplayEnumerationFailed(
                StringError::new("no active display regions reported"),
            ));
        }
        info!("Found {} active display region(s)", regions.len());

        let mut surfaces = Vec::with_capacity(regions.len());
        for (index, bounds) in regions.into_iter().enumerate() {
            debug!(
                "Display {}: {}x{} at ({}, {})",
                index, bounds.width, bounds.height, bounds.x, bounds.y
            );
            let input = InputSession::exit_on_input(self.settings.movement_tolerance_px);
            let mut surface = platform.create_surface(bounds, input)?;
            surface.start_repaint_timer(self.settings.frame_interval)?;
            surfaces.push(surface);
        }

        platform.hide_cursor()?;
        for surface in &mut surfaces {
            surface.show()?;
        }

        info!(
            "Started {} full-screen surface(s), repainting every {:?}",
            surfaces.len(),
            self.settings.frame_interval
        );
        platform.run_event_loop(surfaces)
    }

    fn run_preview<P: SaverPlatform>(&self, platform: &mut P, host: HostHandle) -> Result<()> {
        let size = platform.host_client_size(host)?;
        info!(
            "Preview host {} has a {}x{} client area",
            host, size.width, size.height
        );

        let mut surface = platform.create_surface(Rect::from_size(size), InputSession::passive())?;
        surface.attach_to(host)?;
        surface.resize(size)?;
        surface.show()?;

        platform.run_event_loop(vec![surface])
    }

    fn run_configure<P: SaverPlatform>(&self, platform: &mut P) -> Result<()> {
        platform.show_message(&self.settings.title, &self.settings.configure_message)
    }
}
