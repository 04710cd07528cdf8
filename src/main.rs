//! `ColorClock` - A clock screensaver for Windows
//!
//! Windows launches screensavers with `/s`, `/p <hwnd>` or `/c`. The first
//! argument picks the mode; see [`colorclock::saver::LaunchMode`].
//!
//! The process exits with 0 unless the preview host handle is unusable.

// Set Windows subsystem to hide console window
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use anyhow::{Context, Result};
use colorclock::{ColorClockError, config::SaverSettings, saver::LaunchMode, utils};
use tracing::{error, info};

/// Main entry point for the screensaver
fn main() -> Result<()> {
    match utils::init_logging() {
        Ok(log_path) => info!(
            "ColorClock v{} starting, logging to {}",
            env!("CARGO_PKG_VERSION"),
            log_path.display()
        ),
        Err(e) => eprintln!("Failed to initialize logging system: {e}"),
    }

    let mode = match LaunchMode::from_args(std::env::args().skip(1))
        .context("Failed to parse launch arguments")
    {
        Ok(mode) => mode,
        Err(e) => {
            error!("{:#}", e);
            return Err(e);
        }
    };

    if let Err(e) = run(mode, SaverSettings::default()) {
        error!("ColorClock terminated with error: {:#}", e);
        if e
            .downcast_ref::<ColorClockError>()
            .is_some_and(ColorClockError::is_invalid_launch)
        {
            return Err(e);
        }
    }

    info!("ColorClock exiting");
    Ok(())
}

#[cfg(windows)]
fn run(mode: LaunchMode, settings: SaverSettings) -> Result<()> {
    use colorclock::saver::ScreenSaver;
    use colorclock::win32::Win32Platform;

    let saver = ScreenSaver::new(settings);
    let mut platform = Win32Platform::new(saver.settings().clone());
    saver
        .run(mode, &mut platform)
        .with_context(|| format!("Screensaver failed in {mode} mode"))
}

#[cfg(not(windows))]
fn run(mode: LaunchMode, _settings: SaverSettings) -> Result<()> {
    eprintln!("ColorClock is a Windows-only screensaver.");
    anyhow::bail!("cannot run {mode} mode on this platform")
}
