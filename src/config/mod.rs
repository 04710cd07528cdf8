//! Fixed settings
//!
//! The screensaver has no user-configurable options and persists nothing. This
//! module gathers the tunables that would otherwise be scattered as magic
//! numbers, and resolves the data directory used for the log file.

use std::path::PathBuf;
use std::time::Duration;

/// Directory name under `%APPDATA%`
pub const APP_DIR_NAME: &str = "ColorClock";

/// Tunables for a screensaver run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaverSettings {
    /// Interval between full-screen repaints
    pub frame_interval: Duration,
    /// Mouse travel (per axis, in pixels) tolerated before the saver exits
    pub movement_tolerance_px: i32,
    /// Preferred label font face
    pub font_face: String,
    /// Window class registered for rendering surfaces
    pub window_class: String,
    /// Title of rendering surfaces and of the configure dialog
    pub title: String,
    /// Message shown in configure mode
    pub configure_message: String,
}

impl Default for SaverSettings {
    fn default() -> Self {
        Self {
            // 60 FPS, integer milliseconds as the window timer takes them
            frame_interval: Duration::from_millis(1000 / 60),
            movement_tolerance_px: 20,
            font_face: "mononoki".to_string(),
            window_class: "ColorClock_Surface".to_string(),
            title: "Color Clock Screensaver".to_string(),
            configure_message: "This screensaver has no options that you can set".to_string(),
        }
    }
}

/// Data directory: `%APPDATA%\ColorClock`, or `.\ColorClock` when `APPDATA` is unset
pub fn app_data_dir() -> PathBuf {
    let appdata = std::env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(appdata).join(APP_DIR_NAME)
}
