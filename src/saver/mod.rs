//! Screensaver entry logic
//!
//! # Overview
//!
//! - `LaunchMode`: full-screen, preview or configure, chosen once from the
//!   command line
//! - `ScreenSaver`: creates the surfaces for a mode and starts the event loop
//! - `InputSession`: per-surface exit-on-input state with the pointer
//!   movement tolerance
//! - `SaverPlatform` / `EmbeddableSurface`: the windowing capabilities the
//!   above depend on
//!
//! # Mode Flow
//!
//! ```text
//! args ─► LaunchMode ─┬─ FullScreen ─► one surface per monitor, cursor hidden, 60 Hz timer
//!                     ├─ Preview ────► one child surface filling the host, single frame
//!                     └─ Configure ──► message box, no surface
//! ```

pub mod app;
pub mod mode;
pub mod platform;
pub mod session;

pub use app::ScreenSaver;
pub use mode::{HostHandle, LaunchMode};
pub use platform::{EmbeddableSurface, SaverPlatform};
pub use session::{InputSession, InputVerdict};
