//! Frame rendering
//!
//! Turns a time sample and a surface size into a finished frame: a radial
//! gradient from the clock color to its darker variant, the time as `HH:mm:ss`
//! and the color's hex code underneath.
//!
//! # Architecture
//!
//! - `FrameLayout`: label boxes, font sizes and gradient geometry, all scaled
//!   from the surface width
//! - `RadialGradient` / `BackgroundCache`: the background as a BGRA raster,
//!   rebuilt through a per-size blend map and a per-color palette
//! - `FramePlan`: one frame's worth of decisions, painted onto a [`Canvas`]
//!
//! The platform layer implements [`Canvas`]; nothing in this module touches a
//! window handle.
//!
//! # Example Usage
//!
//! ```
//! use colorclock::clock::TimeSample;
//! use colorclock::geometry::Size;
//! use colorclock::render::FramePlan;
//!
//! let sample = TimeSample::new(12, 0, 0).expect("valid time");
//! let plan = FramePlan::new(sample, Size::new(1920, 1080));
//!
//! assert_eq!(plan.time_label.text, "12:00:00");
//! assert_eq!(plan.hex_label.text, "850000");
//! ```

pub mod frame;
pub mod gradient;
pub mod layout;

pub use frame::{Canvas, FramePlan, Label};
pub use gradient::{
    BackgroundCache, BlendMap, GradientPalette, RadialGradient, RenderedBackground,
};
pub use layout::{FrameLayout, TextBox, VerticalAnchor};
