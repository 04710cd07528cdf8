//! Time sampling and the time-to-color mapping
//!
//! # Overview
//!
//! - `TimeSample`: hour/minute/second read from the local clock at paint time
//! - `ClockColor`: the RGB color encoding a sample, plus its luma, hex code and
//!   darker variant
//! - `TextColor`: black or white, whichever contrasts with the background
//!
//! Everything here is pure. Nothing is stored between frames.
//!
//! # Example Usage
//!
//! ```
//! use colorclock::clock::{ClockColor, TextColor, TimeSample};
//!
//! let sample = TimeSample::new(23, 59, 59).expect("valid time");
//! let color = ClockColor::from_time(&sample);
//!
//! assert_eq!(color.to_hex(), "FFFFFF");
//! assert_eq!(color.text_color(), TextColor::Black);
//! assert_eq!(sample.to_string(), "23:59:59");
//! ```

pub mod color;
pub mod sample;

pub use color::{ClockColor, TextColor};
pub use sample::TimeSample;
