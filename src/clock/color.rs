//! Time-to-color mapping and text contrast selection
//!
//! Hour, minute and second are each stretched onto the full 0-255 range of one
//! channel, so midnight is black and 23:59:59 is white.

use crate::clock::TimeSample;
use std::fmt;

/// Luma at or above which a color counts as light
const LIGHT_LUMA_THRESHOLD: f32 = 0.6;

/// Rec. 709 luma coefficients
const LUMA_R: f32 = 0.2126;
const LUMA_G: f32 = 0.7152;
const LUMA_B: f32 = 0.0722;

/// An opaque RGB color derived from a time sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ClockColor {
    /// Red channel (hour)
    pub r: u8,
    /// Green channel (minute)
    pub g: u8,
    /// Blue channel (second)
    pub b: u8,
}

/// Foreground color for text drawn over a [`ClockColor`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextColor {
    /// Used over light backgrounds
    Black,
    /// Used over dark backgrounds
    White,
}

impl TextColor {
    /// Pick the text color for a background of the given luma
    ///
    /// The threshold is inclusive: a luma of exactly 0.6 gets black text.
    pub fn for_luma(luma: f32) -> Self {
        if luma >= LIGHT_LUMA_THRESHOLD {
            Self::Black
        } else {
            Self::White
        }
    }

    /// The text color as a [`ClockColor`]
    pub const fn to_color(self) -> ClockColor {
        match self {
            Self::Black => ClockColor::new(0, 0, 0),
            Self::White => ClockColor::new(255, 255, 255),
        }
    }
}

impl ClockColor {
    /// Create a color from its channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Map a time sample onto a color
    ///
    /// `R = floor(255 * hour / 23)`, `G = floor(255 * minute / 59)`,
    /// `B = floor(255 * second / 59)`.
    pub fn from_time(sample: &TimeSample) -> Self {
        Self {
            r: scale_channel(sample.hour(), 23),
            g: scale_channel(sample.minute(), 59),
            b: scale_channel(sample.second(), 59),
        }
    }

    /// Uppercase `RRGGBB` hex code without separators or prefix
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Perceived lightness in `0.0..=1.0`
    pub fn luma(&self) -> f32 {
        LUMA_R * (f32::from(self.r) / 255.0)
            + LUMA_G * (f32::from(self.g) / 255.0)
            + LUMA_B * (f32::from(self.b) / 255.0)
    }

    /// Whether black text reads better than white text on this color
    pub fn is_light(&self) -> bool {
        self.text_color() == TextColor::Black
    }

    /// Contrasting text color for labels drawn over this color
    pub fn text_color(&self) -> TextColor {
        TextColor::for_luma(self.luma())
    }

    /// Every channel scaled by 0.6, truncated
    pub fn darker_version(&self) -> Self {
        Self {
            r: darken_channel(self.r),
            g: darken_channel(self.g),
            b: darken_channel(self.b),
        }
    }

    /// Linear blend towards `other`, `t` clamped to `0.0..=1.0`
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "the blended value lies between two u8 channels"
    )]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |from: u8, to: u8| -> u8 {
            let from = f32::from(from);
            let to = f32::from(to);
            (from + (to - from) * t).round() as u8
        };
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }
}

impl From<&TimeSample> for ClockColor {
    fn from(sample: &TimeSample) -> Self {
        Self::from_time(sample)
    }
}

impl From<ClockColor> for image::Rgba<u8> {
    fn from(color: ClockColor) -> Self {
        image::Rgba([color.r, color.g, color.b, 255])
    }
}

/// Formats as the `RRGGBB` hex code
impl fmt::Display for ClockColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// `floor(255 * value / max)` in exact integer arithmetic
#[expect(
    clippy::cast_possible_truncation,
    reason = "value <= max keeps the quotient within 0..=255"
)]
fn scale_channel(value: u8, max: u16) -> u8 {
    let value = u16::from(value).min(max);
    (value * 255 / max) as u8
}

/// `trunc(channel * 0.6)` in exact integer arithmetic
#[expect(
    clippy::cast_possible_truncation,
    reason = "channel * 3 / 5 is at most 153"
)]
fn darken_channel(channel: u8) -> u8 {
    (u16::from(channel) * 3 / 5) as u8
}
