//! Frame geometry
//!
//! All positions scale with the surface width so the clock looks the same on a
//! 4K monitor and in the 152x112 preview thumbnail.

use crate::geometry::{Rect, Size};

/// Time label font size as a fraction of the surface width
const TIME_FONT_SCALE: f32 = 0.1;
/// Hex label font size as a fraction of the surface width
const HEX_FONT_SCALE: f32 = 0.0212;
/// Offset of the time baseline below the vertical midpoint, as a fraction of the width
const BASELINE_OFFSET_SCALE: f32 = 0.05;
/// How far the hex label tucks up under the time label, in time font sizes
const HEX_TUCK: f32 = 0.25;

/// Which edge of its box a label hugs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAnchor {
    /// Text sits on the top edge of the box
    Top,
    /// Text sits on the bottom edge of the box
    Bottom,
}

/// A horizontally centered text box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBox {
    /// Box the text is aligned within
    pub bounds: Rect,
    /// Font em height in pixels
    pub font_px: f32,
    /// Vertical alignment within `bounds`
    pub anchor: VerticalAnchor,
}

/// Positions of everything drawn in one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameLayout {
    /// Surface size the layout was computed for
    pub size: Size,
    /// Bounding box of the gradient ellipse, twice the surface in each direction
    pub gradient_bounds: Rect,
    /// Gradient center point (surface midpoint)
    pub gradient_center: (f32, f32),
    /// Box for the `HH:mm:ss` label
    pub time_label: TextBox,
    /// Box for the `RRGGBB` label
    pub hex_label: TextBox,
}

impl FrameLayout {
    /// Compute the layout for a surface
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        reason = "surface dimensions are far below f32's exact integer range"
    )]
    pub fn compute(size: Size) -> Self {
        let bounds = Rect::from_size(size);
        let (width, height) = (bounds.width, bounds.height);
        let (width_f, height_f) = (width as f32, height as f32);

        let time_font_px = width_f * TIME_FONT_SCALE;
        let baseline = (height_f / 2.0 + width_f * BASELINE_OFFSET_SCALE) as i32;
        let hex_top = baseline - (HEX_TUCK * time_font_px) as i32;

        Self {
            size,
            gradient_bounds: Rect::new(-width / 2, -height / 2, width * 2, height * 2),
            gradient_center: (width_f / 2.0, height_f / 2.0),
            time_label: TextBox {
                bounds: Rect::new(0, 0, width, baseline),
                font_px: time_font_px,
                anchor: VerticalAnchor::Bottom,
            },
            hex_label: TextBox {
                bounds: Rect::new(0, hex_top, width, height / 2),
                font_px: width_f * HEX_FONT_SCALE,
                anchor: VerticalAnchor::Top,
            },
        }
    }
}
