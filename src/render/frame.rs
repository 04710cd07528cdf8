//! Per-frame rendering plan
//!
//! A `FramePlan` is built from scratch on every paint: time sample, color,
//! contrast, layout and label strings. Painting it onto a [`Canvas`] is the only
//! place where the platform gets involved.

use crate::clock::{ClockColor, TextColor, TimeSample};
use crate::error::Result;
use crate::geometry::Size;
use crate::render::{BackgroundCache, FrameLayout, RadialGradient, RenderedBackground, TextBox};

/// A single line of centered text
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    /// Text to draw
    pub text: String,
    /// Where to draw it
    pub text_box: TextBox,
    /// Foreground color
    pub color: TextColor,
}

/// Drawing target for a frame
///
/// Implementations should composite off-screen and present the finished frame
/// in one step so partially drawn frames are never visible.
pub trait Canvas {
    /// Cover the whole surface with a rasterized background
    fn draw_background(&mut self, background: &RenderedBackground) -> Result<()>;

    /// Draw a label on top of the background
    fn draw_label(&mut self, label: &Label) -> Result<()>;
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FramePlan {
    /// Time the frame shows
    pub sample: TimeSample,
    /// Color encoding `sample`
    pub color: ClockColor,
    /// Background gradient
    pub gradient: RadialGradient,
    /// Frame geometry
    pub layout: FrameLayout,
    /// `HH:mm:ss` label
    pub time_label: Label,
    /// `RRGGBB` label
    pub hex_label: Label,
}

impl FramePlan {
    /// Plan a frame for the current local time
    pub fn now(size: Size) -> Self {
        Self::new(TimeSample::now(), size)
    }

    /// Plan a frame for `sample` on a surface of `size`
    pub fn new(sample: TimeSample, size: Size) -> Self {
        let color = ClockColor::from_time(&sample);
        let text_color = color.text_color();
        let layout = FrameLayout::compute(size);

        Self {
            sample,
            color,
            gradient: RadialGradient::for_surface(&layout, color),
            layout,
            time_label: Label {
                text: sample.to_string(),
                text_box: layout.time_label,
                color: text_color,
            },
            hex_label: Label {
                text: color.to_hex(),
                text_box: layout.hex_label,
                color: text_color,
            },
        }
    }

    /// Draw background, then the time, then the hex code
    pub fn paint<C: Canvas>(&self, canvas: &mut C, cache: &mut BackgroundCache) -> Result<()> {
        let background = cache.get(&self.gradient, self.layout.size);
        canvas.draw_background(background)?;
        canvas.draw_label(&self.time_label)?;
        canvas.draw_label(&self.hex_label)
    }
}
