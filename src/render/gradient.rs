//! Radial gradient background
//!
//! The gradient ellipse is twice the surface size and centered on it, so even the
//! corners of very wide or very tall surfaces sit inside it and no hard edge is
//! ever visible. The blend factor is the normalized elliptical distance from the
//! center: 0 at the midpoint, 1 on the ellipse boundary.
//!
//! Rendering is split along what changes when:
//!
//! - [`BlendMap`]: one quantized blend level per pixel. Depends only on the
//!   surface size, so it is built once per size.
//! - [`GradientPalette`]: the 256 BGRA colors between center and surround.
//!   Depends only on the clock color, so it is rebuilt once a second.
//!
//! A color change is then a table lookup per pixel straight into the BGRA
//! buffer the platform uploads.

use crate::clock::ClockColor;
use crate::geometry::Size;
use crate::render::FrameLayout;
use image::RgbaImage;
use tracing::{debug, trace};

/// Number of distinct blend levels between center and surround
pub const BLEND_LEVELS: usize = 256;

/// Elliptical center-to-surround color blend
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialGradient {
    center: (f32, f32),
    radius_x: f32,
    radius_y: f32,
    inner: ClockColor,
    outer: ClockColor,
}

impl RadialGradient {
    /// Gradient from `color` at the surface midpoint to its darker variant at the edge
    #[expect(
        clippy::cast_precision_loss,
        reason = "gradient bounds are far below f32's exact integer range"
    )]
    pub fn for_surface(layout: &FrameLayout, color: ClockColor) -> Self {
        Self {
            center: layout.gradient_center,
            radius_x: (layout.gradient_bounds.width as f32 / 2.0).max(1.0),
            radius_y: (layout.gradient_bounds.height as f32 / 2.0).max(1.0),
            inner: color,
            outer: color.darker_version(),
        }
    }

    /// Center color
    pub const fn inner(&self) -> ClockColor {
        self.inner
    }

    /// Surround color
    pub const fn outer(&self) -> ClockColor {
        self.outer
    }

    /// Blend factor at a point, 0 at the center and 1 on or beyond the boundary
    pub fn blend_factor(&self, x: f32, y: f32) -> f32 {
        let dx = (x - self.center.0) / self.radius_x;
        let dy = (y - self.center.1) / self.radius_y;
        (dx * dx + dy * dy).sqrt().min(1.0)
    }

    /// Quantized blend level of the pixel at `(x, y)`, sampled at the pixel center
    #[expect(
        clippy::cast_precision_loss,
        reason = "pixel coordinates are far below f32's exact integer range"
    )]
    pub fn blend_level(&self, x: u32, y: u32) -> u8 {
        quantize(self.blend_factor(x as f32 + 0.5, y as f32 + 0.5))
    }

    /// Color of the blend level `level`
    pub fn level_color(&self, level: u8) -> ClockColor {
        self.inner.lerp(&self.outer, f32::from(level) / 255.0)
    }

    /// Color of the pixel at `(x, y)`
    pub fn color_at(&self, x: u32, y: u32) -> ClockColor {
        self.level_color(self.blend_level(x, y))
    }

    /// Blend levels for every pixel of a surface of `size`
    #[expect(
        clippy::cast_precision_loss,
        reason = "pixel coordinates are far below f32's exact integer range"
    )]
    pub fn blend_map(&self, size: Size) -> BlendMap {
        let column_terms: Vec<f32> = (0..size.width)
            .map(|x| {
                let dx = (x as f32 + 0.5 - self.center.0) / self.radius_x;
                dx * dx
            })
            .collect();

        let mut levels = Vec::with_capacity(pixel_count(size));
        for y in 0..size.height {
            let dy = (y as f32 + 0.5 - self.center.1) / self.radius_y;
            let row_term = dy * dy;
            levels.extend(
                column_terms
                    .iter()
                    .map(|column_term| quantize((column_term + row_term).sqrt().min(1.0))),
            );
        }

        debug!("Built {}x{} blend map", size.width, size.height);
        BlendMap { size, levels }
    }

    /// Rasterize the gradient into an RGBA image, for inspection and tests
    pub fn rasterize(&self, size: Size) -> RgbaImage {
        let map = self.blend_map(size);
        let palette = GradientPalette::new(self);
        let mut image = RgbaImage::new(size.width, size.height);
        for (pixel, &level) in image.pixels_mut().zip(map.levels()) {
            *pixel = palette.color(level).into();
        }
        image
    }
}

/// Map a blend factor in `0.0..=1.0` onto a blend level
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the factor is clamped to 0..=1 before scaling to 0..=255"
)]
fn quantize(t: f32) -> u8 {
    (t.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn pixel_count(size: Size) -> usize {
    size.width as usize * size.height as usize
}

/// Per-pixel blend levels for one surface size, top-down rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlendMap {
    size: Size,
    levels: Vec<u8>,
}

impl BlendMap {
    /// Surface size the map covers
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Blend level of every pixel, row by row
    pub fn levels(&self) -> &[u8] {
        &self.levels
    }

    /// Write the BGRA pixels of `palette` into `out`, reusing its allocation
    pub fn fill_bgra(&self, palette: &GradientPalette, out: &mut Vec<u8>) {
        out.resize(self.levels.len() * 4, 0);
        for (pixel, &level) in out.chunks_exact_mut(4).zip(&self.levels) {
            pixel.copy_from_slice(&palette.bgra(level));
        }
    }
}

/// BGRA color of every blend level of one gradient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradientPalette {
    entries: [[u8; 4]; BLEND_LEVELS],
}

impl GradientPalette {
    /// Palette from `gradient`'s center color to its surround color
    pub fn new(gradient: &RadialGradient) -> Self {
        let mut entries = [[0u8; 4]; BLEND_LEVELS];
        for (level, entry) in (0..=u8::MAX).zip(entries.iter_mut()) {
            let color = gradient.level_color(level);
            *entry = [color.b, color.g, color.r, u8::MAX];
        }
        Self { entries }
    }

    /// BGRA bytes of `level`
    pub const fn bgra(&self, level: u8) -> [u8; 4] {
        self.entries[level as usize]
    }

    /// Color of `level`
    pub const fn color(&self, level: u8) -> ClockColor {
        let [b, g, r, _] = self.bgra(level);
        ClockColor::new(r, g, b)
    }
}

/// A composed background ready for upload
#[derive(Debug, Clone, Default)]
pub struct RenderedBackground {
    /// Pixels in BGRA order, top-down rows, as device-independent bitmaps expect
    pub bgra: Vec<u8>,
    size: Size,
    generation: u64,
}

impl RenderedBackground {
    /// Size of the raster
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Changes whenever the pixels change, so uploads can be skipped otherwise
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// Per-surface memo of the background
///
/// The blend map is rebuilt only when the surface size changes. The color
/// changes at most once a second while frames are drawn sixty times a second;
/// a color change refills the pixels from a new palette and every other frame
/// reuses them untouched.
#[derive(Debug, Default)]
pub struct BackgroundCache {
    blend: Option<BlendMap>,
    color: Option<ClockColor>,
    rendered: RenderedBackground,
    render_count: u64,
    blend_map_builds: u64,
}

impl BackgroundCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Background for `gradient` at `size`, recomposing only when either changed
    pub fn get(&mut self, gradient: &RadialGradient, size: Size) -> &RenderedBackground {
        if self.blend.as_ref().is_none_or(|map| map.size() != size) {
            self.blend = Some(gradient.blend_map(size));
            self.blend_map_builds += 1;
            self.color = None;
        }

        if self.color != Some(gradient.inner()) {
            if let Some(map) = &self.blend {
                map.fill_bgra(&GradientPalette::new(gradient), &mut self.rendered.bgra);
            }
            self.rendered.size = size;
            self.color = Some(gradient.inner());
            self.render_count += 1;
            self.rendered.generation = self.render_count;
            trace!(
                "Composed {}x{} background {} -> {}",
                size.width,
                size.height,
                gradient.inner(),
                gradient.outer()
            );
        }
        &self.rendered
    }

    /// Number of background compositions performed so far
    pub const fn render_count(&self) -> u64 {
        self.render_count
    }

    /// Number of blend maps built so far
    pub const fn blend_map_builds(&self) -> u64 {
        self.blend_map_builds
    }
}
