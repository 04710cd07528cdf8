//! Off-screen GDI composition
//!
//! Each surface keeps two device-dependent bitmaps alive between frames:
//!
//! - the background, uploaded from the BGRA raster only when the raster changes
//! - the frame, which receives a copy of the background plus the labels and is
//!   then copied to the window with a single `BitBlt`
//!
//! Both are recreated when the surface size changes. Label fonts are cached per
//! em height for the same lifetime.

use crate::clock::TextColor;
use crate::error::{ColorClockError, Result, StringError};
use crate::geometry::Size;
use crate::render::{Canvas, Label, RenderedBackground, VerticalAnchor};
use tracing::{debug, trace};
use windows::Win32::Foundation::{COLORREF, RECT};
use windows::Win32::Graphics::Gdi::{
    ANTIALIASED_QUALITY, BI_RGB, BITMAPINFO, BITMAPINFOHEADER, BitBlt, CLIP_DEFAULT_PRECIS,
    CreateCompatibleBitmap, CreateCompatibleDC, CreateFontW, DEFAULT_CHARSET, DIB_RGB_COLORS,
    DT_BOTTOM, DT_CENTER, DT_NOPREFIX, DT_SINGLELINE, DT_TOP, DeleteDC, DeleteObject, DrawTextW,
    HBITMAP, HDC, HFONT, HGDIOBJ, OUT_TT_PRECIS, SRCCOPY, SelectObject, SetBkMode,
    SetDIBitsToDevice, SetTextColor, TRANSPARENT,
};
use windows::core::HSTRING;

/// `FW_NORMAL`
const FONT_WEIGHT_NORMAL: i32 = 400;
/// `FIXED_PITCH | FF_MODERN`, so a missing face falls back to a monospace one
const FIXED_PITCH_MODERN: u32 = 0x01 | 0x30;

/// A memory DC with a bitmap compatible with the window selected into it
struct MemoryBitmap {
    dc: HDC,
    bitmap: HBITMAP,
    previous: HGDIOBJ,
}

impl MemoryBitmap {
    #[allow(unsafe_code)] // Windows FFI for GDI objects
    fn new(window_dc: HDC, size: Size) -> Result<Self> {
        let (width, height) = dimensions(size);

        unsafe {
            let dc = CreateCompatibleDC(Some(window_dc));
            if dc.is_invalid() {
                return Err(ColorClockError::WindowsApiError(
                    windows::core::Error::from_thread(),
                ));
            }

            let bitmap = CreateCompatibleBitmap(window_dc, width, height);
            if bitmap.is_invalid() {
                let _ = DeleteDC(dc);
                return Err(ColorClockError::WindowsApiError(
                    windows::core::Error::from_thread(),
                ));
            }

            let previous = SelectObject(dc, bitmap.into());
            Ok(Self {
                dc,
                bitmap,
                previous,
            })
        }
    }
}

impl Drop for MemoryBitmap {
    #[allow(unsafe_code)] // Windows FFI for GDI cleanup
    fn drop(&mut self) {
        unsafe {
            let _ = SelectObject(self.dc, self.previous);
            let _ = DeleteObject(self.bitmap.into());
            let _ = DeleteDC(self.dc);
        }
    }
}

/// Label fonts of one surface, keyed by em height
struct FontCache {
    face: HSTRING,
    fonts: Vec<(i32, HFONT)>,
}

impl FontCache {
    fn new(face: &str) -> Self {
        Self {
            face: HSTRING::from(face),
            fonts: Vec::with_capacity(2),
        }
    }

    #[allow(unsafe_code)] // Windows FFI for font creation
    fn get(&mut self, em_height: i32) -> Result<HFONT> {
        if let Some(&(_, font)) = self.fonts.iter().find(|(height, _)| *height == em_height) {
            return Ok(font);
        }

        // Negative height selects by em size rather than cell height
        let font = unsafe {
            CreateFontW(
                -em_height,
                0,
                0,
                0,
                FONT_WEIGHT_NORMAL,
                0,
                0,
                0,
                DEFAULT_CHARSET,
                OUT_TT_PRECIS,
                CLIP_DEFAULT_PRECIS,
                ANTIALIASED_QUALITY,
                FIXED_PITCH_MODERN,
                &self.face,
            )
        };
        if font.is_invalid() {
            return Err(ColorClockError::WindowsApiError(
                windows::core::Error::from_thread(),
            ));
        }

        debug!("Created {}px {} font", em_height, self.face);
        self.fonts.push((em_height, font));
        Ok(font)
    }

    #[allow(unsafe_code)] // Windows FFI for GDI cleanup
    fn clear(&mut self) {
        for (_, font) in self.fonts.drain(..) {
            unsafe {
                let _ = DeleteObject(font.into());
            }
        }
    }

    fn len(&self) -> usize {
        self.fonts.len()
    }
}

impl Drop for FontCache {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Size-bound GDI objects of a surface
struct Buffers {
    size: Size,
    frame: MemoryBitmap,
    background: MemoryBitmap,
    uploaded: Option<u64>,
}

/// GDI drawing state kept for the lifetime of a surface
pub struct SurfaceCanvas {
    fonts: FontCache,
    buffers: Option<Buffers>,
    uploads: u64,
}

impl SurfaceCanvas {
    /// Canvas drawing labels in `font_face`
    pub fn new(font_face: &str) -> Self {
        Self {
            fonts: FontCache::new(font_face),
            buffers: None,
            uploads: 0,
        }
    }

    /// Make sure the off-screen bitmaps match `size`
    ///
    /// Must be called before painting each frame. A size change drops the
    /// bitmaps, the uploaded background and the fonts.
    #[allow(unsafe_code)] // Windows FFI for DC setup
    pub fn prepare(&mut self, window_dc: HDC, size: Size) -> Result<()> {
        if self.buffers.as_ref().is_some_and(|b| b.size == size) {
            return Ok(());
        }

        self.buffers = None;
        self.fonts.clear();

        let frame = MemoryBitmap::new(window_dc, size)?;
        let background = MemoryBitmap::new(window_dc, size)?;
        unsafe {
            SetBkMode(frame.dc, TRANSPARENT);
        }

        debug!("Allocated {}x{} surface buffers", size.width, size.height);
        self.buffers = Some(Buffers {
            size,
            frame,
            background,
            uploaded: None,
        });
        Ok(())
    }

    /// Copy the finished frame onto `window_dc`
    #[allow(unsafe_code)] // Windows FFI for the final blit
    pub fn present(&self, window_dc: HDC) -> Result<()> {
        let buffers = self.buffers()?;
        let (width, height) = dimensions(buffers.size);
        unsafe {
            BitBlt(
                window_dc,
                0,
                0,
                width,
                height,
                Some(buffers.frame.dc),
                0,
                0,
                SRCCOPY,
            )?;
        }
        Ok(())
    }

    /// Number of background uploads performed so far
    pub const fn uploads(&self) -> u64 {
        self.uploads
    }

    /// Number of fonts currently cached
    pub fn cached_fonts(&self) -> usize {
        self.fonts.len()
    }

    fn buffers(&self) -> Result<&Buffers> {
        self.buffers.as_ref().ok_or_else(|| {
            ColorClockError::SurfaceError(StringError::new("surface canvas used before prepare"))
        })
    }
}

impl Canvas for SurfaceCanvas {
    #[allow(unsafe_code)] // Windows FFI for DIB transfer
    fn draw_background(&mut self, background: &RenderedBackground) -> Result<()> {
        let buffers = self.buffers.as_mut().ok_or_else(|| {
            ColorClockError::SurfaceError(StringError::new("surface canvas used before prepare"))
        })?;
        let raster = background.size();
        if raster != buffers.size {
            return Err(ColorClockError::SurfaceError(StringError::new(format!(
                "background is {}x{} but the surface is {}x{}",
                raster.width, raster.height, buffers.size.width, buffers.size.height
            ))));
        }
        let (width, height) = dimensions(raster);

        if buffers.uploaded != Some(background.generation()) {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "size_of::<BITMAPINFOHEADER>() is a compile-time constant that fits in u32"
            )]
            let info = BITMAPINFO {
                bmiHeader: BITMAPINFOHEADER {
                    biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
                    biWidth: width,
                    biHeight: -height, // Negative for top-down DIB
                    biPlanes: 1,
                    biBitCount: 32,
                    biCompression: BI_RGB.0,
                    ..Default::default()
                },
                ..Default::default()
            };

            let lines = unsafe {
                SetDIBitsToDevice(
                    buffers.background.dc,
                    0,
                    0,
                    raster.width,
                    raster.height,
                    0,
                    0,
                    0,
                    raster.height,
                    background.bgra.as_ptr().cast(),
                    &raw const info,
                    DIB_RGB_COLORS,
                )
            };
            if lines == 0 && raster.height > 0 {
                return Err(ColorClockError::SurfaceError(StringError::new(
                    "SetDIBitsToDevice copied no scan lines",
                )));
            }

            buffers.uploaded = Some(background.generation());
            self.uploads += 1;
            trace!("Uploaded background generation {}", background.generation());
        }

        unsafe {
            BitBlt(
                buffers.frame.dc,
                0,
                0,
                width,
                height,
                Some(buffers.background.dc),
                0,
                0,
                SRCCOPY,
            )?;
        }
        Ok(())
    }

    #[allow(unsafe_code)] // Windows FFI for text output
    fn draw_label(&mut self, label: &Label) -> Result<()> {
        let em_height = em_height(label.text_box.font_px);
        if em_height == 0 {
            return Ok(());
        }
        let font = self.fonts.get(em_height)?;
        let dc = self.buffers()?.frame.dc;

        let bounds = label.text_box.bounds;
        let mut rect = RECT {
            left: bounds.x,
            top: bounds.y,
            right: bounds.right(),
            bottom: bounds.bottom(),
        };
        let anchor = match label.text_box.anchor {
            VerticalAnchor::Top => DT_TOP,
            VerticalAnchor::Bottom => DT_BOTTOM,
        };
        let mut text: Vec<u16> = label.text.encode_utf16().collect();

        unsafe {
            let previous_font = SelectObject(dc, font.into());
            SetTextColor(dc, colorref(label.color));
            DrawTextW(
                dc,
                &mut text,
                &raw mut rect,
                DT_CENTER | anchor | DT_SINGLELINE | DT_NOPREFIX,
            );
            let _ = SelectObject(dc, previous_font);
        }

        trace!("Drew label {:?} at {:?}", label.text, bounds);
        Ok(())
    }
}

/// Font em height in whole pixels
#[expect(
    clippy::cast_possible_truncation,
    reason = "font sizes are a small fraction of the surface width"
)]
fn em_height(font_px: f32) -> i32 {
    font_px.round() as i32
}

/// GDI `COLORREF` (0x00BBGGRR) for a text color
fn colorref(color: TextColor) -> COLORREF {
    let color = color.to_color();
    COLORREF(u32::from(color.r) | (u32::from(color.g) << 8) | (u32::from(color.b) << 16))
}

fn dimensions(size: Size) -> (i32, i32) {
    (
        i32::try_from(size.width).unwrap_or(i32::MAX),
        i32::try_from(size.height).unwrap_or(i32::MAX),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::FrameLayout;

    #[test]
    fn test_colorref_layout() {
        assert_eq!(colorref(TextColor::White), COLORREF(0x00FF_FFFF));
        assert_eq!(colorref(TextColor::Black), COLORREF(0));
    }

    #[test]
    fn test_em_heights_for_full_hd() {
        let layout = FrameLayout::compute(Size::new(1920, 1080));
        assert_eq!(em_height(layout.time_label.font_px), 192);
        assert_eq!(em_height(layout.hex_label.font_px), 41);
    }

    #[test]
    fn test_font_cache_creates_each_height_once() {
        let mut fonts = FontCache::new("mononoki");

        let time = fonts.get(192).unwrap();
        let hex = fonts.get(41).unwrap();
        assert_eq!(fonts.get(192).unwrap(), time);
        assert_eq!(fonts.get(41).unwrap(), hex);
        assert_eq!(fonts.len(), 2);

        fonts.clear();
        assert_eq!(fonts.len(), 0);
    }

    #[test]
    #[allow(unsafe_code)] // Windows FFI for the screen DC
    fn test_background_uploads_only_on_new_generation() {
        use crate::clock::ClockColor;
        use crate::render::{BackgroundCache, RadialGradient};
        use windows::Win32::Graphics::Gdi::{GetDC, ReleaseDC};

        let size = Size::new(64, 48);
        let layout = FrameLayout::compute(size);
        let first = RadialGradient::for_surface(&layout, ClockColor::new(10, 20, 30));
        let second = RadialGradient::for_surface(&layout, ClockColor::new(11, 20, 34));
        let mut cache = BackgroundCache::new();
        let mut canvas = SurfaceCanvas::new("mononoki");

        let screen_dc = unsafe { GetDC(None) };
        canvas.prepare(screen_dc, size).unwrap();
        for _ in 0..60 {
            canvas.draw_background(cache.get(&first, size)).unwrap();
        }
        assert_eq!(canvas.uploads(), 1);

        canvas.draw_background(cache.get(&second, size)).unwrap();
        assert_eq!(canvas.uploads(), 2);

        canvas.prepare(screen_dc, size).unwrap();
        canvas.draw_background(cache.get(&second, size)).unwrap();
        assert_eq!(canvas.uploads(), 2);

        canvas.prepare(screen_dc, Size::new(32, 24)).unwrap();
        assert!(canvas.draw_background(cache.get(&second, size)).is_err());

        drop(canvas);
        unsafe {
            ReleaseDC(None, screen_dc);
        }
    }

    #[test]
    fn test_unprepared_canvas_reports_error() {
        let canvas = SurfaceCanvas::new("mononoki");
        assert!(matches!(
            canvas.present(HDC::default()),
            Err(ColorClockError::SurfaceError(_))
        ));
        assert_eq!(canvas.uploads(), 0);
        assert_eq!(canvas.cached_fonts(), 0);
    }
}
