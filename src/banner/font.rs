//! Caption font loading, measuring and drawing.
//!
//! A TrueType font is preferred. When it cannot be loaded the caption is drawn
//! with the 8x8 bitmap glyphs from `font8x8`, so annotation never fails for
//! lack of a font.

use std::path::Path;

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use image::{Pixel, Rgba, RgbaImage};

/// Width and height of rendered text, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSize {
    /// Horizontal extent.
    pub width: u32,
    /// Vertical extent.
    pub height: u32,
}

impl TextSize {
    fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Crude size estimate used when no font metric is usable.
    #[must_use]
    pub fn estimate(text: &str) -> Self {
        let chars = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
        Self { width: chars.saturating_mul(8), height: 24 }
    }
}

/// Edge length of a bitmap glyph before scaling.
const BITMAP_GLYPH: u32 = 8;

/// Scale factor applied to bitmap glyphs.
const BITMAP_SCALE: u32 = 2;

/// Font used to render the caption.
pub enum CaptionFont {
    /// A TrueType/OpenType font at a fixed pixel scale.
    Outline {
        /// Parsed font data.
        font: FontVec,
        /// Pixel scale.
        scale: PxScale,
    },
    /// Built-in 8x8 bitmap glyphs, each pixel drawn as a `scale` square.
    Bitmap {
        /// Pixel multiplier.
        scale: u32,
    },
}

impl std::fmt::Debug for CaptionFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Outline { scale, .. } => f.debug_struct("Outline").field("scale", scale).finish(),
            Self::Bitmap { scale } => f.debug_struct("Bitmap").field("scale", scale).finish(),
        }
    }
}

impl CaptionFont {
    /// Load a TrueType font, falling back to [`CaptionFont::builtin`] on any
    /// failure. The fallback is silent apart from a debug log line.
    #[must_use]
    pub fn load_or_builtin(path: &Path, size: f32) -> Self {
        match std::fs::read(path).map_err(|e| e.to_string()).and_then(|data| {
            FontVec::try_from_vec(data).map_err(|e| e.to_string())
        }) {
            Ok(font) => Self::Outline { font, scale: PxScale::from(size) },
            Err(reason) => {
                tracing::debug!(path = %path.display(), %reason, "using built-in bitmap font");
                Self::builtin()
            }
        }
    }

    /// The built-in bitmap font.
    #[must_use]
    pub fn builtin() -> Self {
        Self::Bitmap { scale: BITMAP_SCALE }
    }

    /// Measure `text`.
    ///
    /// Outline fonts try the glyph bounding box first, then summed advances,
    /// then [`TextSize::estimate`].
    #[must_use]
    pub fn measure(&self, text: &str) -> TextSize {
        match self {
            Self::Outline { font, scale } => {
                let (width, height) = imageproc::drawing::text_size(*scale, font, text);
                let precise = TextSize {
                    width: u32::try_from(width).unwrap_or(0),
                    height: u32::try_from(height).unwrap_or(0),
                };
                if !precise.is_empty() {
                    return precise;
                }
                let advanced = advance_size(font, *scale, text);
                if !advanced.is_empty() {
                    tracing::debug!("glyph bounds empty, measured by advances");
                    return advanced;
                }
                tracing::debug!("font metrics empty, estimating caption size");
                TextSize::estimate(text)
            }
            Self::Bitmap { scale } => {
                let chars = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
                TextSize {
                    width: chars.saturating_mul(BITMAP_GLYPH * scale),
                    height: BITMAP_GLYPH * scale,
                }
            }
        }
    }

    /// Draw `text` with its top-left corner at `(x, y)`, blending `color`
    /// over the existing pixels. Glyphs falling outside the image are clipped.
    pub fn draw(&self, image: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>, text: &str) {
        match self {
            Self::Outline { font, scale } => {
                imageproc::drawing::draw_text_mut(image, color, x, y, *scale, font, text);
            }
            Self::Bitmap { scale } => draw_bitmap(image, x, y, *scale, color, text),
        }
    }
}

fn advance_size(font: &FontVec, scale: PxScale, text: &str) -> TextSize {
    let scaled = font.as_scaled(scale);
    let mut width = 0.0f32;
    let mut previous = None;
    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(prev) = previous {
            width += scaled.kern(prev, id);
        }
        width += scaled.h_advance(id);
        previous = Some(id);
    }
    TextSize { width: to_pixels(width), height: to_pixels(scaled.height()) }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_pixels(value: f32) -> u32 {
    value.max(0.0).ceil() as u32
}

/// Glyph rows for `c`, substituting characters the bitmap font lacks.
fn bitmap_glyph(c: char) -> [u8; 8] {
    let c = match c {
        '\u{2010}'..='\u{2015}' => '-',
        '\u{2018}' | '\u{2019}' => '\'',
        '\u{201C}' | '\u{201D}' => '"',
        other => other,
    };
    BASIC_FONTS
        .get(c)
        .or_else(|| LATIN_FONTS.get(c))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn draw_bitmap(image: &mut RgbaImage, x: i32, y: i32, scale: u32, color: Rgba<u8>, text: &str) {
    let (width, height) = (i64::from(image.width()), i64::from(image.height()));
    let step = i64::from(BITMAP_GLYPH * scale);
    let scale = i64::from(scale);

    for (n, c) in (0i64..).zip(text.chars()) {
        let origin_x = i64::from(x) + n * step;
        for (row, bits) in (0i64..).zip(bitmap_glyph(c)) {
            for col in 0..8i64 {
                if bits & (1 << col) == 0 {
                    continue;
                }
                for dy in 0..scale {
                    for dx in 0..scale {
                        let px = origin_x + col * scale + dx;
                        let py = i64::from(y) + row * scale + dy;
                        if (0..width).contains(&px) && (0..height).contains(&py) {
                            image.get_pixel_mut(px as u32, py as u32).blend(&color);
                        }
                    }
                }
            }
        }
    }
}
