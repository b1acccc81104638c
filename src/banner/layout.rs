//! Caption placement and the overlay drawing pass.

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, Blend};
use imageproc::rect::Rect;

use super::font::{CaptionFont, TextSize};

/// Space between the caption and the edges of its band.
pub const PADDING: i32 = 20;
/// Extra gap between the caption and the right edge of the image.
pub const RIGHT_MARGIN: i32 = 60;
/// Top of the caption.
pub const TOP: i32 = 40;
/// Gap between the band's right edge and the right edge of the image.
pub const BAND_RIGHT_INSET: i32 = 40;

/// Translucent black behind the caption.
pub const BAND_COLOR: Rgba<u8> = Rgba([0, 0, 0, 150]);
/// Shadow drawn one pixel down-right of the caption.
pub const SHADOW_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);
/// Caption colour.
pub const TEXT_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Inclusive pixel box `[x0, x1] x [y0, y1]`. May extend past the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    /// Left edge.
    pub x0: i32,
    /// Top edge.
    pub y0: i32,
    /// Right edge, inclusive.
    pub x1: i32,
    /// Bottom edge, inclusive.
    pub y1: i32,
}

impl Band {
    /// The part of the band that lies inside a `width` x `height` image, or
    /// `None` if nothing does.
    #[must_use]
    pub fn clip(&self, width: u32, height: u32) -> Option<Rect> {
        let max_x = i32::try_from(width).unwrap_or(i32::MAX) - 1;
        let max_y = i32::try_from(height).unwrap_or(i32::MAX) - 1;
        let (x0, y0) = (self.x0.max(0), self.y0.max(0));
        let (x1, y1) = (self.x1.min(max_x), self.y1.min(max_y));
        if x1 < x0 || y1 < y0 {
            return None;
        }
        let w = u32::try_from(x1 - x0 + 1).ok()?;
        let h = u32::try_from(y1 - y0 + 1).ok()?;
        Some(Rect::at(x0, y0).of_size(w, h))
    }
}

/// Where the caption and its band go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptionLayout {
    /// Caption left edge.
    pub x: i32,
    /// Caption top edge.
    pub y: i32,
    /// Band behind the caption.
    pub band: Band,
}

/// Anchor the caption near the top-right corner of an image `image_width`
/// pixels wide.
#[must_use]
pub fn place(image_width: u32, text: TextSize) -> CaptionLayout {
    let image_width = i32::try_from(image_width).unwrap_or(i32::MAX);
    let w = i32::try_from(text.width).unwrap_or(i32::MAX);
    let h = i32::try_from(text.height).unwrap_or(i32::MAX);

    let x = image_width.saturating_sub(w).saturating_sub(PADDING + RIGHT_MARGIN);
    let y = TOP;
    let band = Band {
        x0: x.saturating_sub(PADDING),
        y0: y - PADDING / 2,
        x1: image_width - BAND_RIGHT_INSET,
        y1: y.saturating_add(h).saturating_add(PADDING / 2),
    };
    CaptionLayout { x, y, band }
}

/// Draw the band, the shadow and the caption onto `image`.
///
/// The band is alpha-blended over the existing pixels; the image keeps its
/// dimensions.
#[must_use]
pub fn draw_caption(image: RgbaImage, font: &CaptionFont, text: &str) -> RgbaImage {
    let size = font.measure(text);
    let layout = place(image.width(), size);
    tracing::debug!(?size, ?layout, "caption layout");

    let mut image = match layout.band.clip(image.width(), image.height()) {
        Some(rect) => {
            let mut canvas = Blend(image);
            draw_filled_rect_mut(&mut canvas, rect, BAND_COLOR);
            canvas.0
        }
        None => image,
    };

    font.draw(&mut image, layout.x + 1, layout.y + 1, SHADOW_COLOR, text);
    font.draw(&mut image, layout.x, layout.y, TEXT_COLOR, text);
    image
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_for_standard_banner() {
        let layout = place(1584, TextSize { width: 500, height: 30 });
        assert_eq!(layout.x, 1584 - 500 - 20 - 60);
        assert_eq!(layout.y, 40);
        assert_eq!(layout.band, Band { x0: 984, y0: 30, x1: 1544, y1: 80 });
    }

    #[test]
    fn clip_keeps_inclusive_edges() {
        let band = Band { x0: 10, y0: 5, x1: 19, y1: 14 };
        let rect = band.clip(100, 100).unwrap();
        assert_eq!((rect.left(), rect.top(), rect.width(), rect.height()), (10, 5, 10, 10));
    }

    #[test]
    fn clip_trims_to_image() {
        let band = Band { x0: -30, y0: -5, x1: 500, y1: 20 };
        let rect = band.clip(64, 16).unwrap();
        assert_eq!((rect.left(), rect.top(), rect.width(), rect.height()), (0, 0, 64, 16));
    }

    #[test]
    fn clip_outside_is_none() {
        assert!(Band { x0: 10, y0: 0, x1: 5, y1: 10 }.clip(100, 100).is_none());
        assert!(Band { x0: 0, y0: 200, x1: 10, y1: 210 }.clip(100, 100).is_none());
    }

    #[test]
    fn band_is_translucent_over_opaque_image() {
        let image = RgbaImage::from_pixel(400, 120, Rgba([200, 200, 200, 255]));
        let out = draw_caption(image, &CaptionFont::builtin(), "Hi");

        let layout = place(400, CaptionFont::builtin().measure("Hi"));
        // Inside the band but right of the text: darkened, still opaque.
        let p = out.get_pixel(u32::try_from(layout.band.x1).unwrap() - 1, 32);
        assert_eq!(p.0[3], 255);
        assert!(p.0[0] < 200 && p.0[0] > 0, "band pixel {p:?}");
        // Outside the band: untouched.
        assert_eq!(out.get_pixel(5, 110).0, [200, 200, 200, 255]);
    }

    #[test]
    fn caption_keeps_dimensions_even_when_wider_than_image() {
        let image = RgbaImage::from_pixel(50, 20, Rgba([10, 20, 30, 255]));
        let out = draw_caption(image, &CaptionFont::builtin(), "Open to engineering leadership");
        assert_eq!(out.dimensions(), (50, 20));
    }

    #[test]
    fn caption_draws_white_pixels() {
        let image = RgbaImage::from_pixel(400, 120, Rgba([0, 0, 255, 255]));
        let out = draw_caption(image, &CaptionFont::builtin(), "Remote");
        assert!(out.pixels().any(|p| p.0 == [255, 255, 255, 255]));
    }
}
