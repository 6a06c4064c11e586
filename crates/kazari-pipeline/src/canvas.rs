//! Canvas enlargement: re-draw an image centered on a larger buffer.
//!
//! Used by three stages: plain padding (fill = sampled border color),
//! margin (fill = transparent), and shadow canvas expansion.

use crate::types::{Color, RgbaImage};

/// Add `size` pixels of canvas on every side of the image.
///
/// The original pixels are copied verbatim (no blending) into the
/// center of a new buffer filled with `fill`, or fully transparent when
/// no fill color is given. A `size` of 0 returns the image unchanged.
///
/// Consumes the input buffer; the returned buffer is the only copy.
#[must_use = "returns the enlarged image"]
pub fn add_canvas(image: RgbaImage, size: u32, fill: Option<Color>) -> RgbaImage {
    if size == 0 {
        return image;
    }

    let fill = fill.unwrap_or(Color::TRANSPARENT).to_pixel();
    // Saturating: a huge `size` must not wrap the dimensions around.
    let mut canvas = RgbaImage::from_pixel(
        image.width().saturating_add(size.saturating_mul(2)),
        image.height().saturating_add(size.saturating_mul(2)),
        fill,
    );
    image::imageops::replace(&mut canvas, &image, i64::from(size), i64::from(size));
    canvas
}

/// The color of the image's top-left pixel, or `None` for a zero-size
/// image.
///
/// Plain padding samples this as its fill color; smart cropping uses it
/// as the border reference color.
#[must_use]
pub fn top_left_color(image: &RgbaImage) -> Option<Color> {
    image
        .get_pixel_checked(0, 0)
        .map(|pixel| Color::from_pixel(*pixel))
}
