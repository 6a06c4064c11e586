//! Rounded-corner alpha mask.
//!
//! Masks the four corners of an image to a rounded-rectangle
//! silhouette, producing transparency outside the rounded shape. The
//! mask edge is anti-aliased with a one-pixel coverage ramp. Pixels
//! outside the corner squares are untouched, so a disabled stage
//! (radius 0) and the straight edges of an enabled one are exact
//! copies of the input.

use crate::types::RgbaImage;

/// Mask the image's corners to a rounded shape with the given radius.
///
/// The radius is clamped to half the smaller image dimension. Consumes
/// the input buffer and modifies alpha in place; color channels are
/// never changed. A radius of 0 returns the image unchanged.
#[must_use = "returns the corner-rounded image"]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn round_corners(image: RgbaImage, radius: u32) -> RgbaImage {
    let (width, height) = image.dimensions();
    if radius == 0 || width == 0 || height == 0 {
        return image;
    }

    let r = radius.min(width / 2).min(height / 2) as f32;
    let (w, h) = (width as f32, height as f32);

    let mut out = image;
    for y in 0..height {
        for x in 0..width {
            let coverage = corner_coverage(x as f32 + 0.5, y as f32 + 0.5, w, h, r);
            if coverage < 1.0 {
                let pixel = out.get_pixel_mut(x, y);
                pixel.0[3] = (f32::from(pixel.0[3]) * coverage).round() as u8;
            }
        }
    }
    out
}

/// Fraction of a pixel (centered at `x`, `y`) covered by the rounded
/// rectangle `[0, w] x [0, h]` with corner radius `r`.
///
/// 1.0 everywhere except within a corner square, where coverage ramps
/// from 1.0 inside the corner circle to 0.0 one pixel outside it.
fn corner_coverage(x: f32, y: f32, w: f32, h: f32, r: f32) -> f32 {
    // Distance from the nearest corner-circle center, measured only
    // when the point lies in that corner's square.
    let dx = if x < r {
        r - x
    } else if x > w - r {
        x - (w - r)
    } else {
        return 1.0;
    };
    let dy = if y < r {
        r - y
    } else if y > h - r {
        y - (h - r)
    } else {
        return 1.0;
    };

    let distance = dx.hypot(dy);
    (r - distance + 0.5).clamp(0.0, 1.0)
}
