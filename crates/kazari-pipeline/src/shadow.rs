//! Drop shadow compositing.
//!
//! The shadow is built from the image's own silhouette: expand the
//! canvas so the spill fits, Gaussian-blur the alpha channel, colorize
//! the blurred mask, then composite the original on top with
//! Porter-Duff "over". Anti-aliased and semi-transparent content casts
//! a proportionally lighter shadow.

use image::GrayImage;

use crate::canvas::add_canvas;
use crate::types::{Color, RgbaImage};

/// Composite a drop shadow behind the image.
///
/// `blur_radius` is the Gaussian sigma of the shadow mask; `offset`
/// displaces the shadow in pixels (positive = right/down). When
/// `auto_expand` is set, the canvas grows by `2 * blur_radius` plus the
/// offset magnitude on every side so the spill is not clipped.
///
/// Consumes the input buffer.
#[must_use = "returns the shadowed image"]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn add_shadow(
    image: RgbaImage,
    opacity: f32,
    blur_radius: u32,
    color: Color,
    offset: (i32, i32),
    auto_expand: bool,
) -> RgbaImage {
    let (offset_x, offset_y) = offset;
    let expand = if auto_expand {
        blur_radius
            .saturating_mul(2)
            .saturating_add(offset_x.unsigned_abs().max(offset_y.unsigned_abs()))
    } else {
        0
    };
    let expanded = add_canvas(image, expand, None);
    let (width, height) = expanded.dimensions();
    if width == 0 || height == 0 {
        return expanded;
    }

    // Shadow mask: the (blurred) alpha channel of the expanded image.
    let alpha = GrayImage::from_fn(width, height, |x, y| {
        image::Luma([expanded.get_pixel(x, y).0[3]])
    });
    let mask = if blur_radius == 0 {
        // gaussian_blur_f32 panics on sigma <= 0; a hard shadow is the
        // degenerate but well-defined result.
        alpha
    } else {
        imageproc::filter::gaussian_blur_f32(&alpha, blur_radius as f32)
    };

    let shadow_r = f32::from(color.r) / 255.0;
    let shadow_g = f32::from(color.g) / 255.0;
    let shadow_b = f32::from(color.b) / 255.0;

    RgbaImage::from_fn(width, height, |x, y| {
        // Sample the mask at the un-offset position; outside the
        // buffer there is no silhouette and therefore no shadow.
        let sample_x = i64::from(x) - i64::from(offset_x);
        let sample_y = i64::from(y) - i64::from(offset_y);
        let in_bounds = (0..i64::from(width)).contains(&sample_x)
            && (0..i64::from(height)).contains(&sample_y);
        let shadow_a = if in_bounds {
            f32::from(mask.get_pixel(sample_x as u32, sample_y as u32).0[0]) / 255.0 * opacity
        } else {
            0.0
        };

        // Porter-Duff "over": source image over the colorized shadow.
        let source = expanded.get_pixel(x, y);
        let src_a = f32::from(source.0[3]) / 255.0;
        let out_a = shadow_a.mul_add(1.0 - src_a, src_a);
        if out_a <= 0.0 {
            return image::Rgba([0, 0, 0, 0]);
        }

        let blend = |channel: u8, shadow_channel: f32| -> u8 {
            let src_c = f32::from(channel) / 255.0;
            let out_c = (src_c * src_a + shadow_channel * shadow_a * (1.0 - src_a)) / out_a;
            (out_c.clamp(0.0, 1.0) * 255.0).round() as u8
        };
        image::Rgba([
            blend(source.0[0], shadow_r),
            blend(source.0[1], shadow_g),
            blend(source.0[2], shadow_b),
            (out_a.clamp(0.0, 1.0) * 255.0).round() as u8,
        ])
    })
}
