//! Smart cropping: trim uniform borders, then re-pad in the detected
//! color.
//!
//! The reference color is the top-left pixel, compared exactly across
//! all four RGBA channels (so a transparent border and an opaque border
//! of the same RGB are distinguished). Rows and columns equal to the
//! reference are trimmed from every edge, then [`add_canvas`] re-adds
//! `padding` pixels in that color. Plain padding never trims; this
//! stage replaces it when enabled.

use crate::canvas::{add_canvas, top_left_color};
use crate::types::{PipelineError, RgbaImage};

/// Trim uniform borders from all four edges, then add `padding` pixels
/// of canvas in the detected border color.
///
/// Consumes the input buffer. `padding` may be 0, in which case the
/// result is just the trimmed image.
///
/// # Errors
///
/// Returns [`PipelineError::EmptyImage`] if the image is zero-size or
/// entirely uniform (trimming would leave nothing).
pub fn smart_crop_pad(image: RgbaImage, padding: u32) -> Result<RgbaImage, PipelineError> {
    const STAGE: &str = "smart crop";

    let Some(border) = top_left_color(&image) else {
        return Err(PipelineError::EmptyImage { stage: STAGE });
    };
    let reference = border.to_pixel();
    let (width, height) = image.dimensions();

    let row_uniform = |y: u32| (0..width).all(|x| *image.get_pixel(x, y) == reference);
    let col_uniform =
        |x: u32, top: u32, bottom: u32| (top..bottom).all(|y| *image.get_pixel(x, y) == reference);

    let mut top = 0;
    while top < height && row_uniform(top) {
        top += 1;
    }
    if top == height {
        // Every row matched: the whole image is the border color.
        return Err(PipelineError::EmptyImage { stage: STAGE });
    }
    let mut bottom = height;
    while bottom > top && row_uniform(bottom - 1) {
        bottom -= 1;
    }

    let mut left = 0;
    while left < width && col_uniform(left, top, bottom) {
        left += 1;
    }
    let mut right = width;
    while right > left && col_uniform(right - 1, top, bottom) {
        right -= 1;
    }

    let cropped =
        image::imageops::crop_imm(&image, left, top, right - left, bottom - top).to_image();
    drop(image);

    Ok(add_canvas(cropped, padding, Some(border)))
}
