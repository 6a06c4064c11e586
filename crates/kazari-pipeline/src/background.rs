//! Gradient backdrop synthesis and compositing.
//!
//! Rasterizes a [`GradientSpec`] at a given size, composites an image
//! over a matching backdrop ([`fill_background`]), and produces the
//! small checkerboard swatch the gradient picker shows
//! ([`gradient_preview`] — not part of the render pipeline).

use crate::types::{Color, GradientDirection, GradientSpec, GradientStop, RgbaImage};

/// Checkerboard cell size in the preview swatch, in pixels.
const CHECKER_CELL: u32 = 8;
/// Checkerboard cell colors.
const CHECKER_LIGHT: Color = Color::rgb(255, 255, 255);
const CHECKER_DARK: Color = Color::rgb(200, 200, 200);
/// One-pixel swatch border color.
const SWATCH_BORDER: Color = Color::rgb(100, 100, 100);

/// Composite the image over a gradient backdrop of the same size.
///
/// Invalid gradients (see [`GradientSpec::is_valid`]) are skipped: the
/// image is returned unchanged rather than failing the render.
/// Consumes the input buffer.
#[must_use = "returns the composited image"]
pub fn fill_background(image: RgbaImage, gradient: &GradientSpec) -> RgbaImage {
    if !gradient.is_valid() {
        return image;
    }
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return image;
    }

    let backdrop = rasterize(gradient, width, height);
    let mut out = backdrop;
    for (x, y, pixel) in image.enumerate_pixels() {
        let below = *out.get_pixel(x, y);
        out.put_pixel(x, y, over(*pixel, below));
    }
    out
}

/// Render a gradient swatch: checkerboard underlay, the gradient
/// composited over it, and a one-pixel border.
///
/// Invalid gradients yield just the checkerboard and border, so the
/// picker still shows *something* while stops are being edited.
#[must_use]
pub fn gradient_preview(gradient: &GradientSpec, width: u32, height: u32) -> RgbaImage {
    if width == 0 || height == 0 {
        return RgbaImage::new(width, height);
    }

    let mut swatch = RgbaImage::from_fn(width, height, |x, y| {
        if (x / CHECKER_CELL + y / CHECKER_CELL) % 2 == 0 {
            CHECKER_LIGHT.to_pixel()
        } else {
            CHECKER_DARK.to_pixel()
        }
    });

    if gradient.is_valid() {
        let overlay = rasterize(gradient, width, height);
        for (x, y, pixel) in overlay.enumerate_pixels() {
            let below = *swatch.get_pixel(x, y);
            swatch.put_pixel(x, y, over(*pixel, below));
        }
    }

    // Border last so it is never blended away.
    let border = SWATCH_BORDER.to_pixel();
    for x in 0..width {
        swatch.put_pixel(x, 0, border);
        swatch.put_pixel(x, height.saturating_sub(1), border);
    }
    for y in 0..height {
        swatch.put_pixel(0, y, border);
        swatch.put_pixel(width.saturating_sub(1), y, border);
    }
    swatch
}

/// Rasterize a gradient at the given size.
///
/// Callers must have checked [`GradientSpec::is_valid`].
fn rasterize(gradient: &GradientSpec, width: u32, height: u32) -> RgbaImage {
    let mut stops = gradient.stops.clone();
    stops.sort_by(|a, b| a.position.total_cmp(&b.position));

    RgbaImage::from_fn(width, height, |x, y| {
        let t = axis_progress(gradient.direction, x, y, width, height);
        color_at(&stops, t).to_pixel()
    })
}

/// Fraction of the gradient axis covered at pixel (`x`, `y`).
#[allow(clippy::cast_precision_loss)]
fn axis_progress(direction: GradientDirection, x: u32, y: u32, width: u32, height: u32) -> f32 {
    let w = width.saturating_sub(1) as f32;
    let h = height.saturating_sub(1) as f32;
    let (position, extent) = match direction {
        GradientDirection::Horizontal => (x as f32, w),
        GradientDirection::Vertical => (y as f32, h),
        GradientDirection::ForwardDiagonal => (x as f32 + y as f32, w + h),
        GradientDirection::BackwardDiagonal => ((w - x as f32) + y as f32, w + h),
    };
    if extent <= 0.0 {
        0.0
    } else {
        position / extent
    }
}

/// Interpolated color at `t` across sorted stops.
///
/// Positions outside the first/last stop clamp to the endpoint colors,
/// so a single-stop gradient is a solid fill.
fn color_at(stops: &[GradientStop], t: f32) -> Color {
    let Some(first) = stops.first() else {
        return Color::TRANSPARENT;
    };
    if t <= first.position {
        return first.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.position {
            let span = b.position - a.position;
            if span <= f32::EPSILON {
                return b.color;
            }
            return lerp(a.color, b.color, (t - a.position) / span);
        }
    }
    // Past the last stop.
    stops.last().map_or(Color::TRANSPARENT, |stop| stop.color)
}

/// Linear interpolation between two colors.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lerp(a: Color, b: Color, t: f32) -> Color {
    let mix = |x: u8, y: u8| -> u8 {
        (f32::from(x) + (f32::from(y) - f32::from(x)) * t)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    Color::rgba(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b), mix(a.a, b.a))
}

/// Porter-Duff "over": `fg` composited onto `bg`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn over(fg: image::Rgba<u8>, bg: image::Rgba<u8>) -> image::Rgba<u8> {
    let fg_a = f32::from(fg.0[3]) / 255.0;
    let bg_a = f32::from(bg.0[3]) / 255.0;
    let out_a = bg_a.mul_add(1.0 - fg_a, fg_a);
    if out_a <= 0.0 {
        return image::Rgba([0, 0, 0, 0]);
    }
    let blend = |f: u8, b: u8| -> u8 {
        let f = f32::from(f) / 255.0;
        let b = f32::from(b) / 255.0;
        let out = (f * fg_a + b * bg_a * (1.0 - fg_a)) / out_a;
        (out.clamp(0.0, 1.0) * 255.0).round() as u8
    };
    image::Rgba([
        blend(fg.0[0], bg.0[0]),
        blend(fg.0[1], bg.0[1]),
        blend(fg.0[2], bg.0[2]),
        (out_a.clamp(0.0, 1.0) * 255.0).round() as u8,
    ])
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn black_to_white(direction: GradientDirection) -> GradientSpec {
        GradientSpec::two_point(direction, Color::BLACK, Color::WHITE)
    }

    #[test]
    fn horizontal_gradient_runs_left_to_right() {
        let g = rasterize(&black_to_white(GradientDirection::Horizontal), 64, 4);
        assert_eq!(*g.get_pixel(0, 0), Color::BLACK.to_pixel());
        assert_eq!(*g.get_pixel(63, 3), Color::WHITE.to_pixel());
        // Monotonically non-decreasing along the axis.
        let mut previous = 0;
        for x in 0..64 {
            let value = g.get_pixel(x, 2).0[0];
            assert!(value >= previous, "not monotonic at x={x}");
            previous = value;
        }
    }

    #[test]
    fn vertical_gradient_runs_top_to_bottom() {
        let g = rasterize(&black_to_white(GradientDirection::Vertical), 4, 64);
        assert_eq!(*g.get_pixel(0, 0), Color::BLACK.to_pixel());
        assert_eq!(*g.get_pixel(3, 63), Color::WHITE.to_pixel());
    }

    #[test]
    fn backward_diagonal_starts_at_top_right() {
        let g = rasterize(&black_to_white(GradientDirection::BackwardDiagonal), 32, 32);
        assert_eq!(*g.get_pixel(31, 0), Color::BLACK.to_pixel());
        assert_eq!(*g.get_pixel(0, 31), Color::WHITE.to_pixel());
    }

    #[test]
    fn single_stop_is_a_solid_fill() {
        let g = GradientSpec::new(
            GradientDirection::Horizontal,
            vec![GradientStop::new(Color::rgb(10, 20, 30), 0.5)],
        );
        let raster = rasterize(&g, 8, 8);
        assert!(raster.pixels().all(|p| *p == Color::rgb(10, 20, 30).to_pixel()));
    }

    #[test]
    fn stop_order_does_not_matter() {
        let sorted = black_to_white(GradientDirection::Horizontal);
        let reversed = GradientSpec::new(
            GradientDirection::Horizontal,
            vec![
                GradientStop::new(Color::WHITE, 1.0),
                GradientStop::new(Color::BLACK, 0.0),
            ],
        );
        assert_eq!(rasterize(&sorted, 16, 2), rasterize(&reversed, 16, 2));
    }

    #[test]
    fn fill_background_skips_invalid_gradient() {
        let img = RgbaImage::from_pixel(4, 4, image::Rgba([1, 2, 3, 4]));
        let before = img.clone();
        let empty = GradientSpec::new(GradientDirection::Vertical, vec![]);
        assert_eq!(fill_background(img, &empty), before);
    }

    #[test]
    fn fill_background_shows_through_transparency() {
        let img = RgbaImage::from_pixel(4, 4, image::Rgba([0, 0, 0, 0]));
        let red = GradientSpec::new(
            GradientDirection::Vertical,
            vec![GradientStop::new(Color::rgb(255, 0, 0), 0.0)],
        );
        let out = fill_background(img, &red);
        assert!(out.pixels().all(|p| p.0 == [255, 0, 0, 255]));
    }

    #[test]
    fn fill_background_keeps_opaque_content() {
        let img = RgbaImage::from_pixel(4, 4, image::Rgba([0, 255, 0, 255]));
        let out = fill_background(img, &black_to_white(GradientDirection::Vertical));
        assert!(out.pixels().all(|p| p.0 == [0, 255, 0, 255]));
    }

    #[test]
    fn preview_has_border_and_checkerboard() {
        let empty = GradientSpec::new(GradientDirection::Vertical, vec![]);
        let swatch = gradient_preview(&empty, 32, 24);
        assert_eq!(swatch.dimensions(), (32, 24));
        assert_eq!(*swatch.get_pixel(0, 0), SWATCH_BORDER.to_pixel());
        assert_eq!(*swatch.get_pixel(31, 23), SWATCH_BORDER.to_pixel());
        // Inside the border, the invalid gradient leaves bare checker
        // cells: (1,1) is in the first (light) cell, and one cell over
        // is dark.
        assert_eq!(*swatch.get_pixel(1, 1), CHECKER_LIGHT.to_pixel());
        assert_eq!(*swatch.get_pixel(CHECKER_CELL + 1, 1), CHECKER_DARK.to_pixel());
    }

    #[test]
    fn zero_size_preview_is_an_empty_buffer() {
        // No border to draw when either dimension is zero.
        let g = black_to_white(GradientDirection::Vertical);
        assert_eq!(gradient_preview(&g, 0, 24).dimensions(), (0, 24));
        assert_eq!(gradient_preview(&g, 32, 0).dimensions(), (32, 0));
        assert_eq!(gradient_preview(&g, 0, 0).dimensions(), (0, 0));
    }

    #[test]
    fn preview_composites_gradient_over_checker() {
        let swatch = gradient_preview(&black_to_white(GradientDirection::Horizontal), 32, 16);
        // Opaque gradient hides the checkerboard entirely.
        assert_eq!(*swatch.get_pixel(1, 8), lerp(Color::BLACK, Color::WHITE, 1.0 / 31.0).to_pixel());
    }
}
