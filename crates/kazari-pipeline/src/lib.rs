//! Pure image beautification pipeline.
//!
//! Turns a raw screenshot into a presentation-ready image through a
//! fixed sequence of stages, each driven by one field of
//! [`BeautifierOptions`]:
//!
//! 1. Crop or pad ([`trim::smart_crop_pad`] / [`canvas::add_canvas`])
//! 2. Rounded corners ([`corners::round_corners`])
//! 3. Margin ([`canvas::add_canvas`] with a transparent fill)
//! 4. Drop shadow ([`shadow::add_shadow`])
//! 5. Gradient background ([`background::fill_background`])
//!
//! A stage whose parameter is `0` (or `None`) is skipped entirely. The
//! whole crate is sans-IO apart from [`load_image`]; [`render`] is a
//! pure function of its inputs and is deterministic.

pub mod background;
pub mod canvas;
pub mod corners;
pub mod shadow;
pub mod trim;
pub mod types;

pub use types::{
    BeautifierOptions, Color, GradientDirection, GradientSpec, GradientStop, PipelineError,
    RgbaImage,
};

use std::path::Path;

/// Run the full beautification pipeline over a source image.
///
/// The source is never modified; every enabled stage consumes the
/// previous stage's buffer and produces a new one. With every stage
/// disabled the result is a plain copy of the source.
///
/// # Errors
///
/// Returns [`PipelineError::EmptyInput`] for a zero-size source, and
/// [`PipelineError::EmptyImage`] if smart padding trims a fully uniform
/// image down to nothing.
pub fn render(source: &RgbaImage, options: &BeautifierOptions) -> Result<RgbaImage, PipelineError> {
    if source.width() == 0 || source.height() == 0 {
        return Err(PipelineError::EmptyInput);
    }

    let mut result = source.clone();

    // 1. Crop or pad. Smart padding takes priority over plain padding;
    //    the two are alternative branches of the same stage.
    if options.smart_padding {
        result = trim::smart_crop_pad(result, options.padding)?;
    } else if options.padding > 0 {
        let fill = canvas::top_left_color(&result);
        result = canvas::add_canvas(result, options.padding, fill);
    }

    // 2. Rounded corners.
    if options.rounded_corner > 0 {
        result = corners::round_corners(result, options.rounded_corner);
    }

    // 3. Margin: transparent canvas outside the rounded silhouette.
    if options.margin > 0 {
        result = canvas::add_canvas(result, options.margin, None);
    }

    // 4. Drop shadow. Opacity, offset, and color are fixed policy; only
    //    the blur radius is user-tunable.
    if options.shadow_size > 0 {
        result = shadow::add_shadow(result, 1.0, options.shadow_size, Color::BLACK, (0, 0), true);
    }

    // 5. Gradient background. Invalid gradients are skipped inside the
    //    stage, never an error.
    if let Some(gradient) = &options.background {
        result = background::fill_background(result, gradient);
    }

    Ok(result)
}

/// Load a source image from disk and convert it to RGBA.
///
/// # Errors
///
/// Returns [`PipelineError::Io`] if the file cannot be read,
/// [`PipelineError::ImageDecode`] if it cannot be decoded, and
/// [`PipelineError::EmptyInput`] for an empty file or a decoded image
/// with no pixels.
pub fn load_image(path: &Path) -> Result<RgbaImage, PipelineError> {
    let bytes = std::fs::read(path)?;
    if bytes.is_empty() {
        return Err(PipelineError::EmptyInput);
    }
    let image = image::load_from_memory(&bytes)?.to_rgba8();
    if image.width() == 0 || image.height() == 0 {
        return Err(PipelineError::EmptyInput);
    }
    Ok(image)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// A white image with a centered red core, leaving a `border`-pixel
    /// uniform white frame.
    fn bordered(size: u32, border: u32) -> RgbaImage {
        RgbaImage::from_fn(size, size, |x, y| {
            if x >= border && x < size - border && y >= border && y < size - border {
                Color::rgb(255, 0, 0).to_pixel()
            } else {
                Color::WHITE.to_pixel()
            }
        })
    }

    fn only(f: impl FnOnce(&mut BeautifierOptions)) -> BeautifierOptions {
        let mut options = BeautifierOptions::disabled();
        f(&mut options);
        options
    }

    #[test]
    fn all_stages_disabled_is_identity() {
        let source = bordered(20, 3);
        let out = render(&source, &BeautifierOptions::disabled()).unwrap();
        assert_eq!(out, source);
    }

    #[test]
    fn plain_padding_grows_by_padding_on_each_side() {
        let source = bordered(100, 0);
        let out = render(&source, &only(|o| o.padding = 10)).unwrap();
        assert_eq!(out.dimensions(), (120, 120));
        // Fill is the sampled top-left color.
        assert_eq!(Color::from_pixel(*out.get_pixel(0, 0)), Color::rgb(255, 0, 0));
    }

    #[test]
    fn smart_padding_trims_before_repadding() {
        // 30x30 with a 5px white border around a 20x20 core, re-padded
        // by 8 -> 36x36.
        let source = bordered(30, 5);
        let out = render(
            &source,
            &only(|o| {
                o.smart_padding = true;
                o.padding = 8;
            }),
        )
        .unwrap();
        assert_eq!(out.dimensions(), (36, 36));
    }

    #[test]
    fn plain_padding_never_trims() {
        // Same source, smart padding off: the uniform border stays and
        // the canvas just grows.
        let source = bordered(30, 5);
        let out = render(&source, &only(|o| o.padding = 8)).unwrap();
        assert_eq!(out.dimensions(), (46, 46));
    }

    #[test]
    fn rounded_corners_and_margin_compose() {
        let source = bordered(100, 0);
        let out = render(
            &source,
            &only(|o| {
                o.rounded_corner = 10;
                o.margin = 5;
            }),
        )
        .unwrap();
        assert_eq!(out.dimensions(), (110, 110));
        // Margin ring is transparent, the rounded corner behind it too.
        assert_eq!(out.get_pixel(0, 0).0[3], 0);
        assert_eq!(out.get_pixel(5, 5).0[3], 0);
        // Center is the untouched core.
        assert_eq!(out.get_pixel(55, 55).0, [255, 0, 0, 255]);
    }

    #[test]
    fn shadow_expands_the_canvas() {
        let source = bordered(40, 0);
        let out = render(&source, &only(|o| o.shadow_size = 5)).unwrap();
        assert_eq!(out.dimensions(), (60, 60));
    }

    #[test]
    fn invalid_gradient_is_skipped() {
        let source = bordered(20, 0);
        let invalid = only(|o| {
            o.background = Some(GradientSpec::new(GradientDirection::Vertical, vec![]));
        });
        let out = render(&source, &invalid).unwrap();
        assert_eq!(out, source);
    }

    #[test]
    fn uniform_image_with_smart_padding_is_an_error() {
        let source = RgbaImage::from_pixel(16, 16, Color::WHITE.to_pixel());
        let result = render(&source, &only(|o| o.smart_padding = true));
        assert!(matches!(result, Err(PipelineError::EmptyImage { .. })));
    }

    #[test]
    fn zero_size_source_is_an_error() {
        let result = render(&RgbaImage::new(0, 0), &BeautifierOptions::disabled());
        assert!(matches!(result, Err(PipelineError::EmptyInput)));
    }

    #[test]
    fn render_is_deterministic() {
        let source = bordered(50, 4);
        let options = BeautifierOptions::default();
        let first = render(&source, &options).unwrap();
        let second = render(&source, &options).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn render_does_not_modify_the_source() {
        let source = bordered(50, 4);
        let before = source.clone();
        let _ = render(&source, &BeautifierOptions::default()).unwrap();
        assert_eq!(source, before);
    }

    #[test]
    fn default_options_produce_an_opaque_backdrop() {
        let source = bordered(50, 4);
        let out = render(&source, &BeautifierOptions::default()).unwrap();
        // The default gradient is opaque, so every pixel ends opaque.
        assert!(out.pixels().all(|p| p.0[3] == 255));
    }

    #[test]
    fn load_image_reports_missing_files() {
        let result = load_image(Path::new("/nonexistent/kazari-source.png"));
        assert!(matches!(result, Err(PipelineError::Io(_))));
    }
}
