//! Shared types for the kazari beautification pipeline.

use serde::{Deserialize, Serialize};

/// Re-export `RgbaImage` so downstream crates can reference pipeline
/// buffers without depending on `image` directly.
pub use image::RgbaImage;

/// An RGBA color with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Create an opaque color from RGB components.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color from RGBA components.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to an `image` crate pixel.
    #[must_use]
    pub const fn to_pixel(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, self.a])
    }

    /// Convert from an `image` crate pixel.
    #[must_use]
    pub const fn from_pixel(pixel: image::Rgba<u8>) -> Self {
        Self::rgba(pixel.0[0], pixel.0[1], pixel.0[2], pixel.0[3])
    }
}

/// Axis of a linear gradient, named after the corresponding
/// `System.Drawing` linear gradient modes the upstream presets use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GradientDirection {
    /// Left edge to right edge.
    Horizontal,
    /// Top edge to bottom edge.
    #[default]
    Vertical,
    /// Top-left corner to bottom-right corner.
    ForwardDiagonal,
    /// Top-right corner to bottom-left corner.
    BackwardDiagonal,
}

/// A single color stop along a gradient axis.
///
/// `position` is a fraction of the gradient axis in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Stop color.
    pub color: Color,
    /// Position along the gradient axis (0.0 = start, 1.0 = end).
    pub position: f32,
}

impl GradientStop {
    /// Create a new gradient stop.
    #[must_use]
    pub const fn new(color: Color, position: f32) -> Self {
        Self { color, position }
    }
}

/// A linear gradient: a direction plus one or more color stops.
///
/// A gradient with no stops (or a non-finite / out-of-range stop
/// position) is *invalid*; the background stage silently skips invalid
/// gradients rather than failing the render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientSpec {
    /// Gradient axis.
    pub direction: GradientDirection,
    /// Color stops. Order does not matter; they are sorted by position
    /// when the gradient is rasterized.
    pub stops: Vec<GradientStop>,
}

impl GradientSpec {
    /// Create a gradient from a direction and stops.
    #[must_use]
    pub const fn new(direction: GradientDirection, stops: Vec<GradientStop>) -> Self {
        Self { direction, stops }
    }

    /// Convenience constructor for a simple two-color gradient.
    #[must_use]
    pub fn two_point(direction: GradientDirection, start: Color, end: Color) -> Self {
        Self::new(
            direction,
            vec![GradientStop::new(start, 0.0), GradientStop::new(end, 1.0)],
        )
    }

    /// Whether this gradient can be rasterized: at least one stop, and
    /// every stop position finite and within `0.0..=1.0`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.stops.is_empty()
            && self
                .stops
                .iter()
                .all(|stop| stop.position.is_finite() && (0.0..=1.0).contains(&stop.position))
    }
}

/// User-tunable beautification parameters.
///
/// All size parameters are in pixels; a value of `0` disables the
/// corresponding stage entirely (the stage is skipped, not applied as a
/// no-op). `smart_padding` and plain `padding > 0` are mutually
/// exclusive branches of the crop/pad stage: smart padding trims
/// uniform borders before re-padding, plain padding only adds canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeautifierOptions {
    /// Transparent canvas added around the image, outside the rounded
    /// silhouette and under the shadow.
    pub margin: u32,
    /// Canvas added around the image in the detected (smart) or
    /// top-left-sampled (plain) border color.
    pub padding: u32,
    /// Trim uniform borders before padding instead of padding as-is.
    pub smart_padding: bool,
    /// Corner radius of the rounded-rectangle alpha mask.
    pub rounded_corner: u32,
    /// Drop shadow blur radius. Opacity, offset, and color are fixed
    /// policy (1.0, (0,0), black).
    pub shadow_size: u32,
    /// Gradient backdrop composited behind the image. `None` (or an
    /// invalid gradient) leaves the background untouched.
    pub background: Option<GradientSpec>,
}

impl BeautifierOptions {
    /// Default margin in pixels.
    pub const DEFAULT_MARGIN: u32 = 40;
    /// Default padding in pixels.
    pub const DEFAULT_PADDING: u32 = 50;
    /// Default smart padding state.
    pub const DEFAULT_SMART_PADDING: bool = true;
    /// Default corner radius in pixels.
    pub const DEFAULT_ROUNDED_CORNER: u32 = 20;
    /// Default shadow blur radius in pixels.
    pub const DEFAULT_SHADOW_SIZE: u32 = 25;

    /// The default backdrop: a blue-to-violet vertical gradient.
    #[must_use]
    pub fn default_background() -> GradientSpec {
        GradientSpec::two_point(
            GradientDirection::Vertical,
            Color::rgb(52, 79, 226),
            Color::rgb(144, 71, 244),
        )
    }

    /// Options with every stage disabled: renders the source unchanged.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            margin: 0,
            padding: 0,
            smart_padding: false,
            rounded_corner: 0,
            shadow_size: 0,
            background: None,
        }
    }
}

impl Default for BeautifierOptions {
    fn default() -> Self {
        Self {
            margin: Self::DEFAULT_MARGIN,
            padding: Self::DEFAULT_PADDING,
            smart_padding: Self::DEFAULT_SMART_PADDING,
            rounded_corner: Self::DEFAULT_ROUNDED_CORNER,
            shadow_size: Self::DEFAULT_SHADOW_SIZE,
            background: Some(Self::default_background()),
        }
    }
}

/// Errors that can occur while loading a source image or running the
/// beautification pipeline.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to read the source image file.
    #[error("failed to read image file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to decode the source image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The source image (or file) contained no pixels.
    #[error("source image has no pixels")]
    EmptyInput,

    /// A transform stage reduced the image to zero size.
    #[error("image became empty during the {stage} stage")]
    EmptyImage {
        /// Name of the stage that emptied the image.
        stage: &'static str,
    },
}
