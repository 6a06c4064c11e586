//! kazari: one-shot screenshot beautification from the command line.
//!
//! Loads an image, runs the beautification pipeline with parameters
//! taken from the flags, and writes the result. The live-preview layer
//! in `kazari-preview` is for interactive frontends; this binary is the
//! batch counterpart.
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin kazari -- [OPTIONS] <INPUT> <OUTPUT>
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use kazari_pipeline::BeautifierOptions;

/// Upper bound for the pixel-size flags. Keeps canvas expansion well
/// inside `u32` even when several stages stack their growth.
const MAX_SIZE_FLAG: u64 = 10_000;

fn size_flag() -> clap::builder::RangedU64ValueParser<u32> {
    clap::builder::RangedU64ValueParser::<u32>::new().range(..=MAX_SIZE_FLAG)
}

/// Beautify a screenshot: smart padding, rounded corners, drop shadow,
/// and a gradient backdrop.
#[derive(Parser)]
#[command(name = "kazari", version)]
struct Cli {
    /// Path to the input image (PNG, JPEG, BMP, WebP).
    input: PathBuf,

    /// Path to write the beautified image to (format from extension).
    output: PathBuf,

    /// Transparent margin in pixels (0 disables).
    #[arg(long, default_value_t = BeautifierOptions::DEFAULT_MARGIN, value_parser = size_flag())]
    margin: u32,

    /// Padding in pixels (0 disables).
    #[arg(long, default_value_t = BeautifierOptions::DEFAULT_PADDING, value_parser = size_flag())]
    padding: u32,

    /// Disable smart padding (trim uniform borders before re-padding);
    /// padding then just adds canvas in the top-left pixel's color.
    #[arg(long)]
    no_smart_padding: bool,

    /// Rounded corner radius in pixels (0 disables).
    #[arg(long, default_value_t = BeautifierOptions::DEFAULT_ROUNDED_CORNER, value_parser = size_flag())]
    rounded_corner: u32,

    /// Drop shadow blur radius in pixels (0 disables).
    #[arg(long, default_value_t = BeautifierOptions::DEFAULT_SHADOW_SIZE, value_parser = size_flag())]
    shadow_size: u32,

    /// Disable the gradient background.
    #[arg(long)]
    no_background: bool,

    /// Background gradient as a JSON string.
    ///
    /// When provided, overrides the default blue-to-violet gradient.
    /// The JSON must be a valid `GradientSpec` serialization.
    #[arg(long, conflicts_with = "no_background")]
    background_json: Option<String>,
}

/// Build [`BeautifierOptions`] from CLI arguments.
fn options_from_cli(cli: &Cli) -> Result<BeautifierOptions, String> {
    let background = if cli.no_background {
        None
    } else if let Some(ref json) = cli.background_json {
        Some(
            serde_json::from_str(json)
                .map_err(|e| format!("Error parsing --background-json: {e}"))?,
        )
    } else {
        Some(BeautifierOptions::default_background())
    };

    Ok(BeautifierOptions {
        margin: cli.margin,
        padding: cli.padding,
        smart_padding: !cli.no_smart_padding,
        rounded_corner: cli.rounded_corner,
        shadow_size: cli.shadow_size,
        background,
    })
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let options = match options_from_cli(&cli) {
        Ok(options) => options,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    let source = match kazari_pipeline::load_image(&cli.input) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error loading {}: {e}", cli.input.display());
            return ExitCode::FAILURE;
        }
    };
    log::debug!(
        "loaded {} ({}x{})",
        cli.input.display(),
        source.width(),
        source.height(),
    );

    let start = Instant::now();
    let result = match kazari_pipeline::render(&source, &options) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Pipeline error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let elapsed = start.elapsed();

    if let Err(e) = result.save(&cli.output) {
        eprintln!("Error writing {}: {e}", cli.output.display());
        return ExitCode::FAILURE;
    }

    eprintln!(
        "{} ({}x{}) -> {} ({}x{}) in {:.1}ms",
        cli.input.display(),
        source.width(),
        source.height(),
        cli.output.display(),
        result.width(),
        result.height(),
        elapsed.as_secs_f64() * 1000.0,
    );

    ExitCode::SUCCESS
}
