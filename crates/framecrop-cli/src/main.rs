// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// framecrop — Smart cropping from the command line.
//
// Entry point. Initialises logging, parses arguments, and dispatches to the
// crop, detector-listing, and config subcommands.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use image::{DynamicImage, ImageFormat};
use serde::Serialize;

use framecrop_bridge::{Capabilities, platform_capabilities};
use framecrop_compose::{CropOutcome, CropOverrides, ImageCropper, StillImageSource, extract_crop};
use framecrop_core::{AspectRatio, CropperConfig, FramecropError};
use framecrop_detect::{Detector, DetectorRegistry};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "framecrop")]
#[command(about = "Pick the best crop of an image for one or more aspect ratios")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect regions in an image and choose a crop.
    Crop(CropArgs),

    /// List the registered detector keys.
    Detectors,

    /// Print the default configuration as JSON.
    DefaultConfig,
}

#[derive(Debug, Clone, Args)]
struct CropArgs {
    /// Path to the input image.
    #[arg(long)]
    image: PathBuf,

    /// JSON config file; defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Target aspect ratio, as a number (1.5) or W:H (16:9). Repeatable.
    #[arg(long = "aspect", value_parser = parse_aspect)]
    aspect_ratios: Vec<AspectRatio>,

    /// Detector key to run, in order. Repeatable.
    #[arg(long = "detector")]
    detectors: Vec<String>,

    /// Path to write the JSON report; printed to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Path to write the cropped image (format from the extension).
    #[arg(long)]
    crop_out: Option<PathBuf>,

    /// Downscale the cropped image to at most this width.
    #[arg(long)]
    max_width: Option<u32>,

    /// SeetaFace model file enabling the face detector.
    #[cfg(feature = "rustface")]
    #[arg(long)]
    face_model: Option<PathBuf>,
}

/// JSON report written by `framecrop crop`.
#[derive(Debug, Serialize)]
struct CropReport<'a> {
    image: String,
    width: u32,
    height: u32,
    #[serde(flatten)]
    outcome: &'a CropOutcome,
    timings_ms: Vec<(&'a str, f64)>,
}

fn parse_aspect(raw: &str) -> Result<AspectRatio, String> {
    let ratio = match raw.split_once(':') {
        Some((w, h)) => {
            let width: f64 = w.trim().parse().map_err(|e| format!("bad width {:?}: {}", w, e))?;
            let height: f64 = h.trim().parse().map_err(|e| format!("bad height {:?}: {}", h, e))?;
            AspectRatio::Dimensions { width, height }
        }
        None => AspectRatio::Ratio(
            raw.trim()
                .parse()
                .map_err(|e| format!("bad ratio {:?}: {}", raw, e))?,
        ),
    };
    ratio.validated().map_err(|e| e.to_string())?;
    Ok(ratio)
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Crop(args) => run_crop(&args),
        Commands::Detectors => run_detectors(),
        Commands::DefaultConfig => run_default_config(),
    }
}

// -- crop ---------------------------------------------------------------------

fn run_crop(args: &CropArgs) -> CliResult<()> {
    let config = match &args.config {
        Some(path) => CropperConfig::load(path)?,
        None => CropperConfig::default(),
    };
    let cropper = ImageCropper::new(config)?.with_capabilities(capabilities(args)?);

    let overrides = CropOverrides {
        aspect_ratios: (!args.aspect_ratios.is_empty()).then(|| args.aspect_ratios.clone()),
        detectors: (!args.detectors.is_empty()).then(|| args.detectors.clone()),
    };

    tracing::info!("Loading image: {}", args.image.display());
    let mut source = StillImageSource::open(&args.image)?;
    let (frame, outcome) = cropper.capture_and_crop(&mut source, &overrides)?;
    tracing::info!(
        "Crop {}x{} at ({}, {}) score {:.3} via {:?}",
        outcome.rect.width.round(),
        outcome.rect.height.round(),
        outcome.rect.x.round(),
        outcome.rect.y.round(),
        outcome.score,
        outcome.meta.detector_chain,
    );

    let report = CropReport {
        image: args.image.display().to_string(),
        width: frame.width(),
        height: frame.height(),
        outcome: &outcome,
        timings_ms: outcome
            .meta
            .detector_chain
            .iter()
            .filter_map(|key| Some((key.as_str(), outcome.meta.timing_ms(key)?)))
            .collect(),
    };
    let json = serde_json::to_string_pretty(&report)?;
    match &args.out {
        Some(path) => {
            std::fs::write(path, &json)?;
            tracing::info!("Report written to {}", path.display());
        }
        None => println!("{}", json),
    }

    if let Some(path) = &args.crop_out {
        let cropped = DynamicImage::ImageRgba8(extract_crop(&frame, &outcome.rect, args.max_width)?);
        // JPEG has no alpha channel.
        let cropped = match ImageFormat::from_path(path) {
            Ok(ImageFormat::Jpeg) => DynamicImage::ImageRgb8(cropped.to_rgb8()),
            _ => cropped,
        };
        cropped.save(path).map_err(|err| {
            FramecropError::ImageError(format!("failed to write crop {}: {}", path.display(), err))
        })?;
        tracing::info!("Cropped image written to {}", path.display());
    }

    Ok(())
}

#[cfg(not(feature = "rustface"))]
fn capabilities(_args: &CropArgs) -> CliResult<Capabilities> {
    Ok(platform_capabilities())
}

#[cfg(feature = "rustface")]
fn capabilities(args: &CropArgs) -> CliResult<Capabilities> {
    use std::sync::Arc;

    use framecrop_bridge::RustfaceCapability;

    match &args.face_model {
        Some(path) => {
            tracing::info!("Loading face model: {}", path.display());
            let face = RustfaceCapability::from_model_file(path)?;
            Ok(platform_capabilities().with_face(Arc::new(face)))
        }
        None => Ok(platform_capabilities()),
    }
}

// -- detectors ----------------------------------------------------------------

fn run_detectors() -> CliResult<()> {
    let registry = DetectorRegistry::builtin();
    let caps = platform_capabilities();
    for key in registry.keys() {
        let supported = registry
            .get(key)
            .is_some_and(|detector| detector.supports(&caps));
        let note = if supported { "" } else { "  (needs a capability provider)" };
        println!("{}{}", key, note);
    }
    Ok(())
}

// -- default-config -----------------------------------------------------------

fn run_default_config() -> CliResult<()> {
    let json = serde_json::to_string_pretty(&CropperConfig::default())?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Verify both aspect forms parse and bad input is rejected.
    #[test]
    fn parses_aspect_arguments() {
        assert_eq!(parse_aspect("1.5").unwrap(), AspectRatio::Ratio(1.5));
        assert_eq!(
            parse_aspect("16:9").unwrap(),
            AspectRatio::Dimensions {
                width: 16.0,
                height: 9.0
            }
        );
        assert!(parse_aspect("0").is_err());
        assert!(parse_aspect("4:0").is_err());
        assert!(parse_aspect("wide").is_err());
    }

    /// Verify the CLI definition is internally consistent.
    #[test]
    fn cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    /// Verify repeated flags collect in order.
    #[test]
    fn repeated_flags_collect() {
        let cli = Cli::try_parse_from([
            "framecrop",
            "crop",
            "--image",
            "in.png",
            "--aspect",
            "1",
            "--aspect",
            "4:3",
            "--detector",
            "document-quad",
            "--detector",
            "edges",
        ])
        .unwrap();
        let Commands::Crop(args) = cli.command else {
            panic!("expected crop subcommand");
        };
        assert_eq!(args.aspect_ratios.len(), 2);
        assert_eq!(args.detectors, vec!["document-quad", "edges"]);
        assert!(args.out.is_none());
    }
}
