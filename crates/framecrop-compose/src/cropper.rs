// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// End-to-end cropper — one call from a frame to the chosen crop rectangle.

use framecrop_bridge::{Capabilities, platform_capabilities};
use framecrop_core::{
    AspectRatio, CandidateRect, CropperConfig, DetectionMeta, Frame, FramecropError, Rect, Result,
};
use framecrop_detect::{CancellationToken, DetectorRegistry, Pipeline};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::composer::CropComposer;
use crate::source::FrameSource;

/// Result of one crop, with the evidence that led to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropOutcome {
    pub rect: Rect,
    pub score: f64,
    pub meta: DetectionMeta,
    pub candidates: Vec<CandidateRect>,
}

/// Per-call replacements for the configured ratios and detector order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CropOverrides {
    pub aspect_ratios: Option<Vec<AspectRatio>>,
    pub detectors: Option<Vec<String>>,
}

/// Configured cropper: registry, capabilities, and composer bundled together.
#[derive(Debug)]
pub struct ImageCropper {
    config: CropperConfig,
    registry: DetectorRegistry,
    capabilities: Capabilities,
    composer: CropComposer,
}

impl ImageCropper {
    // -- Construction ---------------------------------------------------------

    /// Build a cropper with the built-in detectors tuned from `config` and the
    /// platform's capability providers.
    pub fn new(config: CropperConfig) -> Result<Self> {
        config.validate()?;
        let registry = DetectorRegistry::builtin_with(&config.tuning);
        Ok(Self {
            config,
            registry,
            capabilities: platform_capabilities(),
            composer: CropComposer::new(),
        })
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_registry(mut self, registry: DetectorRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_composer(mut self, composer: CropComposer) -> Self {
        self.composer = composer;
        self
    }

    // -- Accessors ------------------------------------------------------------

    pub fn config(&self) -> &CropperConfig {
        &self.config
    }

    pub fn registry(&self) -> &DetectorRegistry {
        &self.registry
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    // -- Cropping -------------------------------------------------------------

    /// Crop with the configured ratios and detector order.
    pub fn crop(&self, frame: &Frame) -> Result<CropOutcome> {
        self.crop_with(frame, &CropOverrides::default())
    }

    /// Crop with per-call overrides.
    pub fn crop_with(&self, frame: &Frame, overrides: &CropOverrides) -> Result<CropOutcome> {
        self.crop_cancellable(frame, overrides, &CancellationToken::new())
    }

    /// Crop with per-call overrides, letting detectors observe `cancel`.
    ///
    /// Cancellation is advisory: detectors that notice it fail, the pipeline
    /// carries on, and the crop is composed from whatever was collected.
    #[instrument(skip_all, fields(width = frame.width(), height = frame.height()))]
    pub fn crop_cancellable(
        &self,
        frame: &Frame,
        overrides: &CropOverrides,
        cancel: &CancellationToken,
    ) -> Result<CropOutcome> {
        let ratios = overrides
            .aspect_ratios
            .as_deref()
            .unwrap_or(&self.config.aspect_ratios);
        if ratios.is_empty() {
            return Err(FramecropError::NoAspectRatios);
        }
        for ratio in ratios {
            ratio.validated()?;
        }
        let detectors = overrides
            .detectors
            .as_deref()
            .unwrap_or(&self.config.detectors);

        let output = Pipeline::new(&self.registry, &self.capabilities)
            .early_exit_score(self.config.early_exit_score)
            .run(frame, detectors, cancel);
        let crop = self.composer.compose(frame, &output.candidates, ratios)?;

        info!(
            rect = ?crop.rect,
            score = crop.score,
            chain = ?output.meta.detector_chain,
            "Crop chosen"
        );
        Ok(CropOutcome {
            rect: crop.rect,
            score: crop.score,
            meta: output.meta,
            candidates: output.candidates,
        })
    }

    /// Pull one frame from `source` and crop it.
    pub fn capture_and_crop(
        &self,
        source: &mut dyn FrameSource,
        overrides: &CropOverrides,
    ) -> Result<(Frame, CropOutcome)> {
        let frame = source.capture()?;
        let outcome = self.crop_with(&frame, overrides)?;
        Ok((frame, outcome))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use framecrop_bridge::FaceCapability;
    use framecrop_core::FALLBACK_SOURCE;
    use framecrop_core::geometry::contains_within;
    use image::{Rgba, RgbaImage};
    use imageproc::drawing::draw_filled_rect_mut;
    use imageproc::rect::Rect as PixelRect;

    use super::*;
    use crate::source::StillImageSource;

    fn flat(width: u32, height: u32) -> Frame {
        Frame::from_rgba(RgbaImage::from_pixel(width, height, Rgba([90, 90, 90, 255]))).unwrap()
    }

    fn sheet_on_table() -> Frame {
        let mut image = RgbaImage::from_pixel(400, 300, Rgba([30, 30, 30, 255]));
        draw_filled_rect_mut(
            &mut image,
            PixelRect::at(100, 80).of_size(200, 140),
            Rgba([240, 240, 240, 255]),
        );
        Frame::from_rgba(image).unwrap()
    }

    struct CentreFace;

    impl FaceCapability for CentreFace {
        fn is_available(&self) -> bool {
            true
        }

        fn detect_faces(&self, frame: &Frame, _max_faces: usize) -> Result<Vec<Rect>> {
            let (w, h) = (frame.width() as f64, frame.height() as f64);
            Ok(vec![Rect::new(w * 0.4, h * 0.3, w * 0.2, h * 0.3)])
        }
    }

    /// A bad config is rejected at construction.
    #[test]
    fn rejects_invalid_config() {
        let config = CropperConfig {
            aspect_ratios: vec![AspectRatio::Ratio(-1.0)],
            ..CropperConfig::default()
        };
        assert!(matches!(
            ImageCropper::new(config),
            Err(FramecropError::InvalidAspectRatio(_))
        ));
    }

    /// The default chain on a flat frame runs every supported detector.
    #[test]
    fn default_chain_on_flat_frame() {
        let cropper = ImageCropper::new(CropperConfig::default()).unwrap();
        let frame = flat(640, 480);
        let outcome = cropper.crop(&frame).unwrap();
        // Face is skipped without a provider.
        assert_eq!(outcome.meta.detector_chain, vec!["document", "saliency", "edges"]);
        assert_eq!(outcome.candidates.len(), 2);
        assert!((outcome.rect.aspect_ratio() - 1.0).abs() < 1e-3);
        assert!(contains_within(&outcome.rect, 640, 480, 1e-9));
    }

    /// The document detector drives the crop on a document scene.
    #[test]
    fn document_scene_uses_document_candidate() {
        let config = CropperConfig {
            aspect_ratios: vec![AspectRatio::Dimensions {
                width: 4.0,
                height: 3.0,
            }],
            detectors: vec!["document-quad".into()],
            ..CropperConfig::default()
        };
        let cropper = ImageCropper::new(config).unwrap();
        let outcome = cropper.crop(&sheet_on_table()).unwrap();
        assert_eq!(outcome.candidates[0].source, "document-quad");
        assert!(outcome.meta.detector_meta.contains_key("document-quad"));
        assert!((outcome.rect.aspect_ratio() - 4.0 / 3.0).abs() < 1e-3);
        // The crop covers the sheet.
        assert!(outcome.rect.x <= 104.0 && outcome.rect.right() >= 296.0);
    }

    /// An injected face provider short-circuits the chain.
    #[test]
    fn face_provider_triggers_early_exit() {
        let config = CropperConfig {
            detectors: vec!["face".into(), "saliency".into(), "edges".into()],
            ..CropperConfig::default()
        };
        let cropper = ImageCropper::new(config)
            .unwrap()
            .with_capabilities(Capabilities::none().with_face(Arc::new(CentreFace)));
        let outcome = cropper.crop(&flat(1000, 1000)).unwrap();
        assert_eq!(outcome.meta.detector_chain, vec!["face"]);
        assert_eq!(outcome.candidates.len(), 1);
        // Face (400, 300, 200, 300) grown to a square around its centre.
        assert_eq!(outcome.rect, Rect::new(350.0, 300.0, 300.0, 300.0));
    }

    /// Overrides replace the configured ratios and detectors for one call.
    #[test]
    fn overrides_apply_per_call() {
        let cropper = ImageCropper::new(CropperConfig::default()).unwrap();
        let frame = flat(800, 600);
        let overrides = CropOverrides {
            aspect_ratios: Some(vec![AspectRatio::Ratio(2.0)]),
            detectors: Some(vec!["unknown".into()]),
        };
        let outcome = cropper.crop_with(&frame, &overrides).unwrap();
        assert!(outcome.meta.detector_chain.is_empty());
        assert_eq!(outcome.candidates[0].source, FALLBACK_SOURCE);
        // Fallback frame fitted to 2:1 and shrunk back into 800x600.
        let rect = outcome.rect;
        assert!(rect.x.abs() < 1e-6 && (rect.y - 100.0).abs() < 1e-6);
        assert!((rect.width - 800.0).abs() < 1e-6 && (rect.height - 400.0).abs() < 1e-6);

        let bad = CropOverrides {
            aspect_ratios: Some(Vec::new()),
            ..CropOverrides::default()
        };
        assert!(matches!(
            cropper.crop_with(&frame, &bad),
            Err(FramecropError::NoAspectRatios)
        ));
    }

    /// Frames are pulled from the injected source.
    #[test]
    fn capture_and_crop_uses_source() {
        let cropper = ImageCropper::new(CropperConfig::default()).unwrap();
        let mut source = StillImageSource::new(flat(320, 200));
        let (frame, outcome) = cropper
            .capture_and_crop(&mut source, &CropOverrides::default())
            .unwrap();
        assert_eq!((frame.width(), frame.height()), (320, 200));
        assert!(contains_within(&outcome.rect, 320, 200, 1e-9));
    }

    /// The outcome serialises to JSON for reporting.
    #[test]
    fn outcome_serialises() {
        let cropper = ImageCropper::new(CropperConfig::default()).unwrap();
        let outcome = cropper.crop(&flat(100, 100)).unwrap();
        let json = serde_json::to_value(&outcome).unwrap();
        assert!(json["rect"]["width"].as_f64().unwrap() > 0.0);
        assert_eq!(json["meta"]["detector_chain"][0], "document");
    }
}
