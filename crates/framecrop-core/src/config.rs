// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Cropper configuration: target aspect ratios, detector order, and the
// hand-tuned detector constants.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{FramecropError, Result};
use crate::types::AspectRatio;

/// Score at or above which the pipeline stops running further detectors.
pub const DEFAULT_EARLY_EXIT_SCORE: f64 = 0.9;

/// Settings for one cropper instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropperConfig {
    /// Acceptable output aspect ratios; the best-scoring fit wins.
    pub aspect_ratios: Vec<AspectRatio>,
    /// Detector keys in the order they should run.
    pub detectors: Vec<String>,
    /// Early-exit threshold for the detection pipeline.
    pub early_exit_score: f64,
    /// Constants for the built-in document detectors.
    pub tuning: DetectorTuning,
}

impl Default for CropperConfig {
    fn default() -> Self {
        Self {
            aspect_ratios: vec![AspectRatio::Ratio(1.0)],
            detectors: ["document", "face", "saliency", "edges"]
                .into_iter()
                .map(String::from)
                .collect(),
            early_exit_score: DEFAULT_EARLY_EXIT_SCORE,
            tuning: DetectorTuning::default(),
        }
    }
}

impl CropperConfig {
    /// Read a JSON config file. Missing fields take their defaults.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        debug!(
            ratios = config.aspect_ratios.len(),
            detectors = config.detectors.len(),
            "Config loaded"
        );
        Ok(config)
    }

    /// Write the config as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }

    /// Reject settings the pipeline and composer cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.aspect_ratios.is_empty() {
            return Err(FramecropError::NoAspectRatios);
        }
        for ratio in &self.aspect_ratios {
            ratio.validated()?;
        }
        if !(self.early_exit_score > 0.0 && self.early_exit_score <= 1.0) {
            return Err(FramecropError::InvalidConfig(format!(
                "early_exit_score must be in (0, 1], got {}",
                self.early_exit_score
            )));
        }
        self.tuning.validate()
    }
}

/// Constants for every tunable built-in detector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorTuning {
    pub document: DocumentTuning,
    pub document_quad: DocumentQuadTuning,
}

impl DetectorTuning {
    pub fn validate(&self) -> Result<()> {
        let doc = &self.document;
        if doc.grid_divisions == 0 || doc.min_step == 0 {
            return Err(FramecropError::InvalidConfig(
                "document grid_divisions and min_step must be > 0".into(),
            ));
        }
        let quad = &self.document_quad;
        if quad.max_working_side == 0 || quad.sample_stride == 0 {
            return Err(FramecropError::InvalidConfig(
                "document_quad max_working_side and sample_stride must be > 0".into(),
            ));
        }
        if !(quad.threshold_factor.is_finite() && quad.threshold_factor > 0.0) {
            return Err(FramecropError::InvalidConfig(format!(
                "document_quad threshold_factor must be > 0, got {}",
                quad.threshold_factor
            )));
        }
        Ok(())
    }
}

/// Luminance-variance bounding-box detector constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentTuning {
    /// Luminance difference above which a grid sample counts as a hit.
    pub contrast_threshold: f64,
    /// Fewer hits than this yields no candidate.
    pub min_hits: usize,
    /// The grid step is `dimension / grid_divisions` ...
    pub grid_divisions: u32,
    /// ... but never smaller than this many pixels.
    pub min_step: u32,
}

impl Default for DocumentTuning {
    fn default() -> Self {
        Self {
            contrast_threshold: 28.0,
            min_hits: 10,
            grid_divisions: 80,
            min_step: 8,
        }
    }
}

/// Sobel + convex-hull quadrilateral detector constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentQuadTuning {
    /// Longest side of the downscaled working copy.
    pub max_working_side: u32,
    /// Edge threshold as a multiple of the mean gradient magnitude.
    pub threshold_factor: f32,
    /// Fewer edge points than this yields no candidate.
    pub min_points: usize,
    /// Edge points are sampled every `sample_stride` pixels on both axes.
    pub sample_stride: usize,
}

impl Default for DocumentQuadTuning {
    fn default() -> Self {
        Self {
            max_working_side: 800,
            threshold_factor: 2.5,
            min_points: 20,
            sample_stride: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Verify the defaults match the documented constants.
    #[test]
    fn defaults() {
        let config = CropperConfig::default();
        assert_eq!(config.aspect_ratios, vec![AspectRatio::Ratio(1.0)]);
        assert_eq!(config.detectors, vec!["document", "face", "saliency", "edges"]);
        assert_eq!(config.early_exit_score, 0.9);
        assert_eq!(config.tuning.document.contrast_threshold, 28.0);
        assert_eq!(config.tuning.document.min_hits, 10);
        assert_eq!(config.tuning.document_quad.max_working_side, 800);
        assert_eq!(config.tuning.document_quad.min_points, 20);
        assert!(config.validate().is_ok());
    }

    /// Verify a partial JSON document fills the rest from defaults.
    #[test]
    fn partial_json_uses_defaults() {
        let config: CropperConfig =
            serde_json::from_str(r#"{"aspect_ratios": [{"width": 16, "height": 9}]}"#).unwrap();
        assert!((config.aspect_ratios[0].value() - 16.0 / 9.0).abs() < 1e-12);
        assert_eq!(config.detectors.len(), 4);
        assert_eq!(config.tuning, DetectorTuning::default());
    }

    /// Verify invalid settings are rejected by validate().
    #[test]
    fn validate_rejects_bad_values() {
        let mut config = CropperConfig::default();
        config.aspect_ratios.clear();
        assert!(matches!(config.validate(), Err(FramecropError::NoAspectRatios)));

        let mut config = CropperConfig::default();
        config.aspect_ratios = vec![AspectRatio::Ratio(-2.0)];
        assert!(matches!(
            config.validate(),
            Err(FramecropError::InvalidAspectRatio(_))
        ));

        let mut config = CropperConfig::default();
        config.early_exit_score = 1.5;
        assert!(matches!(config.validate(), Err(FramecropError::InvalidConfig(_))));

        let mut config = CropperConfig::default();
        config.tuning.document_quad.sample_stride = 0;
        assert!(matches!(config.validate(), Err(FramecropError::InvalidConfig(_))));
    }

    /// Verify a saved config loads back identically.
    #[test]
    fn save_then_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("framecrop.json");

        let mut config = CropperConfig::default();
        config.detectors = vec!["document-quad".into(), "edges".into()];
        config.early_exit_score = 0.8;
        config.save(&path).unwrap();

        let loaded = CropperConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    /// Verify a config file with an invalid ratio fails to load.
    #[test]
    fn load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"aspect_ratios": [0]}"#).unwrap();
        assert!(CropperConfig::load(&path).is_err());
    }
}
