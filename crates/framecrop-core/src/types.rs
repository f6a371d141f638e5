// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types: rectangles, aspect ratios, scored candidates, and the
// diagnostic metadata produced by a detection run.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{FramecropError, Result};

/// Source tag attached to the synthetic full-frame candidate.
pub const FALLBACK_SOURCE: &str = "fallback";

/// A point in frame pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Four corners ordered top-left, top-right, bottom-right, bottom-left.
pub type Quad = [Point; 4];

/// Axis-aligned rectangle in frame pixel coordinates.
///
/// Coordinates may be fractional; rounding happens only at the external
/// sink that extracts pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle covering a whole `width` x `height` frame.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0.0, 0.0, width as f64, height as f64)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// True when every field is finite and both dimensions are positive.
    pub fn is_valid(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    /// Corners in top-left, top-right, bottom-right, bottom-left order.
    pub fn corners(&self) -> Quad {
        [
            Point::new(self.x, self.y),
            Point::new(self.right(), self.y),
            Point::new(self.right(), self.bottom()),
            Point::new(self.x, self.bottom()),
        ]
    }
}

/// Target crop shape, either a bare ratio or a width/height pair.
///
/// Deserializes from `1.5` as well as `{"width": 16, "height": 9}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AspectRatio {
    Ratio(f64),
    Dimensions { width: f64, height: f64 },
}

impl AspectRatio {
    /// Normalised `width / height` value.
    pub fn value(&self) -> f64 {
        match *self {
            Self::Ratio(r) => r,
            Self::Dimensions { width, height } => width / height,
        }
    }

    /// Normalised value, rejecting zero, negative, and non-finite ratios.
    pub fn validated(&self) -> Result<f64> {
        let value = self.value();
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(FramecropError::InvalidAspectRatio(value))
        }
    }
}

impl From<f64> for AspectRatio {
    fn from(ratio: f64) -> Self {
        Self::Ratio(ratio)
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self::Ratio(1.0)
    }
}

/// A rectangle with the confidence a detector assigned to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredRect {
    pub rect: Rect,
    pub score: f64,
}

impl ScoredRect {
    pub fn new(rect: Rect, score: f64) -> Self {
        Self { rect, score }
    }
}

/// A region proposal produced by one detector invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRect {
    pub rect: Rect,
    /// Confidence in `[0, 1]`.
    pub score: f64,
    /// Key of the detector that produced it, or [`FALLBACK_SOURCE`].
    pub source: String,
}

impl CandidateRect {
    pub fn new(rect: Rect, score: f64, source: impl Into<String>) -> Self {
        Self {
            rect,
            score,
            source: source.into(),
        }
    }

    /// The full-frame candidate used when no detector produced anything.
    pub fn fallback(width: u32, height: u32) -> Self {
        Self::new(Rect::full(width, height), 0.1, FALLBACK_SOURCE)
    }
}

/// Optional structured output a detector attaches to its result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "points", rename_all = "snake_case")]
pub enum DetectorMeta {
    /// Corners of an axis-aligned bounding box.
    Corners(Quad),
    /// Document boundary quadrilateral, for downstream perspective correction.
    Quad(Quad),
}

impl DetectorMeta {
    pub fn points(&self) -> &Quad {
        match self {
            Self::Corners(points) | Self::Quad(points) => points,
        }
    }
}

/// Diagnostics for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionMeta {
    /// Keys of the detectors actually run, in execution order.
    pub detector_chain: Vec<String>,
    /// Wall-clock time spent in each detector.
    pub timings: BTreeMap<String, Duration>,
    /// Highest score observed per detector key.
    pub scores: BTreeMap<String, f64>,
    /// Meta returned by detectors that attached one.
    pub detector_meta: BTreeMap<String, DetectorMeta>,
}

impl DetectionMeta {
    /// Elapsed time for `key` in milliseconds, if it ran.
    pub fn timing_ms(&self, key: &str) -> Option<f64> {
        self.timings.get(key).map(|d| d.as_secs_f64() * 1000.0)
    }

    /// Highest score recorded across all detectors.
    pub fn best_score(&self) -> Option<f64> {
        self.scores.values().copied().reduce(f64::max)
    }
}

/// The winning crop chosen by the composer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropResult {
    pub rect: Rect,
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Verify both aspect ratio forms normalise to width / height.
    #[test]
    fn aspect_ratio_value_normalises_pairs() {
        assert_eq!(AspectRatio::Ratio(1.5).value(), 1.5);
        let pair = AspectRatio::Dimensions {
            width: 16.0,
            height: 9.0,
        };
        assert!((pair.value() - 16.0 / 9.0).abs() < 1e-12);
    }

    /// Verify zero, negative, and NaN ratios are rejected.
    #[test]
    fn aspect_ratio_validation_rejects_non_positive() {
        assert!(AspectRatio::Ratio(0.0).validated().is_err());
        assert!(AspectRatio::Ratio(-1.0).validated().is_err());
        assert!(AspectRatio::Ratio(f64::NAN).validated().is_err());
        let zero_height = AspectRatio::Dimensions {
            width: 4.0,
            height: 0.0,
        };
        assert!(zero_height.validated().is_err());
        assert_eq!(AspectRatio::Ratio(0.75).validated().unwrap(), 0.75);
    }

    /// Verify the untagged representation accepts scalars and pairs.
    #[test]
    fn aspect_ratio_deserializes_both_forms() {
        let ratios: Vec<AspectRatio> =
            serde_json::from_str(r#"[1.0, {"width": 3, "height": 4}]"#).unwrap();
        assert_eq!(ratios[0], AspectRatio::Ratio(1.0));
        assert!((ratios[1].value() - 0.75).abs() < 1e-12);
    }

    /// Verify rect validity catches degenerate and non-finite rectangles.
    #[test]
    fn rect_validity() {
        assert!(Rect::new(0.0, 0.0, 10.0, 5.0).is_valid());
        assert!(!Rect::new(0.0, 0.0, 0.0, 5.0).is_valid());
        assert!(!Rect::new(0.0, 0.0, 10.0, -1.0).is_valid());
        assert!(!Rect::new(f64::NAN, 0.0, 10.0, 5.0).is_valid());
    }

    /// Verify corner ordering is clockwise starting at the top-left.
    #[test]
    fn rect_corners_order() {
        let corners = Rect::new(1.0, 2.0, 3.0, 4.0).corners();
        assert_eq!(corners[0], Point::new(1.0, 2.0));
        assert_eq!(corners[1], Point::new(4.0, 2.0));
        assert_eq!(corners[2], Point::new(4.0, 6.0));
        assert_eq!(corners[3], Point::new(1.0, 6.0));
    }

    /// Verify the fallback candidate covers the frame with score 0.1.
    #[test]
    fn fallback_candidate_covers_frame() {
        let candidate = CandidateRect::fallback(640, 480);
        assert_eq!(candidate.rect, Rect::new(0.0, 0.0, 640.0, 480.0));
        assert_eq!(candidate.score, 0.1);
        assert_eq!(candidate.source, FALLBACK_SOURCE);
    }

    /// Verify best_score picks the maximum across detectors.
    #[test]
    fn detection_meta_best_score() {
        let mut meta = DetectionMeta::default();
        assert_eq!(meta.best_score(), None);
        meta.scores.insert("edges".into(), 0.4);
        meta.scores.insert("saliency".into(), 0.6);
        assert_eq!(meta.best_score(), Some(0.6));
    }
}
