// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Crop composer — fits every candidate to every target aspect ratio and keeps
// the best-scoring in-frame rectangle.

use std::fmt;

use framecrop_core::geometry::clamp;
use framecrop_core::{
    AspectRatio, CandidateRect, CropResult, Frame, FramecropError, Rect, Result,
};
use tracing::{debug, instrument};

const CANDIDATE_WEIGHT: f64 = 0.6;
const COMPOSITION_WEIGHT: f64 = 0.3;
const COVERAGE_WEIGHT: f64 = 0.1;

/// Aesthetic score in `[0, 1]` for a fitted crop.
///
/// The composer weighs this at 0.3 of each crop's total score. Rule-of-thirds
/// or centre-bias scoring plugs in here.
pub trait CompositionScorer: Send + Sync {
    fn score(&self, frame: &Frame, rect: &Rect) -> f64;
}

/// Scores every crop the same.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantComposition(pub f64);

impl Default for ConstantComposition {
    fn default() -> Self {
        Self(0.5)
    }
}

impl CompositionScorer for ConstantComposition {
    fn score(&self, _frame: &Frame, _rect: &Rect) -> f64 {
        self.0
    }
}

/// Picks the final crop rectangle from detector candidates.
pub struct CropComposer {
    scorer: Box<dyn CompositionScorer>,
}

impl CropComposer {
    /// Composer with the constant 0.5 composition score.
    pub fn new() -> Self {
        Self::with_scorer(Box::new(ConstantComposition::default()))
    }

    pub fn with_scorer(scorer: Box<dyn CompositionScorer>) -> Self {
        Self { scorer }
    }

    /// Choose the best crop for `frame`.
    ///
    /// Every ratio is validated before any candidate is looked at. Ratios are
    /// the outer loop and candidates the inner one; on equal scores the first
    /// pair wins. With no candidates the full frame is returned with score 0.
    ///
    /// The returned rect has the winning ratio (to floating precision) and
    /// lies inside the frame.
    #[instrument(skip_all, fields(candidates = candidates.len(), ratios = aspect_ratios.len()))]
    pub fn compose(
        &self,
        frame: &Frame,
        candidates: &[CandidateRect],
        aspect_ratios: &[AspectRatio],
    ) -> Result<CropResult> {
        if aspect_ratios.is_empty() {
            return Err(FramecropError::NoAspectRatios);
        }
        let ratios = aspect_ratios
            .iter()
            .map(AspectRatio::validated)
            .collect::<Result<Vec<f64>>>()?;

        let (frame_w, frame_h) = (frame.width() as f64, frame.height() as f64);
        let mut best: Option<CropResult> = None;
        for &ratio in &ratios {
            for candidate in candidates {
                if !candidate.rect.is_valid() {
                    debug!(source = %candidate.source, "Skipping invalid candidate");
                    continue;
                }
                let rect = fit_to_aspect(&candidate.rect, ratio, frame_w, frame_h);
                let coverage = (rect.area() / frame.area()).min(1.0);
                let score = candidate.score * CANDIDATE_WEIGHT
                    + self.scorer.score(frame, &rect) * COMPOSITION_WEIGHT
                    + coverage * COVERAGE_WEIGHT;
                if best.is_none_or(|b| score > b.score) {
                    best = Some(CropResult { rect, score });
                }
            }
        }

        let result = best.unwrap_or(CropResult {
            rect: frame.bounds(),
            score: 0.0,
        });
        debug!(rect = ?result.rect, score = result.score, "Crop composed");
        Ok(result)
    }
}

impl Default for CropComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CropComposer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CropComposer").finish_non_exhaustive()
    }
}

/// Grow `subject` along its short side to `ratio`, recentre it, and keep it
/// inside a `frame_w` x `frame_h` frame.
///
/// A fit larger than the frame is shrunk uniformly to the largest rect of
/// the same ratio that fits, so the ratio survives clamping.
pub fn fit_to_aspect(subject: &Rect, ratio: f64, frame_w: f64, frame_h: f64) -> Rect {
    let (mut w, mut h) = (subject.width, subject.height);
    if w / h > ratio {
        h = w / ratio;
    } else {
        w = h * ratio;
    }

    if w > frame_w || h > frame_h {
        let shrink = (frame_w / w).min(frame_h / h);
        w = (w * shrink).min(frame_w);
        h = (h * shrink).min(frame_h);
    }

    let center = subject.center();
    let x = clamp(center.x - w / 2.0, 0.0, frame_w - w);
    let y = clamp(center.y - h / 2.0, 0.0, frame_h - h);
    Rect::new(x, y, w, h)
}
