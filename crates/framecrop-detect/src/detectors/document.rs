// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document bounding-box detector — coarse luminance-contrast grid scan over
// the full-resolution frame.

use framecrop_bridge::Capabilities;
use framecrop_core::{DetectorMeta, DocumentTuning, Rect, Result};
use tracing::{debug, instrument};

use super::{DOCUMENT_KEY, luminance};
use crate::detector::{Detector, DetectorContext, DetectorResult};

/// Upper bound on the padding added around the hit bounding box, in pixels.
const MAX_PAD: f64 = 20.0;
/// Padding as a fraction of the frame dimension, when smaller than `MAX_PAD`.
const PAD_FRACTION: f64 = 0.02;
const MAX_SCORE: f64 = 0.85;

/// Approximates document bounds from where strong luminance steps occur.
///
/// ## Algorithm
///
/// 1. Sample a grid with step `max(min_step, dim / grid_divisions)`
/// 2. At each sample with a right and a down neighbour, compare luminance;
///    a difference above `contrast_threshold` is a hit
/// 3. Bound all hits, pad the box, clamp it to the frame
/// 4. Score from box coverage and hit density
///
/// Fewer than `min_hits` hits is reported as no candidate.
#[derive(Debug, Clone, Default)]
pub struct DocumentDetector {
    tuning: DocumentTuning,
}

impl DocumentDetector {
    pub fn new(tuning: DocumentTuning) -> Self {
        Self { tuning }
    }

    pub fn tuning(&self) -> &DocumentTuning {
        &self.tuning
    }
}

/// Bounding box of the high-contrast grid samples.
#[derive(Debug, Clone, Copy)]
struct HitBounds {
    min_x: u32,
    min_y: u32,
    max_x: u32,
    max_y: u32,
    hits: usize,
}

impl HitBounds {
    fn empty(width: u32, height: u32) -> Self {
        Self {
            min_x: width,
            min_y: height,
            max_x: 0,
            max_y: 0,
            hits: 0,
        }
    }

    fn record(&mut self, x: u32, y: u32) {
        self.hits += 1;
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }
}

impl Detector for DocumentDetector {
    fn key(&self) -> &str {
        DOCUMENT_KEY
    }

    fn supports(&self, _capabilities: &Capabilities) -> bool {
        true
    }

    #[instrument(skip_all, fields(width = ctx.frame.width(), height = ctx.frame.height()))]
    fn detect(&self, ctx: &DetectorContext<'_>) -> Result<DetectorResult> {
        let frame = ctx.frame;
        let (width, height) = (frame.width(), frame.height());
        let divisions = self.tuning.grid_divisions.max(1);
        let step_x = (width / divisions).max(self.tuning.min_step).max(1);
        let step_y = (height / divisions).max(self.tuning.min_step).max(1);

        let mut bounds = HitBounds::empty(width, height);
        let mut y = 0u32;
        while y.saturating_add(step_y) < height {
            ctx.cancel.check()?;
            let mut x = 0u32;
            while x.saturating_add(step_x) < width {
                let here = luminance(frame.rgb(x, y));
                let right = luminance(frame.rgb(x + step_x, y));
                let down = luminance(frame.rgb(x, y + step_y));
                let diff = (here - right).abs().max((here - down).abs());
                if diff > self.tuning.contrast_threshold {
                    bounds.record(x, y);
                }
                x += step_x;
            }
            y += step_y;
        }

        debug!(hits = bounds.hits, step_x, step_y, "Contrast grid scanned");
        if bounds.hits < self.tuning.min_hits {
            return Ok(DetectorResult::empty());
        }

        let (frame_w, frame_h) = (width as f64, height as f64);
        let pad_x = MAX_PAD.min(frame_w * PAD_FRACTION);
        let pad_y = MAX_PAD.min(frame_h * PAD_FRACTION);
        let min_x = (bounds.min_x as f64 - pad_x).max(0.0);
        let min_y = (bounds.min_y as f64 - pad_y).max(0.0);
        let max_x = (bounds.max_x as f64 + pad_x).min(frame_w);
        let max_y = (bounds.max_y as f64 + pad_y).min(frame_h);
        let rect = Rect::new(min_x, min_y, (max_x - min_x).max(1.0), (max_y - min_y).max(1.0));

        let coverage = rect.area() / frame.area();
        let samples = (frame_w / step_x as f64) * (frame_h / step_y as f64);
        let edge_density = bounds.hits as f64 / samples;
        let score = MAX_SCORE.min(0.3 + coverage * 0.3 + edge_density * 0.4);

        debug!(?rect, coverage, edge_density, score, "Document bounds estimated");
        Ok(DetectorResult::single(rect, score).with_meta(DetectorMeta::Corners(rect.corners())))
    }
}
