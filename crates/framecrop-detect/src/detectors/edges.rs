// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Edges detector — placeholder that proposes the frame minus a 5% margin.

use framecrop_bridge::Capabilities;
use framecrop_core::{Rect, Result};

use super::EDGES_KEY;
use crate::detector::{Detector, DetectorContext, DetectorResult};

const MARGIN_FRACTION: f64 = 0.05;
const SCORE: f64 = 0.4;

/// Proposes nearly the whole frame with moderate confidence.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgesDetector;

impl Detector for EdgesDetector {
    fn key(&self) -> &str {
        EDGES_KEY
    }

    fn supports(&self, _capabilities: &Capabilities) -> bool {
        true
    }

    fn detect(&self, ctx: &DetectorContext<'_>) -> Result<DetectorResult> {
        let (width, height) = (ctx.frame.width() as f64, ctx.frame.height() as f64);
        let margin = (width.min(height) * MARGIN_FRACTION).round();
        let rect = Rect::new(margin, margin, width - margin * 2.0, height - margin * 2.0);
        Ok(DetectorResult::single(rect, SCORE))
    }
}
