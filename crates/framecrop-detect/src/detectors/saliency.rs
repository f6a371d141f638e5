// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Saliency detector — placeholder centre-weighted box.

use framecrop_bridge::Capabilities;
use framecrop_core::{Rect, Result};

use super::SALIENCY_KEY;
use crate::detector::{Detector, DetectorContext, DetectorResult};

const SCORE: f64 = 0.6;

/// Proposes the central half of the frame.
///
/// Stands in for a real saliency model; the contract is what matters to the
/// pipeline, not the accuracy.
#[derive(Debug, Clone, Copy, Default)]
pub struct SaliencyDetector;

impl Detector for SaliencyDetector {
    fn key(&self) -> &str {
        SALIENCY_KEY
    }

    fn supports(&self, _capabilities: &Capabilities) -> bool {
        true
    }

    fn detect(&self, ctx: &DetectorContext<'_>) -> Result<DetectorResult> {
        let (width, height) = (ctx.frame.width() as f64, ctx.frame.height() as f64);
        let rect = Rect::new(width * 0.25, height * 0.25, width * 0.5, height * 0.5);
        Ok(DetectorResult::single(rect, SCORE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancel::CancellationToken;
    use crate::detectors::scenes;

    #[test]
    fn proposes_centre_box() {
        let frame = scenes::flat(400, 200);
        let caps = Capabilities::none();
        let cancel = CancellationToken::new();
        let ctx = DetectorContext {
            frame: &frame,
            cancel: &cancel,
            capabilities: &caps,
        };
        let result = SaliencyDetector.detect(&ctx).unwrap();
        assert_eq!(result.rects[0].rect, Rect::new(100.0, 50.0, 200.0, 100.0));
        assert_eq!(result.rects[0].score, 0.6);
    }
}
