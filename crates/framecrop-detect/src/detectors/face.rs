// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Face detector — delegates to the platform's face capability.

use framecrop_bridge::Capabilities;
use framecrop_core::{Result, ScoredRect};
use tracing::debug;

use super::FACE_KEY;
use crate::detector::{Detector, DetectorContext, DetectorResult};

/// Confidence assigned to every face the provider reports.
pub const FACE_SCORE: f64 = 0.9;

/// Capability-gated face detector.
///
/// Only supported when the injected [`Capabilities`] carry an available face
/// provider. Asks the provider for a single face in fast mode.
#[derive(Debug, Clone, Copy)]
pub struct FaceDetector {
    max_faces: usize,
}

impl FaceDetector {
    pub fn new() -> Self {
        Self { max_faces: 1 }
    }
}

impl Default for FaceDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for FaceDetector {
    fn key(&self) -> &str {
        FACE_KEY
    }

    fn supports(&self, capabilities: &Capabilities) -> bool {
        capabilities.face().is_available()
    }

    fn detect(&self, ctx: &DetectorContext<'_>) -> Result<DetectorResult> {
        let provider = ctx.capabilities.face();
        if !provider.is_available() {
            return Ok(DetectorResult::empty());
        }
        let faces = provider.detect_faces(ctx.frame, self.max_faces)?;
        debug!(faces = faces.len(), "Face provider returned");
        Ok(DetectorResult {
            rects: faces
                .into_iter()
                .map(|rect| ScoredRect::new(rect, FACE_SCORE))
                .collect(),
            meta: None,
        })
    }
}
