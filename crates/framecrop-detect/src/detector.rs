// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The detector contract every region-detection strategy implements.

use framecrop_bridge::Capabilities;
use framecrop_core::{DetectorMeta, Frame, Rect, Result, ScoredRect};

use crate::cancel::CancellationToken;

/// Everything a detector may read during one invocation.
#[derive(Debug, Clone, Copy)]
pub struct DetectorContext<'a> {
    pub frame: &'a Frame,
    pub cancel: &'a CancellationToken,
    pub capabilities: &'a Capabilities,
}

/// Output of one detector invocation.
///
/// An empty `rects` list is a valid "no evidence" answer, not an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectorResult {
    pub rects: Vec<ScoredRect>,
    pub meta: Option<DetectorMeta>,
}

impl DetectorResult {
    /// No candidates and no meta.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A single scored rectangle.
    pub fn single(rect: Rect, score: f64) -> Self {
        Self {
            rects: vec![ScoredRect::new(rect, score)],
            meta: None,
        }
    }

    pub fn with_meta(mut self, meta: DetectorMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

/// A named, stateless region-detection strategy.
///
/// Detectors are registered once and then invoked repeatedly, possibly for
/// several frames at once, so implementations keep no per-call state.
pub trait Detector: Send + Sync {
    /// Unique registry key, e.g. `"document-quad"`.
    fn key(&self) -> &str;

    /// Pure capability probe, called once per pipeline run before `detect`.
    fn supports(&self, capabilities: &Capabilities) -> bool;

    /// Propose scored regions for `ctx.frame`.
    ///
    /// Errors are contained by the pipeline; they never abort a run.
    fn detect(&self, ctx: &DetectorContext<'_>) -> Result<DetectorResult>;
}
