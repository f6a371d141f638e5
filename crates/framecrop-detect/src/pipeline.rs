// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Detection pipeline — runs a caller-ordered detector list against one frame
// and collects tagged candidates plus per-detector timing and score metadata.

use std::time::Instant;

use framecrop_bridge::Capabilities;
use framecrop_core::config::DEFAULT_EARLY_EXIT_SCORE;
use framecrop_core::{CandidateRect, DetectionMeta, Frame};
use tracing::{debug, info, instrument, warn};

use crate::cancel::CancellationToken;
use crate::detector::DetectorContext;
use crate::registry::DetectorRegistry;

/// Candidates and metadata from one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    /// Never empty: a full-frame fallback is added when no detector proposes
    /// anything.
    pub candidates: Vec<CandidateRect>,
    pub meta: DetectionMeta,
}

/// Sequential detector orchestrator.
///
/// Borrows the registry and capabilities for the duration of each run; the
/// registry is never mutated while a run is in progress.
#[derive(Debug, Clone, Copy)]
pub struct Pipeline<'a> {
    registry: &'a DetectorRegistry,
    capabilities: &'a Capabilities,
    early_exit_score: f64,
}

impl<'a> Pipeline<'a> {
    pub fn new(registry: &'a DetectorRegistry, capabilities: &'a Capabilities) -> Self {
        Self {
            registry,
            capabilities,
            early_exit_score: DEFAULT_EARLY_EXIT_SCORE,
        }
    }

    /// Stop after the first detector whose best score reaches `score`.
    pub fn early_exit_score(mut self, score: f64) -> Self {
        self.early_exit_score = score;
        self
    }

    /// Run `keys` in order against `frame`.
    ///
    /// Unknown keys and detectors whose `supports` probe fails are skipped
    /// without appearing in the chain. A failing detector is logged and the
    /// run continues with the next key.
    #[instrument(skip_all, fields(width = frame.width(), height = frame.height(), requested = keys.len()))]
    pub fn run<S: AsRef<str>>(
        &self,
        frame: &Frame,
        keys: &[S],
        cancel: &CancellationToken,
    ) -> PipelineOutput {
        let ctx = DetectorContext {
            frame,
            cancel,
            capabilities: self.capabilities,
        };
        let mut candidates = Vec::new();
        let mut meta = DetectionMeta::default();

        for key in keys.iter().map(AsRef::as_ref) {
            let Some(detector) = self.registry.get(key) else {
                debug!(key, "Unknown detector, skipping");
                continue;
            };
            if !detector.supports(self.capabilities) {
                debug!(key, "Detector unsupported, skipping");
                continue;
            }

            meta.detector_chain.push(key.to_string());
            let start = Instant::now();
            let outcome = detector.detect(&ctx);
            let elapsed = start.elapsed();
            meta.timings.insert(key.to_string(), elapsed);

            let result = match outcome {
                Ok(result) => result,
                Err(err) => {
                    warn!(key, error = %err, elapsed_ms = elapsed.as_secs_f64() * 1000.0, "Detector failed");
                    continue;
                }
            };

            for scored in result.rects {
                if !scored.rect.is_valid() {
                    warn!(key, rect = ?scored.rect, "Dropping invalid rect");
                    continue;
                }
                let best = meta.scores.entry(key.to_string()).or_insert(0.0);
                *best = best.max(scored.score);
                candidates.push(CandidateRect::new(scored.rect, scored.score, key));
            }
            if let Some(detector_meta) = result.meta {
                meta.detector_meta.insert(key.to_string(), detector_meta);
            }

            let best = meta.scores.get(key).copied();
            debug!(key, elapsed_ms = elapsed.as_secs_f64() * 1000.0, best_score = ?best, "Detector finished");
            if best.is_some_and(|score| score >= self.early_exit_score) {
                info!(key, score = ?best, "Early exit");
                break;
            }
        }

        if candidates.is_empty() {
            info!("No candidates, using full-frame fallback");
            candidates.push(CandidateRect::fallback(frame.width(), frame.height()));
        }

        info!(
            chain = meta.detector_chain.len(),
            candidates = candidates.len(),
            "Pipeline finished"
        );
        PipelineOutput { candidates, meta }
    }
}
