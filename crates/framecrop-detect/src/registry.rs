// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Detector registry — an explicit key-to-detector map owned by the caller.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use framecrop_core::DetectorTuning;
use tracing::debug;

use crate::detector::Detector;
use crate::detectors::{
    DocumentDetector, DocumentQuadDetector, EdgesDetector, FaceDetector, SaliencyDetector,
};

/// Maps detector keys to detector instances.
///
/// There is no process-wide registry: each pipeline borrows the registry it
/// was given, so independent croppers can carry different detector sets.
#[derive(Clone, Default)]
pub struct DetectorRegistry {
    detectors: HashMap<String, Arc<dyn Detector>>,
}

impl DetectorRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// All five built-in detectors with default tuning.
    pub fn builtin() -> Self {
        Self::builtin_with(&DetectorTuning::default())
    }

    /// All five built-in detectors with the given tuning.
    pub fn builtin_with(tuning: &DetectorTuning) -> Self {
        Self::new()
            .with(Arc::new(EdgesDetector))
            .with(Arc::new(SaliencyDetector))
            .with(Arc::new(FaceDetector::new()))
            .with(Arc::new(DocumentDetector::new(tuning.document.clone())))
            .with(Arc::new(DocumentQuadDetector::new(tuning.document_quad.clone())))
    }

    /// Register a detector under its own key.
    ///
    /// A later registration with the same key replaces the earlier one; the
    /// replaced detector is returned.
    pub fn register(&mut self, detector: Arc<dyn Detector>) -> Option<Arc<dyn Detector>> {
        let key = detector.key().to_string();
        let previous = self.detectors.insert(key.clone(), detector);
        debug!(key = %key, replaced = previous.is_some(), "Detector registered");
        previous
    }

    /// Builder form of [`register`](Self::register).
    pub fn with(mut self, detector: Arc<dyn Detector>) -> Self {
        self.register(detector);
        self
    }

    pub fn get(&self, key: &str) -> Option<&dyn Detector> {
        self.detectors.get(key).map(|d| d.as_ref())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.detectors.contains_key(key)
    }

    /// Registered keys in lexical order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.detectors.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }
}

impl fmt::Debug for DetectorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DetectorRegistry")
            .field("keys", &self.keys())
            .finish()
    }
}
