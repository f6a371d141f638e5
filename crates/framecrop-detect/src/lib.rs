// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// framecrop-detect — Region detection for smart cropping.
//
// Provides the detector contract, the built-in detectors (edges, saliency,
// face, document, document-quad), an explicit detector registry, and the
// pipeline that runs a caller-ordered list of detectors against a frame.

pub mod cancel;
pub mod detector;
pub mod detectors;
pub mod hull;
pub mod pipeline;
pub mod registry;

pub use cancel::CancellationToken;
pub use detector::{Detector, DetectorContext, DetectorResult};
pub use detectors::{
    DocumentDetector, DocumentQuadDetector, EdgesDetector, FaceDetector, SaliencyDetector,
};
pub use pipeline::{Pipeline, PipelineOutput};
pub use registry::DetectorRegistry;
