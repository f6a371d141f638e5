// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Built-in detectors.

pub mod document;
pub mod document_quad;
pub mod edges;
pub mod face;
pub mod saliency;

pub use document::DocumentDetector;
pub use document_quad::DocumentQuadDetector;
pub use edges::EdgesDetector;
pub use face::FaceDetector;
pub use saliency::SaliencyDetector;

/// Registry key of [`EdgesDetector`].
pub const EDGES_KEY: &str = "edges";
/// Registry key of [`SaliencyDetector`].
pub const SALIENCY_KEY: &str = "saliency";
/// Registry key of [`FaceDetector`].
pub const FACE_KEY: &str = "face";
/// Registry key of [`DocumentDetector`].
pub const DOCUMENT_KEY: &str = "document";
/// Registry key of [`DocumentQuadDetector`].
pub const DOCUMENT_QUAD_KEY: &str = "document-quad";

/// Rec. 709 luminance weights shared by the document detectors.
const LUMA_R: f64 = 0.2126;
const LUMA_G: f64 = 0.7152;
const LUMA_B: f64 = 0.0722;

/// Perceptual brightness of an RGB triple.
pub fn luminance([r, g, b]: [u8; 3]) -> f64 {
    LUMA_R * r as f64 + LUMA_G * g as f64 + LUMA_B * b as f64
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luminance_weights() {
        assert_eq!(luminance([0, 0, 0]), 0.0);
        assert!((luminance([255, 255, 255]) - 255.0).abs() < 1e-9);
        assert!((luminance([255, 0, 0]) - 0.2126 * 255.0).abs() < 1e-9);
    }
}
