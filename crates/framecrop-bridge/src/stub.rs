// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub providers for hosts without the optional capability.

use framecrop_core::{Frame, FramecropError, Rect, Result};

use crate::traits::FaceCapability;

/// Face provider that is never available.
pub struct StubFaceCapability;

impl FaceCapability for StubFaceCapability {
    fn is_available(&self) -> bool {
        false
    }

    fn detect_faces(&self, _frame: &Frame, _max_faces: usize) -> Result<Vec<Rect>> {
        tracing::warn!("FaceCapability::detect_faces called on stub provider");
        Err(FramecropError::CapabilityUnavailable("face detection"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_is_unavailable_and_errors() {
        let frame = Frame::new(1, 1, vec![0u8; 4]).unwrap();
        assert!(!StubFaceCapability.is_available());
        assert!(matches!(
            StubFaceCapability.detect_faces(&frame, 1),
            Err(FramecropError::CapabilityUnavailable(_))
        ));
    }
}
