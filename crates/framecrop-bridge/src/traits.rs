// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic capability traits.

use std::fmt;
use std::sync::Arc;

use framecrop_core::{Frame, Rect, Result};

use crate::stub::StubFaceCapability;

/// External face-detection engine.
///
/// Implement this to plug a platform API or a model runtime into the `face`
/// detector. Implementations must not mutate shared state across calls; the
/// same provider may serve several pipeline runs at once.
pub trait FaceCapability: Send + Sync {
    /// Whether the engine can run on this host. Must be cheap and pure.
    fn is_available(&self) -> bool;

    /// Detect up to `max_faces` faces, returning their bounding boxes in
    /// frame pixel coordinates.
    fn detect_faces(&self, frame: &Frame, max_faces: usize) -> Result<Vec<Rect>>;
}

/// Every capability a detector may ask for, supplied by the platform adapter.
#[derive(Clone)]
pub struct Capabilities {
    face: Arc<dyn FaceCapability>,
}

impl Capabilities {
    /// A set where no optional capability is available.
    pub fn none() -> Self {
        Self {
            face: Arc::new(StubFaceCapability),
        }
    }

    /// Replace the face provider.
    pub fn with_face(mut self, face: Arc<dyn FaceCapability>) -> Self {
        self.face = face;
        self
    }

    pub fn face(&self) -> &dyn FaceCapability {
        self.face.as_ref()
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::none()
    }
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capabilities")
            .field("face_available", &self.face.is_available())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedFaces(Vec<Rect>);

    impl FaceCapability for FixedFaces {
        fn is_available(&self) -> bool {
            true
        }

        fn detect_faces(&self, _frame: &Frame, max_faces: usize) -> Result<Vec<Rect>> {
            Ok(self.0.iter().copied().take(max_faces).collect())
        }
    }

    /// Verify the default set reports the face capability as missing.
    #[test]
    fn none_has_no_face() {
        let caps = Capabilities::none();
        assert!(!caps.face().is_available());
    }

    /// Verify with_face swaps in the injected provider.
    #[test]
    fn with_face_injects_provider() {
        let faces = vec![Rect::new(1.0, 2.0, 3.0, 4.0), Rect::new(5.0, 6.0, 7.0, 8.0)];
        let caps = Capabilities::none().with_face(Arc::new(FixedFaces(faces)));
        assert!(caps.face().is_available());

        let frame = Frame::new(2, 2, vec![0u8; 16]).unwrap();
        let found = caps.face().detect_faces(&frame, 1).unwrap();
        assert_eq!(found, vec![Rect::new(1.0, 2.0, 3.0, 4.0)]);
    }
}
