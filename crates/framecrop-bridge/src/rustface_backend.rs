// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Face capability backed by the `rustface` crate (SeetaFace cascade).

use std::path::Path;

use framecrop_core::{Frame, FramecropError, Rect, Result};
use tracing::{debug, instrument};

use crate::traits::FaceCapability;

/// SeetaFace frontal-face detector loaded from a model file.
pub struct RustfaceCapability {
    model: rustface::Model,
    min_face_size: u32,
}

impl RustfaceCapability {
    /// Load a SeetaFace model (e.g. `seeta_fd_frontal_v1.0.bin`).
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_model_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        let model = rustface::read_model(std::io::BufReader::new(file)).map_err(|err| {
            FramecropError::ImageError(format!("failed to load SeetaFace model: {}", err))
        })?;
        Ok(Self {
            model,
            min_face_size: 20,
        })
    }

    /// Smallest face edge, in pixels, the cascade will report (default 20).
    pub fn min_face_size(mut self, pixels: u32) -> Self {
        self.min_face_size = pixels;
        self
    }
}

impl FaceCapability for RustfaceCapability {
    fn is_available(&self) -> bool {
        true
    }

    fn detect_faces(&self, frame: &Frame, max_faces: usize) -> Result<Vec<Rect>> {
        let gray = image::imageops::grayscale(frame.as_image());

        let mut detector = rustface::create_detector_with_model(self.model.clone());
        detector.set_min_face_size(self.min_face_size);
        detector.set_score_thresh(2.0);
        detector.set_pyramid_scale_factor(0.8);
        detector.set_slide_window_step(4, 4);

        let mut faces =
            detector.detect(&rustface::ImageData::new(gray.as_raw(), gray.width(), gray.height()));
        faces.sort_by(|a, b| {
            b.score()
                .partial_cmp(&a.score())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        debug!(found = faces.len(), max_faces, "SeetaFace detection complete");

        Ok(faces
            .iter()
            .take(max_faces)
            .map(|face| {
                let bbox = face.bbox();
                Rect::new(
                    bbox.x() as f64,
                    bbox.y() as f64,
                    bbox.width() as f64,
                    bbox.height() as f64,
                )
            })
            .collect())
    }
}
