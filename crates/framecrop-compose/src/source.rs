// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Frame acquisition seam.

use std::path::Path;

use framecrop_core::{Frame, Result};
use tracing::instrument;

/// Anything that can hand the cropper a frame on demand: a camera, a video
/// decoder, a screenshot hook.
pub trait FrameSource {
    fn capture(&mut self) -> Result<Frame>;
}

/// A source that always yields the same decoded still image.
#[derive(Debug, Clone)]
pub struct StillImageSource {
    frame: Frame,
}

impl StillImageSource {
    pub fn new(frame: Frame) -> Self {
        Self { frame }
    }

    /// Decode an image file (PNG, JPEG, ...).
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(Frame::open(path)?))
    }

    /// Decode in-memory image bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Ok(Self::new(Frame::from_bytes(data)?))
    }
}

impl FrameSource for StillImageSource {
    fn capture(&mut self) -> Result<Frame> {
        Ok(self.frame.clone())
    }
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};

    use super::*;

    /// Each capture returns an identical copy of the still.
    #[test]
    fn still_source_repeats_frame() {
        let frame = Frame::from_rgba(RgbaImage::from_pixel(4, 3, Rgba([1, 2, 3, 255]))).unwrap();
        let mut source = StillImageSource::new(frame);
        let a = source.capture().unwrap();
        let b = source.capture().unwrap();
        assert_eq!((a.width(), a.height()), (4, 3));
        assert_eq!(a.pixels(), b.pixels());
    }

    /// Undecodable bytes surface as an image error.
    #[test]
    fn garbage_bytes_fail() {
        assert!(StillImageSource::from_bytes(b"not an image").is_err());
    }
}
