// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Frame — a validated, read-only RGBA pixel buffer handed to every detector.

use image::{DynamicImage, RgbaImage};
use tracing::{debug, instrument};

use crate::error::{FramecropError, Result};
use crate::types::Rect;

/// Bytes per packed RGBA pixel.
pub const CHANNELS: usize = 4;

/// A decoded image frame: packed RGBA, row-major, stride `width * 4`.
///
/// Frames can only be built through validating constructors, so every frame
/// that reaches a detector has positive dimensions and a buffer of exactly
/// `width * height * 4` bytes. Detectors receive `&Frame` and cannot mutate
/// the pixels.
#[derive(Debug, Clone)]
pub struct Frame {
    image: RgbaImage,
}

impl Frame {
    // -- Construction ---------------------------------------------------------

    /// Wrap a raw RGBA buffer, checking dimensions and buffer length.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(FramecropError::InvalidFrame(format!(
                "dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(FramecropError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        let image = RgbaImage::from_raw(width, height, data).ok_or_else(|| {
            FramecropError::InvalidFrame("pixel buffer rejected by image container".into())
        })?;
        Ok(Self { image })
    }

    /// Wrap an owned RGBA image.
    pub fn from_rgba(image: RgbaImage) -> Result<Self> {
        if image.width() == 0 || image.height() == 0 {
            return Err(FramecropError::InvalidFrame(format!(
                "dimensions must be positive, got {}x{}",
                image.width(),
                image.height()
            )));
        }
        Ok(Self { image })
    }

    /// Convert any decoded image to an RGBA frame.
    pub fn from_dynamic(image: &DynamicImage) -> Result<Self> {
        Self::from_rgba(image.to_rgba8())
    }

    /// Decode a frame from encoded bytes (JPEG, PNG, WebP, ...).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let decoded = image::load_from_memory(data).map_err(|err| {
            FramecropError::ImageError(format!("failed to decode frame: {}", err))
        })?;
        debug!(
            width = decoded.width(),
            height = decoded.height(),
            "Frame decoded from bytes"
        );
        Self::from_dynamic(&decoded)
    }

    /// Decode a frame from an image file on disk.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let decoded = image::open(path.as_ref()).map_err(|err| {
            FramecropError::ImageError(format!(
                "failed to open {}: {}",
                path.as_ref().display(),
                err
            ))
        })?;
        Self::from_dynamic(&decoded)
    }

    // -- Accessors ------------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Frame area in square pixels.
    pub fn area(&self) -> f64 {
        self.width() as f64 * self.height() as f64
    }

    /// Rectangle covering the whole frame.
    pub fn bounds(&self) -> Rect {
        Rect::full(self.width(), self.height())
    }

    /// The packed RGBA bytes.
    pub fn pixels(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Borrow the frame as an `image` buffer for resampling and conversion.
    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    /// Consume the frame and return the underlying image.
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// RGB channels of the pixel at `(x, y)`; callers keep coordinates in
    /// bounds.
    pub fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = (y as usize * self.width() as usize + x as usize) * CHANNELS;
        let data = self.pixels();
        [data[idx], data[idx + 1], data[idx + 2]]
    }
}
