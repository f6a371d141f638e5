// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Cropped pixel extraction for output sinks.

use framecrop_core::geometry::clip_to_frame;
use framecrop_core::{Frame, FramecropError, Rect, Result};
use image::RgbaImage;
use image::imageops::{self, FilterType};
use tracing::debug;

/// Copy the pixels under `rect` out of `frame`.
///
/// The rect is snapped to whole pixels and clipped to the frame. When
/// `max_width` is set and the crop is wider, the copy is downscaled to that
/// width keeping its aspect ratio.
pub fn extract_crop(frame: &Frame, rect: &Rect, max_width: Option<u32>) -> Result<RgbaImage> {
    let clipped = clip_to_frame(rect, frame.width(), frame.height()).ok_or_else(|| {
        FramecropError::InvalidRect(format!(
            "{:?} does not overlap the {}x{} frame",
            rect,
            frame.width(),
            frame.height()
        ))
    })?;

    let x = clipped.x.round() as u32;
    let y = clipped.y.round() as u32;
    let width = (clipped.width.round() as u32).clamp(1, frame.width() - x.min(frame.width() - 1));
    let height =
        (clipped.height.round() as u32).clamp(1, frame.height() - y.min(frame.height() - 1));
    let x = x.min(frame.width() - width);
    let y = y.min(frame.height() - height);

    let cropped = imageops::crop_imm(frame.as_image(), x, y, width, height).to_image();
    match max_width {
        Some(max) if max > 0 && width > max => {
            let scaled_height = ((height as f64 * max as f64 / width as f64).round() as u32).max(1);
            debug!(width = max, height = scaled_height, "Downscaling crop output");
            Ok(imageops::resize(&cropped, max, scaled_height, FilterType::Triangle))
        }
        _ => Ok(cropped),
    }
}

#[cfg(test)]
mod tests {
    use image::Rgba;

    use super::*;

    fn gradient(width: u32, height: u32) -> Frame {
        let image = RgbaImage::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, 0, 255]));
        Frame::from_rgba(image).unwrap()
    }

    /// The output holds exactly the pixels under the rect.
    #[test]
    fn copies_region() {
        let frame = gradient(40, 30);
        let out = extract_crop(&frame, &Rect::new(10.0, 5.0, 20.0, 12.0), None).unwrap();
        assert_eq!(out.dimensions(), (20, 12));
        assert_eq!(out.get_pixel(0, 0).0, [10, 5, 0, 255]);
        assert_eq!(out.get_pixel(19, 11).0, [29, 16, 0, 255]);
    }

    /// Fractional rects snap to the pixel grid and stay in frame.
    #[test]
    fn snaps_fractional_rects() {
        let frame = gradient(40, 30);
        let out = extract_crop(&frame, &Rect::new(29.6, 0.2, 10.6, 29.9), None).unwrap();
        assert_eq!(out.dimensions(), (10, 30));
        assert_eq!(out.get_pixel(0, 0).0[0], 30);
    }

    /// Wide crops are downscaled to the requested width.
    #[test]
    fn honours_max_width() {
        let frame = gradient(200, 100);
        let out = extract_crop(&frame, &Rect::new(0.0, 0.0, 200.0, 100.0), Some(50)).unwrap();
        assert_eq!(out.dimensions(), (50, 25));
    }

    /// A rect entirely outside the frame is an error.
    #[test]
    fn outside_rect_fails() {
        let frame = gradient(20, 20);
        let result = extract_crop(&frame, &Rect::new(30.0, 30.0, 5.0, 5.0), None);
        assert!(matches!(result, Err(FramecropError::InvalidRect(_))));
    }
}
