// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rectangle geometry helpers.

use crate::types::Rect;

/// Clamp `value` into `[min, max]`.
///
/// Unlike [`f64::clamp`] this never panics: when `max < min` the lower bound
/// wins, which pins an oversized rectangle's origin to zero.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    min.max(max.min(value))
}

/// Overlapping region of two rectangles, or `None` if they do not overlap.
pub fn intersect(a: &Rect, b: &Rect) -> Option<Rect> {
    let x1 = a.x.max(b.x);
    let y1 = a.y.max(b.y);
    let x2 = a.right().min(b.right());
    let y2 = a.bottom().min(b.bottom());
    if x2 <= x1 || y2 <= y1 {
        return None;
    }
    Some(Rect::new(x1, y1, x2 - x1, y2 - y1))
}

/// Clip `rect` to a `width` x `height` frame.
pub fn clip_to_frame(rect: &Rect, width: u32, height: u32) -> Option<Rect> {
    intersect(rect, &Rect::full(width, height))
}

/// Whether `rect` lies fully inside a `width` x `height` frame, allowing
/// `epsilon` of floating slack on each edge.
pub fn contains_within(rect: &Rect, width: u32, height: u32, epsilon: f64) -> bool {
    rect.x >= -epsilon
        && rect.y >= -epsilon
        && rect.right() <= width as f64 + epsilon
        && rect.bottom() <= height as f64 + epsilon
}
