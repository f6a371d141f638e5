// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document quadrilateral detector — downscale, blur, Sobel gradient, adaptive
// threshold, convex hull, and four-corner extraction.

use std::borrow::Cow;

use framecrop_bridge::Capabilities;
use framecrop_core::{DetectorMeta, DocumentQuadTuning, Point, Quad, Rect, Result};
use image::RgbaImage;
use image::imageops::{self, FilterType};
use tracing::{debug, instrument};

use super::{DOCUMENT_QUAD_KEY, luminance};
use crate::detector::{Detector, DetectorContext, DetectorResult};
use crate::hull::{convex_hull, quad_from_hull};

const SOBEL_X: [f32; 9] = [-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0];
const SOBEL_Y: [f32; 9] = [-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0];

const BASE_SCORE: f64 = 0.4;
const COVERAGE_WEIGHT: f64 = 0.6;
const MAX_COVERAGE_BONUS: f64 = 0.4;
const SHAPE_BONUS: f64 = 0.15;
const MAX_SCORE: f64 = 0.95;

/// Finds the outline of a sheet of paper as a four-corner polygon.
///
/// The quad is reported in full-frame coordinates as
/// `[top-left, top-right, bottom-right, bottom-left]` through
/// [`DetectorMeta::Quad`], alongside its axis-aligned bounding box.
///
/// The detector is classical (no model). It works on a copy whose longest
/// side is at most `max_working_side` and polls the cancellation token
/// between stages.
#[derive(Debug, Clone, Default)]
pub struct DocumentQuadDetector {
    tuning: DocumentQuadTuning,
}

impl DocumentQuadDetector {
    pub fn new(tuning: DocumentQuadTuning) -> Self {
        Self { tuning }
    }

    pub fn tuning(&self) -> &DocumentQuadTuning {
        &self.tuning
    }

    /// Working-copy scale factor, never above 1.
    fn scale_for(&self, width: u32, height: u32) -> f64 {
        (self.tuning.max_working_side.max(1) as f64 / width.max(height) as f64).min(1.0)
    }

    /// Edge-point cloud in working-copy coordinates.
    fn edge_points(&self, field: &LumaField) -> Vec<Point> {
        let mean = field.data.iter().map(|&m| m as f64).sum::<f64>() / field.data.len() as f64;
        let threshold = mean as f32 * self.tuning.threshold_factor;
        let stride = self.tuning.sample_stride.max(1);

        let mut points = Vec::new();
        for y in (1..field.height.saturating_sub(1)).step_by(stride) {
            for x in (1..field.width.saturating_sub(1)).step_by(stride) {
                if field.at(x, y) > threshold {
                    points.push(Point::new(x as f64, y as f64));
                }
            }
        }
        debug!(mean, threshold, points = points.len(), "Edge points sampled");
        points
    }
}

impl Detector for DocumentQuadDetector {
    fn key(&self) -> &str {
        DOCUMENT_QUAD_KEY
    }

    fn supports(&self, _capabilities: &Capabilities) -> bool {
        true
    }

    #[instrument(skip_all, fields(width = ctx.frame.width(), height = ctx.frame.height()))]
    fn detect(&self, ctx: &DetectorContext<'_>) -> Result<DetectorResult> {
        let frame = ctx.frame;
        let scale = self.scale_for(frame.width(), frame.height());
        let working = downscale(frame.as_image(), scale);
        ctx.cancel.check()?;

        let gray = LumaField::from_rgba(&working);
        let blurred = box_blur(&gray);
        ctx.cancel.check()?;

        let magnitude = sobel_magnitude(&blurred);
        ctx.cancel.check()?;

        let points = self.edge_points(&magnitude);
        if points.len() < self.tuning.min_points {
            return Ok(DetectorResult::empty());
        }

        let hull = convex_hull(points);
        ctx.cancel.check()?;
        let Some(small_quad) = quad_from_hull(&hull) else {
            debug!(hull = hull.len(), "Hull too small for a quad");
            return Ok(DetectorResult::empty());
        };

        let quad: Quad = small_quad.map(|p| Point::new(p.x / scale, p.y / scale));
        let Some(rect) = bounding_rect(&quad) else {
            return Ok(DetectorResult::empty());
        };

        let coverage = rect.area() / frame.area();
        let score = MAX_SCORE
            .min(BASE_SCORE + MAX_COVERAGE_BONUS.min(coverage * COVERAGE_WEIGHT) + SHAPE_BONUS);

        debug!(?rect, hull = hull.len(), coverage, score, "Document quad found");
        Ok(DetectorResult::single(rect, score).with_meta(DetectorMeta::Quad(quad)))
    }
}

// -- Image stages -------------------------------------------------------------

/// Row-major single-channel float plane.
#[derive(Debug, Clone)]
struct LumaField {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl LumaField {
    fn zeros(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    fn from_rgba(image: &RgbaImage) -> Self {
        let data = image
            .pixels()
            .map(|px| luminance([px.0[0], px.0[1], px.0[2]]) as f32)
            .collect();
        Self {
            width: image.width() as usize,
            height: image.height() as usize,
            data,
        }
    }

    fn at(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }

    /// 3x3 neighbourhood of an interior pixel, row-major.
    fn window(&self, x: usize, y: usize) -> [f32; 9] {
        let mut out = [0.0; 9];
        let mut k = 0;
        for yy in y - 1..=y + 1 {
            for xx in x - 1..=x + 1 {
                out[k] = self.at(xx, yy);
                k += 1;
            }
        }
        out
    }
}

fn downscale(image: &RgbaImage, scale: f64) -> Cow<'_, RgbaImage> {
    if scale >= 1.0 {
        return Cow::Borrowed(image);
    }
    let width = ((image.width() as f64 * scale).round() as u32).max(1);
    let height = ((image.height() as f64 * scale).round() as u32).max(1);
    debug!(width, height, scale, "Downscaling working copy");
    Cow::Owned(imageops::resize(image, width, height, FilterType::Triangle))
}

/// 3x3 box blur of the interior. The one-pixel border keeps its input value.
fn box_blur(field: &LumaField) -> LumaField {
    let mut out = field.clone();
    for y in 1..field.height.saturating_sub(1) {
        for x in 1..field.width.saturating_sub(1) {
            out.data[y * field.width + x] = field.window(x, y).iter().sum::<f32>() / 9.0;
        }
    }
    out
}

/// Sobel gradient magnitude of the interior. The border is zero.
fn sobel_magnitude(field: &LumaField) -> LumaField {
    let mut out = LumaField::zeros(field.width, field.height);
    for y in 1..field.height.saturating_sub(1) {
        for x in 1..field.width.saturating_sub(1) {
            let window = field.window(x, y);
            let (mut sx, mut sy) = (0.0f32, 0.0f32);
            for (k, value) in window.iter().enumerate() {
                sx += SOBEL_X[k] * value;
                sy += SOBEL_Y[k] * value;
            }
            out.data[y * field.width + x] = sx.hypot(sy);
        }
    }
    out
}

/// Rounded axis-aligned bounds of a quad, `None` when it has no area.
fn bounding_rect(quad: &Quad) -> Option<Rect> {
    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in quad {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    let width = (max_x - min_x).round();
    let height = (max_y - min_y).round();
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    Some(Rect::new(min_x.round().max(0.0), min_y.round().max(0.0), width, height))
}
