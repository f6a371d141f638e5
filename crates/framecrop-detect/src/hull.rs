// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Convex hull and quadrilateral extraction for edge point clouds.

use std::cmp::Ordering;

use framecrop_core::{Point, Quad};

/// Z component of `(a - o) x (b - o)`. Positive for a left turn.
pub fn cross(o: Point, a: Point, b: Point) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// Convex hull by Andrew's monotone chain.
///
/// Points are ordered by `(y, x)`; collinear points are dropped, so every
/// consecutive triple of the returned cycle makes a strict left turn.
/// Inputs with fewer than three points are returned sorted.
pub fn convex_hull(mut points: Vec<Point>) -> Vec<Point> {
    points.sort_by(|a, b| {
        a.y.partial_cmp(&b.y)
            .unwrap_or(Ordering::Equal)
            .then(a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal))
    });
    points.dedup();
    if points.len() < 3 {
        return points;
    }

    let mut lower: Vec<Point> = Vec::with_capacity(points.len());
    for &p in &points {
        push_left_turn(&mut lower, p);
    }
    let mut upper: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points.iter().rev() {
        push_left_turn(&mut upper, p);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

fn push_left_turn(chain: &mut Vec<Point>, p: Point) {
    while chain.len() >= 2 && cross(chain[chain.len() - 2], chain[chain.len() - 1], p) <= 0.0 {
        chain.pop();
    }
    chain.push(p);
}

/// Pick four extreme hull points as `[top-left, top-right, bottom-right, bottom-left]`.
///
/// Extremes are taken along the diagonals: min `x+y`, max `x-y`, max `x+y`,
/// min `x-y`. Ties keep the first point encountered. Returns `None` when
/// fewer than four points are given.
pub fn quad_from_hull(hull: &[Point]) -> Option<Quad> {
    if hull.len() < 4 {
        return None;
    }
    let first = hull[0];
    let (mut tl, mut tr, mut br, mut bl) = (first, first, first, first);
    for &p in &hull[1..] {
        if p.x + p.y < tl.x + tl.y {
            tl = p;
        }
        if p.x - p.y > tr.x - tr.y {
            tr = p;
        }
        if p.x + p.y > br.x + br.y {
            br = p;
        }
        if p.x - p.y < bl.x - bl.y {
            bl = p;
        }
    }
    Some([tl, tr, br, bl])
}
