// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the framecrop-detect crate: the document-quad
// detector on its own and a full built-in pipeline run.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{Rgba, RgbaImage};

use framecrop_bridge::Capabilities;
use framecrop_core::Frame;
use framecrop_detect::{
    CancellationToken, Detector, DetectorContext, DetectorRegistry, DocumentQuadDetector, Pipeline,
};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Dark background with a bright sheet covering the middle third.
fn synthetic_document(width: u32, height: u32) -> Frame {
    let mut img = RgbaImage::from_pixel(width, height, Rgba([30, 30, 30, 255]));
    for y in height / 3..height * 2 / 3 {
        for x in width / 3..width * 2 / 3 {
            img.put_pixel(x, y, Rgba([240, 240, 240, 255]));
        }
    }
    match Frame::from_rgba(img) {
        Ok(frame) => frame,
        Err(err) => panic!("synthetic frame rejected: {}", err),
    }
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Document-quad detection at 640x480, which runs at full resolution, and at
/// 1920x1080, which is downscaled to an 800 px working copy.
fn bench_document_quad(c: &mut Criterion) {
    let caps = Capabilities::none();
    let cancel = CancellationToken::new();
    let detector = DocumentQuadDetector::default();

    for (width, height) in [(640u32, 480u32), (1920, 1080)] {
        let frame = synthetic_document(width, height);
        c.bench_function(&format!("document_quad ({}x{})", width, height), |b| {
            b.iter(|| {
                let ctx = DetectorContext {
                    frame: black_box(&frame),
                    cancel: &cancel,
                    capabilities: &caps,
                };
                black_box(detector.detect(&ctx))
            });
        });
    }
}

/// Full pipeline with the default detector order on a 1280x720 frame.
fn bench_pipeline(c: &mut Criterion) {
    let registry = DetectorRegistry::builtin();
    let caps = Capabilities::none();
    let cancel = CancellationToken::new();
    let frame = synthetic_document(1280, 720);
    let keys = ["document", "face", "saliency", "edges"];

    c.bench_function("pipeline default order (1280x720)", |b| {
        b.iter(|| {
            let output = Pipeline::new(&registry, &caps).run(black_box(&frame), &keys, &cancel);
            black_box(output)
        });
    });
}

criterion_group!(benches, bench_document_quad, bench_pipeline);
criterion_main!(benches);
