// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// framecrop-compose — Crop composition and the end-to-end cropper.
//
// The composer turns detector candidates into one rectangle of a requested
// aspect ratio; the cropper wires configuration, the detector registry, the
// pipeline, and the composer together for a single call per frame.

pub mod composer;
pub mod cropper;
pub mod output;
pub mod source;

pub use composer::{CompositionScorer, ConstantComposition, CropComposer};
pub use cropper::{CropOutcome, CropOverrides, ImageCropper};
pub use output::extract_crop;
pub use source::{FrameSource, StillImageSource};
