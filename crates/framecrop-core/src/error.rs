// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for framecrop.

use thiserror::Error;

/// Top-level error type for all framecrop operations.
#[derive(Debug, Error)]
pub enum FramecropError {
    // -- Caller contract violations --
    #[error("invalid frame: {0}")]
    InvalidFrame(String),

    #[error("pixel buffer length mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("aspect ratio must be finite and > 0, got {0}")]
    InvalidAspectRatio(f64),

    #[error("at least one aspect ratio is required")]
    NoAspectRatios,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid crop rectangle: {0}")]
    InvalidRect(String),

    // -- Detector errors (recovered by the pipeline) --
    #[error("detector failed: {0}")]
    Detector(String),

    #[error("operation cancelled")]
    Cancelled,

    // -- Capability providers --
    #[error("capability not available on this platform: {0}")]
    CapabilityUnavailable(&'static str),

    // -- Decoding / persistence --
    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, FramecropError>;
