// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// framecrop — Core types, geometry helpers, configuration, and error
// definitions shared across all crates.

pub mod config;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod types;

pub use config::{CropperConfig, DetectorTuning, DocumentQuadTuning, DocumentTuning};
pub use error::{FramecropError, Result};
pub use frame::Frame;
pub use types::*;
