// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// framecrop-bridge — Platform capability providers.
//
// Detectors never probe the host environment directly. Instead the platform
// adapter hands the pipeline a `Capabilities` bundle, and capability-gated
// detectors (face) ask it whether their provider is available.

pub mod stub;
pub mod traits;

#[cfg(feature = "rustface")]
pub mod rustface_backend;

pub use stub::StubFaceCapability;
pub use traits::{Capabilities, FaceCapability};

#[cfg(feature = "rustface")]
pub use rustface_backend::RustfaceCapability;

/// Capability set for the current build target.
///
/// No target ships a built-in face provider, so every capability is the stub.
/// Callers with a real provider (e.g. [`RustfaceCapability`] behind the
/// `rustface` feature) build their own set with [`Capabilities::with_face`].
pub fn platform_capabilities() -> Capabilities {
    Capabilities::none()
}
