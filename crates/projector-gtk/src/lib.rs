//! GTK 3 implementation of the Projector display backend.
//!
//! The real backend needs the `native` feature on Linux. Every other build
//! gets a [`DisabledBackend`] that reports GTK as unavailable.

use projector_core::DisplayBackend;
#[cfg(not(all(target_os = "linux", feature = "native")))]
use projector_core::DisabledBackend;

#[cfg(all(target_os = "linux", feature = "native"))]
mod backend;
#[cfg(all(target_os = "linux", feature = "native"))]
mod monitor;

#[cfg(all(target_os = "linux", feature = "native"))]
pub use backend::GtkBackend;

/// Reason reported by the stand-in backend.
pub const UNAVAILABLE_REASON: &str = "GTK support not compiled in";

/// Whether this build contains the real GTK backend.
pub const AVAILABLE: bool = cfg!(all(target_os = "linux", feature = "native"));

/// Returns the GTK backend for this build.
#[cfg(all(target_os = "linux", feature = "native"))]
pub fn backend() -> Box<dyn DisplayBackend> {
    Box::new(GtkBackend::new())
}

/// Returns the GTK backend for this build.
#[cfg(not(all(target_os = "linux", feature = "native")))]
pub fn backend() -> Box<dyn DisplayBackend> {
    Box::new(DisabledBackend::new(UNAVAILABLE_REASON))
}
