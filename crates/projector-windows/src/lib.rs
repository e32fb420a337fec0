//! Win32 implementation of the Projector display backend.
//!
//! Empty on non-Windows targets so the workspace builds everywhere.
#![cfg(windows)]

/// `DisplayBackend` implementation.
pub mod backend;

/// Monitor enumeration via `EnumDisplayMonitors`.
pub mod monitor;

/// Secondary window class, window procedure, and placeholder painting.
mod window;

pub use backend::Win32Backend;
pub use monitor::enumerate_monitors;
