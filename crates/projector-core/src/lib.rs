pub mod backend;
pub mod config;
pub mod controller;
pub mod disabled;
pub mod dispatch;
pub mod log;
pub mod monitor;
pub mod rect;

#[cfg(test)]
pub(crate) mod fake;

pub use backend::{CloseHook, DisplayBackend, WindowId, WindowResult, WindowSpec, WindowStyle};
pub use config::{BackendKind, Config, MonitorRefresh};
pub use controller::{ControllerSettings, OpenRequest, SecondaryWindowController};
pub use disabled::DisabledBackend;
pub use dispatch::{Dispatcher, ErrorCode, Method, MethodCall, MethodError, MethodResponse};
pub use monitor::MonitorInfo;
pub use rect::Rect;
