//! Stub backend used when native windowing is switched off or not compiled in.

use crate::{
    CloseHook, DisplayBackend, MonitorInfo, Rect, WindowId, WindowResult, WindowSpec, WindowStyle,
};

/// A backend that reports no monitors and refuses to create windows.
///
/// Every bridge call still gets a well-formed answer: `initialize` and
/// `openSecondaryWindow` return `false`, `getMonitors` returns an empty list.
#[derive(Debug, Clone)]
pub struct DisabledBackend {
    reason: String,
}

impl DisabledBackend {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn unavailable<T>(&self) -> WindowResult<T> {
        Err(format!("secondary windows are disabled: {}", self.reason).into())
    }
}

impl Default for DisabledBackend {
    fn default() -> Self {
        Self::new("disabled by configuration")
    }
}

impl DisplayBackend for DisabledBackend {
    fn name(&self) -> &'static str {
        "disabled"
    }

    fn initialize(&mut self) -> WindowResult<()> {
        self.unavailable()
    }

    fn monitors(&mut self) -> Vec<MonitorInfo> {
        Vec::new()
    }

    fn create_window(&mut self, _spec: &WindowSpec<'_>, _hook: CloseHook) -> WindowResult<WindowId> {
        self.unavailable()
    }

    fn destroy_window(&mut self, _id: WindowId) -> WindowResult<()> {
        self.unavailable()
    }

    fn set_position(&mut self, _id: WindowId, _x: i32, _y: i32) -> WindowResult<()> {
        self.unavailable()
    }

    fn set_rect(&mut self, _id: WindowId, _rect: &Rect) -> WindowResult<()> {
        self.unavailable()
    }

    fn set_style(&mut self, _id: WindowId, _style: WindowStyle) -> WindowResult<()> {
        self.unavailable()
    }

    fn redraw(&mut self, _id: WindowId, _content: &str) -> WindowResult<()> {
        self.unavailable()
    }
}
