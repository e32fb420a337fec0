//! In-memory backend for controller and dispatcher tests.

use std::collections::BTreeMap;

use crate::{
    CloseHook, DisplayBackend, MonitorInfo, Rect, WindowId, WindowResult, WindowSpec, WindowStyle,
};

pub(crate) fn monitor(index: usize, rect: Rect, is_primary: bool) -> MonitorInfo {
    MonitorInfo {
        index,
        name: format!("FAKE{index}"),
        width: rect.width,
        height: rect.height,
        x: rect.x,
        y: rect.y,
        is_primary,
        scale_factor: 1.0,
    }
}

/// Two side-by-side monitors: a 1080p primary at the origin and a 1440p
/// projector to its right.
pub(crate) fn dual_monitors() -> Vec<MonitorInfo> {
    vec![
        monitor(0, Rect::new(0, 0, 1920, 1080), true),
        monitor(1, Rect::new(1920, 0, 2560, 1440), false),
    ]
}

#[derive(Debug)]
pub(crate) struct FakeWindow {
    pub title: String,
    pub placeholder: String,
    pub rect: Rect,
    pub style: WindowStyle,
    pub close_on_escape: bool,
    pub hook: CloseHook,
    pub redraws: Vec<String>,
}

#[derive(Debug, Default)]
pub(crate) struct FakeBackend {
    pub monitors: Vec<MonitorInfo>,
    pub windows: BTreeMap<usize, FakeWindow>,
    pub fail_initialize: bool,
    pub fail_create: bool,
    pub enumerations: usize,
    pub created: usize,
    next_id: usize,
}

impl FakeBackend {
    pub fn with_monitors(monitors: Vec<MonitorInfo>) -> Self {
        Self {
            monitors,
            next_id: 1,
            ..Default::default()
        }
    }

    pub fn dual() -> Self {
        Self::with_monitors(dual_monitors())
    }

    /// The single live window, if any.
    pub fn only_window(&self) -> Option<&FakeWindow> {
        assert!(self.windows.len() <= 1, "fake backend holds several windows");
        self.windows.values().next()
    }

    /// Simulates the user or the OS destroying the window.
    pub fn os_destroy_all(&mut self) {
        for (_, window) in std::mem::take(&mut self.windows) {
            window.hook.fire();
        }
    }

    fn window_mut(&mut self, id: WindowId) -> WindowResult<&mut FakeWindow> {
        self.windows
            .get_mut(&id.0)
            .ok_or_else(|| format!("unknown window {}", id.0).into())
    }
}

impl DisplayBackend for FakeBackend {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn initialize(&mut self) -> WindowResult<()> {
        if self.fail_initialize {
            return Err("display unavailable".into());
        }
        Ok(())
    }

    fn monitors(&mut self) -> Vec<MonitorInfo> {
        self.enumerations += 1;
        self.monitors.clone()
    }

    fn create_window(&mut self, spec: &WindowSpec<'_>, hook: CloseHook) -> WindowResult<WindowId> {
        if self.fail_create {
            return Err("CreateWindow failed".into());
        }
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        self.created += 1;
        self.windows.insert(
            id,
            FakeWindow {
                title: spec.title.to_owned(),
                placeholder: spec.placeholder.to_owned(),
                rect: spec.rect,
                style: spec.style,
                close_on_escape: spec.close_on_escape,
                hook,
                redraws: Vec::new(),
            },
        );
        Ok(WindowId(id))
    }

    fn destroy_window(&mut self, id: WindowId) -> WindowResult<()> {
        let window = self
            .windows
            .remove(&id.0)
            .ok_or_else(|| format!("unknown window {}", id.0))?;
        window.hook.fire();
        Ok(())
    }

    fn set_position(&mut self, id: WindowId, x: i32, y: i32) -> WindowResult<()> {
        let window = self.window_mut(id)?;
        window.rect.x = x;
        window.rect.y = y;
        Ok(())
    }

    fn set_rect(&mut self, id: WindowId, rect: &Rect) -> WindowResult<()> {
        self.window_mut(id)?.rect = *rect;
        Ok(())
    }

    fn set_style(&mut self, id: WindowId, style: WindowStyle) -> WindowResult<()> {
        self.window_mut(id)?.style = style;
        Ok(())
    }

    fn redraw(&mut self, id: WindowId, content: &str) -> WindowResult<()> {
        self.window_mut(id)?.redraws.push(content.to_owned());
        Ok(())
    }
}
