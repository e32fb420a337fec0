//! Secondary window lifecycle.
//!
//! The controller owns the latest monitor snapshot and at most one
//! secondary window. It is either Closed (no window) or Open (window held).
//! Every operation is a single synchronous attempt: backend failures are
//! logged and reported as `false`, never retried.

use crate::config::{Config, DEFAULT_PLACEHOLDER, DEFAULT_TITLE, MonitorRefresh};
use crate::monitor::{self, MonitorInfo};
use crate::{
    CloseHook, DisplayBackend, Rect, WindowId, WindowSpec, WindowStyle, log_debug, log_error,
    log_info, log_warn,
};

/// Parameters for [`SecondaryWindowController::open_secondary_window`].
///
/// `x` and `y` are offsets from the target monitor's origin, not absolute
/// desktop coordinates. They are ignored when `fullscreen` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenRequest {
    /// Target monitor. Out-of-range values (including the default `-1`)
    /// select the primary monitor.
    pub monitor_index: i64,
    pub fullscreen: bool,
    pub width: i32,
    pub height: i32,
    pub x: i32,
    pub y: i32,
}

impl Default for OpenRequest {
    fn default() -> Self {
        Self {
            monitor_index: -1,
            fullscreen: true,
            width: 1280,
            height: 720,
            x: 100,
            y: 100,
        }
    }
}

impl OpenRequest {
    /// Computes the window rectangle on `monitor`.
    pub fn window_rect(&self, monitor: &MonitorInfo) -> Rect {
        if self.fullscreen {
            monitor.rect()
        } else {
            monitor
                .rect()
                .offset_child(self.x, self.y, self.width, self.height)
        }
    }
}

/// Controller settings derived from [`Config`].
#[derive(Debug, Clone)]
pub struct ControllerSettings {
    pub title: String,
    pub placeholder: String,
    pub close_on_escape: bool,
    pub refresh: MonitorRefresh,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.into(),
            placeholder: DEFAULT_PLACEHOLDER.into(),
            close_on_escape: true,
            refresh: MonitorRefresh::OnOpen,
        }
    }
}

impl ControllerSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            title: config.window.title.clone(),
            placeholder: config.window.placeholder.clone(),
            close_on_escape: config.window.close_on_escape,
            refresh: config.monitors.refresh,
        }
    }
}

/// State kept while the secondary window exists.
#[derive(Debug)]
struct OpenWindow {
    id: WindowId,
    hook: CloseHook,
    rect: Rect,
    style: WindowStyle,
}

/// Owns the monitor snapshot and the single secondary window.
///
/// Must live on the thread that owns the OS windowing subsystem.
pub struct SecondaryWindowController<B: DisplayBackend> {
    backend: B,
    settings: ControllerSettings,
    monitors: Vec<MonitorInfo>,
    window: Option<OpenWindow>,
    content: String,
}

impl<B: DisplayBackend> SecondaryWindowController<B> {
    pub fn new(backend: B, settings: ControllerSettings) -> Self {
        Self {
            backend,
            settings,
            monitors: Vec::new(),
            window: None,
            content: String::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// The snapshot from the most recent enumeration, without refreshing.
    pub fn monitors(&self) -> &[MonitorInfo] {
        &self.monitors
    }

    /// The last content pushed through [`Self::update_content`].
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Runs backend setup and reports readiness.
    pub fn initialize(&mut self) -> bool {
        match self.backend.initialize() {
            Ok(()) => {
                log_info!("{} backend initialized", self.backend.name());
                true
            }
            Err(e) => {
                log_error!("{} backend failed to initialize: {e}", self.backend.name());
                false
            }
        }
    }

    /// Discards the snapshot and enumerates monitors again.
    pub fn get_monitors(&mut self) -> &[MonitorInfo] {
        self.monitors.clear();
        let mut fresh = self.backend.monitors();
        monitor::reindex(&mut fresh);
        self.monitors = fresh;
        log_debug!("enumerated {} monitor(s)", self.monitors.len());
        &self.monitors
    }

    /// Opens the secondary window, or does nothing if one is already open.
    ///
    /// Returns `false` when no monitor exists, the requested size is empty,
    /// or the backend fails to create the window.
    pub fn open_secondary_window(&mut self, request: &OpenRequest) -> bool {
        if self.live_window_id().is_some() {
            log_info!("secondary window already open");
            return true;
        }

        self.get_monitors();

        let Some(target) = monitor::resolve_target(&self.monitors, request.monitor_index) else {
            log_error!("no suitable monitor found for the secondary window");
            return false;
        };
        if usize::try_from(request.monitor_index).ok() != Some(target.index) {
            log_debug!(
                "monitor index {} not available, using monitor {}",
                request.monitor_index,
                target.index
            );
        }

        let rect = request.window_rect(target);
        if rect.width <= 0 || rect.height <= 0 {
            log_error!(
                "refusing to open a {}x{} secondary window",
                rect.width,
                rect.height
            );
            return false;
        }

        let style = WindowStyle::from_fullscreen(request.fullscreen);
        let hook = CloseHook::new();
        let spec = WindowSpec {
            title: &self.settings.title,
            rect,
            style,
            placeholder: &self.settings.placeholder,
            close_on_escape: self.settings.close_on_escape,
        };

        match self.backend.create_window(&spec, hook.clone()) {
            Ok(id) => {
                log_info!(
                    "secondary window 0x{:X} opened at ({},{} {}x{}) {:?}",
                    id.0,
                    rect.x,
                    rect.y,
                    rect.width,
                    rect.height,
                    style
                );
                self.window = Some(OpenWindow {
                    id,
                    hook,
                    rect,
                    style,
                });
                true
            }
            Err(e) => {
                log_error!("failed to create secondary window: {e}");
                false
            }
        }
    }

    /// Closes the secondary window. Succeeds whether or not one was open.
    pub fn close_secondary_window(&mut self) -> bool {
        if let Some(window) = self.window.take() {
            if !window.hook.is_fired()
                && let Err(e) = self.backend.destroy_window(window.id)
            {
                log_warn!("failed to destroy secondary window 0x{:X}: {e}", window.id.0);
            }
            log_info!("secondary window closed");
        }
        self.content.clear();
        true
    }

    /// Moves the open window to a monitor's origin without resizing it or
    /// changing its style.
    pub fn move_to_monitor(&mut self, monitor_index: i64) -> bool {
        let Some((id, target)) = self.indexed_target("move", monitor_index) else {
            return false;
        };

        match self.backend.set_position(id, target.x, target.y) {
            Ok(()) => {
                if let Some(window) = self.window.as_mut() {
                    window.rect.x = target.x;
                    window.rect.y = target.y;
                }
                log_info!("secondary window moved to monitor {monitor_index}");
                true
            }
            Err(e) => {
                log_error!("failed to move secondary window: {e}");
                false
            }
        }
    }

    /// Makes the open window cover a monitor, undecorated and topmost.
    pub fn set_fullscreen_on_monitor(&mut self, monitor_index: i64) -> bool {
        let Some((id, target)) = self.indexed_target("fullscreen", monitor_index) else {
            return false;
        };

        let result = self
            .backend
            .set_style(id, WindowStyle::Fullscreen)
            .and_then(|()| self.backend.set_rect(id, &target));

        match result {
            Ok(()) => {
                if let Some(window) = self.window.as_mut() {
                    window.rect = target;
                    window.style = WindowStyle::Fullscreen;
                }
                log_info!("secondary window fullscreen on monitor {monitor_index}");
                true
            }
            Err(e) => {
                log_error!("failed to make secondary window fullscreen: {e}");
                false
            }
        }
    }

    /// Stores `content` and repaints the open window.
    ///
    /// Returns `false` when no window is open. Text is the only content the
    /// backends paint today.
    pub fn update_content(&mut self, content: &str) -> bool {
        let Some(id) = self.live_window_id() else {
            log_debug!("content update ignored: no secondary window");
            return false;
        };

        content.clone_into(&mut self.content);
        match self.backend.redraw(id, &self.content) {
            Ok(()) => true,
            Err(e) => {
                log_error!("failed to redraw secondary window: {e}");
                false
            }
        }
    }

    /// Whether a secondary window is open and not yet destroyed by the OS.
    pub fn is_secondary_window_open(&self) -> bool {
        self.window.as_ref().is_some_and(|w| !w.hook.is_fired())
    }

    /// Current rectangle of the open window as last requested.
    pub fn window_rect(&self) -> Option<Rect> {
        self.window
            .as_ref()
            .filter(|w| !w.hook.is_fired())
            .map(|w| w.rect)
    }

    /// Current style of the open window.
    pub fn window_style(&self) -> Option<WindowStyle> {
        self.window
            .as_ref()
            .filter(|w| !w.hook.is_fired())
            .map(|w| w.style)
    }

    /// Lets the backend deliver pending OS events (paint, close).
    pub fn pump_events(&mut self) {
        self.backend.pump_events();
        self.live_window_id();
    }

    /// Returns the open window's id, dropping it first if the OS destroyed
    /// the window since the last call.
    fn live_window_id(&mut self) -> Option<WindowId> {
        if self.window.as_ref().is_some_and(|w| w.hook.is_fired()) {
            self.window = None;
            self.content.clear();
            log_info!("secondary window was destroyed outside the controller");
        }
        self.window.as_ref().map(|w| w.id)
    }

    /// Shared precondition check for monitor-indexed operations.
    fn indexed_target(&mut self, op: &str, monitor_index: i64) -> Option<(WindowId, Rect)> {
        let Some(id) = self.live_window_id() else {
            log_warn!("{op} to monitor {monitor_index} rejected: no secondary window");
            return None;
        };

        if self.settings.refresh == MonitorRefresh::Always {
            self.get_monitors();
        }

        let Some(target) = monitor::monitor_at(&self.monitors, monitor_index) else {
            log_warn!(
                "{op} rejected: monitor {monitor_index} outside snapshot of {}",
                self.monitors.len()
            );
            return None;
        };
        Some((id, target.rect()))
    }
}

impl<B: DisplayBackend> Drop for SecondaryWindowController<B> {
    fn drop(&mut self) {
        self.close_secondary_window();
    }
}

#[cfg(test)]
mod tests;
