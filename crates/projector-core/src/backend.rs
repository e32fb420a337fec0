use std::cell::Cell;
use std::rc::Rc;

use crate::{MonitorInfo, Rect};

/// A boxed error type for OS window operations.
///
/// Backends wrap whatever their platform layer reports; the controller logs
/// the message and turns it into a `false` result.
pub type WindowResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Opaque identifier for a window created by a backend.
///
/// On Win32 this is the `HWND` value; other backends hand out their own
/// numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub usize);

/// Presentation style of the secondary window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowStyle {
    /// Undecorated and topmost, covering a whole monitor.
    Fullscreen,
    /// Decorated, normal z-order.
    Windowed,
}

impl WindowStyle {
    pub fn from_fullscreen(fullscreen: bool) -> Self {
        if fullscreen {
            Self::Fullscreen
        } else {
            Self::Windowed
        }
    }

    pub fn is_fullscreen(self) -> bool {
        self == Self::Fullscreen
    }
}

/// Everything a backend needs to create the secondary window.
#[derive(Debug, Clone)]
pub struct WindowSpec<'a> {
    pub title: &'a str,
    pub rect: Rect,
    pub style: WindowStyle,
    /// Text painted centered on a black background until real content exists.
    pub placeholder: &'a str,
    /// Whether pressing Escape inside the window destroys it.
    pub close_on_escape: bool,
}

/// Flag raised by a backend when the OS destroys a window.
///
/// The controller keeps one clone and the backend stores the other inside
/// the OS window's user-data slot or signal closure. No global instance
/// pointer is involved, so several controllers can coexist.
///
/// Single-threaded by construction: window callbacks run on the thread that
/// owns the window.
#[derive(Debug, Clone, Default)]
pub struct CloseHook(Rc<Cell<bool>>);

impl CloseHook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the window as destroyed. Safe to call more than once.
    pub fn fire(&self) {
        self.0.set(true);
    }

    pub fn is_fired(&self) -> bool {
        self.0.get()
    }
}

/// Platform-specific windowing operations.
///
/// Each backend crate (`projector-windows`, `projector-gtk`) and the
/// always-available [`crate::DisabledBackend`] implement this trait. The
/// controller is the only caller.
pub trait DisplayBackend {
    /// Short human-readable backend name, used in log lines.
    fn name(&self) -> &'static str;

    /// One-time setup (window class registration, toolkit init).
    ///
    /// Must be idempotent: the call bridge may invoke it repeatedly.
    fn initialize(&mut self) -> WindowResult<()>;

    /// Enumerates attached monitors in OS order.
    ///
    /// Returns an empty list when the display subsystem is unavailable.
    fn monitors(&mut self) -> Vec<MonitorInfo>;

    /// Creates and shows a top-level window.
    ///
    /// The backend must call [`CloseHook::fire`] when the OS destroys the
    /// window for any reason, including [`DisplayBackend::destroy_window`].
    fn create_window(&mut self, spec: &WindowSpec<'_>, hook: CloseHook) -> WindowResult<WindowId>;

    /// Destroys a window previously returned by `create_window`.
    fn destroy_window(&mut self, id: WindowId) -> WindowResult<()>;

    /// Moves a window without changing its size, style, or z-order.
    fn set_position(&mut self, id: WindowId, x: i32, y: i32) -> WindowResult<()>;

    /// Moves and resizes a window.
    fn set_rect(&mut self, id: WindowId, rect: &Rect) -> WindowResult<()>;

    /// Switches decoration and z-order to match `style`.
    fn set_style(&mut self, id: WindowId, style: WindowStyle) -> WindowResult<()>;

    /// Requests a repaint. A non-empty `content` replaces the placeholder text.
    fn redraw(&mut self, id: WindowId, content: &str) -> WindowResult<()>;

    /// Dispatches pending OS events without blocking.
    ///
    /// Hosts that do not own an event loop call this between bridge calls so
    /// the window paints and close notifications are delivered.
    fn pump_events(&mut self) {}
}

impl<B: DisplayBackend + ?Sized> DisplayBackend for Box<B> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn initialize(&mut self) -> WindowResult<()> {
        (**self).initialize()
    }

    fn monitors(&mut self) -> Vec<MonitorInfo> {
        (**self).monitors()
    }

    fn create_window(&mut self, spec: &WindowSpec<'_>, hook: CloseHook) -> WindowResult<WindowId> {
        (**self).create_window(spec, hook)
    }

    fn destroy_window(&mut self, id: WindowId) -> WindowResult<()> {
        (**self).destroy_window(id)
    }

    fn set_position(&mut self, id: WindowId, x: i32, y: i32) -> WindowResult<()> {
        (**self).set_position(id, x, y)
    }

    fn set_rect(&mut self, id: WindowId, rect: &Rect) -> WindowResult<()> {
        (**self).set_rect(id, rect)
    }

    fn set_style(&mut self, id: WindowId, style: WindowStyle) -> WindowResult<()> {
        (**self).set_style(id, style)
    }

    fn redraw(&mut self, id: WindowId, content: &str) -> WindowResult<()> {
        (**self).redraw(id, content)
    }

    fn pump_events(&mut self) {
        (**self).pump_events();
    }
}
