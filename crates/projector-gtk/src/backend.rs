use std::collections::HashMap;

use gtk::gdk;
use gtk::glib;
use gtk::prelude::*;
use projector_core::{
    CloseHook, DisplayBackend, MonitorInfo, Rect, WindowId, WindowResult, WindowSpec, WindowStyle,
    log_debug, log_warn,
};

use crate::monitor::{enumerate_monitors, monitor_number_at};

/// Black background, white centered text.
const THEME: &str = "window { background-color: #000000; } label { color: #ffffff; }";

struct GtkWindow {
    window: gtk::Window,
    label: gtk::Label,
    placeholder: String,
    style: WindowStyle,
    /// GDK monitor number the window was last fullscreened on.
    fullscreen_monitor: Option<i32>,
    hook: CloseHook,
}

/// GTK 3 implementation of [`DisplayBackend`].
///
/// Must be used from the thread that called `gtk::init`. Windows are
/// numbered by the backend; the `destroy` signal raises the close hook.
#[derive(Default)]
pub struct GtkBackend {
    next_id: usize,
    windows: HashMap<usize, GtkWindow>,
}

impl GtkBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn window(&self, id: WindowId) -> WindowResult<&GtkWindow> {
        self.windows
            .get(&id.0)
            .filter(|w| !w.hook.is_fired())
            .ok_or_else(|| format!("window {} no longer exists", id.0).into())
    }

    fn window_mut(&mut self, id: WindowId) -> WindowResult<&mut GtkWindow> {
        self.windows
            .get_mut(&id.0)
            .filter(|w| !w.hook.is_fired())
            .ok_or_else(|| format!("window {} no longer exists", id.0).into())
    }

    fn prune(&mut self) {
        self.windows.retain(|_, w| !w.hook.is_fired());
    }
}

fn ensure_init() -> WindowResult<()> {
    if !gtk::is_initialized() {
        gtk::init()?;
    }
    Ok(())
}

fn themed(widget: &impl IsA<gtk::Widget>, provider: &gtk::CssProvider) {
    widget
        .style_context()
        .add_provider(provider, gtk::STYLE_PROVIDER_PRIORITY_APPLICATION);
}

/// Fullscreens `window` on the monitor whose origin is `(x, y)`, or on
/// whichever monitor it currently occupies. Returns the monitor used, if
/// one matched.
fn fullscreen_at(window: &gtk::Window, x: i32, y: i32) -> Option<i32> {
    let display = window.display();
    let number = monitor_number_at(&display, x, y);
    match number {
        Some(n) => window.fullscreen_on_monitor(&display.default_screen(), n),
        None => window.fullscreen(),
    }
    number
}

impl DisplayBackend for GtkBackend {
    fn name(&self) -> &'static str {
        "gtk"
    }

    fn initialize(&mut self) -> WindowResult<()> {
        ensure_init()
    }

    fn monitors(&mut self) -> Vec<MonitorInfo> {
        if let Err(e) = ensure_init() {
            log_warn!("GTK unavailable, no monitors: {e}");
            return Vec::new();
        }
        enumerate_monitors()
    }

    fn create_window(&mut self, spec: &WindowSpec<'_>, hook: CloseHook) -> WindowResult<WindowId> {
        ensure_init()?;
        self.prune();

        let provider = gtk::CssProvider::new();
        provider.load_from_data(THEME.as_bytes())?;

        let window = gtk::Window::new(gtk::WindowType::Toplevel);
        window.set_title(spec.title);
        let label = gtk::Label::new(Some(spec.placeholder));
        themed(&window, &provider);
        themed(&label, &provider);
        window.add(&label);

        let r = spec.rect;
        window.set_default_size(r.width, r.height);
        window.move_(r.x, r.y);
        let mut fullscreen_monitor = None;
        if spec.style.is_fullscreen() {
            window.set_decorated(false);
            window.set_keep_above(true);
            fullscreen_monitor = fullscreen_at(&window, r.x, r.y);
        }

        let destroyed = hook.clone();
        window.connect_destroy(move |_| destroyed.fire());

        if spec.close_on_escape {
            window.connect_key_press_event(|w, event| {
                if event.keyval() == gdk::keys::constants::Escape {
                    w.close();
                    return glib::Propagation::Stop;
                }
                glib::Propagation::Proceed
            });
        }

        window.show_all();

        let id = self.next_id;
        self.next_id += 1;
        self.windows.insert(
            id,
            GtkWindow {
                window,
                label,
                placeholder: spec.placeholder.to_owned(),
                style: spec.style,
                fullscreen_monitor,
                hook,
            },
        );
        log_debug!("created GTK secondary window {id}");
        Ok(WindowId(id))
    }

    fn destroy_window(&mut self, id: WindowId) -> WindowResult<()> {
        let w = self
            .windows
            .remove(&id.0)
            .ok_or_else(|| format!("window {} no longer exists", id.0))?;
        if !w.hook.is_fired() {
            // SAFETY: the backend holds the only reference to this window.
            unsafe { w.window.destroy() };
        }
        Ok(())
    }

    /// Window managers ignore `move_` on a fullscreen window, so a
    /// fullscreen window is re-fullscreened on the monitor at `(x, y)`.
    fn set_position(&mut self, id: WindowId, x: i32, y: i32) -> WindowResult<()> {
        let w = self.window_mut(id)?;
        w.window.move_(x, y);
        if w.style.is_fullscreen() {
            w.fullscreen_monitor = fullscreen_at(&w.window, x, y);
        }
        Ok(())
    }

    fn set_rect(&mut self, id: WindowId, rect: &Rect) -> WindowResult<()> {
        let w = self.window_mut(id)?;
        w.window.move_(rect.x, rect.y);
        if w.style.is_fullscreen() {
            w.fullscreen_monitor = fullscreen_at(&w.window, rect.x, rect.y);
        } else {
            w.window.resize(rect.width, rect.height);
        }
        Ok(())
    }

    fn set_style(&mut self, id: WindowId, style: WindowStyle) -> WindowResult<()> {
        let w = self.window_mut(id)?;
        let fullscreen = style.is_fullscreen();
        if !fullscreen {
            w.window.unfullscreen();
            w.fullscreen_monitor = None;
        }
        w.window.set_decorated(!fullscreen);
        w.window.set_keep_above(fullscreen);
        w.style = style;
        Ok(())
    }

    fn redraw(&mut self, id: WindowId, content: &str) -> WindowResult<()> {
        let w = self.window(id)?;
        let text = if content.is_empty() {
            w.placeholder.as_str()
        } else {
            content
        };
        w.label.set_text(text);
        w.window.queue_draw();
        Ok(())
    }

    fn pump_events(&mut self) {
        if gtk::is_initialized() {
            while gtk::events_pending() {
                gtk::main_iteration_do(false);
            }
        }
        self.prune();
    }
}

impl Drop for GtkBackend {
    fn drop(&mut self) {
        for (_, w) in self.windows.drain() {
            if !w.hook.is_fired() {
                // SAFETY: the backend holds the only reference to this window.
                unsafe { w.window.destroy() };
            }
        }
    }
}
