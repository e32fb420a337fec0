use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::c_void;

use projector_core::{
    CloseHook, DisplayBackend, MonitorInfo, Rect, WindowId, WindowResult, WindowSpec, WindowStyle,
    log_debug,
};
use windows::Win32::Foundation::HWND;
use windows::Win32::Graphics::Gdi::{InvalidateRect, UpdateWindow};
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DestroyWindow, DispatchMessageW, GWL_EXSTYLE, GWL_STYLE, GWLP_USERDATA,
    HWND_NOTOPMOST, HWND_TOPMOST, IsWindow, MSG, PM_REMOVE, PeekMessageW, SW_SHOW,
    SWP_FRAMECHANGED, SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE, SWP_NOZORDER, SWP_SHOWWINDOW,
    SetWindowLongPtrW, SetWindowPos, ShowWindow, TranslateMessage, WS_VISIBLE,
};
use windows::core::PCWSTR;

use crate::monitor::enumerate_monitors;
use crate::window::{self, CLASS_NAME, WindowState};

/// Win32 implementation of [`DisplayBackend`].
///
/// Owns the per-window state that the window procedure reads through
/// `GWLP_USERDATA`. Entries are dropped once their window is destroyed.
#[derive(Default)]
pub struct Win32Backend {
    windows: HashMap<usize, Box<WindowState>>,
}

impl Win32Backend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops state for windows the OS has already destroyed.
    fn prune(&mut self) {
        self.windows.retain(|_, state| !state.hook.is_fired());
    }
}

fn hwnd_of(id: WindowId) -> HWND {
    HWND(id.0 as *mut c_void)
}

/// Resolves `id` to a window handle that still exists.
fn live_hwnd(id: WindowId) -> WindowResult<HWND> {
    let hwnd = hwnd_of(id);
    // SAFETY: IsWindow accepts any handle value.
    if unsafe { IsWindow(Some(hwnd)) }.as_bool() {
        Ok(hwnd)
    } else {
        Err(format!("window 0x{:X} no longer exists", id.0).into())
    }
}

fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

impl DisplayBackend for Win32Backend {
    fn name(&self) -> &'static str {
        "win32"
    }

    fn initialize(&mut self) -> WindowResult<()> {
        window::ensure_class_registered()
    }

    fn monitors(&mut self) -> Vec<MonitorInfo> {
        enumerate_monitors()
    }

    fn create_window(&mut self, spec: &WindowSpec<'_>, hook: CloseHook) -> WindowResult<WindowId> {
        window::ensure_class_registered()?;
        self.prune();

        let state = Box::new(WindowState {
            hook,
            placeholder: spec.placeholder.to_owned(),
            content: RefCell::new(String::new()),
            close_on_escape: spec.close_on_escape,
        });
        let (style, ex) = window::styles_for(spec.style);
        let title = to_wide(spec.title);
        let r = spec.rect;

        // SAFETY: the class is registered and `state` is boxed, so the
        // pointer handed to WM_NCCREATE stays valid while `self.windows`
        // holds it.
        let hwnd = unsafe {
            CreateWindowExW(
                ex,
                PCWSTR(CLASS_NAME.as_ptr()),
                PCWSTR(title.as_ptr()),
                style,
                r.x,
                r.y,
                r.width,
                r.height,
                None,
                None,
                None,
                Some(window::create_param(&state)),
            )?
        };

        // SAFETY: hwnd was just created on this thread.
        unsafe {
            let _ = ShowWindow(hwnd, SW_SHOW);
            let _ = UpdateWindow(hwnd);
        }

        let id = hwnd.0 as usize;
        self.windows.insert(id, state);
        log_debug!("created secondary window 0x{id:X}");
        Ok(WindowId(id))
    }

    fn destroy_window(&mut self, id: WindowId) -> WindowResult<()> {
        let hwnd = match live_hwnd(id) {
            Ok(hwnd) => hwnd,
            Err(e) => {
                self.windows.remove(&id.0);
                return Err(e);
            }
        };

        // SAFETY: WM_DESTROY runs synchronously and reads state that is
        // still owned by `self.windows`. On failure the window keeps
        // pointing at that state, so it stays owned.
        unsafe { DestroyWindow(hwnd) }?;
        self.windows.remove(&id.0);
        Ok(())
    }

    fn set_position(&mut self, id: WindowId, x: i32, y: i32) -> WindowResult<()> {
        let hwnd = live_hwnd(id)?;
        // SAFETY: hwnd is a live window owned by this thread.
        unsafe {
            SetWindowPos(
                hwnd,
                None,
                x,
                y,
                0,
                0,
                SWP_NOSIZE | SWP_NOZORDER | SWP_NOACTIVATE,
            )?;
        }
        Ok(())
    }

    fn set_rect(&mut self, id: WindowId, rect: &Rect) -> WindowResult<()> {
        let hwnd = live_hwnd(id)?;
        // SAFETY: hwnd is a live window owned by this thread.
        unsafe {
            SetWindowPos(
                hwnd,
                None,
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                SWP_NOZORDER | SWP_SHOWWINDOW,
            )?;
        }
        Ok(())
    }

    fn set_style(&mut self, id: WindowId, style: WindowStyle) -> WindowResult<()> {
        let hwnd = live_hwnd(id)?;
        let (ws, ex) = window::styles_for(style);
        let after = if style.is_fullscreen() {
            HWND_TOPMOST
        } else {
            HWND_NOTOPMOST
        };

        // SAFETY: hwnd is a live window owned by this thread. SWP_FRAMECHANGED
        // makes the new styles take effect.
        unsafe {
            SetWindowLongPtrW(hwnd, GWL_STYLE, (ws | WS_VISIBLE).0 as isize);
            SetWindowLongPtrW(hwnd, GWL_EXSTYLE, ex.0 as isize);
            SetWindowPos(
                hwnd,
                Some(after),
                0,
                0,
                0,
                0,
                SWP_NOMOVE | SWP_NOSIZE | SWP_FRAMECHANGED | SWP_SHOWWINDOW,
            )?;
        }
        Ok(())
    }

    fn redraw(&mut self, id: WindowId, content: &str) -> WindowResult<()> {
        let hwnd = live_hwnd(id)?;
        if let Some(state) = self.windows.get(&id.0) {
            *state.content.borrow_mut() = content.to_owned();
        }
        // SAFETY: hwnd is a live window owned by this thread.
        unsafe {
            let _ = InvalidateRect(Some(hwnd), None, true);
        }
        Ok(())
    }

    fn pump_events(&mut self) {
        let mut msg = MSG::default();
        // SAFETY: standard non-blocking message pump on the owning thread.
        unsafe {
            while PeekMessageW(&mut msg, None, 0, 0, PM_REMOVE).as_bool() {
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
        }
        self.prune();
    }
}

impl Drop for Win32Backend {
    fn drop(&mut self) {
        for id in self.windows.keys().copied().collect::<Vec<_>>() {
            let _ = self.destroy_window(WindowId(id));
        }
        // Windows that refused to die must stop pointing at state freed here.
        for id in self.windows.keys() {
            if let Ok(hwnd) = live_hwnd(WindowId(*id)) {
                // SAFETY: clears a user-data slot this backend set.
                unsafe { SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0) };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;
    use std::thread;

    use windows::Win32::UI::WindowsAndMessaging::{WINDOW_EX_STYLE, WS_POPUP};

    use super::*;

    #[test]
    fn wide_strings_are_null_terminated() {
        assert_eq!(to_wide("ab"), vec![b'a' as u16, b'b' as u16, 0]);
        assert_eq!(to_wide(""), vec![0]);
    }

    #[test]
    fn stale_window_id_is_an_error() {
        // Arrange
        let mut backend = Win32Backend::new();

        // Act
        let result = backend.set_position(WindowId(0), 10, 10);

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn failed_destroy_keeps_window_state() {
        // Arrange: a live window owned by another thread, which this
        // thread is not allowed to destroy.
        window::ensure_class_registered().unwrap();
        let (created_tx, created_rx) = mpsc::channel();
        let (done_tx, done_rx) = mpsc::channel::<()>();
        let owner = thread::spawn(move || {
            let hwnd = unsafe {
                CreateWindowExW(
                    WINDOW_EX_STYLE::default(),
                    PCWSTR(CLASS_NAME.as_ptr()),
                    PCWSTR::null(),
                    WS_POPUP,
                    0,
                    0,
                    10,
                    10,
                    None,
                    None,
                    None,
                    None,
                )
            }
            .unwrap();
            created_tx.send(hwnd.0 as usize).unwrap();
            let _ = done_rx.recv();
            unsafe {
                let _ = DestroyWindow(hwnd);
            }
        });
        let raw = created_rx.recv().unwrap();

        let mut backend = Win32Backend::new();
        backend.windows.insert(
            raw,
            Box::new(WindowState {
                hook: CloseHook::new(),
                placeholder: String::new(),
                content: RefCell::new(String::new()),
                close_on_escape: false,
            }),
        );

        // Act
        let result = backend.destroy_window(WindowId(raw));

        // Assert
        assert!(result.is_err());
        assert!(backend.windows.contains_key(&raw));

        backend.windows.clear();
        done_tx.send(()).unwrap();
        owner.join().unwrap();
    }

    #[test]
    fn initialize_is_idempotent() {
        let mut backend = Win32Backend::new();

        assert!(backend.initialize().is_ok());
        assert!(backend.initialize().is_ok());
    }
}
