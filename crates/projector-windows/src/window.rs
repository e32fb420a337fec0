use std::cell::RefCell;
use std::ffi::c_void;
use std::sync::OnceLock;

use projector_core::{CloseHook, WindowResult, WindowStyle};
use windows::Win32::Foundation::{
    COLORREF, ERROR_CLASS_ALREADY_EXISTS, GetLastError, HWND, LPARAM, LRESULT, RECT, WPARAM,
};
use windows::Win32::Graphics::Gdi::{
    BLACK_BRUSH, BeginPaint, DT_CENTER, DT_NOPREFIX, DT_SINGLELINE, DT_VCENTER, DrawTextW,
    EndPaint, FillRect, GetStockObject, HBRUSH, PAINTSTRUCT, SetBkMode, SetTextColor, TRANSPARENT,
};
use windows::Win32::UI::Input::KeyboardAndMouse::VK_ESCAPE;
use windows::Win32::UI::WindowsAndMessaging::{
    CREATESTRUCTW, DefWindowProcW, DestroyWindow, GWLP_USERDATA, GetClientRect,
    GetWindowLongPtrW, IDC_ARROW, LoadCursorW, RegisterClassW, SetWindowLongPtrW, WINDOW_EX_STYLE,
    WINDOW_STYLE, WM_DESTROY, WM_ERASEBKGND, WM_KEYDOWN, WM_NCCREATE, WM_NCDESTROY, WM_PAINT,
    WNDCLASSW, WS_EX_APPWINDOW, WS_EX_TOPMOST, WS_OVERLAPPEDWINDOW, WS_POPUP,
};
use windows::core::PCWSTR;

/// Registered window class atom. Set once, on the first successful registration.
static CLASS_ATOM: OnceLock<u16> = OnceLock::new();

/// `ProjectorSecondaryWindow`, null-terminated.
pub(crate) const CLASS_NAME: &[u16] = &[
    b'P' as u16,
    b'r' as u16,
    b'o' as u16,
    b'j' as u16,
    b'e' as u16,
    b'c' as u16,
    b't' as u16,
    b'o' as u16,
    b'r' as u16,
    b'S' as u16,
    b'e' as u16,
    b'c' as u16,
    b'o' as u16,
    b'n' as u16,
    b'd' as u16,
    b'a' as u16,
    b'r' as u16,
    b'y' as u16,
    b'W' as u16,
    b'i' as u16,
    b'n' as u16,
    b'd' as u16,
    b'o' as u16,
    b'w' as u16,
    0,
];

/// White text on the black placeholder background.
const TEXT_COLOR: COLORREF = COLORREF(0x00FF_FFFF);

/// Per-window data reachable from the window procedure through
/// `GWLP_USERDATA`.
///
/// The backend owns the allocation; the window procedure only borrows it
/// and clears the slot on `WM_NCDESTROY`.
pub(crate) struct WindowState {
    pub hook: CloseHook,
    pub placeholder: String,
    pub content: RefCell<String>,
    pub close_on_escape: bool,
}

impl WindowState {
    /// Text to paint: pushed content, or the placeholder when there is none.
    fn text(&self) -> Vec<u16> {
        let content = self.content.borrow();
        let text = if content.is_empty() {
            self.placeholder.as_str()
        } else {
            content.as_str()
        };
        text.encode_utf16().collect()
    }
}

/// Window and extended styles for a presentation style.
pub(crate) fn styles_for(style: WindowStyle) -> (WINDOW_STYLE, WINDOW_EX_STYLE) {
    match style {
        WindowStyle::Fullscreen => (WS_POPUP, WS_EX_TOPMOST),
        WindowStyle::Windowed => (WS_OVERLAPPEDWINDOW, WS_EX_APPWINDOW),
    }
}

/// Registers the secondary window class.
///
/// Idempotent: later calls return immediately, and a class left behind by
/// an earlier registration in this process counts as success.
pub(crate) fn ensure_class_registered() -> WindowResult<()> {
    if CLASS_ATOM.get().is_some() {
        return Ok(());
    }

    let wc = WNDCLASSW {
        lpfnWndProc: Some(secondary_wnd_proc),
        lpszClassName: PCWSTR(CLASS_NAME.as_ptr()),
        // SAFETY: loading a stock system cursor.
        hCursor: unsafe { LoadCursorW(None, IDC_ARROW) }.unwrap_or_default(),
        ..Default::default()
    };

    // SAFETY: wc points at a static class name and a valid window procedure.
    let atom = unsafe { RegisterClassW(&wc) };
    if atom == 0 {
        // SAFETY: reads the calling thread's last-error value.
        let err = unsafe { GetLastError() };
        if err != ERROR_CLASS_ALREADY_EXISTS {
            return Err(format!("RegisterClassW failed with error {}", err.0).into());
        }
    }

    let _ = CLASS_ATOM.set(atom);
    Ok(())
}

/// Returns the state attached to `hwnd`, if any.
///
/// # Safety
///
/// The pointer in `GWLP_USERDATA` must be null or point at a live
/// `WindowState` owned by the backend.
unsafe fn state<'a>(hwnd: HWND) -> Option<&'a WindowState> {
    let ptr = unsafe { GetWindowLongPtrW(hwnd, GWLP_USERDATA) } as *const WindowState;
    unsafe { ptr.as_ref() }
}

unsafe extern "system" fn secondary_wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    unsafe {
        match msg {
            WM_NCCREATE => {
                // Stash the state pointer passed through CreateWindowExW.
                let create = &*(lparam.0 as *const CREATESTRUCTW);
                SetWindowLongPtrW(hwnd, GWLP_USERDATA, create.lpCreateParams as isize);
                DefWindowProcW(hwnd, msg, wparam, lparam)
            }
            WM_ERASEBKGND => LRESULT(1),
            WM_PAINT => {
                paint(hwnd);
                LRESULT(0)
            }
            WM_KEYDOWN if wparam.0 == usize::from(VK_ESCAPE.0) => {
                if state(hwnd).is_some_and(|s| s.close_on_escape) {
                    let _ = DestroyWindow(hwnd);
                    return LRESULT(0);
                }
                DefWindowProcW(hwnd, msg, wparam, lparam)
            }
            WM_DESTROY => {
                if let Some(s) = state(hwnd) {
                    s.hook.fire();
                }
                LRESULT(0)
            }
            WM_NCDESTROY => {
                SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0);
                DefWindowProcW(hwnd, msg, wparam, lparam)
            }
            _ => DefWindowProcW(hwnd, msg, wparam, lparam),
        }
    }
}

/// Fills the client area black and draws the text centered in white.
unsafe fn paint(hwnd: HWND) {
    unsafe {
        let mut ps = PAINTSTRUCT::default();
        let hdc = BeginPaint(hwnd, &mut ps);
        if hdc.is_invalid() {
            return;
        }

        let mut rect = RECT::default();
        let _ = GetClientRect(hwnd, &mut rect);
        let _ = FillRect(hdc, &rect, HBRUSH(GetStockObject(BLACK_BRUSH).0));

        if let Some(s) = state(hwnd) {
            let mut text = s.text();
            let _ = SetTextColor(hdc, TEXT_COLOR);
            let _ = SetBkMode(hdc, TRANSPARENT);
            let _ = DrawTextW(
                hdc,
                &mut text,
                &mut rect,
                DT_CENTER | DT_VCENTER | DT_SINGLELINE | DT_NOPREFIX,
            );
        }

        let _ = EndPaint(hwnd, &ps);
    }
}

/// Converts a state reference into the `lpParam` for `CreateWindowExW`.
pub(crate) fn create_param(state: &WindowState) -> *const c_void {
    state as *const WindowState as *const c_void
}
