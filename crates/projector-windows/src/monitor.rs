use std::mem;

use projector_core::MonitorInfo;
use projector_core::monitor::{UNKNOWN_MONITOR_NAME, reindex};
use windows::Win32::Foundation::{LPARAM, RECT};
use windows::Win32::Graphics::Gdi::{
    EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITORINFO, MONITORINFOEXW,
};
use windows::core::BOOL;

/// `dwFlags` bit set on the primary display.
const MONITORINFOF_PRIMARY: u32 = 0x1;

/// Enumerates every active display in `EnumDisplayMonitors` order.
///
/// Monitors whose info cannot be queried are skipped and the remaining
/// indices are renumbered. Win32 reports no scale factor without per-monitor
/// DPI awareness, so `scale_factor` is always `1.0`.
pub fn enumerate_monitors() -> Vec<MonitorInfo> {
    let mut monitors: Vec<MonitorInfo> = Vec::new();

    // SAFETY: EnumDisplayMonitors runs synchronously and invokes the
    // callback once per monitor. The Vec pointer passed as LPARAM
    // outlives the call.
    let ok = unsafe {
        EnumDisplayMonitors(
            None,
            None,
            Some(monitor_enum_proc),
            LPARAM(&mut monitors as *mut _ as isize),
        )
    };
    if !ok.as_bool() {
        projector_core::log_warn!("EnumDisplayMonitors failed");
    }

    reindex(&mut monitors);
    monitors
}

unsafe extern "system" fn monitor_enum_proc(
    hmonitor: HMONITOR,
    _hdc: HDC,
    _rect: *mut RECT,
    lparam: LPARAM,
) -> BOOL {
    // SAFETY: lparam is the Vec<MonitorInfo> pointer from enumerate_monitors().
    let monitors = unsafe { &mut *(lparam.0 as *mut Vec<MonitorInfo>) };

    let mut info = MONITORINFOEXW::default();
    info.monitorInfo.cbSize = mem::size_of::<MONITORINFOEXW>() as u32;

    // SAFETY: MONITORINFOEXW starts with a MONITORINFO and cbSize tells
    // the API which variant it received.
    let ok = unsafe { GetMonitorInfoW(hmonitor, &mut info as *mut _ as *mut MONITORINFO) };
    if ok.as_bool() {
        let rc = info.monitorInfo.rcMonitor;
        monitors.push(MonitorInfo {
            index: monitors.len(),
            name: device_name(&info.szDevice),
            width: rc.right - rc.left,
            height: rc.bottom - rc.top,
            x: rc.left,
            y: rc.top,
            is_primary: info.monitorInfo.dwFlags & MONITORINFOF_PRIMARY != 0,
            scale_factor: 1.0,
        });
    }

    BOOL(1) // continue enumeration
}

/// Decodes a null-terminated UTF-16 device name such as `\\.\DISPLAY1`.
fn device_name(raw: &[u16]) -> String {
    let len = raw.iter().position(|&c| c == 0).unwrap_or(raw.len());
    if len == 0 {
        return UNKNOWN_MONITOR_NAME.into();
    }
    String::from_utf16_lossy(&raw[..len])
}
