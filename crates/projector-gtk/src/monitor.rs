use gtk::gdk::prelude::MonitorExt;
use gtk::gdk::{self, Display};
use projector_core::MonitorInfo;
use projector_core::monitor::{UNKNOWN_MONITOR_NAME, reindex};

/// Enumerates the monitors of the default display in GDK order.
///
/// Returns an empty list when there is no default display (no X11 or
/// Wayland session). GTK must already be initialized.
pub(crate) fn enumerate_monitors() -> Vec<MonitorInfo> {
    let Some(display) = Display::default() else {
        projector_core::log_warn!("no default GDK display");
        return Vec::new();
    };

    let mut monitors: Vec<MonitorInfo> = (0..display.n_monitors())
        .filter_map(|i| display.monitor(i))
        .map(|m| monitor_info(&m))
        .collect();

    reindex(&mut monitors);
    monitors
}

fn monitor_info(monitor: &gdk::Monitor) -> MonitorInfo {
    let geometry = monitor.geometry();
    MonitorInfo {
        index: 0,
        name: monitor
            .model()
            .map(|s| s.to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| UNKNOWN_MONITOR_NAME.into()),
        width: geometry.width(),
        height: geometry.height(),
        x: geometry.x(),
        y: geometry.y(),
        is_primary: monitor.is_primary(),
        scale_factor: f64::from(monitor.scale_factor()),
    }
}

/// GDK number of the monitor whose origin is `(x, y)`.
pub(crate) fn monitor_number_at(display: &Display, x: i32, y: i32) -> Option<i32> {
    (0..display.n_monitors()).find(|&i| {
        display.monitor(i).is_some_and(|m| {
            let g = m.geometry();
            g.x() == x && g.y() == y
        })
    })
}
