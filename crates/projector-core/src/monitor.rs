use serde::{Deserialize, Serialize};

use crate::Rect;

/// Name reported when the OS has no model or device name for a monitor.
pub const UNKNOWN_MONITOR_NAME: &str = "Unknown Monitor";

/// One row of a monitor enumeration.
///
/// `index` is the position in the enumeration that produced this row, not a
/// stable OS identifier. Any topology change (plugging, unplugging, or
/// reordering displays) can make a stored index point at a different
/// physical monitor.
///
/// Field names serialize verbatim as `index`, `name`, `width`, `height`,
/// `x`, `y`, `isPrimary`, `scaleFactor`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorInfo {
    pub index: usize,
    pub name: String,
    pub width: i32,
    pub height: i32,
    pub x: i32,
    pub y: i32,
    pub is_primary: bool,
    pub scale_factor: f64,
}

impl MonitorInfo {
    /// Full geometry of the monitor in virtual-desktop coordinates.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Returns the monitor at `index`, or `None` when the index is negative or
/// past the end of the snapshot.
pub fn monitor_at(monitors: &[MonitorInfo], index: i64) -> Option<&MonitorInfo> {
    let index = usize::try_from(index).ok()?;
    monitors.get(index)
}

/// Returns the monitor flagged as primary, falling back to the first entry.
///
/// Some backends never set `is_primary`; the first monitor stands in then.
pub fn primary_or_first(monitors: &[MonitorInfo]) -> Option<&MonitorInfo> {
    monitors
        .iter()
        .find(|m| m.is_primary)
        .or_else(|| monitors.first())
}

/// Resolves the target monitor for a new secondary window.
///
/// An in-range index wins; anything else falls back to the primary monitor.
/// Returns `None` only when the snapshot is empty.
pub fn resolve_target(monitors: &[MonitorInfo], index: i64) -> Option<&MonitorInfo> {
    monitor_at(monitors, index).or_else(|| primary_or_first(monitors))
}

/// Renumbers a freshly enumerated list so that `index` matches position.
///
/// Backends call this after filtering out monitors the OS failed to describe,
/// which keeps indices contiguous.
pub fn reindex(monitors: &mut [MonitorInfo]) {
    for (i, monitor) in monitors.iter_mut().enumerate() {
        monitor.index = i;
    }
}
