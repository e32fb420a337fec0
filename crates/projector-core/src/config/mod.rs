mod loader;
pub mod template;

use serde::{Deserialize, Serialize};

use crate::log::{LogConfig, MAX_FILE_MB};

pub use loader::{config_dir, config_path, load, try_load};

/// Default window title for the secondary window.
pub const DEFAULT_TITLE: &str = "Projector";

/// Default text painted in the secondary window before any content arrives.
pub const DEFAULT_PLACEHOLDER: &str = "Projector Window - Content Will Appear Here";

/// Top-level configuration for Projector.
///
/// Loaded from `~/.config/projector/config.toml`. Missing sections
/// fall back to defaults thanks to `#[serde(default)]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Which backend variant to start with.
    pub backend: BackendKind,
    /// Secondary window appearance and behavior.
    pub window: WindowConfig,
    /// Monitor snapshot handling.
    pub monitors: MonitorConfig,
    /// File logging.
    pub log: LogConfig,
}

/// Backend variant selected at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// The platform's real windowing backend (Win32 or GTK).
    #[default]
    Native,
    /// A stub that reports no monitors and never opens a window.
    Disabled,
}

/// Secondary window settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Title shown in the window's caption and task switcher.
    pub title: String,
    /// Centered text painted until real content is pushed.
    pub placeholder: String,
    /// Whether pressing Escape inside the window closes it.
    pub close_on_escape: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.into(),
            placeholder: DEFAULT_PLACEHOLDER.into(),
            close_on_escape: true,
        }
    }
}

/// Monitor snapshot settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// When indexed operations re-enumerate monitors.
    pub refresh: MonitorRefresh,
}

/// When the controller refreshes its monitor snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MonitorRefresh {
    /// Only `getMonitors` and `openSecondaryWindow` enumerate. Move and
    /// fullscreen calls use the snapshot they find, which may be stale.
    #[default]
    OnOpen,
    /// Every indexed operation re-enumerates first.
    Always,
}

impl Config {
    /// Clamps values to usable ranges.
    pub fn validate(&mut self) {
        if self.window.title.trim().is_empty() {
            self.window.title = DEFAULT_TITLE.into();
        }
        self.log.max_file_mb = self.log.max_file_mb.clamp(1, MAX_FILE_MB);
    }
}
