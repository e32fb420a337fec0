//! Commented default `config.toml` written by `projector init`.

use super::{DEFAULT_PLACEHOLDER, DEFAULT_TITLE};

/// Generates the default `config.toml` with every option explained.
pub fn generate_config() -> String {
    format!(
        r#"# Projector configuration
# Every setting is optional; removed keys fall back to the defaults shown.

# Backend variant: "native" uses the platform windowing system (Win32 or
# GTK), "disabled" answers every call without opening windows.
backend = "native"

[window]
# Caption of the secondary window.
title = "{DEFAULT_TITLE}"
# Text painted on the black background until content is pushed.
placeholder = "{DEFAULT_PLACEHOLDER}"
# Close the secondary window when Escape is pressed inside it.
close_on_escape = true

[monitors]
# "on-open": monitors are enumerated by getMonitors and openSecondaryWindow;
#            moveToMonitor / setFullscreenOnMonitor use that snapshot.
# "always":  re-enumerate before every monitor-indexed operation.
refresh = "on-open"

[log]
# Write logs to ~/.config/projector/logs/projector.log
enabled = false
# "debug", "info", "warn", or "error"
level = "info"
# Rotate after this many megabytes (one backup is kept).
max_file_mb = 10
"#
    )
}
