use std::path::PathBuf;

use super::Config;

/// Returns the config directory: `~/.config/projector/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("projector"))
}

/// Returns the config file path: `~/.config/projector/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Tries to load and parse `config.toml`.
///
/// Returns `Ok(None)` when the file does not exist, `Ok(Some(Config))` on
/// success, or an error string describing what went wrong.
pub fn try_load() -> Result<Option<Config>, String> {
    let path = config_path().ok_or("could not determine config path")?;
    let content = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(format!("{}: {e}", path.display())),
    };
    parse(&content)
        .map(Some)
        .map_err(|e| format!("{}: {e}", path.display()))
}

/// Loads the configuration from disk, falling back to defaults.
///
/// After loading, values are clamped to safe ranges via [`Config::validate`].
/// A missing file silently returns defaults; other errors are printed.
pub fn load() -> Config {
    match try_load() {
        Ok(Some(config)) => config,
        Ok(None) => Config::default(),
        Err(e) => {
            eprintln!("Warning: {e}");
            Config::default()
        }
    }
}

/// Parses and validates a config document.
pub(super) fn parse(content: &str) -> Result<Config, toml::de::Error> {
    let mut config: Config = toml::from_str(content)?;
    config.validate();
    Ok(config)
}
