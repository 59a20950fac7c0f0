//! Platform-specific locations for persisted state.

use std::path::PathBuf;

/// Environment variable overriding the configuration home.
pub const CONFIG_HOME_ENV: &str = "DATA_VALIDATION_CONFIG_HOME";

/// Directory name used under the platform config directory.
pub const APP_DIR_NAME: &str = "data-validation";

/// Name of the connections subdirectory.
pub const CONNECTIONS_DIR_NAME: &str = "connections";

/// Default configuration home (e.g. `~/.config/data-validation` on Linux).
#[must_use]
pub fn config_home() -> Option<PathBuf> {
    ::dirs::config_dir()
        .or_else(|| ::dirs::home_dir().map(|h| h.join(".config")))
        .map(|d| d.join(APP_DIR_NAME))
}
