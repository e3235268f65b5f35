use std::path::PathBuf;

use tabview_common::ConfigError;

const APP_DIR: &str = "tabview";
const CONFIG_FILE: &str = "config.toml";

/// `<platform config dir>/tabview/config.toml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
        .ok_or_else(|| ConfigError::ParseError("no platform config directory".into()))
}
