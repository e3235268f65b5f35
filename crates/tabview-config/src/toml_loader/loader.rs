use std::io::ErrorKind;
use std::path::Path;

use tabview_common::ConfigError;
use tracing::debug;

use super::template::write_template;
use crate::schema::TabviewConfig;

/// Read and parse the config at `path`. Absent sections and fields take
/// their defaults.
pub fn read_from_path(path: &Path) -> Result<TabviewConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ConfigError::FileNotFound(path.to_path_buf()),
        _ => ConfigError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let config = toml::from_str(&text)
        .map_err(|e| ConfigError::ParseError(format!("{}: {e}", path.display())))?;
    debug!(path = %path.display(), "config read");
    Ok(config)
}

/// Like [`read_from_path`], but a missing file is seeded with the commented
/// template and the defaults are returned.
pub fn read_or_seed(path: &Path) -> Result<TabviewConfig, ConfigError> {
    match read_from_path(path) {
        Err(ConfigError::FileNotFound(_)) => {
            write_template(path)?;
            Ok(TabviewConfig::default())
        }
        other => other,
    }
}
