//! Tabview configuration system.
//!
//! Provides TOML-based configuration for the content controller, the
//! progress reporter and the replay binary. All config sections use
//! sensible defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use tabview_config::load_config;
//!
//! let config = load_config().expect("failed to load config");
//! println!("default zoom: {}%", config.content.default_zoom);
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::TabviewConfig;

use std::path::Path;
use tabview_common::ConfigError;

/// Load the config from the platform default path, seeding it from the
/// template on first run. Values out of range are an error.
pub fn load_config() -> Result<TabviewConfig, ConfigError> {
    let path = toml_loader::default_config_path()?;
    validated(toml_loader::read_or_seed(&path)?)
}

/// Load the config at an explicit path. Values out of range are an error.
pub fn load_config_from(path: &Path) -> Result<TabviewConfig, ConfigError> {
    validated(toml_loader::read_from_path(path)?)
}

fn validated(config: TabviewConfig) -> Result<TabviewConfig, ConfigError> {
    validation::validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let text = toml::to_string(&TabviewConfig::default()).unwrap();
        for section in ["[history]", "[content]", "[progress]", "[downloads]", "[search]", "[logging]"] {
            assert!(text.contains(section), "missing {section}");
        }

        let parsed: TabviewConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.content.default_zoom, 100);
        assert_eq!(parsed.progress.geometry_debounce_ms, 50);
        assert_eq!(parsed.search.default_engine, "duckduckgo");
    }

    #[test]
    fn load_config_from_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[content]\ndefault_zoom = 5\n").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn load_config_from_accepts_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[content]\nhome_page = \"https://start.example/\"\n").unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.content.home_page, "https://start.example/");
    }
}
