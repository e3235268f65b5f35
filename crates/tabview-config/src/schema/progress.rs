//! Progress reporter configuration types.

use serde::{Deserialize, Serialize};

/// Edge of the content surface the progress bar docks to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum ProgressBarPosition {
    Top,
    #[default]
    Bottom,
}

/// Progress reporter appearance and timing.
///
/// The reporter is an overlay docked to the content surface while a page
/// loads, showing element counts, transferred size, speed and elapsed time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    /// Whether the reporter is shown at all.
    pub enabled: bool,
    pub position: ProgressBarPosition,
    /// Height in pixels (valid range: 16-64).
    pub bar_height: u32,
    /// Debounce window for geometry updates in milliseconds (valid range: 1-1000).
    pub geometry_debounce_ms: u64,
    /// Elapsed-time refresh period in milliseconds (valid range: 100-10000).
    pub elapsed_interval_ms: u64,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            position: ProgressBarPosition::Bottom,
            bar_height: 30,
            geometry_debounce_ms: 50,
            elapsed_interval_ms: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_config_defaults() {
        let config = ProgressConfig::default();
        assert!(config.enabled);
        assert_eq!(config.position, ProgressBarPosition::Bottom);
        assert_eq!(config.bar_height, 30);
        assert_eq!(config.geometry_debounce_ms, 50);
        assert_eq!(config.elapsed_interval_ms, 1000);
    }

    #[test]
    fn progress_config_partial_toml() {
        let toml_str = r#"
position = "top"
bar_height = 24
"#;
        let config: ProgressConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.position, ProgressBarPosition::Top);
        assert_eq!(config.bar_height, 24);
        assert_eq!(config.geometry_debounce_ms, 50);
    }
}
