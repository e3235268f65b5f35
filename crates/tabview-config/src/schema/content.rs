//! Content controller configuration types.

use serde::{Deserialize, Serialize};

/// Whether plugins may run in the current profile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum PluginPolicy {
    /// Plugins load without asking.
    Enabled,
    /// Click-to-play: plugins stay as placeholders until the user authorizes them.
    #[default]
    OnDemand,
    /// Plugins never run.
    Disabled,
}

/// What to do when a page asks to close its own window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum WindowClosePolicy {
    Allow,
    #[default]
    Ask,
    Deny,
}

/// Content controller behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Zoom applied to fresh navigations, in percent (valid range: min_zoom-max_zoom).
    pub default_zoom: u32,
    /// Step used by zoom in / zoom out actions (valid range: 1-100).
    pub zoom_step: u32,
    /// Lower zoom bound in percent (valid range: 10-100).
    pub min_zoom: u32,
    /// Upper zoom bound in percent (valid range: 100-10000).
    pub max_zoom: u32,
    pub plugins: PluginPolicy,
    pub window_close: WindowClosePolicy,
    pub home_page: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            default_zoom: 100,
            zoom_step: 10,
            min_zoom: 10,
            max_zoom: 10000,
            plugins: PluginPolicy::OnDemand,
            window_close: WindowClosePolicy::Ask,
            home_page: "about:blank".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_config_defaults() {
        let config = ContentConfig::default();
        assert_eq!(config.default_zoom, 100);
        assert_eq!(config.zoom_step, 10);
        assert_eq!(config.min_zoom, 10);
        assert_eq!(config.max_zoom, 10000);
        assert_eq!(config.plugins, PluginPolicy::OnDemand);
        assert_eq!(config.window_close, WindowClosePolicy::Ask);
        assert_eq!(config.home_page, "about:blank");
    }

    #[test]
    fn content_config_partial_toml() {
        let toml_str = r#"
default_zoom = 125
plugins = "enabled"
window_close = "deny"
"#;
        let config: ContentConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.default_zoom, 125);
        assert_eq!(config.plugins, PluginPolicy::Enabled);
        assert_eq!(config.window_close, WindowClosePolicy::Deny);
        // Defaults preserved
        assert_eq!(config.zoom_step, 10);
    }
}
