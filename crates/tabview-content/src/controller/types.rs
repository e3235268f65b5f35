use std::time::Duration;

use tabview_config::schema::{
    HistoryEncoding, PluginPolicy, ProgressBarPosition, SearchConfig, WindowClosePolicy,
};
use tabview_config::TabviewConfig;

/// Settings a controller is created with.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Codec used by `encode_history` / `restore_history`.
    pub history_encoding: HistoryEncoding,
    /// Zoom of the first navigation and of `zoom_original`, in percent.
    pub default_zoom: u32,
    pub zoom_step: u32,
    pub min_zoom: u32,
    pub max_zoom: u32,
    pub plugins: PluginPolicy,
    pub window_close: WindowClosePolicy,
    /// Target of `go_home`.
    pub home_page: String,
    pub search: SearchConfig,
    /// Period of the deferred-transfer flush timer.
    pub flush_interval: Duration,
    pub progress_position: ProgressBarPosition,
    /// Height of the progress bar anchor in pixels.
    pub progress_bar_height: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::from(&TabviewConfig::default())
    }
}

impl From<&TabviewConfig> for ControllerConfig {
    fn from(config: &TabviewConfig) -> Self {
        Self {
            history_encoding: config.history.encoding,
            default_zoom: config.content.default_zoom,
            zoom_step: config.content.zoom_step,
            min_zoom: config.content.min_zoom,
            max_zoom: config.content.max_zoom,
            plugins: config.content.plugins,
            window_close: config.content.window_close,
            home_page: config.content.home_page.clone(),
            search: config.search.clone(),
            flush_interval: Duration::from_millis(config.downloads.flush_interval_ms),
            progress_position: config.progress.position,
            progress_bar_height: config.progress.bar_height,
        }
    }
}

impl ControllerConfig {
    /// Clamp a zoom level into the configured bounds.
    pub fn clamp_zoom(&self, zoom: u32) -> u32 {
        zoom.clamp(self.min_zoom, self.max_zoom.max(self.min_zoom))
    }
}
