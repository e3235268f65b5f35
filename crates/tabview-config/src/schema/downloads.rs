//! Deferred download configuration.

use serde::{Deserialize, Serialize};

/// Settings for transfers intercepted from page loads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadsConfig {
    /// How often queued transfers are retried while the page is still
    /// navigating, in milliseconds (valid range: 10-10000).
    pub flush_interval_ms: u64,
}

impl Default for DownloadsConfig {
    fn default() -> Self {
        Self {
            flush_interval_ms: 250,
        }
    }
}
