//! Configuration schema types for Tabview.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the defaults documented on each field.

mod content;
mod downloads;
mod history;
mod progress;
mod search;
mod system;

pub use content::*;
pub use downloads::*;
pub use history::*;
pub use progress::*;
pub use search::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Root configuration for Tabview.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct TabviewConfig {
    pub history: HistoryConfig,
    pub content: ContentConfig,
    pub progress: ProgressConfig,
    pub downloads: DownloadsConfig,
    pub search: SearchConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================
