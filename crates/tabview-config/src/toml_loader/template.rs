//! Default TOML config template with inline documentation comments.

use std::path::Path;

use tabview_common::ConfigError;
use tracing::info;

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Tabview Configuration
# Only override what you want to change -- missing fields use defaults.

[history]
# encoding = "keyed"         # keyed | stream

[content]
# default_zoom = 100         # min_zoom-max_zoom
# zoom_step = 10             # 1-100
# min_zoom = 10              # 10-100
# max_zoom = 10000           # 100-10000
# plugins = "on_demand"      # enabled | on_demand | disabled
# window_close = "ask"       # allow | ask | deny
# home_page = "about:blank"

[progress]
# enabled = true
# position = "bottom"        # top | bottom
# bar_height = 30            # 16-64
# geometry_debounce_ms = 50  # 1-1000
# elapsed_interval_ms = 1000 # 100-10000

[downloads]
# flush_interval_ms = 250    # 10-10000

[search]
# default_engine = "duckduckgo"
#
# [[search.engines]]
# id = "startpage"
# title = "Startpage"
# url_template = "https://www.startpage.com/do/search"
# method = "post"
# post_template = "query={searchTerms}"

[logging]
# level = "info"             # trace | debug | info | warn | error
"##
    .to_string()
}

/// Write the commented template to `path`, creating parent directories.
pub fn write_template(path: &Path) -> Result<(), ConfigError> {
    let io_error = |source: std::io::Error| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(io_error)?;
    }
    std::fs::write(path, default_config_toml()).map_err(io_error)?;
    info!(path = %path.display(), "wrote default config");
    Ok(())
}
