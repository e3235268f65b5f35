//! Locating, reading and seeding the TOML config file.
//!
//! Nothing here validates: callers decide whether out-of-range values are
//! fatal (see [`crate::load_config_from`]).

mod loader;
mod paths;
mod template;


pub use loader::{read_from_path, read_or_seed};
pub use paths::default_config_path;
pub use template::write_template;
