//! Full configuration validation.
//!
//! Validates numeric ranges and search engine definitions. Each domain has
//! its own submodule; this orchestrator calls them all and collects errors
//! into a single `ConfigError`.

mod content;
mod helpers;
mod progress;
mod search;

#[cfg(test)]
mod tests;

use crate::schema::TabviewConfig;
use tabview_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &TabviewConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    content::validate_content(&mut errors, config);
    progress::validate_progress(&mut errors, config);
    progress::validate_downloads(&mut errors, config);
    search::validate_search(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
