//! Progress reporter and download timing validation.

use crate::schema::TabviewConfig;

use super::helpers::validate_range;

pub(crate) fn validate_progress(errors: &mut Vec<String>, config: &TabviewConfig) {
    let progress = &config.progress;
    validate_range(errors, "progress.bar_height", progress.bar_height, 16, 64);
    validate_range(
        errors,
        "progress.geometry_debounce_ms",
        progress.geometry_debounce_ms,
        1,
        1000,
    );
    validate_range(
        errors,
        "progress.elapsed_interval_ms",
        progress.elapsed_interval_ms,
        100,
        10000,
    );
}

pub(crate) fn validate_downloads(errors: &mut Vec<String>, config: &TabviewConfig) {
    validate_range(
        errors,
        "downloads.flush_interval_ms",
        config.downloads.flush_interval_ms,
        10,
        10000,
    );
}
