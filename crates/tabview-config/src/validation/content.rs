//! Content controller validation (zoom bounds).

use crate::schema::TabviewConfig;

use super::helpers::validate_range;

pub(crate) fn validate_content(errors: &mut Vec<String>, config: &TabviewConfig) {
    let content = &config.content;
    validate_range(errors, "content.min_zoom", content.min_zoom, 10, 100);
    validate_range(errors, "content.max_zoom", content.max_zoom, 100, 10000);
    validate_range(errors, "content.zoom_step", content.zoom_step, 1, 100);
    validate_range(
        errors,
        "content.default_zoom",
        content.default_zoom,
        content.min_zoom,
        content.max_zoom,
    );
    if content.home_page.trim().is_empty() {
        errors.push("content.home_page must not be empty".into());
    }
}
