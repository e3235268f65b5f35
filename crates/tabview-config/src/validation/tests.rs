//! Tests for the full validation pipeline.

use super::*;
use crate::schema::*;

#[test]
fn default_config_validates() {
    let config = TabviewConfig::default();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_default_zoom_below_min() {
    let mut config = TabviewConfig::default();
    config.content.default_zoom = 5;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("content.default_zoom"));
}

#[test]
fn catches_default_zoom_above_configured_max() {
    let mut config = TabviewConfig::default();
    config.content.max_zoom = 300;
    config.content.default_zoom = 400;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("content.default_zoom"));
}

#[test]
fn catches_zero_zoom_step() {
    let mut config = TabviewConfig::default();
    config.content.zoom_step = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("content.zoom_step"));
}

#[test]
fn catches_empty_home_page() {
    let mut config = TabviewConfig::default();
    config.content.home_page = "  ".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("content.home_page"));
}

#[test]
fn catches_bar_height_out_of_range() {
    let mut config = TabviewConfig::default();
    config.progress.bar_height = 8;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("progress.bar_height"));
}

#[test]
fn catches_zero_debounce() {
    let mut config = TabviewConfig::default();
    config.progress.geometry_debounce_ms = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("progress.geometry_debounce_ms"));
}

#[test]
fn catches_flush_interval_too_small() {
    let mut config = TabviewConfig::default();
    config.downloads.flush_interval_ms = 1;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("downloads.flush_interval_ms"));
}

#[test]
fn catches_duplicate_engine_ids() {
    let mut config = TabviewConfig::default();
    let dup = config.search.engines[0].clone();
    config.search.engines.push(dup);
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("duplicate engine id 'duckduckgo'"));
}

#[test]
fn catches_missing_placeholder() {
    let mut config = TabviewConfig::default();
    config.search.engines[1].url_template = "https://example.com/search".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("search.engines.wikipedia"));
}

#[test]
fn post_engine_needs_placeholder_in_body() {
    let mut config = TabviewConfig::default();
    config.search.engines.push(SearchEngineConfig {
        id: "startpage".into(),
        title: "Startpage".into(),
        url_template: "https://www.startpage.com/do/search".into(),
        method: SearchMethod::Post,
        post_template: Some("query={searchTerms}".into()),
    });
    assert!(validate(&config).is_ok());

    config.search.engines.last_mut().unwrap().post_template = None;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("search.engines.startpage"));
}

#[test]
fn catches_unknown_default_engine() {
    let mut config = TabviewConfig::default();
    config.search.default_engine = "altavista".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("search.default_engine"));
}

#[test]
fn collects_multiple_errors() {
    let mut config = TabviewConfig::default();
    config.progress.bar_height = 1;
    config.downloads.flush_interval_ms = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("progress.bar_height"));
    assert!(err.contains("downloads.flush_interval_ms"));
    assert!(err.contains("; "));
}
