//! Scenario files: a timed list of user operations and engine callbacks.
//!
//! ```json
//! { "name": "basic", "steps": [
//!     { "op": "set_url", "url": "https://example.com/", "typed": true },
//!     { "op": "navigation_committed", "url": "https://example.com/", "after_ms": 120 },
//!     { "op": "load_finished", "after_ms": 900 }
//! ] }
//! ```

use std::path::Path;

use serde::Deserialize;
use tabview_common::{FrameId, NetworkError, Point, Rect, TabviewError};
use tabview_content::{
    ActionParameters, ContentController, Feature, FindFlags, HeadlessEngine, LoadStatus,
    MemoryTransferSink, NavigationKind, PermissionDecision, ResponseInfo, SourceRequestId,
};

pub type ReplayController = ContentController<HeadlessEngine, MemoryTransferSink>;

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self, TabviewError> {
        serde_json::from_str(json).map_err(|e| TabviewError::Scenario(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, TabviewError> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| TabviewError::Scenario(format!("{}: {e}", path.display())))
    }
}

/// One operation, applied `after_ms` after the previous step.
#[derive(Debug, Clone, Deserialize)]
pub struct Step {
    #[serde(default)]
    pub after_ms: u64,
    #[serde(flatten)]
    pub op: Op,
}

fn default_kind() -> NavigationKind {
    NavigationKind::Link
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Op {
    // -- User operations --
    SetUrl {
        url: String,
        #[serde(default)]
        typed: bool,
    },
    GoToHistoryIndex {
        index: usize,
    },
    GoBack,
    GoForward,
    GoHome,
    RemoveHistoryIndex {
        index: usize,
        #[serde(default)]
        purge: bool,
    },
    /// Encode the history and restore it from the bytes.
    RoundTripHistory,
    SetZoom {
        zoom: u32,
    },
    SetScrollPosition {
        x: i32,
        y: i32,
    },
    FindInPage {
        text: String,
        #[serde(default)]
        flags: FindFlags,
    },
    TriggerAction {
        action: String,
        #[serde(default)]
        params: ActionParameters,
    },
    Search {
        query: String,
        #[serde(default)]
        engine: String,
    },
    SaveLink {
        url: String,
    },
    ViewSource,
    ResolvePermission {
        #[serde(default)]
        frame: u64,
        feature: Feature,
        granted: bool,
        #[serde(default)]
        remember: bool,
    },
    SetSurfaceOffset {
        offset: i32,
    },

    // -- Engine state --
    EngineState {
        #[serde(default)]
        document_text: Option<String>,
        #[serde(default)]
        undo_available: Option<bool>,
        #[serde(default)]
        redo_available: Option<bool>,
    },

    // -- Engine callbacks --
    LoadStarted,
    NavigationCommitted {
        url: String,
        #[serde(default = "default_kind")]
        kind: NavigationKind,
    },
    LoadFinished,
    TitleChanged {
        title: String,
    },
    IconChanged {
        #[serde(default)]
        icon: Option<String>,
    },
    UrlChanged {
        url: String,
    },
    LoadProgress {
        percent: u8,
    },
    LoadMessage {
        message: String,
    },
    Response(ResponseInfo),
    FeatureRequested {
        #[serde(default)]
        frame: u64,
        feature: Feature,
    },
    FeatureCancelled {
        #[serde(default)]
        frame: u64,
        feature: Feature,
    },
    PrintRequested {
        #[serde(default)]
        frame: u64,
    },
    WindowCloseRequested,
    LinkHovered {
        #[serde(default)]
        link: Option<String>,
    },
    ViewportChanged {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
    ScrollChanged {
        x: i32,
        y: i32,
    },
    ZoomChanged {
        zoom: u32,
    },
    PluginRequested {
        #[serde(default)]
        token: Option<String>,
    },
    SourceFetched {
        request: u64,
        #[serde(default)]
        source: Option<String>,
        /// Transport error code; set for failed fetches.
        #[serde(default)]
        error_code: Option<i32>,
    },

    // -- Transport callbacks --
    LoadStatus(LoadStatus),
}

impl Op {
    /// Apply the operation to `controller`.
    pub fn apply(&self, controller: &mut ReplayController) {
        match self {
            Op::SetUrl { url, typed } => controller.set_url(url, *typed),
            Op::GoToHistoryIndex { index } => {
                controller.go_to_history_index(*index);
            }
            Op::GoBack => {
                controller.go_back();
            }
            Op::GoForward => {
                controller.go_forward();
            }
            Op::GoHome => {
                controller.go_home();
            }
            Op::RemoveHistoryIndex { index, purge } => {
                controller.remove_history_index(*index, *purge);
            }
            Op::RoundTripHistory => {
                let bytes = controller.encode_history();
                tracing::info!(bytes = bytes.len(), "history encoded");
                controller.restore_history(&bytes);
            }
            Op::SetZoom { zoom } => controller.set_zoom(*zoom),
            Op::SetScrollPosition { x, y } => controller.set_scroll_position(Point::new(*x, *y)),
            Op::FindInPage { text, flags } => {
                let found = controller.find_in_page(text, *flags);
                tracing::info!(text = %text, found, "find in page");
            }
            Op::TriggerAction { action, params } => {
                controller.trigger_action_by_name(action, params);
            }
            Op::Search { query, engine } => {
                controller.search(query, engine);
            }
            Op::SaveLink { url } => controller.save_link(url),
            Op::ViewSource => {
                controller.view_source();
            }
            Op::ResolvePermission {
                frame,
                feature,
                granted,
                remember,
            } => {
                let decision = PermissionDecision {
                    granted: *granted,
                    remember: *remember,
                };
                controller.resolve_permission(FrameId(*frame), *feature, decision);
            }
            Op::SetSurfaceOffset { offset } => controller.set_surface_offset(*offset),
            Op::EngineState {
                document_text,
                undo_available,
                redo_available,
            } => {
                let engine = controller.engine_mut();
                if let Some(text) = document_text {
                    engine.document_text = text.clone();
                }
                if let Some(undo) = undo_available {
                    engine.undo_available = *undo;
                }
                if let Some(redo) = redo_available {
                    engine.redo_available = *redo;
                }
            }
            Op::LoadStarted => controller.on_load_started(),
            Op::NavigationCommitted { url, kind } => controller.on_navigation_committed(url, *kind),
            Op::LoadFinished => controller.on_load_finished(),
            Op::TitleChanged { title } => controller.on_title_changed(title),
            Op::IconChanged { icon } => controller.on_icon_changed(icon.as_deref()),
            Op::UrlChanged { url } => controller.on_url_changed(url),
            Op::LoadProgress { percent } => controller.on_load_progress(*percent),
            Op::LoadMessage { message } => controller.on_load_message(message),
            Op::Response(response) => {
                controller.on_response(response.clone());
            }
            Op::FeatureRequested { frame, feature } => {
                controller.on_feature_requested(FrameId(*frame), *feature)
            }
            Op::FeatureCancelled { frame, feature } => {
                controller.on_feature_cancelled(FrameId(*frame), *feature)
            }
            Op::PrintRequested { frame } => controller.on_print_requested(FrameId(*frame)),
            Op::WindowCloseRequested => controller.on_window_close_requested(),
            Op::LinkHovered { link } => controller.on_link_hovered(link.as_deref()),
            Op::ViewportChanged {
                x,
                y,
                width,
                height,
            } => {
                controller.engine_mut().viewport = Rect::new(*x, *y, *width, *height);
                controller.on_viewport_changed();
            }
            Op::ScrollChanged { x, y } => controller.on_scroll_changed(Point::new(*x, *y)),
            Op::ZoomChanged { zoom } => controller.on_zoom_changed(*zoom),
            Op::PluginRequested { token } => {
                let admission = controller.on_plugin_requested(token.as_deref());
                tracing::info!(?admission, "plugin requested");
            }
            Op::SourceFetched {
                request,
                source,
                error_code,
            } => {
                let result = match error_code {
                    Some(code) => Err(NetworkError::from_code(*code)),
                    None => Ok(source.clone().unwrap_or_default()),
                };
                controller.on_source_fetched(SourceRequestId(*request), result);
            }
            Op::LoadStatus(status) => controller.on_load_status(*status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_steps_with_defaults() {
        let scenario = Scenario::from_json(
            r#"{
                "name": "demo",
                "steps": [
                    { "op": "set_url", "url": "https://example.com/", "typed": true },
                    { "op": "navigation_committed", "url": "https://example.com/", "after_ms": 40 },
                    { "op": "load_status", "finished_requests": 1, "started_requests": 3,
                      "bytes_received": 10, "bytes_total": 20, "speed": 5 },
                    { "op": "feature_requested", "feature": "geolocation" },
                    { "op": "response", "url": "https://example.com/a.zip",
                      "content_type": "application/zip" },
                    { "op": "go_back" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(scenario.name, "demo");
        assert_eq!(scenario.steps.len(), 6);
        assert_eq!(scenario.steps[0].after_ms, 0);
        assert_eq!(scenario.steps[1].after_ms, 40);
        assert!(matches!(
            scenario.steps[1].op,
            Op::NavigationCommitted {
                kind: NavigationKind::Link,
                ..
            }
        ));
        assert!(matches!(
            &scenario.steps[2].op,
            Op::LoadStatus(status) if status.started_requests == 3
        ));
        assert!(matches!(
            scenario.steps[3].op,
            Op::FeatureRequested {
                frame: 0,
                feature: Feature::Geolocation
            }
        ));
        assert!(matches!(&scenario.steps[4].op, Op::Response(r) if !r.is_renderable()));
        assert!(matches!(scenario.steps[5].op, Op::GoBack));
    }

    #[test]
    fn unknown_op_is_a_scenario_error() {
        let err = Scenario::from_json(r#"{"steps":[{"op":"explode"}]}"#).unwrap_err();
        assert!(matches!(err, TabviewError::Scenario(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Scenario::load(Path::new("/nonexistent/scenario.json")).unwrap_err();
        assert!(matches!(err, TabviewError::Io(_)));
    }
}
