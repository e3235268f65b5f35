//! Rendering-engine collaborator contract.
//!
//! The engine renders documents and reports back through the controller's
//! `on_*` handler methods; the controller drives it through
//! [`RenderingEngine`].

use std::fmt;

use serde::{Deserialize, Serialize};
use tabview_common::{FrameId, Point, Rect};

/// Feature a page may ask permission for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Notifications,
    Geolocation,
    PointerLock,
    Fullscreen,
    MediaAudio,
    MediaVideo,
    MediaAudioVideo,
}

/// HTTP method of a navigation or transfer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestMethod {
    #[default]
    Get,
    Head,
    Post,
    Put,
    Delete,
}

/// Why a navigation happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationKind {
    /// The user typed the address.
    Typed,
    /// Link activation inside the page.
    Link,
    FormSubmit,
    /// Moving within existing history.
    BackForward,
    Reload,
    /// Restoring a replaced history.
    Restore,
    /// Programmatic navigation.
    Other,
}

impl NavigationKind {
    /// Whether committing this navigation revisits an existing history entry.
    pub fn reuses_entry(&self) -> bool {
        matches!(
            self,
            NavigationKind::BackForward | NavigationKind::Reload | NavigationKind::Restore
        )
    }
}

/// A load handed to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub url: String,
    pub method: RequestMethod,
    pub body: Option<Vec<u8>>,
    pub zoom: u32,
    pub position: Point,
    pub kind: NavigationKind,
}

impl NavigationRequest {
    pub fn get(url: impl Into<String>, zoom: u32, kind: NavigationKind) -> Self {
        Self {
            url: url.into(),
            method: RequestMethod::Get,
            body: None,
            zoom,
            position: Point::default(),
            kind,
        }
    }
}

/// Response metadata the engine reports before rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseInfo {
    pub url: String,
    #[serde(default)]
    pub content_type: Option<String>,
    /// Explicit save intent (`Content-Disposition: attachment` or a save action).
    #[serde(default)]
    pub save_intent: bool,
    #[serde(default)]
    pub method: RequestMethod,
    #[serde(default)]
    pub body: Option<Vec<u8>>,
}

impl ResponseInfo {
    /// Whether the engine can display this response itself.
    pub fn is_renderable(&self) -> bool {
        let Some(content_type) = self.content_type.as_deref() else {
            return true;
        };
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        mime.is_empty()
            || mime.starts_with("text/")
            || mime.starts_with("image/")
            || mime.ends_with("+xml")
            || matches!(
                mime.as_str(),
                "application/xhtml+xml"
                    | "application/xml"
                    | "application/json"
                    | "application/javascript"
            )
    }
}

/// Text search options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FindFlags {
    pub case_sensitive: bool,
    pub backward: bool,
    pub highlight_all: bool,
    pub wrap: bool,
}

/// Editing commands executed against the current document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    Copy,
    Cut,
    Paste,
    /// Paste the given text instead of the clipboard contents.
    PasteText(String),
    SelectAll,
    ClearSelection,
    Undo,
    Redo,
}

/// Identifier of an auxiliary source fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceRequestId(pub u64);

impl fmt::Display for SourceRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "source-{}", self.0)
    }
}

/// Operations the controller needs from a rendering engine.
pub trait RenderingEngine {
    fn load(&mut self, request: &NavigationRequest);

    fn stop(&mut self);

    fn reload(&mut self, bypass_cache: bool);

    fn set_zoom(&mut self, zoom: u32);

    fn set_scroll_position(&mut self, position: Point);

    /// Search the document. An empty `text` clears highlights.
    fn find_text(&mut self, text: &str, flags: FindFlags) -> bool;

    fn execute(&mut self, command: EditCommand);

    fn can_undo(&self) -> bool;

    fn can_redo(&self) -> bool;

    fn has_selection(&self) -> bool;

    /// Deliver the user's decision for a feature request.
    fn resolve_permission(&mut self, frame: FrameId, feature: Feature, granted: bool);

    /// Let placeholders holding `token` instantiate their plugins.
    fn activate_plugins(&mut self, token: &str);

    /// Fetch the raw source of `url`; completion arrives via
    /// `ContentController::on_source_fetched`.
    fn fetch_source(&mut self, request: SourceRequestId, url: &str);

    /// Visible content area in surface coordinates, excluding scrollbars.
    fn viewport(&self) -> Rect;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(content_type: Option<&str>) -> ResponseInfo {
        ResponseInfo {
            url: "https://example.com/file".into(),
            content_type: content_type.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn renderable_content_types() {
        for ct in [
            "text/html",
            "text/html; charset=utf-8",
            "TEXT/PLAIN",
            "image/png",
            "image/svg+xml",
            "application/xhtml+xml",
            "application/rss+xml",
            "application/json",
        ] {
            assert!(response(Some(ct)).is_renderable(), "{ct}");
        }
        assert!(response(None).is_renderable());
    }

    #[test]
    fn downloads_are_not_renderable() {
        for ct in [
            "application/octet-stream",
            "application/zip",
            "application/pdf",
            "video/mp4",
        ] {
            assert!(!response(Some(ct)).is_renderable(), "{ct}");
        }
    }

    #[test]
    fn revisiting_kinds_reuse_entries() {
        assert!(NavigationKind::BackForward.reuses_entry());
        assert!(NavigationKind::Reload.reuses_entry());
        assert!(NavigationKind::Restore.reuses_entry());
        assert!(!NavigationKind::Typed.reuses_entry());
        assert!(!NavigationKind::Link.reuses_entry());
    }

    #[test]
    fn find_flags_from_partial_json() {
        let flags: FindFlags = serde_json::from_str(r#"{"case_sensitive":true}"#).unwrap();
        assert!(flags.case_sensitive);
        assert!(!flags.wrap);
    }

    #[test]
    fn feature_serde_names() {
        let feature: Feature = serde_json::from_str("\"media_audio_video\"").unwrap();
        assert_eq!(feature, Feature::MediaAudioVideo);
    }
}
