//! Named commands a host can trigger on a content controller.

use serde::{Deserialize, Serialize};

/// Free-form parameters accompanying an action, e.g. `{"text": "..."}` for paste.
pub type ActionParameters = serde_json::Map<String, serde_json::Value>;

/// Every command `ContentController::trigger_action` understands.
///
/// Each has its own enablement precondition; disabled commands are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentAction {
    // -- Editing --
    Copy,
    Cut,
    Paste,
    SelectAll,
    ClearSelection,
    Undo,
    Redo,

    // -- Navigation --
    Reload,
    ReloadBypassCache,
    Stop,
    GoBack,
    GoForward,
    GoHome,
    ViewSource,

    // -- Zoom --
    ZoomIn,
    ZoomOut,
    ZoomOriginal,

    // -- Plugins --
    LoadPlugins,
}

impl ContentAction {
    /// Resolve a snake_case command name such as `"reload_bypass_cache"`.
    pub fn from_name(name: &str) -> Option<Self> {
        serde_json::from_value(serde_json::Value::String(name.to_string())).ok()
    }

    /// Human-readable label for menus.
    pub fn label(&self) -> &'static str {
        match self {
            ContentAction::Copy => "Copy",
            ContentAction::Cut => "Cut",
            ContentAction::Paste => "Paste",
            ContentAction::SelectAll => "Select All",
            ContentAction::ClearSelection => "Deselect",
            ContentAction::Undo => "Undo",
            ContentAction::Redo => "Redo",
            ContentAction::Reload => "Reload",
            ContentAction::ReloadBypassCache => "Reload Bypassing Cache",
            ContentAction::Stop => "Stop",
            ContentAction::GoBack => "Back",
            ContentAction::GoForward => "Forward",
            ContentAction::GoHome => "Home",
            ContentAction::ViewSource => "View Source",
            ContentAction::ZoomIn => "Zoom In",
            ContentAction::ZoomOut => "Zoom Out",
            ContentAction::ZoomOriginal => "Original Size",
            ContentAction::LoadPlugins => "Load All Plugins",
        }
    }

    pub fn all() -> &'static [ContentAction] {
        &[
            ContentAction::Copy,
            ContentAction::Cut,
            ContentAction::Paste,
            ContentAction::SelectAll,
            ContentAction::ClearSelection,
            ContentAction::Undo,
            ContentAction::Redo,
            ContentAction::Reload,
            ContentAction::ReloadBypassCache,
            ContentAction::Stop,
            ContentAction::GoBack,
            ContentAction::GoForward,
            ContentAction::GoHome,
            ContentAction::ViewSource,
            ContentAction::ZoomIn,
            ContentAction::ZoomOut,
            ContentAction::ZoomOriginal,
            ContentAction::LoadPlugins,
        ]
    }
}
