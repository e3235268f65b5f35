use tracing::debug;

use crate::actions::{ActionParameters, ContentAction};
use crate::downloads::TransferSink;
use crate::engine::{EditCommand, RenderingEngine};
use crate::load_state::{LoadEvent, LoadingState};

use super::ContentController;

impl<E: RenderingEngine, S: TransferSink> ContentController<E, S> {
    /// Whether `action` would currently do anything.
    pub fn is_action_enabled(&self, action: ContentAction) -> bool {
        let started = self.load_state.state() != LoadingState::NotStarted;
        match action {
            ContentAction::Copy | ContentAction::Cut | ContentAction::ClearSelection => {
                self.engine.has_selection()
            }
            ContentAction::Paste | ContentAction::SelectAll => started,
            ContentAction::Undo => self.engine.can_undo(),
            ContentAction::Redo => self.engine.can_redo(),
            ContentAction::Reload | ContentAction::ReloadBypassCache => {
                self.history.current().is_some()
            }
            ContentAction::Stop => self.load_state.state() == LoadingState::Ongoing,
            ContentAction::GoBack => self.history.can_go_back(),
            ContentAction::GoForward => self.history.can_go_forward(),
            ContentAction::GoHome => !self.config.home_page.trim().is_empty(),
            ContentAction::ViewSource => !self.url.is_empty(),
            ContentAction::ZoomIn => self.zoom < self.config.max_zoom,
            ContentAction::ZoomOut => self.zoom > self.config.min_zoom,
            ContentAction::ZoomOriginal => {
                self.zoom != self.config.clamp_zoom(self.config.default_zoom)
            }
            ContentAction::LoadPlugins => {
                self.plugins.can_load_plugins() && self.plugins.amount_of_not_loaded_plugins() > 0
            }
        }
    }

    /// Run a named command against the current document.
    ///
    /// Disabled commands are ignored. Returns whether the command ran.
    pub fn trigger_action(&mut self, action: ContentAction, params: &ActionParameters) -> bool {
        if !self.is_action_enabled(action) {
            debug!(?action, "action disabled, ignoring");
            return false;
        }
        debug!(?action, "triggering action");

        match action {
            ContentAction::Copy => self.engine.execute(EditCommand::Copy),
            ContentAction::Cut => self.engine.execute(EditCommand::Cut),
            ContentAction::Paste => {
                let command = match params.get("text").and_then(|text| text.as_str()) {
                    Some(text) => EditCommand::PasteText(text.to_string()),
                    None => EditCommand::Paste,
                };
                self.engine.execute(command);
            }
            ContentAction::SelectAll => self.engine.execute(EditCommand::SelectAll),
            ContentAction::ClearSelection => self.engine.execute(EditCommand::ClearSelection),
            ContentAction::Undo => self.engine.execute(EditCommand::Undo),
            ContentAction::Redo => self.engine.execute(EditCommand::Redo),
            ContentAction::Reload | ContentAction::ReloadBypassCache => {
                self.begin_navigation();
                self.pending_typed = false;
                self.engine
                    .reload(action == ContentAction::ReloadBypassCache);
            }
            ContentAction::Stop => {
                self.engine.stop();
                self.transition(LoadEvent::Finish);
            }
            ContentAction::GoBack => {
                self.go_back();
            }
            ContentAction::GoForward => {
                self.go_forward();
            }
            ContentAction::GoHome => {
                self.go_home();
            }
            ContentAction::ViewSource => {
                self.view_source();
            }
            ContentAction::ZoomIn => self.set_zoom(self.zoom.saturating_add(self.config.zoom_step)),
            ContentAction::ZoomOut => self.set_zoom(self.zoom.saturating_sub(self.config.zoom_step)),
            ContentAction::ZoomOriginal => self.set_zoom(self.config.default_zoom),
            ContentAction::LoadPlugins => self.load_plugins(),
        }
        true
    }

    /// [`trigger_action`](Self::trigger_action) by snake_case name. Unknown
    /// names are ignored.
    pub fn trigger_action_by_name(&mut self, name: &str, params: &ActionParameters) -> bool {
        match ContentAction::from_name(name) {
            Some(action) => self.trigger_action(action, params),
            None => {
                debug!(name, "unknown action, ignoring");
                false
            }
        }
    }
}
