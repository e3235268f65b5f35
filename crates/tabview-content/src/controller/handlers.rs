use tabview_common::{FrameId, NetworkError, Point};
use tabview_config::schema::WindowClosePolicy;
use tracing::{debug, info, warn};

use crate::downloads::{Transfer, TransferSink, TransferTarget};
use crate::engine::{Feature, NavigationKind, RenderingEngine, ResponseInfo, SourceRequestId};
use crate::events::{ContentEvent, LoadStatus};
use crate::history::HistoryEntry;
use crate::load_state::{LoadEvent, LoadingState};
use crate::plugins::PluginAdmission;

use super::ContentController;

// =============================================================================
// RENDERING ENGINE CALLBACKS
// =============================================================================

impl<E: RenderingEngine, S: TransferSink> ContentController<E, S> {
    /// The engine started loading on its own, e.g. after a link click.
    pub fn on_load_started(&mut self) {
        debug!("engine load started");
        self.begin_navigation();
    }

    /// A navigation committed to `url`.
    ///
    /// Fresh navigations append a history entry (discarding forward
    /// entries); revisits only follow the url of the current entry.
    pub fn on_navigation_committed(&mut self, url: &str, kind: NavigationKind) {
        if self.load_state.state() != LoadingState::Ongoing {
            self.begin_navigation();
        }
        let typed = std::mem::take(&mut self.pending_typed);

        if kind.reuses_entry() && self.history.current().is_some() {
            if let Some(entry) = self.history.current_mut() {
                entry.url = url.to_string();
            }
        } else {
            let entry = HistoryEntry::new(url, self.zoom);
            let id = entry.id.clone();
            self.history.commit(entry);
            debug!(url, ?kind, index = ?self.history.current_index(), "history entry committed");

            self.emit(ContentEvent::HistoryChanged);
            self.emit(ContentEvent::EntryCommitted {
                id,
                url: url.to_string(),
                typed,
            });
            self.set_title_state("");
            self.set_icon_state(None);
        }
        self.set_url_state(url);
    }

    pub fn on_load_finished(&mut self) {
        if !self.accepts_callback("load_finished") {
            return;
        }
        info!(url = %self.url, "navigation finished");
        self.transition(LoadEvent::Finish);
    }

    pub fn on_title_changed(&mut self, title: &str) {
        if !self.accepts_callback("title_changed") {
            return;
        }
        if let Some(entry) = self.history.current_mut() {
            entry.title = title.to_string();
        }
        self.set_title_state(title);
    }

    pub fn on_icon_changed(&mut self, icon: Option<&str>) {
        if !self.accepts_callback("icon_changed") {
            return;
        }
        self.set_icon_state(icon.map(str::to_string));
    }

    /// The document changed its url without a new navigation (fragment,
    /// history API).
    pub fn on_url_changed(&mut self, url: &str) {
        if !self.accepts_callback("url_changed") {
            return;
        }
        if let Some(entry) = self.history.current_mut() {
            entry.url = url.to_string();
        }
        self.set_url_state(url);
    }

    pub fn on_load_progress(&mut self, percent: u8) {
        if !self.accepts_callback("load_progress") {
            return;
        }
        self.set_load_progress(percent.min(100));
    }

    pub fn on_load_message(&mut self, message: &str) {
        if !self.accepts_callback("load_message") {
            return;
        }
        if self.load_message != message {
            self.load_message = message.to_string();
            self.emit(ContentEvent::LoadMessageChanged(self.load_message.clone()));
        }
    }

    /// Inspect a response before it is rendered. Non-renderable content
    /// and explicit saves are diverted to a deferred transfer.
    ///
    /// Returns `true` when the response was turned into a transfer.
    pub fn on_response(&mut self, response: ResponseInfo) -> bool {
        if !self.accepts_callback("response") {
            return false;
        }
        if self.load_state.state() != LoadingState::Ongoing {
            debug!(url = %response.url, "response outside of a navigation");
            return false;
        }
        if response.is_renderable() && !response.save_intent {
            return false;
        }

        info!(
            url = %response.url,
            content_type = ?response.content_type,
            "response diverted to transfer"
        );
        self.transition(LoadEvent::Defer);
        self.engine.stop();
        self.pending_typed = false;
        self.start_delayed_transfer(Transfer {
            url: response.url,
            method: response.method,
            body: response.body,
            target: TransferTarget::Ask,
        });
        self.transition(LoadEvent::Finish);
        true
    }

    pub fn on_feature_requested(&mut self, frame: FrameId, feature: Feature) {
        if !self.accepts_callback("feature_requested") {
            return;
        }
        if let Some(granted) = self
            .current_host()
            .and_then(|host| self.permissions.remembered(&host, feature))
        {
            debug!(%frame, ?feature, granted, "answering from remembered decision");
            self.engine.resolve_permission(frame, feature, granted);
            return;
        }
        if !self.permissions.request(frame, feature) {
            debug!(%frame, ?feature, "permission already pending");
            return;
        }
        self.emit(ContentEvent::PermissionRequested {
            frame,
            feature,
            cancel: false,
        });
    }

    pub fn on_feature_cancelled(&mut self, frame: FrameId, feature: Feature) {
        if !self.accepts_callback("feature_cancelled") {
            return;
        }
        if !self.permissions.cancel(frame, feature) {
            debug!(%frame, ?feature, "cancel for a request that is not pending");
            return;
        }
        self.emit(ContentEvent::PermissionRequested {
            frame,
            feature,
            cancel: true,
        });
    }

    pub fn on_print_requested(&mut self, frame: FrameId) {
        if !self.accepts_callback("print_requested") {
            return;
        }
        self.emit(ContentEvent::PrintRequested(frame));
    }

    /// The page asked to close its window; honoured per the configured policy.
    pub fn on_window_close_requested(&mut self) {
        if !self.accepts_callback("window_close_requested") {
            return;
        }
        let confirm = match self.config.window_close {
            WindowClosePolicy::Deny => {
                debug!(url = %self.url, "window close request denied");
                return;
            }
            WindowClosePolicy::Ask => true,
            WindowClosePolicy::Allow => false,
        };
        self.emit(ContentEvent::WindowCloseRequested { confirm });
    }

    /// Pointer entered (`Some`) or left (`None`) a link.
    pub fn on_link_hovered(&mut self, link: Option<&str>) {
        if !self.accepts_callback("link_hovered") {
            return;
        }
        let message = link.unwrap_or_default();
        if self.status_message != message {
            self.status_message = message.to_string();
            self.emit(ContentEvent::StatusMessageChanged(self.status_message.clone()));
        }
    }

    /// The engine viewport moved or resized.
    pub fn on_viewport_changed(&mut self) {
        self.emit(ContentEvent::ProgressBarGeometryChanged);
    }

    /// The user scrolled inside the document.
    pub fn on_scroll_changed(&mut self, position: Point) {
        if !self.accepts_callback("scroll_changed") {
            return;
        }
        if let Some(entry) = self.history.current_mut() {
            entry.position = position;
        }
    }

    /// The engine changed zoom on its own (e.g. ctrl+wheel).
    pub fn on_zoom_changed(&mut self, zoom: u32) {
        if !self.accepts_callback("zoom_changed") {
            return;
        }
        let zoom = self.config.clamp_zoom(zoom);
        self.store_zoom(zoom);
    }

    /// A page wants to instantiate a plugin presenting `token`.
    pub fn on_plugin_requested(&mut self, token: Option<&str>) -> PluginAdmission {
        if !self.accepts_callback("plugin_requested") {
            return PluginAdmission::Deny;
        }
        let admission = self.plugins.admit(token);
        debug!(
            ?admission,
            blocked = self.plugins.amount_of_not_loaded_plugins(),
            "plugin requested"
        );
        admission
    }

    /// Completion of a fetch issued by `view_source`.
    pub fn on_source_fetched(
        &mut self,
        request: SourceRequestId,
        result: Result<String, NetworkError>,
    ) {
        if !self.pending_sources.remove(&request) {
            debug!(%request, "completion for unknown source request");
            return;
        }
        if let Err(e) = &result {
            warn!(%request, code = e.code(), "source fetch failed: {e}");
        }
        self.emit(ContentEvent::SourceReady { request, result });
    }
}

// =============================================================================
// TRANSPORT CALLBACKS
// =============================================================================

impl<E: RenderingEngine, S: TransferSink> ContentController<E, S> {
    /// Overwrite the transport counters of the current document.
    pub fn on_load_status(&mut self, status: LoadStatus) {
        if !self.accepts_callback("load_status") {
            return;
        }
        self.set_load_status(status);
    }
}
