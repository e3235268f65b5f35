use tabview_common::Point;
use tabview_config::schema::SearchMethod;
use tracing::{debug, info};

use crate::downloads::TransferSink;
use crate::engine::{FindFlags, NavigationKind, NavigationRequest, RenderingEngine};
use crate::events::ContentEvent;
use crate::history::{HistoryEntry, HistorySnapshot, HistoryStore};
use crate::load_state::{LoadEvent, LoadingState};
use crate::search;

use super::ContentController;

impl<E: RenderingEngine, S: TransferSink> ContentController<E, S> {
    /// Start navigating to `url`. `typed` marks user-typed input.
    pub fn set_url(&mut self, url: &str, typed: bool) {
        let url = url.trim();
        if url.is_empty() {
            debug!("ignoring navigation to empty url");
            return;
        }
        let kind = if typed {
            NavigationKind::Typed
        } else {
            NavigationKind::Other
        };
        self.navigate(NavigationRequest::get(url, self.zoom, kind), typed);
    }

    /// Navigate to the configured home page. Returns false when none is set.
    pub fn go_home(&mut self) -> bool {
        let home = self.config.home_page.clone();
        if home.trim().is_empty() {
            debug!("no home page configured");
            return false;
        }
        self.set_url(&home, false);
        true
    }

    pub(super) fn navigate(&mut self, request: NavigationRequest, typed: bool) {
        info!(url = %request.url, kind = ?request.kind, "navigation started");
        self.begin_navigation();
        self.pending_typed = typed;
        self.engine.load(&request);
    }

    /// Re-navigate to an existing entry, restoring its zoom and scroll.
    fn revisit(&mut self, entry: HistoryEntry, kind: NavigationKind) {
        self.navigate(
            NavigationRequest {
                position: entry.position,
                ..NavigationRequest::get(entry.url.as_str(), entry.zoom, kind)
            },
            false,
        );
        self.set_url_state(&entry.url);
        self.set_title_state(&entry.title);
        self.store_zoom(entry.zoom);
    }

    // =========================================================================
    // History
    // =========================================================================

    /// Move to history entry `index`. Out-of-range indices are ignored.
    pub fn go_to_history_index(&mut self, index: usize) -> bool {
        let previous = self.history.current_index();
        let Some(entry) = self.history.go_to(index).cloned() else {
            debug!(index, len = self.history.len(), "history index out of range");
            return false;
        };

        self.revisit(entry, NavigationKind::BackForward);
        if previous != Some(index) {
            self.emit(ContentEvent::HistoryChanged);
        }
        true
    }

    pub fn go_back(&mut self) -> bool {
        match self.history.current_index() {
            Some(index) if index > 0 => self.go_to_history_index(index - 1),
            _ => false,
        }
    }

    pub fn go_forward(&mut self) -> bool {
        match self.history.current_index() {
            Some(index) => self.go_to_history_index(index + 1),
            None => false,
        }
    }

    /// Remove history entry `index`. With `purge`, persisted copies of the
    /// entry are invalidated too.
    ///
    /// The store is reindexed first, then `HistoryChanged` is emitted,
    /// followed by `EntryPurged` when purging. Removing the current entry
    /// re-navigates to the entry that took its place, or blanks the view
    /// when the history is now empty.
    pub fn remove_history_index(&mut self, index: usize, purge: bool) -> bool {
        let was_current = self.history.current_index() == Some(index);
        let Some(removed) = self.history.remove(index, purge) else {
            debug!(index, len = self.history.len(), "history index out of range");
            return false;
        };
        debug!(index, url = %removed.url, purge, was_current, "history entry removed");

        self.emit(ContentEvent::HistoryChanged);
        for id in self.history.take_purged() {
            self.emit(ContentEvent::EntryPurged(id));
        }

        if was_current {
            match self.history.current().cloned() {
                Some(entry) => self.revisit(entry, NavigationKind::Restore),
                None => self.clear_document(),
            }
        }
        true
    }

    /// Drop the displayed document after its history is gone.
    fn clear_document(&mut self) {
        if self.load_state.state() == LoadingState::Ongoing {
            self.engine.stop();
            self.transition(LoadEvent::Finish);
        }
        self.set_url_state("");
        self.set_title_state("");
        self.set_icon_state(None);
        let zoom = self.config.default_zoom;
        if self.store_zoom(zoom) {
            self.engine.set_zoom(zoom);
        }
    }

    /// Replace the whole history and navigate to its current entry.
    pub fn set_history(&mut self, snapshot: HistorySnapshot) {
        self.history.replace(snapshot);
        info!(
            entries = self.history.len(),
            index = ?self.history.current_index(),
            "history replaced"
        );
        self.emit(ContentEvent::HistoryChanged);

        if let Some(entry) = self.history.current().cloned() {
            self.revisit(entry, NavigationKind::Restore);
        }
    }

    /// Serialize the history with the configured encoding.
    pub fn encode_history(&self) -> Vec<u8> {
        self.history.encode(self.config.history_encoding)
    }

    /// Restore a history encoded with the configured encoding. Unreadable
    /// input yields an empty history.
    pub fn restore_history(&mut self, bytes: &[u8]) {
        let snapshot = HistoryStore::decode(bytes, self.config.history_encoding);
        self.set_history(snapshot);
    }

    // =========================================================================
    // Viewport
    // =========================================================================

    /// Set the zoom of the current document, clamped to the configured bounds.
    pub fn set_zoom(&mut self, zoom: u32) {
        let zoom = self.config.clamp_zoom(zoom);
        if self.store_zoom(zoom) {
            self.engine.set_zoom(zoom);
        }
    }

    pub fn set_scroll_position(&mut self, position: Point) {
        if let Some(entry) = self.history.current_mut() {
            entry.position = position;
        }
        self.engine.set_scroll_position(position);
    }

    pub fn find_in_page(&mut self, text: &str, flags: FindFlags) -> bool {
        self.engine.find_text(text, flags)
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Search for `query` with engine `engine_id` (empty for the default
    /// engine). Returns `false` when the engine is unknown.
    pub fn search(&mut self, query: &str, engine_id: &str) -> bool {
        let engine_id = if engine_id.is_empty() {
            self.config.search.default_engine.as_str()
        } else {
            engine_id
        };
        let Some(engine) = self.config.search.engine(engine_id) else {
            debug!(engine = engine_id, "unknown search engine");
            return false;
        };

        let method = engine.method;
        let request = search::resolve(engine, query, self.zoom);
        match method {
            SearchMethod::Get => self.set_url(&request.url, false),
            SearchMethod::Post => self.navigate(request, false),
        }
        true
    }
}
