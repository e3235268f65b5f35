//! In-memory collaborators for running a controller without a real engine.
//!
//! `HeadlessEngine` records every call and answers queries from plain
//! fields; `MemoryTransferSink` collects started transfers. Both back the
//! scenario runner and the test suites.

use tabview_common::{FrameId, Point, Rect};

use crate::downloads::{Transfer, TransferError, TransferSink};
use crate::engine::{
    EditCommand, Feature, FindFlags, NavigationRequest, RenderingEngine, SourceRequestId,
};

/// A rendering engine that renders nothing.
#[derive(Debug, Clone)]
pub struct HeadlessEngine {
    /// Text searched by `find_text`.
    pub document_text: String,
    pub undo_available: bool,
    pub redo_available: bool,
    pub selection: bool,
    pub viewport: Rect,

    pub loads: Vec<NavigationRequest>,
    pub stops: usize,
    /// One entry per reload, `true` when the cache was bypassed.
    pub reloads: Vec<bool>,
    pub zoom: Option<u32>,
    pub scroll: Option<Point>,
    pub finds: Vec<(String, FindFlags)>,
    pub commands: Vec<EditCommand>,
    pub permissions: Vec<(FrameId, Feature, bool)>,
    pub activated_plugins: Vec<String>,
    pub source_fetches: Vec<(SourceRequestId, String)>,
}

impl HeadlessEngine {
    pub fn new() -> Self {
        Self {
            document_text: String::new(),
            undo_available: false,
            redo_available: false,
            selection: false,
            viewport: Rect::new(0, 0, 1024, 768),
            loads: Vec::new(),
            stops: 0,
            reloads: Vec::new(),
            zoom: None,
            scroll: None,
            finds: Vec::new(),
            commands: Vec::new(),
            permissions: Vec::new(),
            activated_plugins: Vec::new(),
            source_fetches: Vec::new(),
        }
    }

    pub fn last_load(&self) -> Option<&NavigationRequest> {
        self.loads.last()
    }
}

impl Default for HeadlessEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderingEngine for HeadlessEngine {
    fn load(&mut self, request: &NavigationRequest) {
        self.loads.push(request.clone());
        self.selection = false;
    }

    fn stop(&mut self) {
        self.stops += 1;
    }

    fn reload(&mut self, bypass_cache: bool) {
        self.reloads.push(bypass_cache);
    }

    fn set_zoom(&mut self, zoom: u32) {
        self.zoom = Some(zoom);
    }

    fn set_scroll_position(&mut self, position: Point) {
        self.scroll = Some(position);
    }

    fn find_text(&mut self, text: &str, flags: FindFlags) -> bool {
        self.finds.push((text.to_string(), flags));
        if text.is_empty() {
            return false;
        }
        if flags.case_sensitive {
            self.document_text.contains(text)
        } else {
            self.document_text
                .to_lowercase()
                .contains(&text.to_lowercase())
        }
    }

    fn execute(&mut self, command: EditCommand) {
        match command {
            EditCommand::SelectAll => self.selection = !self.document_text.is_empty(),
            EditCommand::ClearSelection => self.selection = false,
            _ => {}
        }
        self.commands.push(command);
    }

    fn can_undo(&self) -> bool {
        self.undo_available
    }

    fn can_redo(&self) -> bool {
        self.redo_available
    }

    fn has_selection(&self) -> bool {
        self.selection
    }

    fn resolve_permission(&mut self, frame: FrameId, feature: Feature, granted: bool) {
        self.permissions.push((frame, feature, granted));
    }

    fn activate_plugins(&mut self, token: &str) {
        self.activated_plugins.push(token.to_string());
    }

    fn fetch_source(&mut self, request: SourceRequestId, url: &str) {
        self.source_fetches.push((request, url.to_string()));
    }

    fn viewport(&self) -> Rect {
        self.viewport
    }
}

/// Transfer manager that keeps started transfers in memory.
///
/// With a capacity, transfers beyond it are refused with
/// [`TransferError::Exhausted`].
#[derive(Debug, Default)]
pub struct MemoryTransferSink {
    pub started: Vec<Transfer>,
    capacity: Option<usize>,
}

impl MemoryTransferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            started: Vec::new(),
            capacity: Some(capacity),
        }
    }
}

impl TransferSink for MemoryTransferSink {
    fn enqueue(&mut self, transfer: Transfer) -> Result<(), TransferError> {
        if self
            .capacity
            .is_some_and(|capacity| self.started.len() >= capacity)
        {
            return Err(TransferError::Exhausted(transfer));
        }
        self.started.push(transfer);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_respects_case_flag() {
        let mut engine = HeadlessEngine::new();
        engine.document_text = "Hello Tab".into();

        assert!(engine.find_text("hello", FindFlags::default()));
        let strict = FindFlags {
            case_sensitive: true,
            ..Default::default()
        };
        assert!(!engine.find_text("hello", strict));
        assert!(engine.find_text("Hello", strict));
        assert!(!engine.find_text("", FindFlags::default()));
        assert_eq!(engine.finds.len(), 4);
    }

    #[test]
    fn select_all_needs_text() {
        let mut engine = HeadlessEngine::new();
        engine.execute(EditCommand::SelectAll);
        assert!(!engine.has_selection());

        engine.document_text = "x".into();
        engine.execute(EditCommand::SelectAll);
        assert!(engine.has_selection());
        engine.execute(EditCommand::ClearSelection);
        assert!(!engine.has_selection());
    }

    #[test]
    fn sink_capacity_hands_transfer_back() {
        let mut sink = MemoryTransferSink::with_capacity(0);
        match sink.enqueue(Transfer::new("https://example.com/a")) {
            Err(TransferError::Exhausted(transfer)) => {
                assert_eq!(transfer.url, "https://example.com/a")
            }
            other => panic!("expected exhaustion, got {other:?}"),
        }
        assert!(sink.started.is_empty());
    }
}
