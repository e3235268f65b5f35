//! The content controller of one tab.
//!
//! `ContentController` owns the history, load state and gates for the
//! document shown by a rendering engine. The host drives it with user
//! operations (navigation, search, zoom, actions) and forwards engine and
//! transport callbacks to its `on_*` handlers. Every observable change is
//! queued as a [`ContentEvent`] and handed out by
//! [`ContentController::drain_events`] in emission order.

use std::collections::HashSet;
use std::rc::Rc;
use std::time::Instant;

use tabview_common::Rect;
use tabview_config::schema::ProgressBarPosition;
use tracing::{debug, trace};

use crate::downloads::{DownloadInterceptor, TransferSink};
use crate::engine::{RenderingEngine, SourceRequestId};
use crate::events::{ContentEvent, ContentState, LoadStatus};
use crate::history::{HistorySnapshot, HistoryStore};
use crate::load_state::{LoadEvent, LoadStateMachine, LoadingState};
use crate::permissions::PermissionGate;
use crate::plugins::PluginGate;
use crate::progress::ProgressSource;
use crate::timers::{Clock, TimerId, TimerQueue};

mod actions;
mod gates;
mod handlers;
mod navigation;
mod types;


pub use types::ControllerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ControllerTimer {
    FlushTransfers,
}

/// Content-view controller for a single tab.
pub struct ContentController<E: RenderingEngine, S: TransferSink> {
    engine: E,
    sink: S,
    config: ControllerConfig,

    history: HistoryStore,
    load_state: LoadStateMachine,
    permissions: PermissionGate,
    plugins: PluginGate,
    downloads: DownloadInterceptor,

    timers: TimerQueue<ControllerTimer>,
    flush_timer: Option<TimerId>,

    url: String,
    title: String,
    icon: Option<String>,
    zoom: u32,
    content_state: ContentState,
    load_status: LoadStatus,
    load_progress: u8,
    load_message: String,
    status_message: String,
    /// Vertical offset of the content surface inside the host window.
    surface_offset: i32,
    /// Whether the navigation in flight was typed by the user.
    pending_typed: bool,

    next_source_request: u64,
    pending_sources: HashSet<SourceRequestId>,

    events: Vec<ContentEvent>,
}

impl<E: RenderingEngine, S: TransferSink> ContentController<E, S> {
    pub fn new(engine: E, sink: S, config: ControllerConfig, clock: Rc<dyn Clock>) -> Self {
        let zoom = config.clamp_zoom(config.default_zoom);
        Self {
            engine,
            sink,
            history: HistoryStore::new(),
            load_state: LoadStateMachine::new(),
            permissions: PermissionGate::new(),
            plugins: PluginGate::new(config.plugins),
            downloads: DownloadInterceptor::new(),
            timers: TimerQueue::new(clock),
            flush_timer: None,
            url: String::new(),
            title: String::new(),
            icon: None,
            zoom,
            content_state: ContentState::Unknown,
            load_status: LoadStatus::default(),
            load_progress: 0,
            load_message: String::new(),
            status_message: String::new(),
            surface_offset: 0,
            pending_typed: false,
            next_source_request: 1,
            pending_sources: HashSet::new(),
            events: Vec::new(),
            config,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    pub fn loading_state(&self) -> LoadingState {
        self.load_state.state()
    }

    pub fn content_state(&self) -> ContentState {
        self.content_state
    }

    pub fn load_status(&self) -> LoadStatus {
        self.load_status
    }

    pub fn load_progress(&self) -> u8 {
        self.load_progress
    }

    pub fn load_message(&self) -> &str {
        &self.load_message
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn history_store(&self) -> &HistoryStore {
        &self.history
    }

    pub fn history(&self) -> HistorySnapshot {
        self.history.snapshot()
    }

    pub fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.history.can_go_forward()
    }

    pub fn permissions(&self) -> &PermissionGate {
        &self.permissions
    }

    pub fn plugins(&self) -> &PluginGate {
        &self.plugins
    }

    pub fn downloads(&self) -> &DownloadInterceptor {
        &self.downloads
    }

    /// Drain all pending events.
    pub fn drain_events(&mut self) -> Vec<ContentEvent> {
        std::mem::take(&mut self.events)
    }

    // =========================================================================
    // Timers
    // =========================================================================

    /// Fire due controller timers. Call from the host loop.
    pub fn poll_timers(&mut self) {
        for (_, timer) in self.timers.poll() {
            match timer {
                ControllerTimer::FlushTransfers => self.flush(),
            }
        }
    }

    pub fn next_timer_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    // =========================================================================
    // Progress bar geometry
    // =========================================================================

    /// Progress bar anchor in surface coordinates, docked to the configured
    /// edge of the engine's viewport.
    pub fn progress_bar_geometry(&self) -> Rect {
        let viewport = self.engine.viewport();
        let height = i32::try_from(self.config.progress_bar_height)
            .unwrap_or(i32::MAX)
            .min(viewport.height.max(0));
        let y = match self.config.progress_position {
            ProgressBarPosition::Top => viewport.y,
            ProgressBarPosition::Bottom => viewport.y + viewport.height - height,
        };
        Rect::new(viewport.x, y, viewport.width, height)
    }

    pub fn surface_offset(&self) -> i32 {
        self.surface_offset
    }

    /// Record where the content surface sits inside the host window.
    pub fn set_surface_offset(&mut self, offset: i32) {
        if self.surface_offset != offset {
            self.surface_offset = offset;
            self.emit(ContentEvent::ProgressBarGeometryChanged);
        }
    }

    // =========================================================================
    // Internal state helpers
    // =========================================================================

    fn emit(&mut self, event: ContentEvent) {
        trace!(?event, "content event");
        self.events.push(event);
    }

    /// Engine and transport callbacks carry no meaning before the first
    /// navigation.
    fn accepts_callback(&self, callback: &'static str) -> bool {
        if self.load_state.state() == LoadingState::NotStarted {
            debug!(callback, "ignoring callback before first navigation");
            return false;
        }
        true
    }

    fn transition(&mut self, event: LoadEvent) {
        if let Some(state) = self.load_state.apply(event) {
            debug!(?state, ?event, "loading state changed");
            self.emit(ContentEvent::LoadingStateChanged(state));
        }
    }

    /// Drop everything scoped to the previous document and enter `Ongoing`.
    fn begin_navigation(&mut self) {
        self.plugins.reset();

        for (frame, feature) in self.permissions.drain() {
            self.emit(ContentEvent::PermissionRequested {
                frame,
                feature,
                cancel: true,
            });
        }

        self.set_load_status(LoadStatus::default());
        self.set_load_progress(0);
        self.transition(LoadEvent::Navigate);
    }

    fn set_url_state(&mut self, url: &str) {
        if self.url == url {
            return;
        }
        self.url = url.to_string();
        self.emit(ContentEvent::UrlChanged(self.url.clone()));

        let state = ContentState::from_url(url);
        if state != self.content_state {
            self.content_state = state;
            self.emit(ContentEvent::ContentStateChanged(state));
        }
    }

    fn set_title_state(&mut self, title: &str) {
        if self.title != title {
            self.title = title.to_string();
            self.emit(ContentEvent::TitleChanged(self.title.clone()));
        }
    }

    fn set_icon_state(&mut self, icon: Option<String>) {
        if self.icon != icon {
            self.icon = icon.clone();
            self.emit(ContentEvent::IconChanged(icon));
        }
    }

    /// Persist `zoom` into the current entry. Returns whether the displayed
    /// zoom changed.
    fn store_zoom(&mut self, zoom: u32) -> bool {
        if let Some(entry) = self.history.current_mut() {
            entry.zoom = zoom;
        }
        if self.zoom == zoom {
            return false;
        }
        self.zoom = zoom;
        self.emit(ContentEvent::ZoomChanged(zoom));
        true
    }

    fn set_load_status(&mut self, status: LoadStatus) {
        if self.load_status != status {
            self.load_status = status;
            self.emit(ContentEvent::LoadStatusChanged(status));
        }
    }

    fn set_load_progress(&mut self, progress: u8) {
        if self.load_progress != progress {
            self.load_progress = progress;
            self.emit(ContentEvent::LoadProgress(progress));
        }
    }

    fn current_host(&self) -> Option<String> {
        url::Url::parse(&self.url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
    }
}

impl<E: RenderingEngine, S: TransferSink> ProgressSource for ContentController<E, S> {
    fn loading_state(&self) -> LoadingState {
        self.load_state.state()
    }

    fn progress_bar_anchor(&self) -> Rect {
        self.progress_bar_geometry()
    }

    fn surface_offset(&self) -> i32 {
        self.surface_offset
    }
}
