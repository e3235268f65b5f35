//! Load progress overlay model.
//!
//! `ProgressReporter` observes a controller's events and keeps the text and
//! placement of a progress bar docked to the content surface. It owns two
//! timers:
//!
//! - a debounced geometry update: at most one is pending, however many
//!   geometry-change notifications arrive before it fires
//! - an elapsed-time tick that only runs while a load is ongoing
//!
//! The host forwards every [`ContentEvent`] to
//! [`ProgressReporter::handle_event`] and calls [`ProgressReporter::poll`]
//! with the controller as [`ProgressSource`] when a deadline passes.

mod format;


pub use format::{format_elapsed, format_unit};

use std::rc::Rc;
use std::time::{Duration, Instant};

use tabview_common::Rect;
use tabview_config::schema::ProgressConfig;
use tracing::{debug, trace};

use crate::events::{ContentEvent, LoadStatus};
use crate::load_state::LoadingState;
use crate::timers::{Clock, TimerId, TimerQueue};

/// What the reporter needs to read from the observed controller.
pub trait ProgressSource {
    fn loading_state(&self) -> LoadingState;

    /// Progress bar anchor reported by the content surface.
    fn progress_bar_anchor(&self) -> Rect;

    /// Vertical offset of the content surface inside the host window.
    fn surface_offset(&self) -> i32;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProgressTimer {
    Geometry,
    Elapsed,
}

/// Snapshot of everything the progress bar displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressView {
    pub visible: bool,
    pub geometry: Rect,
    /// `Document: N%`
    pub document: String,
    /// `Elements: finished/started`
    pub elements: String,
    pub total: String,
    pub speed: String,
    /// `Time: m:ss`, empty when no load was timed.
    pub elapsed: String,
    pub message: String,
}

/// Timer-driven progress display for one controller.
pub struct ProgressReporter {
    timers: TimerQueue<ProgressTimer>,
    enabled: bool,
    geometry_debounce: Duration,
    elapsed_interval: Duration,

    /// Guard: set while a geometry update is scheduled.
    geometry_timer: Option<TimerId>,
    elapsed_timer: Option<TimerId>,
    started_at: Option<Instant>,
    /// Subscribed to geometry-change notifications.
    tracking_geometry: bool,
    visible: bool,
    geometry: Rect,

    state: LoadingState,
    progress: u8,
    status: LoadStatus,
    message: String,
    elapsed: Option<u64>,
}

impl ProgressReporter {
    pub fn new(config: &ProgressConfig, clock: Rc<dyn Clock>) -> Self {
        Self {
            timers: TimerQueue::new(clock),
            enabled: config.enabled,
            geometry_debounce: Duration::from_millis(config.geometry_debounce_ms),
            elapsed_interval: Duration::from_millis(config.elapsed_interval_ms),
            geometry_timer: None,
            elapsed_timer: None,
            started_at: None,
            tracking_geometry: false,
            visible: false,
            geometry: Rect::default(),
            state: LoadingState::NotStarted,
            progress: 0,
            status: LoadStatus::default(),
            message: String::new(),
            elapsed: None,
        }
    }

    /// Feed one controller event.
    pub fn handle_event(&mut self, event: &ContentEvent) {
        match event {
            ContentEvent::LoadingStateChanged(state) => self.update_loading_state(*state),
            ContentEvent::LoadMessageChanged(message) => self.message = message.clone(),
            ContentEvent::LoadProgress(progress) => self.progress = *progress,
            ContentEvent::LoadStatusChanged(status) => self.status = *status,
            ContentEvent::ProgressBarGeometryChanged if self.tracking_geometry => {
                self.schedule_geometry_update();
            }
            _ => {}
        }
    }

    fn update_loading_state(&mut self, state: LoadingState) {
        if state == self.state {
            return;
        }
        self.state = state;

        if state == LoadingState::Ongoing {
            self.progress = 0;
            self.status = LoadStatus::default();
            self.elapsed = Some(0);
            self.started_at = Some(self.timers.now());

            if let Some(id) = self.elapsed_timer.take() {
                self.timers.cancel(id);
            }
            self.elapsed_timer = Some(
                self.timers
                    .start_repeating(self.elapsed_interval, ProgressTimer::Elapsed),
            );

            if !self.visible {
                self.schedule_geometry_update();
            }
        } else {
            self.started_at = None;
            if let Some(id) = self.elapsed_timer.take() {
                self.timers.cancel(id);
            }
            self.tracking_geometry = false;
            self.visible = false;
        }
        debug!(?state, visible = self.visible, "progress reporter state");
    }

    /// Schedule a geometry recomputation unless one is already pending.
    pub fn schedule_geometry_update(&mut self) {
        if self.geometry_timer.is_none() {
            self.geometry_timer = Some(
                self.timers
                    .start_single_shot(self.geometry_debounce, ProgressTimer::Geometry),
            );
        }
    }

    /// Fire due timers against `source`. Returns whether anything fired.
    pub fn poll(&mut self, source: &dyn ProgressSource) -> bool {
        let fired = self.timers.poll();
        for (id, timer) in &fired {
            match timer {
                ProgressTimer::Geometry => self.update_geometry(source),
                ProgressTimer::Elapsed => self.tick_elapsed(*id, source),
            }
        }
        !fired.is_empty()
    }

    fn update_geometry(&mut self, source: &dyn ProgressSource) {
        self.geometry_timer = None;

        if source.loading_state() == LoadingState::Ongoing {
            self.tracking_geometry = true;
            self.geometry = source
                .progress_bar_anchor()
                .translated(0, source.surface_offset());
            self.visible = self.enabled;
            trace!(geometry = ?self.geometry, "progress bar placed");
        } else {
            self.tracking_geometry = false;
            self.visible = false;
        }
    }

    fn tick_elapsed(&mut self, id: TimerId, source: &dyn ProgressSource) {
        if let Some(started_at) = self.started_at {
            let elapsed = self.timers.now().saturating_duration_since(started_at);
            self.elapsed = Some(elapsed.as_secs());
        }
        if source.loading_state() != LoadingState::Ongoing {
            self.timers.cancel(id);
            self.elapsed_timer = None;
        }
    }

    /// Number of geometry updates waiting to fire (0 or 1).
    pub fn pending_geometry_updates(&self) -> usize {
        usize::from(self.geometry_timer.is_some())
    }

    pub fn is_tracking_geometry(&self) -> bool {
        self.tracking_geometry
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_timing(&self) -> bool {
        self.elapsed_timer.is_some()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    pub fn view(&self) -> ProgressView {
        ProgressView {
            visible: self.visible,
            geometry: self.geometry,
            document: format!("Document: {}%", self.progress),
            elements: format!(
                "Elements: {}/{}",
                self.status.finished_requests, self.status.started_requests
            ),
            total: format!("Total: {}", format_unit(self.status.bytes_received, false, 1)),
            speed: format!("Speed: {}", format_unit(self.status.speed, true, 1)),
            elapsed: self
                .elapsed
                .map(|seconds| format!("Time: {}", format_elapsed(seconds)))
                .unwrap_or_default(),
            message: self.message.clone(),
        }
    }
}
