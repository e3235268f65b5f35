//! Scenario replay against a headless controller.
//!
//! Time is virtual: a shared [`ManualClock`] is advanced by each step's
//! delay, firing controller and reporter timers at their deadlines on the
//! way. With a non-zero speed the replay also sleeps the scaled delay so a
//! run can be watched in real time.

use std::rc::Rc;
use std::time::Duration;

use tabview_config::TabviewConfig;
use tabview_content::{
    Clock, ContentController, ContentEvent, ControllerConfig, HeadlessEngine, HistorySnapshot,
    LoadingState, ManualClock, MemoryTransferSink, ProgressReporter, ProgressView, Transfer,
};
use tracing::{debug, info, warn};

use crate::scenario::{ReplayController, Scenario};

/// Outcome of a replay.
#[derive(Debug)]
pub struct ReplayReport {
    pub events: Vec<ContentEvent>,
    pub loading_state: LoadingState,
    pub history: HistorySnapshot,
    pub url: String,
    pub title: String,
    pub started_transfers: Vec<Transfer>,
    pub queued_transfers: usize,
    pub view: ProgressView,
}

pub struct Replay {
    clock: ManualClock,
    controller: ReplayController,
    reporter: ProgressReporter,
    events: Vec<ContentEvent>,
}

impl Replay {
    pub fn new(config: &TabviewConfig) -> Self {
        let clock = ManualClock::new();
        let controller = ContentController::new(
            HeadlessEngine::new(),
            MemoryTransferSink::new(),
            ControllerConfig::from(config),
            Rc::new(clock.clone()),
        );
        let reporter = ProgressReporter::new(&config.progress, Rc::new(clock.clone()));
        Self {
            clock,
            controller,
            reporter,
            events: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn controller(&self) -> &ReplayController {
        &self.controller
    }

    #[cfg(test)]
    pub fn reporter(&self) -> &ProgressReporter {
        &self.reporter
    }

    /// Move virtual time forward, firing every timer that falls due.
    pub fn advance(&mut self, by: Duration) {
        let target = self.clock.now() + by;
        loop {
            let next = [
                self.controller.next_timer_deadline(),
                self.reporter.next_deadline(),
            ]
            .into_iter()
            .flatten()
            .min();

            match next {
                Some(deadline) if deadline <= target => {
                    let now = self.clock.now();
                    if deadline > now {
                        self.clock.advance(deadline - now);
                    }
                    self.poll_timers();
                }
                _ => break,
            }
        }

        let now = self.clock.now();
        if target > now {
            self.clock.advance(target - now);
        }
    }

    fn poll_timers(&mut self) {
        self.controller.poll_timers();
        self.dispatch_events();
        if self.reporter.poll(&self.controller) {
            debug!(view = ?self.reporter.view(), "progress reporter updated");
        }
    }

    /// Hand queued controller events to the reporter and the log.
    pub fn dispatch_events(&mut self) {
        for event in self.controller.drain_events() {
            info!(?event, "content event");
            self.reporter.handle_event(&event);
            self.events.push(event);
        }
    }

    pub fn step(&mut self, op: &crate::scenario::Op) {
        debug!(?op, "applying step");
        op.apply(&mut self.controller);
        self.dispatch_events();
    }

    pub fn finish(self) -> ReplayReport {
        ReplayReport {
            events: self.events,
            loading_state: self.controller.loading_state(),
            history: self.controller.history(),
            url: self.controller.url().to_string(),
            title: self.controller.title().to_string(),
            started_transfers: self.controller.sink().started.clone(),
            queued_transfers: self.controller.downloads().len(),
            view: self.reporter.view(),
        }
    }
}

/// Real time to wait for a step `delay` at `speed`. `None` when there is
/// nothing to wait for or the scaled delay does not fit a `Duration`.
fn pacing(delay: Duration, speed: f64) -> Option<Duration> {
    if speed.is_nan() || speed <= 0.0 || delay.is_zero() {
        return None;
    }
    match Duration::try_from_secs_f64(delay.as_secs_f64() / speed) {
        Ok(wait) => Some(wait),
        Err(e) => {
            warn!(?delay, speed, "not pacing step: {e}");
            None
        }
    }
}

/// Replay `scenario`, sleeping each step's delay divided by `speed`
/// (no sleeping when `speed` is not positive).
pub async fn run(scenario: &Scenario, config: &TabviewConfig, speed: f64) -> ReplayReport {
    info!(name = %scenario.name, steps = scenario.steps.len(), "replaying scenario");
    let mut replay = Replay::new(config);

    for step in &scenario.steps {
        let delay = Duration::from_millis(step.after_ms);
        if let Some(wait) = pacing(delay, speed) {
            tokio::time::sleep(wait).await;
        }
        replay.advance(delay);
        replay.step(&step.op);
    }

    let report = replay.finish();
    info!(
        events = report.events.len(),
        state = ?report.loading_state,
        entries = report.history.entries.len(),
        "replay finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::Scenario;

    const BASIC: &str = include_str!("../../../demos/basic.json");

    #[tokio::test]
    async fn basic_demo_replays() {
        let scenario = Scenario::from_json(BASIC).unwrap();
        let report = run(&scenario, &TabviewConfig::default(), 0.0).await;

        assert_eq!(report.loading_state, LoadingState::Finished);
        assert_eq!(report.history.entries.len(), 2);
        assert_eq!(report.history.index, Some(0));
        assert_eq!(report.title, "Example Domain");
        assert_eq!(report.started_transfers.len(), 1);
        assert_eq!(report.queued_transfers, 0);
        assert!(!report.view.visible);
        assert!(report
            .events
            .contains(&ContentEvent::LoadingStateChanged(LoadingState::Deferred)));
    }

    #[tokio::test]
    async fn elapsed_time_follows_virtual_clock() {
        let scenario = Scenario::from_json(
            r#"{"steps":[
                {"op":"set_url","url":"https://example.com/","typed":true},
                {"op":"load_progress","percent":30,"after_ms":65000}
            ]}"#,
        )
        .unwrap();
        let report = run(&scenario, &TabviewConfig::default(), 0.0).await;

        assert_eq!(report.loading_state, LoadingState::Ongoing);
        assert_eq!(report.view.elapsed, "Time: 1:05");
        assert_eq!(report.view.document, "Document: 30%");
        assert!(report.view.visible);
    }

    #[tokio::test]
    async fn speed_scales_real_sleeps() {
        let scenario = Scenario::from_json(
            r#"{"steps":[{"op":"set_url","url":"https://example.com/","after_ms":20}]}"#,
        )
        .unwrap();
        let started = std::time::Instant::now();
        run(&scenario, &TabviewConfig::default(), 1.0).await;
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn pacing_scales_and_rejects_overflow() {
        let second = Duration::from_secs(1);
        assert_eq!(pacing(second, 2.0), Some(Duration::from_millis(500)));
        assert_eq!(pacing(second, 0.0), None);
        assert_eq!(pacing(second, -1.0), None);
        assert_eq!(pacing(second, f64::NAN), None);
        assert_eq!(pacing(Duration::ZERO, 1.0), None);
        assert_eq!(pacing(second, 1e-300), None);
    }

    #[tokio::test]
    async fn tiny_speed_does_not_panic() {
        let scenario = Scenario::from_json(
            r#"{"steps":[{"op":"set_url","url":"https://example.com/","after_ms":5}]}"#,
        )
        .unwrap();
        let report = run(&scenario, &TabviewConfig::default(), 1e-300).await;
        assert_eq!(report.loading_state, LoadingState::Ongoing);
    }

    #[test]
    fn zero_flush_interval_still_terminates() {
        let mut config = TabviewConfig::default();
        config.downloads.flush_interval_ms = 0;
        let mut replay = Replay::new(&config);
        replay.step(&crate::scenario::Op::SaveLink {
            url: "https://example.com/a.zip".into(),
        });

        replay.advance(Duration::from_secs(1));
        let report = replay.finish();
        assert_eq!(report.started_transfers.len(), 1);
        assert_eq!(report.queued_transfers, 0);
    }

    #[test]
    fn advance_fires_timers_in_order() {
        let mut replay = Replay::new(&TabviewConfig::default());
        replay.step(&crate::scenario::Op::SetUrl {
            url: "https://example.com/".into(),
            typed: true,
        });
        assert_eq!(replay.reporter().pending_geometry_updates(), 1);

        replay.advance(Duration::from_millis(10));
        assert!(!replay.reporter().is_visible());

        replay.advance(Duration::from_millis(40));
        assert!(replay.reporter().is_visible());
        assert_eq!(replay.controller().loading_state(), LoadingState::Ongoing);
    }
}
