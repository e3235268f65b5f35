//! Load-state machine for the active document.

use serde::{Deserialize, Serialize};

/// Loading state of the document shown by a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadingState {
    /// Nothing has been navigated to yet.
    NotStarted,
    /// A navigation is in progress.
    Ongoing,
    /// The last navigation cycle ended.
    Finished,
    /// The response of the current navigation is being handed to a transfer
    /// instead of being rendered.
    Deferred,
}

/// Inputs that drive [`LoadStateMachine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadEvent {
    /// A navigation started or committed.
    Navigate,
    /// The engine reported the load as finished (or the deferred response was handed off).
    Finish,
    /// The response turned out to be a download.
    Defer,
}

/// Tracks [`LoadingState`] with a total transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadStateMachine {
    state: LoadingState,
}

impl LoadStateMachine {
    pub fn new() -> Self {
        Self {
            state: LoadingState::NotStarted,
        }
    }

    pub fn state(&self) -> LoadingState {
        self.state
    }

    /// Feed an event. Returns the new state when it actually changed.
    pub fn apply(&mut self, event: LoadEvent) -> Option<LoadingState> {
        let next = transition(self.state, event);
        if next == self.state {
            return None;
        }
        self.state = next;
        Some(next)
    }
}

impl Default for LoadStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

fn transition(state: LoadingState, event: LoadEvent) -> LoadingState {
    use LoadEvent::*;
    use LoadingState::*;

    match (state, event) {
        (_, Navigate) => Ongoing,
        // Before the first navigation everything else is ignored.
        (NotStarted, Finish | Defer) => NotStarted,
        (Ongoing, Finish) => Finished,
        (Ongoing, Defer) => Deferred,
        (Deferred, Finish) => Finished,
        (Deferred, Defer) => Deferred,
        (Finished, Finish | Defer) => Finished,
    }
}
