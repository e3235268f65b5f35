//! Content-view controller for a single browser tab.
//!
//! Owns the lifecycle of one loaded document and provides:
//! - Navigation history with per-entry zoom/scroll and two persisted encodings
//! - A total load-state machine (not started, ongoing, finished, deferred)
//! - Permission, click-to-play and download gating
//! - Event handling for rendering-engine and transport callbacks
//! - A timer-driven progress reporter that observes the controller
//!
//! The rendering engine and the transfer manager are collaborators behind the
//! [`RenderingEngine`] and [`TransferSink`] traits. Everything runs on one
//! thread; timers are polled by the host loop.

pub mod actions;
pub mod controller;
pub mod downloads;
pub mod engine;
pub mod events;
pub mod headless;
pub mod history;
pub mod load_state;
pub mod permissions;
pub mod plugins;
pub mod progress;
pub mod search;
pub mod timers;

pub use actions::{ActionParameters, ContentAction};
pub use controller::{ContentController, ControllerConfig};
pub use downloads::{DownloadInterceptor, Transfer, TransferError, TransferSink, TransferTarget};
pub use engine::{
    EditCommand, Feature, FindFlags, NavigationKind, NavigationRequest, RenderingEngine,
    RequestMethod, ResponseInfo, SourceRequestId,
};
pub use events::{ContentEvent, ContentState, LoadStatus};
pub use headless::{HeadlessEngine, MemoryTransferSink};
pub use history::{HistoryEntry, HistorySnapshot, HistoryStore};
pub use load_state::{LoadEvent, LoadStateMachine, LoadingState};
pub use permissions::{PermissionDecision, PermissionGate};
pub use plugins::{PluginAdmission, PluginGate};
pub use progress::{ProgressReporter, ProgressSource, ProgressView};
pub use timers::{Clock, ManualClock, SystemClock, TimerId, TimerQueue};
