//! Notifications emitted by a content controller.

use serde::{Deserialize, Serialize};
use tabview_common::{EntryId, FrameId, NetworkError};

use crate::downloads::Transfer;
use crate::engine::{Feature, SourceRequestId};
use crate::load_state::LoadingState;

/// Transport counters for the current document. Overwritten on every
/// transport report and reset to zero when a navigation starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadStatus {
    pub finished_requests: u32,
    pub started_requests: u32,
    pub bytes_received: u64,
    pub bytes_total: u64,
    /// Bytes per second.
    pub speed: u64,
}

/// Trust classification of the current document, derived from its URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentState {
    Unknown,
    /// Internal pages (`about:`, `view-source:`).
    Application,
    /// Local files.
    Local,
    /// Remote content over an unencrypted transport.
    Insecure,
    /// Remote content over an encrypted transport.
    Secure,
}

impl ContentState {
    pub fn from_url(raw: &str) -> Self {
        match url::Url::parse(raw) {
            Ok(url) => match url.scheme() {
                "about" | "view-source" | "data" => ContentState::Application,
                "file" => ContentState::Local,
                "https" | "wss" => ContentState::Secure,
                "http" | "ws" | "ftp" => ContentState::Insecure,
                _ => ContentState::Unknown,
            },
            Err(_) => ContentState::Unknown,
        }
    }
}

/// Events emitted by a controller, drained by the host in emission order.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentEvent {
    LoadingStateChanged(LoadingState),
    ContentStateChanged(ContentState),
    TitleChanged(String),
    UrlChanged(String),
    IconChanged(Option<String>),
    ZoomChanged(u32),
    /// Free-form load message from the engine.
    LoadMessageChanged(String),
    /// Document load progress in percent.
    LoadProgress(u8),
    LoadStatusChanged(LoadStatus),
    /// Status-bar text, e.g. a hovered link.
    StatusMessageChanged(String),
    /// Entries or current index changed.
    HistoryChanged,
    /// A navigation created a new history entry. `typed` marks user-typed input.
    EntryCommitted {
        id: EntryId,
        url: String,
        typed: bool,
    },
    /// A removed entry must also be dropped from persisted storage.
    EntryPurged(EntryId),
    PermissionRequested {
        frame: FrameId,
        feature: Feature,
        /// `true` retracts a previously shown prompt.
        cancel: bool,
    },
    ProgressBarGeometryChanged,
    PrintRequested(FrameId),
    WindowCloseRequested {
        /// The host should ask the user before closing.
        confirm: bool,
    },
    /// Completion of an auxiliary source fetch.
    SourceReady {
        request: SourceRequestId,
        result: Result<String, NetworkError>,
    },
    /// The transfer manager refused a queued transfer; re-enqueue to retry.
    TransferRejected { transfer: Transfer, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_state_from_scheme() {
        assert_eq!(ContentState::from_url("about:blank"), ContentState::Application);
        assert_eq!(
            ContentState::from_url("view-source:https://example.com/"),
            ContentState::Application
        );
        assert_eq!(ContentState::from_url("file:///tmp/a.html"), ContentState::Local);
        assert_eq!(ContentState::from_url("https://example.com/"), ContentState::Secure);
        assert_eq!(ContentState::from_url("http://example.com/"), ContentState::Insecure);
        assert_eq!(ContentState::from_url("gopher://example.com/"), ContentState::Unknown);
        assert_eq!(ContentState::from_url("not a url"), ContentState::Unknown);
    }

    #[test]
    fn load_status_defaults_to_zero() {
        let status = LoadStatus::default();
        assert_eq!(status.finished_requests, 0);
        assert_eq!(status.started_requests, 0);
        assert_eq!(status.bytes_received, 0);
        assert_eq!(status.bytes_total, 0);
        assert_eq!(status.speed, 0);
    }

    #[test]
    fn load_status_from_json() {
        let status: LoadStatus = serde_json::from_str(
            r#"{"finished_requests":3,"started_requests":7,"bytes_received":2048,"bytes_total":4096,"speed":512}"#,
        )
        .unwrap();
        assert_eq!(status.started_requests, 7);
        assert_eq!(status.speed, 512);
    }
}
