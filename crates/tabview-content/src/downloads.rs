//! Transfers deferred until the hosting page stops navigating.

use std::collections::VecDeque;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::engine::RequestMethod;
use crate::load_state::LoadingState;

/// Where the transfer manager should write a transfer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferTarget {
    /// Ask the user for a location.
    #[default]
    Ask,
    /// The default downloads directory.
    Downloads,
    Path(PathBuf),
}

/// A file transfer handed to the transfer manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub url: String,
    #[serde(default)]
    pub method: RequestMethod,
    #[serde(default)]
    pub body: Option<Vec<u8>>,
    #[serde(default)]
    pub target: TransferTarget,
}

impl Transfer {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: RequestMethod::Get,
            body: None,
            target: TransferTarget::Ask,
        }
    }
}

/// Errors returned by a [`TransferSink`].
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// The manager is out of capacity; the transfer is handed back untouched.
    #[error("transfer manager exhausted, cannot start {}", .0.url)]
    Exhausted(Transfer),

    #[error("transfer rejected: {0}")]
    Rejected(String),
}

/// The transfer manager: persists and executes file transfers.
pub trait TransferSink {
    fn enqueue(&mut self, transfer: Transfer) -> Result<(), TransferError>;
}

/// FIFO queue of transfers waiting for the current navigation to settle.
#[derive(Debug, Default)]
pub struct DownloadInterceptor {
    queue: VecDeque<Transfer>,
}

impl DownloadInterceptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_delayed_transfer(&mut self, transfer: Transfer) {
        debug!(url = %transfer.url, queued = self.queue.len() + 1, "transfer deferred");
        self.queue.push_back(transfer);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Hand every queued transfer to `sink` in FIFO order, unless the page
    /// is still loading.
    ///
    /// Each transfer is consumed exactly once. Failures are not retried;
    /// they are returned so the caller can re-enqueue.
    pub fn flush(&mut self, state: LoadingState, sink: &mut dyn TransferSink) -> Vec<TransferError> {
        if state == LoadingState::Ongoing || self.queue.is_empty() {
            return Vec::new();
        }

        let mut failures = Vec::new();
        while let Some(transfer) = self.queue.pop_front() {
            let url = transfer.url.clone();
            match sink.enqueue(transfer) {
                Ok(()) => debug!(url = %url, "transfer started"),
                Err(e) => {
                    warn!(url = %url, "transfer not started: {e}");
                    failures.push(e);
                }
            }
        }
        failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::MemoryTransferSink;

    fn queued(urls: &[&str]) -> DownloadInterceptor {
        let mut interceptor = DownloadInterceptor::new();
        for url in urls {
            interceptor.start_delayed_transfer(Transfer::new(*url));
        }
        interceptor
    }

    #[test]
    fn flush_waits_while_loading() {
        let mut interceptor = queued(&["https://example.com/a.zip"]);
        let mut sink = MemoryTransferSink::new();

        assert!(interceptor
            .flush(LoadingState::Ongoing, &mut sink)
            .is_empty());
        assert_eq!(interceptor.len(), 1);
        assert!(sink.started.is_empty());
    }

    #[test]
    fn flush_drains_in_fifo_order() {
        let mut interceptor = queued(&["a", "b", "c"]);
        let mut sink = MemoryTransferSink::new();

        for state in [
            LoadingState::NotStarted,
            LoadingState::Finished,
            LoadingState::Deferred,
        ] {
            interceptor.start_delayed_transfer(Transfer::new(format!("{state:?}")));
            interceptor.flush(state, &mut sink);
            assert!(interceptor.is_empty());
        }

        let urls: Vec<_> = sink.started.iter().map(|t| t.url.as_str()).collect();
        assert_eq!(urls, vec!["a", "b", "c", "NotStarted", "Finished", "Deferred"]);
    }

    #[test]
    fn exhausted_transfers_are_handed_back_not_retried() {
        let mut interceptor = queued(&["a", "b", "c"]);
        let mut sink = MemoryTransferSink::with_capacity(1);

        let failures = interceptor.flush(LoadingState::Finished, &mut sink);
        assert!(interceptor.is_empty());
        assert_eq!(sink.started.len(), 1);

        let returned: Vec<_> = failures
            .into_iter()
            .map(|e| match e {
                TransferError::Exhausted(transfer) => transfer.url,
                other => panic!("unexpected error {other}"),
            })
            .collect();
        assert_eq!(returned, vec!["b", "c"]);
    }

    #[test]
    fn transfer_deserializes_with_defaults() {
        let transfer: Transfer = serde_json::from_str(r#"{"url":"https://example.com/x"}"#).unwrap();
        assert_eq!(transfer.method, RequestMethod::Get);
        assert_eq!(transfer.target, TransferTarget::Ask);
        assert!(transfer.body.is_none());
    }
}
