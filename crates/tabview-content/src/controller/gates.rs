use tabview_common::FrameId;
use tracing::{debug, info, warn};

use crate::downloads::{Transfer, TransferError, TransferSink};
use crate::engine::{Feature, RenderingEngine, SourceRequestId};
use crate::events::ContentEvent;
use crate::permissions::PermissionDecision;

use super::{ContentController, ControllerTimer};

// =============================================================================
// PERMISSIONS
// =============================================================================

impl<E: RenderingEngine, S: TransferSink> ContentController<E, S> {
    /// Apply the host UI's decision for a pending request.
    ///
    /// The decision reaches the engine exactly once; the pair leaves the
    /// pending set whatever the outcome. Returns `false` when nothing was
    /// pending for the pair.
    pub fn resolve_permission(
        &mut self,
        frame: FrameId,
        feature: Feature,
        decision: PermissionDecision,
    ) -> bool {
        if !self.permissions.resolve(frame, feature) {
            debug!(%frame, ?feature, "decision for a request that is not pending");
            return false;
        }
        debug!(%frame, ?feature, granted = decision.granted, "permission resolved");
        self.engine
            .resolve_permission(frame, feature, decision.granted);

        if decision.remember {
            match self.current_host() {
                Some(host) => self.permissions.remember(&host, feature, decision.granted),
                None => debug!(url = %self.url, "no host to remember decision for"),
            }
        }
        true
    }
}

// =============================================================================
// PLUGINS
// =============================================================================

impl<E: RenderingEngine, S: TransferSink> ContentController<E, S> {
    pub fn can_load_plugins(&self) -> bool {
        self.plugins.can_load_plugins()
    }

    pub fn plugin_token(&self) -> Option<&str> {
        self.plugins.plugin_token()
    }

    pub fn amount_of_not_loaded_plugins(&self) -> usize {
        self.plugins.amount_of_not_loaded_plugins()
    }

    pub fn clear_plugin_token(&mut self) {
        self.plugins.clear_plugin_token();
    }

    /// Authorize every blocked placeholder with a fresh token.
    pub fn load_plugins(&mut self) {
        let blocked = self.plugins.amount_of_not_loaded_plugins();
        let token = self.plugins.authorize();
        debug!(blocked, "activating blocked plugins");
        self.engine.activate_plugins(&token);
    }
}

// =============================================================================
// TRANSFERS AND AUXILIARY FETCHES
// =============================================================================

impl<E: RenderingEngine, S: TransferSink> ContentController<E, S> {
    /// Queue a download of `url` without touching the loading state.
    pub fn save_link(&mut self, url: &str) {
        self.start_delayed_transfer(Transfer::new(url));
    }

    /// Queue a transfer; it starts on a flush tick once the page is not
    /// navigating.
    pub fn start_delayed_transfer(&mut self, transfer: Transfer) {
        self.downloads.start_delayed_transfer(transfer);
        if self.flush_timer.is_none() {
            let interval = self.config.flush_interval;
            self.flush_timer = Some(
                self.timers
                    .start_repeating(interval, ControllerTimer::FlushTransfers),
            );
        }
    }

    /// Hand queued transfers to the transfer manager if the page is not
    /// navigating.
    ///
    /// Exhausted transfers are announced with `TransferRejected` and not
    /// retried.
    pub fn flush(&mut self) {
        let state = self.load_state.state();
        for error in self.downloads.flush(state, &mut self.sink) {
            match error {
                TransferError::Exhausted(transfer) => {
                    let reason = format!("transfer manager exhausted for {}", transfer.url);
                    self.emit(ContentEvent::TransferRejected { transfer, reason });
                }
                TransferError::Rejected(reason) => {
                    warn!("transfer dropped: {reason}");
                }
            }
        }

        if self.downloads.is_empty() {
            if let Some(id) = self.flush_timer.take() {
                self.timers.cancel(id);
            }
        }
    }

    /// Fetch the source of the current document. Completion arrives via
    /// `on_source_fetched` and is reported as `SourceReady`.
    pub fn view_source(&mut self) -> Option<SourceRequestId> {
        if self.url.is_empty() {
            debug!("nothing to view the source of");
            return None;
        }
        let request = SourceRequestId(self.next_source_request);
        self.next_source_request += 1;
        self.pending_sources.insert(request);

        info!(%request, url = %self.url, "fetching source");
        self.engine.fetch_source(request, &self.url);
        Some(request)
    }
}
