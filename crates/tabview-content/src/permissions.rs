//! Pending feature-permission requests.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tabview_common::FrameId;

use crate::engine::Feature;

/// The host UI's answer to a permission prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionDecision {
    pub granted: bool,
    /// Apply the same answer to later requests from the same host.
    #[serde(default)]
    pub remember: bool,
}

impl PermissionDecision {
    pub fn grant() -> Self {
        Self {
            granted: true,
            remember: false,
        }
    }

    pub fn deny() -> Self {
        Self {
            granted: false,
            remember: false,
        }
    }

    pub fn remembered(self) -> Self {
        Self {
            remember: true,
            ..self
        }
    }
}

/// Set of (frame, feature) pairs awaiting a decision, plus remembered
/// per-host answers.
#[derive(Debug, Default)]
pub struct PermissionGate {
    pending: BTreeSet<(FrameId, Feature)>,
    remembered: HashMap<(String, Feature), bool>,
}

impl PermissionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a request. Returns `false` if the pair was already pending.
    pub fn request(&mut self, frame: FrameId, feature: Feature) -> bool {
        self.pending.insert((frame, feature))
    }

    /// Drop a request the page withdrew. Returns `false` if it was not pending.
    pub fn cancel(&mut self, frame: FrameId, feature: Feature) -> bool {
        self.pending.remove(&(frame, feature))
    }

    /// Take a request out of the pending set for resolution.
    pub fn resolve(&mut self, frame: FrameId, feature: Feature) -> bool {
        self.pending.remove(&(frame, feature))
    }

    pub fn is_pending(&self, frame: FrameId, feature: Feature) -> bool {
        self.pending.contains(&(frame, feature))
    }

    pub fn pending(&self) -> impl Iterator<Item = (FrameId, Feature)> + '_ {
        self.pending.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove every pending request, e.g. when the document goes away.
    pub fn drain(&mut self) -> Vec<(FrameId, Feature)> {
        std::mem::take(&mut self.pending).into_iter().collect()
    }

    pub fn remember(&mut self, host: &str, feature: Feature, granted: bool) {
        self.remembered.insert((host.to_string(), feature), granted);
    }

    pub fn remembered(&self, host: &str, feature: Feature) -> Option<bool> {
        self.remembered.get(&(host.to_string(), feature)).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_then_cancel_leaves_nothing_pending() {
        let mut gate = PermissionGate::new();
        assert!(gate.request(FrameId::MAIN, Feature::Geolocation));
        assert!(gate.is_pending(FrameId::MAIN, Feature::Geolocation));
        assert!(gate.cancel(FrameId::MAIN, Feature::Geolocation));
        assert!(gate.is_empty());
    }

    #[test]
    fn duplicate_request_is_not_added_twice() {
        let mut gate = PermissionGate::new();
        assert!(gate.request(FrameId(3), Feature::Notifications));
        assert!(!gate.request(FrameId(3), Feature::Notifications));
        assert_eq!(gate.len(), 1);
    }

    #[test]
    fn pairs_are_keyed_by_frame_and_feature() {
        let mut gate = PermissionGate::new();
        gate.request(FrameId(1), Feature::Geolocation);
        gate.request(FrameId(2), Feature::Geolocation);
        gate.request(FrameId(1), Feature::Fullscreen);
        assert_eq!(gate.len(), 3);

        assert!(gate.resolve(FrameId(2), Feature::Geolocation));
        assert!(!gate.resolve(FrameId(2), Feature::Geolocation));
        assert_eq!(
            gate.pending().collect::<Vec<_>>(),
            vec![
                (FrameId(1), Feature::Geolocation),
                (FrameId(1), Feature::Fullscreen)
            ]
        );
    }

    #[test]
    fn cancel_without_request_is_a_no_op() {
        let mut gate = PermissionGate::new();
        assert!(!gate.cancel(FrameId::MAIN, Feature::PointerLock));
        assert!(gate.is_empty());
    }

    #[test]
    fn drain_empties_the_set() {
        let mut gate = PermissionGate::new();
        gate.request(FrameId(1), Feature::MediaAudio);
        gate.request(FrameId(1), Feature::MediaVideo);
        assert_eq!(gate.drain().len(), 2);
        assert!(gate.is_empty());
    }

    #[test]
    fn remembered_decisions_are_per_host_and_feature() {
        let mut gate = PermissionGate::new();
        gate.remember("example.com", Feature::Notifications, false);
        assert_eq!(gate.remembered("example.com", Feature::Notifications), Some(false));
        assert_eq!(gate.remembered("example.com", Feature::Geolocation), None);
        assert_eq!(gate.remembered("example.org", Feature::Notifications), None);

        gate.remember("example.com", Feature::Notifications, true);
        assert_eq!(gate.remembered("example.com", Feature::Notifications), Some(true));
    }

    #[test]
    fn decision_builders() {
        assert!(PermissionDecision::grant().granted);
        assert!(!PermissionDecision::deny().granted);
        assert!(PermissionDecision::deny().remembered().remember);
    }
}
