//! Click-to-play plugin gating.

use tabview_common::new_token;
use tabview_config::schema::PluginPolicy;

/// What to do with a plugin the page wants to instantiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginAdmission {
    Load,
    /// Show a placeholder that asks for consent.
    Placeholder,
    Deny,
}

/// Authorization token and blocked-plugin counter for one controller.
#[derive(Debug)]
pub struct PluginGate {
    policy: PluginPolicy,
    token: Option<String>,
    not_loaded: usize,
}

impl PluginGate {
    pub fn new(policy: PluginPolicy) -> Self {
        Self {
            policy,
            token: None,
            not_loaded: 0,
        }
    }

    /// `false` when the profile forbids plugin execution.
    pub fn can_load_plugins(&self) -> bool {
        self.policy != PluginPolicy::Disabled
    }

    pub fn plugin_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Invalidate the current grant; placeholders must ask again.
    pub fn clear_plugin_token(&mut self) {
        self.token = None;
    }

    /// Mint a fresh grant for the blocked placeholders.
    pub fn authorize(&mut self) -> String {
        let token = new_token();
        self.token = Some(token.clone());
        self.not_loaded = 0;
        token
    }

    /// Decide on a plugin instance presenting `token` (if any).
    pub fn admit(&mut self, token: Option<&str>) -> PluginAdmission {
        match self.policy {
            PluginPolicy::Disabled => PluginAdmission::Deny,
            PluginPolicy::Enabled => PluginAdmission::Load,
            PluginPolicy::OnDemand => {
                if token.is_some() && token == self.token.as_deref() {
                    PluginAdmission::Load
                } else {
                    self.not_loaded += 1;
                    PluginAdmission::Placeholder
                }
            }
        }
    }

    pub fn amount_of_not_loaded_plugins(&self) -> usize {
        self.not_loaded
    }

    /// Forget everything scoped to the previous document.
    pub fn reset(&mut self) {
        self.token = None;
        self.not_loaded = 0;
    }
}
