//! Target worksheet platform connection configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TargetConfig {
    /// Base URL of the target platform API.
    #[serde(default)]
    pub base_url: String,

    /// API token for the target platform.
    #[serde(default)]
    pub token: String,

    /// Pre-existing reference container (workspace) to reuse instead of
    /// creating a new one. When set but unresolvable, setup fails rather than
    /// silently creating a duplicate parallel container.
    #[serde(default)]
    pub reference_workspace_id: Option<u64>,
}

impl TargetConfig {
    /// Check if the target config has the minimum required fields.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty() && !self.token.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = TargetConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.reference_workspace_id, None);
    }

    #[test]
    fn configured_when_url_and_token_set() {
        let config = TargetConfig {
            base_url: "https://sheets.example.com/api".into(),
            token: "token123".into(),
            reference_workspace_id: None,
        };
        assert!(config.is_configured());
    }
}
