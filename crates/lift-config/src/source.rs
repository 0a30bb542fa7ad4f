//! Source planning system connection configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SourceConfig {
    /// Base URL of the source system's export API.
    #[serde(default)]
    pub base_url: String,

    /// API token for the source system.
    #[serde(default)]
    pub token: String,
}

impl SourceConfig {
    /// Check if the source config has the minimum required fields.
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
        assert!(!SourceConfig::default().is_configured());
    }

    #[test]
    fn configured_when_url_and_token_set() {
        let config = SourceConfig {
            base_url: "https://plan.example.com/api".into(),
            token: "token123".into(),
        };
        assert!(config.is_configured());
    }
}
