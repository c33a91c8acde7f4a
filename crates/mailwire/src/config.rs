//! Message defaults.
//!
//! A `TransmissionConfig` is typically loaded once from JSON and used to
//! seed every message built afterwards.

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::payload::Options;

/// Defaults applied to new messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransmissionConfig {
    /// Delivery options.
    pub options: Options,
    /// Default sender, e.g. `"Acme" <noreply@acme.test>` or a bare email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Default reply-to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    /// Default campaign id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<String>,
    /// Default return path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_path: Option<String>,
}

impl TransmissionConfig {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Into::into)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TransmissionConfig::from_json("{}").unwrap();
        assert_eq!(config, TransmissionConfig::default());
        assert!(config.options.open_tracking);
    }

    #[test]
    fn test_config_from_json() {
        let config = TransmissionConfig::from_json(
            r#"{
                "options": { "sandbox": true, "click_tracking": false },
                "from": "noreply@acme.test",
                "campaign_id": "onboarding"
            }"#,
        )
        .unwrap();

        assert!(config.options.sandbox);
        assert!(!config.options.click_tracking);
        assert!(config.options.open_tracking);
        assert_eq!(config.from.as_deref(), Some("noreply@acme.test"));
        assert_eq!(config.campaign_id.as_deref(), Some("onboarding"));
        assert!(config.reply_to.is_none());
    }

    #[test]
    fn test_malformed_config() {
        assert!(matches!(
            TransmissionConfig::from_json("{"),
            Err(crate::Error::Json(_))
        ));
    }
}
