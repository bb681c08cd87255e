//! Integration identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Third-party platforms that can be connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationKind {
    HubSpot,
    Notion,
}

impl IntegrationKind {
    /// Get the integration identifier string.
    ///
    /// This is also the prefix of every credential store key owned by the integration.
    pub fn as_str(&self) -> &'static str {
        match self {
            IntegrationKind::HubSpot => "hubspot",
            IntegrationKind::Notion => "notion",
        }
    }

    /// Human readable platform name, used in log and error messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            IntegrationKind::HubSpot => "HubSpot",
            IntegrationKind::Notion => "Notion",
        }
    }
}

impl fmt::Display for IntegrationKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integration_kind_as_str() {
        assert_eq!(IntegrationKind::HubSpot.as_str(), "hubspot");
        assert_eq!(IntegrationKind::Notion.as_str(), "notion");
    }

    #[test]
    fn test_unknown_integration_is_rejected() {
        assert!(serde_json::from_str::<IntegrationKind>("\"salesforce\"").is_err());
    }

    #[test]
    fn test_integration_kind_serde_lowercase() {
        let kind: IntegrationKind = serde_json::from_str("\"hubspot\"").unwrap();
        assert_eq!(kind, IntegrationKind::HubSpot);
        assert_eq!(
            serde_json::to_string(&IntegrationKind::Notion).unwrap(),
            "\"notion\""
        );
    }
}
