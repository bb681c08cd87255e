//! Pre-configured provider settings.

/// Provider configuration with endpoints and settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    /// Base URL of the provider's REST API.
    pub api_base_url: String,
    /// OAuth authorization endpoint, if the provider uses a redirect flow.
    pub auth_url: Option<String>,
    /// OAuth token endpoint, if the provider uses a redirect flow.
    pub token_url: Option<String>,
    /// Scopes registered with the provider (space separated).
    pub scopes: Option<String>,
}

/// Get HubSpot configuration.
pub fn hubspot_config() -> ProviderConfig {
    ProviderConfig {
        api_base_url: "https://api.hubapi.com".to_string(),
        auth_url: Some("https://app.hubspot.com/oauth/authorize".to_string()),
        token_url: Some("https://api.hubapi.com/oauth/v1/token".to_string()),
        scopes: Some(
            "contacts oauth crm.objects.contacts.read crm.objects.contacts.write".to_string(),
        ),
    }
}

/// Get Notion configuration.
///
/// Notion is connected through an internal integration token, so there are no
/// OAuth endpoints.
pub fn notion_config() -> ProviderConfig {
    ProviderConfig {
        api_base_url: "https://api.notion.com/v1".to_string(),
        auth_url: None,
        token_url: None,
        scopes: None,
    }
}
