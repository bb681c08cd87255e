//! OAuth provider trait and types.

use async_trait::async_trait;

use crate::error::Error;

/// OAuth endpoint URLs for a provider.
#[derive(Debug, Clone, PartialEq)]
pub struct OAuthUrls {
    pub auth_url: String,
    pub token_url: String,
}

/// Trait for OAuth 2.0 providers.
///
/// Implementations handle platform-specific OAuth flows including:
/// - Authorization URL generation
/// - Authorization code exchange for tokens
#[async_trait]
pub trait Provider: Send + Sync {
    /// Generate the authorization URL the user is sent to.
    ///
    /// # Arguments
    ///
    /// * `state` - Encoded state parameter, echoed back on the callback
    fn authorization_url(&self, state: &str) -> String;

    /// Exchange an authorization code for tokens.
    ///
    /// # Returns
    ///
    /// The token endpoint's JSON response, untouched. It is stored as the
    /// user's credentials.
    async fn exchange_code(&self, code: &str) -> Result<serde_json::Value, Error>;
}
