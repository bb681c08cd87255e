//! Standard Bearer token authentication.

use reqwest::RequestBuilder;
use secrecy::{ExposeSecret, SecretString};

/// Trait for authenticating HTTP requests against a provider's API.
pub trait ProviderAuth: Send + Sync {
    /// Apply authentication to a request builder.
    fn authenticate(&self, request: RequestBuilder) -> RequestBuilder;
}

/// Standard Bearer token authentication.
///
/// Uses the standard `Authorization: Bearer <token>` header pattern, plus any
/// fixed headers the provider requires on every call (e.g. `Notion-Version`).
pub struct BearerTokenAuth {
    token: SecretString,
    headers: Vec<(&'static str, String)>,
}

impl BearerTokenAuth {
    /// Create a new Bearer token authenticator.
    pub fn new(token: SecretString) -> Self {
        Self {
            token,
            headers: Vec::new(),
        }
    }

    /// Send `value` in header `name` on every authenticated request.
    pub fn with_header(mut self, name: &'static str, value: &str) -> Self {
        self.headers.push((name, value.to_string()));
        self
    }

}

impl ProviderAuth for BearerTokenAuth {
    fn authenticate(&self, request: RequestBuilder) -> RequestBuilder {
        self.headers.iter().fold(
            request.bearer_auth(self.token.expose_secret()),
            |request, (name, value)| request.header(*name, value),
        )
    }
}
