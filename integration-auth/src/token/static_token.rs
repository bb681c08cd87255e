//! Static internal-integration tokens.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;

/// A long-lived token issued out of band (e.g. a Notion internal integration).
///
/// Providers connected this way skip the OAuth redirect: "authorizing" a user
/// just stores the credentials this token produces.
pub struct StaticToken {
    token: SecretString,
}

impl StaticToken {
    pub fn new(token: SecretString) -> Self {
        Self { token }
    }

    /// Credentials blob in the same shape a token endpoint would return.
    pub fn credentials(&self) -> serde_json::Value {
        json!({ "access_token": self.token.expose_secret() })
    }
}
