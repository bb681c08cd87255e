//! Scoped store keys.

use std::fmt;

use crate::providers::IntegrationKind;

/// What a store entry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPurpose {
    State,
    Credentials,
}

impl KeyPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyPurpose::State => "state",
            KeyPurpose::Credentials => "credentials",
        }
    }
}

/// Store key scoped by provider, purpose, organization and user.
///
/// Renders as `{provider}_{purpose}:{org_id}:{user_id}`, so concurrent flows for
/// different users never touch the same entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreKey {
    provider: IntegrationKind,
    purpose: KeyPurpose,
    org_id: String,
    user_id: String,
}

impl StoreKey {
    pub fn new(provider: IntegrationKind, purpose: KeyPurpose, org_id: &str, user_id: &str) -> Self {
        Self {
            provider,
            purpose,
            org_id: org_id.to_string(),
            user_id: user_id.to_string(),
        }
    }

    /// Key of the pending OAuth state for a user.
    pub fn state(provider: IntegrationKind, org_id: &str, user_id: &str) -> Self {
        Self::new(provider, KeyPurpose::State, org_id, user_id)
    }

    /// Key of the stored credentials for a user.
    pub fn credentials(provider: IntegrationKind, org_id: &str, user_id: &str) -> Self {
        Self::new(provider, KeyPurpose::Credentials, org_id, user_id)
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}_{}:{}:{}",
            self.provider.as_str(),
            self.purpose.as_str(),
            self.org_id,
            self.user_id
        )
    }
}
