//! Stored provider credentials and the scoped store wrapper that reads and writes them.

use std::sync::Arc;
use std::time::Duration;

use integration_auth::store::{Store, StoreKey};
use integration_auth::IntegrationKind;
use log::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, IntegrationErrorKind};

/// Opaque credentials blob as returned by a provider token endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credentials(Value);

impl Credentials {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Parse credentials posted back by a client. Accepts a JSON object or a JSON
    /// string that itself holds an encoded object.
    pub fn parse(text: &str) -> Result<Self, Error> {
        match serde_json::from_str::<Value>(text)? {
            Value::String(inner) => Ok(Self(serde_json::from_str(&inner)?)),
            value => Ok(Self(value)),
        }
    }

    /// The bearer token to call the provider API with.
    pub fn access_token(&self) -> Result<&str, Error> {
        self.0
            .get("access_token")
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                Error::integration(
                    IntegrationErrorKind::NoAccessToken,
                    "No access token found in credentials",
                )
            })
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

/// What happens to stored credentials once they have been read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadPolicy {
    /// Delete on first successful read.
    Consume,
    /// Leave in place.
    Retain,
}

/// Reads and writes one provider's credentials, scoped by organization and user.
#[derive(Clone)]
pub struct CredentialStore {
    store: Arc<dyn Store>,
    provider: IntegrationKind,
    ttl: Option<Duration>,
    policy: ReadPolicy,
}

impl CredentialStore {
    pub fn new(
        store: Arc<dyn Store>,
        provider: IntegrationKind,
        ttl: Option<Duration>,
        policy: ReadPolicy,
    ) -> Self {
        Self {
            store,
            provider,
            ttl,
            policy,
        }
    }

    pub async fn save(
        &self,
        user_id: &str,
        org_id: &str,
        credentials: &Credentials,
    ) -> Result<(), Error> {
        let key = StoreKey::credentials(self.provider, org_id, user_id);
        let value = serde_json::to_string(credentials)?;
        self.store.set(&key.to_string(), &value, self.ttl).await?;
        debug!(
            "Stored {} credentials for org {org_id}",
            self.provider.display_name()
        );
        Ok(())
    }

    pub async fn load(&self, user_id: &str, org_id: &str) -> Result<Credentials, Error> {
        let key = StoreKey::credentials(self.provider, org_id, user_id).to_string();

        let raw = self.store.get(&key).await?.ok_or_else(|| {
            warn!(
                "No {} credentials stored for org {org_id}",
                self.provider.display_name()
            );
            Error::integration(
                IntegrationErrorKind::CredentialsMissing,
                "No credentials found.",
            )
        })?;
        let credentials = Credentials::new(serde_json::from_str(&raw)?);

        if self.policy == ReadPolicy::Consume {
            self.store.delete(&key).await?;
        }

        Ok(credentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainErrorKind;
    use integration_auth::store::MemoryStore;
    use serde_json::json;

    fn credential_store(store: Arc<MemoryStore>, policy: ReadPolicy) -> CredentialStore {
        CredentialStore::new(store, IntegrationKind::HubSpot, None, policy)
    }

    #[test]
    fn test_parse_object() {
        let credentials = Credentials::parse(r#"{"access_token":"abc"}"#).unwrap();
        assert_eq!(credentials.access_token().unwrap(), "abc");
    }

    #[test]
    fn test_parse_double_encoded() {
        let credentials = Credentials::parse(r#""{\"access_token\":\"abc\"}""#).unwrap();
        assert_eq!(credentials.as_value(), &json!({"access_token": "abc"}));
    }

    #[test]
    fn test_missing_or_empty_access_token() {
        for value in [json!({}), json!({"access_token": ""}), json!({"access_token": null})] {
            let err = Credentials::new(value).access_token().unwrap_err();
            assert_eq!(
                err.error_kind,
                DomainErrorKind::Integration(IntegrationErrorKind::NoAccessToken)
            );
        }
    }

    #[tokio::test]
    async fn test_consume_deletes_after_first_read() {
        let memory = Arc::new(MemoryStore::new());
        let store = credential_store(memory.clone(), ReadPolicy::Consume);
        let credentials = Credentials::new(json!({"access_token": "abc"}));

        store.save("user1", "org1", &credentials).await.unwrap();
        assert_eq!(store.load("user1", "org1").await.unwrap(), credentials);

        let err = store.load("user1", "org1").await.unwrap_err();
        assert_eq!(
            err.error_kind,
            DomainErrorKind::Integration(IntegrationErrorKind::CredentialsMissing)
        );
        assert_eq!(err.detail(), "No credentials found.");
        assert!(memory.is_empty().await);
    }

    #[tokio::test]
    async fn test_retain_allows_repeated_reads() {
        let store = credential_store(Arc::new(MemoryStore::new()), ReadPolicy::Retain);
        let credentials = Credentials::new(json!({"access_token": "abc"}));

        store.save("user1", "org1", &credentials).await.unwrap();
        assert_eq!(store.load("user1", "org1").await.unwrap(), credentials);
        assert_eq!(store.load("user1", "org1").await.unwrap(), credentials);
    }

    #[tokio::test]
    async fn test_scoped_by_org_and_user() {
        let memory = Arc::new(MemoryStore::new());
        let store = credential_store(memory.clone(), ReadPolicy::Retain);
        let credentials = Credentials::new(json!({"access_token": "abc"}));

        store.save("user1", "org1", &credentials).await.unwrap();

        assert!(memory
            .get("hubspot_credentials:org1:user1")
            .await
            .unwrap()
            .is_some());
        assert!(store.load("user2", "org1").await.is_err());
        assert!(store.load("user1", "org2").await.is_err());
    }
}
