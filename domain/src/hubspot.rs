//! HubSpot integration: OAuth redirect handshake, read-once credentials and
//! contact/company items.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use integration_auth::http::HttpClientBuilder;
use integration_auth::oauth::providers::hubspot::Provider as HubSpotProvider;
use integration_auth::oauth::{OAuthState, OAuthUrls, Provider};
use integration_auth::providers::hubspot_config;
use integration_auth::store::{Store, StoreKey};
use integration_auth::IntegrationKind;
use log::*;
use serde::Deserialize;
use serde_json::Value;
use service::config::Config;

use crate::credentials::{CredentialStore, Credentials, ReadPolicy};
use crate::error::{Error, IntegrationErrorKind};
use crate::gateway::hubspot::{HubSpotClient, HubSpotObject};
use crate::integration::{Authorization, Integration};
use crate::integration_item::{value_text, IntegrationItem};
use crate::pagination::collect_items;

/// Lifetime of a pending OAuth state and of the credentials it yields.
const HANDSHAKE_TTL: Duration = Duration::from_secs(600);

const CONTACT_URL: &str = "https://app.hubspot.com/contacts";
const COMPANY_URL: &str = "https://app.hubspot.com/contacts/company";

/// Query parameters HubSpot redirects back with.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

pub struct HubSpot {
    store: Arc<dyn Store>,
    /// `None` when no client id/secret is configured; authorizing then fails.
    oauth: Option<Box<dyn Provider>>,
    client: HubSpotClient,
    credentials: CredentialStore,
}

impl HubSpot {
    pub fn new(
        oauth: Option<Box<dyn Provider>>,
        client: HubSpotClient,
        store: Arc<dyn Store>,
    ) -> Self {
        let credentials = CredentialStore::new(
            store.clone(),
            IntegrationKind::HubSpot,
            Some(HANDSHAKE_TTL),
            ReadPolicy::Consume,
        );
        Self {
            store,
            oauth,
            client,
            credentials,
        }
    }

    pub fn from_config(config: &Config, store: Arc<dyn Store>) -> Result<Self, Error> {
        let http_client = HttpClientBuilder::new()
            .with_timeout(config.http_timeout())
            .build()?;

        let oauth = match (config.hubspot_client_id(), config.hubspot_client_secret()) {
            (Some(client_id), Some(client_secret)) => {
                let defaults = hubspot_config();
                let urls = OAuthUrls {
                    auth_url: config
                        .hubspot_auth_url()
                        .or(defaults.auth_url)
                        .unwrap_or_default(),
                    token_url: config
                        .hubspot_token_url()
                        .or(defaults.token_url)
                        .unwrap_or_default(),
                };
                let mut provider = HubSpotProvider::new(
                    client_id,
                    client_secret,
                    config.hubspot_redirect_uri().to_string(),
                )
                .with_urls(urls)
                .with_http_client(http_client.clone());
                if let Some(scopes) = config.hubspot_scopes() {
                    provider = provider.with_scopes(scopes);
                }
                Some(Box::new(provider) as Box<dyn Provider>)
            }
            _ => {
                warn!("HubSpot client credentials not configured, HubSpot OAuth is disabled");
                None
            }
        };

        let mut client = HubSpotClient::new(http_client);
        if let Some(base_url) = config.hubspot_api_base_url() {
            client = client.with_base_url(&base_url);
        }

        Ok(Self::new(oauth, client, store))
    }

    fn oauth(&self) -> Result<&dyn Provider, Error> {
        self.oauth.as_deref().ok_or_else(|| {
            warn!("HubSpot OAuth requested but client credentials are not configured");
            Error::config("HubSpot OAuth is not configured")
        })
    }

    /// Complete the handshake started by [`Integration::authorize`] and store the tokens.
    pub async fn callback(&self, params: CallbackParams) -> Result<(), Error> {
        if let Some(error) = params.error {
            warn!("HubSpot rejected authorization: {error}");
            return Err(Error::integration(
                IntegrationErrorKind::ProviderRejected,
                &error,
            ));
        }

        let encoded = params.state.ok_or_else(|| {
            Error::integration(IntegrationErrorKind::StateMismatch, "Missing state.")
        })?;
        let received = OAuthState::decode(&encoded)?;

        let key =
            StoreKey::state(IntegrationKind::HubSpot, &received.org_id, &received.user_id)
                .to_string();
        let stored = self
            .store
            .get(&key)
            .await?
            .and_then(|raw| serde_json::from_str::<OAuthState>(&raw).ok());
        if !stored.is_some_and(|stored| received.matches(&stored)) {
            warn!(
                "HubSpot OAuth state mismatch for org {} user {}",
                received.org_id, received.user_id
            );
            return Err(Error::integration(
                IntegrationErrorKind::StateMismatch,
                "State does not match.",
            ));
        }

        // A matched state is spent whether or not the exchange succeeds.
        let exchange = async {
            let code = params.code.ok_or_else(|| {
                Error::integration(
                    IntegrationErrorKind::TokenExchangeFailed,
                    "Missing authorization code.",
                )
            })?;
            Ok::<_, Error>(self.oauth()?.exchange_code(&code).await?)
        };

        let (tokens, deleted) = tokio::join!(exchange, self.store.delete(&key));
        let tokens = tokens?;
        deleted?;

        self.credentials
            .save(
                &received.user_id,
                &received.org_id,
                &Credentials::new(tokens),
            )
            .await?;

        info!(
            "HubSpot connected for org {} user {}",
            received.org_id, received.user_id
        );
        Ok(())
    }

    async fn fetch(
        &self,
        access_token: &str,
        object: HubSpotObject,
    ) -> Result<Vec<IntegrationItem>, Error> {
        collect_items(
            |after: Option<String>| async move {
                self.client
                    .list_objects(access_token, object, after.as_deref())
                    .await
            },
            |raw| normalize(raw, object),
        )
        .await
    }
}

#[async_trait]
impl Integration for HubSpot {
    fn kind(&self) -> IntegrationKind {
        IntegrationKind::HubSpot
    }

    async fn authorize(&self, user_id: &str, org_id: &str) -> Result<Authorization, Error> {
        let oauth = self.oauth()?;
        let state = OAuthState::new(user_id, org_id);
        let key = StoreKey::state(IntegrationKind::HubSpot, org_id, user_id);

        self.store
            .set(
                &key.to_string(),
                &serde_json::to_string(&state)?,
                Some(HANDSHAKE_TTL),
            )
            .await?;

        debug!("Starting HubSpot OAuth for org {org_id}");
        Ok(Authorization::Redirect(
            oauth.authorization_url(&state.encode()?),
        ))
    }

    async fn credentials(&self, user_id: &str, org_id: &str) -> Result<Credentials, Error> {
        self.credentials.load(user_id, org_id).await
    }

    async fn items(&self, credentials: &Credentials) -> Result<Vec<IntegrationItem>, Error> {
        let access_token = credentials.access_token()?;

        let mut items = Vec::new();
        for object in [HubSpotObject::Contacts, HubSpotObject::Companies] {
            items.extend(self.fetch(access_token, object).await?);
        }

        info!("Retrieved {} items from HubSpot", items.len());
        Ok(items)
    }
}

/// Convert a raw CRM object into an [`IntegrationItem`].
pub fn normalize(raw: &Value, object: HubSpotObject) -> Result<IntegrationItem, Error> {
    let id = value_text(raw.get("id")).ok_or_else(|| {
        Error::integration(
            IntegrationErrorKind::MalformedItem,
            &format!("HubSpot {} object has no id", object.as_str()),
        )
    })?;
    let property = |name: &str| value_text(raw.get("properties").and_then(|p| p.get(name)));

    let (id, name, item_type, url) = match object {
        HubSpotObject::Contacts => {
            let full_name = format!(
                "{} {}",
                property("firstname").unwrap_or_default(),
                property("lastname").unwrap_or_default()
            );
            let name = match full_name.trim() {
                "" => "Unnamed Contact".to_string(),
                trimmed => trimmed.to_string(),
            };
            (
                format!("contact_{id}"),
                name,
                "Contact",
                format!("{CONTACT_URL}/{id}"),
            )
        }
        HubSpotObject::Companies => {
            let name = property("name")
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| "Unnamed Company".to_string());
            (
                format!("company_{id}"),
                name,
                "Company",
                format!("{COMPANY_URL}/{id}"),
            )
        }
    };

    Ok(IntegrationItem {
        id,
        name,
        item_type: item_type.to_string(),
        creation_time: value_text(raw.get("createdAt")),
        last_modified_time: value_text(raw.get("updatedAt")),
        parent_id: None,
        url: Some(url),
    })
}
