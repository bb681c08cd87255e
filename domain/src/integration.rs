//! The shape every integration shares, and the registry the web layer dispatches through.

use std::sync::Arc;

use async_trait::async_trait;
use integration_auth::store::Store;
use integration_auth::IntegrationKind;
use service::config::Config;

use crate::credentials::Credentials;
use crate::error::Error;
use crate::hubspot::HubSpot;
use crate::integration_item::IntegrationItem;
use crate::notion::Notion;

/// Outcome of starting authorization for a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authorization {
    /// Send the user to this provider consent URL.
    Redirect(String),
    /// Credentials are already stored; nothing for the user to do.
    Connected,
}

#[async_trait]
pub trait Integration: Send + Sync {
    fn kind(&self) -> IntegrationKind;

    /// Begin connecting `user_id` in `org_id` to this provider.
    async fn authorize(&self, user_id: &str, org_id: &str) -> Result<Authorization, Error>;

    /// Read back the credentials stored for `user_id` in `org_id`.
    async fn credentials(&self, user_id: &str, org_id: &str) -> Result<Credentials, Error>;

    /// Fetch every item visible with `credentials`, normalized.
    async fn items(&self, credentials: &Credentials) -> Result<Vec<IntegrationItem>, Error>;
}

/// All configured integrations.
#[derive(Clone)]
pub struct Integrations {
    hubspot: Arc<HubSpot>,
    notion: Arc<Notion>,
}

impl Integrations {
    pub fn new(hubspot: HubSpot, notion: Notion) -> Self {
        Self {
            hubspot: Arc::new(hubspot),
            notion: Arc::new(notion),
        }
    }

    /// Build every integration from configuration, sharing one credential store.
    pub fn from_config(config: &Config, store: Arc<dyn Store>) -> Result<Self, Error> {
        Ok(Self::new(
            HubSpot::from_config(config, store.clone())?,
            Notion::from_config(config, store)?,
        ))
    }

    /// HubSpot is the only integration with a redirect callback, so the callback
    /// route needs it by concrete type.
    pub fn hubspot(&self) -> &HubSpot {
        &self.hubspot
    }

    pub fn get(&self, kind: IntegrationKind) -> Arc<dyn Integration> {
        match kind {
            IntegrationKind::HubSpot => self.hubspot.clone(),
            IntegrationKind::Notion => self.notion.clone(),
        }
    }
}
