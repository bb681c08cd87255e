//! HubSpot CRM objects API client.

use integration_auth::providers::hubspot_config;
use integration_auth::token::{BearerTokenAuth, ProviderAuth};
use log::*;
use secrecy::SecretString;
use serde::Deserialize;
use serde_json::Value;

use super::upstream_failure;
use crate::error::Error;
use crate::pagination::Page;

/// Objects requested per page.
const PAGE_LIMIT: &str = "100";

/// The CRM object collections items are pulled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HubSpotObject {
    Contacts,
    Companies,
}

impl HubSpotObject {
    /// Path segment under `/crm/v3/objects/`.
    pub fn as_str(&self) -> &'static str {
        match self {
            HubSpotObject::Contacts => "contacts",
            HubSpotObject::Companies => "companies",
        }
    }

    /// Properties requested for every object of this collection.
    pub fn properties(&self) -> &'static [&'static str] {
        match self {
            HubSpotObject::Contacts => &[
                "name",
                "firstname",
                "lastname",
                "email",
                "phone",
                "company",
                "industry",
            ],
            HubSpotObject::Companies => &["name", "domain", "industry", "type"],
        }
    }
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    results: Vec<Value>,
    paging: Option<Paging>,
}

#[derive(Debug, Deserialize)]
struct Paging {
    next: Option<PagingNext>,
}

#[derive(Debug, Deserialize)]
struct PagingNext {
    after: Option<String>,
}

/// Client for `GET /crm/v3/objects/{object}`.
pub struct HubSpotClient {
    client: reqwest::Client,
    base_url: String,
}

impl HubSpotClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: hubspot_config().api_base_url,
        }
    }

    /// Point the client at another API host (a mock server in tests).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Fetch one page of `object`, starting after `after` when given.
    pub async fn list_objects(
        &self,
        access_token: &str,
        object: HubSpotObject,
        after: Option<&str>,
    ) -> Result<Page, Error> {
        let url = format!("{}/crm/v3/objects/{}", self.base_url, object.as_str());

        let mut query = vec![("limit", PAGE_LIMIT)];
        query.extend(object.properties().iter().map(|p| ("properties", *p)));
        if let Some(after) = after {
            query.push(("after", after));
        }

        let auth = BearerTokenAuth::new(SecretString::new(access_token.to_string()));

        debug!("Fetching HubSpot {} (after: {:?})", object.as_str(), after);

        let response = auth
            .authenticate(self.client.get(&url).query(&query))
            .send()
            .await
            .inspect_err(|e| warn!("Failed to reach HubSpot {}: {:?}", object.as_str(), e))?;

        if !response.status().is_success() {
            let what = format!("Failed to fetch {} from HubSpot", object.as_str());
            return Err(upstream_failure(response, &what).await);
        }

        let list: ListResponse = response.json().await?;
        Ok(Page {
            results: list.results,
            next_cursor: list.paging.and_then(|p| p.next).and_then(|n| n.after),
        })
    }
}
