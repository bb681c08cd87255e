//! Notion integration: static internal-integration token, read-many credentials and
//! page/database items from the search API.

use std::sync::Arc;

use async_trait::async_trait;
use integration_auth::http::HttpClientBuilder;
use integration_auth::store::Store;
use integration_auth::token::StaticToken;
use integration_auth::IntegrationKind;
use log::*;
use serde_json::Value;
use service::config::Config;

use crate::credentials::{CredentialStore, Credentials, ReadPolicy};
use crate::error::{Error, IntegrationErrorKind};
use crate::gateway::notion::NotionClient;
use crate::integration::{Authorization, Integration};
use crate::integration_item::{value_text, IntegrationItem};
use crate::pagination::collect_items;
use crate::search::find_key;

/// Name used when no `content` text exists anywhere in the object.
const FALLBACK_NAME: &str = "multi_select";

pub struct Notion {
    /// `None` when no token is configured; authorizing then fails.
    token: Option<StaticToken>,
    client: NotionClient,
    credentials: CredentialStore,
}

impl Notion {
    pub fn new(token: Option<StaticToken>, client: NotionClient, store: Arc<dyn Store>) -> Self {
        Self {
            token,
            client,
            credentials: CredentialStore::new(
                store,
                IntegrationKind::Notion,
                None,
                ReadPolicy::Retain,
            ),
        }
    }

    pub fn from_config(config: &Config, store: Arc<dyn Store>) -> Result<Self, Error> {
        let token = config
            .notion_token()
            .map(StaticToken::new);
        if token.is_none() {
            warn!("Notion token not configured, Notion authorization is disabled");
        }

        let http_client = HttpClientBuilder::new()
            .with_timeout(config.http_timeout())
            .build()?;
        let mut client = NotionClient::new(http_client).with_version(config.notion_version());
        if let Some(base_url) = config.notion_api_base_url() {
            client = client.with_base_url(&base_url);
        }

        Ok(Self::new(token, client, store))
    }
}

#[async_trait]
impl Integration for Notion {
    fn kind(&self) -> IntegrationKind {
        IntegrationKind::Notion
    }

    async fn authorize(&self, user_id: &str, org_id: &str) -> Result<Authorization, Error> {
        let token = self
            .token
            .as_ref()
            .ok_or_else(|| Error::config("Notion token is not configured"))?;

        self.credentials
            .save(user_id, org_id, &Credentials::new(token.credentials()))
            .await?;

        info!("Notion connected for org {org_id} user {user_id}");
        Ok(Authorization::Connected)
    }

    async fn credentials(&self, user_id: &str, org_id: &str) -> Result<Credentials, Error> {
        self.credentials.load(user_id, org_id).await
    }

    async fn items(&self, credentials: &Credentials) -> Result<Vec<IntegrationItem>, Error> {
        let access_token = credentials.access_token()?;

        let items = collect_items(
            |cursor: Option<String>| async move {
                self.client.search(access_token, cursor.as_deref()).await
            },
            normalize,
        )
        .await?;

        info!("Retrieved {} items from Notion", items.len());
        Ok(items)
    }
}

/// Convert a raw Notion page or database into an [`IntegrationItem`].
pub fn normalize(raw: &Value) -> Result<IntegrationItem, Error> {
    let malformed = |field: &str| {
        Error::integration(
            IntegrationErrorKind::MalformedItem,
            &format!("Notion object has no {field}"),
        )
    };
    let object = value_text(raw.get("object")).ok_or_else(|| malformed("object type"))?;
    let id = value_text(raw.get("id")).ok_or_else(|| malformed("id"))?;

    let name = raw
        .get("properties")
        .and_then(|properties| find_key(properties, "content"))
        .or_else(|| find_key(raw, "content"))
        .and_then(|content| value_text(Some(content)))
        .unwrap_or_else(|| FALLBACK_NAME.to_string());

    Ok(IntegrationItem {
        id: format!("{object}_{id}"),
        name: format!("{object} {name}"),
        item_type: object,
        creation_time: value_text(raw.get("created_time")),
        last_modified_time: value_text(raw.get("last_edited_time")),
        parent_id: parent_id(raw.get("parent")),
        url: value_text(raw.get("url")),
    })
}

/// The parent's id lives under a key named after the parent's type, e.g.
/// `{"type": "page_id", "page_id": "..."}`. Workspace-level objects have none.
fn parent_id(parent: Option<&Value>) -> Option<String> {
    let parent = parent?;
    match parent.get("type").and_then(Value::as_str) {
        None | Some("workspace") => None,
        Some(parent_type) => value_text(parent.get(parent_type)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainErrorKind;
    use integration_auth::store::MemoryStore;
    use mockito::{Matcher, Server};
    use secrecy::SecretString;
    use serde_json::json;

    fn notion(base_url: &str, store: Arc<dyn Store>) -> Notion {
        Notion::new(
            Some(StaticToken::new(SecretString::new("ntn_token".to_string()))),
            NotionClient::new(reqwest::Client::new()).with_base_url(base_url),
            store,
        )
    }

    fn page() -> Value {
        json!({
            "object": "page",
            "id": "59833787-2cf9-4fdf-8782-e53db20768a5",
            "created_time": "2022-03-01T19:05:00.000Z",
            "last_edited_time": "2022-07-06T20:25:00.000Z",
            "parent": { "type": "database_id", "database_id": "d9824bdc-8445-4327-be8b-5b47500af6ce" },
            "url": "https://www.notion.so/Tuscan-kale-598337872cf94fdf8782e53db20768a5",
            "properties": {
                "Tags": { "id": "%40Ijf", "type": "multi_select", "multi_select": [] },
                "Name": {
                    "id": "title",
                    "type": "title",
                    "title": [{ "type": "text", "text": { "content": "Tuscan kale", "link": null } }]
                }
            }
        })
    }

    #[test]
    fn test_normalize_page() {
        let item = normalize(&page()).unwrap();

        assert_eq!(
            item,
            IntegrationItem {
                id: "page_59833787-2cf9-4fdf-8782-e53db20768a5".to_string(),
                name: "page Tuscan kale".to_string(),
                item_type: "page".to_string(),
                creation_time: Some("2022-03-01T19:05:00.000Z".to_string()),
                last_modified_time: Some("2022-07-06T20:25:00.000Z".to_string()),
                parent_id: Some("d9824bdc-8445-4327-be8b-5b47500af6ce".to_string()),
                url: Some(
                    "https://www.notion.so/Tuscan-kale-598337872cf94fdf8782e53db20768a5"
                        .to_string()
                ),
            }
        );
    }

    #[test]
    fn test_name_falls_back_to_whole_object() {
        let raw = json!({
            "object": "database",
            "id": "db1",
            "title": [{ "type": "text", "text": { "content": "Grocery list" } }],
            "properties": { "Price": { "type": "number", "number": {} } },
            "parent": { "type": "workspace", "workspace": true }
        });

        let item = normalize(&raw).unwrap();
        assert_eq!(item.name, "database Grocery list");
        assert_eq!(item.parent_id, None);
    }

    #[test]
    fn test_name_falls_back_to_multi_select() {
        let raw = json!({
            "object": "database",
            "id": "db2",
            "properties": { "Tags": { "type": "multi_select", "multi_select": { "options": [] } } },
            "parent": { "type": "page_id", "page_id": "p9" }
        });

        let item = normalize(&raw).unwrap();
        assert_eq!(item.name, "database multi_select");
        assert_eq!(item.parent_id.as_deref(), Some("p9"));
        assert_eq!(item.url, None);
    }

    #[test]
    fn test_normalize_is_repeatable() {
        let raw = json!({
            "object": "page",
            "id": "p2",
            "properties": {
                "Notes": {
                    "type": "rich_text",
                    "rich_text": [{ "text": { "content": null } }, { "text": { "content": "Second" } }]
                },
                "Name": { "title": [{ "text": { "content": "Nested" } }] }
            },
            "parent": { "type": "database_id", "database_id": "db1" }
        });

        let first = normalize(&raw).unwrap();
        let second = normalize(&raw).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.name, "page Second");
        assert_eq!(normalize(&page()).unwrap(), normalize(&page()).unwrap());
    }

    #[test]
    fn test_missing_parent_and_id() {
        let raw = json!({ "object": "page", "id": "p1" });
        assert_eq!(normalize(&raw).unwrap().parent_id, None);

        let err = normalize(&json!({ "object": "page" })).unwrap_err();
        assert_eq!(
            err.error_kind,
            DomainErrorKind::Integration(IntegrationErrorKind::MalformedItem)
        );
    }

    #[tokio::test]
    async fn test_authorize_stores_token_without_expiry() {
        let memory = Arc::new(MemoryStore::new());
        let notion = notion("http://unused", memory.clone());

        let authorization = notion.authorize("user1", "org1").await.unwrap();

        assert_eq!(authorization, Authorization::Connected);
        let stored = memory
            .get("notion_credentials:org1:user1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            serde_json::from_str::<Value>(&stored).unwrap(),
            json!({ "access_token": "ntn_token" })
        );

        // Read-many: credentials survive repeated reads.
        for _ in 0..2 {
            let credentials = notion.credentials("user1", "org1").await.unwrap();
            assert_eq!(credentials.access_token().unwrap(), "ntn_token");
        }
    }

    #[tokio::test]
    async fn test_credentials_before_authorize() {
        let notion = notion("http://unused", Arc::new(MemoryStore::new()));
        let err = notion.credentials("user1", "org1").await.unwrap_err();
        assert_eq!(
            err.error_kind,
            DomainErrorKind::Integration(IntegrationErrorKind::CredentialsMissing)
        );
    }

    #[tokio::test]
    async fn test_items_follow_cursor() {
        let mut server = Server::new_async().await;
        let first = server
            .mock("POST", "/search")
            .match_body(Matcher::Json(json!({ "page_size": 100 })))
            .with_status(200)
            .with_body(
                json!({ "results": [page()], "next_cursor": "c2", "has_more": true }).to_string(),
            )
            .create_async()
            .await;
        let second = server
            .mock("POST", "/search")
            .match_body(Matcher::Json(json!({ "page_size": 100, "start_cursor": "c2" })))
            .with_status(200)
            .with_body(
                json!({
                    "results": [{ "object": "database", "id": "db2", "properties": {} }],
                    "next_cursor": null,
                    "has_more": false
                })
                .to_string(),
            )
            .create_async()
            .await;

        let notion = notion(&server.url(), Arc::new(MemoryStore::new()));
        let items = notion
            .items(&Credentials::new(json!({ "access_token": "ntn_token" })))
            .await
            .unwrap();

        first.assert_async().await;
        second.assert_async().await;
        let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["page Tuscan kale", "database multi_select"]);
    }

    #[tokio::test]
    async fn test_items_without_access_token() {
        let notion = notion("http://unused", Arc::new(MemoryStore::new()));
        let err = notion
            .items(&Credentials::new(json!({})))
            .await
            .unwrap_err();
        assert_eq!(
            err.error_kind,
            DomainErrorKind::Integration(IntegrationErrorKind::NoAccessToken)
        );
    }
}
