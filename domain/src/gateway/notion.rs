//! Notion search API client.

use integration_auth::providers::notion_config;
use integration_auth::token::{BearerTokenAuth, ProviderAuth};
use log::*;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use service::config::DEFAULT_NOTION_VERSION;

use super::upstream_failure;
use crate::error::Error;
use crate::pagination::Page;

const PAGE_SIZE: u32 = 100;

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_cursor: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Value>,
    next_cursor: Option<String>,
    has_more: Option<bool>,
}

/// Client for `POST /search`, which lists every page and database shared with the
/// integration.
pub struct NotionClient {
    client: reqwest::Client,
    base_url: String,
    version: String,
}

impl NotionClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: notion_config().api_base_url,
            version: DEFAULT_NOTION_VERSION.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Value of the `Notion-Version` header.
    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    pub async fn search(
        &self,
        access_token: &str,
        start_cursor: Option<&str>,
    ) -> Result<Page, Error> {
        let url = format!("{}/search", self.base_url);
        let auth = BearerTokenAuth::new(SecretString::new(access_token.to_string()))
            .with_header("Notion-Version", &self.version);

        debug!("Searching Notion (start_cursor: {:?})", start_cursor);

        let response = auth
            .authenticate(self.client.post(&url))
            .json(&SearchRequest {
                page_size: PAGE_SIZE,
                start_cursor,
            })
            .send()
            .await
            .inspect_err(|e| warn!("Failed to reach Notion search: {:?}", e))?;

        if !response.status().is_success() {
            return Err(upstream_failure(response, "Failed to search Notion").await);
        }

        let search: SearchResponse = response.json().await?;
        let next_cursor = match search.has_more {
            Some(false) => None,
            _ => search.next_cursor,
        };

        Ok(Page {
            results: search.results,
            next_cursor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DomainErrorKind, ExternalErrorKind};
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn client(server: &Server) -> NotionClient {
        NotionClient::new(reqwest::Client::new()).with_base_url(&server.url())
    }

    #[tokio::test]
    async fn test_search_first_page() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/search")
            .match_header("authorization", "Bearer ntn_token")
            .match_header("notion-version", DEFAULT_NOTION_VERSION)
            .match_body(Matcher::Json(json!({ "page_size": 100 })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"object":"list","results":[{"object":"page","id":"p1"}],
                    "next_cursor":"c2","has_more":true}"#,
            )
            .create_async()
            .await;

        let page = client(&server).search("ntn_token", None).await.unwrap();

        mock.assert_async().await;
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.next_cursor.as_deref(), Some("c2"));
    }

    #[tokio::test]
    async fn test_search_with_cursor_and_no_more() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/search")
            .match_body(Matcher::Json(
                json!({ "page_size": 100, "start_cursor": "c2" }),
            ))
            .with_status(200)
            .with_body(r#"{"results":[],"next_cursor":"stale","has_more":false}"#)
            .create_async()
            .await;

        let page = client(&server)
            .search("ntn_token", Some("c2"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(page.results.is_empty());
        assert_eq!(page.next_cursor, None);
    }

    #[tokio::test]
    async fn test_custom_version_header() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/search")
            .match_header("notion-version", "2025-09-03")
            .with_status(200)
            .with_body(r#"{"results":[],"next_cursor":null,"has_more":false}"#)
            .create_async()
            .await;

        client(&server)
            .with_version("2025-09-03")
            .search("ntn_token", None)
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_is_upstream_failure() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/search")
            .with_status(400)
            .with_body("bad request")
            .create_async()
            .await;

        let err = client(&server).search("ntn_token", None).await.unwrap_err();

        assert_eq!(
            err.error_kind,
            DomainErrorKind::External(ExternalErrorKind::UpstreamFetchFailed {
                status: 400,
                body: "bad request".to_string(),
            })
        );
    }
}
