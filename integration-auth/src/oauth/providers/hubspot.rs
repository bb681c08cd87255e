//! HubSpot OAuth provider implementation.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{oauth_error, Error, OAuthErrorKind};
use crate::oauth::OAuthUrls;
use crate::providers::hubspot_config;

/// Form body sent to the token endpoint.
#[derive(Serialize)]
struct TokenExchangeRequest<'a> {
    grant_type: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    redirect_uri: &'a str,
    code: &'a str,
}

/// HubSpot OAuth provider.
///
/// Handles the OAuth 2.0 authorization code flow for HubSpot portals:
/// - Authorization URL generation
/// - Authorization code exchange
pub struct Provider {
    client_id: String,
    client_secret: SecretString,
    redirect_uri: String,
    scopes: String,
    urls: OAuthUrls,
    http_client: reqwest::Client,
}

impl Provider {
    /// Create a new HubSpot OAuth provider pointed at HubSpot's public endpoints.
    ///
    /// # Arguments
    ///
    /// * `client_id` - HubSpot app client ID
    /// * `client_secret` - HubSpot app client secret
    /// * `redirect_uri` - OAuth redirect URI registered with the app
    pub fn new(client_id: String, client_secret: SecretString, redirect_uri: String) -> Self {
        let defaults = hubspot_config();
        Self {
            client_id,
            client_secret,
            redirect_uri,
            scopes: defaults.scopes.unwrap_or_default(),
            urls: OAuthUrls {
                auth_url: defaults.auth_url.unwrap_or_default(),
                token_url: defaults.token_url.unwrap_or_default(),
            },
            http_client: reqwest::Client::new(),
        }
    }

    /// Override the OAuth endpoints.
    pub fn with_urls(mut self, urls: OAuthUrls) -> Self {
        self.urls = urls;
        self
    }

    /// Override the requested scopes (space separated).
    pub fn with_scopes(mut self, scopes: String) -> Self {
        self.scopes = scopes;
        self
    }

    /// Use a preconfigured HTTP client.
    pub fn with_http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = http_client;
        self
    }
}

#[async_trait]
impl crate::oauth::Provider for Provider {
    fn authorization_url(&self, state: &str) -> String {
        format!(
            "{}?client_id={}&redirect_uri={}&scope={}&state={}",
            self.urls.auth_url,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_uri),
            urlencoding::encode(&self.scopes),
            urlencoding::encode(state)
        )
    }

    async fn exchange_code(&self, code: &str) -> Result<serde_json::Value, Error> {
        let request = TokenExchangeRequest {
            grant_type: "authorization_code",
            client_id: &self.client_id,
            client_secret: self.client_secret.expose_secret(),
            redirect_uri: &self.redirect_uri,
            code,
        };

        debug!("Exchanging HubSpot OAuth code for tokens");

        let response = self
            .http_client
            .post(&self.urls.token_url)
            .form(&request)
            .send()
            .await
            .inspect_err(|e| warn!("Failed to reach HubSpot token endpoint: {:?}", e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!("HubSpot OAuth error ({}): {}", status, error_text);
            return Err(oauth_error(
                OAuthErrorKind::TokenExchangeFailed,
                "Failed to get access token from HubSpot",
            ));
        }

        let tokens: serde_json::Value = response.json().await.map_err(|e| {
            warn!("Failed to parse HubSpot token response: {:?}", e);
            oauth_error(OAuthErrorKind::InvalidResponse, &e.to_string())
        })?;

        info!("Successfully exchanged HubSpot OAuth code for tokens");
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::oauth::{OAuthState, Provider as _};
    use mockito::{Matcher, Server};

    fn provider(server_url: &str) -> Provider {
        Provider::new(
            "client-123".to_string(),
            SecretString::new("secret-456".to_string()),
            "http://localhost:8000/integrations/hubspot/oauth2callback".to_string(),
        )
        .with_urls(OAuthUrls {
            auth_url: format!("{}/oauth/authorize", server_url),
            token_url: format!("{}/oauth/v1/token", server_url),
        })
    }

    #[test]
    fn test_authorization_url() {
        let provider = provider("https://app.hubspot.com");
        let state = OAuthState::new("user1", "org1");
        let encoded = state.encode().unwrap();

        let url = provider.authorization_url(&encoded);

        assert!(url.starts_with("https://app.hubspot.com/oauth/authorize?client_id=client-123&"));
        assert!(url.contains(
            "redirect_uri=http%3A%2F%2Flocalhost%3A8000%2Fintegrations%2Fhubspot%2Foauth2callback"
        ));
        assert!(url.contains("scope=contacts%20oauth%20crm.objects.contacts.read"));
        assert!(url.contains(&format!("state={}", urlencoding::encode(&encoded))));
    }

    #[test]
    fn test_authorization_url_state_round_trips() {
        let provider = provider("https://app.hubspot.com");
        let state = OAuthState::new("user1", "org1");
        let url = provider.authorization_url(&state.encode().unwrap());

        let param = url.split("state=").nth(1).unwrap();
        let decoded = urlencoding::decode(param).unwrap();
        assert_eq!(OAuthState::decode(&decoded).unwrap(), state);
    }

    #[tokio::test]
    async fn test_exchange_code_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/oauth/v1/token")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("grant_type".into(), "authorization_code".into()),
                Matcher::UrlEncoded("client_id".into(), "client-123".into()),
                Matcher::UrlEncoded("client_secret".into(), "secret-456".into()),
                Matcher::UrlEncoded(
                    "redirect_uri".into(),
                    "http://localhost:8000/integrations/hubspot/oauth2callback".into(),
                ),
                Matcher::UrlEncoded("code".into(), "auth-code".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token":"at","refresh_token":"rt","expires_in":1800}"#)
            .create_async()
            .await;

        let tokens = provider(&server.url())
            .exchange_code("auth-code")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(tokens["access_token"], "at");
        assert_eq!(tokens["expires_in"], 1800);
    }

    #[tokio::test]
    async fn test_exchange_code_rejected() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/oauth/v1/token")
            .with_status(400)
            .with_body(r#"{"status":"BAD_AUTH_CODE"}"#)
            .create_async()
            .await;

        let result = provider(&server.url()).exchange_code("bad-code").await;

        assert!(matches!(
            result,
            Err(Error {
                error_kind: ErrorKind::OAuth(OAuthErrorKind::TokenExchangeFailed),
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_exchange_code_invalid_json() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/oauth/v1/token")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let result = provider(&server.url()).exchange_code("auth-code").await;

        assert!(matches!(
            result,
            Err(Error {
                error_kind: ErrorKind::OAuth(OAuthErrorKind::InvalidResponse),
                ..
            })
        ));
    }
}
