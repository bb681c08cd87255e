//! Parameters and responses for the integration endpoints.

use domain::{Authorization, IntegrationItem};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Form body identifying whose integration is being acted on.
///
/// # Fields
///
/// * `user_id` - The user connecting the integration
/// * `org_id` - The organization the user belongs to
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct UserOrgParams {
    pub(crate) user_id: String,
    pub(crate) org_id: String,
}

/// Form body of the load endpoint.
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct LoadParams {
    /// Credentials as returned by the credentials endpoint, JSON encoded.
    pub(crate) credentials: String,
}

/// Result of starting authorization.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct AuthorizeResponse {
    /// Provider consent page to open, when the provider uses an OAuth redirect
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) authorization_url: Option<String>,
    /// Whether the integration is connected already
    pub(crate) connected: bool,
}

impl From<Authorization> for AuthorizeResponse {
    fn from(authorization: Authorization) -> Self {
        match authorization {
            Authorization::Redirect(url) => Self {
                authorization_url: Some(url),
                connected: false,
            },
            Authorization::Connected => Self {
                authorization_url: None,
                connected: true,
            },
        }
    }
}

/// An item pulled from a connected provider.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct IntegrationItemResponse {
    pub(crate) id: String,
    pub(crate) name: String,
    #[serde(rename = "type")]
    pub(crate) item_type: String,
    pub(crate) creation_time: Option<String>,
    pub(crate) last_modified_time: Option<String>,
    pub(crate) parent_id: Option<String>,
    pub(crate) url: Option<String>,
}

impl From<IntegrationItem> for IntegrationItemResponse {
    fn from(item: IntegrationItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            item_type: item.item_type,
            creation_time: item.creation_time,
            last_modified_time: item.last_modified_time,
            parent_id: item.parent_id,
            url: item.url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_authorize_response_shapes() {
        let redirect: AuthorizeResponse =
            Authorization::Redirect("https://app.hubspot.com/oauth/authorize?x=1".to_string())
                .into();
        assert_eq!(
            serde_json::to_value(redirect).unwrap(),
            json!({
                "authorization_url": "https://app.hubspot.com/oauth/authorize?x=1",
                "connected": false
            })
        );

        let connected: AuthorizeResponse = Authorization::Connected.into();
        assert_eq!(
            serde_json::to_value(connected).unwrap(),
            json!({ "connected": true })
        );
    }
}
