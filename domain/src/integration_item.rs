//! The provider-neutral record every integration normalizes its objects into.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single object pulled from a connected provider (a HubSpot contact, a Notion page, ...).
///
/// `id` and `item_type` are always present; everything else is whatever the provider
/// could tell us. Timestamps are passed through as the provider formats them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationItem {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub creation_time: Option<String>,
    pub last_modified_time: Option<String>,
    pub parent_id: Option<String>,
    pub url: Option<String>,
}

/// Text form of a JSON scalar. Strings are taken as-is, `null` is absent and
/// anything else (numeric ids, booleans) uses its JSON rendering.
pub(crate) fn value_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
