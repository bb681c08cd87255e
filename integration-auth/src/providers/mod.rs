//! Known integrations and their pre-defined endpoint configurations.

mod config;
mod kind;

pub use config::{hubspot_config, notion_config, ProviderConfig};
pub use kind::IntegrationKind;
