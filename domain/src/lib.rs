//! Integration flows for each supported provider and the normalization of their
//! objects into [`IntegrationItem`]s.
//!
//! Consumers of the `domain` crate (the `web` layer) should not need to depend on
//! `integration_auth` directly, so the few auth types that cross the boundary are
//! re-exported here.
pub use integration_auth::store::{MemoryStore, Store};
pub use integration_auth::IntegrationKind;

pub use credentials::Credentials;
pub use integration::{Authorization, Integration, Integrations};
pub use integration_item::IntegrationItem;

pub mod credentials;
pub mod error;
pub mod hubspot;
pub mod integration;
pub mod integration_item;
pub mod notion;
pub mod pagination;
pub mod search;

pub mod gateway;
