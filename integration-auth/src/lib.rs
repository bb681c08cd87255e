//! # integration-auth
//!
//! Authentication plumbing shared by every third-party integration:
//! - OAuth 2.0 state handshake and provider implementations (HubSpot)
//! - Static bearer tokens for providers without a redirect flow (Notion)
//! - Credential store contract with in-memory and Redis implementations
//! - HTTP client building
//!
//! ## Architecture
//!
//! This crate holds everything that talks about *how* a user is connected to a
//! provider. The `domain` crate builds the per-provider integration flows and the
//! item normalization on top of it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use integration_auth::{
//!     oauth::{OAuthState, Provider},
//!     store::{MemoryStore, Store, StoreKey},
//!     http::HttpClientBuilder,
//! };
//! ```

pub mod error;
pub mod http;
pub mod oauth;
pub mod providers;
pub mod store;
pub mod token;

// Re-export commonly used types
pub use error::{Error, ErrorKind};
pub use providers::IntegrationKind;
