//! OAuth 2.0 authentication infrastructure.
//!
//! Provides the state handshake used to tie a provider's redirect back to the
//! user and organization that started it, plus provider implementations.

mod provider;
mod state;

pub mod providers;

pub use provider::{OAuthUrls, Provider};
pub use state::OAuthState;
