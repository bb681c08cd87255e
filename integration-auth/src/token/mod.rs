//! Bearer token authentication for provider APIs.
//!
//! Covers providers that are connected with a static internal-integration token
//! as well as authenticating API calls with an OAuth access token.

mod bearer;
mod static_token;

pub use bearer::{BearerTokenAuth, ProviderAuth};
pub use static_token::StaticToken;
