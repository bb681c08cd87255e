//! CSRF state handling for OAuth flows.

use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{oauth_error, Error, OAuthErrorKind};

/// Number of random bytes in a state token.
const STATE_TOKEN_BYTES: usize = 32;

/// State carried through an OAuth redirect.
///
/// The whole record travels in the `state` query parameter (JSON, then URL-safe
/// base64) and a copy is kept in the credential store until the callback
/// consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthState {
    /// Random single-use token.
    pub state: String,
    pub user_id: String,
    pub org_id: String,
}

impl OAuthState {
    /// Create a state record with a fresh random token for a user.
    pub fn new(user_id: &str, org_id: &str) -> Self {
        Self {
            state: Self::generate_token(),
            user_id: user_id.to_string(),
            org_id: org_id.to_string(),
        }
    }

    /// Encode the record into the opaque value sent as the `state` parameter.
    pub fn encode(&self) -> Result<String, Error> {
        let json = serde_json::to_vec(self)?;
        Ok(URL_SAFE.encode(json))
    }

    /// Decode a `state` parameter produced by [`OAuthState::encode`].
    ///
    /// Padding is optional, since some providers strip trailing `=` when echoing
    /// the parameter back.
    pub fn decode(encoded: &str) -> Result<Self, Error> {
        let bytes = URL_SAFE
            .decode(encoded)
            .or_else(|_| URL_SAFE_NO_PAD.decode(encoded.trim_end_matches('=')))
            .map_err(|e| oauth_error(OAuthErrorKind::InvalidState, &e.to_string()))?;

        serde_json::from_slice(&bytes)
            .map_err(|e| oauth_error(OAuthErrorKind::InvalidState, &e.to_string()))
    }

    /// Whether `self` carries the same token as the stored copy.
    ///
    /// Plain equality, not constant time: tokens are single-use and expire
    /// after a few minutes.
    pub fn matches(&self, stored: &OAuthState) -> bool {
        self.state == stored.state
    }

    /// Generate a cryptographically random, URL-safe state token.
    fn generate_token() -> String {
        let random_bytes: [u8; STATE_TOKEN_BYTES] = rand::thread_rng().gen();
        URL_SAFE_NO_PAD.encode(random_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_generate_state() {
        let state = OAuthState::new("user1", "org1");
        // 32 bytes base64 encoded without padding
        assert_eq!(state.state.len(), 43);
        assert_eq!(state.user_id, "user1");
        assert_eq!(state.org_id, "org1");
    }

    #[test]
    fn test_tokens_are_unique() {
        let a = OAuthState::new("user1", "org1");
        let b = OAuthState::new("user1", "org1");
        assert_ne!(a.state, b.state);
    }

    #[test]
    fn test_encode_decode() {
        let state = OAuthState::new("user1", "org1");
        let encoded = state.encode().unwrap();
        let decoded = OAuthState::decode(&encoded).unwrap();
        assert_eq!(decoded, state);
    }

    #[test]
    fn test_encoded_state_is_url_safe() {
        let state = OAuthState::new("user/with+chars", "org?1");
        let encoded = state.encode().unwrap();
        assert!(!encoded.contains('+'));
        assert!(!encoded.contains('/'));
    }

    #[test]
    fn test_decode_without_padding() {
        let state = OAuthState::new("user1", "org12");
        let encoded = state.encode().unwrap();
        let trimmed = encoded.trim_end_matches('=');
        assert_eq!(OAuthState::decode(trimmed).unwrap(), state);
    }

    #[test]
    fn test_decode_garbage_is_invalid_state() {
        let result = OAuthState::decode("not base64 at all!");
        assert!(matches!(
            result,
            Err(Error {
                error_kind: ErrorKind::OAuth(OAuthErrorKind::InvalidState),
                ..
            })
        ));
    }

    #[test]
    fn test_decode_non_state_json_is_invalid_state() {
        let encoded = URL_SAFE.encode(br#"{"foo":"bar"}"#);
        let result = OAuthState::decode(&encoded);
        assert!(matches!(
            result,
            Err(Error {
                error_kind: ErrorKind::OAuth(OAuthErrorKind::InvalidState),
                ..
            })
        ));
    }

    #[test]
    fn test_matches_compares_token_only() {
        let stored = OAuthState::new("user1", "org1");
        let mut echoed = stored.clone();
        assert!(echoed.matches(&stored));

        echoed.state = "forged".to_string();
        assert!(!echoed.matches(&stored));
    }
}
