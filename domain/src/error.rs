//! Error types for the `domain` layer.
use integration_auth::error::{
    Error as IntegrationAuthError, ErrorKind as IntegrationAuthErrorKind, OAuthErrorKind,
};
use std::error::Error as StdError;
use std::fmt;

/// Top-level domain error type.
/// Errors in the Domain layer are modeled as a tree structure
/// with `domain::error::Error` as the root type holding a tree of `error_kind`
/// enums that represent the kinds of errors that can occur in the domain layer or
/// in lower layers. The `source` field is used to hold the original error that caused
/// the domain error. The intent is to translate errors between layers while maintaining
/// layer boundaries. Ex. `domain` is dependent on `integration_auth`, and `web` is dependent
/// on `domain`, but `web` should not be dependent, directly, on `integration_auth`.
/// Ultimately the various `error_kind`s are used by `web` to return appropriate HTTP
/// status codes and messages to the client.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// Enum representing the major categories of errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    Integration(IntegrationErrorKind),
    Internal(InternalErrorKind),
    External(ExternalErrorKind),
}

/// Failures of the authorization handshake or of the caller's request. All of these
/// are the client's to fix and none are retried.
#[derive(Debug, PartialEq)]
pub enum IntegrationErrorKind {
    /// The provider redirected back with an `error` parameter.
    ProviderRejected,
    /// Missing, undecodable or unknown OAuth state: possible CSRF or replay.
    StateMismatch,
    TokenExchangeFailed,
    CredentialsMissing,
    /// Credentials were found but carry no usable access token.
    NoAccessToken,
    /// A provider object lacked a field every item needs.
    MalformedItem,
}

/// Enum representing the various kinds of internal errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum InternalErrorKind {
    Config,
    Store,
    Other(String),
}

/// Enum representing the various kinds of external errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum ExternalErrorKind {
    Network,
    /// A provider list/search endpoint answered with a non-success status.
    UpstreamFetchFailed { status: u16, body: String },
    Other(String),
}

impl Error {
    pub fn integration(kind: IntegrationErrorKind, message: &str) -> Self {
        Error {
            source: Some(message.to_string().into()),
            error_kind: DomainErrorKind::Integration(kind),
        }
    }

    pub fn config(message: &str) -> Self {
        Error {
            source: Some(message.to_string().into()),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Config),
        }
    }

    /// Message suitable for returning to the client.
    pub fn detail(&self) -> String {
        match &self.source {
            Some(source) => source.to_string(),
            None => format!("{:?}", self.error_kind),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Domain Error: {self:?}")
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // Errors that result from issues building the reqwest::Client instance. This
        // type of error will occur prior to any network calls being made.
        if err.is_builder() {
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                    "Failed to build reqwest client".to_string(),
                )),
            }
        // Errors that result from issues with the network call itself.
        } else {
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
            }
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                "JSON encoding related error".to_string(),
            )),
        }
    }
}

// This is where we translate errors from the `integration_auth` layer to the `domain` layer.
impl From<IntegrationAuthError> for Error {
    fn from(err: IntegrationAuthError) -> Self {
        let error_kind = match &err.error_kind {
            IntegrationAuthErrorKind::OAuth(kind) => match kind {
                OAuthErrorKind::InvalidState => {
                    DomainErrorKind::Integration(IntegrationErrorKind::StateMismatch)
                }
                OAuthErrorKind::TokenExchangeFailed | OAuthErrorKind::InvalidResponse => {
                    DomainErrorKind::Integration(IntegrationErrorKind::TokenExchangeFailed)
                }
            },
            IntegrationAuthErrorKind::Store(_) => {
                DomainErrorKind::Internal(InternalErrorKind::Store)
            }
            IntegrationAuthErrorKind::Http(_) => {
                DomainErrorKind::External(ExternalErrorKind::Network)
            }
        };
        // Keep the lower layer's message as the client-facing detail.
        let source: Box<dyn StdError + Send + Sync> = match err.source {
            Some(source) if matches!(error_kind, DomainErrorKind::Integration(_)) => source,
            _ => Box::new(err),
        };
        Error {
            source: Some(source),
            error_kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use integration_auth::error::{oauth_error, store_error, StoreErrorKind};

    #[test]
    fn test_invalid_state_maps_to_state_mismatch() {
        let err: Error = oauth_error(OAuthErrorKind::InvalidState, "bad base64").into();
        assert_eq!(
            err.error_kind,
            DomainErrorKind::Integration(IntegrationErrorKind::StateMismatch)
        );
        assert_eq!(err.detail(), "bad base64");
    }

    #[test]
    fn test_token_exchange_failure_keeps_message() {
        let err: Error = oauth_error(
            OAuthErrorKind::TokenExchangeFailed,
            "Failed to get access token from HubSpot",
        )
        .into();
        assert_eq!(
            err.error_kind,
            DomainErrorKind::Integration(IntegrationErrorKind::TokenExchangeFailed)
        );
        assert_eq!(err.detail(), "Failed to get access token from HubSpot");
    }

    #[test]
    fn test_store_error_maps_to_internal() {
        let err: Error = store_error(StoreErrorKind::Connection, "refused").into();
        assert_eq!(
            err.error_kind,
            DomainErrorKind::Internal(InternalErrorKind::Store)
        );
    }

    #[test]
    fn test_integration_constructor() {
        let err = Error::integration(
            IntegrationErrorKind::CredentialsMissing,
            "No credentials found.",
        );
        assert_eq!(
            err.error_kind,
            DomainErrorKind::Integration(IntegrationErrorKind::CredentialsMissing)
        );
        assert_eq!(err.detail(), "No credentials found.");
    }
}
