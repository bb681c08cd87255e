use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use domain::error::{
    DomainErrorKind, Error as DomainError, ExternalErrorKind, IntegrationErrorKind,
    InternalErrorKind,
};

extern crate log;
use log::*;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    Domain(DomainError),
    Web(WebErrorKind),
}

/// Errors raised by the web layer itself, before anything reaches `domain`.
#[derive(Debug, PartialEq)]
pub enum WebErrorKind {
    /// A request parameter could not be interpreted.
    Input,
}

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

// List of possible StatusCode variants https://docs.rs/http/latest/http/status/struct.StatusCode.html#associatedconstant.UNPROCESSABLE_ENTITY
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let domain_error = match self {
            Error::Web(WebErrorKind::Input) => {
                return (StatusCode::BAD_REQUEST, "BAD REQUEST").into_response();
            }
            Error::Domain(domain_error) => domain_error,
        };

        let detail = domain_error.detail();
        match domain_error.error_kind {
            DomainErrorKind::Integration(integration_error_kind) => match integration_error_kind {
                IntegrationErrorKind::ProviderRejected
                | IntegrationErrorKind::StateMismatch
                | IntegrationErrorKind::TokenExchangeFailed
                | IntegrationErrorKind::CredentialsMissing
                | IntegrationErrorKind::NoAccessToken => {
                    debug!("Rejecting integration request: {detail}");
                    (StatusCode::BAD_REQUEST, detail).into_response()
                }
                IntegrationErrorKind::MalformedItem => {
                    warn!("Provider returned a malformed item: {detail}");
                    (StatusCode::BAD_GATEWAY, "BAD GATEWAY").into_response()
                }
            },
            DomainErrorKind::Internal(internal_error_kind) => {
                match internal_error_kind {
                    InternalErrorKind::Config => error!("Integration misconfigured: {detail}"),
                    InternalErrorKind::Store => error!("Credential store failure: {detail}"),
                    InternalErrorKind::Other(message) => error!("{message}: {detail}"),
                }
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL SERVER ERROR").into_response()
            }
            DomainErrorKind::External(external_error_kind) => match external_error_kind {
                ExternalErrorKind::UpstreamFetchFailed { status, .. } => {
                    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                    (status, detail).into_response()
                }
                ExternalErrorKind::Network => {
                    warn!("Provider unreachable: {detail}");
                    (StatusCode::BAD_GATEWAY, "BAD GATEWAY").into_response()
                }
                ExternalErrorKind::Other(message) => {
                    error!("{message}: {detail}");
                    (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL SERVER ERROR").into_response()
                }
            },
        }
    }
}

impl<E> From<E> for Error
where
    E: Into<DomainError>,
{
    fn from(err: E) -> Self {
        Self::Domain(err.into())
    }
}
