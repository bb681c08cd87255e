//! HTTP clients for the provider data APIs.

pub mod hubspot;
pub mod notion;

use crate::error::{DomainErrorKind, Error, ExternalErrorKind};

/// Turn a non-success listing response into an `UpstreamFetchFailed` error that carries
/// the provider's status and body.
pub(crate) async fn upstream_failure(response: reqwest::Response, what: &str) -> Error {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    log::warn!("{what} failed ({status}): {body}");
    Error {
        source: Some(format!("{what}: {body}").into()),
        error_kind: DomainErrorKind::External(ExternalErrorKind::UpstreamFetchFailed {
            status,
            body,
        }),
    }
}
