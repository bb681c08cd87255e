//! Controller for connecting integrations and loading their items.
//!
//! Every route is parameterized by the provider (`hubspot` or `notion`); an unknown
//! provider is rejected by the path extractor with 400.

use crate::controller::ApiResponse;
use crate::error::WebErrorKind;
use crate::params::integration::{
    AuthorizeResponse, IntegrationItemResponse, LoadParams, UserOrgParams,
};
use crate::{AppState, Error};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Form, Json};

use domain::{Credentials, IntegrationKind};
use log::*;

/// POST start connecting an integration
///
/// HubSpot answers with the consent URL to open; Notion stores its credentials
/// right away and reports itself connected.
#[utoipa::path(
    post,
    path = "/integrations/{provider}/authorize",
    params(
        ("provider" = String, Path, description = "Integration to connect: hubspot or notion"),
    ),
    request_body(content = UserOrgParams, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Authorization started", body = AuthorizeResponse),
        (status = 400, description = "Unknown provider"),
        (status = 500, description = "Integration not configured or store unavailable"),
    )
)]
pub async fn authorize(
    State(app_state): State<AppState>,
    Path(provider): Path<IntegrationKind>,
    Form(params): Form<UserOrgParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST authorize {provider} for org {}", params.org_id);

    let authorization = app_state
        .integrations
        .get(provider)
        .authorize(&params.user_id, &params.org_id)
        .await?;

    let response: AuthorizeResponse = authorization.into();
    Ok(Json(ApiResponse::new(StatusCode::OK.into(), response)))
}

/// POST read back stored credentials
///
/// HubSpot credentials can be read once; Notion credentials stay until replaced.
#[utoipa::path(
    post,
    path = "/integrations/{provider}/credentials",
    params(
        ("provider" = String, Path, description = "Integration: hubspot or notion"),
    ),
    request_body(content = UserOrgParams, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Stored credentials", body = Object),
        (status = 400, description = "No credentials found"),
    )
)]
pub async fn credentials(
    State(app_state): State<AppState>,
    Path(provider): Path<IntegrationKind>,
    Form(params): Form<UserOrgParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST credentials {provider} for org {}", params.org_id);

    let credentials = app_state
        .integrations
        .get(provider)
        .credentials(&params.user_id, &params.org_id)
        .await?;

    Ok(Json(ApiResponse::new(
        StatusCode::OK.into(),
        credentials.into_value(),
    )))
}

/// POST fetch and normalize every item visible with the given credentials
#[utoipa::path(
    post,
    path = "/integrations/{provider}/load",
    params(
        ("provider" = String, Path, description = "Integration: hubspot or notion"),
    ),
    request_body(content = LoadParams, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Normalized items", body = [IntegrationItemResponse]),
        (status = 400, description = "Invalid credentials or no access token"),
        (status = 502, description = "Provider unreachable or returned a malformed item"),
    )
)]
pub async fn load(
    State(app_state): State<AppState>,
    Path(provider): Path<IntegrationKind>,
    Form(params): Form<LoadParams>,
) -> Result<impl IntoResponse, Error> {
    let credentials = Credentials::parse(&params.credentials).map_err(|e| {
        warn!("Unreadable {provider} credentials: {e}");
        Error::Web(WebErrorKind::Input)
    })?;

    let items: Vec<IntegrationItemResponse> = app_state
        .integrations
        .get(provider)
        .items(&credentials)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    debug!("Loaded {} {provider} items", items.len());
    Ok(Json(ApiResponse::new(StatusCode::OK.into(), items)))
}
