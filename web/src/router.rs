use crate::{controller::health_check_controller, params, AppState};
use axum::{
    routing::{get, post},
    Router,
};

use crate::controller::{integration_controller, oauth_controller};

use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI spec. To be a part
// of the rendered spec, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "Integrations Hub API"
        ),
        paths(
            health_check_controller::health_check,
            integration_controller::authorize,
            integration_controller::credentials,
            integration_controller::load,
            oauth_controller::callback,
        ),
        components(
            schemas(
                params::integration::AuthorizeResponse,
                params::integration::IntegrationItemResponse,
                params::integration::LoadParams,
                params::integration::UserOrgParams,
            )
        ),
        tags(
            (name = "integrations_hub", description = "HubSpot and Notion integrations API")
        )
    )]
struct ApiDoc;

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(integration_routes(app_state.clone()))
        .merge(oauth_routes(app_state))
        .merge(RapiDoc::with_openapi("/api-docs/openapi2.json", ApiDoc::openapi()).path("/rapidoc"))
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

fn integration_routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/integrations/{provider}/authorize",
            post(integration_controller::authorize),
        )
        .route(
            "/integrations/{provider}/credentials",
            post(integration_controller::credentials),
        )
        .route(
            "/integrations/{provider}/load",
            post(integration_controller::load),
        )
        .with_state(app_state)
}

fn oauth_routes(app_state: AppState) -> Router {
    Router::new()
        // Called by HubSpot's redirect, not by the client
        .route(
            "/integrations/hubspot/oauth2callback",
            get(oauth_controller::callback),
        )
        .with_state(app_state)
}
