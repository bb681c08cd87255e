//! Controller for OAuth redirect callbacks.
//!
//! The consent page is opened in a popup by the client. On success the callback
//! answers with a page that closes that popup; the client then polls the
//! credentials endpoint.

use crate::{AppState, Error};

use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse};

use domain::hubspot::CallbackParams;

const CLOSE_WINDOW_PAGE: &str = "<html>\n    <script>\n        window.close();\n    </script>\n</html>\n";

/// GET /integrations/hubspot/oauth2callback
///
/// Handles the redirect back from HubSpot after the user granted (or denied) access.
#[utoipa::path(
    get,
    path = "/integrations/hubspot/oauth2callback",
    params(
        ("code" = Option<String>, Query, description = "Authorization code from HubSpot"),
        ("state" = Option<String>, Query, description = "State issued when authorization started"),
        ("error" = Option<String>, Query, description = "Set when the user denied access"),
    ),
    responses(
        (status = 200, description = "Popup close page", body = String, content_type = "text/html"),
        (status = 400, description = "Access denied, state mismatch or failed token exchange"),
    )
)]
pub async fn callback(
    State(app_state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Result<impl IntoResponse, Error> {
    app_state.integrations.hubspot().callback(params).await?;

    Ok(Html(CLOSE_WINDOW_PAGE))
}
