use axum::http::{header, HeaderValue, Method};
use domain::Integrations;
use log::*;
use service::config::Config;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

mod controller;
mod error;
mod params;
pub mod router;

pub use error::{Error, Result};

/// State shared by every route.
// Needs to implement Clone to be able to be passed into Router as State
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub integrations: Integrations,
}

impl AppState {
    pub fn new(config: Config, integrations: Integrations) -> Self {
        Self {
            config,
            integrations,
        }
    }
}

pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let host = app_state
        .config
        .interface
        .clone()
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let port = app_state.config.port;
    let server_url = format!("{host}:{port}");

    let cors = cors_layer(&app_state.config.allowed_origins);

    let listener = TcpListener::bind(&server_url).await?;
    info!("Server starting... listening for connections on http://{server_url}");

    axum::serve(listener, router::define_routes(app_state).layer(cors)).await
}

/// Restrict cross-origin requests to the configured origins.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| {
            origin
                .parse()
                .inspect_err(|_| warn!("Ignoring invalid CORS origin: {origin}"))
                .ok()
        })
        .collect();
    debug!("CORS allowed origins: {:?}", origins);

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_credentials(true)
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_origin(origins)
}
