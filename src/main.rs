use domain::Integrations;
use log::*;
use service::{config::Config, init_store, logging::Logger};
use std::process::ExitCode;
use web::AppState;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::new();

    if let Err(e) = Logger::init_logger(&config) {
        eprintln!("Failed to initialize logger: {e}");
        return ExitCode::FAILURE;
    }

    info!("Starting up integrations hub...");

    let store = match init_store(&config).await {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to initialize credential store: {e}");
            return ExitCode::FAILURE;
        }
    };

    let integrations = match Integrations::from_config(&config, store) {
        Ok(integrations) => integrations,
        Err(e) => {
            error!("Failed to initialize integrations: {e}");
            return ExitCode::FAILURE;
        }
    };

    let app_state = AppState::new(config, integrations);

    if let Err(e) = web::init_server(app_state).await {
        error!("Server stopped: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
