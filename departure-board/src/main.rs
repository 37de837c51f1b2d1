use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use departure_board::config::AppConfig;
use departure_board::darwin::MockDarwinClient;
use departure_board::web::{AppState, create_router};
use departure_board::widget::{DarwinConnector, MockConnector, spawn_board};

/// Config file used when none is given.
const DEFAULT_CONFIG_PATH: &str = "board.json";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("departure_board=info")),
        )
        .init();

    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("BOARD_CONFIG").ok())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let config = match AppConfig::load(&path) {
        Ok(config) => config.with_env_overrides(),
        Err(e) => {
            error!(%path, error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    let instances = match config.widget_instances() {
        Ok(instances) => instances,
        Err(e) => {
            error!(error = %e, "invalid widget configuration");
            return ExitCode::FAILURE;
        }
    };
    if instances.is_empty() {
        error!(%path, "no widgets configured");
        return ExitCode::FAILURE;
    }

    let handles = match &config.mock_data_dir {
        Some(dir) => match MockDarwinClient::new(dir) {
            Ok(mock) => {
                info!(dir = %dir.display(), "serving mock departure boards");
                spawn_board(instances, MockConnector(mock))
            }
            Err(e) => {
                error!(error = %e, "failed to load mock data");
                return ExitCode::FAILURE;
            }
        },
        None => spawn_board(instances, DarwinConnector::new(config.darwin_base_url.clone())),
    };

    let state = AppState::new(handles, config.refresh_secs);
    let app = create_router(state, &config.static_dir.to_string_lossy());

    let listener = match tokio::net::TcpListener::bind(config.listen).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.listen, error = %e, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    info!("Departure board listening on http://{}", config.listen);

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server error");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
