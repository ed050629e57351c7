use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use flight_server::config::ServerConfig;
use flight_server::openflights::CatalogLoader;
use flight_server::web::{AppState, create_router};

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "flight_server=info,tower_http=info";

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ServerConfig::from_env();

    // Load route data before serving anything (fail fast if unavailable)
    let loader = match CatalogLoader::new(config.loader_config()) {
        Ok(loader) => loader,
        Err(e) => {
            error!(error = %e, "could not create route data loader");
            return ExitCode::FAILURE;
        }
    };
    let catalog = match loader.load().await {
        Ok(catalog) => catalog,
        Err(e) => {
            error!(error = %e, source = ?loader.source(), "could not load route data");
            return ExitCode::FAILURE;
        }
    };

    if let Some(seed) = config.search.schedule_seed {
        info!(seed, "using seeded flight durations");
    }

    let state = AppState::new(catalog, config.search.clone());
    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, addr = %config.bind_addr, "could not bind listen address");
            return ExitCode::FAILURE;
        }
    };

    info!(addr = %config.bind_addr, "flight itinerary planner listening");
    info!("  GET  /health                - Health check");
    info!("  GET  /api/airports/search   - Search airports by code, name or city");
    info!("  GET  /api/airports/:code    - Look up one airport");
    info!("  POST /api/itineraries       - Plan itineraries");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server error");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
