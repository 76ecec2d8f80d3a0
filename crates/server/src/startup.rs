use axum::Router;
use configs::AppConfig;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use common::utils::logging::init_logging_from_env;
use service::{runtime, AppServices};

use crate::errors::StartupError;
use crate::routes;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Config file if present, else environment; either way validated.
fn load_config() -> Result<AppConfig, StartupError> {
    AppConfig::load_or_env().map_err(|e| StartupError::InvalidConfig(format!("{e:#}")))
}

/// Router over services opened from `cfg`.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let repos = runtime::open_repositories(cfg)
        .await
        .map_err(|e| StartupError::Storage(format!("{e:#}")))?;
    Ok(routes::build_router(AppServices::new(repos), build_cors()))
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();

    let cfg = load_config()?;
    let app = build_app(&cfg).await?;

    let addr = cfg.server.bind_addr()?;
    info!(%addr, backend = ?cfg.backend(), "starting upn api");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
