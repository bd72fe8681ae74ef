//! Interest Profiler server
//!
//! Loads configuration from `INTEREST_PROFILER__*` environment variables
//! (and `.env`), loads the catalog files, then serves the REST API.
//!
//! # API Endpoints
//!
//! - `GET /health`
//! - `POST /api/v1/assessment/start/:user_id`
//! - `POST /api/v1/assessment/:session_id/{answer,next,result}`
//! - `GET /api/v1/assessment/:session_id/responses`
//! - `DELETE /api/v1/assessment/:session_id`
//! - `POST /api/v1/interest/start/:user_id`
//! - `POST /api/v1/interest/:session_id/{answer,result}`
//! - `DELETE /api/v1/interest/:session_id`
//! - `POST /api/v1/clusters/recommend`

use std::process::ExitCode;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use interest_profiler::adapters::catalog::Catalog;
use interest_profiler::adapters::http::{api_router, HttpSettings};
use interest_profiler::bootstrap::build_state;
use interest_profiler::config::{AppConfig, ServerConfig};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.server);

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    config.validate()?;
    let addr = config.server.socket_addr()?;

    let catalog = Catalog::load(&config.data)?;
    let settings = HttpSettings::from(&config);
    let state = build_state(&config, catalog)?;
    let app = api_router(state, &settings);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        "interest profiler listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// JSON output in production, compact text otherwise. `RUST_LOG` wins over
/// the configured directive.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_filter));
    let registry = tracing_subscriber::registry().with(filter);
    if server.is_production() {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer().compact()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
