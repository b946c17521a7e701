//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the clinic REST API server on its own.
//!
//! ## Intended use
//! Useful for development and debugging of the HTTP surface. The workspace's main `clinic-run`
//! binary serves the same router.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{build_router, AppState};
use clinic_core::{sample_data::seed_sample_data, ClinicService, CoreConfig};

/// Main entry point for the clinic REST API server
///
/// # Environment Variables
/// - `CLINIC_REST_ADDR`: Server address (default: "127.0.0.1:5001")
/// - `CLINIC_SEED_SAMPLE_DATA`: Load demonstration records at startup (default: true)
/// - `CLINIC_NAME`: Display name reported by `/health` (default: "Clinic")
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration values are invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("clinic_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = Arc::new(CoreConfig::from_values(
        std::env::var("CLINIC_REST_ADDR").ok(),
        std::env::var("CLINIC_SEED_SAMPLE_DATA").ok(),
        std::env::var("CLINIC_NAME").ok(),
    )?);

    let mut clinic = ClinicService::new();
    if cfg.seed_sample_data() {
        seed_sample_data(&mut clinic)?;
    }

    let addr = cfg.rest_addr();
    tracing::info!("-- Starting {} REST API on {}", cfg.clinic_name(), addr);

    let app = build_router(AppState::new(cfg, clinic));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
