use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, build_router};
use clinic_core::{ClinicService, CoreConfig, sample_data::seed_sample_data};

/// Main entry point for the clinic application
///
/// Resolves configuration, builds the single in-memory clinic store, optionally loads the
/// sample records and serves the REST API until Ctrl-C.
///
/// # Environment Variables
/// - `CLINIC_REST_ADDR`: REST server address (default: "127.0.0.1:5001")
/// - `CLINIC_SEED_SAMPLE_DATA`: Load demonstration records at startup (default: true)
/// - `CLINIC_NAME`: Display name reported by `/health` (default: "Clinic")
///
/// # Returns
/// * `Ok(())` - If the server starts, runs and shuts down cleanly
/// * `Err(anyhow::Error)` - If configuration, startup or serving fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clinic_run=info".parse()?)
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
    tracing::info!("++ Starting {} REST on {}", cfg.clinic_name(), addr);

    let app = build_router(AppState::new(cfg, clinic));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("-- Clinic REST stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {:?}", e);
        // Without a signal handler, keep serving until the process is killed.
        std::future::pending::<()>().await;
    }
}
