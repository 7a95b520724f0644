use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use kitstore::api::{self, AppState};
use kitstore::auth::{JwtVerifier, TokenVerifier};
use kitstore::config::Config;
use kitstore::metrics::Metrics;
use kitstore::store::DocumentStore;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging with environment-based filtering
    // Default to INFO level, can be overridden with RUST_LOG env var
    // Example: RUST_LOG=debug cargo run
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,kitstore=debug")),
        )
        .init();

    tracing::info!("🚀 Starting kitstore storefront backend");

    let config = Config::from_env();

    let store = Arc::new(DocumentStore::with_attempts(config.tx_max_attempts));
    let metrics = Arc::new(Metrics::new()?);
    tracing::info!(
        "📊 Metrics registry created with {} metrics",
        metrics.registry().gather().len()
    );

    let verifier: Arc<dyn TokenVerifier> = Arc::new(JwtVerifier::new(config.jwt_secret.as_bytes()));
    let state = AppState::new(store, verifier, metrics);

    tracing::info!(bind_addr = %config.bind_addr, "Listening");
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(api::configure)
    })
    .bind(&config.bind_addr)?
    .run()
    .await?;

    Ok(())
}
