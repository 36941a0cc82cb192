//! Finance Advisor HTTP Server
//!
//! Loads the configured model backend once, then serves advice over axum.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use advisor_server::{create_router, AppState, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();
    let config = ServerConfig::from_env()?;

    // Initialize model backend
    let predictor = config.load_predictor().await?;
    let (goal_classifier, instrument_model) = predictor.backends();
    tracing::info!("✓ Model backend: {}", config.backend);
    tracing::info!("  Goal classifier:  {}", goal_classifier);
    tracing::info!(
        "  Instrument model: {} ({} labels)",
        instrument_model,
        predictor.labels().len()
    );

    if !predictor.health_check().await {
        tracing::warn!("⚠ Model service not reachable - /advisor requests will fail");
        tracing::warn!("  Check MODEL_SERVICE_URL ({})", config.remote.base_url);
    }

    let app = create_router(AppState::new(predictor, config.backend));

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 finance advisor running on http://{}", config.bind_addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health   - Health check");
    tracing::info!("  POST /advisor  - Generate advice");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
