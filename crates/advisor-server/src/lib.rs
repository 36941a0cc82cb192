//! # advisor-server
//!
//! HTTP front end for the finance advisor.
//!
//! ```text
//! POST /advisor  {user, goals, investments, insurance}
//!   → {user, goals, monthly_savings, advice: [{category, priority, message}]}
//! GET  /health
//! ```

pub mod config;
pub mod handlers;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use config::{ConfigError, ModelBackend, ServerConfig};
pub use state::AppState;

/// Build the router with CORS and request tracing
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/advisor", post(handlers::advisor_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
