//! HTTP Handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use finance_advisor::{AdviceReport, AdvisorError, FinancialProfile};

use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub model_backend: &'static str,
    pub goal_classifier: String,
    pub instrument_model: String,
    pub model_ready: bool,
}

/// Error body: `{"detail": "<message>"}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(err: &AdvisorError) -> ApiError {
    let status = if err.is_client_error() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(ErrorResponse { detail: err.to_string() }))
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let predictor = state.engine.predictor();
    let (goal_classifier, instrument_model) = predictor.backends();
    let model_ready = predictor.health_check().await;

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        model_backend: state.backend.as_str(),
        goal_classifier: goal_classifier.to_string(),
        instrument_model: instrument_model.to_string(),
        model_ready,
    })
}

/// Generate advice for one financial profile
pub async fn advisor_handler(
    State(state): State<AppState>,
    Json(profile): Json<FinancialProfile>,
) -> Result<Json<AdviceReport>, ApiError> {
    let report = state.engine.report(profile).await.map_err(|e| {
        if e.is_client_error() {
            tracing::warn!("Rejected profile: {}", e);
        } else {
            tracing::error!("Advisor error: {}", e);
        }
        error_response(&e)
    })?;

    tracing::info!(user = %report.user.name, items = report.advice.len(), "advice served");
    Ok(Json(report))
}
