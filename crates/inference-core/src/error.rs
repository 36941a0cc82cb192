//! Error Types

use thiserror::Error;

/// Result type alias for inference operations
pub type Result<T> = std::result::Result<T, InferenceError>;

/// Inference error types
#[derive(Error, Debug)]
pub enum InferenceError {
    /// Risk profile label not in {Low, Medium, High}
    #[error("Unknown risk profile: '{0}'")]
    UnknownRiskProfile(String),

    /// Goal classifier produced a label outside the known categories
    #[error("Unknown goal category: {0}")]
    UnknownGoalCategory(i64),

    /// Instrument classifier produced a class index the label encoder cannot decode
    #[error("Unknown instrument label index: {0}")]
    UnknownLabel(usize),

    /// Classifier returned no class probabilities
    #[error("Classifier returned an empty probability vector")]
    EmptyPrediction,

    /// Feature row does not match the model input width
    #[error("Feature mismatch: model expects {expected} features, got {got}")]
    FeatureMismatch { expected: usize, got: usize },

    /// Malformed or inconsistent model artifact
    #[error("Model artifact error: {0}")]
    Artifact(String),

    /// Remote model service failed or answered with an error
    #[error("Model service error: {0}")]
    Service(String),

    /// Model service not reachable
    #[error("Model service unavailable: {0}")]
    ServiceUnavailable(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
