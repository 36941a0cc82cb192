//! Error Types for the Finance Advisor

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AdvisorError>;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error(transparent)]
    Inference(#[from] inference_core::InferenceError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AdvisorError {
    /// Whether the caller sent bad data, as opposed to a failure while advising
    pub fn is_client_error(&self) -> bool {
        matches!(self, AdvisorError::InvalidInput(_))
    }
}
