//! # inference-runtime
//!
//! Model backends for the finance advisor.
//!
//! ## Backends
//!
//! - **Artifacts** (default): frozen JSON model artifacts loaded from disk
//! - **Remote** (default): an external model-serving HTTP endpoint
//!
//! ## Usage
//!
//! ```rust,ignore
//! use inference_runtime::artifacts;
//!
//! let predictor = artifacts::load_predictor("models")?;
//! let prediction = predictor.predict(&features).await?;
//! ```

#[cfg(feature = "artifacts")]
pub mod artifacts;

#[cfg(feature = "remote")]
pub mod remote;

#[cfg(feature = "artifacts")]
pub use artifacts::{load_predictor, ArtifactBundle};

#[cfg(feature = "remote")]
pub use remote::{connect_predictor, ModelServiceClient, RemoteConfig};

// Re-export core types for convenience
pub use inference_core::{
    GoalCategory, GoalClassifier, GoalFeatures, InferenceError, InstrumentClassifier,
    InstrumentPredictor, LabelEncoder, Prediction, Result,
};
