//! # inference-core
//!
//! Narrow inference interfaces for the finance advisor.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   InstrumentPredictor                       │
//! │  ┌─────────────┐  ┌──────────────────┐  ┌───────────────┐  │
//! │  │    Goal     │  │    Instrument    │  │     Label     │  │
//! │  │ Classifier  │──│    Classifier    │──│    Encoder    │  │
//! │  │ (Strategy)  │  │    (Strategy)    │  │               │  │
//! │  └─────────────┘  └──────────────────┘  └───────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The classifier traits let the predictor run against local model
//! artifacts or a remote model-serving endpoint without code changes.

pub mod classifier;
pub mod error;
pub mod features;
pub mod label;
pub mod predictor;

pub use classifier::{GoalClassifier, InstrumentClassifier};
pub use error::{InferenceError, Result};
pub use features::{FeatureRow, GoalCategory, GoalFeatures, RiskProfile, FEATURE_COUNT};
pub use label::LabelEncoder;
pub use predictor::{InstrumentPredictor, Prediction};
