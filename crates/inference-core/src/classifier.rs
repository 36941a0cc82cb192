//! Classifier Strategy Traits
//!
//! The pretrained models are opaque. The advisor only sees them through
//! these two narrow interfaces, so a local artifact backend and a remote
//! model-serving backend are interchangeable.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use inference_core::{GoalClassifier, InstrumentClassifier};
//!
//! let category = classifier.classify("save for my daughter's college").await?;
//! let probabilities = model.predict_proba(&row).await?;
//! ```

use async_trait::async_trait;

use crate::error::Result;
use crate::features::{FeatureRow, GoalCategory};

/// Maps a free-text goal description to one of the fixed goal categories
#[async_trait]
pub trait GoalClassifier: Send + Sync {
    async fn classify(&self, description: &str) -> Result<GoalCategory>;

    /// Backend name, for logs and health output
    fn name(&self) -> &str;
}

/// Tabular instrument classifier
#[async_trait]
pub trait InstrumentClassifier: Send + Sync {
    /// Class-probability vector for one encoded row, indexed by label id
    async fn predict_proba(&self, row: &FeatureRow) -> Result<Vec<f64>>;

    /// Check if the backend is available
    async fn health_check(&self) -> bool {
        true
    }

    fn name(&self) -> &str;
}

/// Index of the most probable class; the first one wins ties
pub fn argmax(probabilities: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &p) in probabilities.iter().enumerate() {
        match best {
            Some((_, b)) if p <= b => {}
            _ if p.is_nan() => {}
            _ => best = Some((i, p)),
        }
    }
    best.map(|(i, _)| i)
}
