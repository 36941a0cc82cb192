//! Instrument Predictor
//!
//! Encodes a goal's features, queries the instrument classifier and decodes
//! the winning class into an instrument name with its confidence.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::classifier::{argmax, GoalClassifier, InstrumentClassifier};
use crate::error::{InferenceError, Result};
use crate::features::{FeatureRow, GoalFeatures, RiskProfile};
use crate::label::LabelEncoder;

/// Predicted instrument and the model's confidence in it
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub instrument: String,

    /// Top-class probability as a percentage, one decimal place
    pub confidence: f64,
}

/// Inference pipeline over a goal classifier and an instrument classifier
pub struct InstrumentPredictor {
    goals: Arc<dyn GoalClassifier>,
    model: Arc<dyn InstrumentClassifier>,
    labels: LabelEncoder,
}

impl InstrumentPredictor {
    pub fn new(
        goals: Arc<dyn GoalClassifier>,
        model: Arc<dyn InstrumentClassifier>,
        labels: LabelEncoder,
    ) -> Self {
        Self { goals, model, labels }
    }

    pub async fn predict(&self, features: &GoalFeatures) -> Result<Prediction> {
        let risk: RiskProfile = features.risk_profile.parse()?;
        let goal = self.goals.classify(&features.goal).await?;
        let row = FeatureRow::encode(features, risk, goal);

        let probabilities = self.model.predict_proba(&row).await?;
        let index = argmax(&probabilities).ok_or(InferenceError::EmptyPrediction)?;
        let instrument = self.labels.decode(index)?.to_string();
        let confidence = round_percent(probabilities[index]);

        tracing::debug!(
            goal = %features.goal,
            category = %goal,
            instrument = %instrument,
            confidence,
            "instrument predicted"
        );

        Ok(Prediction { instrument, confidence })
    }

    /// Backend names as (goal classifier, instrument classifier)
    pub fn backends(&self) -> (&str, &str) {
        (self.goals.name(), self.model.name())
    }

    pub async fn health_check(&self) -> bool {
        self.model.health_check().await
    }

    pub fn labels(&self) -> &LabelEncoder {
        &self.labels
    }
}

impl std::fmt::Debug for InstrumentPredictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (goals, model) = self.backends();
        f.debug_struct("InstrumentPredictor")
            .field("goals", &goals)
            .field("model", &model)
            .field("labels", &self.labels)
            .finish()
    }
}

fn round_percent(probability: f64) -> f64 {
    (probability * 1000.0).round() / 10.0
}
