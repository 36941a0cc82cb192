//! Linear Goal Classifier
//!
//! One-vs-rest linear model over TF-IDF features. The decision is the class
//! with the highest score `intercept + coef · x`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use inference_core::{GoalCategory, GoalClassifier, InferenceError, Result};

use super::vectorizer::TfidfVectorizer;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LinearWeights {
    /// Label id per row of `coef`
    pub classes: Vec<i64>,

    /// One dense coefficient row per class
    pub coef: Vec<Vec<f64>>,

    pub intercept: Vec<f64>,
}

impl LinearWeights {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Goal classifier backed by frozen vectorizer and linear weights
pub struct LinearGoalClassifier {
    vectorizer: TfidfVectorizer,
    weights: LinearWeights,
}

impl LinearGoalClassifier {
    pub fn new(vectorizer: TfidfVectorizer, weights: LinearWeights) -> Result<Self> {
        let n = weights.classes.len();
        if n == 0 {
            return Err(InferenceError::Artifact("goal classifier has no classes".into()));
        }
        if weights.coef.len() != n || weights.intercept.len() != n {
            return Err(InferenceError::Artifact(format!(
                "goal classifier has {n} classes, {} coefficient rows and {} intercepts",
                weights.coef.len(),
                weights.intercept.len()
            )));
        }
        let dim = vectorizer.dimension();
        if let Some(row) = weights.coef.iter().find(|row| row.len() != dim) {
            return Err(InferenceError::FeatureMismatch { expected: row.len(), got: dim });
        }
        Ok(Self { vectorizer, weights })
    }

    /// Raw label id for a description
    pub fn predict_label(&self, description: &str) -> i64 {
        let x = self.vectorizer.transform(description);

        let mut best = (0usize, f64::NEG_INFINITY);
        for (i, (row, bias)) in self.weights.coef.iter().zip(&self.weights.intercept).enumerate() {
            let score = bias + x.iter().map(|&(col, v)| row[col] * v).sum::<f64>();
            if score > best.1 {
                best = (i, score);
            }
        }
        self.weights.classes[best.0]
    }
}

#[async_trait]
impl GoalClassifier for LinearGoalClassifier {
    async fn classify(&self, description: &str) -> Result<GoalCategory> {
        GoalCategory::from_id(self.predict_label(description))
    }

    fn name(&self) -> &str {
        "tfidf-linear"
    }
}
