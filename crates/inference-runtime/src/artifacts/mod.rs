//! Local Model Artifacts
//!
//! Loads the frozen goal vectorizer, goal classifier, instrument model and
//! label encoder from a model directory once at startup.

mod linear;
mod trees;
mod vectorizer;

pub use linear::{LinearGoalClassifier, LinearWeights};
pub use trees::{Node, Tree, TreeEnsemble};
pub use vectorizer::{SparseVector, TfidfVectorizer};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use inference_core::{InferenceError, InstrumentPredictor, LabelEncoder, Result};

pub const VECTORIZER_FILE: &str = "goal_vectorizer.json";
pub const GOAL_CLASSIFIER_FILE: &str = "goal_classifier.json";
pub const INSTRUMENT_MODEL_FILE: &str = "instrument_model.json";
pub const LABEL_ENCODER_FILE: &str = "label_encoder.json";

/// All four artifacts, parsed and cross-checked
pub struct ArtifactBundle {
    pub goal_classifier: LinearGoalClassifier,
    pub instrument_model: TreeEnsemble,
    pub labels: LabelEncoder,
}

impl ArtifactBundle {
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        tracing::info!("Loading model artifacts from {}", dir.display());

        let vectorizer = TfidfVectorizer::from_json(&read(dir, VECTORIZER_FILE)?)?;
        let weights = LinearWeights::from_json(&read(dir, GOAL_CLASSIFIER_FILE)?)?;
        let goal_classifier = LinearGoalClassifier::new(vectorizer, weights)?;
        let instrument_model = TreeEnsemble::from_json(&read(dir, INSTRUMENT_MODEL_FILE)?)?;
        let labels = LabelEncoder::from_json(&read(dir, LABEL_ENCODER_FILE)?)?;

        if labels.len() != instrument_model.n_classes {
            return Err(InferenceError::Artifact(format!(
                "label encoder has {} classes but instrument model has {}",
                labels.len(),
                instrument_model.n_classes
            )));
        }

        tracing::info!(
            "✓ Loaded {} trees over {} instrument classes",
            instrument_model.trees.len(),
            labels.len()
        );

        Ok(Self { goal_classifier, instrument_model, labels })
    }

    pub fn into_predictor(self) -> InstrumentPredictor {
        InstrumentPredictor::new(
            Arc::new(self.goal_classifier),
            Arc::new(self.instrument_model),
            self.labels,
        )
    }
}

fn read(dir: &Path, file: &str) -> Result<String> {
    let path: PathBuf = dir.join(file);
    std::fs::read_to_string(&path)
        .map_err(|e| InferenceError::Artifact(format!("cannot read {}: {e}", path.display())))
}

/// Load a predictor from a model directory
pub fn load_predictor(dir: impl AsRef<Path>) -> Result<InstrumentPredictor> {
    Ok(ArtifactBundle::load(dir)?.into_predictor())
}

#[cfg(test)]
mod tests {
    use super::*;
    use inference_core::GoalFeatures;

    fn write_bundle(dir: &Path, label_count: usize) {
        std::fs::write(
            dir.join(VECTORIZER_FILE),
            r#"{"vocabulary": {"retirement": 0, "house": 1}, "idf": [1.0, 1.0]}"#,
        )
        .unwrap();
        std::fs::write(
            dir.join(GOAL_CLASSIFIER_FILE),
            r#"{"classes": [0, 1], "coef": [[1.0, 0.0], [0.0, 1.0]], "intercept": [0.0, 0.0]}"#,
        )
        .unwrap();
        std::fs::write(
            dir.join(INSTRUMENT_MODEL_FILE),
            r#"{"n_classes": 2, "trees": [
                {"class": 0, "nodes": [
                    {"feature": 4, "threshold": 0.5, "yes": 1, "no": 2},
                    {"leaf": 1.0},
                    {"leaf": -1.0}
                ]}
            ]}"#,
        )
        .unwrap();
        let classes: Vec<String> = ["NPS", "Debt Mutual Fund", "PPF"]
            .iter()
            .take(label_count)
            .map(|s| (*s).to_string())
            .collect();
        std::fs::write(
            dir.join(LABEL_ENCODER_FILE),
            serde_json::json!({ "classes": classes }).to_string(),
        )
        .unwrap();
    }

    #[tokio::test]
    async fn test_load_and_predict() {
        let dir = tempfile::tempdir().unwrap();
        write_bundle(dir.path(), 2);

        let predictor = load_predictor(dir.path()).unwrap();
        let features = GoalFeatures {
            age: 45,
            salary: 80_000.0,
            savings: 500_000.0,
            risk_profile: "High".into(),
            goal: "Retirement".into(),
            goal_amount: 10_000_000.0,
            years_to_goal: 15,
        };
        let prediction = predictor.predict(&features).await.unwrap();
        assert_eq!(prediction.instrument, "NPS");
        assert!(prediction.confidence > 50.0 && prediction.confidence <= 100.0);

        let house = GoalFeatures { goal: "Buy a house".into(), ..features };
        assert_eq!(predictor.predict(&house).await.unwrap().instrument, "Debt Mutual Fund");
    }

    #[tokio::test]
    async fn test_shipped_models() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../models");
        let predictor = load_predictor(&dir).unwrap();
        assert_eq!(predictor.labels().len(), 16);

        let retirement = GoalFeatures {
            age: 35,
            salary: 50_000.0,
            savings: 100_000.0,
            risk_profile: "High".into(),
            goal: "Retirement".into(),
            goal_amount: 2_000_000.0,
            years_to_goal: 10,
        };
        assert_eq!(predictor.predict(&retirement).await.unwrap().instrument, "NPS");

        let emergency = GoalFeatures {
            goal: "Emergency fund".into(),
            years_to_goal: 2,
            ..retirement.clone()
        };
        assert_eq!(predictor.predict(&emergency).await.unwrap().instrument, "Debt Mutual Fund");

        let house = GoalFeatures { goal: "Buy a house".into(), years_to_goal: 15, ..retirement };
        assert_eq!(predictor.predict(&house).await.unwrap().instrument, "Real Estate Investment");
    }

    #[test]
    fn test_label_count_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        write_bundle(dir.path(), 3);
        assert!(matches!(ArtifactBundle::load(dir.path()), Err(InferenceError::Artifact(_))));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ArtifactBundle::load(dir.path()).err().unwrap();
        assert!(err.to_string().contains(VECTORIZER_FILE));
    }
}
