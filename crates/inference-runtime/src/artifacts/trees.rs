//! Boosted Tree Ensemble
//!
//! Multi-class gradient-boosted trees exported as JSON. Each tree belongs to
//! one class; class margins are summed leaf values and turned into
//! probabilities with a softmax.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use inference_core::{FeatureRow, InferenceError, InstrumentClassifier, Result, FEATURE_COUNT};

/// A tree node, addressed by its index in [`Tree::nodes`]
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    /// Go to `yes` when `row[feature] < threshold`, else `no`
    Split {
        feature: usize,
        threshold: f64,
        yes: usize,
        no: usize,
    },
    Leaf {
        leaf: f64,
    },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tree {
    /// Class whose margin this tree contributes to
    pub class: usize,

    /// Root is node 0
    pub nodes: Vec<Node>,
}

impl Tree {
    fn evaluate(&self, row: &[f64]) -> f64 {
        let mut index = 0;
        // validated trees are acyclic, so a path never exceeds the node count
        for _ in 0..self.nodes.len() {
            match &self.nodes[index] {
                Node::Leaf { leaf } => return *leaf,
                Node::Split { feature, threshold, yes, no } => {
                    index = if row[*feature] < *threshold { *yes } else { *no };
                }
            }
        }
        0.0
    }

    fn validate(&self, n_classes: usize) -> Result<()> {
        if self.class >= n_classes {
            return Err(InferenceError::Artifact(format!(
                "tree assigned to class {} but model has {n_classes} classes",
                self.class
            )));
        }
        if self.nodes.is_empty() {
            return Err(InferenceError::Artifact("tree has no nodes".into()));
        }
        for (i, node) in self.nodes.iter().enumerate() {
            if let Node::Split { feature, yes, no, .. } = node {
                if *feature >= FEATURE_COUNT {
                    return Err(InferenceError::FeatureMismatch {
                        expected: FEATURE_COUNT,
                        got: feature + 1,
                    });
                }
                // children must point forward to rule out cycles
                if *yes <= i || *no <= i || *yes >= self.nodes.len() || *no >= self.nodes.len() {
                    return Err(InferenceError::Artifact(format!(
                        "node {i} has invalid children ({yes}, {no})"
                    )));
                }
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TreeEnsemble {
    pub n_classes: usize,

    /// Initial margin for every class
    #[serde(default = "default_base_score")]
    pub base_score: f64,

    pub trees: Vec<Tree>,
}

fn default_base_score() -> f64 {
    0.5
}

impl TreeEnsemble {
    pub fn from_json(json: &str) -> Result<Self> {
        let model: Self = serde_json::from_str(json)?;
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<()> {
        if self.n_classes == 0 {
            return Err(InferenceError::Artifact("instrument model has no classes".into()));
        }
        self.trees.iter().try_for_each(|t| t.validate(self.n_classes))
    }

    pub fn margins(&self, row: &FeatureRow) -> Vec<f64> {
        let mut margins = vec![self.base_score; self.n_classes];
        for tree in &self.trees {
            margins[tree.class] += tree.evaluate(row.values());
        }
        margins
    }

    pub fn probabilities(&self, row: &FeatureRow) -> Vec<f64> {
        softmax(&self.margins(row))
    }
}

fn softmax(margins: &[f64]) -> Vec<f64> {
    let max = margins.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = margins.iter().map(|m| (m - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

#[async_trait]
impl InstrumentClassifier for TreeEnsemble {
    async fn predict_proba(&self, row: &FeatureRow) -> Result<Vec<f64>> {
        Ok(self.probabilities(row))
    }

    fn name(&self) -> &str {
        "boosted-trees"
    }
}
