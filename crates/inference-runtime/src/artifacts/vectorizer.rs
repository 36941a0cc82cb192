//! TF-IDF Text Vectorizer
//!
//! Turns a goal description into a sparse, l2-normalized TF-IDF vector over
//! a frozen vocabulary.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use inference_core::{InferenceError, Result};

/// Words of two or more word characters
static TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is a valid regex"));

/// Sparse vector as (column, value), sorted by column
pub type SparseVector = Vec<(usize, f64)>;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    /// Term to column index
    pub vocabulary: HashMap<String, usize>,

    /// Inverse document frequency per column
    pub idf: Vec<f64>,

    /// Inclusive (min, max) n-gram sizes
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),

    #[serde(default = "default_true")]
    pub lowercase: bool,

    #[serde(default)]
    pub sublinear_tf: bool,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_true() -> bool {
    true
}

impl TfidfVectorizer {
    pub fn from_json(json: &str) -> Result<Self> {
        let vectorizer: Self = serde_json::from_str(json)?;
        vectorizer.validate()?;
        Ok(vectorizer)
    }

    fn validate(&self) -> Result<()> {
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(InferenceError::Artifact(format!(
                "invalid ngram range ({min_n}, {max_n})"
            )));
        }
        let out_of_range = self.vocabulary.iter().find(|&(_, &col)| col >= self.idf.len());
        if let Some((term, &col)) = out_of_range {
            return Err(InferenceError::Artifact(format!(
                "term '{term}' maps to column {col} but idf has {} entries",
                self.idf.len()
            )));
        }
        Ok(())
    }

    /// Number of columns in the output space
    pub fn dimension(&self) -> usize {
        self.idf.len()
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase { text.to_lowercase() } else { text.to_string() };
        let words: Vec<&str> = TOKEN_PATTERN.find_iter(&text).map(|m| m.as_str()).collect();

        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n {
            for window in words.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }

    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in self.tokenize(text) {
            if let Some(&col) = self.vocabulary.get(&term) {
                *counts.entry(col).or_insert(0.0) += 1.0;
            }
        }

        let mut vector: SparseVector = counts
            .into_iter()
            .map(|(col, tf)| {
                let tf = if self.sublinear_tf { 1.0 + tf.ln() } else { tf };
                (col, tf * self.idf[col])
            })
            .collect();

        let norm = vector.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, v) in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vectorizer() -> TfidfVectorizer {
        TfidfVectorizer::from_json(
            r#"{
                "vocabulary": {"buy": 0, "house": 1, "buy house": 2, "retirement": 3},
                "idf": [1.0, 2.0, 3.0, 1.5],
                "ngram_range": [1, 2]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_tokenize_with_bigrams() {
        let v = vectorizer();
        assert_eq!(v.tokenize("Buy a House"), vec!["buy", "house", "buy house"]);
    }

    #[test]
    fn test_transform_is_normalized() {
        let v = vectorizer();
        let vec = v.transform("buy house");
        assert_eq!(vec.iter().map(|(c, _)| *c).collect::<Vec<_>>(), vec![0, 1, 2]);
        let norm: f64 = vec.iter().map(|(_, x)| x * x).sum();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_text_is_empty() {
        assert!(vectorizer().transform("world tour").is_empty());
    }

    #[test]
    fn test_rejects_out_of_range_column() {
        let err = TfidfVectorizer::from_json(r#"{"vocabulary": {"car": 4}, "idf": [1.0]}"#);
        assert!(matches!(err, Err(InferenceError::Artifact(_))));
    }
}
