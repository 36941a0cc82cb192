//! Label Encoder
//!
//! Decodes instrument class indices back to instrument names.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{InferenceError, Result};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LabelEncoder {
    /// Class names, position = class index
    pub classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> Self {
        Self { classes }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let encoder: Self = serde_json::from_str(json)?;
        if encoder.classes.is_empty() {
            return Err(InferenceError::Artifact("label encoder has no classes".into()));
        }
        Ok(encoder)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            InferenceError::Artifact(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&json)
    }

    pub fn decode(&self, index: usize) -> Result<&str> {
        self.classes
            .get(index)
            .map(String::as_str)
            .ok_or(InferenceError::UnknownLabel(index))
    }

    pub fn encode(&self, name: &str) -> Option<usize> {
        self.classes.iter().position(|c| c == name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
