//! Server Configuration
//!
//! Read from the environment (after `.env` has been loaded).

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use inference_runtime::{InstrumentPredictor, RemoteConfig};
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_MODEL_DIR: &str = "models";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown model backend '{0}' (expected 'artifacts' or 'remote')")]
    UnknownBackend(String),

    #[error("Failed to initialize {backend} backend: {source}")]
    Backend {
        backend: ModelBackend,
        #[source]
        source: inference_runtime::InferenceError,
    },
}

/// Where instrument predictions come from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModelBackend {
    /// JSON model artifacts loaded from `MODEL_DIR`
    #[default]
    Artifacts,
    /// A model-serving HTTP endpoint at `MODEL_SERVICE_URL`
    Remote,
}

impl ModelBackend {
    pub fn as_str(self) -> &'static str {
        match self {
            ModelBackend::Artifacts => "artifacts",
            ModelBackend::Remote => "remote",
        }
    }
}

impl fmt::Display for ModelBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "artifacts" => Ok(ModelBackend::Artifacts),
            "remote" => Ok(ModelBackend::Remote),
            _ => Err(ConfigError::UnknownBackend(s.to_string())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub backend: ModelBackend,
    pub model_dir: PathBuf,
    pub remote: RemoteConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.into(),
            backend: ModelBackend::default(),
            model_dir: PathBuf::from(DEFAULT_MODEL_DIR),
            remote: RemoteConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let backend = match std::env::var("MODEL_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => defaults.backend,
        };

        Ok(Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            backend,
            model_dir: std::env::var("MODEL_DIR").map(PathBuf::from).unwrap_or(defaults.model_dir),
            remote: RemoteConfig::from_env(),
        })
    }

    /// Build the predictor for the configured backend
    pub async fn load_predictor(&self) -> Result<Arc<InstrumentPredictor>, ConfigError> {
        let predictor = match self.backend {
            ModelBackend::Artifacts => inference_runtime::load_predictor(&self.model_dir),
            ModelBackend::Remote => inference_runtime::connect_predictor(self.remote.clone()).await,
        };
        predictor
            .map(Arc::new)
            .map_err(|source| ConfigError::Backend { backend: self.backend, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_parsing() {
        assert_eq!("artifacts".parse::<ModelBackend>().unwrap(), ModelBackend::Artifacts);
        assert_eq!(" Remote ".parse::<ModelBackend>().unwrap(), ModelBackend::Remote);
        assert!(matches!(
            "onnx".parse::<ModelBackend>(),
            Err(ConfigError::UnknownBackend(name)) if name == "onnx"
        ));
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr, "0.0.0.0:8000");
        assert_eq!(config.backend, ModelBackend::Artifacts);
        assert_eq!(config.model_dir, PathBuf::from("models"));
    }

    #[tokio::test]
    async fn test_missing_artifacts_fail_to_load() {
        let config = ServerConfig {
            model_dir: PathBuf::from("/nonexistent/model/dir"),
            ..ServerConfig::default()
        };
        let err = config.load_predictor().await.unwrap_err();
        assert!(err.to_string().starts_with("Failed to initialize artifacts backend"));
    }
}
