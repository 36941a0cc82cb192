//! Remote Model Service
//!
//! Implementation of both classifier traits against an external
//! model-serving HTTP endpoint.
//!
//! | method | path             | body                              | reply                  |
//! |--------|------------------|-----------------------------------|------------------------|
//! | POST   | `/classify`      | `{"text": ".."}`                  | `{"label": 2}`         |
//! | POST   | `/predict_proba` | `{"columns": [..], "features": [..]}` | `{"probabilities": [..]}` |
//! | GET    | `/labels`        |                                   | `{"classes": [..]}`    |
//! | GET    | `/health`        |                                   | 2xx when ready         |

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use inference_core::{
    features::FEATURE_NAMES, FeatureRow, GoalCategory, GoalClassifier, InferenceError,
    InstrumentClassifier, InstrumentPredictor, LabelEncoder, Result,
};

/// Model service configuration
#[derive(Clone, Debug)]
pub struct RemoteConfig {
    /// Base URL, without trailing slash
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8501".into(),
            timeout_secs: 10,
        }
    }
}

impl RemoteConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let base_url = std::env::var("MODEL_SERVICE_URL").unwrap_or(defaults.base_url);
        let timeout_secs = std::env::var("MODEL_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(defaults.timeout_secs);

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs,
        }
    }
}

#[derive(Debug, Serialize)]
struct ClassifyRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ClassifyResponse {
    label: i64,
}

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    columns: &'a [&'a str],
    features: &'a [f64],
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    probabilities: Vec<f64>,
}

/// HTTP client for the model-serving component
pub struct ModelServiceClient {
    client: reqwest::Client,
    config: RemoteConfig,
}

impl ModelServiceClient {
    pub fn from_config(config: RemoteConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| InferenceError::Service(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self> {
        Self::from_config(RemoteConfig::from_env())
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path.trim_start_matches('/'))
    }

    async fn post<B: Serialize + Sync, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| InferenceError::ServiceUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(InferenceError::Service(format!("{path} returned {status}: {text}")));
        }

        response
            .json()
            .await
            .map_err(|e| InferenceError::Service(format!("{path} returned malformed body: {e}")))
    }

    /// Fetch the label encoder the service was deployed with
    pub async fn fetch_labels(&self) -> Result<LabelEncoder> {
        let response = self
            .client
            .get(self.url("labels"))
            .send()
            .await
            .map_err(|e| InferenceError::ServiceUnavailable(e.to_string()))?
            .error_for_status()
            .map_err(|e| InferenceError::Service(e.to_string()))?;

        let labels: LabelEncoder = response
            .json()
            .await
            .map_err(|e| InferenceError::Service(e.to_string()))?;
        if labels.is_empty() {
            return Err(InferenceError::Artifact("model service reported no labels".into()));
        }
        Ok(labels)
    }
}

#[async_trait]
impl GoalClassifier for ModelServiceClient {
    async fn classify(&self, description: &str) -> Result<GoalCategory> {
        let response: ClassifyResponse =
            self.post("classify", &ClassifyRequest { text: description }).await?;
        GoalCategory::from_id(response.label)
    }

    fn name(&self) -> &str {
        "model-service"
    }
}

#[async_trait]
impl InstrumentClassifier for ModelServiceClient {
    async fn predict_proba(&self, row: &FeatureRow) -> Result<Vec<f64>> {
        let request = PredictRequest { columns: &FEATURE_NAMES, features: row.values() };
        let response: PredictResponse = self.post("predict_proba", &request).await?;
        Ok(response.probabilities)
    }

    async fn health_check(&self) -> bool {
        match self.client.get(self.url("health")).send().await {
            Ok(r) => r.status().is_success(),
            Err(e) => {
                tracing::warn!("Model service health check failed: {}", e);
                false
            }
        }
    }

    fn name(&self) -> &str {
        "model-service"
    }
}

/// Build a predictor whose classifiers both live behind the model service
pub async fn connect_predictor(config: RemoteConfig) -> Result<InstrumentPredictor> {
    let client = Arc::new(ModelServiceClient::from_config(config)?);
    let labels = client.fetch_labels().await?;
    Ok(InstrumentPredictor::new(client.clone(), client, labels))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = RemoteConfig::default();
        assert_eq!(config.base_url, "http://localhost:8501");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_url_building() {
        let client = ModelServiceClient::from_config(RemoteConfig {
            base_url: "http://models:9000".into(),
            timeout_secs: 1,
        })
        .unwrap();
        assert_eq!(client.url("classify"), "http://models:9000/classify");
        assert_eq!(client.url("/predict_proba"), "http://models:9000/predict_proba");
    }

    #[test]
    fn test_predict_request_shape() {
        let row = FeatureRow([30.0, 1.0, 2.0, 2.0, 0.0, 3.0, 10.0]);
        let request = PredictRequest { columns: &FEATURE_NAMES, features: row.values() };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["columns"][3], "risk_profile");
        assert_eq!(json["features"][6], 10.0);
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        let client = ModelServiceClient::from_config(RemoteConfig {
            base_url: "http://127.0.0.1:9".into(),
            timeout_secs: 1,
        })
        .unwrap();
        let err = client.classify("retire early").await.unwrap_err();
        assert!(matches!(err, InferenceError::ServiceUnavailable(_)));
        assert!(!InstrumentClassifier::health_check(&client).await);
    }
}
