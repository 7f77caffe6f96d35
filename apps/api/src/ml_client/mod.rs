/// Client for the external career-prediction ML service.
///
/// The service accepts the `Profile` JSON shape on `POST /api/predict` and
/// answers with a `PredictionBundle`. Callers treat every failure here as a
/// signal to fall back to the local heuristic engine, so this client does not
/// retry.
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::scoring::models::{PredictionBundle, Profile};

#[derive(Debug, Error)]
pub enum MlServiceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("ML service returned status {status}: {message}")]
    Status { status: u16, message: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MlHealth {
    pub status: String,
    #[serde(default)]
    pub model_loaded: bool,
}

#[derive(Debug, Deserialize)]
struct SkillsResponse {
    skills: Vec<String>,
}

#[derive(Clone)]
pub struct MlServiceClient {
    client: Client,
    base_url: String,
}

impl MlServiceClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, MlServiceError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST {base}/api/predict`
    pub async fn predict(&self, profile: &Profile) -> Result<PredictionBundle, MlServiceError> {
        let response = self
            .client
            .post(self.endpoint("/api/predict"))
            .json(profile)
            .send()
            .await?;

        let response = check_status(response).await?;
        let bundle: PredictionBundle = response.json().await?;
        debug!(
            "ML service predicted '{}' (p={:.2})",
            bundle.prediction.career_role, bundle.prediction.probability
        );
        Ok(bundle)
    }

    /// `GET {base}/api/skills`
    pub async fn skills(&self) -> Result<Vec<String>, MlServiceError> {
        let response = self.client.get(self.endpoint("/api/skills")).send().await?;
        let response = check_status(response).await?;
        Ok(response.json::<SkillsResponse>().await?.skills)
    }

    /// `GET {base}/api/health`
    pub async fn health(&self) -> Result<MlHealth, MlServiceError> {
        let response = self.client.get(self.endpoint("/api/health")).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, MlServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(MlServiceError::Status {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = MlServiceClient::new("http://ml:5001/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://ml:5001");
        assert_eq!(client.endpoint("/api/predict"), "http://ml:5001/api/predict");
    }

    #[test]
    fn test_health_tolerates_missing_model_flag() {
        let health: MlHealth = serde_json::from_str(r#"{"status": "healthy"}"#).unwrap();
        assert_eq!(health.status, "healthy");
        assert!(!health.model_loaded);
    }

    #[tokio::test]
    async fn test_unreachable_service_is_http_error() {
        // Port 9 (discard) on localhost is closed in test environments.
        let client = MlServiceClient::new("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();
        let result = client.skills().await;
        assert!(matches!(result, Err(MlServiceError::Http(_))));
    }
}
