use crate::config::RunConfig;
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::Path;
use std::time::{Duration, Instant};
use tokio::time::sleep;

/// The external image classifier the evaluation pipeline consumes
///
/// Implementations map an image path and a model architecture name to a
/// free-text label. The label is used as returned; callers rely on it being
/// lowercase and trimmed.
#[allow(async_fn_in_trait)]
pub trait ImageClassifier {
    /// Classify one image with the given model architecture
    async fn classify(&mut self, image_path: &Path, model: &str) -> Result<String>;
}

/// JSON payload returned by the classification service
#[derive(Debug, Deserialize)]
struct ClassifyResponse {
    label: String,
}

/// Classifier backed by an HTTP inference service with rate limiting
#[derive(Debug)]
pub struct HttpClassifier {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    rate_limit_rps: f64,
    last_request: Option<Instant>,
}

impl HttpClassifier {
    /// Create a classifier for the given endpoint
    pub fn new(endpoint: &str, api_key: Option<String>, rate_limit_rps: f64) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key,
            rate_limit_rps,
            last_request: None,
        }
    }

    /// Create a classifier from a run configuration, resolving the API key
    /// from the configured environment variable
    pub fn from_config(run: &RunConfig) -> Result<Self> {
        let api_key = match &run.env_var_api_key {
            Some(var) => Some(
                std::env::var(var)
                    .with_context(|| format!("Environment variable {} not found", var))?,
            ),
            None => None,
        };

        Ok(Self::new(&run.api_endpoint, api_key, run.rate_limit_rps))
    }

    /// Enforce rate limiting for classification requests
    async fn enforce_rate_limit(&mut self) {
        if self.rate_limit_rps <= 0.0 {
            return;
        }

        let min_interval = Duration::from_secs_f64(1.0 / self.rate_limit_rps);

        if let Some(last_time) = self.last_request {
            let elapsed = last_time.elapsed();
            if elapsed < min_interval {
                sleep(min_interval - elapsed).await;
            }
        }

        self.last_request = Some(Instant::now());
    }

    /// Build the classification request for one image
    fn build_request(&self, image: Vec<u8>, model: &str) -> reqwest::RequestBuilder {
        let mut request = self
            .client
            .post(format!("{}/classify", self.endpoint))
            .query(&[("model", model)])
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(image);

        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        request
    }

    /// Extract the normalized label from the service response
    async fn extract_label(&self, response: reqwest::Response) -> Result<String> {
        let status = response.status();
        if !status.is_success() {
            bail!("Classification request failed with status {}", status);
        }

        let payload: ClassifyResponse = response
            .json()
            .await
            .context("Failed to decode classifier response")?;

        Ok(payload.label.to_lowercase().trim().to_string())
    }
}

impl ImageClassifier for HttpClassifier {
    async fn classify(&mut self, image_path: &Path, model: &str) -> Result<String> {
        self.enforce_rate_limit().await;

        let image = tokio::fs::read(image_path)
            .await
            .with_context(|| format!("Failed to read image: {}", image_path.display()))?;

        let response = self
            .build_request(image, model)
            .send()
            .await
            .context("Failed to reach classification service")?;

        self.extract_label(response).await
    }
}
