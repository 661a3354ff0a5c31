use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::GeneratorConfig;
use crate::error::ApiError;

#[derive(Debug, Serialize)]
struct GenerateUpstreamRequest<'a> {
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateUpstreamResponse {
    content: String,
}

/// Thin client for the external text-generation service. Every call carries
/// the configured timeout so a stalled upstream cannot pin a request.
#[derive(Clone)]
pub struct GeneratorClient {
    http: reqwest::Client,
    endpoint: String,
}

impl GeneratorClient {
    pub fn new(cfg: &GeneratorConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            endpoint: cfg.endpoint.clone(),
        })
    }

    /// Forwards the prompt and relays the reply. Transport failures, timeouts,
    /// upstream error statuses and undecodable replies all surface as
    /// `ServiceUnavailable`, never as a generic internal error.
    pub async fn generate(&self, prompt: &str) -> Result<String, ApiError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&GenerateUpstreamRequest { prompt })
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "generation service unreachable");
                ApiError::ServiceUnavailable("AI service unavailable".into())
            })?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "generation service error");
            return Err(ApiError::ServiceUnavailable("AI service unavailable".into()));
        }

        let body: GenerateUpstreamResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "generation service sent an undecodable reply");
            ApiError::ServiceUnavailable("AI service unavailable".into())
        })?;

        Ok(body.content)
    }
}
