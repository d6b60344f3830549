//! HTTP client for the Gemini `generateContent` endpoint.

use async_trait::async_trait;
use reqwest::{header, Client};
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::errors::GeminiApiError;
use super::types::{GenerateContentRequest, GenerateContentResponse};
use crate::domain::errors::AnalysisError;
use crate::domain::models::AnalysisConfig;
use crate::domain::ports::{GenerationRequest, GenerationResponse, GenerativeService, TokenUsage};
use crate::infrastructure::logging::SecretScrubber;

/// Longest error body excerpt kept in logs and error messages.
const ERROR_BODY_EXCERPT: usize = 500;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Configuration for [`GeminiClient`]
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
    pub temperature: Option<f32>,
}

impl GeminiConfig {
    /// Build from the `analysis` config section.
    ///
    /// A missing credential becomes an empty string and is rejected by
    /// [`GeminiClient::new`].
    pub fn from_analysis_config(config: &AnalysisConfig) -> Self {
        Self {
            api_key: config.api_key.clone().unwrap_or_default(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            temperature: config.temperature,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("temperature", &self.temperature)
            .finish()
    }
}

/// [`GenerativeService`] backed by Gemini structured output.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http_client: Client,
    config: GeminiConfig,
    scrubber: SecretScrubber,
}

impl GeminiClient {
    /// Create a client, failing fast when the credential is unusable.
    pub fn new(config: GeminiConfig) -> Result<Self, AnalysisError> {
        let key = config.api_key.trim();
        if key.is_empty() || key == "undefined" {
            return Err(AnalysisError::Configuration(
                "no API key is configured".to_string(),
            ));
        }

        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AnalysisError::Service(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            config,
            scrubber: SecretScrubber::new(),
        })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    async fn send(&self, request: &GenerateContentRequest) -> Result<GenerateContentResponse, GeminiApiError> {
        let response = self
            .http_client
            .post(self.config.endpoint())
            .header(API_KEY_HEADER, self.config.api_key.trim())
            .header(header::CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body = self.scrubber.scrub_truncated(&body, ERROR_BODY_EXCERPT);
            warn!(status = status.as_u16(), body = %body, "Gemini API returned an error");
            return Err(GeminiApiError::from_status(status, body));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            warn!(error = %e, "undecodable Gemini response envelope");
            GeminiApiError::MalformedResponse(e.to_string())
        })
    }
}

#[async_trait]
impl GenerativeService for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    #[instrument(skip(self, request), fields(model = %self.config.model))]
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, AnalysisError> {
        let body = GenerateContentRequest::structured(
            request.prompt,
            request.response_schema,
            self.config.temperature,
        );

        let response = self.send(&body).await?;

        if let Some(reason) = response
            .candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref())
            .filter(|r| *r != "STOP")
        {
            debug!(finish_reason = reason, "generation stopped early");
        }

        Ok(GenerationResponse {
            text: response.first_text(),
            usage: response.usage_metadata.map(|u| TokenUsage {
                input_tokens: u.prompt_token_count,
                output_tokens: u.candidates_token_count,
            }),
            model: response.model_version,
        })
    }
}
