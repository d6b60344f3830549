//! Generative service port - interface for structured text generation backends.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::errors::AnalysisError;

/// A single structured-generation request.
///
/// The service is asked to answer `prompt` with a JSON document matching
/// `response_schema`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Natural-language instruction payload
    pub prompt: String,

    /// Declared output schema the response must follow
    pub response_schema: serde_json::Value,
}

/// Token usage statistics reported by the service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// Raw answer of the service, before schema validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Generated text; `None` when the service returned no content
    pub text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,

    /// Model version that produced the answer, when reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl GenerationResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }
}

/// Trait for generative service implementations.
///
/// Implementations perform exactly one outbound call per `generate` and never
/// retry; every failure is returned to the caller as an [`AnalysisError`].
#[async_trait]
pub trait GenerativeService: Send + Sync {
    /// Backend name used in logs.
    fn name(&self) -> &'static str;

    /// Generate a structured answer.
    async fn generate(&self, request: GenerationRequest)
        -> Result<GenerationResponse, AnalysisError>;
}
