//! Analysis client: prompt + schema out, validated [`AnalysisResult`] back.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, instrument, warn};

use crate::domain::errors::AnalysisError;
use crate::domain::models::{AnalysisResult, UserInput};
use crate::domain::ports::{GenerationRequest, GenerativeService};
use crate::services::prompt_builder::build_prompt;
use crate::services::response_schema::analysis_response_schema;

/// Turns a [`UserInput`] into an [`AnalysisResult`] through a generative service.
///
/// The caller is responsible for validating the input first. Each call
/// performs exactly one request; nothing is retried or cached.
#[derive(Clone)]
pub struct AnalysisClient {
    service: Arc<dyn GenerativeService>,
    response_schema: serde_json::Value,
}

impl AnalysisClient {
    pub fn new(service: Arc<dyn GenerativeService>) -> Self {
        Self {
            service,
            response_schema: analysis_response_schema(),
        }
    }

    pub fn service_name(&self) -> &'static str {
        self.service.name()
    }

    /// Request, parse and correct an analysis for `input`.
    #[instrument(skip(self, input), fields(service = self.service.name()))]
    pub async fn analyze(&self, input: &UserInput) -> Result<AnalysisResult, AnalysisError> {
        let prompt = build_prompt(input);
        debug!(prompt_len = prompt.len(), "built analysis prompt");

        let request = GenerationRequest {
            prompt,
            response_schema: self.response_schema.clone(),
        };

        let started = Instant::now();
        let response = self.service.generate(request).await.inspect_err(|err| {
            warn!(error = %err, elapsed_ms = started.elapsed().as_millis(), "generation failed");
        })?;

        if let Some(usage) = response.usage {
            info!(
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                model = response.model.as_deref().unwrap_or("unknown"),
                elapsed_ms = started.elapsed().as_millis(),
                "generation completed"
            );
        }

        let body = response
            .text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| AnalysisError::Parse("empty response from the analysis service".into()))?;

        parse_analysis(body)
    }
}

/// Parse a response body and overwrite the overall score with the local value.
pub fn parse_analysis(body: &str) -> Result<AnalysisResult, AnalysisError> {
    let service_score = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|raw| raw["viability"]["score"].as_f64());

    let result = AnalysisResult::from_service_json(body).inspect_err(|err| {
        warn!(error = %err, "response did not match the declared schema");
    })?;

    match service_score {
        Some(reported) if (reported - f64::from(result.viability.score)).abs() > f64::EPSILON => {
            info!(
                reported,
                computed = result.viability.score,
                "overwrote service-supplied viability score"
            );
        }
        _ => debug!(computed = result.viability.score, "derived viability score"),
    }

    Ok(result)
}
