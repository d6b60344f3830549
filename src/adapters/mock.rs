//! Mock generative service for testing and `--dry-run`.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use crate::domain::errors::AnalysisError;
#[cfg(test)]
use crate::domain::models::AnalysisResult;
use crate::domain::ports::{GenerationRequest, GenerationResponse, GenerativeService, TokenUsage};

/// Scripted answer for one `generate` call.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(GenerationResponse),
    Failure(AnalysisError),
}

impl MockResponse {
    pub fn json(body: &Value) -> Self {
        Self::text(body.to_string())
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::Success(GenerationResponse {
            text: Some(text.into()),
            usage: Some(TokenUsage {
                input_tokens: 100,
                output_tokens: 50,
            }),
            model: Some("mock".to_string()),
        })
    }

    /// Success status with no content at all.
    pub fn empty() -> Self {
        Self::Success(GenerationResponse::default())
    }

    pub const fn error(err: AnalysisError) -> Self {
        Self::Failure(err)
    }
}

impl Default for MockResponse {
    fn default() -> Self {
        Self::json(&sample_analysis_json())
    }
}

/// Replays queued responses in order, then the default response.
///
/// Every request is recorded so tests can assert on what was sent.
#[derive(Debug, Default)]
pub struct MockGenerativeService {
    queue: Mutex<VecDeque<MockResponse>>,
    requests: Mutex<Vec<GenerationRequest>>,
    default_response: MockResponse,
    latency: Option<Duration>,
}

impl MockGenerativeService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_response(response: MockResponse) -> Self {
        Self {
            default_response: response,
            ..Self::default()
        }
    }

    /// Wait `latency` before answering each call.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Queue a response for the next unanswered call.
    pub fn push(&self, response: MockResponse) {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl GenerativeService for MockGenerativeService {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, AnalysisError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let next = self
            .queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| self.default_response.clone());

        match next {
            MockResponse::Success(response) => Ok(response),
            MockResponse::Failure(err) => Err(err),
        }
    }
}

/// A complete, schema-conforming analysis body.
///
/// Sub-scores 8, 7, 6, 9, 5 give an overall score of 70.
pub fn sample_analysis_json() -> Value {
    json!({
        "passion": "Teaching people to cook simple, healthy food.",
        "mission": "Helping busy families eat better without spending more.",
        "profession": "Recipe development and nutrition coaching.",
        "vocation": "Affordable meal-planning workshops for local communities.",
        "ikigaiStatement": "Make healthy home cooking the easy default for busy families.",
        "ikigaiDescription": "Your skill set and your care for others meet in practical food education. The market exists but is crowded; your edge is affordability and community.",
        "keyInsight": "You are not selling recipes, you are selling time back to parents.",
        "pivotPoint": "Finding 10 paying families before building any product.",
        "signaturePhrase": "Good food, no fuss.",
        "contradictions": [
            "You want freedom but list a stable salary as a constraint.",
            "You value depth but plan to reach as many people as possible."
        ],
        "viability": {
            "reasoning": "Strong motivation and relevant skills. Market is competitive and time is limited by a full-time job.",
            "breakdown": {
                "motivation": 8,
                "skills": 7,
                "market": 6,
                "time": 9,
                "financial": 5
            }
        },
        "risks": [
            {"category": "Structural", "description": "Evenings only; sessions may collide with family time."},
            {"category": "Personal", "description": "You tend to polish content instead of shipping it."},
            {"category": "Strategic", "description": "Competing on recipes alone puts you against free content."}
        ],
        "minimalistIkigai": "One weekly cooking workshop for five neighbours.",
        "realityTests": [
            "Post one workshop offer and count sign-ups within 7 days.",
            "Ask 3 parents what they would pay for a monthly plan."
        ],
        "timelineContext": "Assumes about 5 hours per week next to a full-time job.",
        "timeline": {
            "week1": {
                "objective": "Interview 5 parents about weeknight dinners",
                "actions": ["List 10 contacts", "Book 5 calls"]
            },
            "month1": {
                "objective": "Run 2 paid pilot workshops",
                "actions": ["Find a venue", "Set a price", "Collect feedback"]
            },
            "month3": {
                "objective": "Reach 20 recurring participants",
                "actions": ["Launch a monthly plan", "Ask for referrals"]
            }
        }
    })
}

/// [`sample_analysis_json`] parsed, with the score derived.
#[cfg(test)]
pub fn sample_analysis() -> AnalysisResult {
    AnalysisResult::from_service_json(&sample_analysis_json().to_string()).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> GenerationRequest {
        GenerationRequest {
            prompt: "p".to_string(),
            response_schema: json!({}),
        }
    }

    #[tokio::test]
    async fn test_queue_then_default() {
        let mock = MockGenerativeService::new();
        mock.push(MockResponse::error(AnalysisError::Service("down".into())));

        assert!(mock.generate(request()).await.is_err());
        let response = mock.generate(request()).await.unwrap();
        assert!(response.text.unwrap().contains("ikigaiStatement"));
        assert_eq!(mock.call_count(), 2);
    }

    #[test]
    fn test_sample_analysis_score() {
        assert_eq!(sample_analysis().viability.score, 70);
    }
}
