//! Placeholder service used when no usable credential is configured.

use async_trait::async_trait;

use crate::domain::errors::AnalysisError;
use crate::domain::ports::{GenerationRequest, GenerationResponse, GenerativeService};

/// Returns the startup configuration error from every call.
///
/// Lets the interactive session start without a credential and report the
/// problem on the first analysis instead.
#[derive(Debug, Clone)]
pub struct UnconfiguredService {
    error: AnalysisError,
}

impl UnconfiguredService {
    pub const fn new(error: AnalysisError) -> Self {
        Self { error }
    }
}

#[async_trait]
impl GenerativeService for UnconfiguredService {
    fn name(&self) -> &'static str {
        "unconfigured"
    }

    async fn generate(&self, _request: GenerationRequest) -> Result<GenerationResponse, AnalysisError> {
        Err(self.error.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::AnalysisErrorKind;

    #[tokio::test]
    async fn test_always_returns_configured_error() {
        let service = UnconfiguredService::new(AnalysisError::Configuration("no key".into()));
        for _ in 0..2 {
            let err = service
                .generate(GenerationRequest {
                    prompt: String::new(),
                    response_schema: serde_json::Value::Null,
                })
                .await
                .unwrap_err();
            assert_eq!(err.kind(), AnalysisErrorKind::Configuration);
        }
    }
}
