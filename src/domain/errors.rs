//! Domain errors for the ikigai assessment flow.

use thiserror::Error;

use crate::domain::models::input::Bucket;
use crate::domain::models::FlowState;

/// Coarse classification of an [`AnalysisError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisErrorKind {
    Configuration,
    Service,
    Parse,
}

/// Errors produced while obtaining an analysis from the generative service.
///
/// All three variants are terminal for the current request. None of them is
/// retried automatically; the user may re-submit.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AnalysisError {
    /// The service credential is missing, blank or was rejected.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Transport failure, timeout or non-success response from the service.
    #[error("Service error: {0}")]
    Service(String),

    /// The response body was empty or did not match the declared schema.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl AnalysisError {
    pub const fn kind(&self) -> AnalysisErrorKind {
        match self {
            Self::Configuration(_) => AnalysisErrorKind::Configuration,
            Self::Service(_) => AnalysisErrorKind::Service,
            Self::Parse(_) => AnalysisErrorKind::Parse,
        }
    }

    /// Message shown to the end user.
    ///
    /// Configuration problems name the settings to fix; the other kinds invite
    /// a retry without exposing transport details.
    pub fn user_message(&self) -> String {
        match self {
            Self::Configuration(detail) => format!(
                "The analysis service is not configured: {detail}. \
                 Set GEMINI_API_KEY (or IKIGAI_ANALYSIS__API_KEY) and restart."
            ),
            Self::Service(_) => "The analysis service could not be reached or returned an error. \
                 Please try again in a moment."
                .to_string(),
            Self::Parse(_) => "The analysis could not be generated from the service response. \
                 Please try again."
                .to_string(),
        }
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Why the input cannot be submitted for analysis yet.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please add at least one item to \"{}\".", .0.label())]
    EmptyBucket(Bucket),

    #[error("Please add at least one core value.")]
    MissingValues,
}

/// Intents the flow controller refuses to apply.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FlowError {
    #[error("Cannot {intent} while on the {state} screen")]
    InvalidTransition { intent: String, state: FlowState },

    #[error("An analysis is already in progress")]
    Busy,

    #[error("Analyze issues a request; use begin_analysis or run_analysis")]
    AnalyzeNeedsRequest,

    #[error("No item at position {index} (list has {len} item(s))")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Energy level must be between 1 and 5, got {0}")]
    EnergyOutOfRange(u8),
}

pub type FlowResult<T> = Result<T, FlowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(
            AnalysisError::Configuration("x".into()).kind(),
            AnalysisErrorKind::Configuration
        );
        assert_eq!(AnalysisError::Service("x".into()).kind(), AnalysisErrorKind::Service);
        assert_eq!(AnalysisError::Parse("x".into()).kind(), AnalysisErrorKind::Parse);
    }

    #[test]
    fn test_configuration_message_is_actionable() {
        let msg = AnalysisError::Configuration("API key is missing".into()).user_message();
        assert!(msg.contains("GEMINI_API_KEY"));
        assert!(msg.contains("API key is missing"));
    }

    #[test]
    fn test_service_and_parse_messages_hide_details() {
        let msg = AnalysisError::Service("connection refused 10.0.0.1".into()).user_message();
        assert!(!msg.contains("10.0.0.1"));
        let msg = AnalysisError::Parse("missing field `mission`".into()).user_message();
        assert!(!msg.contains("mission"));
    }

    #[test]
    fn test_from_serde_error() {
        let err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        assert_eq!(AnalysisError::from(err).kind(), AnalysisErrorKind::Parse);
    }

    #[test]
    fn test_validation_display() {
        assert_eq!(
            ValidationError::EmptyBucket(Bucket::GoodAt).to_string(),
            "Please add at least one item to \"What you are good at\"."
        );
    }
}
