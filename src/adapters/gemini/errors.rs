use reqwest::StatusCode;
use thiserror::Error;

use crate::domain::errors::AnalysisError;

/// Errors that can occur when interacting with the Gemini API
#[derive(Error, Debug)]
pub enum GeminiApiError {
    /// Credential missing, blank or rejected (HTTP 400 `API_KEY_INVALID`, 401)
    #[error("Invalid API key: {0}")]
    InvalidApiKey(String),

    /// Credential lacks permission for the model (HTTP 403)
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Malformed request (HTTP 400)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Unknown model or endpoint (HTTP 404)
    #[error("Model not found: {0}")]
    NotFound(String),

    /// Quota or rate limit exceeded (HTTP 429)
    #[error("Rate limit exceeded - too many requests")]
    RateLimitExceeded,

    /// Server error from the API (HTTP 5xx)
    #[error("Server error ({0}): {1}")]
    ServerError(StatusCode, String),

    /// Request timed out
    #[error("Request timeout")]
    Timeout,

    /// Network or connection error
    #[error("Network error: {0}")]
    NetworkError(#[source] reqwest::Error),

    /// Success status, but the envelope could not be decoded
    #[error("Malformed response envelope: {0}")]
    MalformedResponse(String),

    /// Unknown or unexpected error
    #[error("Unknown error ({0}): {1}")]
    UnknownError(StatusCode, String),
}

impl GeminiApiError {
    /// Map an HTTP status and (already scrubbed) body to an error variant.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::BAD_REQUEST if body.contains("API_KEY_INVALID") => Self::InvalidApiKey(body),
            StatusCode::BAD_REQUEST => Self::InvalidRequest(body),
            StatusCode::UNAUTHORIZED => Self::InvalidApiKey(body),
            StatusCode::FORBIDDEN => Self::PermissionDenied(body),
            StatusCode::NOT_FOUND => Self::NotFound(body),
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimitExceeded,
            status if status.is_server_error() => Self::ServerError(status, body),
            _ => Self::UnknownError(status, body),
        }
    }

    /// Returns true if the user must fix their credential setup.
    pub const fn is_credential_error(&self) -> bool {
        matches!(self, Self::InvalidApiKey(_) | Self::PermissionDenied(_))
    }

    /// Returns true if re-submitting later may succeed.
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RateLimitExceeded | Self::ServerError(_, _) | Self::Timeout | Self::NetworkError(_)
        )
    }
}

impl From<reqwest::Error> for GeminiApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::NetworkError(err)
        }
    }
}

impl From<GeminiApiError> for AnalysisError {
    fn from(err: GeminiApiError) -> Self {
        match err {
            GeminiApiError::InvalidApiKey(_) | GeminiApiError::PermissionDenied(_) => {
                Self::Configuration(format!("the API key was rejected ({err})"))
            }
            GeminiApiError::MalformedResponse(_) => Self::Parse(err.to_string()),
            other => Self::Service(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::AnalysisErrorKind;

    #[test]
    fn test_from_status_classification() {
        assert!(matches!(
            GeminiApiError::from_status(StatusCode::BAD_REQUEST, "bad field".into()),
            GeminiApiError::InvalidRequest(_)
        ));
        assert!(matches!(
            GeminiApiError::from_status(
                StatusCode::BAD_REQUEST,
                r#"{"error":{"details":[{"reason":"API_KEY_INVALID"}]}}"#.into()
            ),
            GeminiApiError::InvalidApiKey(_)
        ));
        assert!(matches!(
            GeminiApiError::from_status(StatusCode::FORBIDDEN, String::new()),
            GeminiApiError::PermissionDenied(_)
        ));
        assert!(matches!(
            GeminiApiError::from_status(StatusCode::NOT_FOUND, String::new()),
            GeminiApiError::NotFound(_)
        ));
        assert!(matches!(
            GeminiApiError::from_status(StatusCode::TOO_MANY_REQUESTS, String::new()),
            GeminiApiError::RateLimitExceeded
        ));
        assert!(matches!(
            GeminiApiError::from_status(StatusCode::SERVICE_UNAVAILABLE, String::new()),
            GeminiApiError::ServerError(_, _)
        ));
        assert!(matches!(
            GeminiApiError::from_status(StatusCode::IM_A_TEAPOT, String::new()),
            GeminiApiError::UnknownError(_, _)
        ));
    }

    #[test]
    fn test_transient_and_credential_are_exclusive() {
        let rate = GeminiApiError::RateLimitExceeded;
        assert!(rate.is_transient());
        assert!(!rate.is_credential_error());

        let key = GeminiApiError::InvalidApiKey("nope".into());
        assert!(key.is_credential_error());
        assert!(!key.is_transient());
    }

    #[test]
    fn test_conversion_to_analysis_error() {
        let err: AnalysisError = GeminiApiError::InvalidApiKey("x".into()).into();
        assert_eq!(err.kind(), AnalysisErrorKind::Configuration);

        let err: AnalysisError = GeminiApiError::Timeout.into();
        assert_eq!(err.kind(), AnalysisErrorKind::Service);

        let err: AnalysisError =
            GeminiApiError::ServerError(StatusCode::BAD_GATEWAY, "upstream".into()).into();
        assert_eq!(err.kind(), AnalysisErrorKind::Service);

        let err: AnalysisError = GeminiApiError::MalformedResponse("eof".into()).into();
        assert_eq!(err.kind(), AnalysisErrorKind::Parse);
    }
}
