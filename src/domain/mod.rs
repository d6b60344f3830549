//! Domain layer for the ikigai assessment
//!
//! This module contains the data model, the error taxonomy and the port the
//! generative service adapters implement.

pub mod errors;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use errors::{AnalysisError, AnalysisErrorKind, FlowError, FlowResult, ValidationError};
