//! Ikigai - a guided self-assessment at the crossing of four questions.
//!
//! The user lists what they love, what they are good at, what they can be
//! paid for and what the world needs, plus values, constraints and an energy
//! level. A generative service turns that into a structured analysis whose
//! viability score is always recomputed locally.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): data model, error taxonomy, service port
//! - **Service Layer** (`services`): prompt, response contract, analysis client, flow controller
//! - **Adapters** (`adapters`): Gemini, mock and unconfigured service implementations
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): command-line interface and interactive session
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use ikigai::adapters::MockGenerativeService;
//! use ikigai::services::{AnalysisClient, FlowController};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let client = AnalysisClient::new(Arc::new(MockGenerativeService::new()));
//! let mut flow = FlowController::new();
//! flow.dispatch(ikigai::Intent::Start)?;
//! flow.run_analysis(&client).await?;
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{AnalysisError, AnalysisErrorKind, FlowError, ValidationError};
pub use domain::models::{
    AnalysisResult, Bucket, Config, FlowState, Intent, UserInput, Viability, ViabilityBreakdown,
};
pub use domain::ports::GenerativeService;
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{AnalysisClient, Completion, FlowController};
