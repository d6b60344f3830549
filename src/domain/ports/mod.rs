//! Port trait definitions (Hexagonal Architecture)
//!
//! - GenerativeService: structured text generation used by the analysis client

pub mod generative_service;

pub use generative_service::{GenerationRequest, GenerationResponse, GenerativeService, TokenUsage};
