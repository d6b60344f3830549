//! Gemini generative service adapter.

pub mod client;
pub mod errors;
pub mod types;

pub use client::{GeminiClient, GeminiConfig};
pub use errors::GeminiApiError;
