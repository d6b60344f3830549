//! Adapters implementing the generative service port.

pub mod gemini;
pub mod mock;
pub mod unconfigured;

pub use gemini::{GeminiClient, GeminiConfig};
pub use mock::{MockGenerativeService, MockResponse};
pub use unconfigured::UnconfiguredService;
