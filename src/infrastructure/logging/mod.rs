//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - Pretty or JSON console output on stderr
//! - Optional daily-rotated JSON log files
//! - Secret scrubbing for service error bodies

pub mod config;
pub mod logger;
pub mod secret_scrubbing;

pub use config::{parse_log_level, LogFormat};
pub use logger::LoggerImpl;
pub use secret_scrubbing::SecretScrubber;
