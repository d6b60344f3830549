//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment:
//! - YAML file loading (project, local and `--config` files)
//! - Environment variable overrides
//! - Configuration validation

pub mod loader;

pub use loader::{ConfigError, ConfigLoader};
