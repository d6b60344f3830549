//! Infrastructure layer module
//!
//! Configuration loading and logging setup. The generative service adapters
//! live in [`crate::adapters`].

pub mod config;
pub mod logging;
