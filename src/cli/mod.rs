//! Command-line interface: argument parsing, screens and the interactive loop.

pub mod commands;
pub mod output;
pub mod progress;
pub mod render;
pub mod session;
pub mod types;

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

use crate::adapters::{GeminiClient, GeminiConfig, MockGenerativeService, UnconfiguredService};
use crate::domain::models::AnalysisConfig;
use crate::domain::ports::GenerativeService;
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::logging::LoggerImpl;
use crate::services::AnalysisClient;

pub use output::handle_error;
pub use types::{Cli, Commands};

/// Pick the generative service for this run.
///
/// A credential problem does not abort startup: the returned service reports
/// it on the first analysis instead.
pub fn build_service(config: &AnalysisConfig, dry_run: bool) -> Arc<dyn GenerativeService> {
    if dry_run {
        info!("dry run: answering with a canned analysis");
        return Arc::new(MockGenerativeService::new());
    }
    match GeminiClient::new(GeminiConfig::from_analysis_config(config)) {
        Ok(client) => Arc::new(client),
        Err(err) => {
            warn!(error = %err, "generative service unavailable");
            Arc::new(UnconfiguredService::new(err))
        }
    }
}

/// Load configuration, set up logging and run the selected command.
pub async fn run(cli: Cli) -> Result<()> {
    let config = ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let _logger = LoggerImpl::init(&config.logging).context("Failed to initialize logging")?;

    let client = || AnalysisClient::new(build_service(&config.analysis, cli.dry_run));

    match cli.command() {
        Commands::Interactive => commands::interactive::execute(client(), cli.json).await,
        Commands::Analyze(args) => commands::analyze::execute(args, client(), cli.json).await,
        Commands::Prompt(args) => commands::prompt::execute(args, cli.json).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_service_without_key_is_unconfigured() {
        let service = build_service(&AnalysisConfig::default(), false);
        assert_eq!(service.name(), "unconfigured");
    }

    #[test]
    fn test_build_service_dry_run() {
        assert_eq!(build_service(&AnalysisConfig::default(), true).name(), "mock");
    }

    #[test]
    fn test_build_service_with_key() {
        let config = AnalysisConfig {
            api_key: Some("AIzaTestKey".to_string()),
            ..Default::default()
        };
        assert_eq!(build_service(&config, false).name(), "gemini");
    }
}
