//! Implementation of the `ikigai analyze` command.

use anyhow::{bail, Result};
use serde::Serialize;

use crate::cli::commands::load_input;
use crate::cli::output::{output, CommandOutput};
use crate::cli::progress::create_spinner;
use crate::cli::render;
use crate::cli::types::InputArgs;
use crate::domain::models::{AnalysisResult, Intent};
use crate::services::{AnalysisClient, Completion, FlowController};

#[derive(Debug, Serialize)]
pub struct AnalyzeOutput {
    #[serde(flatten)]
    pub result: AnalysisResult,
}

impl CommandOutput for AnalyzeOutput {
    fn to_human(&self) -> String {
        render::result_screen(&self.result)
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.result).unwrap_or_default()
    }
}

/// Run one analysis through the flow controller.
///
/// Validation and analysis failures are returned as errors so the process
/// exits non-zero.
pub async fn analyze_input(
    args: &InputArgs,
    client: &AnalysisClient,
    show_progress: bool,
) -> Result<AnalysisResult> {
    let input = load_input(&args.input).await?;
    let mut flow = FlowController::with_input(input);
    flow.dispatch(Intent::Start)?;

    let spinner = show_progress.then(|| create_spinner("Analyzing your answers..."));
    let completion = flow.run_analysis(client).await?;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    match (completion, flow.result()) {
        (Some(Completion::Stored), Some(result)) => Ok(result.clone()),
        _ => bail!(
            "{}",
            flow.error_message().unwrap_or("The analysis did not complete.")
        ),
    }
}

pub async fn execute(args: InputArgs, client: AnalysisClient, json_mode: bool) -> Result<()> {
    let result = analyze_input(&args, &client, !json_mode).await?;
    output(&AnalyzeOutput { result }, json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockGenerativeService, MockResponse};
    use crate::domain::errors::AnalysisError;
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    const COMPLETE: &str = "love: [music]\ngoodAt: [teaching]\npaid: [tutoring]\nneeds: [education]\nvalues: [freedom]\n";

    fn args(dir: &TempDir, body: &str) -> InputArgs {
        let path = dir.path().join("input.yaml");
        fs::write(&path, body).unwrap();
        InputArgs { input: path }
    }

    #[tokio::test]
    async fn test_analyze_input_success() {
        let dir = TempDir::new().unwrap();
        let client = AnalysisClient::new(Arc::new(MockGenerativeService::new()));
        let result = analyze_input(&args(&dir, COMPLETE), &client, false).await.unwrap();
        assert_eq!(result.viability.score, 70);
    }

    #[tokio::test]
    async fn test_analyze_input_validation_failure() {
        let dir = TempDir::new().unwrap();
        let mock = Arc::new(MockGenerativeService::new());
        let client = AnalysisClient::new(mock.clone());
        let err = analyze_input(&args(&dir, "love: [music]\n"), &client, false)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("What you are good at"));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_analyze_input_configuration_failure() {
        let dir = TempDir::new().unwrap();
        let mock = Arc::new(MockGenerativeService::new());
        mock.push(MockResponse::error(AnalysisError::Configuration("no key".into())));
        let client = AnalysisClient::new(mock);
        let err = analyze_input(&args(&dir, COMPLETE), &client, false)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }
}
