//! Implementation of the `ikigai prompt` command.

use anyhow::Result;
use serde::Serialize;

use crate::cli::commands::load_input;
use crate::cli::output::{output, CommandOutput};
use crate::cli::types::InputArgs;
use crate::services::{analysis_response_schema, build_prompt};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptOutput {
    pub prompt: String,
    pub response_schema: serde_json::Value,
    /// Why the input would be refused by `analyze`, if it would
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_error: Option<String>,
}

impl CommandOutput for PromptOutput {
    fn to_human(&self) -> String {
        match &self.validation_error {
            Some(reason) => format!("{}\n\n(note: analyze would refuse this input: {reason})", self.prompt),
            None => self.prompt.clone(),
        }
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: InputArgs, json_mode: bool) -> Result<()> {
    let input = load_input(&args.input).await?;
    let result = PromptOutput {
        prompt: build_prompt(&input),
        response_schema: analysis_response_schema(),
        validation_error: input.validate().err().map(|e| e.to_string()),
    };
    output(&result, json_mode);
    Ok(())
}
