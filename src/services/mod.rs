//! Service layer: prompt construction, response contract and flow control.

pub mod analysis_client;
pub mod flow_controller;
pub mod prompt_builder;
pub mod response_schema;

pub use analysis_client::{parse_analysis, AnalysisClient};
pub use flow_controller::{AnalyzeOutcome, Completion, FlowController};
pub use prompt_builder::build_prompt;
pub use response_schema::analysis_response_schema;
