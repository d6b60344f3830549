pub mod analysis;
pub mod config;
pub mod flow;
pub mod input;

pub use analysis::{
    AnalysisResult, MinimalAnalysis, Risk, RiskCategory, Timeline, TimelinePhase, Viability,
    ViabilityBreakdown,
};
pub use config::{AnalysisConfig, Config, LoggingConfig};
pub use flow::{AnalysisTicket, FlowState, Intent, PendingAnalysis};
pub use input::{Bucket, UserInput, ENERGY_RANGE, MAX_VALUES};
