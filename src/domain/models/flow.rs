//! Flow state machine types.
//!
//! ```text
//! Intro ──start──▶ Input ──analyze (valid)──▶ [loading] ──ok──▶ Result
//!   ▲                │  ▲                        │  │              │
//!   └──────back──────┘  └────────err─────────────┘  │              │
//!   ▲                   ▲                           │              │
//!   └──────back─────────┼───────────────────────────┘              │
//!                       └──────────────reset───────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::domain::models::input::{Bucket, UserInput};

/// Screen the user is currently on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowState {
    #[default]
    Intro,
    Input,
    Result,
}

impl FlowState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Intro => "intro",
            Self::Input => "input",
            Self::Result => "result",
        }
    }
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Start,
    Back,
    Analyze,
    Reset,
    AddItem { bucket: Bucket, text: String },
    RemoveItem { bucket: Bucket, index: usize },
    AddValue(String),
    RemoveValue(usize),
    AddConstraint(String),
    RemoveConstraint(usize),
    SetEnergy(u8),
    DismissError,
}

impl Intent {
    /// Short verb phrase used in logs and error messages.
    pub fn describe(&self) -> String {
        match self {
            Self::Start => "start".to_string(),
            Self::Back => "go back".to_string(),
            Self::Analyze => "analyze".to_string(),
            Self::Reset => "reset".to_string(),
            Self::AddItem { bucket, .. } => format!("add an item to {bucket}"),
            Self::RemoveItem { bucket, .. } => format!("remove an item from {bucket}"),
            Self::AddValue(_) => "add a value".to_string(),
            Self::RemoveValue(_) => "remove a value".to_string(),
            Self::AddConstraint(_) => "add a constraint".to_string(),
            Self::RemoveConstraint(_) => "remove a constraint".to_string(),
            Self::SetEnergy(_) => "set the energy level".to_string(),
            Self::DismissError => "dismiss the error".to_string(),
        }
    }

    /// Whether the intent edits [`UserInput`].
    pub const fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::AddItem { .. }
                | Self::RemoveItem { .. }
                | Self::AddValue(_)
                | Self::RemoveValue(_)
                | Self::AddConstraint(_)
                | Self::RemoveConstraint(_)
                | Self::SetEnergy(_)
        )
    }
}

/// Identifies the single in-flight analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnalysisTicket(Uuid);

impl AnalysisTicket {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub const fn id(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for AnalysisTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An analysis the controller has dispatched and is waiting for.
#[derive(Debug, Clone)]
pub struct PendingAnalysis {
    pub ticket: AnalysisTicket,
    /// Input as it was when the request was issued.
    pub input: UserInput,
}
