use poem_openapi::Enum;

use crate::domain::models::{DispatchVerdict, RunState};

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum DispatchVerdictKind {
    #[oai(rename = "total_success")]
    TotalSuccess,
    #[oai(rename = "partial_success")]
    PartialSuccess,
    #[oai(rename = "total_failure")]
    TotalFailure,
    #[oai(rename = "nothing_attempted")]
    NothingAttempted,
}

impl From<DispatchVerdict> for DispatchVerdictKind {
    fn from(value: DispatchVerdict) -> Self {
        match value {
            DispatchVerdict::TotalSuccess => DispatchVerdictKind::TotalSuccess,
            DispatchVerdict::PartialSuccess => DispatchVerdictKind::PartialSuccess,
            DispatchVerdict::TotalFailure => DispatchVerdictKind::TotalFailure,
            DispatchVerdict::NothingAttempted => DispatchVerdictKind::NothingAttempted,
        }
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum RunStateKind {
    #[oai(rename = "idle")]
    Idle,
    #[oai(rename = "running")]
    Running,
    #[oai(rename = "completed")]
    Completed,
    #[oai(rename = "cancelled")]
    Cancelled,
}

impl From<RunState> for RunStateKind {
    fn from(value: RunState) -> Self {
        match value {
            RunState::Idle => RunStateKind::Idle,
            RunState::Running => RunStateKind::Running,
            RunState::Completed => RunStateKind::Completed,
            RunState::Cancelled => RunStateKind::Cancelled,
        }
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum StreamEventKind {
    #[oai(rename = "progress")]
    Progress,
    #[oai(rename = "completed")]
    Completed,
}

impl StreamEventKind {
    /// Name sent in the SSE `event:` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamEventKind::Progress => "progress",
            StreamEventKind::Completed => "completed",
        }
    }
}
