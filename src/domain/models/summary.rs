use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::outcome::{AttemptOutcome, AttemptResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessfulAttempt {
    pub attempt: u32,
    pub message_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedAttempt {
    pub attempt: u32,
    pub error: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DispatchVerdict {
    TotalSuccess,
    PartialSuccess,
    TotalFailure,
    /// Only reachable when a run is cancelled before its first attempt resolves.
    NothingAttempted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchSummary {
    pub total_attempts: u32,
    pub successful: u32,
    pub failed: u32,
    /// Percentage rounded to one decimal place.
    pub success_rate: f64,
    pub successes: Vec<SuccessfulAttempt>,
    pub failures: Vec<FailedAttempt>,
}

impl DispatchSummary {
    pub fn from_outcomes(outcomes: &[AttemptOutcome]) -> Self {
        let mut successes = Vec::new();
        let mut failures = Vec::new();

        for outcome in outcomes {
            match &outcome.result {
                AttemptResult::Success {
                    message_id,
                    timestamp,
                } => successes.push(SuccessfulAttempt {
                    attempt: outcome.attempt,
                    message_id: message_id.clone(),
                    timestamp: *timestamp,
                }),
                AttemptResult::Failure { error, timestamp } => failures.push(FailedAttempt {
                    attempt: outcome.attempt,
                    error: error.clone(),
                    timestamp: *timestamp,
                }),
            }
        }

        let total_attempts = outcomes.len() as u32;
        let successful = successes.len() as u32;

        Self {
            total_attempts,
            successful,
            failed: failures.len() as u32,
            success_rate: success_rate(successful, total_attempts),
            successes,
            failures,
        }
    }

    pub fn verdict(&self) -> DispatchVerdict {
        match (self.successful, self.total_attempts) {
            (_, 0) => DispatchVerdict::NothingAttempted,
            (0, _) => DispatchVerdict::TotalFailure,
            (s, t) if s == t => DispatchVerdict::TotalSuccess,
            _ => DispatchVerdict::PartialSuccess,
        }
    }
}

fn success_rate(successful: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (successful as f64 / total as f64 * 1000.0).round() / 10.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    Idle,
    Running,
    Completed,
    Cancelled,
}

/// Final result of one run, handed back to whoever started it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchReport {
    pub run_id: Uuid,
    pub planned_attempts: u32,
    /// Pause time the whole plan needs, ignoring gateway latency.
    pub estimated_duration: Duration,
    pub state: RunState,
    pub summary: DispatchSummary,
}

impl DispatchReport {
    pub fn results(&self) -> &[SuccessfulAttempt] {
        &self.summary.successes
    }

    pub fn errors(&self) -> &[FailedAttempt] {
        &self.summary.failures
    }

    pub fn is_cancelled(&self) -> bool {
        self.state == RunState::Cancelled
    }
}
