use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Candidate send-request as submitted by the operator. Every field may be
/// missing; numbers are signed so negative input survives until validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SendRequestDraft {
    pub recipient: Option<String>,
    pub country: Option<String>,
    pub message: Option<String>,
    pub repeat_count: Option<i64>,
    pub delay_ms: Option<i64>,
}

/// A send-request that passed validation. Only the validator builds these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendRequest {
    recipient: String,
    country: String,
    message: String,
    repeat_count: u32,
    delay_ms: u64,
}

impl SendRequest {
    pub(in crate::domain) fn from_validated(
        recipient: String,
        country: String,
        message: String,
        repeat_count: u32,
        delay_ms: u64,
    ) -> Self {
        Self {
            recipient,
            country,
            message,
            repeat_count,
            delay_ms,
        }
    }

    /// Recipient with whitespace stripped, e.g. `+14155552671`.
    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn repeat_count(&self) -> u32 {
        self.repeat_count
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Lower bound of the wall time a run needs, ignoring gateway latency.
    pub fn estimated_duration(&self) -> Duration {
        self.delay() * self.repeat_count.saturating_sub(1)
    }
}
