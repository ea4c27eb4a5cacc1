use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttemptResult {
    Success {
        message_id: String,
        timestamp: DateTime<Utc>,
    },
    Failure {
        error: String,
        timestamp: DateTime<Utc>,
    },
}

/// Result of one send attempt. `attempt` is 1-based and follows send order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptOutcome {
    pub attempt: u32,
    pub result: AttemptResult,
}

impl AttemptOutcome {
    pub fn success(attempt: u32, message_id: impl Into<String>) -> Self {
        Self {
            attempt,
            result: AttemptResult::Success {
                message_id: message_id.into(),
                timestamp: Utc::now(),
            },
        }
    }

    pub fn failure(attempt: u32, error: impl Into<String>) -> Self {
        Self {
            attempt,
            result: AttemptResult::Failure {
                error: error.into(),
                timestamp: Utc::now(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub current: u32,
    pub total: u32,
}
