use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Authenticated operator, handed explicitly to every dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorSession {
    pub operator: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
