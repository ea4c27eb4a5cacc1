use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Dispatch already running for {0}")]
    Conflict(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
