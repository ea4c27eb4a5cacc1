use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// One message handed to the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub recipient: String,
    pub country: String,
    pub body: String,
}

/// Gateway acknowledgment of an accepted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayReceipt {
    pub message_id: String,
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Network error. Please check your connection and try again. ({0})")]
    Network(String),
    #[error("gateway request timed out after {0:?}")]
    Timeout(Duration),
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Unauthorized. Please check your API credentials.")]
    Unauthorized,
    #[error("Forbidden. You do not have permission to perform this action.")]
    Forbidden,
    #[error("API endpoint not found. Please check the server configuration.")]
    NotFound,
    #[error("Too many requests. Please wait before trying again.")]
    RateLimited,
    #[error("Internal server error. Please try again later.")]
    Internal,
    #[error("Bad gateway. The server is temporarily unavailable.")]
    BadGateway,
    #[error("Service unavailable. Please try again later.")]
    Unavailable,
    #[error("Request failed with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("gateway rejected message: {0}")]
    Rejected(String),
    #[error("unexpected gateway response: {0}")]
    InvalidResponse(String),
}

impl GatewayError {
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            400 => GatewayError::BadRequest(message),
            401 => GatewayError::Unauthorized,
            403 => GatewayError::Forbidden,
            404 => GatewayError::NotFound,
            429 => GatewayError::RateLimited,
            500 => GatewayError::Internal,
            502 => GatewayError::BadGateway,
            503 => GatewayError::Unavailable,
            _ => GatewayError::Status { status, message },
        }
    }
}

/// The external "send one message" operation.
#[async_trait]
pub trait MessageGateway: Send + Sync {
    /// Short name used in logs, e.g. `green-api` or `simulated`.
    fn name(&self) -> &'static str;

    async fn send(&self, message: &OutboundMessage) -> Result<GatewayReceipt, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_statuses_to_operator_messages() {
        assert_eq!(
            GatewayError::from_status(429, String::new()).to_string(),
            "Too many requests. Please wait before trying again."
        );
        assert_eq!(
            GatewayError::from_status(400, "chatId is invalid".to_string()).to_string(),
            "Bad Request: chatId is invalid"
        );
        assert_eq!(
            GatewayError::from_status(418, "teapot".to_string()).to_string(),
            "Request failed with status 418: teapot"
        );
    }
}
