use std::sync::Arc;
use std::time::Duration;

use crate::{
    application::services::gateway::{GatewayError, MessageGateway, OutboundMessage},
    domain::models::{AttemptOutcome, SendRequest},
};

/// Performs exactly one gateway call per attempt and folds every failure
/// into the returned outcome.
pub struct AttemptExecutor {
    gateway: Arc<dyn MessageGateway>,
    timeout: Duration,
}

impl AttemptExecutor {
    pub fn new(gateway: Arc<dyn MessageGateway>, timeout: Duration) -> Self {
        Self { gateway, timeout }
    }

    pub fn gateway_name(&self) -> &'static str {
        self.gateway.name()
    }

    #[tracing::instrument(skip(self, request), fields(gateway = self.gateway.name()))]
    pub async fn execute(&self, attempt: u32, request: &SendRequest) -> AttemptOutcome {
        let message = OutboundMessage {
            recipient: request.recipient().to_string(),
            country: request.country().to_string(),
            body: request.message().to_string(),
        };

        let result = match tokio::time::timeout(self.timeout, self.gateway.send(&message)).await {
            Ok(result) => result,
            Err(_) => Err(GatewayError::Timeout(self.timeout)),
        };

        match result {
            Ok(receipt) => {
                tracing::debug!(message_id = %receipt.message_id, "message accepted");
                AttemptOutcome::success(attempt, receipt.message_id)
            }
            Err(err) => {
                tracing::warn!(error = %err, "message send failed");
                AttemptOutcome::failure(attempt, err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::{
        application::services::gateway::GatewayReceipt,
        domain::models::{AttemptResult, SendRequestDraft},
    };

    struct FixedGateway(Result<&'static str, u16>);

    #[async_trait]
    impl MessageGateway for FixedGateway {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn send(&self, _message: &OutboundMessage) -> Result<GatewayReceipt, GatewayError> {
            match self.0 {
                Ok(id) => Ok(GatewayReceipt {
                    message_id: id.to_string(),
                }),
                Err(status) => Err(GatewayError::from_status(status, "rejected".to_string())),
            }
        }
    }

    struct StalledGateway;

    #[async_trait]
    impl MessageGateway for StalledGateway {
        fn name(&self) -> &'static str {
            "stalled"
        }

        async fn send(&self, _message: &OutboundMessage) -> Result<GatewayReceipt, GatewayError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Err(GatewayError::Network("unreachable".to_string()))
        }
    }

    fn request() -> SendRequest {
        SendRequestDraft {
            recipient: Some("+14155552671".to_string()),
            country: Some("US".to_string()),
            message: Some("hello".to_string()),
            repeat_count: Some(1),
            delay_ms: Some(100),
        }
        .validate()
        .unwrap()
    }

    #[tokio::test]
    async fn success_carries_gateway_message_id() {
        let executor = AttemptExecutor::new(
            Arc::new(FixedGateway(Ok("BAE5F4886AD0"))),
            Duration::from_secs(5),
        );

        let outcome = executor.execute(3, &request()).await;

        assert_eq!(outcome.attempt, 3);
        assert!(matches!(
            outcome.result,
            AttemptResult::Success { ref message_id, .. } if message_id == "BAE5F4886AD0"
        ));
    }

    #[tokio::test]
    async fn gateway_error_becomes_failure_outcome() {
        let executor =
            AttemptExecutor::new(Arc::new(FixedGateway(Err(503))), Duration::from_secs(5));

        let outcome = executor.execute(1, &request()).await;

        assert!(matches!(
            outcome.result,
            AttemptResult::Failure { ref error, .. }
                if error == "Service unavailable. Please try again later."
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_gateway_times_out_as_failure() {
        let executor = AttemptExecutor::new(Arc::new(StalledGateway), Duration::from_secs(30));

        let outcome = executor.execute(1, &request()).await;

        assert!(matches!(
            outcome.result,
            AttemptResult::Failure { ref error, .. } if error == "gateway request timed out after 30s"
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn sub_second_timeout_keeps_its_precision() {
        let executor = AttemptExecutor::new(Arc::new(StalledGateway), Duration::from_millis(250));

        let outcome = executor.execute(1, &request()).await;

        assert!(matches!(
            outcome.result,
            AttemptResult::Failure { ref error, .. } if error == "gateway request timed out after 250ms"
        ));
    }
}
