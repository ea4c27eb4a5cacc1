use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use uuid::Uuid;

use crate::application::services::gateway::{
    GatewayError, GatewayReceipt, MessageGateway, OutboundMessage,
};

#[derive(Debug, Clone, Copy)]
pub struct SimulatedGatewayConfig {
    /// Probability in `0.0..=1.0` that a send is rejected.
    pub failure_rate: f64,
    pub latency: Duration,
}

/// Stand-in gateway for mock mode. Nothing leaves the process.
pub struct SimulatedGateway {
    config: SimulatedGatewayConfig,
}

impl SimulatedGateway {
    pub fn new(config: SimulatedGatewayConfig) -> Arc<dyn MessageGateway> {
        Arc::new(Self {
            config: SimulatedGatewayConfig {
                failure_rate: config.failure_rate.clamp(0.0, 1.0),
                ..config
            },
        }) as Arc<dyn MessageGateway>
    }
}

#[async_trait]
impl MessageGateway for SimulatedGateway {
    fn name(&self) -> &'static str {
        "simulated"
    }

    async fn send(&self, message: &OutboundMessage) -> Result<GatewayReceipt, GatewayError> {
        let fails = rand::rng().random_bool(self.config.failure_rate);

        if !self.config.latency.is_zero() {
            tokio::time::sleep(self.config.latency).await;
        }

        tracing::debug!(
            recipient = %message.recipient,
            country = %message.country,
            fails,
            "simulated send"
        );
        if fails {
            return Err(GatewayError::Rejected(
                "simulated delivery failure".to_string(),
            ));
        }

        Ok(GatewayReceipt {
            message_id: format!("mock-{}", Uuid::new_v4()),
        })
    }
}
