use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::services::gateway::{
    GatewayError, GatewayReceipt, MessageGateway, OutboundMessage,
};

#[derive(Clone)]
pub struct GreenApiConfig {
    pub base_url: String,
    pub id_instance: String,
    pub api_token: String,
}

/// WhatsApp delivery through the Green-API `sendMessage` method.
pub struct GreenApiClient {
    http: Client,
    config: GreenApiConfig,
}

impl GreenApiClient {
    pub fn new(config: GreenApiConfig) -> anyhow::Result<Arc<dyn MessageGateway>> {
        let http = Client::builder()
            .user_agent("whatsblaster/green-api")
            .build()
            .context("failed to build green-api client")?;

        Ok(Arc::new(Self { http, config }) as Arc<dyn MessageGateway>)
    }

    fn build_url(&self, method: &str) -> String {
        format!(
            "{}/waInstance{}/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.id_instance,
            method,
            self.config.api_token
        )
    }
}

/// `+1 415 555 2671` becomes `14155552671@c.us`.
fn chat_id(recipient: &str) -> String {
    let digits: String = recipient.chars().filter(char::is_ascii_digit).collect();
    format!("{digits}@c.us")
}

#[async_trait]
impl MessageGateway for GreenApiClient {
    fn name(&self) -> &'static str {
        "green-api"
    }

    async fn send(&self, message: &OutboundMessage) -> Result<GatewayReceipt, GatewayError> {
        let payload = SendMessagePayload {
            chat_id: chat_id(&message.recipient),
            message: &message.body,
        };

        let response = self
            .http
            .post(self.build_url("sendMessage"))
            .json(&payload)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    GatewayError::Network("request timed out".to_string())
                } else {
                    GatewayError::Network(err.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GreenApiErrorBody>(&body)
                .ok()
                .and_then(|b| b.message.or(b.error))
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());
            return Err(GatewayError::from_status(status.as_u16(), message));
        }

        let payload: SendMessageResponse = response
            .json()
            .await
            .map_err(|err| GatewayError::InvalidResponse(err.to_string()))?;

        match payload.id_message {
            Some(id) if !id.is_empty() => Ok(GatewayReceipt { message_id: id }),
            _ => Err(GatewayError::Rejected(
                "green-api did not return a message id".to_string(),
            )),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendMessagePayload<'a> {
    chat_id: String,
    message: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendMessageResponse {
    id_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GreenApiErrorBody {
    message: Option<String>,
    error: Option<String>,
}
