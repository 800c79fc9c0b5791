use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use url::Url;

use common::sharing::SecureEnvelope;

use crate::app::EnvelopeSender;

use super::error::ClientError;

/// Per-call deadline for relay requests.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Client for the routing relay that carries envelopes between nodes.
///
/// The relay accepts envelopes at `POST {base}/send` and answers
/// `202 Accepted` once the message is queued for delivery.
#[derive(Debug, Clone)]
pub struct RoutingServiceClient {
    base: Url,
    client: Client,
}

impl RoutingServiceClient {
    pub fn new(base: &Url) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            base: base.clone(),
            client,
        })
    }
}

#[async_trait]
impl EnvelopeSender for RoutingServiceClient {
    async fn send(&self, envelope: &SecureEnvelope) -> Result<(), ClientError> {
        let url = self.base.join("send")?;
        let response = self.client.post(url).json(envelope).send().await?;

        if response.status() != StatusCode::ACCEPTED {
            return Err(ClientError::HttpStatus(
                response.status(),
                response.text().await?,
            ));
        }

        tracing::info!(
            sender_id = %envelope.sender_id,
            recipient_id = %envelope.recipient_id,
            "dispatched envelope to routing service"
        );
        Ok(())
    }
}
