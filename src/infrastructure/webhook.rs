// src/infrastructure/webhook.rs
use crate::application::{
    ApplicationResult,
    error::ApplicationError,
    ports::webhook::{WritingGateway, WritingRequest},
};
use async_trait::async_trait;
use std::time::Duration;

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Forwards article snapshots to the external writing automation (a
/// Make.com scenario). Delivery is single-shot; the scenario's own
/// scheduler re-triggers writing when a send is lost.
pub struct MakeWebhookClient {
    client: reqwest::Client,
    webhook_url: String,
}

impl MakeWebhookClient {
    pub fn new(webhook_url: impl Into<String>) -> ApplicationResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        Ok(Self {
            client,
            webhook_url: webhook_url.into(),
        })
    }
}

#[async_trait]
impl WritingGateway for MakeWebhookClient {
    async fn send_for_writing(&self, request: &WritingRequest) -> ApplicationResult<()> {
        tracing::info!(
            article_id = request.article_id,
            url = %self.webhook_url,
            "sending article to writing webhook"
        );

        let response = self
            .client
            .post(&self.webhook_url)
            .json(request)
            .send()
            .await
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

        let status = response.status();
        tracing::info!(
            article_id = request.article_id,
            status = status.as_u16(),
            "writing webhook response"
        );

        if !status.is_success() {
            return Err(ApplicationError::infrastructure(format!(
                "writing webhook returned HTTP {}",
                status.as_u16()
            )));
        }
        Ok(())
    }
}
