// src/presentation/http/state.rs
use crate::application::{ports::webhook::WritingGateway, services::ApplicationServices};
use std::sync::Arc;

#[derive(Clone)]
pub struct HttpState {
    pub services: Arc<ApplicationServices>,
    pub writing_gateway: Arc<dyn WritingGateway>,
    /// Shared secret expected in the `X-Webhook-Secret` header of the
    /// write callback.
    pub webhook_secret: Arc<str>,
}
