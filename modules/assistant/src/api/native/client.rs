//! Native client implementation - wraps domain service for in-process calls

use crate::contract::{AssistantApi, AssistantError, ChatMessage};
use crate::domain::Service;
use async_trait::async_trait;
use std::sync::Arc;

#[derive(Clone)]
pub struct NativeClient {
    service: Arc<Service>,
}

impl NativeClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl AssistantApi for NativeClient {
    async fn chat(&self, message: &str, history: Vec<ChatMessage>) -> Result<String, AssistantError> {
        self.service.chat(message, history).await
    }
}
