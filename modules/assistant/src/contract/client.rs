//! Native client trait for inter-module communication

use super::{error::AssistantError, model::ChatMessage};
use async_trait::async_trait;

/// Assistant API for inter-module communication
#[async_trait]
pub trait AssistantApi: Send + Sync {
    /// Reply to `message` given the earlier turns, oldest first
    async fn chat(&self, message: &str, history: Vec<ChatMessage>) -> Result<String, AssistantError>;
}
