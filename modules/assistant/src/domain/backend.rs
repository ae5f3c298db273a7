//! Outbound port to the language model

use crate::contract::ChatMessage;
use async_trait::async_trait;

/// Generates the next assistant turn for a conversation
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// `conversation` ends with the user's new message
    async fn generate(
        &self,
        system_instruction: &str,
        conversation: &[ChatMessage],
    ) -> anyhow::Result<String>;
}
