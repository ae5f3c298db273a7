//! Domain service for the technical assistant

use super::backend::ChatBackend;
use super::prompt::{FALLBACK_REPLY, SYSTEM_INSTRUCTION};
use crate::config::Config;
use crate::contract::{AssistantError, ChatMessage, ChatRole};
use std::sync::Arc;

/// Assistant domain service
pub struct Service {
    backend: Option<Arc<dyn ChatBackend>>,
    config: Config,
}

impl Service {
    /// `backend` is `None` when no API key is configured
    pub fn new(backend: Option<Arc<dyn ChatBackend>>, config: Config) -> Self {
        Self { backend, config }
    }

    /// Reply to `message`; any backend failure yields [`FALLBACK_REPLY`]
    pub async fn chat(
        &self,
        message: &str,
        history: Vec<ChatMessage>,
    ) -> Result<String, AssistantError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(AssistantError::validation("message must not be empty"));
        }
        if message.chars().count() > self.config.max_message_chars {
            return Err(AssistantError::validation(format!(
                "message exceeds {} characters",
                self.config.max_message_chars
            )));
        }

        let Some(backend) = &self.backend else {
            tracing::warn!("Assistant API key is not configured, returning fallback reply");
            return Ok(FALLBACK_REPLY.to_string());
        };

        let conversation = self.conversation(message, history);
        match backend.generate(SYSTEM_INSTRUCTION, &conversation).await {
            Ok(reply) if !reply.trim().is_empty() => Ok(reply.trim().to_string()),
            Ok(_) => {
                tracing::warn!("Assistant backend returned an empty reply");
                Ok(FALLBACK_REPLY.to_string())
            }
            Err(e) => {
                tracing::error!(error = %format!("{:#}", e), "Assistant backend call failed");
                Ok(FALLBACK_REPLY.to_string())
            }
        }
    }

    /// Recent non-blank history plus the new message; the model expects the
    /// first turn to come from the user
    fn conversation(&self, message: &str, history: Vec<ChatMessage>) -> Vec<ChatMessage> {
        let mut turns: Vec<ChatMessage> = history
            .into_iter()
            .filter(|m| !m.text.trim().is_empty())
            .collect();
        if turns.len() > self.config.max_history {
            turns.drain(..turns.len() - self.config.max_history);
        }
        while turns.first().is_some_and(|m| m.role != ChatRole::User) {
            turns.remove(0);
        }

        turns.push(ChatMessage::user(message));
        turns
    }
}
