//! Data Transfer Objects for the assistant REST API

use crate::contract::{AssistantError, ChatMessage, ChatRole};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Earlier turn of the conversation
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ChatTurnDto {
    /// `user`, `assistant` or `model`
    pub role: String,
    /// Turn text; `content` is accepted as an alias
    #[serde(alias = "content")]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatTurnDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    pub reply: String,
}

impl TryFrom<ChatTurnDto> for ChatMessage {
    type Error = AssistantError;

    fn try_from(dto: ChatTurnDto) -> Result<Self, Self::Error> {
        let role: ChatRole = dto.role.parse().map_err(AssistantError::validation)?;
        Ok(ChatMessage {
            role,
            text: dto.text,
        })
    }
}
