//! HTTP request handlers - thin layer that delegates to domain service

use super::{
    dto::{ChatRequest, ChatResponse},
    error::Problem,
};
use crate::contract::ChatMessage;
use crate::domain::Service;
use axum::{Extension, Json};
use std::sync::Arc;

/// Answer a technician's question
pub async fn chat(
    Extension(service): Extension<Arc<Service>>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, Problem> {
    let history = req
        .history
        .into_iter()
        .map(ChatMessage::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    let reply = service.chat(&req.message, history).await?;
    Ok(Json(ChatResponse { reply }))
}
