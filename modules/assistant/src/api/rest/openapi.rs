//! OpenAPI components for the assistant

use super::dto::{ChatRequest, ChatResponse, ChatTurnDto};
use super::error::Problem;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(schemas(Problem, ChatTurnDto, ChatRequest, ChatResponse)),
    tags((name = "assistant", description = "Technical assistant chat"))
)]
pub struct AssistantDoc;
