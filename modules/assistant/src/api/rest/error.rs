//! HTTP error mapping to RFC-9457 Problem Details

use crate::contract::AssistantError;
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// RFC-9457 Problem Details for HTTP API errors
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Problem {
    #[serde(rename = "type")]
    pub type_uri: String,
    pub title: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, Json(self)).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/problem+json"),
        );
        response
    }
}

impl From<AssistantError> for Problem {
    fn from(error: AssistantError) -> Self {
        match error {
            AssistantError::Validation { message } => Problem {
                type_uri: "https://httpstatuses.io/400".to_string(),
                title: "Validation Error".to_string(),
                status: StatusCode::BAD_REQUEST.as_u16(),
                detail: Some(message),
            },
        }
    }
}
