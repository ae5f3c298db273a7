//! HTTP error mapping for the Google routes
//!
//! These routes answer with a flat `{error, details}` body instead of
//! Problem Details; browser screens read both fields directly.

use crate::contract::GoogleError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error body of `/api/google-service`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Short summary
    pub error: String,
    /// Human-readable explanation
    pub details: String,
}

/// Error response carrying its status code
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<GoogleError> for ApiError {
    fn from(error: GoogleError) -> Self {
        map_domain_error(error)
    }
}

/// Map domain errors to HTTP responses
pub fn map_domain_error(error: GoogleError) -> ApiError {
    let (status, summary) = match &error {
        GoogleError::MissingField { .. } => (StatusCode::BAD_REQUEST, "Missing required fields"),
        GoogleError::UnknownAction { .. } => (StatusCode::BAD_REQUEST, "Invalid action"),
        GoogleError::Validation { .. } => (StatusCode::BAD_REQUEST, "Invalid request"),
        GoogleError::Credentials { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, "Google authentication failed")
        }
        GoogleError::Upstream { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, "Google API request failed")
        }
    };

    ApiError {
        status,
        body: ErrorBody {
            error: summary.to_string(),
            details: error.to_string(),
        },
    }
}
