//! HTTP request handlers - thin layer that delegates to domain service

use super::{dto::*, error::ApiError};
use crate::contract::GoogleError;
use crate::domain::Service;
use axum::{
    body::Bytes,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

type Svc = Extension<Arc<Service>>;

/// Single entry point for Drive and Calendar, dispatched on `action`
pub async fn google_service(Extension(service): Svc, body: Bytes) -> Result<Response, ApiError> {
    let payload: Value = serde_json::from_slice(&body)
        .map_err(|e| GoogleError::validation(format!("body is not valid JSON: {}", e)))?;
    let action = payload
        .get("action")
        .and_then(Value::as_str)
        .filter(|a| !a.trim().is_empty())
        .ok_or_else(|| GoogleError::missing("action"))?
        .to_string();

    tracing::debug!(action = %action, "Google service request");

    let response = match action.as_str() {
        "upload_to_drive" => {
            let req: UploadToDriveRequest = parse(payload)?;
            let file = service.upload_to_drive(req.try_into()?).await?;
            Json(UploadToDriveResponse {
                success: true,
                file_id: file.id,
                web_view_link: file.web_view_link,
            })
            .into_response()
        }
        "create_calendar_event" => {
            let req: CreateCalendarEventRequest = parse(payload)?;
            let event = service.create_calendar_event(req.try_into()?).await?;
            Json(CalendarEventCreatedResponse {
                success: true,
                event_id: event.id,
                html_link: event.html_link,
            })
            .into_response()
        }
        "list_calendar_events" => {
            let req: ListCalendarEventsRequest = parse(payload)?;
            let events = service.list_calendar_events(req.into()).await?;
            Json(CalendarEventsResponse {
                success: true,
                events: events.into_iter().map(Into::into).collect(),
            })
            .into_response()
        }
        "delete_calendar_event" => {
            let req: DeleteCalendarEventRequest = parse(payload)?;
            let event_id = req.event_id.ok_or_else(|| GoogleError::missing("eventId"))?;
            service
                .delete_calendar_event(req.calendar_id, &event_id)
                .await?;
            Json(SuccessResponse { success: true }).into_response()
        }
        other => {
            return Err(GoogleError::UnknownAction {
                action: other.to_string(),
            }
            .into())
        }
    };

    Ok(response)
}

/// Credential diagnostics: 200 when a token was obtained, 500 otherwise
pub async fn google_test(Extension(service): Svc) -> impl IntoResponse {
    let report = service.check_credentials().await;
    let status = if report.token_acquired {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (status, Json(CredentialReportDto::from(report)))
}

fn parse<T: DeserializeOwned>(payload: Value) -> Result<T, GoogleError> {
    serde_json::from_value(payload).map_err(|e| GoogleError::validation(e.to_string()))
}
