//! Data Transfer Objects for the Google REST API
//!
//! Request fields are all optional so that a missing field surfaces as a
//! `{error, details}` 400 naming it rather than a generic body rejection.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ===== Requests =====

/// `upload_to_drive` payload
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadToDriveRequest {
    pub file_name: Option<String>,
    /// Base64 file content; a `data:<mime>;base64,` prefix is accepted
    pub content: Option<String>,
    pub mime_type: Option<String>,
    pub folder_id: Option<String>,
}

/// Start or end of an event: a bare RFC 3339 string or an object
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum EventTimeDto {
    Timestamp(String),
    Detailed(EventTimeObject),
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventTimeObject {
    pub date_time: String,
    pub time_zone: Option<String>,
}

/// `create_calendar_event` payload
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCalendarEventRequest {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub start: Option<EventTimeDto>,
    pub end: Option<EventTimeDto>,
    pub calendar_id: Option<String>,
    /// Applied to bare timestamps in `start`/`end`
    pub time_zone: Option<String>,
    pub attendees: Option<Vec<String>>,
}

/// `list_calendar_events` payload
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListCalendarEventsRequest {
    pub calendar_id: Option<String>,
    pub time_min: Option<String>,
    pub max_results: Option<u32>,
}

/// `delete_calendar_event` payload
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCalendarEventRequest {
    pub event_id: Option<String>,
    pub calendar_id: Option<String>,
}

// ===== Responses =====

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadToDriveResponse {
    pub success: bool,
    pub file_id: String,
    pub web_view_link: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventCreatedResponse {
    pub success: bool,
    pub event_id: String,
    pub html_link: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventDto {
    pub id: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub html_link: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CalendarEventsResponse {
    pub success: bool,
    pub events: Vec<CalendarEventDto>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

/// `/api/google-test` report
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CredentialReportDto {
    pub success: bool,
    pub project_id: Option<String>,
    pub service_account: Option<String>,
    pub provider_configured: bool,
    pub oidc_token_present: bool,
    pub token_acquired: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
