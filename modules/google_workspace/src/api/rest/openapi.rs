//! OpenAPI components for the Google routes

use super::dto::*;
use super::error::ErrorBody;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(schemas(
        ErrorBody,
        UploadToDriveRequest,
        EventTimeDto,
        EventTimeObject,
        CreateCalendarEventRequest,
        ListCalendarEventsRequest,
        DeleteCalendarEventRequest,
        UploadToDriveResponse,
        CalendarEventCreatedResponse,
        CalendarEventDto,
        CalendarEventsResponse,
        SuccessResponse,
        CredentialReportDto,
    )),
    tags((name = "google-workspace", description = "Drive uploads and Calendar events"))
)]
pub struct GoogleWorkspaceDoc;
