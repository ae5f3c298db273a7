//! Native client trait for inter-module communication

use super::{
    error::GoogleError,
    model::{CalendarEvent, CredentialReport, DriveFile, DriveUpload, EventQuery, NewCalendarEvent},
};
use async_trait::async_trait;

/// Google Workspace API for inter-module communication
#[async_trait]
pub trait GoogleWorkspaceApi: Send + Sync {
    async fn upload_to_drive(&self, upload: DriveUpload) -> Result<DriveFile, GoogleError>;

    async fn create_calendar_event(
        &self,
        event: NewCalendarEvent,
    ) -> Result<CalendarEvent, GoogleError>;

    async fn list_calendar_events(
        &self,
        query: EventQuery,
    ) -> Result<Vec<CalendarEvent>, GoogleError>;

    async fn delete_calendar_event(
        &self,
        calendar_id: Option<String>,
        event_id: &str,
    ) -> Result<(), GoogleError>;

    /// Resolve credentials end to end and report what was found
    async fn check_credentials(&self) -> CredentialReport;
}
