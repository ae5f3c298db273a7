//! Native client implementation - wraps domain service for in-process calls

use crate::contract::{
    CalendarEvent, CredentialReport, DriveFile, DriveUpload, EventQuery, GoogleError,
    GoogleWorkspaceApi, NewCalendarEvent,
};
use crate::domain::Service;
use async_trait::async_trait;
use std::sync::Arc;

#[derive(Clone)]
pub struct NativeClient {
    service: Arc<Service>,
}

impl NativeClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl GoogleWorkspaceApi for NativeClient {
    async fn upload_to_drive(&self, upload: DriveUpload) -> Result<DriveFile, GoogleError> {
        self.service.upload_to_drive(upload).await
    }

    async fn create_calendar_event(
        &self,
        event: NewCalendarEvent,
    ) -> Result<CalendarEvent, GoogleError> {
        self.service.create_calendar_event(event).await
    }

    async fn list_calendar_events(
        &self,
        query: EventQuery,
    ) -> Result<Vec<CalendarEvent>, GoogleError> {
        self.service.list_calendar_events(query).await
    }

    async fn delete_calendar_event(
        &self,
        calendar_id: Option<String>,
        event_id: &str,
    ) -> Result<(), GoogleError> {
        self.service.delete_calendar_event(calendar_id, event_id).await
    }

    async fn check_credentials(&self) -> CredentialReport {
        self.service.check_credentials().await
    }
}
