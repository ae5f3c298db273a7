//! Outbound ports implemented by the infrastructure layer

use crate::contract::{CalendarEvent, DriveFile, DriveUpload, NewCalendarEvent};
use async_trait::async_trait;

/// Produces a short-lived bearer token with Drive and Calendar scopes
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn access_token(&self) -> anyhow::Result<String>;
}

/// Thin adapter over the Drive and Calendar REST APIs
///
/// Every call takes the bearer token explicitly; tokens are never cached.
#[async_trait]
pub trait GoogleApis: Send + Sync {
    async fn upload_file(&self, token: &str, upload: &DriveUpload) -> anyhow::Result<DriveFile>;

    async fn insert_event(
        &self,
        token: &str,
        calendar_id: &str,
        event: &NewCalendarEvent,
    ) -> anyhow::Result<CalendarEvent>;

    async fn list_events(
        &self,
        token: &str,
        calendar_id: &str,
        time_min: &str,
        max_results: u32,
    ) -> anyhow::Result<Vec<CalendarEvent>>;

    async fn delete_event(&self, token: &str, calendar_id: &str, event_id: &str)
        -> anyhow::Result<()>;
}
