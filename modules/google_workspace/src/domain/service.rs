//! Domain service for Drive and Calendar operations

use super::ports::{GoogleApis, TokenSource};
use crate::config::Config;
use crate::contract::{
    CalendarEvent, CredentialReport, DriveFile, DriveUpload, EventQuery, EventTime, GoogleError,
    NewCalendarEvent,
};
use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use std::sync::Arc;

const DEFAULT_MAX_RESULTS: u32 = 10;
const MAX_RESULTS_LIMIT: u32 = 250;

/// Google Workspace domain service
pub struct Service {
    tokens: Arc<dyn TokenSource>,
    apis: Arc<dyn GoogleApis>,
    config: Config,
}

impl Service {
    pub fn new(tokens: Arc<dyn TokenSource>, apis: Arc<dyn GoogleApis>, config: Config) -> Self {
        Self {
            tokens,
            apis,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Store a file in Drive
    pub async fn upload_to_drive(&self, mut upload: DriveUpload) -> Result<DriveFile, GoogleError> {
        upload.file_name = required("fileName", &upload.file_name)?;
        if upload.content.is_empty() {
            return Err(GoogleError::missing("content"));
        }
        upload.folder_id = upload.folder_id.filter(|f| !f.trim().is_empty());

        let token = self.token().await?;
        let file = self
            .apis
            .upload_file(&token, &upload)
            .await
            .map_err(upstream)?;

        tracing::info!(
            file_id = %file.id,
            file_name = %upload.file_name,
            bytes = upload.content.len(),
            "Uploaded file to Drive"
        );
        Ok(file)
    }

    /// Schedule an event
    pub async fn create_calendar_event(
        &self,
        mut event: NewCalendarEvent,
    ) -> Result<CalendarEvent, GoogleError> {
        event.summary = required("summary", &event.summary)?;
        let start = parse_instant("start", &event.start)?;
        let end = parse_instant("end", &event.end)?;
        if end < start {
            return Err(GoogleError::validation("end must not be before start"));
        }
        event.attendees.retain(|a| !a.trim().is_empty());

        let calendar_id = self.calendar_id(event.calendar_id.as_deref());
        let token = self.token().await?;
        let created = self
            .apis
            .insert_event(&token, &calendar_id, &event)
            .await
            .map_err(upstream)?;

        tracing::info!(event_id = %created.id, calendar_id = %calendar_id, "Created calendar event");
        Ok(created)
    }

    /// Upcoming events, earliest first
    pub async fn list_calendar_events(
        &self,
        query: EventQuery,
    ) -> Result<Vec<CalendarEvent>, GoogleError> {
        let time_min = match query.time_min.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => DateTime::parse_from_rfc3339(t)
                .map_err(|_| GoogleError::validation(format!("timeMin '{}' is not RFC 3339", t)))?
                .to_rfc3339_opts(SecondsFormat::Secs, true),
            _ => Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        };
        let max_results = query
            .max_results
            .unwrap_or(DEFAULT_MAX_RESULTS)
            .clamp(1, MAX_RESULTS_LIMIT);

        let calendar_id = self.calendar_id(query.calendar_id.as_deref());
        let token = self.token().await?;
        self.apis
            .list_events(&token, &calendar_id, &time_min, max_results)
            .await
            .map_err(upstream)
    }

    pub async fn delete_calendar_event(
        &self,
        calendar_id: Option<String>,
        event_id: &str,
    ) -> Result<(), GoogleError> {
        let event_id = required("eventId", event_id)?;
        let calendar_id = self.calendar_id(calendar_id.as_deref());

        let token = self.token().await?;
        self.apis
            .delete_event(&token, &calendar_id, &event_id)
            .await
            .map_err(upstream)?;

        tracing::info!(event_id = %event_id, calendar_id = %calendar_id, "Deleted calendar event");
        Ok(())
    }

    /// Walk the credential chain once and report what was found
    pub async fn check_credentials(&self) -> CredentialReport {
        let mut report = CredentialReport {
            project_id: self.config.project_id.clone(),
            service_account: self.config.service_account_email.clone(),
            provider_configured: self
                .config
                .workload_identity_provider
                .as_deref()
                .is_some_and(|p| !p.trim().is_empty()),
            oidc_token_present: self
                .config
                .oidc_token
                .as_deref()
                .is_some_and(|t| !t.trim().is_empty()),
            token_acquired: false,
            error: None,
        };

        match self.tokens.access_token().await {
            Ok(_) => report.token_acquired = true,
            Err(e) => {
                tracing::warn!(error = %format!("{:#}", e), "Google credential check failed");
                report.error = Some(format!("{:#}", e));
            }
        }
        report
    }

    async fn token(&self) -> Result<String, GoogleError> {
        self.tokens.access_token().await.map_err(|e| {
            tracing::error!(error = %format!("{:#}", e), "Failed to obtain Google access token");
            GoogleError::Credentials {
                details: format!("{:#}", e),
            }
        })
    }

    fn calendar_id(&self, requested: Option<&str>) -> String {
        requested
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(&self.config.default_calendar_id)
            .to_string()
    }
}

fn required(field: &str, value: &str) -> Result<String, GoogleError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(GoogleError::missing(field));
    }
    Ok(trimmed.to_string())
}

fn parse_instant(field: &str, time: &EventTime) -> Result<DateTime<FixedOffset>, GoogleError> {
    DateTime::parse_from_rfc3339(time.date_time.trim()).map_err(|_| {
        GoogleError::validation(format!(
            "{} '{}' is not an RFC 3339 timestamp",
            field, time.date_time
        ))
    })
}

fn upstream(error: anyhow::Error) -> GoogleError {
    tracing::error!(error = %format!("{:#}", error), "Google API call failed");
    GoogleError::Upstream {
        details: format!("{:#}", error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    struct StaticToken(Option<&'static str>);

    #[async_trait]
    impl TokenSource for StaticToken {
        async fn access_token(&self) -> anyhow::Result<String> {
            self.0
                .map(str::to_string)
                .ok_or_else(|| anyhow::anyhow!("missing configuration: GCP_PROJECT_ID"))
        }
    }

    #[derive(Default)]
    struct RecordingApis {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl GoogleApis for RecordingApis {
        async fn upload_file(&self, token: &str, upload: &DriveUpload) -> anyhow::Result<DriveFile> {
            self.calls.lock().push(format!("upload {} {}", token, upload.file_name));
            Ok(DriveFile {
                id: "file-1".into(),
                web_view_link: None,
            })
        }

        async fn insert_event(
            &self,
            _token: &str,
            calendar_id: &str,
            event: &NewCalendarEvent,
        ) -> anyhow::Result<CalendarEvent> {
            self.calls.lock().push(format!("insert {} {}", calendar_id, event.summary));
            Ok(CalendarEvent {
                id: "evt-1".into(),
                summary: Some(event.summary.clone()),
                description: None,
                html_link: None,
                start: Some(event.start.date_time.clone()),
                end: Some(event.end.date_time.clone()),
                status: Some("confirmed".into()),
            })
        }

        async fn list_events(
            &self,
            _token: &str,
            calendar_id: &str,
            _time_min: &str,
            max_results: u32,
        ) -> anyhow::Result<Vec<CalendarEvent>> {
            self.calls.lock().push(format!("list {} {}", calendar_id, max_results));
            Ok(vec![])
        }

        async fn delete_event(&self, _token: &str, calendar_id: &str, event_id: &str) -> anyhow::Result<()> {
            self.calls.lock().push(format!("delete {} {}", calendar_id, event_id));
            Ok(())
        }
    }

    fn service(token: Option<&'static str>) -> (Service, Arc<RecordingApis>) {
        let apis = Arc::new(RecordingApis::default());
        let service = Service::new(Arc::new(StaticToken(token)), apis.clone(), Config::default());
        (service, apis)
    }

    fn at(date_time: &str) -> EventTime {
        EventTime {
            date_time: date_time.into(),
            time_zone: Some("America/Guayaquil".into()),
        }
    }

    #[tokio::test]
    async fn test_upload_requires_file_name_and_content() {
        let (service, apis) = service(Some("tok"));

        let err = service
            .upload_to_drive(DriveUpload {
                file_name: "  ".into(),
                content: b"pdf".to_vec(),
                mime_type: "application/pdf".into(),
                folder_id: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err, GoogleError::missing("fileName"));

        let err = service
            .upload_to_drive(DriveUpload {
                file_name: "orden.pdf".into(),
                content: vec![],
                mime_type: "application/pdf".into(),
                folder_id: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err, GoogleError::missing("content"));
        assert!(apis.calls.lock().is_empty());
    }

    #[tokio::test]
    async fn test_event_end_before_start_is_rejected() {
        let (service, _) = service(Some("tok"));

        let err = service
            .create_calendar_event(NewCalendarEvent {
                calendar_id: None,
                summary: "Visita técnica".into(),
                description: None,
                start: at("2026-10-20T10:00:00-05:00"),
                end: at("2026-10-20T09:00:00-05:00"),
                attendees: vec![],
            })
            .await
            .unwrap_err();

        assert!(matches!(err, GoogleError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_default_calendar_and_result_clamp() {
        let (service, apis) = service(Some("tok"));

        service
            .list_calendar_events(EventQuery {
                calendar_id: Some(" ".into()),
                time_min: None,
                max_results: Some(10_000),
            })
            .await
            .unwrap();

        assert_eq!(apis.calls.lock().as_slice(), ["list primary 250"]);
    }

    #[tokio::test]
    async fn test_credential_failure_is_not_a_bad_request() {
        let (service, apis) = service(None);

        let err = service
            .delete_calendar_event(None, "evt-1")
            .await
            .unwrap_err();

        assert!(matches!(err, GoogleError::Credentials { .. }));
        assert!(!err.is_bad_request());
        assert!(apis.calls.lock().is_empty());
    }

    #[tokio::test]
    async fn test_check_credentials_reports_error() {
        let (service, _) = service(None);

        let report = service.check_credentials().await;

        assert!(!report.token_acquired);
        assert!(!report.provider_configured);
        assert!(report.error.unwrap().contains("GCP_PROJECT_ID"));
    }
}
