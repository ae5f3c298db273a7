//! Drive and Calendar REST adapters

use super::{ensure_success, http_client, read_json};
use crate::config::Config;
use crate::contract::{CalendarEvent, DriveFile, DriveUpload, EventTime, NewCalendarEvent};
use crate::domain::GoogleApis;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ===== Wire types =====

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FileMetadata<'a> {
    name: &'a str,
    mime_type: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    parents: Vec<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileResource {
    id: String,
    web_view_link: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct EventDateTime {
    #[serde(skip_serializing_if = "Option::is_none")]
    date_time: Option<String>,
    /// All-day events carry a date instead of a timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    time_zone: Option<String>,
}

impl From<&EventTime> for EventDateTime {
    fn from(time: &EventTime) -> Self {
        Self {
            date_time: Some(time.date_time.clone()),
            date: None,
            time_zone: time.time_zone.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Attendee<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct EventInsert<'a> {
    summary: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    start: EventDateTime,
    end: EventDateTime,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attendees: Vec<Attendee<'a>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventResource {
    id: String,
    summary: Option<String>,
    description: Option<String>,
    html_link: Option<String>,
    start: Option<EventDateTime>,
    end: Option<EventDateTime>,
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EventList {
    #[serde(default)]
    items: Vec<EventResource>,
}

impl From<EventResource> for CalendarEvent {
    fn from(e: EventResource) -> Self {
        let when = |t: Option<EventDateTime>| t.and_then(|t| t.date_time.or(t.date));
        Self {
            id: e.id,
            summary: e.summary,
            description: e.description,
            html_link: e.html_link,
            start: when(e.start),
            end: when(e.end),
            status: e.status,
        }
    }
}

// ===== Adapter =====

/// reqwest-backed [`GoogleApis`]
pub struct GoogleRestApis {
    http: reqwest::Client,
    config: Config,
}

impl GoogleRestApis {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        Ok(Self {
            http: http_client(config.request_timeout_secs)?,
            config,
        })
    }

    fn events_url(&self, calendar_id: &str) -> String {
        format!(
            "{}/calendars/{}/events",
            self.config.calendar_url.trim_end_matches('/'),
            urlencoding::encode(calendar_id)
        )
    }
}

/// `multipart/related` body: JSON metadata part followed by the media part
fn multipart_related(boundary: &str, metadata: &[u8], mime_type: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(metadata.len() + content.len() + 256);
    body.extend_from_slice(
        format!(
            "--{}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n",
            boundary
        )
        .as_bytes(),
    );
    body.extend_from_slice(metadata);
    body.extend_from_slice(format!("\r\n--{}\r\nContent-Type: {}\r\n\r\n", boundary, mime_type).as_bytes());
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());
    body
}

#[async_trait]
impl GoogleApis for GoogleRestApis {
    async fn upload_file(&self, token: &str, upload: &DriveUpload) -> anyhow::Result<DriveFile> {
        let metadata = serde_json::to_vec(&FileMetadata {
            name: &upload.file_name,
            mime_type: &upload.mime_type,
            parents: upload.folder_id.as_deref().into_iter().collect(),
        })?;
        let boundary = format!("servitech-{}", Uuid::new_v4().simple());
        let body = multipart_related(&boundary, &metadata, &upload.mime_type, &upload.content);

        let url = format!(
            "{}/files?uploadType=multipart&fields=id,webViewLink",
            self.config.drive_upload_url.trim_end_matches('/')
        );
        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .header(CONTENT_TYPE, format!("multipart/related; boundary={}", boundary))
            .body(body)
            .send()
            .await
            .context("Drive upload request failed")?;

        let file: FileResource = read_json(response, "Drive upload").await?;
        Ok(DriveFile {
            id: file.id,
            web_view_link: file.web_view_link,
        })
    }

    async fn insert_event(
        &self,
        token: &str,
        calendar_id: &str,
        event: &NewCalendarEvent,
    ) -> anyhow::Result<CalendarEvent> {
        let payload = EventInsert {
            summary: &event.summary,
            description: event.description.as_deref(),
            start: (&event.start).into(),
            end: (&event.end).into(),
            attendees: event
                .attendees
                .iter()
                .map(|email| Attendee { email })
                .collect(),
        };

        let response = self
            .http
            .post(self.events_url(calendar_id))
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await
            .context("Calendar insert request failed")?;

        let created: EventResource = read_json(response, "Calendar insert").await?;
        Ok(created.into())
    }

    async fn list_events(
        &self,
        token: &str,
        calendar_id: &str,
        time_min: &str,
        max_results: u32,
    ) -> anyhow::Result<Vec<CalendarEvent>> {
        let max_results = max_results.to_string();
        let response = self
            .http
            .get(self.events_url(calendar_id))
            .bearer_auth(token)
            .query(&[
                ("timeMin", time_min),
                ("maxResults", max_results.as_str()),
                ("singleEvents", "true"),
                ("orderBy", "startTime"),
            ])
            .send()
            .await
            .context("Calendar list request failed")?;

        let list: EventList = read_json(response, "Calendar list").await?;
        Ok(list.items.into_iter().map(Into::into).collect())
    }

    async fn delete_event(&self, token: &str, calendar_id: &str, event_id: &str) -> anyhow::Result<()> {
        let url = format!("{}/{}", self.events_url(calendar_id), urlencoding::encode(event_id));
        let response = self
            .http
            .delete(url)
            .bearer_auth(token)
            .send()
            .await
            .context("Calendar delete request failed")?;

        ensure_success(response, "Calendar delete").await?;
        Ok(())
    }
}
