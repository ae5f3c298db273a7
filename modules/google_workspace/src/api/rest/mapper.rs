//! Conversions between REST DTOs and contract models

use super::dto::*;
use crate::contract::{
    CalendarEvent, CredentialReport, DriveUpload, EventQuery, EventTime, GoogleError,
    NewCalendarEvent,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};

const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Decode base64 content, tolerating data URLs and embedded whitespace
pub fn decode_content(content: &str) -> Result<Vec<u8>, GoogleError> {
    let payload = match content.split_once(";base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => content,
    };
    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Err(GoogleError::missing("content"));
    }

    STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| GoogleError::validation(format!("content is not valid base64: {}", e)))
}

impl TryFrom<UploadToDriveRequest> for DriveUpload {
    type Error = GoogleError;

    fn try_from(req: UploadToDriveRequest) -> Result<Self, Self::Error> {
        let file_name = req
            .file_name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| GoogleError::missing("fileName"))?;
        let content = req
            .content
            .ok_or_else(|| GoogleError::missing("content"))?;

        Ok(DriveUpload {
            file_name,
            content: decode_content(&content)?,
            mime_type: req
                .mime_type
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string()),
            folder_id: req.folder_id,
        })
    }
}

fn event_time(value: EventTimeDto, default_zone: Option<&String>) -> EventTime {
    match value {
        EventTimeDto::Timestamp(date_time) => EventTime {
            date_time,
            time_zone: default_zone.cloned(),
        },
        EventTimeDto::Detailed(obj) => EventTime {
            date_time: obj.date_time,
            time_zone: obj.time_zone.or_else(|| default_zone.cloned()),
        },
    }
}

impl TryFrom<CreateCalendarEventRequest> for NewCalendarEvent {
    type Error = GoogleError;

    fn try_from(req: CreateCalendarEventRequest) -> Result<Self, Self::Error> {
        let summary = req
            .summary
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| GoogleError::missing("summary"))?;
        let start = req.start.ok_or_else(|| GoogleError::missing("start"))?;
        let end = req.end.ok_or_else(|| GoogleError::missing("end"))?;
        let zone = req.time_zone.as_ref();

        Ok(NewCalendarEvent {
            calendar_id: req.calendar_id,
            summary,
            description: req.description,
            start: event_time(start, zone),
            end: event_time(end, zone),
            attendees: req.attendees.unwrap_or_default(),
        })
    }
}

impl From<ListCalendarEventsRequest> for EventQuery {
    fn from(req: ListCalendarEventsRequest) -> Self {
        Self {
            calendar_id: req.calendar_id,
            time_min: req.time_min,
            max_results: req.max_results,
        }
    }
}

impl From<CalendarEvent> for CalendarEventDto {
    fn from(e: CalendarEvent) -> Self {
        Self {
            id: e.id,
            summary: e.summary,
            description: e.description,
            html_link: e.html_link,
            start: e.start,
            end: e.end,
            status: e.status,
        }
    }
}

impl From<CredentialReport> for CredentialReportDto {
    fn from(r: CredentialReport) -> Self {
        Self {
            success: r.token_acquired,
            project_id: r.project_id,
            service_account: r.service_account,
            provider_configured: r.provider_configured,
            oidc_token_present: r.oidc_token_present,
            token_acquired: r.token_acquired,
            error: r.error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_content_accepts_data_url() {
        assert_eq!(decode_content("data:text/plain;base64,aG9sYQ==").unwrap(), b"hola");
        assert_eq!(decode_content("aG9s\nYQ==").unwrap(), b"hola");
    }

    #[test]
    fn test_decode_content_rejects_garbage() {
        assert!(matches!(
            decode_content("no es base64!"),
            Err(GoogleError::Validation { .. })
        ));
        assert_eq!(decode_content("   "), Err(GoogleError::missing("content")));
    }

    #[test]
    fn test_upload_defaults_mime_type() {
        let upload = DriveUpload::try_from(UploadToDriveRequest {
            file_name: Some("orden.bin".into()),
            content: Some("AAE=".into()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(upload.mime_type, "application/octet-stream");
        assert_eq!(upload.content, vec![0u8, 1]);
    }

    #[test]
    fn test_bare_timestamps_take_request_zone() {
        let event = NewCalendarEvent::try_from(CreateCalendarEventRequest {
            summary: Some("Visita".into()),
            start: Some(EventTimeDto::Timestamp("2026-10-20T10:00:00-05:00".into())),
            end: Some(EventTimeDto::Detailed(EventTimeObject {
                date_time: "2026-10-20T11:00:00-05:00".into(),
                time_zone: Some("UTC".into()),
            })),
            time_zone: Some("America/Guayaquil".into()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(event.start.time_zone.as_deref(), Some("America/Guayaquil"));
        assert_eq!(event.end.time_zone.as_deref(), Some("UTC"));
    }

    #[test]
    fn test_event_requires_start() {
        let err = NewCalendarEvent::try_from(CreateCalendarEventRequest {
            summary: Some("Visita".into()),
            ..Default::default()
        })
        .unwrap_err();

        assert_eq!(err, GoogleError::missing("start"));
    }
}
