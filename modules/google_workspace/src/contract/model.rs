//! Contract models for Google Workspace operations
//!
//! Transport-agnostic; the REST layer owns the wire shapes.

/// File to store in Drive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriveUpload {
    pub file_name: String,
    pub content: Vec<u8>,
    pub mime_type: String,
    /// Parent folder; Drive root when absent
    pub folder_id: Option<String>,
}

/// A file stored in Drive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriveFile {
    pub id: String,
    pub web_view_link: Option<String>,
}

/// Start or end of a calendar event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTime {
    /// RFC 3339 timestamp
    pub date_time: String,
    /// IANA zone name such as `America/Guayaquil`
    pub time_zone: Option<String>,
}

/// Event to schedule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCalendarEvent {
    pub calendar_id: Option<String>,
    pub summary: String,
    pub description: Option<String>,
    pub start: EventTime,
    pub end: EventTime,
    /// Attendee e-mail addresses
    pub attendees: Vec<String>,
}

/// Event as returned by Calendar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub id: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub html_link: Option<String>,
    /// `dateTime` or, for all-day events, `date`
    pub start: Option<String>,
    pub end: Option<String>,
    pub status: Option<String>,
}

/// Listing parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventQuery {
    pub calendar_id: Option<String>,
    /// RFC 3339 lower bound; "now" when absent
    pub time_min: Option<String>,
    pub max_results: Option<u32>,
}

/// Outcome of the credential self-check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialReport {
    pub project_id: Option<String>,
    pub service_account: Option<String>,
    pub provider_configured: bool,
    pub oidc_token_present: bool,
    pub token_acquired: bool,
    pub error: Option<String>,
}
