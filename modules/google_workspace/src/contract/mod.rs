//! Contract layer - public API for inter-module communication

pub mod client;
pub mod error;
pub mod model;

pub use client::GoogleWorkspaceApi;
pub use error::GoogleError;
pub use model::{
    CalendarEvent, CredentialReport, DriveFile, DriveUpload, EventQuery, EventTime,
    NewCalendarEvent,
};
