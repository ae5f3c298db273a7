//! Google Workspace Module
//!
//! Workload identity federation credentials, Drive uploads and Calendar
//! events behind `/api/google-service` and `/api/google-test`.

// Public exports
pub mod contract;
pub use contract::{client::GoogleWorkspaceApi, error::GoogleError};

pub mod module;
pub use module::GoogleWorkspaceModule;

pub use config::Config;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
