//! Assistant Module
//!
//! Chat with a language model primed as an appliance repair technician.
//! Failures of the model never surface to callers; they get a fixed
//! apology instead.

// Public exports
pub mod contract;
pub use contract::{AssistantApi, AssistantError, ChatMessage, ChatRole};

pub mod module;
pub use module::AssistantModule;

pub use config::Config;
pub use domain::prompt::FALLBACK_REPLY;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
