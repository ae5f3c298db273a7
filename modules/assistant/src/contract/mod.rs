//! Contract layer - public API for inter-module communication

pub mod client;
pub mod error;
pub mod model;

pub use client::AssistantApi;
pub use error::AssistantError;
pub use model::{ChatMessage, ChatRole};
