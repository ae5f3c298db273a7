//! Contract error types for the assistant
//!
//! Backend failures never reach callers: they are replaced by the fallback
//! reply. Only malformed input is an error.

/// Assistant errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistantError {
    /// Blank or oversized message, unknown history role
    Validation { message: String },
}

impl AssistantError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for AssistantError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation { message } => write!(f, "Validation error: {}", message),
        }
    }
}

impl std::error::Error for AssistantError {}
