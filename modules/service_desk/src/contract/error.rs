//! Contract error types for the service desk
//!
//! These errors are transport-agnostic and used for inter-module communication.

/// Service desk domain errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceDeskError {
    /// Record not found
    NotFound {
        /// Resource type (client, equipment, order, ...)
        resource: String,
        /// Resource identifier
        id: String,
    },
    /// Conflict (duplicate, still referenced, insufficient stock, ...)
    Conflict {
        /// Conflict reason
        reason: String,
    },
    /// Validation error
    Validation {
        /// Validation error message
        message: String,
    },
    /// Status change not permitted from the current status
    InvalidTransition {
        /// Current status literal
        from: String,
        /// Requested status literal
        to: String,
    },
    /// Spreadsheet could not be read at all
    Import {
        /// Error details
        details: String,
    },
    /// Internal error
    Internal,
}

impl ServiceDeskError {
    pub fn not_found(resource: &str, id: impl ToString) -> Self {
        Self::NotFound {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::Conflict {
            reason: reason.into(),
        }
    }
}

impl From<super::model::UnknownLiteral> for ServiceDeskError {
    fn from(err: super::model::UnknownLiteral) -> Self {
        Self::validation(err.to_string())
    }
}

impl std::fmt::Display for ServiceDeskError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { resource, id } => {
                write!(f, "{} not found: {}", resource, id)
            }
            Self::Conflict { reason } => {
                write!(f, "Conflict: {}", reason)
            }
            Self::Validation { message } => {
                write!(f, "Validation error: {}", message)
            }
            Self::InvalidTransition { from, to } => {
                write!(f, "Cannot move order from {} to {}", from, to)
            }
            Self::Import { details } => {
                write!(f, "Import failed: {}", details)
            }
            Self::Internal => {
                write!(f, "Internal error")
            }
        }
    }
}

impl std::error::Error for ServiceDeskError {}
