//! Contract error types for Google Workspace operations

/// Google Workspace errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoogleError {
    /// A required request field is absent or blank
    MissingField {
        field: String,
    },
    /// The `action` discriminator names no known operation
    UnknownAction {
        action: String,
    },
    /// Malformed input (bad base64, unparsable timestamp, ...)
    Validation {
        message: String,
    },
    /// Workload identity token could not be obtained
    Credentials {
        details: String,
    },
    /// Google answered with an error
    Upstream {
        details: String,
    },
}

impl GoogleError {
    pub fn missing(field: &str) -> Self {
        Self::MissingField {
            field: field.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Client-side mistakes, as opposed to credential or upstream failures
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. } | Self::UnknownAction { .. } | Self::Validation { .. }
        )
    }
}

impl std::fmt::Display for GoogleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "Missing required field '{}'", field),
            Self::UnknownAction { action } => write!(f, "Unknown action '{}'", action),
            Self::Validation { message } => write!(f, "Invalid request: {}", message),
            Self::Credentials { details } => {
                write!(f, "Could not obtain Google credentials: {}", details)
            }
            Self::Upstream { details } => write!(f, "Google API error: {}", details),
        }
    }
}

impl std::error::Error for GoogleError {}
