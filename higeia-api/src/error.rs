//! API error types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors that can occur talking to the Higeia backend.
///
/// Every operation maps its failure into exactly one of these; nothing is
/// retried, the caller decides what to surface.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure: DNS, refused connection, dropped socket.
    #[error("network error: {0}")]
    Network(String),

    /// The response body was not parseable JSON.
    #[error("response decode error: {0}")]
    Decode(String),

    /// The server rejected a submission with per-field messages.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// Any other non-success response.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Login was rejected or no credentials are available.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Client construction or configuration problem.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// Returns the per-field messages when this is a validation error.
    #[must_use]
    pub fn validation(&self) -> Option<&ValidationErrors> {
        match self {
            ApiError::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation(_))
    }

    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}

/// The structured body of a validation rejection.
///
/// The backend sends `{"message": ..., "errors": {"field": ["msg", ...]}}`;
/// screens display the first message per field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationErrors {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: HashMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// The first message of each field, the one shown under the input.
    #[must_use]
    pub fn first_messages(&self) -> HashMap<String, String> {
        self.errors
            .iter()
            .filter_map(|(field, messages)| {
                messages.first().map(|m| (field.clone(), m.clone()))
            })
            .collect()
    }

    /// The first message for one field.
    #[must_use]
    pub fn first(&self, field: &str) -> Option<&str> {
        self.errors
            .get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{message}"),
            None => {
                let mut fields: Vec<&str> = self.errors.keys().map(String::as_str).collect();
                fields.sort_unstable();
                write!(f, "invalid fields: {}", fields.join(", "))
            }
        }
    }
}
