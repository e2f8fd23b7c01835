//! Client-side error taxonomy.
//!
//! ERROR HANDLING
//! ==============
//! Every variant carries a message that can be shown to the user as-is. The
//! server's `{"message": ...}` body wins when present; otherwise the text is
//! derived from the HTTP status. None of these errors is fatal: the worst
//! outcome is staying on the login screen.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use crate::net::types::ErrorBody;

pub const MSG_UNAUTHORIZED: &str = "Not authorized. Please sign in again.";
pub const MSG_FORBIDDEN: &str = "Access denied.";
pub const MSG_NOT_FOUND: &str = "Resource not found.";
pub const MSG_BAD_REQUEST: &str = "Invalid request.";
pub const MSG_SERVER_ERROR: &str = "Internal server error.";
pub const MSG_CONFLICT: &str = "Resource already exists.";
pub const MSG_UNKNOWN: &str = "An unknown error occurred.";
pub const MSG_LOGIN_FAILED: &str = "Could not sign in. Check your credentials.";
pub const MSG_REGISTER_FAILED: &str = "Could not create the account. Try again.";
pub const MSG_LOAD_TASK_FAILED: &str = "Could not load the task.";
pub const MSG_CREATE_TASK_FAILED: &str = "Could not create the task.";
pub const MSG_UPDATE_TASK_FAILED: &str = "Could not update the task.";
pub const MSG_DELETE_TASK_FAILED: &str = "Could not delete the task.";

/// Failure of a request against the task service.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Input rejected before or by the server's validation rules.
    #[error("{0}")]
    Validation(String),
    /// Login refused: wrong username/password or account temporarily blocked.
    #[error("{0}")]
    InvalidCredentials(String),
    /// Username or email already taken.
    #[error("{0}")]
    Conflict(String),
    /// Missing or rejected bearer token on a protected endpoint.
    #[error("{0}")]
    Unauthorized(String),
    /// Any other non-2xx status. Displays the server's message alone.
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Request timed out. Please try again.")]
    Timeout,
    #[error("Response error: {0}")]
    Parse(String),
    #[error("Request error: {0}")]
    Serialization(String),
}

impl ApiError {
    /// Classify a non-2xx response.
    ///
    /// `body` is the raw response text; a JSON `message` field inside it is
    /// preferred over the generic status text.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = server_message(body).unwrap_or_else(|| status_message(status).to_owned());
        match status {
            400 | 422 => Self::Validation(message),
            401 => Self::Unauthorized(message),
            409 => Self::Conflict(message),
            _ => Self::Http { status, message },
        }
    }

    /// Reinterpret a 401 from the login endpoint as a credentials failure.
    #[must_use]
    pub fn into_login_error(self) -> Self {
        match self {
            Self::Unauthorized(message) => Self::InvalidCredentials(message),
            other => other,
        }
    }

    /// Text for a form's error line.
    ///
    /// Messages that came from the server (or its status) are shown as-is.
    /// Client-side failures with no user-facing text, and blank messages,
    /// become `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        let message = match self {
            Self::Network(_) | Self::Parse(_) | Self::Serialization(_) => return fallback.to_owned(),
            other => other.to_string(),
        };
        if message.trim().is_empty() { fallback.to_owned() } else { message }
    }

    /// HTTP status for errors that came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Validation(_) => Some(400),
            Self::InvalidCredentials(_) | Self::Unauthorized(_) => Some(401),
            Self::Conflict(_) => Some(409),
            Self::Http { status, .. } => Some(*status),
            Self::Network(_) | Self::Timeout | Self::Parse(_) | Self::Serialization(_) => None,
        }
    }
}

/// Failure reading the persisted session.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The stored profile is not valid JSON for a `UserProfile`.
    #[error("stored user profile is malformed: {0}")]
    CorruptProfile(#[from] serde_json::Error),
}

/// Generic text for a status code when the server sent no message.
pub fn status_message(status: u16) -> &'static str {
    match status {
        400 => MSG_BAD_REQUEST,
        401 => MSG_UNAUTHORIZED,
        403 => MSG_FORBIDDEN,
        404 => MSG_NOT_FOUND,
        409 => MSG_CONFLICT,
        500 => MSG_SERVER_ERROR,
        _ => MSG_UNKNOWN,
    }
}

fn server_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    let message = parsed.message?;
    let trimmed = message.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_owned()) }
}
