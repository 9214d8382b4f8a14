//! The client error taxonomy.
//!
//! Every fallible operation in the crate returns [`ApiError`]. Only
//! [`ApiError::Unauthorized`] has a global side effect (the session is
//! cleared); everything else is handled by the screen that caused it.

use std::fmt;

use super::category::ErrorCategory;
use crate::traits::{HttpError, StoreError};

/// Client-side error conditions.
#[derive(Debug, Clone)]
pub enum ApiError {
    /// No token or user id in the store; raised before any network I/O.
    AuthenticationMissing,

    /// HTTP 401. The session has already been invalidated when this is seen.
    Unauthorized { message: String },

    /// HTTP 403.
    Forbidden { message: String },

    /// HTTP 404.
    NotFound { message: String },

    /// HTTP 400 about a stale or unknown pagination cursor.
    CursorInvalidated { message: String },

    /// No response (connection refused, DNS, aborted).
    Network { message: String },

    /// No response within the per-call timeout.
    Timeout { message: String },

    /// Other 4xx, or a request rejected locally before sending.
    /// `message` is shown to the user verbatim.
    Validation { status: u16, message: String },

    /// Response body could not be decoded.
    Decode { message: String },

    /// The secure store failed.
    Store(StoreError),

    /// Anything else, including 5xx.
    Unexpected { status: Option<u16>, message: String },
}

impl ApiError {
    /// Build a local validation failure (no HTTP status involved).
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            status: 0,
            message: message.into(),
        }
    }

    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ApiError::AuthenticationMissing | ApiError::Unauthorized { .. } => ErrorCategory::Auth,
            ApiError::Forbidden { .. }
            | ApiError::NotFound { .. }
            | ApiError::CursorInvalidated { .. }
            | ApiError::Validation { .. } => ErrorCategory::User,
            ApiError::Network { .. } | ApiError::Timeout { .. } => ErrorCategory::Network,
            ApiError::Decode { .. } => ErrorCategory::Client,
            ApiError::Store(_) => ErrorCategory::System,
            ApiError::Unexpected { .. } => ErrorCategory::Server,
        }
    }

    /// Whether offering a manual retry makes sense.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Network { .. } | ApiError::Timeout { .. } => true,
            ApiError::Unexpected { status, .. } => status.map_or(true, |s| s >= 500),
            _ => false,
        }
    }

    /// Whether the user has to sign in again.
    pub fn requires_reauth(&self) -> bool {
        matches!(
            self,
            ApiError::AuthenticationMissing | ApiError::Unauthorized { .. }
        )
    }

    /// Whether this is the stale-cursor condition.
    pub fn is_cursor_invalidated(&self) -> bool {
        matches!(self, ApiError::CursorInvalidated { .. })
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::AuthenticationMissing => {
                "You're not signed in. Please sign in to continue.".to_string()
            }
            ApiError::Unauthorized { .. } => {
                "Your session has expired. Please sign in again.".to_string()
            }
            ApiError::Forbidden { .. } => "You don't have permission to do that.".to_string(),
            ApiError::NotFound { .. } => "This item is no longer available.".to_string(),
            ApiError::CursorInvalidated { .. } => {
                "The data has changed. Please refresh.".to_string()
            }
            ApiError::Network { .. } => {
                "Unable to reach the server. Check your connection and try again.".to_string()
            }
            ApiError::Timeout { .. } => {
                "The server took too long to respond. Check your connection and try again."
                    .to_string()
            }
            ApiError::Validation { message, .. } => message.clone(),
            ApiError::Decode { .. } => {
                "Received an invalid response from the server.".to_string()
            }
            ApiError::Store(_) => "Couldn't access secure storage on this device.".to_string(),
            ApiError::Unexpected { .. } => "Something went wrong. Please try again.".to_string(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::AuthenticationMissing => "E_AUTH_MISSING",
            ApiError::Unauthorized { .. } => "E_AUTH_401",
            ApiError::Forbidden { .. } => "E_HTTP_403",
            ApiError::NotFound { .. } => "E_HTTP_404",
            ApiError::CursorInvalidated { .. } => "E_CURSOR",
            ApiError::Network { .. } => "E_NET",
            ApiError::Timeout { .. } => "E_NET_TIMEOUT",
            ApiError::Validation { .. } => "E_VALIDATION",
            ApiError::Decode { .. } => "E_DECODE",
            ApiError::Store(_) => "E_STORE",
            ApiError::Unexpected { .. } => "E_UNEXPECTED",
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::AuthenticationMissing => write!(f, "Authentication missing"),
            ApiError::Unauthorized { message } => write!(f, "Unauthorized: {}", message),
            ApiError::Forbidden { message } => write!(f, "Forbidden: {}", message),
            ApiError::NotFound { message } => write!(f, "Not found: {}", message),
            ApiError::CursorInvalidated { message } => {
                write!(f, "Cursor invalidated: {}", message)
            }
            ApiError::Network { message } => write!(f, "Network error: {}", message),
            ApiError::Timeout { message } => write!(f, "Request timed out: {}", message),
            ApiError::Validation { status, message } => {
                write!(f, "Validation error ({}): {}", status, message)
            }
            ApiError::Decode { message } => write!(f, "Invalid response: {}", message),
            ApiError::Store(e) => write!(f, "{}", e),
            ApiError::Unexpected { status, message } => match status {
                Some(s) => write!(f, "Unexpected error (HTTP {}): {}", s, message),
                None => write!(f, "Unexpected error: {}", message),
            },
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<HttpError> for ApiError {
    fn from(e: HttpError) -> Self {
        match e {
            HttpError::Timeout(message) => ApiError::Timeout { message },
            HttpError::ConnectionFailed(message)
            | HttpError::Io(message)
            | HttpError::InvalidUrl(message)
            | HttpError::Other(message) => ApiError::Network { message },
            HttpError::Cancelled => ApiError::Network {
                message: "request aborted".to_string(),
            },
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::Store(e)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode {
            message: e.to_string(),
        }
    }
}

/// Pull a human-readable message out of an error body.
///
/// The backend sends `{"message": ...}` or `{"error": ...}`; anything else
/// is used as plain text.
pub fn extract_error_message(body: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) {
        for field in ["message", "error", "detail"] {
            if let Some(msg) = value.get(field).and_then(|v| v.as_str()) {
                return msg.to_string();
            }
        }
    }
    String::from_utf8_lossy(body).trim().to_string()
}

/// Classify a non-2xx HTTP response.
pub fn classify_status(status: u16, body: &[u8]) -> ApiError {
    let message = extract_error_message(body);
    match status {
        401 => ApiError::Unauthorized { message },
        403 => ApiError::Forbidden { message },
        404 => ApiError::NotFound { message },
        400 if message.to_lowercase().contains("cursor") => {
            ApiError::CursorInvalidated { message }
        }
        400..=499 => ApiError::Validation { status, message },
        _ => ApiError::Unexpected {
            status: Some(status),
            message,
        },
    }
}
