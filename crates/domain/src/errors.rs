//! Error types used throughout the application
//!
//! The classified variants (everything except `LocalValidation`, `Config` and
//! `Internal`) are produced by the error classifier in `coreshift-core` from
//! HTTP responses. Each carries a display message suitable for showing to the
//! user as-is, plus the originating HTTP status where one exists.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for CoreShift
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum CoreShiftError {
    /// The bearer token was rejected (401/403), is missing, or could not be
    /// re-verified. Consumers must force a logout and send the user back to
    /// the login screen. `status` is absent when the session died without a
    /// server response (missing token, unreachable probe).
    #[error("{message}")]
    SessionExpired { status: Option<u16>, message: String },

    /// The resource already exists (409): duplicate feedback, or profile
    /// creation attempted twice.
    #[error("{message}")]
    DuplicateSubmission { status: u16, message: String },

    /// The backend rejected the payload (422) with field-level errors,
    /// already joined into a single display string.
    #[error("{message}")]
    ValidationFailed { status: u16, message: String },

    /// Secondary interpretation of a generic backend failure whose message
    /// indicates the user must complete their profile first.
    #[error("{message}")]
    ProfileIncomplete { status: Option<u16>, message: String },

    /// Any other non-2xx response.
    #[error("{message}")]
    RequestFailed { status: Option<u16>, message: String },

    /// No response was received at all (connect failure, timeout).
    #[error("{message}")]
    NetworkUnreachable { message: String },

    /// A 2xx response whose body could not be parsed.
    #[error("{message}")]
    MalformedResponse { message: String },

    /// Client-side validation rejected the input before any request was made.
    #[error("{message}")]
    LocalValidation { message: String },

    /// Configuration error (loader, invalid base URL, ...).
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Internal error that should not surface to the user verbatim.
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Discriminant-only view of [`CoreShiftError`], used by controllers to
/// branch on classification without matching payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    SessionExpired,
    DuplicateSubmission,
    ValidationFailed,
    ProfileIncomplete,
    RequestFailed,
    NetworkUnreachable,
    MalformedResponse,
    LocalValidation,
    Config,
    Internal,
}

impl CoreShiftError {
    /// Client-side validation rejection; `message` is shown verbatim.
    #[must_use]
    pub fn local_validation(message: impl Into<String>) -> Self {
        Self::LocalValidation { message: message.into() }
    }

    /// Configuration failure.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }

    /// Internal failure not meant for verbatim display.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }

    /// Get the error kind for this error
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SessionExpired { .. } => ErrorKind::SessionExpired,
            Self::DuplicateSubmission { .. } => ErrorKind::DuplicateSubmission,
            Self::ValidationFailed { .. } => ErrorKind::ValidationFailed,
            Self::ProfileIncomplete { .. } => ErrorKind::ProfileIncomplete,
            Self::RequestFailed { .. } => ErrorKind::RequestFailed,
            Self::NetworkUnreachable { .. } => ErrorKind::NetworkUnreachable,
            Self::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            Self::LocalValidation { .. } => ErrorKind::LocalValidation,
            Self::Config { .. } => ErrorKind::Config,
            Self::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// HTTP status that produced this error, if any.
    #[must_use]
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::DuplicateSubmission { status, .. } | Self::ValidationFailed { status, .. } => {
                Some(*status)
            }
            Self::SessionExpired { status, .. }
            | Self::ProfileIncomplete { status, .. }
            | Self::RequestFailed { status, .. } => *status,
            _ => None,
        }
    }

    /// Human-readable message, suitable to show directly to the user.
    #[must_use]
    pub fn display_message(&self) -> &str {
        match self {
            Self::SessionExpired { message, .. }
            | Self::DuplicateSubmission { message, .. }
            | Self::ValidationFailed { message, .. }
            | Self::ProfileIncomplete { message, .. }
            | Self::RequestFailed { message, .. }
            | Self::NetworkUnreachable { message }
            | Self::MalformedResponse { message }
            | Self::LocalValidation { message }
            | Self::Config { message }
            | Self::Internal { message } => message,
        }
    }

    /// True when consumers must force a logout and return to the login
    /// screen.
    #[must_use]
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired { .. })
    }
}

/// Result type alias for CoreShift operations
pub type Result<T> = std::result::Result<T, CoreShiftError>;
