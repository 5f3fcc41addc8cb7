//! Error classifier
//!
//! Maps an HTTP response (status code plus parsed body) onto the fixed error
//! taxonomy in `coreshift-domain`, so every controller interprets backend
//! failures identically.
//!
//! Classification priority:
//! 1. 401/403 -> `SessionExpired`
//! 2. 409 -> `DuplicateSubmission`
//! 3. 422 -> `ValidationFailed` (field errors joined with ", ")
//! 4. any other non-2xx -> `RequestFailed`
//!
//! Transport failures and unparseable 2xx bodies are mapped by the helpers
//! below rather than by status code.

use coreshift_domain::constants::{INVALID_RESPONSE_MESSAGE, SESSION_EXPIRED_MESSAGE};
use coreshift_domain::CoreShiftError;
use serde_json::Value;

/// Substrings in a generic backend failure that signal the user must
/// complete their profile before feedback is accepted. Matched
/// case-insensitively. Fragile by nature; kept here so a dedicated error
/// code from the backend can replace it in one place.
const PROFILE_INCOMPLETE_HINTS: [&str; 2] = ["update your profile", "failed to submit feedback"];

/// Classify a non-2xx HTTP response into a typed error.
///
/// `body` is the raw response body; it is parsed as JSON on a best-effort
/// basis to extract display messages, and ignored when unparseable.
#[must_use]
pub fn classify_response(status: u16, body: &str) -> CoreShiftError {
    let parsed: Option<Value> = serde_json::from_str(body).ok();

    match status {
        401 | 403 => CoreShiftError::SessionExpired {
            status: Some(status),
            message: SESSION_EXPIRED_MESSAGE.to_string(),
        },
        409 => CoreShiftError::DuplicateSubmission {
            status,
            message: extract_message(parsed.as_ref())
                .unwrap_or_else(|| "This resource already exists".to_string()),
        },
        422 => {
            let joined = extract_validation_messages(parsed.as_ref());
            let message = if joined.is_empty() {
                "Validation failed".to_string()
            } else {
                format!("Validation failed: {joined}")
            };
            CoreShiftError::ValidationFailed { status, message }
        }
        _ => CoreShiftError::RequestFailed {
            status: Some(status),
            message: extract_message(parsed.as_ref())
                .unwrap_or_else(|| format!("Request failed with status {status}")),
        },
    }
}

/// Map a transport-level failure (no response received) to the taxonomy.
#[must_use]
pub fn network_unreachable(detail: &str) -> CoreShiftError {
    CoreShiftError::NetworkUnreachable {
        message: format!("{}: {detail}", coreshift_domain::constants::SERVER_UNREACHABLE_MESSAGE),
    }
}

/// Map a 2xx response whose body failed to parse.
#[must_use]
pub fn malformed_response(detail: &str) -> CoreShiftError {
    CoreShiftError::MalformedResponse {
        message: format!("{INVALID_RESPONSE_MESSAGE}: {detail}"),
    }
}

/// True when a generic failure message indicates an incomplete profile.
#[must_use]
pub fn mentions_incomplete_profile(message: &str) -> bool {
    let lowered = message.to_lowercase();
    PROFILE_INCOMPLETE_HINTS.iter().any(|hint| lowered.contains(hint))
}

/// Secondary classification for feedback submission failures: a generic
/// `RequestFailed` whose message sniffs as incomplete-profile is upgraded to
/// `ProfileIncomplete`. Every other error passes through untouched.
#[must_use]
pub fn refine_feedback_error(err: CoreShiftError) -> CoreShiftError {
    match err {
        CoreShiftError::RequestFailed { status, message }
            if mentions_incomplete_profile(&message) =>
        {
            CoreShiftError::ProfileIncomplete { status, message }
        }
        other => other,
    }
}

/// Pull a display message out of a generic error body.
/// Checks `message`, `detail` and `error` in that order.
fn extract_message(body: Option<&Value>) -> Option<String> {
    let body = body?;
    for key in ["message", "detail", "error"] {
        if let Some(text) = body.get(key).and_then(Value::as_str) {
            if !text.is_empty() {
                return Some(text.to_string());
            }
        }
    }
    None
}

/// Join field-level validation errors into a single display string.
///
/// Accepts the shapes the backend actually produces: `detail` as a string,
/// `detail` as an array of `{msg}` / `{message}` objects, or a bare `errors`
/// array of the same.
fn extract_validation_messages(body: Option<&Value>) -> String {
    let Some(body) = body else {
        return String::new();
    };

    if let Some(text) = body.get("detail").and_then(Value::as_str) {
        return text.to_string();
    }

    let entries = body
        .get("detail")
        .and_then(Value::as_array)
        .or_else(|| body.get("errors").and_then(Value::as_array));

    let Some(entries) = entries else {
        return String::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            entry
                .get("msg")
                .or_else(|| entry.get("message"))
                .and_then(Value::as_str)
                .or_else(|| entry.as_str())
        })
        .collect::<Vec<_>>()
        .join(", ")
}
