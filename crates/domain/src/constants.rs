//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Feedback validation bounds
pub const MIN_FEEDBACK_CHARS: usize = 10;
pub const MAX_FEEDBACK_CHARS: usize = 1000;
pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

// UX timing for the embedding view layer. The controllers never sleep;
// views read these when scheduling redirects and message clears so every
// screen uses the same delays.

/// Grace delay before redirecting to login after a session expiry.
pub const SESSION_EXPIRED_REDIRECT_MS: u64 = 2000;
/// Grace delay before leaving the feedback screen once it is blocked.
pub const ALREADY_SUBMITTED_REDIRECT_MS: u64 = 3000;
/// How long a success banner stays visible.
pub const SUCCESS_DISPLAY_MS: u64 = 3000;
/// How long a non-terminal error banner stays before auto-clearing.
pub const ERROR_AUTO_CLEAR_MS: u64 = 4000;

// Canonical display strings reused across screens
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please login again.";
pub const ALREADY_SUBMITTED_MESSAGE: &str =
    "You have already submitted feedback. Thank you for your input!";
pub const SERVER_UNREACHABLE_MESSAGE: &str = "Server not reachable";
pub const INVALID_RESPONSE_MESSAGE: &str = "Server returned invalid response";
