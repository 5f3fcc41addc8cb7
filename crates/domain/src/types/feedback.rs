//! Feedback submission and testimonial types
//!
//! A user submits at most one feedback entry; the backend enforces this with
//! HTTP 409 and the client additionally short-circuits repeat attempts.
//! Testimonials are a read-only projection of other users' feedback joined
//! with their profile, shown for social proof.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wire body for `POST /feedback/add`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFeedback {
    /// Star rating, 1..=5.
    pub rating: u8,
    /// Free-text feedback, already trimmed, 10..=1000 characters.
    pub feedback: String,
    /// Client-generated submission timestamp (ISO-8601 on the wire).
    pub submitted_at: DateTime<Utc>,
}

impl NewFeedback {
    /// Build a submission stamped with the current time.
    #[must_use]
    pub fn now(rating: u8, feedback: impl Into<String>) -> Self {
        Self { rating, feedback: feedback.into(), submitted_at: Utc::now() }
    }
}

/// Read-only testimonial entry from `GET /feedback/view-feedback`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub profile_image: Option<String>,
}

/// Response envelope for the testimonial listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestimonialPage {
    #[serde(default)]
    pub data: Vec<Testimonial>,
    /// Minimum rating the backend filtered on, when it reports one.
    /// The one snake_case field in the backend contract.
    #[serde(default)]
    pub rating_used: Option<u8>,
}
