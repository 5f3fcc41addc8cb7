//! Port interface for feedback operations

use async_trait::async_trait;
use coreshift_domain::{NewFeedback, Result, TestimonialPage};

/// Authenticated feedback endpoints
#[async_trait]
pub trait FeedbackGateway: Send + Sync {
    /// `GET /feedback/check` -> whether this user already submitted.
    async fn check_submission(&self, token: &str) -> Result<bool>;

    /// `POST /feedback/add`.
    async fn submit_feedback(&self, token: &str, feedback: &NewFeedback) -> Result<()>;

    /// `GET /feedback/view-feedback` -> testimonial projection.
    async fn view_testimonials(&self, token: &str) -> Result<TestimonialPage>;
}
