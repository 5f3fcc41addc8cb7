//! Feedback screen controller
//!
//! Enforces the one-feedback-per-user rule client-side (on top of the
//! backend's 409) and drives the submission workflow:
//!
//! `Checking -> {Blocked | Ready}`; from `Ready`, a submit locally validates
//! and either rejects without any request or goes
//! `Submitting -> {Succeeded | back to Ready}`. A dead session is terminal
//! for the screen (`Expired`, forces logout); a duplicate lands in `Blocked`.

use std::sync::Arc;

use coreshift_domain::constants::ALREADY_SUBMITTED_MESSAGE;
use coreshift_domain::{CoreShiftError, NewFeedback, Result, TestimonialPage};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::ports::FeedbackGateway;
use super::validate::validate_feedback;
use crate::classify::refine_feedback_error;
use crate::profile::ProfileGateway;
use crate::session::SessionStore;

/// View-facing state of the feedback screen.
///
/// `Blocked` (already submitted) and `Expired` are terminal; the view
/// redirects after a grace delay. `Succeeded` also blocks further submits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackState {
    Checking,
    Ready,
    Blocked,
    Submitting,
    Succeeded,
    Expired,
}

/// Controller for the feedback screen.
pub struct FeedbackController {
    gateway: Arc<dyn FeedbackGateway>,
    /// Used only to re-probe session liveness before a submit; the probe
    /// endpoint is the profile fetch, where a 404 still means "alive".
    profiles: Arc<dyn ProfileGateway>,
    session: Arc<SessionStore>,
    state: RwLock<FeedbackState>,
    last_submission: RwLock<Option<NewFeedback>>,
}

impl FeedbackController {
    #[must_use]
    pub fn new(
        gateway: Arc<dyn FeedbackGateway>,
        profiles: Arc<dyn ProfileGateway>,
        session: Arc<SessionStore>,
    ) -> Self {
        Self {
            gateway,
            profiles,
            session,
            state: RwLock::new(FeedbackState::Checking),
            last_submission: RwLock::new(None),
        }
    }

    /// Current state snapshot.
    pub async fn state(&self) -> FeedbackState {
        *self.state.read().await
    }

    /// The accepted submission, retained for optimistic display.
    pub async fn last_submission(&self) -> Option<NewFeedback> {
        self.last_submission.read().await.clone()
    }

    /// True when further submits must be prevented.
    pub async fn has_submitted(&self) -> bool {
        matches!(self.state().await, FeedbackState::Blocked | FeedbackState::Succeeded)
    }

    /// Ask the backend whether this user already submitted feedback.
    ///
    /// A positive answer is terminal (`Blocked`); a failed check is
    /// best-effort and leaves the screen usable (the backend still rejects
    /// duplicates with 409), except when the session itself is dead.
    pub async fn check_previous_submission(&self) -> FeedbackState {
        *self.state.write().await = FeedbackState::Checking;

        let token = match self.token_or_expired().await {
            Ok(token) => token,
            Err(err) => {
                self.expire(&err).await;
                return FeedbackState::Expired;
            }
        };

        match self.gateway.check_submission(&token).await {
            Ok(true) => {
                info!("feedback already on record, blocking the form");
                self.transition(FeedbackState::Blocked).await
            }
            Ok(false) => self.transition(FeedbackState::Ready).await,
            Err(err) if err.is_session_expired() => {
                self.expire(&err).await;
                FeedbackState::Expired
            }
            Err(err) => {
                warn!(error = %err, "previous-feedback check failed, allowing the form");
                self.transition(FeedbackState::Ready).await
            }
        }
    }

    /// Validate and submit feedback.
    ///
    /// Local validation failures make zero network calls and leave the
    /// state untouched. The session is re-probed against an authenticated
    /// endpoint before the POST; any probe failure aborts through the
    /// session-expired path.
    ///
    /// # Errors
    /// `LocalValidation`, `SessionExpired`, `DuplicateSubmission`,
    /// `ProfileIncomplete` or any other classified submission error. After a
    /// retryable error the state is back to `Ready`.
    pub async fn submit(&self, rating: u8, feedback: &str) -> Result<FeedbackState> {
        // Check-and-set under one write lock so two racing submits cannot
        // both observe Ready.
        let trimmed = {
            let mut state = self.state.write().await;
            if *state != FeedbackState::Ready {
                debug!(state = ?*state, "submit ignored outside Ready");
                return Ok(*state);
            }
            let trimmed = validate_feedback(rating, feedback)?;
            *state = FeedbackState::Submitting;
            trimmed
        };

        let token = match self.token_or_expired().await {
            Ok(token) => token,
            Err(err) => return Err(self.expire(&err).await),
        };

        // Re-validate that the session is still live before submitting.
        if let Err(probe_err) = self.probe_session(&token).await {
            return Err(self.expire(&probe_err).await);
        }

        let submission = NewFeedback::now(rating, trimmed);
        debug!(rating = submission.rating, "submitting feedback");

        match self.gateway.submit_feedback(&token, &submission).await {
            Ok(()) => {
                info!("feedback accepted");
                *self.last_submission.write().await = Some(submission);
                Ok(self.transition(FeedbackState::Succeeded).await)
            }
            Err(err) if err.is_session_expired() => Err(self.expire(&err).await),
            Err(CoreShiftError::DuplicateSubmission { status, .. }) => {
                self.transition(FeedbackState::Blocked).await;
                Err(CoreShiftError::DuplicateSubmission {
                    status,
                    message: ALREADY_SUBMITTED_MESSAGE.into(),
                })
            }
            Err(err) => {
                // Retry stays user-initiated: back to Ready.
                self.transition(FeedbackState::Ready).await;
                Err(refine_feedback_error(err))
            }
        }
    }

    /// Fetch the read-only testimonial projection for display.
    ///
    /// # Errors
    /// Classified errors pass through; a dead session still forces the
    /// uniform logout.
    pub async fn load_testimonials(&self) -> Result<TestimonialPage> {
        let token = match self.token_or_expired().await {
            Ok(token) => token,
            Err(err) => return Err(self.expire(&err).await),
        };

        match self.gateway.view_testimonials(&token).await {
            Ok(page) => Ok(page),
            Err(err) if err.is_session_expired() => Err(self.expire(&err).await),
            Err(err) => Err(err),
        }
    }

    /// Probe an authenticated endpoint to confirm the token is still
    /// accepted. A missing profile (404 -> `None`) still counts as alive.
    async fn probe_session(&self, token: &str) -> Result<()> {
        match self.profiles.fetch_profile(token).await {
            Ok(_) => Ok(()),
            Err(err) if err.is_session_expired() => Err(err),
            Err(err) => Err(CoreShiftError::SessionExpired {
                status: err.http_status(),
                message: "Unable to verify authentication. Please login again.".into(),
            }),
        }
    }

    async fn token_or_expired(&self) -> Result<String> {
        self.session.token().await.ok_or_else(|| CoreShiftError::SessionExpired {
            status: None,
            message: "Authentication required. Please login again.".into(),
        })
    }

    async fn transition(&self, next: FeedbackState) -> FeedbackState {
        *self.state.write().await = next;
        next
    }

    /// Terminal session-expired handling: force logout, mark the screen.
    async fn expire(&self, err: &CoreShiftError) -> CoreShiftError {
        warn!(error = %err, "session expired during feedback flow, forcing logout");
        if let Err(logout_err) = self.session.logout().await {
            warn!(error = %logout_err, "failed to clear expired session");
        }
        self.transition(FeedbackState::Expired).await;
        err.clone()
    }
}
