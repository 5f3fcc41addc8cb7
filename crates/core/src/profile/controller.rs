//! Profile screen controller
//!
//! Per-screen workflow: fetch the current user's profile, create it when it
//! does not exist yet, update it afterwards. Exposes a single state value to
//! the view; each controller instance owns one in-flight request at a time,
//! so a second action while Loading/Submitting is rejected and the current
//! state returned unchanged.

use std::sync::Arc;

use coreshift_domain::{CoreShiftError, ImageUpload, Profile, ProfileDraft, ProfilePayload};
use tracing::{debug, info, warn};

use super::ports::ProfileGateway;
use crate::session::SessionStore;
use tokio::sync::RwLock;

/// View-facing state of the profile screen.
///
/// `NotFound` is the pre-creation state, not an error: the fetch succeeded
/// and the profile simply does not exist yet. `Failed` and `NotFound` are
/// both recoverable; the user may retry or resubmit.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileState {
    Idle,
    Loading,
    Loaded(Profile),
    NotFound,
    Submitting,
    Failed(CoreShiftError),
}

enum SubmitMode {
    Create,
    Update,
}

/// Controller for the profile screen.
pub struct ProfileController {
    gateway: Arc<dyn ProfileGateway>,
    session: Arc<SessionStore>,
    state: RwLock<ProfileState>,
}

impl ProfileController {
    #[must_use]
    pub fn new(gateway: Arc<dyn ProfileGateway>, session: Arc<SessionStore>) -> Self {
        Self { gateway, session, state: RwLock::new(ProfileState::Idle) }
    }

    /// Current state snapshot.
    pub async fn state(&self) -> ProfileState {
        self.state.read().await.clone()
    }

    /// Fetch the current user's profile.
    ///
    /// A 404 from the backend lands in `NotFound` with no error; a 401/403
    /// forces a logout and lands in `Failed(SessionExpired)`.
    pub async fn load(&self) -> ProfileState {
        if !self.begin(ProfileState::Loading).await {
            return self.state().await;
        }

        let token = match self.token_or_expired().await {
            Ok(token) => token,
            Err(err) => return self.fail(err).await,
        };

        match self.gateway.fetch_profile(&token).await {
            Ok(Some(profile)) => {
                debug!("profile loaded");
                self.transition(ProfileState::Loaded(profile)).await
            }
            Ok(None) => {
                debug!("no profile yet");
                self.transition(ProfileState::NotFound).await
            }
            Err(err) => self.fail(err).await,
        }
    }

    /// Create the profile.
    ///
    /// Required fields (designation, then gender) are validated locally
    /// first; a rejection makes zero network calls. On success the profile
    /// is re-fetched so the view sees server-computed fields (userId,
    /// timestamps, resolved default avatar).
    pub async fn create(
        &self,
        draft: ProfileDraft,
        image: Option<ImageUpload>,
    ) -> ProfileState {
        if let Err(err) = validate_create(&draft) {
            return self.fail(err).await;
        }
        self.submit(ProfilePayload::new(draft, image), SubmitMode::Create).await
    }

    /// Update the profile. Every field is optional here; required-field
    /// enforcement applies to creation only.
    pub async fn update(
        &self,
        draft: ProfileDraft,
        image: Option<ImageUpload>,
    ) -> ProfileState {
        self.submit(ProfilePayload::new(draft, image), SubmitMode::Update).await
    }

    /// Best-effort background fetch for the landing page.
    ///
    /// Failure degrades to "show nothing": every error is swallowed with a
    /// warning, no state transition happens and no logout is forced.
    pub async fn prefetch(&self) -> Option<Profile> {
        let token = self.session.token().await?;
        match self.gateway.fetch_profile(&token).await {
            Ok(profile) => profile,
            Err(err) => {
                warn!(error = %err, "background profile prefetch failed");
                None
            }
        }
    }

    async fn submit(&self, payload: ProfilePayload, mode: SubmitMode) -> ProfileState {
        if !self.begin(ProfileState::Submitting).await {
            return self.state().await;
        }

        let token = match self.token_or_expired().await {
            Ok(token) => token,
            Err(err) => return self.fail(err).await,
        };

        let result = match mode {
            SubmitMode::Create => self.gateway.create_profile(&token, &payload).await,
            SubmitMode::Update => self.gateway.update_profile(&token, &payload).await,
        };
        if let Err(err) = result {
            return self.fail(err).await;
        }

        info!("profile submitted, re-fetching server-computed fields");
        match self.gateway.fetch_profile(&token).await {
            Ok(Some(profile)) => self.transition(ProfileState::Loaded(profile)).await,
            Ok(None) => self.transition(ProfileState::NotFound).await,
            Err(err) => self.fail(err).await,
        }
    }

    /// Enter an in-flight state unless one is already active.
    async fn begin(&self, next: ProfileState) -> bool {
        let mut state = self.state.write().await;
        if matches!(*state, ProfileState::Loading | ProfileState::Submitting) {
            debug!("request already in flight, ignoring");
            return false;
        }
        *state = next;
        true
    }

    async fn transition(&self, next: ProfileState) -> ProfileState {
        *self.state.write().await = next.clone();
        next
    }

    async fn token_or_expired(&self) -> Result<String, CoreShiftError> {
        self.session.token().await.ok_or_else(|| CoreShiftError::SessionExpired {
            status: None,
            message: "Authentication required. Please login again.".into(),
        })
    }

    /// Record a failure; a dead session additionally forces a logout.
    async fn fail(&self, err: CoreShiftError) -> ProfileState {
        if err.is_session_expired() {
            warn!("session expired, forcing logout");
            if let Err(logout_err) = self.session.logout().await {
                warn!(error = %logout_err, "failed to clear expired session");
            }
        }
        self.transition(ProfileState::Failed(err)).await
    }
}

fn validate_create(draft: &ProfileDraft) -> Result<(), CoreShiftError> {
    if draft.designation.as_deref().map_or(true, |d| d.trim().is_empty()) {
        return Err(CoreShiftError::local_validation("Designation is required"));
    }
    if draft.gender.is_none() {
        return Err(CoreShiftError::local_validation("Please select your gender"));
    }
    Ok(())
}
