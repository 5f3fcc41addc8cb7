//! # CoreShift Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The session store (token/user lifecycle and persistence contract)
//! - The error classifier (HTTP response -> typed error taxonomy)
//! - Auth, profile and feedback controllers
//! - Port/adapter interfaces (traits)
//!
//! ## Architecture Principles
//! - Only depends on `coreshift-domain`
//! - No HTTP or filesystem code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod auth;
pub mod classify;
pub mod feedback;
pub mod profile;
pub mod session;

// Re-export commonly used items
pub use auth::{AuthGateway, AuthService};
pub use feedback::{validate_feedback, FeedbackController, FeedbackGateway, FeedbackState};
pub use profile::{ProfileController, ProfileGateway, ProfileState};
pub use session::{SessionPersistence, SessionStore};
