//! Domain type definitions
//!
//! Wire-facing types use `camelCase` field names because that is what the
//! CoreShift backend speaks; the testimonial envelope is the lone exception,
//! where `rating_used` stays snake_case.

pub mod account;
pub mod feedback;
pub mod profile;
pub mod session;

pub use account::{LoginResponse, RegisterRequest};
pub use feedback::{NewFeedback, Testimonial, TestimonialPage};
pub use profile::{Gender, ImageUpload, Profile, ProfileDraft, ProfilePayload};
pub use session::{Session, User};
