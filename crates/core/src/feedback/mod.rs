//! Feedback submission workflow and testimonial listing

pub mod controller;
pub mod ports;
pub mod validate;

pub use controller::{FeedbackController, FeedbackState};
pub use ports::FeedbackGateway;
pub use validate::validate_feedback;
