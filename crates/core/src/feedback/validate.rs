//! Local feedback validation
//!
//! Pure, no network. A rejection here means no request is ever issued.

use coreshift_domain::constants::{MAX_FEEDBACK_CHARS, MAX_RATING, MIN_FEEDBACK_CHARS, MIN_RATING};
use coreshift_domain::{CoreShiftError, Result};

/// Validate a rating/feedback pair before submission.
///
/// Returns the trimmed feedback text on success; the wire body always
/// carries the trimmed form.
///
/// # Errors
/// `LocalValidation` with a user-displayable message when:
/// - no rating was selected (below `MIN_RATING`)
/// - the rating is above `MAX_RATING`
/// - the trimmed text is empty, shorter than 10 or longer than 1000 chars
pub fn validate_feedback(rating: u8, feedback: &str) -> Result<String> {
    if rating < MIN_RATING {
        return Err(CoreShiftError::local_validation("Please select a rating"));
    }
    if rating > MAX_RATING {
        return Err(CoreShiftError::local_validation(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}"
        )));
    }

    let trimmed = feedback.trim();
    if trimmed.is_empty() {
        return Err(CoreShiftError::local_validation("Please provide your feedback"));
    }
    let chars = trimmed.chars().count();
    if chars < MIN_FEEDBACK_CHARS {
        return Err(CoreShiftError::local_validation(format!(
            "Feedback must be at least {MIN_FEEDBACK_CHARS} characters"
        )));
    }
    if chars > MAX_FEEDBACK_CHARS {
        return Err(CoreShiftError::local_validation(format!(
            "Feedback must be at most {MAX_FEEDBACK_CHARS} characters"
        )));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rating_is_rejected_with_rating_message() {
        let err = validate_feedback(0, "long enough feedback text").unwrap_err();
        assert!(err.display_message().to_lowercase().contains("rating"));
    }

    #[test]
    fn short_text_mentions_the_minimum() {
        let err = validate_feedback(3, "short").unwrap_err();
        assert!(err.display_message().contains("10 characters"));
    }

    #[test]
    fn whitespace_only_text_is_empty() {
        let err = validate_feedback(4, "   \n\t ").unwrap_err();
        assert_eq!(err.display_message(), "Please provide your feedback");
    }

    #[test]
    fn boundary_lengths() {
        // Exactly 10 chars passes, 9 fails.
        assert!(validate_feedback(5, "абвгдежзик").is_ok()); // counts chars, not bytes
        assert!(validate_feedback(5, "123456789").is_err());

        let long = "x".repeat(1000);
        assert!(validate_feedback(5, &long).is_ok());
        let too_long = "x".repeat(1001);
        assert!(validate_feedback(5, &too_long).is_err());
    }

    #[test]
    fn returns_trimmed_text() {
        let text = validate_feedback(4, "  Great onboarding experience overall  ").unwrap();
        assert_eq!(text, "Great onboarding experience overall");
    }

    #[test]
    fn out_of_range_rating_is_rejected() {
        let err = validate_feedback(6, "long enough feedback text").unwrap_err();
        assert!(err.display_message().contains("between 1 and 5"));
    }

    #[test]
    fn rating_bounds_follow_the_published_range() {
        assert!(validate_feedback(MIN_RATING - 1, "long enough feedback text").is_err());
        assert!(validate_feedback(MIN_RATING, "long enough feedback text").is_ok());
        assert!(validate_feedback(MAX_RATING, "long enough feedback text").is_ok());
        assert!(validate_feedback(MAX_RATING + 1, "long enough feedback text").is_err());
    }
}
