//! Lesson completion input rules.
//!
//! Scores are clamped rather than rejected so a retried request from an
//! older client that reports 105% is still recorded. Durations are the
//! opposite: a negative value is always a caller bug and is rejected
//! before anything is written.

use serde::Deserialize;
use validator::Validate;

/// Lowest recordable lesson score.
pub const MIN_SCORE: i32 = 0;
/// Highest recordable lesson score.
pub const MAX_SCORE: i32 = 100;

/// Optional measurements accepted when recording a lesson completion.
#[derive(Debug, Clone, Copy, Default, Deserialize, Validate)]
pub struct CompletionInput {
    /// Raw score as reported by the client. Clamped into
    /// [`MIN_SCORE`]..=[`MAX_SCORE`] before storage.
    pub score: Option<i32>,
    /// Seconds the user spent on the lesson.
    #[validate(range(min = 0, message = "time_spent_seconds must be non-negative"))]
    pub time_spent_seconds: Option<i32>,
}

/// Clamp a reported score into the recordable range. A missing score is
/// recorded as zero.
pub fn clamp_score(score: Option<i32>) -> i32 {
    score.unwrap_or(MIN_SCORE).clamp(MIN_SCORE, MAX_SCORE)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::error::{validate_input, CoreError};

    #[test]
    fn in_range_score_is_kept() {
        assert_eq!(clamp_score(Some(0)), 0);
        assert_eq!(clamp_score(Some(73)), 73);
        assert_eq!(clamp_score(Some(100)), 100);
    }

    #[test]
    fn out_of_range_score_is_clamped() {
        assert_eq!(clamp_score(Some(-5)), 0);
        assert_eq!(clamp_score(Some(105)), 100);
    }

    #[test]
    fn missing_score_defaults_to_zero() {
        assert_eq!(clamp_score(None), 0);
    }

    #[test]
    fn negative_time_spent_is_rejected() {
        let input = CompletionInput {
            score: Some(80),
            time_spent_seconds: Some(-1),
        };
        assert_matches!(validate_input(&input), Err(CoreError::Validation(_)));
    }

    #[test]
    fn zero_and_missing_time_spent_pass() {
        assert!(validate_input(&CompletionInput {
            score: None,
            time_spent_seconds: Some(0),
        })
        .is_ok());
        assert!(validate_input(&CompletionInput::default()).is_ok());
    }
}
