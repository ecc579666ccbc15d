//! Training-week arithmetic and schema completion derivation.
//!
//! A schema is followed for a nominal eight weeks. Completed weeks are
//! derived from the accumulated completed-day count and the user's weekly
//! training frequency; an explicitly recorded completion always wins over
//! the derived estimate, because a high-frequency user can finish in fewer
//! calendar weeks than the division suggests.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::Timestamp;

/// Week count at which a schema counts as finished.
pub const COMPLETION_WEEKS: i32 = 8;

/// Weekly training frequency assumed when a user has no profile.
pub const DEFAULT_TRAINING_FREQUENCY: i32 = 7;

/// Per-user training configuration input.
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct ProfileInput {
    /// Training days per week.
    #[validate(range(min = 1, max = 7, message = "training_frequency must be 1..=7"))]
    pub training_frequency: i32,
}

/// Derived completion state for one (user, schema) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompletionStatus {
    pub total_days_completed: i32,
    pub weeks_completed: i32,
    pub completed_at: Option<Timestamp>,
    pub is_completed: bool,
}

/// Resolve the frequency to divide by: configured value if present,
/// otherwise [`DEFAULT_TRAINING_FREQUENCY`], always floored at 1.
pub fn effective_frequency(configured: Option<i32>) -> i32 {
    configured.unwrap_or(DEFAULT_TRAINING_FREQUENCY).max(1)
}

/// Derive the completion state from the stored counters.
///
/// `weeks_completed` is `days / frequency`, except that an explicit
/// completion pins it to [`COMPLETION_WEEKS`]. `is_completed` is true on
/// either signal: an explicit completion record, or the derived week count
/// crossing the threshold (auto-completion).
pub fn completion_status(
    days_completed: i32,
    frequency: Option<i32>,
    completed_at: Option<Timestamp>,
) -> CompletionStatus {
    let weeks_completed = if completed_at.is_some() {
        COMPLETION_WEEKS
    } else {
        days_completed / effective_frequency(frequency)
    };

    CompletionStatus {
        total_days_completed: days_completed,
        weeks_completed,
        completed_at,
        is_completed: completed_at.is_some() || weeks_completed >= COMPLETION_WEEKS,
    }
}
