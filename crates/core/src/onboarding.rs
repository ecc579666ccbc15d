//! Onboarding milestone definitions and step derivation.
//!
//! The onboarding sequence is a fixed ordered set of steps, each gated by a
//! named boolean milestone. The current step is never stored; it is a pure
//! function of the milestone set and the caller-supplied capability flags,
//! recomputed on every read. Milestones are sticky: once true they stay
//! true, which makes the derived step monotonically non-decreasing.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Milestone keys
// ---------------------------------------------------------------------------

/// The user watched the welcome video (step 1).
pub const MILESTONE_WELCOME_VIDEO_WATCHED: &str = "welcome_video_watched";
/// The user picked a primary goal (step 2).
pub const MILESTONE_GOAL_SET: &str = "goal_set";
/// The user selected challenges to join (step 3).
pub const MILESTONE_CHALLENGES_SELECTED: &str = "challenges_selected";
/// The user selected a training schema (step 4, training packages only).
pub const MILESTONE_SCHEMA_SELECTED: &str = "schema_selected";
/// The user selected a nutrition plan (step 5, nutrition packages only).
pub const MILESTONE_NUTRITION_PLAN_SELECTED: &str = "nutrition_plan_selected";
/// The user posted their forum introduction (step 6).
pub const MILESTONE_FORUM_INTRO_DONE: &str = "forum_intro_done";

/// All valid milestone keys, in step order.
pub const VALID_MILESTONES: &[&str] = &[
    MILESTONE_WELCOME_VIDEO_WATCHED,
    MILESTONE_GOAL_SET,
    MILESTONE_CHALLENGES_SELECTED,
    MILESTONE_SCHEMA_SELECTED,
    MILESTONE_NUTRITION_PLAN_SELECTED,
    MILESTONE_FORUM_INTRO_DONE,
];

/// Last step of the sequence; the forum introduction gate.
pub const FINAL_STEP: i16 = 6;

/// Resolve a milestone key to its canonical static name (which is also the
/// storage column), rejecting unknown keys.
///
/// Returning the `'static` str from the known list is what lets the
/// repository layer interpolate the column name without ever touching a
/// caller-supplied string.
pub fn milestone_column(key: &str) -> Result<&'static str, CoreError> {
    VALID_MILESTONES
        .iter()
        .find(|&&m| m == key)
        .copied()
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "Invalid milestone '{key}'. Must be one of: {VALID_MILESTONES:?}"
            ))
        })
}

// ---------------------------------------------------------------------------
// Milestone set and capability flags
// ---------------------------------------------------------------------------

/// The six persisted milestone booleans for one user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneSet {
    pub welcome_video_watched: bool,
    pub goal_set: bool,
    pub challenges_selected: bool,
    pub schema_selected: bool,
    pub nutrition_plan_selected: bool,
    pub forum_intro_done: bool,
}

/// Entitlement-derived capability flags, supplied by the caller on every
/// evaluation. This engine never computes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub has_training_access: bool,
    pub has_nutrition_access: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            has_training_access: true,
            has_nutrition_access: true,
        }
    }
}

/// The steps of the sequence: (step number, milestone satisfied, required
/// under the given capabilities). Steps 4 and 5 drop out of the sequence
/// entirely when the matching capability is absent.
fn step_table(m: &MilestoneSet, caps: Capabilities) -> [(i16, bool, bool); 6] {
    [
        (1, m.welcome_video_watched, true),
        (2, m.goal_set, true),
        (3, m.challenges_selected, true),
        (4, m.schema_selected, caps.has_training_access),
        (5, m.nutrition_plan_selected, caps.has_nutrition_access),
        (6, m.forum_intro_done, true),
    ]
}

/// Derive the current step from the milestone set.
///
/// Returns 0 while no required milestone is satisfied (not started),
/// otherwise the first step in order whose required milestone is still
/// unsatisfied. When every required milestone is satisfied the final step
/// is reported; [`is_complete`] distinguishes "at the forum gate" from
/// "done".
pub fn derive_step(m: &MilestoneSet, caps: Capabilities) -> i16 {
    let steps = step_table(m, caps);

    if !steps.iter().any(|&(_, done, required)| required && done) {
        return 0;
    }

    for (step, done, required) in steps {
        if required && !done {
            return step;
        }
    }

    FINAL_STEP
}

/// Whether every milestone required under the given capabilities is
/// satisfied.
pub fn is_complete(m: &MilestoneSet, caps: Capabilities) -> bool {
    step_table(m, caps)
        .iter()
        .all(|&(_, done, required)| done || !required)
}

// ---------------------------------------------------------------------------
// Guidance
// ---------------------------------------------------------------------------

/// Short instruction shown to the user for the current step. Presentation
/// metadata only; nothing transitions on it.
pub fn guidance(step: i16, completed: bool) -> &'static str {
    if completed {
        return "You're all set. Explore the academy at your own pace.";
    }
    match step {
        0 | 1 => "Watch the welcome video to get started.",
        2 => "Set your primary goal so we can tailor your program.",
        3 => "Pick one or more challenges to join.",
        4 => "Select the training schema that fits your level.",
        5 => "Choose a nutrition plan.",
        _ => "Introduce yourself on the community forum.",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
