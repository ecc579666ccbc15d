//! User onboarding entity model.

use serde::Serialize;
use sqlx::FromRow;

use forma_core::onboarding::MilestoneSet;
use forma_core::types::{DbId, Timestamp};

/// A row from the `user_onboarding` table.
///
/// Holds the six persisted milestone booleans and the sticky `completed`
/// flag. The current step is not a column; it is derived from the
/// milestones on every read.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserOnboarding {
    pub id: DbId,
    pub user_id: DbId,
    pub welcome_video_watched: bool,
    pub goal_set: bool,
    pub challenges_selected: bool,
    pub schema_selected: bool,
    pub nutrition_plan_selected: bool,
    pub forum_intro_done: bool,
    pub completed: bool,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl UserOnboarding {
    /// View of the milestone columns as the core milestone set.
    pub fn milestones(&self) -> MilestoneSet {
        MilestoneSet {
            welcome_video_watched: self.welcome_video_watched,
            goal_set: self.goal_set,
            challenges_selected: self.challenges_selected,
            schema_selected: self.schema_selected,
            nutrition_plan_selected: self.nutrition_plan_selected,
            forum_intro_done: self.forum_intro_done,
        }
    }
}
