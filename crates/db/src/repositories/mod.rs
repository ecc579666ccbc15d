//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Progression facts are written
//! with `INSERT .. ON CONFLICT` so retried requests are no-ops.

pub mod event_repo;
pub mod legacy_progress_repo;
pub mod lesson_completion_repo;
pub mod lesson_repo;
pub mod module_progress_repo;
pub mod module_repo;
pub mod onboarding_repo;
pub mod schema_period_repo;
pub mod schema_progress_repo;
pub mod schema_repo;
pub mod training_profile_repo;
pub mod user_repo;

pub use event_repo::EventRepo;
pub use legacy_progress_repo::LegacyProgressRepo;
pub use lesson_completion_repo::LessonCompletionRepo;
pub use lesson_repo::LessonRepo;
pub use module_progress_repo::ModuleProgressRepo;
pub use module_repo::ModuleRepo;
pub use onboarding_repo::OnboardingRepo;
pub use schema_period_repo::SchemaPeriodRepo;
pub use schema_progress_repo::SchemaProgressRepo;
pub use schema_repo::SchemaRepo;
pub use training_profile_repo::TrainingProfileRepo;
pub use user_repo::UserRepo;
