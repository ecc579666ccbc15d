//! Integration tests for training period and progress persistence:
//! - Single-active-period invariant on period switches
//! - Day counter increments and the completion freeze
//! - Idempotent explicit completion
//! - Training profile upsert

use chrono::NaiveDate;
use sqlx::PgPool;

use forma_db::models::schema::CreateTrainingSchema;
use forma_db::models::status::PeriodStatus;
use forma_db::models::user::CreateUser;
use forma_db::repositories::{
    SchemaPeriodRepo, SchemaProgressRepo, SchemaRepo, TrainingProfileRepo, UserRepo,
};

async fn new_user(pool: &PgPool, email: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            display_name: "Test User".to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

async fn new_schema(pool: &PgPool, name: &str) -> i64 {
    SchemaRepo::create(
        pool,
        &CreateTrainingSchema {
            name: name.to_string(),
            description: None,
            weeks: None,
        },
    )
    .await
    .unwrap()
    .id
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ---------------------------------------------------------------------------
// Periods
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_starting_a_period_closes_the_previous_one(pool: PgPool) {
    let user_id = new_user(&pool, "a@example.com").await;
    let strength = new_schema(&pool, "Strength").await;
    let endurance = new_schema(&pool, "Endurance").await;

    let first = SchemaPeriodRepo::start(&pool, user_id, strength, date(2024, 1, 1))
        .await
        .unwrap();
    assert_eq!(first.status_id, PeriodStatus::Active.id());

    let second = SchemaPeriodRepo::start(&pool, user_id, endurance, date(2024, 3, 1))
        .await
        .unwrap();
    assert_eq!(second.status_id, PeriodStatus::Active.id());

    // Exactly one active period remains: the most recent.
    let active = SchemaPeriodRepo::find_active(&pool, user_id)
        .await
        .unwrap()
        .expect("an active period should exist");
    assert_eq!(active.id, second.id);
    assert_eq!(active.schema_id, endurance);

    let periods = SchemaPeriodRepo::list_for_user(&pool, user_id).await.unwrap();
    assert_eq!(periods.len(), 2);
    let closed = periods.iter().find(|p| p.id == first.id).unwrap();
    assert_eq!(closed.status_id, PeriodStatus::Completed.id());
    assert!(closed.closed_at.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_periods_are_per_user(pool: PgPool) {
    let alice = new_user(&pool, "alice@example.com").await;
    let bob = new_user(&pool, "bob@example.com").await;
    let schema = new_schema(&pool, "Strength").await;

    SchemaPeriodRepo::start(&pool, alice, schema, date(2024, 1, 1))
        .await
        .unwrap();

    // Bob starting a period must not close Alice's.
    SchemaPeriodRepo::start(&pool, bob, schema, date(2024, 1, 2))
        .await
        .unwrap();

    let alice_active = SchemaPeriodRepo::find_active(&pool, alice).await.unwrap();
    assert!(alice_active.is_some());
}

// ---------------------------------------------------------------------------
// Progress counters
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_record_day_creates_then_increments(pool: PgPool) {
    let user_id = new_user(&pool, "a@example.com").await;
    let schema = new_schema(&pool, "Strength").await;

    let first = SchemaProgressRepo::record_day(&pool, user_id, schema)
        .await
        .unwrap();
    assert_eq!(first.days_completed, 1);
    assert_eq!(first.current_day, 2);

    let second = SchemaProgressRepo::record_day(&pool, user_id, schema)
        .await
        .unwrap();
    assert_eq!(second.days_completed, 2);
    assert_eq!(second.current_day, 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_record_day_after_completion_is_a_noop(pool: PgPool) {
    let user_id = new_user(&pool, "a@example.com").await;
    let schema = new_schema(&pool, "Strength").await;

    SchemaProgressRepo::record_day(&pool, user_id, schema)
        .await
        .unwrap();
    SchemaProgressRepo::mark_completed(&pool, user_id, schema)
        .await
        .unwrap();

    let frozen = SchemaProgressRepo::record_day(&pool, user_id, schema)
        .await
        .unwrap();
    assert_eq!(frozen.days_completed, 1);
    assert_eq!(frozen.current_day, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mark_completed_keeps_first_timestamp(pool: PgPool) {
    let user_id = new_user(&pool, "a@example.com").await;
    let schema = new_schema(&pool, "Strength").await;

    let first = SchemaProgressRepo::mark_completed(&pool, user_id, schema)
        .await
        .unwrap();
    let completed_at = first.completed_at.expect("completed_at should be set");

    let second = SchemaProgressRepo::mark_completed(&pool, user_id, schema)
        .await
        .unwrap();
    assert_eq!(second.completed_at, Some(completed_at));
    // No day was ever recorded; the explicit event stands alone.
    assert_eq!(second.days_completed, 0);
}

// ---------------------------------------------------------------------------
// Training profile
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_profile_upsert(pool: PgPool) {
    let user_id = new_user(&pool, "a@example.com").await;

    assert!(TrainingProfileRepo::find(&pool, user_id)
        .await
        .unwrap()
        .is_none());

    let created = TrainingProfileRepo::upsert(&pool, user_id, 3).await.unwrap();
    assert_eq!(created.training_frequency, 3);

    let updated = TrainingProfileRepo::upsert(&pool, user_id, 5).await.unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.training_frequency, 5);
}
