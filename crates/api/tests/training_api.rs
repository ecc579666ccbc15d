//! Integration tests for the training endpoints: period lifecycle, day
//! recording, and the derived completion status.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

use forma_db::models::schema::CreateTrainingSchema;
use forma_db::models::user::CreateUser;
use forma_db::repositories::{SchemaProgressRepo, SchemaRepo, UserRepo};

async fn seed_user(pool: &PgPool) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            email: "member@example.com".to_string(),
            display_name: "Member".to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_schema(pool: &PgPool, name: &str) -> i64 {
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

// ---------------------------------------------------------------------------
// POST /training/periods
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn starting_a_second_period_leaves_one_active(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let strength = seed_schema(&pool, "Strength").await;
    let endurance = seed_schema(&pool, "Endurance").await;

    let app = common::build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/v1/training/periods",
        json!({ "user_id": user_id, "schema_id": strength, "started_on": "2024-01-01" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(
        app.clone(),
        "/api/v1/training/periods",
        json!({ "user_id": user_id, "schema_id": endurance, "started_on": "2024-03-01" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get(app, &format!("/api/v1/training/periods?user_id={user_id}")).await;
    let body = body_json(response).await;
    let periods = body["data"].as_array().unwrap();
    assert_eq!(periods.len(), 2);

    // status_id 1 = active, 2 = completed.
    let active: Vec<_> = periods.iter().filter(|p| p["status_id"] == 1).collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0]["schema_id"], endurance);

    let closed: Vec<_> = periods.iter().filter(|p| p["status_id"] == 2).collect();
    assert_eq!(closed.len(), 1);
    assert!(!closed[0]["closed_at"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn starting_a_period_for_unknown_schema_returns_404(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/training/periods",
        json!({ "user_id": user_id, "schema_id": 9999, "started_on": "2024-01-01" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// GET /training/schemas/{id}/status
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn weeks_completed_derives_from_days_and_frequency(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let schema_id = seed_schema(&pool, "Strength").await;

    let app = common::build_test_app(pool.clone());

    let response = put_json(
        app.clone(),
        &format!("/api/v1/users/{user_id}/training-profile"),
        json!({ "training_frequency": 3 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    for _ in 0..23 {
        SchemaProgressRepo::record_day(&pool, user_id, schema_id)
            .await
            .unwrap();
    }

    let uri = format!("/api/v1/training/schemas/{schema_id}/status?user_id={user_id}");
    let response = get(app.clone(), &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["total_days_completed"], 23);
    assert_eq!(body["data"]["weeks_completed"], 7);
    assert_eq!(body["data"]["is_completed"], false);

    // One more day crosses the eight-week threshold: auto-completed on
    // read, with no completion record written.
    SchemaProgressRepo::record_day(&pool, user_id, schema_id)
        .await
        .unwrap();

    let response = get(app, &uri).await;
    let body = body_json(response).await;
    assert_eq!(body["data"]["weeks_completed"], 8);
    assert_eq!(body["data"]["is_completed"], true);
    assert!(body["data"]["completed_at"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn explicit_completion_overrides_the_arithmetic(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let schema_id = seed_schema(&pool, "Strength").await;

    let app = common::build_test_app(pool.clone());

    for _ in 0..5 {
        SchemaProgressRepo::record_day(&pool, user_id, schema_id)
            .await
            .unwrap();
    }

    let response = post_json(
        app.clone(),
        &format!("/api/v1/training/schemas/{schema_id}/complete"),
        json!({ "user_id": user_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Default frequency (7) would put 5 days at zero weeks, but the
    // explicit completion pins the report to the full program.
    let response = get(
        app,
        &format!("/api/v1/training/schemas/{schema_id}/status?user_id={user_id}"),
    )
    .await;
    let body = body_json(response).await;
    assert_eq!(body["data"]["total_days_completed"], 5);
    assert_eq!(body["data"]["weeks_completed"], 8);
    assert_eq!(body["data"]["is_completed"], true);
    assert!(!body["data"]["completed_at"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn status_without_any_progress_reads_as_zero(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let schema_id = seed_schema(&pool, "Strength").await;
    let app = common::build_test_app(pool);

    let response = get(
        app,
        &format!("/api/v1/training/schemas/{schema_id}/status?user_id={user_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["total_days_completed"], 0);
    assert_eq!(body["data"]["weeks_completed"], 0);
    assert_eq!(body["data"]["is_completed"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn status_for_unknown_schema_returns_404(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let app = common::build_test_app(pool);

    let response = get(
        app,
        &format!("/api/v1/training/schemas/9999/status?user_id={user_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// POST /training/schemas/{id}/days/complete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn recording_days_increments_counters(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let schema_id = seed_schema(&pool, "Strength").await;
    let app = common::build_test_app(pool);

    let uri = format!("/api/v1/training/schemas/{schema_id}/days/complete");

    let response = post_json(app.clone(), &uri, json!({ "user_id": user_id })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["days_completed"], 1);
    assert_eq!(body["data"]["current_day"], 2);

    let response = post_json(app, &uri, json!({ "user_id": user_id })).await;
    let body = body_json(response).await;
    assert_eq!(body["data"]["days_completed"], 2);
    assert_eq!(body["data"]["current_day"], 3);
}

// ---------------------------------------------------------------------------
// PUT /users/{user_id}/training-profile
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn out_of_range_frequency_is_rejected(pool: PgPool) {
    let user_id = seed_user(&pool).await;
    let app = common::build_test_app(pool);

    let response = put_json(
        app,
        &format!("/api/v1/users/{user_id}/training-profile"),
        json!({ "training_frequency": 0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}
