//! HTTP-level tests for invite links and link-based session bootstrap.

mod common;

use axum::http::StatusCode;
use axum::Router;
use chrono::{Duration, Utc};
use common::{body_json, post_empty, post_json, post_json_auth, put_json, PUBLIC_BASE_URL};
use exitsurvey_core::invite::generate_token;
use exitsurvey_db::models::invite_link::CreateInviteLink;
use exitsurvey_db::repositories::{EmployeeRepo, InviteLinkRepo, SurveyAnswerRepo};
use serde_json::{json, Value};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_link(app: &Router, code: &str, category: &str) -> Value {
    let token = common::hr_token(app.clone()).await;
    let response = post_json_auth(
        app.clone(),
        "/api/v1/invite-links",
        json!({ "employee_code": code, "category": category }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

async fn open_link(app: &Router, token: &str) -> axum::response::Response {
    post_empty(
        app.clone(),
        &format!("/api/v1/survey-sessions/link?mode=link&token={token}"),
    )
    .await
}

/// Open a one-question link session, answer it and submit.
async fn submit_via_link(app: &Router, token: &str) -> StatusCode {
    let response = open_link(app, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();
    submit_session(app, &id).await
}

async fn submit_session(app: &Router, id: &str) -> StatusCode {
    let response = post_empty(app.clone(), &format!("/api/v1/survey-sessions/{id}/begin")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = put_json(
        app.clone(),
        &format!("/api/v1/survey-sessions/{id}/answer"),
        json!({ "value": ["Heavy workload"] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    post_empty(app.clone(), &format!("/api/v1/survey-sessions/{id}/advance"))
        .await
        .status()
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_requires_hr_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/invite-links",
        json!({ "employee_code": "E1", "category": "employee_initiated" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_returns_token_url_and_variant(pool: PgPool) {
    common::seed_employee(&pool, "L100", "Gerel", Some(100)).await;
    let app = common::build_test_app(pool.clone());

    let link = create_link(&app, "L100", "employee_initiated").await;
    let token = link["token"].as_str().unwrap();
    assert_eq!(
        link["url"],
        format!("{PUBLIC_BASE_URL}?mode=link&token={token}")
    );
    assert_eq!(link["employee_code"], "L100");
    assert_eq!(link["variant"]["code"], "up_to_6mo");
    assert!(link["expires_at"].is_string());

    // Only the hash is stored.
    let stored = InviteLinkRepo::find_by_token_hash(&pool, token).await.unwrap();
    assert!(stored.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_for_unknown_employee_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = common::hr_token(app.clone()).await;
    let response = post_json_auth(
        app,
        "/api/v1/invite-links",
        json!({ "employee_code": "MISSING", "category": "employee_initiated" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_for_separated_employee_is_409(pool: PgPool) {
    common::seed_employee(&pool, "L101", "Gerel", Some(100)).await;
    EmployeeRepo::mark_separated(&pool, "L101").await.unwrap();
    let app = common::build_test_app(pool);
    let token = common::hr_token(app.clone()).await;
    let response = post_json_auth(
        app,
        "/api/v1/invite-links",
        json!({ "employee_code": "L101", "category": "abandoned_post" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Bootstrap
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn link_opens_confirmed_session_at_intro(pool: PgPool) {
    common::seed_employee(&pool, "L200", "Gerel", Some(1500)).await;
    let app = common::build_test_app(pool);
    let link = create_link(&app, "L200", "employee_initiated").await;

    let response = open_link(&app, link["token"].as_str().unwrap()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let view = body_json(response).await["data"].clone();
    assert_eq!(view["step"]["kind"], "intro");
    assert_eq!(view["variant"]["code"], "4_to_10yr");
    assert_eq!(view["employee"]["employee_code"], "L200");
    assert_eq!(view["category"], "employee_initiated");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn link_requires_mode_and_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_empty(app.clone(), "/api/v1/survey-sessions/link?mode=survey&token=abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_empty(app.clone(), "/api/v1/survey-sessions/link?mode=link&token=").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_empty(app, "/api/v1/survey-sessions/link?mode=link&token=unknown").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn expired_link_is_409(pool: PgPool) {
    common::seed_employee(&pool, "L300", "Gerel", Some(100)).await;
    let (token, token_hash) = generate_token();
    InviteLinkRepo::create(
        &pool,
        &CreateInviteLink {
            token_hash,
            employee_code: "L300".to_string(),
            survey_type: "up_to_6mo".to_string(),
            expires_at: Utc::now() - Duration::hours(1),
        },
    )
    .await
    .unwrap();
    let app = common::build_test_app(pool);

    let response = open_link(&app, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert!(body_json(response).await["error"]
        .as_str()
        .unwrap()
        .contains("expired"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn link_is_consumed_by_successful_submission(pool: PgPool) {
    common::seed_employee(&pool, "L400", "Gerel", Some(30)).await;
    let app = common::build_test_app(pool.clone());
    let link = create_link(&app, "L400", "abandoned_post").await;
    let token = link["token"].as_str().unwrap();

    assert_eq!(submit_via_link(&app, token).await, StatusCode::OK);

    let response = open_link(&app, token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert!(body_json(response).await["error"]
        .as_str()
        .unwrap()
        .contains("already been used"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn parallel_sessions_from_one_link_submit_once(pool: PgPool) {
    common::seed_employee(&pool, "L500", "Gerel", Some(30)).await;
    let app = common::build_test_app(pool.clone());
    let link = create_link(&app, "L500", "abandoned_post").await;
    let token = link["token"].as_str().unwrap();

    let mut ids = Vec::new();
    for _ in 0..2 {
        let response = open_link(&app, token).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        ids.push(
            body_json(response).await["data"]["id"]
                .as_str()
                .unwrap()
                .to_string(),
        );
    }

    assert_eq!(submit_session(&app, &ids[0]).await, StatusCode::OK);
    assert_eq!(submit_session(&app, &ids[1]).await, StatusCode::CONFLICT);

    let rows = SurveyAnswerRepo::list_by_employee(&pool, "L500").await.unwrap();
    assert_eq!(rows.len(), 1);
}
