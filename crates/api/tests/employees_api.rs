//! HTTP-level tests for the HR employee lookup.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn lookup_returns_tenure_and_variants(pool: PgPool) {
    common::seed_employee(&pool, "M100", "Solongo", Some(800)).await;
    let app = common::build_test_app(pool);
    let token = common::hr_token(app.clone()).await;

    let response = get_auth(app, "/api/v1/employees/M100", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = body_json(response).await["data"].clone();
    assert_eq!(data["employee_code"], "M100");
    assert_eq!(data["status"], "active");
    // 800 days: 26 months, 2 years and 2 months.
    assert_eq!(data["tenure_months"], 26);
    assert_eq!(data["tenure_display"], "2 yr 2 mo");

    let variants = data["variants"].as_array().unwrap();
    assert_eq!(variants.len(), 3);
    assert_eq!(variants[0]["category"], "company_initiated");
    assert_eq!(variants[0]["variant"]["code"], "over_1yr");
    assert_eq!(variants[1]["variant"]["code"], "7mo_to_3yr");
    assert_eq!(variants[2]["variant"]["code"], "abandoned_post");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_hire_date_is_zero_tenure(pool: PgPool) {
    common::seed_employee(&pool, "M101", "Solongo", None).await;
    let app = common::build_test_app(pool);
    let token = common::hr_token(app.clone()).await;

    let response = get_auth(app, "/api/v1/employees/M101", &token).await;
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["tenure_months"], 0);
    assert_eq!(data["variants"][1]["variant"]["code"], "up_to_6mo");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn lookup_requires_hr_and_existing_code(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/api/v1/employees/M404").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let token = common::hr_token(app.clone()).await;
    let response = get_auth(app, "/api/v1/employees/M404", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
