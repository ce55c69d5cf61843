#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::NaiveDate;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use exitsurvey_api::auth::jwt::JwtConfig;
use exitsurvey_api::auth::password::hash_password;
use exitsurvey_api::config::{HrUser, ServerConfig};
use exitsurvey_api::router::build_app_router;
use exitsurvey_api::session_store::SessionStore;
use exitsurvey_api::state::AppState;
use exitsurvey_core::submission::{
    SubmissionError, SubmissionOutcome, SubmissionRecord, SubmissionSink,
};
use exitsurvey_db::models::employee::{CreateEmployee, Employee};
use exitsurvey_db::repositories::EmployeeRepo;
use exitsurvey_db::submission_sink::PgSubmissionSink;

pub const HR_USERNAME: &str = "hr.officer";
pub const HR_PASSWORD: &str = "exit-survey-pass";
pub const PUBLIC_BASE_URL: &str = "https://survey.test/";

/// Build a test `ServerConfig` with safe defaults and one HR account.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "exit-survey-integration-secret".to_string(),
            access_token_expiry_mins: 60,
        },
        hr_users: vec![HrUser {
            username: HR_USERNAME.to_string(),
            password_hash: hash_password(HR_PASSWORD).expect("hashing should succeed"),
        }],
        public_base_url: PUBLIC_BASE_URL.to_string(),
        session_idle_timeout_secs: 3600,
        invite_link_ttl_days: 14,
    }
}

/// Build the full application router, writing submissions to the database.
pub fn build_test_app(pool: PgPool) -> Router {
    let sink = Arc::new(PgSubmissionSink::new(pool.clone()));
    build_test_app_with_sink(pool, sink)
}

/// Build the full application router with a custom submission sink.
pub fn build_test_app_with_sink(pool: PgPool, sink: Arc<dyn SubmissionSink>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        sessions: Arc::new(SessionStore::new(Duration::from_secs(
            config.session_idle_timeout_secs,
        ))),
        sink,
    };
    build_app_router(state, &config)
}

/// Database sink that can be switched into failure mode.
pub struct FlakySink {
    pub inner: PgSubmissionSink,
    pub failing: AtomicBool,
}

impl FlakySink {
    pub fn new(pool: PgPool) -> Self {
        Self {
            inner: PgSubmissionSink::new(pool),
            failing: AtomicBool::new(true),
        }
    }

    pub fn recover(&self) {
        self.failing.store(false, Ordering::SeqCst);
    }
}

#[async_trait]
impl SubmissionSink for FlakySink {
    async fn submit(
        &self,
        record: &SubmissionRecord,
        invite_token_hash: Option<&str>,
    ) -> Result<SubmissionOutcome, SubmissionError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(SubmissionError::Store("simulated outage".into()));
        }
        self.inner.submit(record, invite_token_hash).await
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    token: Option<&str>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, None, Some(token)).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(body), None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::POST, uri, Some(body), Some(token)).await
}

pub async fn post_empty(app: Router, uri: &str) -> Response {
    send(app, Method::POST, uri, None, None).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Some(body), None).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None, None).await
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Log in as the configured HR account and return the access token.
pub async fn hr_token(app: Router) -> String {
    let body = serde_json::json!({ "username": HR_USERNAME, "password": HR_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["access_token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Insert an active employee hired `days_ago` days before today.
pub async fn seed_employee(
    pool: &PgPool,
    code: &str,
    first_name: &str,
    days_ago: Option<i64>,
) -> Employee {
    let today = chrono::Utc::now().date_naive();
    let hire_date: Option<NaiveDate> = days_ago.map(|d| today - chrono::Duration::days(d));
    EmployeeRepo::create(
        pool,
        &CreateEmployee {
            employee_code: code.to_string(),
            last_name: Some("Tester".to_string()),
            first_name: Some(first_name.to_string()),
            company_name: Some("Acme LLC".to_string()),
            department_name: Some("Operations".to_string()),
            position_name: Some("Analyst".to_string()),
            hire_date,
            status: None,
        },
    )
    .await
    .expect("employee creation should succeed")
}
