//! Integration tests for the transactional submission sink.

use assert_matches::assert_matches;
use chrono::{Duration, NaiveDate, Utc};
use sqlx::PgPool;
use exitsurvey_core::error::CoreError;
use exitsurvey_core::invite::generate_token;
use exitsurvey_core::questionnaire::AnswerField;
use exitsurvey_core::submission::{SubmissionError, SubmissionRecord, SubmissionSink};
use exitsurvey_db::models::employee::{CreateEmployee, EmployeeStatus};
use exitsurvey_db::models::invite_link::CreateInviteLink;
use exitsurvey_db::repositories::{EmployeeRepo, InviteLinkRepo, SurveyAnswerRepo};
use exitsurvey_db::submission_sink::PgSubmissionSink;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_employee(pool: &PgPool, code: &str) {
    EmployeeRepo::create(
        pool,
        &CreateEmployee {
            employee_code: code.to_string(),
            last_name: None,
            first_name: Some("Nomin".to_string()),
            company_name: None,
            department_name: None,
            position_name: None,
            hire_date: NaiveDate::from_ymd_opt(2021, 1, 15),
            status: None,
        },
    )
    .await
    .unwrap();
}

fn record(code: &str) -> SubmissionRecord {
    SubmissionRecord {
        employee_code: code.to_string(),
        first_name: Some("Nomin".to_string()),
        survey_type: "Abandoned post".to_string(),
        submitted_at: Utc::now(),
        answers: vec![(
            AnswerField::ReasonForLeaving,
            "Salary too low, Poor management".to_string(),
        )],
    }
}

async fn seed_link(pool: &PgPool, code: &str, expires_in: Duration) -> String {
    let (_, hash) = generate_token();
    InviteLinkRepo::create(
        pool,
        &CreateInviteLink {
            token_hash: hash.clone(),
            employee_code: code.to_string(),
            survey_type: "abandoned_post".to_string(),
            expires_at: Utc::now() + expires_in,
        },
    )
    .await
    .unwrap();
    hash
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_submit_writes_row_and_separates_employee(pool: PgPool) {
    seed_employee(&pool, "E1").await;
    let sink = PgSubmissionSink::new(pool.clone());

    let outcome = sink.submit(&record("E1"), None).await.unwrap();
    assert!(outcome.status_updated);

    let rows = SurveyAnswerRepo::list_by_employee(&pool, "E1").await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, outcome.answer_id);
    assert_eq!(rows[0].reason_for_leaving, "Salary too low, Poor management");
    assert_eq!(rows[0].survey_type, "Abandoned post");
    assert_eq!(rows[0].loyalty1, "");

    let e = EmployeeRepo::find_by_code(&pool, "E1").await.unwrap().unwrap();
    assert_eq!(e.status().unwrap(), EmployeeStatus::Separated);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_second_submit_does_not_flip_status_again(pool: PgPool) {
    seed_employee(&pool, "E2").await;
    let sink = PgSubmissionSink::new(pool.clone());

    let first = sink.submit(&record("E2"), None).await.unwrap();
    let second = sink.submit(&record("E2"), None).await.unwrap();

    assert!(first.status_updated);
    assert!(!second.status_updated);
    // Duplicate answer rows are still accepted.
    let rows = SurveyAnswerRepo::list_by_employee(&pool, "E2").await.unwrap();
    assert_eq!(rows.len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_submit_consumes_invite_link(pool: PgPool) {
    seed_employee(&pool, "E3").await;
    let hash = seed_link(&pool, "E3", Duration::days(14)).await;
    let sink = PgSubmissionSink::new(pool.clone());

    sink.submit(&record("E3"), Some(&hash)).await.unwrap();

    let link = InviteLinkRepo::find_by_token_hash(&pool, &hash)
        .await
        .unwrap()
        .unwrap();
    assert!(link.consumed_at.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_used_link_rolls_back_whole_submission(pool: PgPool) {
    seed_employee(&pool, "E4").await;
    let hash = seed_link(&pool, "E4", Duration::days(14)).await;
    InviteLinkRepo::consume(&pool, &hash).await.unwrap();
    let sink = PgSubmissionSink::new(pool.clone());

    let result = sink.submit(&record("E4"), Some(&hash)).await;
    assert_matches!(result, Err(SubmissionError::Core(CoreError::Conflict(_))));

    assert!(SurveyAnswerRepo::list_by_employee(&pool, "E4").await.unwrap().is_empty());
    let e = EmployeeRepo::find_by_code(&pool, "E4").await.unwrap().unwrap();
    assert!(e.is_active());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_expired_link_is_rejected(pool: PgPool) {
    seed_employee(&pool, "E5").await;
    let hash = seed_link(&pool, "E5", Duration::seconds(-1)).await;
    let sink = PgSubmissionSink::new(pool.clone());

    let result = sink.submit(&record("E5"), Some(&hash)).await;
    assert_matches!(result, Err(SubmissionError::Core(CoreError::Conflict(_))));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_store_failure_is_retryable(pool: PgPool) {
    seed_employee(&pool, "E6").await;
    let sink = PgSubmissionSink::new(pool.clone());
    pool.close().await;

    let result = sink.submit(&record("E6"), None).await;
    assert_matches!(result, Err(SubmissionError::Store(_)));
}
