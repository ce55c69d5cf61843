//! Integration tests for listing submitted answers.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use exitsurvey_core::questionnaire::AnswerField;
use exitsurvey_core::submission::SubmissionRecord;
use exitsurvey_db::models::survey_answer::SurveyAnswerQuery;
use exitsurvey_db::repositories::SurveyAnswerRepo;

async fn insert(pool: &PgPool, code: &str, survey_type: &str, minutes_ago: i64) -> i64 {
    let record = SubmissionRecord {
        employee_code: code.to_string(),
        first_name: None,
        survey_type: survey_type.to_string(),
        submitted_at: Utc::now() - Duration::minutes(minutes_ago),
        answers: vec![
            (AnswerField::ReasonForLeaving, "Retiring".to_string()),
            (AnswerField::Feedback, "Yes".to_string()),
        ],
    };
    SurveyAnswerRepo::insert(pool, &record).await.unwrap().id
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_is_newest_first(pool: PgPool) {
    let old = insert(&pool, "A", "Over 1 year", 30).await;
    let new = insert(&pool, "B", "Over 1 year", 1).await;

    let rows = SurveyAnswerRepo::list(&pool, &SurveyAnswerQuery::default())
        .await
        .unwrap();
    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![new, old]);
    assert_eq!(rows[0].feedback, "Yes");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_filters_apply_to_list_and_count(pool: PgPool) {
    insert(&pool, "A", "Over 1 year", 3).await;
    insert(&pool, "A", "Abandoned post", 2).await;
    insert(&pool, "B", "Over 1 year", 1).await;

    let by_type = SurveyAnswerQuery {
        survey_type: Some("Over 1 year".to_string()),
        ..Default::default()
    };
    assert_eq!(SurveyAnswerRepo::list(&pool, &by_type).await.unwrap().len(), 2);
    assert_eq!(SurveyAnswerRepo::count(&pool, &by_type).await.unwrap(), 2);

    let by_both = SurveyAnswerQuery {
        survey_type: Some("Over 1 year".to_string()),
        employee_code: Some("A".to_string()),
        ..Default::default()
    };
    assert_eq!(SurveyAnswerRepo::count(&pool, &by_both).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_pagination_does_not_change_count(pool: PgPool) {
    for i in 0..5 {
        insert(&pool, "C", "Up to 1 year", i).await;
    }
    let page = SurveyAnswerQuery {
        limit: Some(2),
        offset: Some(4),
        ..Default::default()
    };
    assert_eq!(SurveyAnswerRepo::list(&pool, &page).await.unwrap().len(), 1);
    assert_eq!(SurveyAnswerRepo::count(&pool, &page).await.unwrap(), 5);
}
