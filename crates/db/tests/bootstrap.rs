use sqlx::PgPool;

/// Connect, migrate, verify the three tables exist and start empty.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    exitsurvey_db::health_check(&pool).await.unwrap();

    for table in ["employees", "survey_answers", "survey_invite_links"] {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// Every answer field has a column of the same name.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_answer_columns_match_fields(pool: PgPool) {
    let columns: Vec<String> = sqlx::query_scalar(
        "SELECT column_name::TEXT FROM information_schema.columns \
         WHERE table_name = 'survey_answers'",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for field in exitsurvey_core::questionnaire::AnswerField::ALL {
        assert!(
            columns.iter().any(|c| c == field.column()),
            "missing column {}",
            field.column()
        );
    }
}
