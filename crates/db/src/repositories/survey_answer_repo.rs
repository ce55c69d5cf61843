//! Repository for the `survey_answers` table.

use sqlx::{PgExecutor, PgPool};
use exitsurvey_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use exitsurvey_core::questionnaire::AnswerField;
use exitsurvey_core::submission::SubmissionRecord;

use crate::models::survey_answer::{SurveyAnswer, SurveyAnswerQuery};

/// Column list for `survey_answers` queries.
const COLUMNS: &str = "id, employee_code, first_name, survey_type, submitted_at, \
     reason_for_leaving, alignment_with_daily_tasks, unexpected_responsibilities, \
     onboarding_effectiveness, company_culture, atmosphere, conflict_resolution, \
     feedback, leadership_style, team_collaboration, team_support, motivation, \
     motivation_other, engagement, engagement_other, well_being, \
     performance_compensation, value_of_benefits, kpi_accuracy, career_growth, \
     traning_quality, loyalty1, loyalty1_other, loyalty2, loyalty2_other, created_at";

/// Shared filter for list and count. Binds `$1` survey_type, `$2` employee_code.
const FILTER: &str = "WHERE ($1::TEXT IS NULL OR survey_type = $1) \
       AND ($2::TEXT IS NULL OR employee_code = $2)";

pub struct SurveyAnswerRepo;

impl SurveyAnswerRepo {
    /// Insert one submitted survey.
    ///
    /// Only the fields present in the record are written; every other answer
    /// column keeps its empty default.
    pub async fn insert<'e>(
        executor: impl PgExecutor<'e>,
        record: &SubmissionRecord,
    ) -> Result<SurveyAnswer, sqlx::Error> {
        let query = build_insert(&record.answers);
        let mut q = sqlx::query_as::<_, SurveyAnswer>(&query)
            .bind(&record.employee_code)
            .bind(&record.first_name)
            .bind(&record.survey_type)
            .bind(record.submitted_at);
        for (_, value) in &record.answers {
            q = q.bind(value);
        }
        q.fetch_one(executor).await
    }

    /// List answers newest first.
    pub async fn list(
        pool: &PgPool,
        params: &SurveyAnswerQuery,
    ) -> Result<Vec<SurveyAnswer>, sqlx::Error> {
        let limit = clamp_limit(params.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
        let offset = clamp_offset(params.offset);
        let query = format!(
            "SELECT {COLUMNS} FROM survey_answers {FILTER} \
             ORDER BY submitted_at DESC, id DESC \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, SurveyAnswer>(&query)
            .bind(&params.survey_type)
            .bind(&params.employee_code)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count answers matching the list filter (ignores pagination).
    pub async fn count(pool: &PgPool, params: &SurveyAnswerQuery) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*)::BIGINT FROM survey_answers {FILTER}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(&params.survey_type)
            .bind(&params.employee_code)
            .fetch_one(pool)
            .await
    }

    /// All answers for one employee, newest first.
    pub async fn list_by_employee(
        pool: &PgPool,
        employee_code: &str,
    ) -> Result<Vec<SurveyAnswer>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM survey_answers \
             WHERE employee_code = $1 \
             ORDER BY submitted_at DESC, id DESC"
        );
        sqlx::query_as::<_, SurveyAnswer>(&query)
            .bind(employee_code)
            .fetch_all(pool)
            .await
    }
}

/// Build the INSERT for the given answer columns.
///
/// Column names come from [`AnswerField::column`], never from input, so the
/// statement only ever contains bound values.
fn build_insert(answers: &[(AnswerField, String)]) -> String {
    let mut columns = String::from("employee_code, first_name, survey_type, submitted_at");
    let mut values = String::from("$1, $2, $3, $4");
    for (i, (field, _)) in answers.iter().enumerate() {
        columns.push_str(", ");
        columns.push_str(field.column());
        values.push_str(&format!(", ${}", i + 5));
    }
    format!("INSERT INTO survey_answers ({columns}) VALUES ({values}) RETURNING {COLUMNS}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_without_answers_binds_header_only() {
        let sql = build_insert(&[]);
        assert!(sql.starts_with(
            "INSERT INTO survey_answers (employee_code, first_name, survey_type, submitted_at) \
             VALUES ($1, $2, $3, $4)"
        ));
    }

    #[test]
    fn insert_numbers_answer_placeholders_after_header() {
        let sql = build_insert(&[
            (AnswerField::ReasonForLeaving, "Retiring".into()),
            (AnswerField::Loyalty2Other, String::new()),
        ]);
        assert!(sql.contains("submitted_at, reason_for_leaving, loyalty2_other)"));
        assert!(sql.contains("VALUES ($1, $2, $3, $4, $5, $6)"));
        assert!(!sql.contains("Retiring"));
    }
}
