//! Submitted survey answer rows.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use exitsurvey_core::types::{DbId, Timestamp};

/// A row from the `survey_answers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SurveyAnswer {
    pub id: DbId,
    pub employee_code: String,
    pub first_name: Option<String>,
    pub survey_type: String,
    pub submitted_at: Timestamp,
    pub reason_for_leaving: String,
    pub alignment_with_daily_tasks: String,
    pub unexpected_responsibilities: String,
    pub onboarding_effectiveness: String,
    pub company_culture: String,
    pub atmosphere: String,
    pub conflict_resolution: String,
    pub feedback: String,
    pub leadership_style: String,
    pub team_collaboration: String,
    pub team_support: String,
    pub motivation: String,
    pub motivation_other: String,
    pub engagement: String,
    pub engagement_other: String,
    pub well_being: String,
    pub performance_compensation: String,
    pub value_of_benefits: String,
    pub kpi_accuracy: String,
    pub career_growth: String,
    pub traning_quality: String,
    pub loyalty1: String,
    pub loyalty1_other: String,
    pub loyalty2: String,
    pub loyalty2_other: String,
    pub created_at: Timestamp,
}

/// Filter and pagination for listing answers (`?survey_type=&employee_code=&limit=&offset=`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SurveyAnswerQuery {
    pub survey_type: Option<String>,
    pub employee_code: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
