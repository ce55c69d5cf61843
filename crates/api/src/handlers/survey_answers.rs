//! HR results table.

use axum::extract::{Query, State};
use axum::Json;
use exitsurvey_db::models::survey_answer::{SurveyAnswer, SurveyAnswerQuery};
use exitsurvey_db::repositories::SurveyAnswerRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireHr;
use crate::response::ListResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /survey-answers
// ---------------------------------------------------------------------------

/// Submitted answer rows, newest first, with the total matching count.
pub async fn list_answers(
    State(state): State<AppState>,
    RequireHr(_user): RequireHr,
    Query(params): Query<SurveyAnswerQuery>,
) -> AppResult<Json<ListResponse<SurveyAnswer>>> {
    let data = SurveyAnswerRepo::list(&state.pool, &params).await?;
    let total = SurveyAnswerRepo::count(&state.pool, &params).await?;
    Ok(Json(ListResponse { data, total }))
}
