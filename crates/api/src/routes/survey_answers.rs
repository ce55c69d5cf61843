//! Route definitions for the `/survey-answers` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::survey_answers;
use crate::state::AppState;

/// Routes mounted at `/survey-answers`.
///
/// ```text
/// GET /    -> list_answers (HR; ?survey_type, employee_code, limit, offset)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(survey_answers::list_answers))
}
