//! Route definitions for the question catalogue.

use axum::routing::get;
use axum::Router;

use crate::handlers::variants;
use crate::state::AppState;

/// Routes mounted at `/variants`.
///
/// ```text
/// GET /                    -> list_variants
/// GET /{code}/questions    -> list_questions
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(variants::list_variants))
        .route("/{code}/questions", get(variants::list_questions))
}
