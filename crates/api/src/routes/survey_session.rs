//! Route definitions for survey sessions.
//!
//! Mounted at `/survey-sessions` by `api_routes()`.
//!
//! ```text
//! POST   /                          create_session (HR)
//! POST   /link?mode=link&token=     create_from_link
//! GET    /{id}                      get_session
//! DELETE /{id}                      delete_session
//! POST   /{id}/confirm              confirm
//! POST   /{id}/begin                begin
//! PUT    /{id}/answer               answer
//! POST   /{id}/advance              advance (submits from the last step)
//! POST   /{id}/back                 back
//! ```

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::survey_session;
use crate::state::AppState;

/// Survey session routes -- mounted at `/survey-sessions`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(survey_session::create_session))
        .route("/link", post(survey_session::create_from_link))
        .route(
            "/{id}",
            get(survey_session::get_session).delete(survey_session::delete_session),
        )
        .route("/{id}/confirm", post(survey_session::confirm))
        .route("/{id}/begin", post(survey_session::begin))
        .route("/{id}/answer", put(survey_session::answer))
        .route("/{id}/advance", post(survey_session::advance))
        .route("/{id}/back", post(survey_session::back))
}
