pub mod auth;
pub mod employees;
pub mod health;
pub mod invite_links;
pub mod survey_answers;
pub mod survey_session;
pub mod variants;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      login (public)
///
/// /survey-sessions                                 create (HR)
/// /survey-sessions/link?mode=link&token=           open from invite link
/// /survey-sessions/{id}                            get, delete (logout)
/// /survey-sessions/{id}/confirm                    identity confirmation
/// /survey-sessions/{id}/begin                      intro -> question 1
/// /survey-sessions/{id}/answer                     record answer (PUT)
/// /survey-sessions/{id}/advance                    next step or submit
/// /survey-sessions/{id}/back                       previous step
///
/// /employees/{code}                                lookup with tenure (HR)
///
/// /invite-links                                    create (HR)
///
/// /survey-answers                                  results table (HR)
///
/// /variants                                        variant catalogue
/// /variants/{code}/questions                       ordered questions
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/survey-sessions", survey_session::router())
        .nest("/employees", employees::router())
        .nest("/invite-links", invite_links::router())
        .nest("/survey-answers", survey_answers::router())
        .nest("/variants", variants::router())
}
