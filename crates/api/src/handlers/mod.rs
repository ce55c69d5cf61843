//! Request handlers.
//!
//! Each submodule serves one resource. Handlers delegate persistence to the
//! repositories in `exitsurvey_db`, wizard rules to `exitsurvey_core`, and
//! map errors via [`AppError`](crate::error::AppError).

pub mod auth;
pub mod employees;
pub mod invite_links;
pub mod survey_answers;
pub mod survey_session;
pub mod variants;
