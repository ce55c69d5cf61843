//! Route definitions for the `/employees` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::employees;
use crate::state::AppState;

/// Routes mounted at `/employees`.
///
/// ```text
/// GET /{code}    -> get_employee (HR)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{code}", get(employees::get_employee))
}
