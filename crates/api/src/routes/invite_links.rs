//! Route definitions for the `/invite-links` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::invite_links;
use crate::state::AppState;

/// Routes mounted at `/invite-links`.
///
/// ```text
/// POST /    -> create_invite_link (HR)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(invite_links::create_invite_link))
}
