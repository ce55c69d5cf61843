use std::sync::Arc;

use exitsurvey_core::submission::SubmissionSink;

use crate::config::ServerConfig;
use crate::session_store::SessionStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone; everything inside is a pool handle or behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub pool: exitsurvey_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// In-memory survey sessions.
    pub sessions: Arc<SessionStore>,
    /// Where completed surveys are written.
    pub sink: Arc<dyn SubmissionSink>,
}
