//! Handlers for survey sessions: the exit-survey wizard over HTTP.
//!
//! A session is created by HR staff (or opened from an invite link), then
//! driven by the respondent through confirm, begin, answer/advance/back until
//! the final advance writes the answers through the submission sink. The
//! session id is the respondent's capability; only creation needs an HR token.

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use exitsurvey_core::answers::AnswerInput;
use exitsurvey_core::error::CoreError;
use exitsurvey_core::invite::{check_usable, hash_token, LinkParams};
use exitsurvey_core::questionnaire::{self, AnswerField, QuestionSpec};
use exitsurvey_core::submission::{submit_session, SubmissionOutcome};
use exitsurvey_core::variant::{Category, Variant};
use exitsurvey_core::wizard::{Advanced, ConfirmedEmployee, Progress, Step, SurveySession};
use exitsurvey_db::repositories::{EmployeeRepo, InviteLinkRepo};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::variants::VariantInfo;
use crate::middleware::rbac::RequireHr;
use crate::response::DataResponse;
use crate::session_store::SharedSession;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /survey-sessions`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSessionRequest {
    #[validate(length(min = 1))]
    pub category: String,
}

/// Request body for `POST /survey-sessions/{id}/confirm`.
///
/// `first_name`, when given and not blank, must match the directory entry
/// as well.
#[derive(Debug, Deserialize, Validate)]
pub struct ConfirmRequest {
    #[validate(length(min = 1, max = 50))]
    pub employee_code: String,
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
}

/// Everything a front end needs to render the current screen.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub category: Category,
    pub step: Step,
    pub step_label: &'static str,
    pub variant: Option<VariantInfo>,
    pub progress: Progress,
    /// The open question, only while on a question step.
    pub question: Option<&'static QuestionSpec>,
    pub employee: Option<ConfirmedEmployee>,
    /// Answers recorded so far, keyed by field name. Empty `*_Other`
    /// explanations are left out.
    pub answers: BTreeMap<AnswerField, String>,
}

impl SessionView {
    fn new(id: Uuid, session: &SurveySession) -> Self {
        let answers: BTreeMap<AnswerField, String> = session
            .variant
            .map(|v| {
                session
                    .answers
                    .snapshot(v)
                    .into_iter()
                    .filter(|(field, value)| {
                        session.answers.get(*field).is_some()
                            && (questionnaire::question(*field).is_some() || !value.is_empty())
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            id,
            category: session.category,
            step: session.step,
            step_label: session.step.label(),
            variant: session.variant.map(VariantInfo::from),
            progress: session.progress(),
            question: session.current_question(),
            employee: session.employee.clone(),
            answers,
        }
    }
}

/// Response of `POST /survey-sessions/{id}/advance`.
///
/// `submission` is present only when this advance wrote the answers.
#[derive(Debug, Serialize)]
pub struct AdvanceResponse {
    #[serde(flatten)]
    pub session: SessionView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission: Option<SubmissionOutcome>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a live session, or 404 if it never existed or has expired.
async fn load_session(state: &AppState, id: Uuid) -> AppResult<SharedSession> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::Core(CoreError::not_found("SurveySession", id)))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// POST /survey-sessions
// ---------------------------------------------------------------------------

/// Open a new session at the identity confirmation step.
pub async fn create_session(
    State(state): State<AppState>,
    RequireHr(user): RequireHr,
    Json(input): Json<CreateSessionRequest>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let category = Category::from_code(input.category.trim())?;

    let (id, shared) = state.sessions.insert(SurveySession::new(category)).await;
    let view = SessionView::new(id, &*shared.lock().await);

    tracing::info!(
        session_id = %id,
        category = category.code(),
        created_by = %user.username,
        "Survey session created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: view })))
}

// ---------------------------------------------------------------------------
// POST /survey-sessions/link?mode=link&token=...
// ---------------------------------------------------------------------------

/// Open a session from an invite link, already confirmed and at the intro.
pub async fn create_from_link(
    State(state): State<AppState>,
    Query(params): Query<LinkParams>,
) -> AppResult<impl IntoResponse> {
    let token = params.token()?;
    let token_hash = hash_token(token);

    let link = InviteLinkRepo::find_by_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("SurveyInviteLink", token)))?;
    check_usable(link.consumed_at, link.expires_at, Utc::now())?;

    let variant = Variant::from_code(&link.survey_type).map_err(|e| {
        AppError::InternalError(format!("Invite link {} has a bad variant: {e}", link.id))
    })?;

    let employee = EmployeeRepo::find_by_code(&state.pool, &link.employee_code)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Employee", &link.employee_code)))?;
    if !employee.is_active() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Employee '{}' is no longer active",
            employee.employee_code
        ))));
    }

    let confirmed = employee.to_confirmed(Utc::now().date_naive());
    let session = SurveySession::from_invite(confirmed, variant, token_hash);
    let (id, shared) = state.sessions.insert(session).await;
    let view = SessionView::new(id, &*shared.lock().await);

    tracing::info!(
        session_id = %id,
        link_id = link.id,
        employee_code = %link.employee_code,
        variant = variant.code(),
        "Survey session opened from invite link"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: view })))
}

// ---------------------------------------------------------------------------
// GET /survey-sessions/{id}
// ---------------------------------------------------------------------------

pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DataResponse<SessionView>>> {
    let shared = load_session(&state, id).await?;
    let session = shared.lock().await;
    Ok(Json(DataResponse {
        data: SessionView::new(id, &session),
    }))
}

// ---------------------------------------------------------------------------
// POST /survey-sessions/{id}/confirm
// ---------------------------------------------------------------------------

/// Identity confirmation. On a miss the session stays where it was.
pub async fn confirm(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<ConfirmRequest>,
) -> AppResult<Json<DataResponse<SessionView>>> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let shared = load_session(&state, id).await?;
    let mut session = shared.lock().await;
    if session.step != Step::Confirm {
        return Err(AppError::Core(CoreError::Validation(
            "The employee has already been confirmed".into(),
        )));
    }

    let code = input.employee_code.trim();
    let first_name = non_empty(input.first_name.as_deref());
    let employee = EmployeeRepo::find_active_for_confirmation(&state.pool, code, first_name)
        .await?
        .ok_or_else(|| {
            tracing::info!(session_id = %id, employee_code = %code, "Identity confirmation failed");
            AppError::Core(CoreError::not_found("Employee", code))
        })?;

    let confirmed = employee.to_confirmed(Utc::now().date_naive());
    let tenure_months = confirmed.tenure_months;
    let variant = session.confirm(confirmed)?;

    tracing::info!(
        session_id = %id,
        employee_code = %code,
        tenure_months,
        variant = variant.code(),
        "Employee confirmed"
    );

    Ok(Json(DataResponse {
        data: SessionView::new(id, &session),
    }))
}

// ---------------------------------------------------------------------------
// POST /survey-sessions/{id}/begin
// ---------------------------------------------------------------------------

pub async fn begin(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DataResponse<SessionView>>> {
    let shared = load_session(&state, id).await?;
    let mut session = shared.lock().await;
    session.begin()?;

    tracing::info!(session_id = %id, "Survey started");

    Ok(Json(DataResponse {
        data: SessionView::new(id, &session),
    }))
}

// ---------------------------------------------------------------------------
// PUT /survey-sessions/{id}/answer
// ---------------------------------------------------------------------------

/// Record (or overwrite) the answer to the open question.
pub async fn answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<AnswerInput>,
) -> AppResult<Json<DataResponse<SessionView>>> {
    let shared = load_session(&state, id).await?;
    let mut session = shared.lock().await;
    session.answer(&input)?;

    tracing::debug!(session_id = %id, step = ?session.step, "Answer recorded");

    Ok(Json(DataResponse {
        data: SessionView::new(id, &session),
    }))
}

// ---------------------------------------------------------------------------
// POST /survey-sessions/{id}/advance
// ---------------------------------------------------------------------------

/// Move to the next question, or submit from the last one.
///
/// A failed write leaves the session on the last question with its answers,
/// so the same request can be retried.
pub async fn advance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DataResponse<AdvanceResponse>>> {
    let shared = load_session(&state, id).await?;
    let mut session = shared.lock().await;

    let submission = match session.advance()? {
        Advanced::Moved(step) => {
            tracing::info!(session_id = %id, step = ?step, "Survey step advanced");
            None
        }
        Advanced::ReadyToSubmit => {
            let outcome = submit_session(state.sink.as_ref(), &mut *session, Utc::now()).await?;
            tracing::info!(
                session_id = %id,
                answer_id = outcome.answer_id,
                status_updated = outcome.status_updated,
                "Survey submitted"
            );
            Some(outcome)
        }
    };

    Ok(Json(DataResponse {
        data: AdvanceResponse {
            session: SessionView::new(id, &session),
            submission,
        },
    }))
}

// ---------------------------------------------------------------------------
// POST /survey-sessions/{id}/back
// ---------------------------------------------------------------------------

pub async fn back(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DataResponse<SessionView>>> {
    let shared = load_session(&state, id).await?;
    let mut session = shared.lock().await;
    let step = session.back()?;

    tracing::info!(session_id = %id, step = ?step, "Survey step went back");

    Ok(Json(DataResponse {
        data: SessionView::new(id, &session),
    }))
}

// ---------------------------------------------------------------------------
// DELETE /survey-sessions/{id}
// ---------------------------------------------------------------------------

/// Logout: drop the session and everything recorded in it.
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    if !state.sessions.remove(id).await {
        return Err(AppError::Core(CoreError::not_found("SurveySession", id)));
    }
    tracing::info!(session_id = %id, "Survey session closed");
    Ok(StatusCode::NO_CONTENT)
}
