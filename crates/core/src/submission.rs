//! Submission record building and the sink seam.
//!
//! [`submit_session`] is the only way a session reaches a sink: it refuses to
//! call the sink while any question step is unanswered, and on a store
//! failure leaves the session (and its answers) untouched so the respondent
//! can retry.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::CoreError;
use crate::questionnaire::AnswerField;
use crate::types::{DbId, Timestamp};
use crate::wizard::{Step, SurveySession};

/// One persisted answer row, ready to write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionRecord {
    pub employee_code: String,
    pub first_name: Option<String>,
    /// Human label stored in the `survey_type` column.
    pub survey_type: String,
    pub submitted_at: Timestamp,
    /// Every field of the variant, unvisited ones empty.
    pub answers: Vec<(AnswerField, String)>,
}

/// What a successful write did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubmissionOutcome {
    pub answer_id: DbId,
    /// `false` when the employee was already separated.
    pub status_updated: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("Survey is incomplete: {0}")]
    Incomplete(String),

    #[error("Could not save the survey: {0}")]
    Store(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Persists a completed survey.
///
/// Implementations write the answer row and flip the employee from active to
/// separated as one unit; the status change must be a no-op for an employee
/// who is no longer active. When `invite_token_hash` is given the matching
/// invite link is consumed in the same unit.
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    async fn submit(
        &self,
        record: &SubmissionRecord,
        invite_token_hash: Option<&str>,
    ) -> Result<SubmissionOutcome, SubmissionError>;
}

/// Build the record for a session whose every question step is answered.
pub fn prepare_submission(
    session: &SurveySession,
    now: Timestamp,
) -> Result<SubmissionRecord, SubmissionError> {
    let (Some(employee), Some(variant)) = (&session.employee, session.variant) else {
        return Err(SubmissionError::Incomplete(
            "employee has not been confirmed".to_string(),
        ));
    };
    if let Some(field) = session.first_unanswered() {
        return Err(SubmissionError::Incomplete(format!("{field} has no answer")));
    }

    Ok(SubmissionRecord {
        employee_code: employee.employee_code.clone(),
        first_name: employee.first_name.clone(),
        survey_type: variant.submission_label().to_string(),
        submitted_at: now,
        answers: session.answers.snapshot(variant),
    })
}

/// Submit a session through `sink` and mark it submitted on success.
pub async fn submit_session(
    sink: &dyn SubmissionSink,
    session: &mut SurveySession,
    now: Timestamp,
) -> Result<SubmissionOutcome, SubmissionError> {
    if session.step == Step::Submitted {
        return Err(CoreError::Conflict("This survey has already been submitted".to_string()).into());
    }
    let record = prepare_submission(session, now)?;
    let outcome = sink
        .submit(&record, session.invite_token_hash.as_deref())
        .await?;
    session.mark_submitted()?;
    Ok(outcome)
}
