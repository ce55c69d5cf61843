//! Transactional submission sink backed by PostgreSQL.

use async_trait::async_trait;
use exitsurvey_core::error::CoreError;
use exitsurvey_core::submission::{
    SubmissionError, SubmissionOutcome, SubmissionRecord, SubmissionSink,
};

use crate::repositories::{EmployeeRepo, InviteLinkRepo, SurveyAnswerRepo};
use crate::DbPool;

/// Writes a submission in one transaction:
///
/// 1. consume the invite link, when the session came from one
/// 2. insert the answer row
/// 3. flip the employee to `separated` if still `active`
///
/// Any failure rolls back all three.
#[derive(Clone)]
pub struct PgSubmissionSink {
    pool: DbPool,
}

impl PgSubmissionSink {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionSink for PgSubmissionSink {
    async fn submit(
        &self,
        record: &SubmissionRecord,
        invite_token_hash: Option<&str>,
    ) -> Result<SubmissionOutcome, SubmissionError> {
        let mut tx = self.pool.begin().await.map_err(store_error)?;

        if let Some(hash) = invite_token_hash {
            let consumed = InviteLinkRepo::consume(&mut *tx, hash)
                .await
                .map_err(store_error)?;
            if consumed == 0 {
                return Err(CoreError::Conflict(
                    "This survey link has already been used or has expired".to_string(),
                )
                .into());
            }
        }

        let row = SurveyAnswerRepo::insert(&mut *tx, record)
            .await
            .map_err(store_error)?;
        let updated = EmployeeRepo::mark_separated(&mut *tx, &record.employee_code)
            .await
            .map_err(store_error)?;

        tx.commit().await.map_err(store_error)?;

        if updated == 0 {
            tracing::warn!(
                employee_code = %record.employee_code,
                answer_id = row.id,
                "Survey stored for an employee who was not active; status left unchanged"
            );
        }
        tracing::info!(
            employee_code = %record.employee_code,
            answer_id = row.id,
            survey_type = %record.survey_type,
            status_updated = updated > 0,
            "Survey submission written"
        );

        Ok(SubmissionOutcome {
            answer_id: row.id,
            status_updated: updated > 0,
        })
    }
}

fn store_error(err: sqlx::Error) -> SubmissionError {
    tracing::error!(error = %err, "Survey submission write failed");
    SubmissionError::Store(err.to_string())
}
