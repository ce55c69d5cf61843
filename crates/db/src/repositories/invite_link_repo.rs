//! Repository for the `survey_invite_links` table.

use sqlx::{PgExecutor, PgPool};

use crate::models::invite_link::{CreateInviteLink, InviteLink};

/// Column list for `survey_invite_links` queries.
const COLUMNS: &str =
    "id, token_hash, employee_code, survey_type, created_at, expires_at, consumed_at";

pub struct InviteLinkRepo;

impl InviteLinkRepo {
    pub async fn create(pool: &PgPool, input: &CreateInviteLink) -> Result<InviteLink, sqlx::Error> {
        let query = format!(
            "INSERT INTO survey_invite_links (token_hash, employee_code, survey_type, expires_at) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, InviteLink>(&query)
            .bind(&input.token_hash)
            .bind(&input.employee_code)
            .bind(&input.survey_type)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_token_hash(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<InviteLink>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM survey_invite_links WHERE token_hash = $1");
        sqlx::query_as::<_, InviteLink>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Mark a link consumed if it is still unused and unexpired.
    ///
    /// Returns the number of rows changed; 0 means the link was already
    /// consumed, has expired, or does not exist.
    pub async fn consume<'e>(
        executor: impl PgExecutor<'e>,
        token_hash: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE survey_invite_links SET consumed_at = NOW() \
             WHERE token_hash = $1 AND consumed_at IS NULL AND expires_at > NOW()",
        )
        .bind(token_hash)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }
}
