//! Survey invite-link rows.

use serde::Serialize;
use sqlx::FromRow;
use exitsurvey_core::types::{DbId, Timestamp};

/// A row from the `survey_invite_links` table.
///
/// `survey_type` holds the variant code chosen when the link was created.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InviteLink {
    pub id: DbId,
    #[serde(skip_serializing)]
    pub token_hash: String,
    pub employee_code: String,
    pub survey_type: String,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub consumed_at: Option<Timestamp>,
}

/// DTO for inserting an invite link.
#[derive(Debug, Clone)]
pub struct CreateInviteLink {
    pub token_hash: String,
    pub employee_code: String,
    pub survey_type: String,
    pub expires_at: Timestamp,
}
