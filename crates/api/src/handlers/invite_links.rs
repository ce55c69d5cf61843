//! HR creation of single-use survey invite links.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use exitsurvey_core::error::CoreError;
use exitsurvey_core::invite::{build_link, expires_at, generate_token};
use exitsurvey_core::types::Timestamp;
use exitsurvey_core::variant::{select_variant, Category};
use exitsurvey_db::models::invite_link::CreateInviteLink;
use exitsurvey_db::repositories::{EmployeeRepo, InviteLinkRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::variants::VariantInfo;
use crate::middleware::rbac::RequireHr;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /invite-links`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateInviteLinkRequest {
    #[validate(length(min = 1, max = 50))]
    pub employee_code: String,
    #[validate(length(min = 1))]
    pub category: String,
}

/// The plaintext token is returned here once and never stored.
#[derive(Debug, Serialize)]
pub struct InviteLinkCreated {
    pub token: String,
    pub url: String,
    pub employee_code: String,
    pub variant: VariantInfo,
    pub expires_at: Timestamp,
}

// ---------------------------------------------------------------------------
// POST /invite-links
// ---------------------------------------------------------------------------

/// Pre-compute the variant for an active employee and issue a link to it.
pub async fn create_invite_link(
    State(state): State<AppState>,
    RequireHr(user): RequireHr,
    Json(input): Json<CreateInviteLinkRequest>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let category = Category::from_code(input.category.trim())?;
    let code = input.employee_code.trim();

    let employee = EmployeeRepo::find_by_code(&state.pool, code)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Employee", code)))?;
    if !employee.is_active() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Employee '{code}' is no longer active"
        ))));
    }

    let now = Utc::now();
    let variant = select_variant(category, employee.tenure_months(now.date_naive()));
    let (token, token_hash) = generate_token();

    let link = InviteLinkRepo::create(
        &state.pool,
        &CreateInviteLink {
            token_hash,
            employee_code: employee.employee_code.clone(),
            survey_type: variant.code().to_string(),
            expires_at: expires_at(now, state.config.invite_link_ttl_days),
        },
    )
    .await?;

    tracing::info!(
        link_id = link.id,
        employee_code = %link.employee_code,
        variant = variant.code(),
        created_by = %user.username,
        "Invite link created"
    );

    let url = build_link(&state.config.public_base_url, &token);
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: InviteLinkCreated {
                token,
                url,
                employee_code: link.employee_code,
                variant: variant.into(),
                expires_at: link.expires_at,
            },
        }),
    ))
}
