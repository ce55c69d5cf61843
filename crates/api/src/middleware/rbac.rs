//! Role check extractors wrapping [`AuthUser`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use exitsurvey_core::error::CoreError;

use super::auth::AuthUser;
use crate::auth::ROLE_HR;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `hr` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn hr_only(RequireHr(user): RequireHr) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireHr(pub AuthUser);

impl FromRequestParts<AppState> for RequireHr {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_HR {
            return Err(AppError::Core(CoreError::Forbidden(
                "HR role required".into(),
            )));
        }
        Ok(RequireHr(user))
    }
}
