//! HR lookup of the employee directory.

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use exitsurvey_core::error::CoreError;
use exitsurvey_core::tenure::format_tenure;
use exitsurvey_core::variant::{select_variant, Category, ALL_CATEGORIES};
use exitsurvey_db::models::employee::Employee;
use exitsurvey_db::repositories::EmployeeRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::variants::VariantInfo;
use crate::middleware::rbac::RequireHr;
use crate::response::DataResponse;
use crate::state::AppState;

/// The variant a category would select for this employee today.
#[derive(Debug, Serialize)]
pub struct CategoryVariant {
    pub category: Category,
    pub variant: VariantInfo,
}

/// Directory entry plus derived tenure and survey routing.
#[derive(Debug, Serialize)]
pub struct EmployeeView {
    #[serde(flatten)]
    pub employee: Employee,
    pub tenure_months: u32,
    pub tenure_display: String,
    pub variants: Vec<CategoryVariant>,
}

// ---------------------------------------------------------------------------
// GET /employees/{code}
// ---------------------------------------------------------------------------

pub async fn get_employee(
    State(state): State<AppState>,
    RequireHr(_user): RequireHr,
    Path(code): Path<String>,
) -> AppResult<Json<DataResponse<EmployeeView>>> {
    let employee = EmployeeRepo::find_by_code(&state.pool, &code)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Employee", &code)))?;

    let today = Utc::now().date_naive();
    let tenure_months = employee.tenure_months(today);
    let variants = ALL_CATEGORIES
        .into_iter()
        .map(|category| CategoryVariant {
            category,
            variant: select_variant(category, tenure_months).into(),
        })
        .collect();

    Ok(Json(DataResponse {
        data: EmployeeView {
            tenure_display: format_tenure(employee.hire_date, today),
            employee,
            tenure_months,
            variants,
        },
    }))
}
