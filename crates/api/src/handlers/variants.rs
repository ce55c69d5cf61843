//! Read-only question catalogue.
//!
//! Front ends use these to pre-render a variant's steps; nothing here touches
//! the database.

use axum::extract::Path;
use axum::Json;
use exitsurvey_core::error::CoreError;
use exitsurvey_core::questionnaire::{self, QuestionSpec};
use exitsurvey_core::variant::{Category, Variant, ALL_VARIANTS};
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;

/// Variant summary embedded in session, employee and catalogue responses.
#[derive(Debug, Clone, Serialize)]
pub struct VariantInfo {
    pub code: &'static str,
    pub label: &'static str,
    pub category: Category,
    pub total_steps: u8,
}

impl From<Variant> for VariantInfo {
    fn from(v: Variant) -> Self {
        Self {
            code: v.code(),
            label: v.label(),
            category: v.category(),
            total_steps: questionnaire::total_steps(v),
        }
    }
}

/// A question with its 1-based step number.
#[derive(Debug, Serialize)]
pub struct NumberedQuestion {
    pub step: u8,
    #[serde(flatten)]
    pub question: &'static QuestionSpec,
}

#[derive(Debug, Serialize)]
pub struct VariantQuestions {
    pub variant: VariantInfo,
    pub questions: Vec<NumberedQuestion>,
}

// ---------------------------------------------------------------------------
// GET /variants
// ---------------------------------------------------------------------------

pub async fn list_variants() -> Json<DataResponse<Vec<VariantInfo>>> {
    let data = ALL_VARIANTS.into_iter().map(VariantInfo::from).collect();
    Json(DataResponse { data })
}

// ---------------------------------------------------------------------------
// GET /variants/{code}/questions
// ---------------------------------------------------------------------------

/// Ordered questions for one variant. Unknown codes are 404.
pub async fn list_questions(
    Path(code): Path<String>,
) -> AppResult<Json<DataResponse<VariantQuestions>>> {
    let variant =
        Variant::from_code(&code).map_err(|_| CoreError::not_found("SurveyVariant", &code))?;

    let questions = (1..=questionnaire::total_steps(variant))
        .map(|step| {
            questionnaire::question_definition_for(variant, step)
                .map(|question| NumberedQuestion { step, question })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(DataResponse {
        data: VariantQuestions {
            variant: variant.into(),
            questions,
        },
    }))
}
