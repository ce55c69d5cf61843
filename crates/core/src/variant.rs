//! Separation categories, survey variants, and the branch selector.
//!
//! The category says who initiated the separation; together with tenure it
//! picks exactly one [`Variant`], which in turn fixes the question sequence
//! for the rest of the session.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Who initiated the separation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    CompanyInitiated,
    EmployeeInitiated,
    AbandonedPost,
}

/// All categories in display order.
pub const ALL_CATEGORIES: [Category; 3] = [
    Category::CompanyInitiated,
    Category::EmployeeInitiated,
    Category::AbandonedPost,
];

impl Category {
    /// Parse a category code as sent by clients.
    pub fn from_code(s: &str) -> Result<Self, CoreError> {
        match s {
            "company_initiated" => Ok(Self::CompanyInitiated),
            "employee_initiated" => Ok(Self::EmployeeInitiated),
            "abandoned_post" => Ok(Self::AbandonedPost),
            _ => Err(CoreError::Validation(format!(
                "Invalid category '{s}'. Must be one of: company_initiated, \
                 employee_initiated, abandoned_post"
            ))),
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::CompanyInitiated => "company_initiated",
            Self::EmployeeInitiated => "employee_initiated",
            Self::AbandonedPost => "abandoned_post",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::CompanyInitiated => "Company initiated",
            Self::EmployeeInitiated => "Employee initiated",
            Self::AbandonedPost => "Abandoned post",
        }
    }
}

// ---------------------------------------------------------------------------
// Variant
// ---------------------------------------------------------------------------

/// One of the fixed question sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    /// Company initiated, tenure up to 12 months.
    #[serde(rename = "up_to_1yr")]
    UpToOneYear,
    /// Company initiated, tenure over 12 months.
    #[serde(rename = "over_1yr")]
    OverOneYear,
    /// Employee initiated, tenure up to 6 months.
    #[serde(rename = "up_to_6mo")]
    UpToSixMonths,
    /// Employee initiated, tenure 7 to 36 months.
    #[serde(rename = "7mo_to_3yr")]
    SevenMonthsToThreeYears,
    /// Employee initiated, tenure 37 to 120 months.
    #[serde(rename = "4_to_10yr")]
    FourToTenYears,
    /// Employee initiated, tenure over 120 months.
    #[serde(rename = "11yr_plus")]
    ElevenYearsPlus,
    /// Abandoned post: register the separation and submit.
    #[serde(rename = "abandoned_post")]
    AbandonedPost,
}

/// All variants in catalogue order.
pub const ALL_VARIANTS: [Variant; 7] = [
    Variant::UpToOneYear,
    Variant::OverOneYear,
    Variant::UpToSixMonths,
    Variant::SevenMonthsToThreeYears,
    Variant::FourToTenYears,
    Variant::ElevenYearsPlus,
    Variant::AbandonedPost,
];

impl Variant {
    /// Parse a variant code (as stored on invite links and used in URLs).
    pub fn from_code(s: &str) -> Result<Self, CoreError> {
        ALL_VARIANTS
            .into_iter()
            .find(|v| v.code() == s)
            .ok_or_else(|| CoreError::Validation(format!("Invalid survey variant '{s}'")))
    }

    /// Stable machine code.
    pub fn code(self) -> &'static str {
        match self {
            Self::UpToOneYear => "up_to_1yr",
            Self::OverOneYear => "over_1yr",
            Self::UpToSixMonths => "up_to_6mo",
            Self::SevenMonthsToThreeYears => "7mo_to_3yr",
            Self::FourToTenYears => "4_to_10yr",
            Self::ElevenYearsPlus => "11yr_plus",
            Self::AbandonedPost => "abandoned_post",
        }
    }

    /// Label shown to HR staff when the selector picks this variant.
    pub fn label(self) -> &'static str {
        match self {
            Self::UpToOneYear => "Up to 1 year",
            Self::OverOneYear => "Over 1 year",
            Self::UpToSixMonths => "Within 6 months",
            Self::SevenMonthsToThreeYears => "7 months to 3 years",
            Self::FourToTenYears => "4 to 10 years",
            Self::ElevenYearsPlus => "11 years or more",
            Self::AbandonedPost => "Information registration",
        }
    }

    /// Label written to the `survey_type` column of a submitted answer row.
    ///
    /// Identical to [`Variant::label`] except for the abandoned-post variant,
    /// whose rows are reported under the category name.
    pub fn submission_label(self) -> &'static str {
        match self {
            Self::AbandonedPost => Category::AbandonedPost.label(),
            other => other.label(),
        }
    }

    /// The category this variant belongs to.
    pub fn category(self) -> Category {
        match self {
            Self::UpToOneYear | Self::OverOneYear => Category::CompanyInitiated,
            Self::UpToSixMonths
            | Self::SevenMonthsToThreeYears
            | Self::FourToTenYears
            | Self::ElevenYearsPlus => Category::EmployeeInitiated,
            Self::AbandonedPost => Category::AbandonedPost,
        }
    }
}

// ---------------------------------------------------------------------------
// Branch selector
// ---------------------------------------------------------------------------

/// Pick the survey variant for a category and tenure in whole months.
///
/// Boundaries are inclusive on the shorter-tenure side: exactly 12 months is
/// still "up to 1 year", exactly 6 / 36 / 120 months resolve downwards.
pub fn select_variant(category: Category, tenure_months: u32) -> Variant {
    match category {
        Category::CompanyInitiated => {
            if tenure_months <= 12 {
                Variant::UpToOneYear
            } else {
                Variant::OverOneYear
            }
        }
        Category::EmployeeInitiated => match tenure_months {
            0..=6 => Variant::UpToSixMonths,
            7..=36 => Variant::SevenMonthsToThreeYears,
            37..=120 => Variant::FourToTenYears,
            _ => Variant::ElevenYearsPlus,
        },
        Category::AbandonedPost => Variant::AbandonedPost,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
