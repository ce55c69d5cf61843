//! Employee directory rows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use exitsurvey_core::error::CoreError;
use exitsurvey_core::tenure::{format_tenure, tenure_months};
use exitsurvey_core::types::{DbId, Timestamp};
use exitsurvey_core::wizard::ConfirmedEmployee;

/// Employment status stored in `employees.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    Active,
    Separated,
}

impl EmployeeStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Separated => "separated",
        }
    }

    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "active" => Ok(Self::Active),
            "separated" => Ok(Self::Separated),
            _ => Err(CoreError::Validation(format!(
                "Invalid employee status '{s}'. Must be one of: active, separated"
            ))),
        }
    }
}

/// A row from the `employees` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Employee {
    pub id: DbId,
    pub employee_code: String,
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub company_name: Option<String>,
    pub department_name: Option<String>,
    pub position_name: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Employee {
    pub fn status(&self) -> Result<EmployeeStatus, CoreError> {
        EmployeeStatus::from_str_db(&self.status)
    }

    pub fn is_active(&self) -> bool {
        matches!(self.status(), Ok(EmployeeStatus::Active))
    }

    /// Whole months of tenure as of `today`.
    pub fn tenure_months(&self, today: NaiveDate) -> u32 {
        tenure_months(self.hire_date, today)
    }

    /// Summary carried by a survey session once this employee is confirmed.
    pub fn to_confirmed(&self, today: NaiveDate) -> ConfirmedEmployee {
        ConfirmedEmployee {
            employee_code: self.employee_code.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            department_name: self.department_name.clone(),
            position_name: self.position_name.clone(),
            tenure_months: self.tenure_months(today),
            tenure_display: format_tenure(self.hire_date, today),
        }
    }
}

/// DTO for inserting an employee.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEmployee {
    pub employee_code: String,
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub company_name: Option<String>,
    pub department_name: Option<String>,
    pub position_name: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub status: Option<EmployeeStatus>,
}
