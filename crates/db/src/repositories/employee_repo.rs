//! Repository for the `employees` table.

use sqlx::{PgExecutor, PgPool};

use crate::models::employee::{CreateEmployee, Employee, EmployeeStatus};

/// Column list for `employees` queries.
const COLUMNS: &str = "id, employee_code, last_name, first_name, company_name, \
     department_name, position_name, hire_date, status, created_at, updated_at";

/// Lookups against the employee directory plus the one status write.
pub struct EmployeeRepo;

impl EmployeeRepo {
    /// Insert an employee. Status defaults to `active`.
    pub async fn create(pool: &PgPool, input: &CreateEmployee) -> Result<Employee, sqlx::Error> {
        let query = format!(
            "INSERT INTO employees \
                (employee_code, last_name, first_name, company_name, \
                 department_name, position_name, hire_date, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        let status = input.status.unwrap_or(EmployeeStatus::Active);
        sqlx::query_as::<_, Employee>(&query)
            .bind(&input.employee_code)
            .bind(&input.last_name)
            .bind(&input.first_name)
            .bind(&input.company_name)
            .bind(&input.department_name)
            .bind(&input.position_name)
            .bind(input.hire_date)
            .bind(status.as_str())
            .fetch_one(pool)
            .await
    }

    /// Find an employee by code regardless of status.
    pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees WHERE employee_code = $1");
        sqlx::query_as::<_, Employee>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// Identity confirmation: an active employee with this code and, when
    /// given, this first name (exact match).
    pub async fn find_active_for_confirmation(
        pool: &PgPool,
        code: &str,
        first_name: Option<&str>,
    ) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM employees \
             WHERE employee_code = $1 \
               AND status = 'active' \
               AND ($2::TEXT IS NULL OR first_name = $2)"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(code)
            .bind(first_name)
            .fetch_optional(pool)
            .await
    }

    /// Flip an active employee to `separated`.
    ///
    /// Returns the number of rows changed; 0 when the employee is unknown or
    /// already separated.
    pub async fn mark_separated<'e>(
        executor: impl PgExecutor<'e>,
        code: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE employees SET status = 'separated', updated_at = NOW() \
             WHERE employee_code = $1 AND status = 'active'",
        )
        .bind(code)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }
}
