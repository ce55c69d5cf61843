//! Tenure arithmetic: whole months for branching and a short display string.

use chrono::NaiveDate;

/// Average days per month used for tenure approximation.
pub const DAYS_PER_MONTH: f64 = 30.44;

/// Average days per year used for the display string.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Whole months between `hire_date` and `today`, floored and clamped at zero.
///
/// A missing hire date counts as zero months.
pub fn tenure_months(hire_date: Option<NaiveDate>, today: NaiveDate) -> u32 {
    let Some(hired) = hire_date else {
        return 0;
    };
    let days = (today - hired).num_days();
    if days <= 0 {
        return 0;
    }
    (days as f64 / DAYS_PER_MONTH).floor() as u32
}

/// Human-readable tenure such as `"3 yr 4 mo"` or `"7 mo"`.
///
/// Returns an empty string when the hire date is unknown. Future hire dates
/// display as `"0 mo"`.
pub fn format_tenure(hire_date: Option<NaiveDate>, today: NaiveDate) -> String {
    let Some(hired) = hire_date else {
        return String::new();
    };
    let days = (today - hired).num_days();
    if days < 0 {
        return "0 mo".to_string();
    }

    let years = (days as f64 / DAYS_PER_YEAR).floor() as i64;
    let rem_days = days - (years as f64 * DAYS_PER_YEAR) as i64;
    let months = (rem_days as f64 / DAYS_PER_MONTH).floor() as i64;

    if years > 0 {
        format!("{years} yr {months} mo")
    } else {
        format!("{months} mo")
    }
}
