use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::employee::Employee;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PayslipStatus {
    Paid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Payslip {
    #[schema(example = "emp-1")]
    pub employee_id: String,
    #[schema(example = "April 2024")]
    pub month: String,
    #[schema(example = "2024-04-30", value_type = String, format = "date")]
    pub payment_date: NaiveDate,
    /// Monthly amount, annual salary / 12 rounded to whole units
    #[schema(example = 7083.0)]
    pub amount: f64,
    pub status: PayslipStatus,
}

pub fn monthly_amount(annual_salary: f64) -> f64 {
    (annual_salary / 12.0).round()
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

/// Next payout: the last day of the current month.
pub fn next_payout(today: NaiveDate) -> NaiveDate {
    last_day_of_month(today)
}

/// Payslips for the `months` completed months before `today`, most recent first.
pub fn payslip_history(employee: &Employee, today: NaiveDate, months: u32) -> Vec<Payslip> {
    let current = first_of_month(today);
    (1..=months)
        .filter_map(|back| current.checked_sub_months(Months::new(back)))
        .map(|month| Payslip {
            employee_id: employee.id.clone(),
            month: month.format("%B %Y").to_string(),
            payment_date: last_day_of_month(month),
            amount: monthly_amount(employee.salary),
            status: PayslipStatus::Paid,
        })
        .collect()
}
