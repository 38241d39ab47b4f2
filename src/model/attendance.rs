use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    HalfDay,
    Leave,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AttendanceRecord {
    #[schema(example = "att-1")]
    pub id: String,
    /// References `Employee::id`
    #[schema(example = "emp-1")]
    pub employee_id: String,
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    pub date: NaiveDate,
    #[schema(example = "09:00:00", value_type = String, nullable = true)]
    pub check_in: Option<NaiveTime>,
    #[schema(example = "17:30:00", value_type = String, nullable = true)]
    pub check_out: Option<NaiveTime>,
    pub status: AttendanceStatus,
    #[schema(example = 8.5, nullable = true)]
    pub hours_worked: Option<f64>,
}

impl AttendanceRecord {
    pub fn is_checked_out(&self) -> bool {
        self.check_out.is_some()
    }
}

/// Hours between two clock times, rounded to two decimals.
pub fn hours_between(check_in: NaiveTime, check_out: NaiveTime) -> f64 {
    let minutes = (check_out - check_in).num_minutes().max(0) as f64;
    ((minutes / 60.0) * 100.0).round() / 100.0
}
