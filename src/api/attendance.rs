use crate::{auth::auth::AuthUser, store::DataStore};
use actix_web::{HttpResponse, web};
use chrono::NaiveTime;

fn hh_mm(time: Option<NaiveTime>) -> String {
    time.map(|t| t.format("%H:%M").to_string()).unwrap_or_default()
}

/// Attendance history: everyone for admins, own records for employees.
#[utoipa::path(
    get,
    path = "/api/attendance",
    responses(
        (status = 200, description = "Attendance records, most recent day first", body = [AttendanceRecord]),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    auth: AuthUser,
    domain: web::Data<DataStore>,
) -> actix_web::Result<HttpResponse> {
    let records = if auth.is_admin() {
        domain.attendance()?
    } else {
        domain.employee_attendance(&auth.user_id)?
    };

    Ok(HttpResponse::Ok().json(records))
}

/// Check-in endpoint
#[utoipa::path(
    post,
    path = "/api/attendance",
    responses(
        (status = 200, description = "Checked in successfully", body = Object, example = json!({
            "message": "You clocked in at 09:00"
        })),
        (status = 400, description = "Already checked in today", body = Object, example = json!({
            "message": "You have already clocked in today"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No employee profile")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn check_in(
    auth: AuthUser,
    domain: web::Data<DataStore>,
) -> actix_web::Result<HttpResponse> {
    let record = domain.clock_in(&auth.user_id).inspect_err(|e| {
        tracing::info!(error = %e, employee_id = %auth.user_id, "Check-in rejected");
    })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("You clocked in at {}", hh_mm(record.check_in)),
        "record": record
    })))
}

/// Check-out endpoint
#[utoipa::path(
    put,
    path = "/api/attendance",
    responses(
        (status = 200, description = "Checked out successfully", body = Object, example = json!({
            "message": "You clocked out at 17:30"
        })),
        (status = 400, description = "No active check-in found for today", body = Object, example = json!({
            "message": "You need to clock in first"
        })),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn check_out(
    auth: AuthUser,
    domain: web::Data<DataStore>,
) -> actix_web::Result<HttpResponse> {
    let record = domain.clock_out(&auth.user_id).inspect_err(|e| {
        tracing::info!(error = %e, employee_id = %auth.user_id, "Check-out rejected");
    })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("You clocked out at {}", hh_mm(record.check_out)),
        "record": record
    })))
}
