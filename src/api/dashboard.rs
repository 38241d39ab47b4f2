use crate::{
    auth::auth::AuthUser,
    store::{DataStore, domain::EmployeeSummary},
};
use actix_web::{HttpResponse, web};
use chrono::Timelike;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct EmployeeDashboard {
    #[schema(example = "Good Morning, Sarah")]
    pub greeting: String,
    #[schema(example = "EMP001")]
    pub employee_code: String,
    pub department: String,
    pub position: String,
    #[serde(flatten)]
    pub summary: EmployeeSummary,
}

fn greeting(hour: u32, first_name: &str) -> String {
    let part = if hour < 12 { "Morning" } else { "Afternoon" };
    format!("Good {part}, {first_name}")
}

/// Dashboard figures for the signed-in identity
#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "AdminSummary for admins, EmployeeDashboard for employees",
         body = AdminSummary),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
pub async fn dashboard(
    auth: AuthUser,
    domain: web::Data<DataStore>,
) -> actix_web::Result<HttpResponse> {
    if auth.is_admin() {
        return Ok(HttpResponse::Ok().json(domain.admin_summary()?));
    }

    let employee = domain.employee(&auth.user_id)?;
    let summary = domain.employee_summary(&employee.id)?;
    let identity = employee.identity();

    Ok(HttpResponse::Ok().json(EmployeeDashboard {
        greeting: greeting(domain.now().hour(), identity.first_name()),
        employee_code: employee.employee_code,
        department: employee.department,
        position: employee.position,
        summary,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_by_hour() {
        assert_eq!(greeting(9, "Sarah"), "Good Morning, Sarah");
        assert_eq!(greeting(12, "Sarah"), "Good Afternoon, Sarah");
    }
}
