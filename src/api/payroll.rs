use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    auth::auth::AuthUser,
    config::Config,
    model::payroll::{Payslip, next_payout, payslip_history},
    store::{DataStore, domain::EmployeeFilter},
};

#[derive(Serialize, ToSchema)]
pub struct PayrollOverview {
    /// Own annual salary; absent for admins
    #[schema(example = 85000.0, nullable = true)]
    pub annual_salary: Option<f64>,

    #[schema(example = "2024-05-31", value_type = String, format = "date")]
    pub next_payout: NaiveDate,

    /// Payslip history for employees, latest payslip per active employee for admins
    pub payslips: Vec<Payslip>,
}

#[utoipa::path(
    get,
    path = "/api/payroll",
    responses(
        (status = 200, description = "Payroll overview", body = PayrollOverview),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Payroll"
)]
pub async fn payroll_overview(
    auth: AuthUser,
    domain: web::Data<DataStore>,
    config: web::Data<Config>,
) -> actix_web::Result<HttpResponse> {
    let today = domain.today();

    let overview = if auth.is_admin() {
        let payslips = domain
            .employees(&EmployeeFilter::default())?
            .iter()
            .filter(|e| e.is_active())
            .flat_map(|e| payslip_history(e, today, 1))
            .collect();

        PayrollOverview {
            annual_salary: None,
            next_payout: next_payout(today),
            payslips,
        }
    } else {
        let employee = domain.employee(&auth.user_id)?;

        PayrollOverview {
            annual_salary: Some(employee.salary),
            next_payout: next_payout(today),
            payslips: payslip_history(&employee, today, config.payslip_months),
        }
    };

    Ok(HttpResponse::Ok().json(overview))
}
