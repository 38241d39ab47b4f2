use crate::{
    auth::auth::AuthUser,
    config::Config,
    error::StoreError,
    model::employee::{Employee, EmployeeStatus, NewEmployee, UpdateEmployee},
    store::{DataStore, domain::EmployeeFilter},
};
use actix_web::{HttpResponse, error::ErrorForbidden, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct EmployeeQuery {
    /// Pagination page number (start with 1)
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub status: Option<EmployeeStatus>,
    /// Matches name, department or position
    pub search: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeListResponse {
    pub data: Vec<Employee>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 20)]
    pub per_page: u32,
    #[schema(example = 4)]
    pub total: usize,
}

/// Create Employee
// The admin address belongs to the fixed admin identity
fn reject_admin_email(email: &str, config: &Config) -> Result<(), StoreError> {
    if email.trim().eq_ignore_ascii_case(&config.admin_email) {
        return Err(StoreError::DuplicateEmployee(email.to_string()));
    }
    Ok(())
}

#[utoipa::path(
    post,
    path = "/api/employee",
    request_body = NewEmployee,
    responses(
        (status = 201, description = "Employee created", body = Object, example = json!({
            "message": "Alex Kim has been added."
        })),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Duplicate id or email", body = Object, example = json!({
            "message": "Employee already exists: alex@dayflow.com"
        }))
    ),
    tag = "Employee",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_employee(
    auth: AuthUser,
    domain: web::Data<DataStore>,
    config: web::Data<Config>,
    payload: web::Json<NewEmployee>,
) -> actix_web::Result<HttpResponse> {
    auth.require_admin()?;

    let new = payload.into_inner();
    reject_admin_email(&new.email, &config)?;

    let employee = domain.add_employee(new)?;

    Ok(HttpResponse::Created().json(json!({
        "message": format!("{} has been added.", employee.name),
        "employee": employee
    })))
}

/// Employee directory
#[utoipa::path(
    get,
    path = "/api/employee",
    params(EmployeeQuery),
    responses(
        (status = 200, description = "Paginated employee list", body = EmployeeListResponse),
        (status = 403, description = "Forbidden")
    ),
    tag = "Employee",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_employees(
    auth: AuthUser,
    domain: web::Data<DataStore>,
    query: web::Query<EmployeeQuery>,
) -> actix_web::Result<HttpResponse> {
    auth.require_admin()?;

    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
    let offset = (page as usize - 1).saturating_mul(per_page as usize);

    let filter = EmployeeFilter {
        search: query.search.clone(),
        status: query.status,
    };
    let matches = domain.employees(&filter)?;
    let total = matches.len();
    debug!(?filter, total, page, per_page, "Listing employees");

    let data = matches
        .into_iter()
        .skip(offset)
        .take(per_page as usize)
        .collect();

    Ok(HttpResponse::Ok().json(EmployeeListResponse {
        data,
        page,
        per_page,
        total,
    }))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/employee/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        }))
    ),
    tag = "Employee",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_employee(
    auth: AuthUser,
    domain: web::Data<DataStore>,
    path: web::Path<String>,
) -> actix_web::Result<HttpResponse> {
    let employee_id = path.into_inner();
    auth.require_self_or_admin(&employee_id)?;

    Ok(HttpResponse::Ok().json(domain.employee(&employee_id)?))
}

/// Update Employee. Employees may change their own phone and address only.
#[utoipa::path(
    put,
    path = "/api/employee/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    request_body = UpdateEmployee,
    responses(
        (status = 200, description = "Employee updated successfully", body = Object, example = json!({
            "message": "Changes have been saved."
        })),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        }))
    ),
    tag = "Employee",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_employee(
    auth: AuthUser,
    domain: web::Data<DataStore>,
    config: web::Data<Config>,
    path: web::Path<String>,
    body: web::Json<UpdateEmployee>,
) -> actix_web::Result<HttpResponse> {
    let employee_id = path.into_inner();
    auth.require_self_or_admin(&employee_id)?;

    let patch = body.into_inner();
    if !auth.is_admin() && !patch.is_contact_only() {
        return Err(ErrorForbidden("Only phone and address can be changed"));
    }
    if let Some(email) = &patch.email {
        reject_admin_email(email, &config)?;
    }

    let employee = domain.update_employee(&employee_id, patch)?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Changes have been saved.",
        "employee": employee
    })))
}
