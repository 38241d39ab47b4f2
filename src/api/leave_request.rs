use crate::{
    auth::auth::AuthUser,
    model::leave_request::{LeaveDecision, NewLeave},
    store::DataStore,
};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LeaveDecisionBody {
    #[schema(example = "Get well soon!")]
    pub comment: Option<String>,
}

/* =========================
Create leave request
========================= */
/// Swagger doc for create_leave endpoint
#[utoipa::path(
    post,
    path = "/api/leave",
    request_body(
        content = NewLeave,
        description = "Leave request payload",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Leave request submitted successfully",
         body = Object,
         example = json!({
            "message": "Your manager will review it shortly.",
            "status": "pending"
         })
        ),
        (status = 400, description = "Bad request"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No employee profile")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn create_leave(
    auth: AuthUser,
    domain: web::Data<DataStore>,
    payload: web::Json<NewLeave>,
) -> actix_web::Result<HttpResponse> {
    let leave = domain.request_leave(&auth.user_id, payload.into_inner())?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Your manager will review it shortly.",
        "status": leave.status,
        "leave": leave
    })))
}

async fn decide(
    auth: AuthUser,
    domain: web::Data<DataStore>,
    leave_id: String,
    decision: LeaveDecision,
    body: Option<web::Json<LeaveDecisionBody>>,
) -> actix_web::Result<HttpResponse> {
    auth.require_admin()?;

    let comment = body
        .and_then(|b| b.into_inner().comment)
        .filter(|c| !c.trim().is_empty());

    let leave = domain
        .update_leave_status(&leave_id, decision, comment)
        .inspect_err(|e| tracing::info!(error = %e, %leave_id, "Leave decision rejected"))?;

    let message = match decision {
        LeaveDecision::Approved => "Leave approved",
        LeaveDecision::Rejected => "Leave rejected",
    };

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": message,
        "leave": leave
    })))
}

/* =========================
Approve leave (Admin)
========================= */
/// Swagger doc for approve_leave endpoint
#[utoipa::path(
    put,
    path = "/api/leave/{leave_id}/approve",
    params(
        ("leave_id" = String, Path, description = "ID of the leave request to approve")
    ),
    request_body(content = LeaveDecisionBody, description = "Optional admin comment", content_type = "application/json"),
    responses(
        (status = 200, description = "Leave approved successfully", body = Object, example = json!({
            "message": "Leave approved"
        })),
        (status = 400, description = "Leave request already processed", body = Object, example = json!({
            "message": "Leave request already processed"
        })),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave request not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn approve_leave(
    auth: AuthUser,
    domain: web::Data<DataStore>,
    path: web::Path<String>,
    body: Option<web::Json<LeaveDecisionBody>>,
) -> actix_web::Result<HttpResponse> {
    decide(auth, domain, path.into_inner(), LeaveDecision::Approved, body).await
}

/* =========================
Reject leave (Admin)
========================= */
/// Swagger doc for reject_leave endpoint
#[utoipa::path(
    put,
    path = "/api/leave/{leave_id}/reject",
    params(
        ("leave_id" = String, Path, description = "ID of the leave request to reject")
    ),
    request_body(content = LeaveDecisionBody, description = "Optional admin comment", content_type = "application/json"),
    responses(
        (status = 200, description = "Leave rejected successfully", body = Object, example = json!({
            "message": "Leave rejected"
        })),
        (status = 400, description = "Leave request already processed", body = Object, example = json!({
            "message": "Leave request already processed"
        })),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave request not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn reject_leave(
    auth: AuthUser,
    domain: web::Data<DataStore>,
    path: web::Path<String>,
    body: Option<web::Json<LeaveDecisionBody>>,
) -> actix_web::Result<HttpResponse> {
    decide(auth, domain, path.into_inner(), LeaveDecision::Rejected, body).await
}

/// Leave requests: everyone's for admins, own for employees
#[utoipa::path(
    get,
    path = "/api/leave",
    responses(
        (status = 200, description = "Leave requests", body = [LeaveRequest]),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn leave_list(
    auth: AuthUser,
    domain: web::Data<DataStore>,
) -> actix_web::Result<HttpResponse> {
    let leaves = if auth.is_admin() {
        domain.leaves()?
    } else {
        domain.employee_leaves(&auth.user_id)?
    };

    Ok(HttpResponse::Ok().json(leaves))
}
