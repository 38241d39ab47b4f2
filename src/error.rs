use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;

/// Every way a store operation can be rejected. A rejected operation never
/// changes state.
#[derive(Debug, Display, Clone, PartialEq)]
pub enum StoreError {
    #[display(fmt = "Invalid credentials")]
    InvalidCredentials,

    #[display(fmt = "You have already clocked in today")]
    AlreadyCheckedIn,

    #[display(fmt = "You need to clock in first")]
    NotCheckedIn,

    #[display(fmt = "You have already clocked out")]
    AlreadyCheckedOut,

    #[display(fmt = "Employee not found")]
    EmployeeNotFound,

    #[display(fmt = "Leave request not found")]
    LeaveNotFound,

    #[display(fmt = "Leave request already processed")]
    LeaveAlreadyDecided,

    #[display(fmt = "Employee already exists: {}", _0)]
    DuplicateEmployee(String),

    #[display(fmt = "start_date cannot be after end_date")]
    InvalidDateRange,

    #[display(fmt = "Session storage failed: {}", _0)]
    Session(String),

    #[display(fmt = "Store unavailable")]
    Unavailable,
}

impl std::error::Error for StoreError {}

impl ResponseError for StoreError {
    fn status_code(&self) -> StatusCode {
        match self {
            StoreError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            StoreError::AlreadyCheckedIn
            | StoreError::NotCheckedIn
            | StoreError::AlreadyCheckedOut
            | StoreError::LeaveAlreadyDecided
            | StoreError::InvalidDateRange => StatusCode::BAD_REQUEST,
            StoreError::EmployeeNotFound | StoreError::LeaveNotFound => StatusCode::NOT_FOUND,
            StoreError::DuplicateEmployee(_) => StatusCode::CONFLICT,
            StoreError::Session(_) | StoreError::Unavailable => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "message": self.to_string()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_rule_rejections_are_bad_requests() {
        for err in [
            StoreError::AlreadyCheckedIn,
            StoreError::NotCheckedIn,
            StoreError::AlreadyCheckedOut,
            StoreError::LeaveAlreadyDecided,
        ] {
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn duplicate_message_names_the_value() {
        let err = StoreError::DuplicateEmployee("sarah@dayflow.com".into());
        assert_eq!(err.to_string(), "Employee already exists: sarah@dayflow.com");
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }
}
