use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::role::Role;

/// The signed-in principal. This is also the shape persisted to the session file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "id": "emp-1",
    "name": "Sarah Johnson",
    "email": "sarah@dayflow.com",
    "role": "employee",
    "employee_code": "EMP001"
}))]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub employee_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

pub const ADMIN_ID: &str = "admin-1";

impl User {
    /// The fixed administrative account.
    pub fn admin(email: &str) -> Self {
        Self {
            id: ADMIN_ID.to_string(),
            name: "System Admin".to_string(),
            email: email.to_string(),
            role: Role::Admin,
            employee_code: "ADM001".to_string(),
            avatar: None,
        }
    }

    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}
