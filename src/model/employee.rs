use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

use super::{role::Role, user::User};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EmployeeStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": "emp-1",
        "employee_code": "EMP001",
        "name": "Sarah Johnson",
        "email": "sarah@dayflow.com",
        "role": "employee",
        "department": "Engineering",
        "position": "Frontend Developer",
        "join_date": "2024-01-15",
        "salary": 85000.0,
        "phone": "+1 (555) 123-4567",
        "address": "123 Tech Blvd, San Francisco, CA",
        "status": "active"
    })
)]
pub struct Employee {
    #[schema(example = "emp-1")]
    pub id: String,

    #[schema(example = "EMP001")]
    pub employee_code: String,

    #[schema(example = "Sarah Johnson")]
    pub name: String,

    #[schema(example = "sarah@dayflow.com")]
    pub email: String,

    pub role: Role,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(nullable = true)]
    pub avatar: Option<String>,

    #[schema(example = "Engineering")]
    pub department: String,

    #[schema(example = "Frontend Developer")]
    pub position: String,

    #[schema(
        example = "2024-01-15",
        value_type = String,
        format = "date"
    )]
    pub join_date: NaiveDate,

    /// Annual salary.
    #[schema(example = 85000.0)]
    pub salary: f64,

    #[schema(example = "+1 (555) 123-4567")]
    pub phone: String,

    #[schema(example = "123 Tech Blvd, San Francisco, CA")]
    pub address: String,

    pub status: EmployeeStatus,
}

impl Employee {
    /// The identity record a signed-in employee carries.
    pub fn identity(&self) -> User {
        User {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            employee_code: self.employee_code.clone(),
            avatar: self.avatar.clone(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }

    /// Case-insensitive match against name, department and position.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        [&self.name, &self.department, &self.position]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Fields accepted when adding an employee.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct NewEmployee {
    /// Generated when omitted
    #[schema(example = "emp-5", nullable = true)]
    pub id: Option<String>,
    #[schema(example = "EMP005")]
    pub employee_code: String,
    #[schema(example = "Alex Kim")]
    pub name: String,
    #[schema(example = "alex@dayflow.com", format = "email")]
    pub email: String,
    #[schema(example = "Engineering")]
    pub department: String,
    #[schema(example = "QA Engineer")]
    pub position: String,
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    pub join_date: NaiveDate,
    #[schema(example = 70000.0)]
    pub salary: f64,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateEmployee {
    pub employee_code: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    pub join_date: Option<NaiveDate>,
    pub salary: Option<f64>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: Option<EmployeeStatus>,
}

impl UpdateEmployee {
    pub fn apply_to(self, employee: &mut Employee) {
        macro_rules! set {
            ($($field:ident),*) => {
                $(if let Some(value) = self.$field {
                    employee.$field = value;
                })*
            };
        }
        set!(
            employee_code,
            name,
            email,
            department,
            position,
            join_date,
            salary,
            phone,
            address,
            status
        );
        if self.avatar.is_some() {
            employee.avatar = self.avatar;
        }
    }

    /// True when only contact details (phone, address) are touched.
    pub fn is_contact_only(&self) -> bool {
        self.employee_code.is_none()
            && self.name.is_none()
            && self.email.is_none()
            && self.avatar.is_none()
            && self.department.is_none()
            && self.position.is_none()
            && self.join_date.is_none()
            && self.salary.is_none()
            && self.status.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed;

    #[test]
    fn update_leaves_unlisted_fields_alone() {
        let mut emp = seed::employees().remove(0);
        let before = emp.clone();

        UpdateEmployee {
            phone: Some("+1 (555) 000-0000".into()),
            ..Default::default()
        }
        .apply_to(&mut emp);

        assert_eq!(emp.phone, "+1 (555) 000-0000");
        assert_eq!(emp.address, before.address);
        assert_eq!(emp.salary, before.salary);
        assert_eq!(emp.name, before.name);
    }

    #[test]
    fn contact_only_detection() {
        let patch = UpdateEmployee {
            phone: Some("1".into()),
            address: Some("2".into()),
            ..Default::default()
        };
        assert!(patch.is_contact_only());

        let patch = UpdateEmployee {
            salary: Some(1.0),
            ..Default::default()
        };
        assert!(!patch.is_contact_only());
    }

    #[test]
    fn search_is_case_insensitive_over_name_department_position() {
        let emp = seed::employees().remove(0);
        assert!(emp.matches("sarah"));
        assert!(emp.matches("ENGINEER"));
        assert!(emp.matches("frontend"));
        assert!(!emp.matches("payroll"));
    }
}
