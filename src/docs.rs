use crate::api::dashboard::EmployeeDashboard;
use crate::api::employee::{EmployeeListResponse, EmployeeQuery};
use crate::api::leave_request::LeaveDecisionBody;
use crate::api::payroll::PayrollOverview;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::employee::{Employee, EmployeeStatus, NewEmployee, UpdateEmployee};
use crate::model::leave_request::{LeaveRequest, LeaveStatus, LeaveType, NewLeave};
use crate::model::payroll::{Payslip, PayslipStatus};
use crate::model::role::Role;
use crate::model::user::User;
use crate::models::{LoginReqDto, LoginResponse};
use crate::store::domain::{AdminSummary, EmployeeSummary};
use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{OpenApi, openapi};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Dayflow HR API",
        version = "1.0.0",
        description = r#"
## Dayflow HR dashboard

Backend of a small HR dashboard. All data lives in memory and is seeded with
sample employees, attendance and leave records at startup.

### 🔹 Key Features
- **Employee Directory**
  - Search, add and update employee profiles
- **Attendance**
  - Daily clock-in and clock-out, one record per employee per day
- **Leave Management**
  - Request leave, approve/reject pending requests
- **Payroll**
  - Annual salary and monthly payslip history

### 🔐 Security
One identity is signed in at a time. Tokens are only honoured while their
subject is the signed-in identity; signing out invalidates them.
"#,
    ),
    paths(
        crate::auth::handlers::login,
        crate::auth::handlers::logout,
        crate::auth::handlers::me,

        crate::api::dashboard::dashboard,

        crate::api::leave_request::leave_list,
        crate::api::leave_request::create_leave,
        crate::api::leave_request::approve_leave,
        crate::api::leave_request::reject_leave,

        crate::api::attendance::list_attendance,
        crate::api::attendance::check_in,
        crate::api::attendance::check_out,

        crate::api::employee::create_employee,
        crate::api::employee::get_employee,
        crate::api::employee::list_employees,
        crate::api::employee::update_employee,

        crate::api::payroll::payroll_overview
    ),
    components(
        schemas(
            LoginReqDto,
            LoginResponse,
            User,
            Role,
            Employee,
            EmployeeStatus,
            NewEmployee,
            UpdateEmployee,
            EmployeeQuery,
            EmployeeListResponse,
            AttendanceRecord,
            AttendanceStatus,
            LeaveRequest,
            LeaveType,
            LeaveStatus,
            NewLeave,
            LeaveDecisionBody,
            AdminSummary,
            EmployeeSummary,
            EmployeeDashboard,
            Payslip,
            PayslipStatus,
            PayrollOverview
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Sign in and sign out"),
        (name = "Dashboard", description = "Dashboard figures"),
        (name = "Leave", description = "Leave management APIs"),
        (name = "Attendance", description = "Attendance management APIs"),
        (name = "Employee", description = "Employee management APIs"),
        (name = "Payroll", description = "Payroll display APIs"),
    )
)]
pub struct ApiDoc;
