//! Fixed sample data the domain store starts from.
//!
//! Records dated "today" are computed from the store clock at seeding time.

use chrono::{NaiveDate, NaiveTime};

use crate::model::{
    attendance::{AttendanceRecord, AttendanceStatus},
    employee::{Employee, EmployeeStatus},
    leave_request::{LeaveRequest, LeaveStatus, LeaveType},
    role::Role,
};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap_or_default()
}

fn time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").ok()
}

#[allow(clippy::too_many_arguments)]
fn employee(
    n: u32,
    name: &str,
    email: &str,
    department: &str,
    position: &str,
    join_date: &str,
    salary: f64,
    phone: &str,
    address: &str,
    avatar: &str,
) -> Employee {
    Employee {
        id: format!("emp-{n}"),
        employee_code: format!("EMP{n:03}"),
        name: name.to_string(),
        email: email.to_string(),
        role: Role::Employee,
        avatar: Some(format!(
            "https://images.unsplash.com/{avatar}?auto=format&fit=crop&q=80&w=150&h=150"
        )),
        department: department.to_string(),
        position: position.to_string(),
        join_date: date(join_date),
        salary,
        phone: phone.to_string(),
        address: address.to_string(),
        status: EmployeeStatus::Active,
    }
}

pub fn employees() -> Vec<Employee> {
    vec![
        employee(
            1,
            "Sarah Johnson",
            "sarah@dayflow.com",
            "Engineering",
            "Frontend Developer",
            "2024-01-15",
            85000.0,
            "+1 (555) 123-4567",
            "123 Tech Blvd, San Francisco, CA",
            "photo-1494790108377-be9c29b29330",
        ),
        employee(
            2,
            "Michael Chen",
            "michael@dayflow.com",
            "Product",
            "Product Manager",
            "2023-11-01",
            95000.0,
            "+1 (555) 987-6543",
            "456 Market St, San Francisco, CA",
            "photo-1507003211169-0a1dd7228f2d",
        ),
        employee(
            3,
            "Jessica Davis",
            "jessica@dayflow.com",
            "Design",
            "UI/UX Designer",
            "2024-03-10",
            78000.0,
            "+1 (555) 456-7890",
            "789 Art Ave, Oakland, CA",
            "photo-1438761681033-6461ffad8d80",
        ),
        employee(
            4,
            "David Wilson",
            "david@dayflow.com",
            "Engineering",
            "Backend Developer",
            "2023-08-20",
            92000.0,
            "+1 (555) 222-3333",
            "321 Code Ln, San Jose, CA",
            "photo-1500648767791-00dcc994a43e",
        ),
    ]
}

fn record(
    id: &str,
    employee_id: &str,
    date: NaiveDate,
    check_in: &str,
    check_out: &str,
    status: AttendanceStatus,
    hours_worked: Option<f64>,
) -> AttendanceRecord {
    AttendanceRecord {
        id: id.to_string(),
        employee_id: employee_id.to_string(),
        date,
        check_in: time(check_in),
        check_out: time(check_out),
        status,
        hours_worked,
    }
}

pub fn attendance(today: NaiveDate) -> Vec<AttendanceRecord> {
    use AttendanceStatus::*;
    vec![
        record("att-1", "emp-1", today, "09:00", "", Present, None),
        record("att-2", "emp-2", today, "08:45", "17:30", Present, Some(8.75)),
        record("att-3", "emp-1", date("2024-05-20"), "09:05", "18:00", Present, Some(8.9)),
        record("att-4", "emp-1", date("2024-05-19"), "09:00", "17:00", Present, Some(8.0)),
        record("att-5", "emp-2", date("2024-05-20"), "08:30", "17:30", Present, Some(9.0)),
        record("att-6", "emp-3", today, "", "", Leave, None),
    ]
}

pub fn leaves(today: NaiveDate) -> Vec<LeaveRequest> {
    vec![
        LeaveRequest {
            id: "leave-1".to_string(),
            employee_id: "emp-1".to_string(),
            leave_type: LeaveType::Paid,
            start_date: date("2024-06-01"),
            end_date: date("2024-06-05"),
            reason: "Family Vacation".to_string(),
            status: LeaveStatus::Pending,
            admin_comment: None,
            applied_on: date("2024-05-21"),
        },
        LeaveRequest {
            id: "leave-2".to_string(),
            employee_id: "emp-3".to_string(),
            leave_type: LeaveType::Sick,
            start_date: today,
            end_date: today,
            reason: "Flu".to_string(),
            status: LeaveStatus::Approved,
            admin_comment: Some("Get well soon!".to_string()),
            applied_on: date("2024-05-20"),
        },
        LeaveRequest {
            id: "leave-3".to_string(),
            employee_id: "emp-2".to_string(),
            leave_type: LeaveType::Unpaid,
            start_date: date("2024-05-15"),
            end_date: date("2024-05-15"),
            reason: "Personal Appointment".to_string(),
            status: LeaveStatus::Rejected,
            admin_comment: Some("Urgent meeting scheduled".to_string()),
            applied_on: date("2024-05-10"),
        },
    ]
}
