//! In-memory employees, attendance records and leave requests for one process.
//!
//! Every operation runs inside a single lock acquisition, so a rejected
//! mutation never leaves a partial change behind.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{clock::Clock, seed};
use crate::{
    error::StoreError,
    model::{
        attendance::{AttendanceRecord, AttendanceStatus, hours_between},
        employee::{Employee, EmployeeStatus, NewEmployee, UpdateEmployee},
        leave_request::{LeaveDecision, LeaveRequest, LeaveStatus, NewLeave},
        role::Role,
        user::ADMIN_ID,
    },
};

#[derive(Default)]
struct Collections {
    employees: Vec<Employee>,
    attendance: Vec<AttendanceRecord>,
    leaves: Vec<LeaveRequest>,
}

impl Collections {
    fn today_record_index(&self, employee_id: &str, today: chrono::NaiveDate) -> Option<usize> {
        self.attendance
            .iter()
            .position(|a| a.employee_id == employee_id && a.date == today)
    }

    fn has_employee(&self, id: &str) -> bool {
        self.employees.iter().any(|e| e.id == id)
    }
}

#[derive(Debug, Default, Clone)]
pub struct EmployeeFilter {
    pub search: Option<String>,
    pub status: Option<EmployeeStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminSummary {
    pub total_employees: usize,
    pub present_today: usize,
    /// Rounded percentage of employees present today
    pub attendance_rate: u32,
    pub pending_leaves: usize,
    pub pending_requests: Vec<LeaveRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EmployeeSummary {
    pub checked_in: bool,
    pub checked_out: bool,
    pub today: Option<AttendanceRecord>,
    pub pending_leaves: usize,
}

pub struct DataStore {
    state: RwLock<Collections>,
    clock: Arc<dyn Clock>,
}

impl DataStore {
    /// Store holding the fixed sample data.
    pub fn seeded(clock: Arc<dyn Clock>) -> Self {
        let today = clock.today();
        Self::with_data(
            seed::employees(),
            seed::attendance(today),
            seed::leaves(today),
            clock,
        )
    }

    pub fn with_data(
        employees: Vec<Employee>,
        attendance: Vec<AttendanceRecord>,
        leaves: Vec<LeaveRequest>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            state: RwLock::new(Collections {
                employees,
                attendance,
                leaves,
            }),
            clock,
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Collections>, StoreError> {
        self.state.read().map_err(|_| StoreError::Unavailable)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Collections>, StoreError> {
        self.state.write().map_err(|_| StoreError::Unavailable)
    }

    pub fn today(&self) -> chrono::NaiveDate {
        self.clock.today()
    }

    pub fn now(&self) -> chrono::NaiveDateTime {
        self.clock.now()
    }

    /* =========================
    Employees
    ========================= */

    pub fn add_employee(&self, new: NewEmployee) -> Result<Employee, StoreError> {
        let mut state = self.write()?;

        let id = new
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| format!("emp-{}", Uuid::new_v4()));

        if id == ADMIN_ID || state.has_employee(&id) {
            return Err(StoreError::DuplicateEmployee(id));
        }
        if state.employees.iter().any(|e| e.email == new.email) {
            return Err(StoreError::DuplicateEmployee(new.email));
        }

        let employee = Employee {
            id,
            employee_code: new.employee_code,
            name: new.name,
            email: new.email,
            role: Role::Employee,
            avatar: new.avatar,
            department: new.department,
            position: new.position,
            join_date: new.join_date,
            salary: new.salary,
            phone: new.phone,
            address: new.address,
            status: EmployeeStatus::Active,
        };

        state.employees.push(employee.clone());
        info!(employee_id = %employee.id, "Employee added");
        Ok(employee)
    }

    pub fn update_employee(&self, id: &str, patch: UpdateEmployee) -> Result<Employee, StoreError> {
        let mut state = self.write()?;

        if let Some(email) = &patch.email {
            if state.employees.iter().any(|e| e.id != id && &e.email == email) {
                return Err(StoreError::DuplicateEmployee(email.clone()));
            }
        }

        let employee = state
            .employees
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(StoreError::EmployeeNotFound)?;

        patch.apply_to(employee);
        info!(employee_id = id, "Employee updated");
        Ok(employee.clone())
    }

    pub fn employee(&self, id: &str) -> Result<Employee, StoreError> {
        self.read()?
            .employees
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or(StoreError::EmployeeNotFound)
    }

    pub fn find_employee_by_email(&self, email: &str) -> Result<Option<Employee>, StoreError> {
        Ok(self
            .read()?
            .employees
            .iter()
            .find(|e| e.email == email)
            .cloned())
    }

    /// Employees in insertion order, narrowed by the filter.
    pub fn employees(&self, filter: &EmployeeFilter) -> Result<Vec<Employee>, StoreError> {
        let search = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty());

        Ok(self
            .read()?
            .employees
            .iter()
            .filter(|e| search.is_none_or(|s| e.matches(s)))
            .filter(|e| filter.status.is_none_or(|s| e.status == s))
            .cloned()
            .collect())
    }

    /* =========================
    Attendance
    ========================= */

    pub fn clock_in(&self, employee_id: &str) -> Result<AttendanceRecord, StoreError> {
        let today = self.clock.today();
        let mut state = self.write()?;

        if !state.has_employee(employee_id) {
            return Err(StoreError::EmployeeNotFound);
        }
        if state.today_record_index(employee_id, today).is_some() {
            debug!(employee_id, %today, "Clock-in rejected: already checked in");
            return Err(StoreError::AlreadyCheckedIn);
        }

        let record = AttendanceRecord {
            id: format!("att-{}", Uuid::new_v4()),
            employee_id: employee_id.to_string(),
            date: today,
            check_in: Some(self.clock.time()),
            check_out: None,
            status: AttendanceStatus::Present,
            hours_worked: None,
        };

        state.attendance.insert(0, record.clone());
        info!(employee_id, record_id = %record.id, "Clocked in");
        Ok(record)
    }

    pub fn clock_out(&self, employee_id: &str) -> Result<AttendanceRecord, StoreError> {
        let today = self.clock.today();
        let mut state = self.write()?;

        let idx = state
            .today_record_index(employee_id, today)
            .ok_or(StoreError::NotCheckedIn)?;
        let record = &mut state.attendance[idx];

        if record.is_checked_out() {
            debug!(employee_id, %today, "Clock-out rejected: already checked out");
            return Err(StoreError::AlreadyCheckedOut);
        }

        let check_out = self.clock.time();
        record.check_out = Some(check_out);
        record.hours_worked = record.check_in.map(|check_in| hours_between(check_in, check_out));

        info!(employee_id, record_id = %record.id, hours = ?record.hours_worked, "Clocked out");
        Ok(record.clone())
    }

    pub fn today_record(&self, employee_id: &str) -> Result<Option<AttendanceRecord>, StoreError> {
        let today = self.clock.today();
        let state = self.read()?;
        Ok(state
            .today_record_index(employee_id, today)
            .map(|idx| state.attendance[idx].clone()))
    }

    /// All records, most recent day first.
    pub fn attendance(&self) -> Result<Vec<AttendanceRecord>, StoreError> {
        let mut records = self.read()?.attendance.clone();
        records.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(records)
    }

    pub fn employee_attendance(&self, employee_id: &str) -> Result<Vec<AttendanceRecord>, StoreError> {
        let mut records: Vec<_> = self
            .read()?
            .attendance
            .iter()
            .filter(|a| a.employee_id == employee_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(records)
    }

    /* =========================
    Leave requests
    ========================= */

    pub fn request_leave(&self, employee_id: &str, new: NewLeave) -> Result<LeaveRequest, StoreError> {
        if new.start_date > new.end_date {
            return Err(StoreError::InvalidDateRange);
        }

        let today = self.clock.today();
        let mut state = self.write()?;

        if !state.has_employee(employee_id) {
            return Err(StoreError::EmployeeNotFound);
        }

        let leave = LeaveRequest {
            id: format!("leave-{}", Uuid::new_v4()),
            employee_id: employee_id.to_string(),
            leave_type: new.leave_type,
            start_date: new.start_date,
            end_date: new.end_date,
            reason: new.reason,
            status: LeaveStatus::Pending,
            admin_comment: None,
            applied_on: today,
        };

        state.leaves.insert(0, leave.clone());
        info!(employee_id, leave_id = %leave.id, "Leave requested");
        Ok(leave)
    }

    pub fn update_leave_status(
        &self,
        id: &str,
        decision: LeaveDecision,
        comment: Option<String>,
    ) -> Result<LeaveRequest, StoreError> {
        let mut state = self.write()?;

        let leave = state
            .leaves
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(StoreError::LeaveNotFound)?;

        if !leave.is_pending() {
            return Err(StoreError::LeaveAlreadyDecided);
        }

        leave.status = decision.into();
        leave.admin_comment = comment;
        info!(leave_id = id, status = %leave.status, "Leave decided");
        Ok(leave.clone())
    }

    /// All requests, most recently requested first.
    pub fn leaves(&self) -> Result<Vec<LeaveRequest>, StoreError> {
        Ok(self.read()?.leaves.clone())
    }

    pub fn employee_leaves(&self, employee_id: &str) -> Result<Vec<LeaveRequest>, StoreError> {
        let mut leaves: Vec<_> = self
            .read()?
            .leaves
            .iter()
            .filter(|l| l.employee_id == employee_id)
            .cloned()
            .collect();
        leaves.sort_by(|a, b| b.applied_on.cmp(&a.applied_on));
        Ok(leaves)
    }

    /* =========================
    Dashboards
    ========================= */

    pub fn admin_summary(&self) -> Result<AdminSummary, StoreError> {
        let today = self.clock.today();
        let state = self.read()?;

        let total_employees = state.employees.len();
        let present_today = state
            .attendance
            .iter()
            .filter(|a| a.date == today && a.status == AttendanceStatus::Present)
            .count();
        let attendance_rate = if total_employees == 0 {
            0
        } else {
            ((present_today as f64 / total_employees as f64) * 100.0).round() as u32
        };
        let pending_requests: Vec<_> = state.leaves.iter().filter(|l| l.is_pending()).cloned().collect();

        Ok(AdminSummary {
            total_employees,
            present_today,
            attendance_rate,
            pending_leaves: pending_requests.len(),
            pending_requests,
        })
    }

    pub fn employee_summary(&self, employee_id: &str) -> Result<EmployeeSummary, StoreError> {
        let date = self.clock.today();
        let state = self.read()?;

        let today = state
            .today_record_index(employee_id, date)
            .map(|idx| state.attendance[idx].clone());
        let pending_leaves = state
            .leaves
            .iter()
            .filter(|l| l.employee_id == employee_id && l.is_pending())
            .count();

        Ok(EmployeeSummary {
            checked_in: today.is_some(),
            checked_out: today.as_ref().is_some_and(|r| r.is_checked_out()),
            today,
            pending_leaves,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::leave_request::LeaveType;
    use crate::store::clock::ManualClock;
    use chrono::{NaiveDate, NaiveTime};

    fn clock() -> Arc<ManualClock> {
        Arc::new(ManualClock::at("2026-03-02", "09:00:00"))
    }

    /// Seeded employees with no attendance or leave history.
    fn store(clock: &Arc<ManualClock>) -> DataStore {
        DataStore::with_data(seed::employees(), Vec::new(), Vec::new(), clock.clone())
    }

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn new_leave(start: &str, end: &str) -> NewLeave {
        NewLeave {
            leave_type: LeaveType::Sick,
            start_date: d(start),
            end_date: d(end),
            reason: "Flu".into(),
        }
    }

    #[test]
    fn clock_in_then_out_then_in_again() {
        let clock = clock();
        let store = store(&clock);

        let rec = store.clock_in("emp-1").unwrap();
        assert_eq!(rec.check_in, NaiveTime::from_hms_opt(9, 0, 0));
        assert_eq!(rec.check_out, None);
        assert_eq!(rec.status, AttendanceStatus::Present);
        assert_eq!(rec.date, d("2026-03-02"));

        clock.set("2026-03-02", "17:30:00");
        let out = store.clock_out("emp-1").unwrap();
        assert_eq!(out.id, rec.id);
        assert_eq!(out.check_out, NaiveTime::from_hms_opt(17, 30, 0));
        assert_eq!(out.hours_worked, Some(8.5));

        assert_eq!(store.clock_in("emp-1"), Err(StoreError::AlreadyCheckedIn));
        assert_eq!(store.attendance().unwrap().len(), 1);
    }

    #[test]
    fn double_clock_in_keeps_one_record() {
        let clock = clock();
        let store = store(&clock);

        store.clock_in("emp-2").unwrap();
        let before = store.attendance().unwrap();

        assert_eq!(store.clock_in("emp-2"), Err(StoreError::AlreadyCheckedIn));
        assert_eq!(store.attendance().unwrap(), before);
        assert_eq!(store.employee_attendance("emp-2").unwrap().len(), 1);
    }

    #[test]
    fn clock_out_without_clock_in_changes_nothing() {
        let clock = clock();
        let store = store(&clock);

        assert_eq!(store.clock_out("emp-1"), Err(StoreError::NotCheckedIn));
        assert!(store.attendance().unwrap().is_empty());
    }

    #[test]
    fn second_clock_out_is_rejected() {
        let clock = clock();
        let store = store(&clock);
        store.clock_in("emp-1").unwrap();
        clock.set("2026-03-02", "12:00:00");
        let first = store.clock_out("emp-1").unwrap();

        clock.set("2026-03-02", "18:00:00");
        assert_eq!(store.clock_out("emp-1"), Err(StoreError::AlreadyCheckedOut));
        assert_eq!(store.today_record("emp-1").unwrap(), Some(first));
    }

    #[test]
    fn new_day_allows_new_clock_in() {
        let clock = clock();
        let store = store(&clock);
        store.clock_in("emp-1").unwrap();

        clock.set("2026-03-03", "08:55:00");
        assert_eq!(store.clock_out("emp-1"), Err(StoreError::NotCheckedIn));
        let next = store.clock_in("emp-1").unwrap();

        let history = store.employee_attendance("emp-1").unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, next.id);
        assert_eq!(history[1].date, d("2026-03-02"));
    }

    #[test]
    fn clock_in_requires_known_employee() {
        let clock = clock();
        let store = store(&clock);
        assert_eq!(store.clock_in("admin-1"), Err(StoreError::EmployeeNotFound));
    }

    #[test]
    fn seeded_today_record_blocks_clock_in() {
        let clock = clock();
        let store = DataStore::seeded(clock.clone());

        assert_eq!(store.clock_in("emp-1"), Err(StoreError::AlreadyCheckedIn));
        // emp-2 checked in and out in the sample data
        assert_eq!(store.clock_out("emp-2"), Err(StoreError::AlreadyCheckedOut));
        assert!(store.clock_in("emp-4").is_ok());
    }

    #[test]
    fn request_leave_is_always_pending() {
        let clock = clock();
        let store = store(&clock);

        // a client-supplied status is not part of the payload and is dropped
        let payload: NewLeave = serde_json::from_value(serde_json::json!({
            "leave_type": "paid",
            "start_date": "2026-04-01",
            "end_date": "2026-04-03",
            "reason": "Trip",
            "status": "approved"
        }))
        .unwrap();

        let leave = store.request_leave("emp-1", payload).unwrap();
        assert_eq!(leave.status, LeaveStatus::Pending);
        assert_eq!(leave.applied_on, d("2026-03-02"));
        assert_eq!(store.leaves().unwrap()[0], leave);
    }

    #[test]
    fn request_leave_rejects_inverted_range() {
        let clock = clock();
        let store = store(&clock);
        assert_eq!(
            store.request_leave("emp-1", new_leave("2026-04-03", "2026-04-01")),
            Err(StoreError::InvalidDateRange)
        );
        assert!(store.leaves().unwrap().is_empty());
    }

    #[test]
    fn approving_touches_only_the_matching_request() {
        let clock = clock();
        let store = DataStore::seeded(clock.clone());
        let pending = store.request_leave("emp-4", new_leave("2026-04-01", "2026-04-01")).unwrap();
        let before = store.leaves().unwrap();

        let decided = store
            .update_leave_status(&pending.id, LeaveDecision::Approved, Some("Enjoy".into()))
            .unwrap();
        assert_eq!(decided.status, LeaveStatus::Approved);
        assert_eq!(decided.admin_comment.as_deref(), Some("Enjoy"));

        let after = store.leaves().unwrap();
        assert_eq!(after.len(), before.len());
        for (b, a) in before.iter().zip(&after) {
            if b.id == pending.id {
                assert_eq!(a, &decided);
            } else {
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn decided_requests_stay_decided() {
        let clock = clock();
        let store = DataStore::seeded(clock.clone());

        assert_eq!(
            store.update_leave_status("leave-2", LeaveDecision::Rejected, None),
            Err(StoreError::LeaveAlreadyDecided)
        );
        assert_eq!(
            store.update_leave_status("leave-404", LeaveDecision::Approved, None),
            Err(StoreError::LeaveNotFound)
        );
    }

    #[test]
    fn employee_leaves_sorted_by_application_date() {
        let clock = clock();
        let store = DataStore::seeded(clock.clone());
        let fresh = store.request_leave("emp-1", new_leave("2026-05-01", "2026-05-02")).unwrap();

        let mine = store.employee_leaves("emp-1").unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].id, fresh.id);
        assert_eq!(mine[1].id, "leave-1");
        assert!(store.employee_leaves("emp-4").unwrap().is_empty());
    }

    #[test]
    fn seeded_attendance_is_date_descending() {
        let clock = clock();
        let store = DataStore::seeded(clock.clone());
        let history = store.employee_attendance("emp-1").unwrap();

        let dates: Vec<_> = history.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![d("2026-03-02"), d("2024-05-20"), d("2024-05-19")]);
    }

    #[test]
    fn add_employee_rejects_duplicates() {
        let clock = clock();
        let store = store(&clock);
        let new = NewEmployee {
            id: None,
            employee_code: "EMP005".into(),
            name: "Alex Kim".into(),
            email: "alex@dayflow.com".into(),
            department: "Engineering".into(),
            position: "QA Engineer".into(),
            join_date: d("2026-01-05"),
            salary: 70000.0,
            phone: String::new(),
            address: String::new(),
            avatar: None,
        };

        let added = store.add_employee(new.clone()).unwrap();
        assert!(added.id.starts_with("emp-"));
        assert_eq!(added.status, EmployeeStatus::Active);
        assert_eq!(store.employees(&EmployeeFilter::default()).unwrap().len(), 5);

        assert_eq!(
            store.add_employee(new.clone()),
            Err(StoreError::DuplicateEmployee("alex@dayflow.com".into()))
        );
        let same_id = NewEmployee {
            id: Some("emp-1".into()),
            email: "other@dayflow.com".into(),
            ..new
        };
        assert_eq!(
            store.add_employee(same_id),
            Err(StoreError::DuplicateEmployee("emp-1".into()))
        );
        assert_eq!(store.employees(&EmployeeFilter::default()).unwrap().len(), 5);
    }

    #[test]
    fn add_employee_rejects_the_admin_id() {
        let clock = clock();
        let store = store(&clock);
        let new = NewEmployee {
            id: Some(ADMIN_ID.into()),
            employee_code: "EMP006".into(),
            name: "Not Admin".into(),
            email: "not-admin@dayflow.com".into(),
            department: "Ops".into(),
            position: "Clerk".into(),
            join_date: d("2026-01-05"),
            salary: 40000.0,
            phone: String::new(),
            address: String::new(),
            avatar: None,
        };

        assert_eq!(
            store.add_employee(new),
            Err(StoreError::DuplicateEmployee(ADMIN_ID.into()))
        );
        assert_eq!(store.employees(&EmployeeFilter::default()).unwrap().len(), 4);
    }

    #[test]
    fn update_employee_reports_missing_id() {
        let clock = clock();
        let store = store(&clock);

        assert_eq!(
            store.update_employee("emp-99", UpdateEmployee::default()),
            Err(StoreError::EmployeeNotFound)
        );

        let updated = store
            .update_employee(
                "emp-3",
                UpdateEmployee {
                    address: Some("1 New St".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.address, "1 New St");
        assert_eq!(store.employee("emp-3").unwrap(), updated);
    }

    #[test]
    fn update_employee_keeps_emails_unique() {
        let clock = clock();
        let store = store(&clock);
        let patch = UpdateEmployee {
            email: Some("sarah@dayflow.com".into()),
            ..Default::default()
        };
        assert!(matches!(
            store.update_employee("emp-2", patch),
            Err(StoreError::DuplicateEmployee(_))
        ));
    }

    #[test]
    fn directory_search_and_status_filter() {
        let clock = clock();
        let store = store(&clock);
        store
            .update_employee(
                "emp-4",
                UpdateEmployee {
                    status: Some(EmployeeStatus::Inactive),
                    ..Default::default()
                },
            )
            .unwrap();

        let engineering = store
            .employees(&EmployeeFilter {
                search: Some("engineering".into()),
                status: None,
            })
            .unwrap();
        assert_eq!(engineering.len(), 2);

        let active_engineering = store
            .employees(&EmployeeFilter {
                search: Some("engineering".into()),
                status: Some(EmployeeStatus::Active),
            })
            .unwrap();
        assert_eq!(active_engineering.len(), 1);
        assert_eq!(active_engineering[0].id, "emp-1");
    }

    #[test]
    fn admin_summary_counts_today() {
        let clock = clock();
        let store = DataStore::seeded(clock.clone());
        let summary = store.admin_summary().unwrap();

        assert_eq!(summary.total_employees, 4);
        assert_eq!(summary.present_today, 2);
        assert_eq!(summary.attendance_rate, 50);
        assert_eq!(summary.pending_leaves, 1);
        assert_eq!(summary.pending_requests[0].id, "leave-1");
    }

    #[test]
    fn admin_summary_of_empty_store() {
        let store = DataStore::with_data(Vec::new(), Vec::new(), Vec::new(), clock());
        let summary = store.admin_summary().unwrap();
        assert_eq!(summary.total_employees, 0);
        assert_eq!(summary.attendance_rate, 0);
    }

    #[test]
    fn employee_summary_tracks_today() {
        let clock = clock();
        let store = DataStore::seeded(clock.clone());

        let sarah = store.employee_summary("emp-1").unwrap();
        assert!(sarah.checked_in);
        assert!(!sarah.checked_out);
        assert_eq!(sarah.pending_leaves, 1);

        let david = store.employee_summary("emp-4").unwrap();
        assert!(!david.checked_in);
        assert_eq!(david.today, None);
    }
}
