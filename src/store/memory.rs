//! In-memory implementation of every storage trait.
//!
//! All tables live behind a single `RwLock`, so each trait method is atomic
//! with respect to the others and uniqueness checks cannot race with inserts.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, Employee, LeaveBalance, LeaveDecision, LeaveFilter, LeaveRequest, LeaveType,
    Page, PageRequest, PayrollFilter, PayrollRecord,
};

use super::{AttendanceStore, EmployeeDirectory, LeaveStore, PayrollStore};

#[derive(Debug, Default)]
struct Tables {
    employees: BTreeMap<u64, Employee>,
    attendance: BTreeMap<u64, AttendanceRecord>,
    leave_requests: BTreeMap<u64, LeaveRequest>,
    leave_balances: BTreeMap<u64, LeaveBalance>,
    payroll: BTreeMap<u64, PayrollRecord>,
    last_id: u64,
}

impl Tables {
    fn next_id(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }

    fn has_payroll_for(&self, employee_id: u64, month: u32, year: i32) -> bool {
        self.payroll
            .values()
            .any(|r| r.employee_id == employee_id && r.month == month && r.year == year)
    }
}

/// Thread-safe in-memory store.
///
/// # Example
///
/// ```
/// use hr_ledger::store::{EmployeeDirectory, MemoryStore};
///
/// let store = MemoryStore::new();
/// assert!(store.find_by_id(1).unwrap().is_none());
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose directory holds the given employees.
    pub fn with_employees(employees: impl IntoIterator<Item = Employee>) -> Self {
        let tables = Tables {
            employees: employees.into_iter().map(|e| (e.id, e)).collect(),
            ..Tables::default()
        };
        Self {
            tables: RwLock::new(tables),
        }
    }

    /// Adds or replaces an employee in the directory.
    pub fn upsert_employee(&self, employee: Employee) -> EngineResult<()> {
        self.write()?.employees.insert(employee.id, employee);
        Ok(())
    }

    fn read(&self) -> EngineResult<RwLockReadGuard<'_, Tables>> {
        self.tables.read().map_err(|_| EngineError::StorageError {
            message: "store lock poisoned".to_string(),
        })
    }

    fn write(&self) -> EngineResult<RwLockWriteGuard<'_, Tables>> {
        self.tables.write().map_err(|_| EngineError::StorageError {
            message: "store lock poisoned".to_string(),
        })
    }
}

fn unique_violation(constraint: &str) -> EngineError {
    EngineError::StorageError {
        message: format!("unique constraint violated: {}", constraint),
    }
}

fn missing_row(table: &str, id: u64) -> EngineError {
    EngineError::StorageError {
        message: format!("no {} row with id {}", table, id),
    }
}

fn newest_first<T>(mut rows: Vec<T>, id: impl Fn(&T) -> u64) -> Vec<T> {
    rows.sort_by_key(|row| std::cmp::Reverse(id(row)));
    rows
}

fn most_recent_first(mut rows: Vec<AttendanceRecord>) -> Vec<AttendanceRecord> {
    rows.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    rows
}

impl EmployeeDirectory for MemoryStore {
    fn find_by_id(&self, id: u64) -> EngineResult<Option<Employee>> {
        Ok(self.read()?.employees.get(&id).cloned())
    }

    fn list_active(&self) -> EngineResult<Vec<Employee>> {
        Ok(self
            .read()?
            .employees
            .values()
            .filter(|e| e.is_active())
            .cloned()
            .collect())
    }
}

impl AttendanceStore for MemoryStore {
    fn create(&self, mut record: AttendanceRecord) -> EngineResult<AttendanceRecord> {
        let mut tables = self.write()?;
        if tables
            .attendance
            .values()
            .any(|r| r.employee_id == record.employee_id && r.date == record.date)
        {
            return Err(unique_violation("attendance(employee_id, date)"));
        }

        record.id = tables.next_id();
        tables.attendance.insert(record.id, record.clone());
        debug!(id = record.id, "Inserted attendance row");
        Ok(record)
    }

    fn update(&self, record: &AttendanceRecord) -> EngineResult<()> {
        let mut tables = self.write()?;
        let row = tables
            .attendance
            .get_mut(&record.id)
            .ok_or_else(|| missing_row("attendance", record.id))?;
        *row = record.clone();
        Ok(())
    }

    fn find_by_employee_and_date(
        &self,
        employee_id: u64,
        date: NaiveDate,
    ) -> EngineResult<Option<AttendanceRecord>> {
        Ok(self
            .read()?
            .attendance
            .values()
            .find(|r| r.employee_id == employee_id && r.date == date)
            .cloned())
    }

    fn find_by_employee(
        &self,
        employee_id: u64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<AttendanceRecord>> {
        let rows = self
            .read()?
            .attendance
            .values()
            .filter(|r| r.employee_id == employee_id && r.date >= start && r.date <= end)
            .cloned()
            .collect();
        Ok(most_recent_first(rows))
    }

    fn find_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<AttendanceRecord>> {
        let rows = self
            .read()?
            .attendance
            .values()
            .filter(|r| r.date >= start && r.date <= end)
            .cloned()
            .collect();
        Ok(most_recent_first(rows))
    }
}

impl LeaveStore for MemoryStore {
    fn create_request(&self, mut request: LeaveRequest) -> EngineResult<LeaveRequest> {
        let mut tables = self.write()?;
        request.id = tables.next_id();
        tables.leave_requests.insert(request.id, request.clone());
        Ok(request)
    }

    fn find_request(&self, id: u64) -> EngineResult<Option<LeaveRequest>> {
        Ok(self.read()?.leave_requests.get(&id).cloned())
    }

    fn list_requests(
        &self,
        filter: &LeaveFilter,
        page: PageRequest,
    ) -> EngineResult<Page<LeaveRequest>> {
        let rows = self
            .read()?
            .leave_requests
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        Ok(Page::from_sorted(newest_first(rows, |r| r.id), page))
    }

    fn find_balance(
        &self,
        employee_id: u64,
        leave_type: LeaveType,
        year: i32,
    ) -> EngineResult<Option<LeaveBalance>> {
        Ok(self
            .read()?
            .leave_balances
            .values()
            .find(|b| b.employee_id == employee_id && b.leave_type == leave_type && b.year == year)
            .cloned())
    }

    fn find_balances(&self, employee_id: u64, year: i32) -> EngineResult<Vec<LeaveBalance>> {
        let mut rows: Vec<LeaveBalance> = self
            .read()?
            .leave_balances
            .values()
            .filter(|b| b.employee_id == employee_id && b.year == year)
            .cloned()
            .collect();
        rows.sort_by_key(|b| b.leave_type);
        Ok(rows)
    }

    fn create_balance(&self, mut balance: LeaveBalance) -> EngineResult<LeaveBalance> {
        let mut tables = self.write()?;
        if tables.leave_balances.values().any(|b| {
            b.employee_id == balance.employee_id
                && b.leave_type == balance.leave_type
                && b.year == balance.year
        }) {
            return Err(unique_violation("leave_balances(employee_id, leave_type, year)"));
        }

        balance.id = tables.next_id();
        tables.leave_balances.insert(balance.id, balance.clone());
        Ok(balance)
    }

    fn apply_decision(
        &self,
        request_id: u64,
        decision: LeaveDecision,
        approver_id: u64,
        decided_at: DateTime<Utc>,
    ) -> EngineResult<(LeaveRequest, Option<LeaveBalance>)> {
        let mut tables = self.write()?;

        let mut request = tables
            .leave_requests
            .get(&request_id)
            .cloned()
            .ok_or_else(|| EngineError::not_found("leave request", request_id))?;
        if !request.is_pending() {
            return Err(EngineError::InvalidState {
                message: format!("leave request {} is not pending", request_id),
            });
        }

        request.status = decision.into();
        request.approved_by = Some(approver_id);
        request.approved_at = Some(decided_at);

        // Nothing below can fail, so both writes land together.
        let balance = match decision {
            LeaveDecision::Approved => {
                let year = request.start_date.year();
                tables
                    .leave_balances
                    .values_mut()
                    .find(|b| {
                        b.employee_id == request.employee_id
                            && b.leave_type == request.leave_type
                            && b.year == year
                    })
                    .map(|balance| {
                        balance.consume(request.total_days);
                        balance.clone()
                    })
            }
            LeaveDecision::Rejected => None,
        };
        tables.leave_requests.insert(request.id, request.clone());

        debug!(request_id, status = ?request.status, "Applied leave decision");
        Ok((request, balance))
    }
}

impl PayrollStore for MemoryStore {
    fn create(&self, record: PayrollRecord) -> EngineResult<PayrollRecord> {
        self.create_if_absent(record)?
            .ok_or_else(|| unique_violation("payroll(employee_id, month, year)"))
    }

    fn create_if_absent(&self, mut record: PayrollRecord) -> EngineResult<Option<PayrollRecord>> {
        let mut tables = self.write()?;
        if tables.has_payroll_for(record.employee_id, record.month, record.year) {
            return Ok(None);
        }

        record.id = tables.next_id();
        tables.payroll.insert(record.id, record.clone());
        Ok(Some(record))
    }

    fn modify(
        &self,
        id: u64,
        change: &mut dyn FnMut(&mut PayrollRecord) -> EngineResult<()>,
    ) -> EngineResult<PayrollRecord> {
        let mut tables = self.write()?;
        let row = tables
            .payroll
            .get_mut(&id)
            .ok_or_else(|| EngineError::not_found("payroll", id))?;

        let mut changed = row.clone();
        change(&mut changed)?;
        *row = changed.clone();
        Ok(changed)
    }

    fn find_by_id(&self, id: u64) -> EngineResult<Option<PayrollRecord>> {
        Ok(self.read()?.payroll.get(&id).cloned())
    }

    fn find_by_employee_and_period(
        &self,
        employee_id: u64,
        month: u32,
        year: i32,
    ) -> EngineResult<Option<PayrollRecord>> {
        Ok(self
            .read()?
            .payroll
            .values()
            .find(|r| r.employee_id == employee_id && r.month == month && r.year == year)
            .cloned())
    }

    fn find_by_period(&self, month: u32, year: i32) -> EngineResult<Vec<PayrollRecord>> {
        Ok(self
            .read()?
            .payroll
            .values()
            .filter(|r| r.month == month && r.year == year)
            .cloned()
            .collect())
    }

    fn list(
        &self,
        filter: &PayrollFilter,
        page: PageRequest,
    ) -> EngineResult<Page<PayrollRecord>> {
        let rows = self
            .read()?
            .payroll
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        Ok(Page::from_sorted(newest_first(rows, |r| r.id), page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttendanceStatus, EmploymentStatus, LeaveStatus, PayrollStatus};
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, day).unwrap()
    }

    fn employee(id: u64, status: EmploymentStatus) -> Employee {
        Employee {
            id,
            employee_code: format!("EMP{:03}", id),
            first_name: "Test".to_string(),
            last_name: format!("Employee{}", id),
            position: String::new(),
            hire_date: d(1),
            salary: Decimal::new(1000, 0),
            status,
        }
    }

    fn payroll(employee_id: u64, month: u32) -> PayrollRecord {
        PayrollRecord {
            id: 0,
            employee_id,
            month,
            year: 2026,
            basic_salary: Decimal::new(1000, 0),
            allowances: Decimal::ZERO,
            deductions: Decimal::ZERO,
            tax: Decimal::new(100, 0),
            net_salary: Decimal::new(900, 0),
            payment_date: None,
            status: PayrollStatus::Pending,
            created_at: Utc::now(),
        }
    }

    fn leave_request(employee_id: u64) -> LeaveRequest {
        LeaveRequest {
            id: 0,
            employee_id,
            leave_type: LeaveType::Annual,
            start_date: d(4),
            end_date: d(6),
            total_days: 3,
            reason: "holiday".to_string(),
            status: LeaveStatus::Pending,
            approved_by: None,
            approved_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_list_active_skips_inactive_employees() {
        let store = MemoryStore::with_employees(vec![
            employee(1, EmploymentStatus::Active),
            employee(2, EmploymentStatus::Terminated),
            employee(3, EmploymentStatus::Active),
        ]);
        let ids: Vec<u64> = store.list_active().unwrap().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_attendance_unique_per_employee_and_date() {
        let store = MemoryStore::new();
        AttendanceStore::create(&store, AttendanceRecord::new(1, d(4), AttendanceStatus::Present))
            .unwrap();
        let duplicate =
            AttendanceStore::create(&store, AttendanceRecord::new(1, d(4), AttendanceStatus::Manual));
        assert!(matches!(duplicate, Err(EngineError::StorageError { .. })));

        // Same date, different employee is fine.
        AttendanceStore::create(&store, AttendanceRecord::new(2, d(4), AttendanceStatus::Present))
            .unwrap();
    }

    #[test]
    fn test_attendance_range_is_most_recent_first() {
        let store = MemoryStore::new();
        for day in [3, 9, 5] {
            AttendanceStore::create(&store, AttendanceRecord::new(1, d(day), AttendanceStatus::Present))
                .unwrap();
        }
        let dates: Vec<NaiveDate> = store
            .find_by_employee(1, d(1), d(31))
            .unwrap()
            .iter()
            .map(|r| r.date)
            .collect();
        assert_eq!(dates, vec![d(9), d(5), d(3)]);
    }

    #[test]
    fn test_payroll_unique_per_period() {
        let store = MemoryStore::new();
        PayrollStore::create(&store, payroll(1, 5)).unwrap();
        let duplicate = PayrollStore::create(&store, payroll(1, 5));
        assert!(matches!(duplicate, Err(EngineError::StorageError { .. })));
        PayrollStore::create(&store, payroll(1, 6)).unwrap();
    }

    #[test]
    fn test_payroll_list_is_newest_first_and_paged() {
        let store = MemoryStore::new();
        for employee_id in 1..=5 {
            PayrollStore::create(&store, payroll(employee_id, 5)).unwrap();
        }
        let page = store
            .list(&PayrollFilter::default(), PageRequest::new(1, 2))
            .unwrap();
        assert_eq!(page.total, 5);
        let employees: Vec<u64> = page.items.iter().map(|r| r.employee_id).collect();
        assert_eq!(employees, vec![5, 4]);
    }

    #[test]
    fn test_balance_unique_per_employee_type_year() {
        let store = MemoryStore::new();
        store
            .create_balance(LeaveBalance::new(1, LeaveType::Sick, 2026, 10))
            .unwrap();
        let duplicate = store.create_balance(LeaveBalance::new(1, LeaveType::Sick, 2026, 12));
        assert!(matches!(duplicate, Err(EngineError::StorageError { .. })));
    }

    #[test]
    fn test_apply_decision_writes_request_and_balance() {
        let store = MemoryStore::new();
        let request = store.create_request(leave_request(1)).unwrap();
        store
            .create_balance(LeaveBalance::new(1, LeaveType::Annual, 2026, 15))
            .unwrap();

        let (decided, balance) = store
            .apply_decision(request.id, LeaveDecision::Approved, 7, Utc::now())
            .unwrap();
        assert_eq!(decided.status, LeaveStatus::Approved);
        assert_eq!(decided.approved_by, Some(7));
        assert_eq!(balance.unwrap().remaining_days, 12);

        assert_eq!(
            store.find_request(request.id).unwrap().unwrap().status,
            LeaveStatus::Approved
        );
        let stored = store
            .find_balance(1, LeaveType::Annual, 2026)
            .unwrap()
            .unwrap();
        assert_eq!(stored.used_days, 3);
        assert_eq!(stored.remaining_days, 12);
    }

    #[test]
    fn test_apply_decision_consumes_from_stored_row() {
        let store = MemoryStore::new();
        let first = store.create_request(leave_request(1)).unwrap();
        let second = store.create_request(leave_request(1)).unwrap();
        store
            .create_balance(LeaveBalance::new(1, LeaveType::Annual, 2026, 15))
            .unwrap();

        store
            .apply_decision(first.id, LeaveDecision::Approved, 7, Utc::now())
            .unwrap();
        let (_, balance) = store
            .apply_decision(second.id, LeaveDecision::Approved, 7, Utc::now())
            .unwrap();

        let balance = balance.unwrap();
        assert_eq!(balance.used_days, 6);
        assert_eq!(balance.remaining_days, 9);
    }

    #[test]
    fn test_apply_decision_refuses_decided_request() {
        let store = MemoryStore::new();
        let request = store.create_request(leave_request(1)).unwrap();
        store
            .create_balance(LeaveBalance::new(1, LeaveType::Annual, 2026, 15))
            .unwrap();
        store
            .apply_decision(request.id, LeaveDecision::Rejected, 7, Utc::now())
            .unwrap();

        let again = store.apply_decision(request.id, LeaveDecision::Approved, 7, Utc::now());
        assert!(matches!(again, Err(EngineError::InvalidState { .. })));

        let stored = store.find_request(request.id).unwrap().unwrap();
        assert_eq!(stored.status, LeaveStatus::Rejected);
        let balance = store
            .find_balance(1, LeaveType::Annual, 2026)
            .unwrap()
            .unwrap();
        assert_eq!(balance.used_days, 0);
    }

    #[test]
    fn test_apply_decision_missing_request_is_not_found() {
        let store = MemoryStore::new();
        let result = store.apply_decision(5, LeaveDecision::Approved, 7, Utc::now());
        assert!(matches!(result, Err(EngineError::NotFound { .. })));
    }

    #[test]
    fn test_payroll_create_if_absent_skips_existing_period() {
        let store = MemoryStore::new();
        let first = store.create_if_absent(payroll(1, 5)).unwrap();
        assert!(first.is_some());
        assert!(store.create_if_absent(payroll(1, 5)).unwrap().is_none());
        assert_eq!(store.find_by_period(5, 2026).unwrap().len(), 1);
        assert!(
            store
                .find_by_employee_and_period(1, 5, 2026)
                .unwrap()
                .is_some()
        );
    }

    #[test]
    fn test_payroll_modify_keeps_row_when_change_fails() {
        let store = MemoryStore::new();
        let record = PayrollStore::create(&store, payroll(1, 5)).unwrap();

        let result = store.modify(record.id, &mut |row: &mut PayrollRecord| {
            row.tax = Decimal::new(999, 0);
            Err(EngineError::AlreadyProcessed { id: row.id })
        });
        assert!(matches!(result, Err(EngineError::AlreadyProcessed { .. })));
        assert_eq!(
            PayrollStore::find_by_id(&store, record.id).unwrap().unwrap(),
            record
        );

        let updated = store
            .modify(record.id, &mut |row: &mut PayrollRecord| {
                row.status = PayrollStatus::Paid;
                Ok(())
            })
            .unwrap();
        assert_eq!(updated.status, PayrollStatus::Paid);
        assert_eq!(
            PayrollStore::find_by_id(&store, record.id).unwrap().unwrap(),
            updated
        );
    }

    #[test]
    fn test_payroll_modify_missing_record_is_not_found() {
        let store = MemoryStore::new();
        let result = store.modify(3, &mut |_: &mut PayrollRecord| Ok(()));
        assert!(matches!(result, Err(EngineError::NotFound { .. })));
    }
}
