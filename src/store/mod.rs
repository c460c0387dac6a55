//! Persistence contracts consumed by the engine services.
//!
//! Each trait is the storage boundary for one entity. Implementations must
//! enforce the composite-key uniqueness constraints (one attendance record per
//! employee per date, one payroll record per employee per period, one balance
//! per employee, leave type and year) and report violations as
//! [`EngineError::StorageError`](crate::error::EngineError::StorageError).
//!
//! Lifecycle transitions (deciding a leave request, settling a payroll
//! record) are read-modify-write operations on the stored row, so several
//! engine instances sharing one store cannot overwrite each other's changes.
//!
//! [`MemoryStore`] implements every trait and is what the binary and the
//! tests run against.

mod memory;

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::EngineResult;
use crate::models::{
    AttendanceRecord, Employee, LeaveBalance, LeaveDecision, LeaveFilter, LeaveRequest, LeaveType,
    Page, PageRequest, PayrollFilter, PayrollRecord,
};

pub use memory::MemoryStore;

/// Read-only access to employees.
pub trait EmployeeDirectory: Send + Sync {
    /// Looks up an employee by id.
    fn find_by_id(&self, id: u64) -> EngineResult<Option<Employee>>;

    /// Lists every employee with active employment status, ordered by id.
    fn list_active(&self) -> EngineResult<Vec<Employee>>;
}

/// Storage for attendance records.
pub trait AttendanceStore: Send + Sync {
    /// Inserts a record, assigning its id.
    fn create(&self, record: AttendanceRecord) -> EngineResult<AttendanceRecord>;

    /// Replaces a stored record.
    fn update(&self, record: &AttendanceRecord) -> EngineResult<()>;

    /// Looks up the record for an employee on a date.
    fn find_by_employee_and_date(
        &self,
        employee_id: u64,
        date: NaiveDate,
    ) -> EngineResult<Option<AttendanceRecord>>;

    /// One employee's records between two dates (inclusive), most recent first.
    fn find_by_employee(
        &self,
        employee_id: u64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<AttendanceRecord>>;

    /// Every employee's records between two dates (inclusive), most recent first.
    fn find_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<AttendanceRecord>>;
}

/// Storage for leave requests and leave balances.
pub trait LeaveStore: Send + Sync {
    /// Inserts a request, assigning its id.
    fn create_request(&self, request: LeaveRequest) -> EngineResult<LeaveRequest>;

    /// Looks up a request by id.
    fn find_request(&self, id: u64) -> EngineResult<Option<LeaveRequest>>;

    /// Lists matching requests, newest first.
    fn list_requests(
        &self,
        filter: &LeaveFilter,
        page: PageRequest,
    ) -> EngineResult<Page<LeaveRequest>>;

    /// Looks up the balance for an employee, leave type and year.
    fn find_balance(
        &self,
        employee_id: u64,
        leave_type: LeaveType,
        year: i32,
    ) -> EngineResult<Option<LeaveBalance>>;

    /// Lists an employee's balances for a year.
    fn find_balances(&self, employee_id: u64, year: i32) -> EngineResult<Vec<LeaveBalance>>;

    /// Inserts a balance, assigning its id.
    fn create_balance(&self, balance: LeaveBalance) -> EngineResult<LeaveBalance>;

    /// Decides a stored request and applies its balance change as one atomic
    /// unit, returning the decided request and the updated balance.
    ///
    /// Fails `NotFound` if the request is missing and `InvalidState` if it is
    /// no longer pending. An approval consumes the request's days from the
    /// stored balance for its leave type and start-date year, if one exists;
    /// a rejection touches no balance.
    fn apply_decision(
        &self,
        request_id: u64,
        decision: LeaveDecision,
        approver_id: u64,
        decided_at: DateTime<Utc>,
    ) -> EngineResult<(LeaveRequest, Option<LeaveBalance>)>;
}

/// Storage for payroll records.
pub trait PayrollStore: Send + Sync {
    /// Inserts a record, assigning its id.
    fn create(&self, record: PayrollRecord) -> EngineResult<PayrollRecord>;

    /// Inserts a record unless its employee already has one for the period.
    /// Returns `None` when a record already exists.
    fn create_if_absent(&self, record: PayrollRecord) -> EngineResult<Option<PayrollRecord>>;

    /// Applies `change` to the stored record and returns the result.
    ///
    /// The read, the change and the write happen under one lock. If `change`
    /// fails, its error is returned and the stored record is left as it was.
    /// Fails `NotFound` if the record is missing.
    fn modify(
        &self,
        id: u64,
        change: &mut dyn FnMut(&mut PayrollRecord) -> EngineResult<()>,
    ) -> EngineResult<PayrollRecord>;

    /// Looks up a record by id.
    fn find_by_id(&self, id: u64) -> EngineResult<Option<PayrollRecord>>;

    /// Looks up an employee's record for a period.
    fn find_by_employee_and_period(
        &self,
        employee_id: u64,
        month: u32,
        year: i32,
    ) -> EngineResult<Option<PayrollRecord>>;

    /// Every record for a period, ordered by id.
    fn find_by_period(&self, month: u32, year: i32) -> EngineResult<Vec<PayrollRecord>>;

    /// Lists matching records, newest first.
    fn list(&self, filter: &PayrollFilter, page: PageRequest)
    -> EngineResult<Page<PayrollRecord>>;
}
