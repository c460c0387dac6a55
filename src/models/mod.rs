//! Core data models for the HR ledger engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod employee;
mod leave;
mod page;
mod payroll;

pub use attendance::{AttendanceRecord, AttendanceStatus, AttendanceSummary, ManualAttendance};
pub use employee::{Employee, EmploymentStatus};
pub use leave::{
    LeaveBalance, LeaveDecision, LeaveFilter, LeaveRequest, LeaveStatus, LeaveType,
    NewLeaveRequest,
};
pub use page::{Page, PageRequest};
pub use payroll::{PayrollAdjustment, PayrollFilter, PayrollRecord, PayrollStatus, PayrollSummary};
