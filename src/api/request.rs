//! Request types for the HR ledger API.
//!
//! JSON bodies and query strings accepted by the handlers. Domain input types
//! that already derive `Deserialize` (`NewLeaveRequest`, `ManualAttendance`,
//! `PayrollAdjustment`) are accepted as-is.

use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{LeaveDecision, LeaveFilter, LeaveStatus, PageRequest, PayrollFilter};

/// Body for `POST /attendance/clock-in` and `POST /attendance/clock-out`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockRequest {
    /// The employee clocking in or out.
    pub employee_id: u64,
    /// Attendance date; defaults to the date of `timestamp`.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Clock time; defaults to the current UTC time.
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
}

impl ClockRequest {
    /// Resolves the attendance date and clock time, filling in defaults.
    pub fn resolve(&self) -> (NaiveDate, NaiveDateTime) {
        let timestamp = self.timestamp.unwrap_or_else(|| Utc::now().naive_utc());
        (self.date.unwrap_or(timestamp.date()), timestamp)
    }
}

/// Query for `GET /attendance`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceQuery {
    /// The employee whose records are listed.
    pub employee_id: u64,
    /// Calendar month (1-12).
    pub month: u32,
    /// Calendar year.
    pub year: i32,
}

/// Query for `GET /attendance/report`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportQuery {
    /// First day of the report (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the report (inclusive).
    pub end_date: NaiveDate,
}

/// Body for `PUT /leaves/:id/approve`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApproveRequest {
    /// The approving manager.
    pub approver_id: u64,
    /// `approved` or `rejected`.
    pub status: LeaveDecision,
}

/// Query for `GET /leaves`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeaveListQuery {
    /// Only requests by this employee.
    pub employee_id: Option<u64>,
    /// Only requests in this status.
    pub status: Option<LeaveStatus>,
    /// 1-based page number.
    pub page: Option<u32>,
    /// Page size.
    pub limit: Option<u32>,
}

impl LeaveListQuery {
    /// Splits the query into a filter and a page request.
    pub fn into_parts(self) -> (LeaveFilter, PageRequest) {
        (
            LeaveFilter {
                employee_id: self.employee_id,
                status: self.status,
            },
            page_request(self.page, self.limit),
        )
    }
}

/// Body for `POST /payroll/generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratePayrollRequest {
    /// Calendar month (1-12).
    pub month: u32,
    /// Calendar year.
    pub year: i32,
}

/// Query for `GET /payroll`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PayrollListQuery {
    /// Only records for this month.
    pub month: Option<u32>,
    /// Only records for this year.
    pub year: Option<i32>,
    /// 1-based page number.
    pub page: Option<u32>,
    /// Page size.
    pub limit: Option<u32>,
}

impl PayrollListQuery {
    /// Splits the query into a filter and a page request.
    pub fn into_parts(self) -> (PayrollFilter, PageRequest) {
        (
            PayrollFilter {
                month: self.month,
                year: self.year,
            },
            page_request(self.page, self.limit),
        )
    }
}

/// Query for `GET /payroll/summary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodQuery {
    /// Calendar month (1-12).
    pub month: u32,
    /// Calendar year.
    pub year: i32,
}

// Missing values become 0 and are replaced with defaults during normalization.
fn page_request(page: Option<u32>, limit: Option<u32>) -> PageRequest {
    PageRequest::new(page.unwrap_or(1), limit.unwrap_or(0))
}
