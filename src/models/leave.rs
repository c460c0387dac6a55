//! Leave request and leave balance models.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The kind of leave being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    /// Paid annual leave.
    Annual,
    /// Paid sick leave.
    Sick,
    /// Short-notice casual leave.
    Casual,
    /// Unpaid leave; carries no balance.
    Unpaid,
}

impl LeaveType {
    /// Returns the snake_case name used in storage and configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveType::Annual => "annual",
            LeaveType::Sick => "sick",
            LeaveType::Casual => "casual",
            LeaveType::Unpaid => "unpaid",
        }
    }
}

impl fmt::Display for LeaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a leave request.
///
/// `Pending` moves exactly once to `Approved` or `Rejected`; both are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Awaiting a decision.
    Pending,
    /// Approved; the balance has been consumed.
    Approved,
    /// Rejected; no balance effect.
    Rejected,
}

/// A decision an approver can take on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveDecision {
    /// Approve and consume balance.
    Approved,
    /// Reject without touching the balance.
    Rejected,
}

impl From<LeaveDecision> for LeaveStatus {
    fn from(decision: LeaveDecision) -> Self {
        match decision {
            LeaveDecision::Approved => LeaveStatus::Approved,
            LeaveDecision::Rejected => LeaveStatus::Rejected,
        }
    }
}

/// A stored leave request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Store-assigned identifier; increases with creation order.
    pub id: u64,
    /// The requesting employee.
    pub employee_id: u64,
    /// The kind of leave.
    pub leave_type: LeaveType,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Inclusive day count between start and end.
    pub total_days: i32,
    /// Free-text reason.
    pub reason: String,
    /// Lifecycle status.
    pub status: LeaveStatus,
    /// Who decided the request, once decided.
    pub approved_by: Option<u64>,
    /// When the request was decided.
    pub approved_at: Option<DateTime<Utc>>,
    /// When the request was created.
    pub created_at: DateTime<Utc>,
}

impl LeaveRequest {
    /// Returns true while the request can still be decided.
    pub fn is_pending(&self) -> bool {
        self.status == LeaveStatus::Pending
    }
}

/// Input for a new leave request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLeaveRequest {
    /// The requesting employee.
    pub employee_id: u64,
    /// The kind of leave.
    pub leave_type: LeaveType,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Free-text reason.
    #[serde(default)]
    pub reason: String,
}

/// Entitlement and consumption for one (employee, leave type, year).
///
/// `remaining_days == total_days - used_days` holds after every mutation made
/// through [`LeaveBalance::consume`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveBalance {
    /// Store-assigned identifier.
    pub id: u64,
    /// The employee.
    pub employee_id: u64,
    /// The leave type.
    pub leave_type: LeaveType,
    /// Calendar year.
    pub year: i32,
    /// Entitled days.
    pub total_days: i32,
    /// Consumed days.
    pub used_days: i32,
    /// `total_days - used_days`; may be negative.
    pub remaining_days: i32,
}

impl LeaveBalance {
    /// Creates an unsaved, unused balance with the given entitlement.
    pub fn new(employee_id: u64, leave_type: LeaveType, year: i32, total_days: i32) -> Self {
        Self {
            id: 0,
            employee_id,
            leave_type,
            year,
            total_days,
            used_days: 0,
            remaining_days: total_days,
        }
    }

    /// Records `days` of usage and recomputes the remaining days.
    ///
    /// No clamping: an over-consumed balance goes negative.
    pub fn consume(&mut self, days: i32) {
        self.used_days += days;
        self.remaining_days = self.total_days - self.used_days;
    }
}

/// Filters for listing leave requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveFilter {
    /// Only requests from this employee.
    #[serde(default)]
    pub employee_id: Option<u64>,
    /// Only requests in this status.
    #[serde(default)]
    pub status: Option<LeaveStatus>,
}

impl LeaveFilter {
    /// Returns true if the request satisfies every set filter.
    pub fn matches(&self, request: &LeaveRequest) -> bool {
        self.employee_id.is_none_or(|id| request.employee_id == id)
            && self.status.is_none_or(|status| request.status == status)
    }
}
