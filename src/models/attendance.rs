//! Attendance models.
//!
//! This module defines the [`AttendanceRecord`] stored once per employee per day,
//! the [`ManualAttendance`] input used for administrative corrections, and the
//! [`AttendanceSummary`] produced by report aggregation.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The status recorded for an attendance day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// The employee attended.
    #[default]
    Present,
    /// The employee did not attend.
    Absent,
    /// The employee attended but arrived late.
    Late,
    /// Entered manually by an administrator.
    Manual,
}

/// A single employee's attendance for one calendar date.
///
/// `worked_hours` is capped at the standard daily hours; anything beyond the
/// cap is carried in `overtime_hours`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Store-assigned identifier.
    pub id: u64,
    /// The employee this record belongs to.
    pub employee_id: u64,
    /// The calendar date (unique per employee).
    pub date: NaiveDate,
    /// When the employee clocked in.
    pub clock_in: Option<NaiveDateTime>,
    /// When the employee clocked out.
    pub clock_out: Option<NaiveDateTime>,
    /// Regular worked hours.
    pub worked_hours: Decimal,
    /// Hours beyond the standard day.
    pub overtime_hours: Decimal,
    /// Attendance status.
    pub status: AttendanceStatus,
    /// Free-text note.
    #[serde(default)]
    pub notes: String,
}

impl AttendanceRecord {
    /// Creates an unsaved record with no hours derived yet.
    pub fn new(employee_id: u64, date: NaiveDate, status: AttendanceStatus) -> Self {
        Self {
            id: 0,
            employee_id,
            date,
            clock_in: None,
            clock_out: None,
            worked_hours: Decimal::ZERO,
            overtime_hours: Decimal::ZERO,
            status,
            notes: String::new(),
        }
    }
}

/// Input for an administrative attendance entry that bypasses clock-in/out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualAttendance {
    /// The employee the entry is for.
    pub employee_id: u64,
    /// The calendar date.
    pub date: NaiveDate,
    /// Optional clock-in timestamp.
    #[serde(default)]
    pub clock_in: Option<NaiveDateTime>,
    /// Optional clock-out timestamp.
    #[serde(default)]
    pub clock_out: Option<NaiveDateTime>,
    /// Status to record.
    #[serde(default = "manual_status")]
    pub status: AttendanceStatus,
    /// Free-text note explaining the correction.
    #[serde(default)]
    pub notes: String,
}

fn manual_status() -> AttendanceStatus {
    AttendanceStatus::Manual
}

/// Per-employee aggregate over a reporting range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    /// The employee summarized.
    pub employee_id: u64,
    /// Number of records in range.
    pub total_days: u32,
    /// Records not marked absent.
    pub present_days: u32,
    /// Records marked absent.
    pub absent_days: u32,
    /// Records marked late or clocked in after the lateness threshold.
    pub late_days: u32,
    /// Sum of regular worked hours.
    pub total_hours: Decimal,
    /// Sum of overtime hours.
    pub overtime_hours: Decimal,
}
