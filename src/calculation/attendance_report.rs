//! Attendance report aggregation.
//!
//! Folds raw attendance records into one [`AttendanceSummary`] per employee.

use std::collections::BTreeMap;

use chrono::Timelike;
use rust_decimal::Decimal;

use crate::models::{AttendanceRecord, AttendanceStatus, AttendanceSummary};

/// Clock-ins after this hour of the day count as late.
pub const DEFAULT_LATE_AFTER_HOUR: u32 = 8;

/// Returns true if the record is late, either by status or by a clock-in
/// hour greater than `late_after_hour`.
pub fn is_late(record: &AttendanceRecord, late_after_hour: u32) -> bool {
    record.status == AttendanceStatus::Late
        || record
            .clock_in
            .is_some_and(|clock_in| clock_in.hour() > late_after_hour)
}

/// Aggregates records per employee, ordered by employee id.
pub fn summarize_attendance(
    records: &[AttendanceRecord],
    late_after_hour: u32,
) -> Vec<AttendanceSummary> {
    let mut by_employee: BTreeMap<u64, AttendanceSummary> = BTreeMap::new();

    for record in records {
        let summary = by_employee
            .entry(record.employee_id)
            .or_insert_with(|| AttendanceSummary {
                employee_id: record.employee_id,
                total_days: 0,
                present_days: 0,
                absent_days: 0,
                late_days: 0,
                total_hours: Decimal::ZERO,
                overtime_hours: Decimal::ZERO,
            });

        summary.total_days += 1;
        if record.status == AttendanceStatus::Absent {
            summary.absent_days += 1;
        } else {
            summary.present_days += 1;
        }
        if is_late(record, late_after_hour) {
            summary.late_days += 1;
        }
        summary.total_hours += record.worked_hours;
        summary.overtime_hours += record.overtime_hours;
    }

    by_employee.into_values().collect()
}
