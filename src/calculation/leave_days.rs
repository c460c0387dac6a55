//! Leave day counting and default entitlements.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};
use crate::models::LeaveType;

/// Counts the days between `start` and `end`, both inclusive.
///
/// Returns a `ValidationError` if `end` is before `start`.
///
/// # Examples
///
/// ```
/// use hr_ledger::calculation::inclusive_day_count;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2026, 4, 6).unwrap();
/// let end = NaiveDate::from_ymd_opt(2026, 4, 8).unwrap();
/// assert_eq!(inclusive_day_count(start, end).unwrap(), 3);
/// ```
pub fn inclusive_day_count(start: NaiveDate, end: NaiveDate) -> EngineResult<i32> {
    if end < start {
        return Err(EngineError::validation(
            "end_date",
            format!("end date {} is before start date {}", end, start),
        ));
    }

    let days = (end - start).num_days() + 1;
    i32::try_from(days).map_err(|_| EngineError::validation("end_date", "leave span is too long"))
}

/// The entitlement schedule applied when an employee has no balances for a year.
pub fn default_entitlements() -> BTreeMap<LeaveType, i32> {
    BTreeMap::from([
        (LeaveType::Annual, 15),
        (LeaveType::Sick, 10),
        (LeaveType::Casual, 7),
    ])
}
