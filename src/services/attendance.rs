//! Attendance tracking: clock-in/out, manual entries and reports.

use std::sync::{Arc, Mutex};

use chrono::{Months, NaiveDate, NaiveDateTime};
use tracing::{info, warn};

use crate::calculation::{WorkingHours, derive_working_hours, summarize_attendance};
use crate::config::AttendanceSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, AttendanceStatus, AttendanceSummary, ManualAttendance};
use crate::store::{AttendanceStore, EmployeeDirectory};

use super::{ensure_employee, serialize};

/// Records daily attendance and derives worked/overtime hours.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use hr_ledger::config::AttendanceSettings;
/// use hr_ledger::models::{Employee, EmploymentStatus};
/// use hr_ledger::services::AttendanceTracker;
/// use hr_ledger::store::MemoryStore;
///
/// let day = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// let store = Arc::new(MemoryStore::with_employees(vec![Employee {
///     id: 1,
///     employee_code: "EMP001".to_string(),
///     first_name: "Sari".to_string(),
///     last_name: "Wibowo".to_string(),
///     position: String::new(),
///     hire_date: day,
///     salary: Decimal::new(5000, 0),
///     status: EmploymentStatus::Active,
/// }]));
/// let tracker = AttendanceTracker::new(store.clone(), store, AttendanceSettings::default());
///
/// tracker.clock_in(1, day, day.and_hms_opt(8, 0, 0).unwrap()).unwrap();
/// let record = tracker.clock_out(1, day, day.and_hms_opt(18, 30, 0).unwrap()).unwrap();
/// assert_eq!(record.worked_hours, Decimal::new(8, 0));
/// assert_eq!(record.overtime_hours, Decimal::new(25, 1));
/// ```
pub struct AttendanceTracker {
    directory: Arc<dyn EmployeeDirectory>,
    store: Arc<dyn AttendanceStore>,
    settings: AttendanceSettings,
    writes: Mutex<()>,
}

impl AttendanceTracker {
    /// Creates a tracker over the given directory and store.
    pub fn new(
        directory: Arc<dyn EmployeeDirectory>,
        store: Arc<dyn AttendanceStore>,
        settings: AttendanceSettings,
    ) -> Self {
        Self {
            directory,
            store,
            settings,
            writes: Mutex::new(()),
        }
    }

    /// Clocks an employee in for a date.
    ///
    /// Fails `NotFound` for an unknown employee and `Conflict` if the employee
    /// has already clocked in on that date. A record that exists without a
    /// clock-in (a manual absence, say) receives the clock-in.
    pub fn clock_in(
        &self,
        employee_id: u64,
        date: NaiveDate,
        clock_in: NaiveDateTime,
    ) -> EngineResult<AttendanceRecord> {
        ensure_employee(self.directory.as_ref(), employee_id)?;
        let _guard = serialize(&self.writes)?;

        match self.store.find_by_employee_and_date(employee_id, date)? {
            Some(existing) if existing.clock_in.is_some() => {
                warn!(employee_id, %date, "Duplicate clock-in rejected");
                Err(EngineError::Conflict {
                    message: format!("employee {} already clocked in on {}", employee_id, date),
                })
            }
            Some(mut existing) => {
                existing.clock_in = Some(clock_in);
                existing.status = AttendanceStatus::Present;
                self.store.update(&existing)?;
                info!(employee_id, %date, record_id = existing.id, "Clocked in on existing record");
                Ok(existing)
            }
            None => {
                let mut record = AttendanceRecord::new(employee_id, date, AttendanceStatus::Present);
                record.clock_in = Some(clock_in);
                let record = self.store.create(record).or_else(|e| {
                    // A tracker sharing the store clocked in first.
                    match self.store.find_by_employee_and_date(employee_id, date)? {
                        Some(_) => {
                            warn!(employee_id, %date, "Duplicate clock-in rejected");
                            Err(EngineError::Conflict {
                                message: format!(
                                    "employee {} already clocked in on {}",
                                    employee_id, date
                                ),
                            })
                        }
                        None => Err(e),
                    }
                })?;
                info!(employee_id, %date, record_id = record.id, "Clocked in");
                Ok(record)
            }
        }
    }

    /// Clocks an employee out and derives the day's hours.
    ///
    /// Fails `NotFound` if there is no record for the date (clock-out never
    /// creates one) and `Conflict` if the employee already clocked out.
    pub fn clock_out(
        &self,
        employee_id: u64,
        date: NaiveDate,
        clock_out: NaiveDateTime,
    ) -> EngineResult<AttendanceRecord> {
        let _guard = serialize(&self.writes)?;

        let mut record = self
            .store
            .find_by_employee_and_date(employee_id, date)?
            .ok_or_else(|| {
                warn!(employee_id, %date, "Clock-out without clock-in");
                EngineError::not_found("attendance record", format!("{}@{}", employee_id, date))
            })?;

        if record.clock_out.is_some() {
            warn!(employee_id, %date, "Duplicate clock-out rejected");
            return Err(EngineError::Conflict {
                message: format!("employee {} already clocked out on {}", employee_id, date),
            });
        }

        let hours = match record.clock_in {
            Some(clock_in) => {
                derive_working_hours(clock_in, clock_out, self.settings.standard_daily_hours)?
            }
            None => WorkingHours::ZERO,
        };
        record.clock_out = Some(clock_out);
        record.worked_hours = hours.worked_hours;
        record.overtime_hours = hours.overtime_hours;

        self.store.update(&record)?;
        info!(
            employee_id,
            %date,
            worked_hours = %record.worked_hours,
            overtime_hours = %record.overtime_hours,
            "Clocked out"
        );
        Ok(record)
    }

    /// Returns an employee's records for a calendar month, most recent first.
    pub fn get_by_employee(
        &self,
        employee_id: u64,
        month: u32,
        year: i32,
    ) -> EngineResult<Vec<AttendanceRecord>> {
        let (first, last) = month_bounds(month, year)?;
        self.store.find_by_employee(employee_id, first, last)
    }

    /// Returns every employee's records in an inclusive date range.
    pub fn get_report(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<AttendanceRecord>> {
        if end < start {
            return Err(EngineError::validation(
                "end_date",
                format!("end date {} is before start date {}", end, start),
            ));
        }
        self.store.find_by_date_range(start, end)
    }

    /// Aggregates report records per employee using the configured lateness threshold.
    pub fn summarize(&self, records: &[AttendanceRecord]) -> Vec<AttendanceSummary> {
        summarize_attendance(records, self.settings.late_after_hour)
    }

    /// Stores an administrative entry, bypassing the clock-in/out flow.
    ///
    /// Hours are derived when both timestamps are supplied.
    pub fn create_manual(&self, entry: ManualAttendance) -> EngineResult<AttendanceRecord> {
        ensure_employee(self.directory.as_ref(), entry.employee_id)?;

        let hours = match (entry.clock_in, entry.clock_out) {
            (Some(clock_in), Some(clock_out)) => {
                derive_working_hours(clock_in, clock_out, self.settings.standard_daily_hours)?
            }
            _ => WorkingHours::ZERO,
        };

        let _guard = serialize(&self.writes)?;
        if self
            .store
            .find_by_employee_and_date(entry.employee_id, entry.date)?
            .is_some()
        {
            warn!(employee_id = entry.employee_id, date = %entry.date, "Duplicate manual attendance rejected");
            return Err(EngineError::Conflict {
                message: format!(
                    "attendance record already exists for employee {} on {}",
                    entry.employee_id, entry.date
                ),
            });
        }

        let record = self.store.create(AttendanceRecord {
            id: 0,
            employee_id: entry.employee_id,
            date: entry.date,
            clock_in: entry.clock_in,
            clock_out: entry.clock_out,
            worked_hours: hours.worked_hours,
            overtime_hours: hours.overtime_hours,
            status: entry.status,
            notes: entry.notes,
        })?;
        info!(
            employee_id = record.employee_id,
            date = %record.date,
            status = ?record.status,
            "Created manual attendance"
        );
        Ok(record)
    }
}

/// First and last day of a calendar month.
fn month_bounds(month: u32, year: i32) -> EngineResult<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| EngineError::validation("month", format!("{}-{} is not a valid month", year, month)))?;
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(|| EngineError::validation("year", format!("{} is out of range", year)))?;
    Ok((first, last))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Employee, EmploymentStatus};
    use crate::store::MemoryStore;
    use rust_decimal::Decimal;
    use std::sync::Barrier;
    use std::thread;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
        d(day).and_hms_opt(h, m, 0).unwrap()
    }

    fn tracker() -> (AttendanceTracker, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::with_employees(vec![Employee {
            id: 1,
            employee_code: "EMP001".to_string(),
            first_name: "Sari".to_string(),
            last_name: "Wibowo".to_string(),
            position: String::new(),
            hire_date: d(1),
            salary: Decimal::new(5000, 0),
            status: EmploymentStatus::Active,
        }]));
        let tracker =
            AttendanceTracker::new(store.clone(), store.clone(), AttendanceSettings::default());
        (tracker, store)
    }

    #[test]
    fn test_clock_in_creates_present_record() {
        let (tracker, _) = tracker();
        let record = tracker.clock_in(1, d(2), at(2, 8, 0)).unwrap();
        assert_eq!(record.status, AttendanceStatus::Present);
        assert_eq!(record.clock_in, Some(at(2, 8, 0)));
        assert!(record.clock_out.is_none());
    }

    #[test]
    fn test_clock_in_unknown_employee_is_not_found() {
        let (tracker, _) = tracker();
        let result = tracker.clock_in(99, d(2), at(2, 8, 0));
        assert!(matches!(result, Err(EngineError::NotFound { entity: "employee", .. })));
    }

    #[test]
    fn test_second_clock_in_same_day_conflicts() {
        let (tracker, _) = tracker();
        tracker.clock_in(1, d(2), at(2, 8, 0)).unwrap();
        let result = tracker.clock_in(1, d(2), at(2, 9, 0));
        assert!(matches!(result, Err(EngineError::Conflict { .. })));
    }

    #[test]
    fn test_clock_out_without_clock_in_is_not_found() {
        let (tracker, store) = tracker();
        let result = tracker.clock_out(1, d(2), at(2, 17, 0));
        assert!(matches!(result, Err(EngineError::NotFound { .. })));
        assert!(store.find_by_employee_and_date(1, d(2)).unwrap().is_none());
    }

    #[test]
    fn test_clock_out_derives_overtime() {
        let (tracker, store) = tracker();
        tracker.clock_in(1, d(2), at(2, 8, 0)).unwrap();
        let record = tracker.clock_out(1, d(2), at(2, 18, 30)).unwrap();

        assert_eq!(record.worked_hours, Decimal::new(8, 0));
        assert_eq!(record.overtime_hours, Decimal::new(25, 1));
        let stored = store.find_by_employee_and_date(1, d(2)).unwrap().unwrap();
        assert_eq!(stored, record);
    }

    #[test]
    fn test_short_day_has_no_overtime() {
        let (tracker, _) = tracker();
        tracker.clock_in(1, d(2), at(2, 9, 0)).unwrap();
        let record = tracker.clock_out(1, d(2), at(2, 13, 30)).unwrap();
        assert_eq!(record.worked_hours, Decimal::new(45, 1));
        assert_eq!(record.overtime_hours, Decimal::ZERO);
    }

    #[test]
    fn test_second_clock_out_conflicts() {
        let (tracker, _) = tracker();
        tracker.clock_in(1, d(2), at(2, 8, 0)).unwrap();
        tracker.clock_out(1, d(2), at(2, 16, 0)).unwrap();
        let result = tracker.clock_out(1, d(2), at(2, 17, 0));
        assert!(matches!(result, Err(EngineError::Conflict { .. })));
    }

    #[test]
    fn test_clock_out_before_clock_in_is_validation_error() {
        let (tracker, store) = tracker();
        tracker.clock_in(1, d(2), at(2, 9, 0)).unwrap();
        let result = tracker.clock_out(1, d(2), at(2, 7, 0));
        assert!(matches!(result, Err(EngineError::ValidationError { .. })));
        let stored = store.find_by_employee_and_date(1, d(2)).unwrap().unwrap();
        assert!(stored.clock_out.is_none());
    }

    #[test]
    fn test_clock_in_fills_manual_absence() {
        let (tracker, _) = tracker();
        tracker
            .create_manual(ManualAttendance {
                employee_id: 1,
                date: d(3),
                clock_in: None,
                clock_out: None,
                status: AttendanceStatus::Absent,
                notes: "pre-filled".to_string(),
            })
            .unwrap();

        let record = tracker.clock_in(1, d(3), at(3, 8, 15)).unwrap();
        assert_eq!(record.status, AttendanceStatus::Present);
        assert_eq!(record.notes, "pre-filled");
    }

    #[test]
    fn test_manual_entry_duplicate_conflicts() {
        let (tracker, _) = tracker();
        tracker.clock_in(1, d(4), at(4, 8, 0)).unwrap();
        let result = tracker.create_manual(ManualAttendance {
            employee_id: 1,
            date: d(4),
            clock_in: None,
            clock_out: None,
            status: AttendanceStatus::Manual,
            notes: String::new(),
        });
        assert!(matches!(result, Err(EngineError::Conflict { .. })));
    }

    #[test]
    fn test_manual_entry_derives_hours() {
        let (tracker, _) = tracker();
        let record = tracker
            .create_manual(ManualAttendance {
                employee_id: 1,
                date: d(5),
                clock_in: Some(at(5, 7, 0)),
                clock_out: Some(at(5, 16, 0)),
                status: AttendanceStatus::Manual,
                notes: "badge reader offline".to_string(),
            })
            .unwrap();
        assert_eq!(record.worked_hours, Decimal::new(8, 0));
        assert_eq!(record.overtime_hours, Decimal::new(1, 0));
    }

    #[test]
    fn test_get_by_employee_returns_month_most_recent_first() {
        let (tracker, _) = tracker();
        for day in [2, 10, 31] {
            tracker.clock_in(1, d(day), at(day, 8, 0)).unwrap();
        }
        let april = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
        tracker
            .clock_in(1, april, april.and_hms_opt(8, 0, 0).unwrap())
            .unwrap();

        let dates: Vec<NaiveDate> = tracker
            .get_by_employee(1, 3, 2026)
            .unwrap()
            .iter()
            .map(|r| r.date)
            .collect();
        assert_eq!(dates, vec![d(31), d(10), d(2)]);
    }

    #[test]
    fn test_get_by_employee_rejects_invalid_month() {
        let (tracker, _) = tracker();
        assert!(matches!(
            tracker.get_by_employee(1, 13, 2026),
            Err(EngineError::ValidationError { .. })
        ));
    }

    #[test]
    fn test_report_range_is_inclusive() {
        let (tracker, _) = tracker();
        for day in [1, 5, 9] {
            tracker.clock_in(1, d(day), at(day, 8, 0)).unwrap();
        }
        let records = tracker.get_report(d(1), d(5)).unwrap();
        assert_eq!(records.len(), 2);

        let summaries = tracker.summarize(&records);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].present_days, 2);
    }

    #[test]
    fn test_report_end_before_start_is_validation_error() {
        let (tracker, _) = tracker();
        assert!(matches!(
            tracker.get_report(d(5), d(1)),
            Err(EngineError::ValidationError { .. })
        ));
    }

    #[test]
    fn test_concurrent_clock_in_across_trackers_keeps_one_record() {
        const CLOCKS: usize = 8;
        let (_, store) = tracker();
        let trackers = [
            AttendanceTracker::new(store.clone(), store.clone(), AttendanceSettings::default()),
            AttendanceTracker::new(store.clone(), store.clone(), AttendanceSettings::default()),
        ];

        let barrier = Barrier::new(CLOCKS);
        let results: Vec<EngineResult<AttendanceRecord>> = thread::scope(|s| {
            let handles: Vec<_> = (0..CLOCKS)
                .map(|i| {
                    let tracker = &trackers[i % trackers.len()];
                    let barrier = &barrier;
                    s.spawn(move || {
                        barrier.wait();
                        tracker.clock_in(1, d(16), at(16, 8, i as u32))
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(
            results
                .iter()
                .filter(|r| r.is_err())
                .all(|r| matches!(r, Err(EngineError::Conflict { .. })))
        );
        assert_eq!(store.find_by_date_range(d(16), d(16)).unwrap().len(), 1);
    }
}
