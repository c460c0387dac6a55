//! Calculation logic for the HR ledger engine.
//!
//! This module contains the pure rule functions the services build on:
//! worked/overtime hour derivation, inclusive leave day counting and default
//! entitlements, payroll tax and net salary with currency rounding, and
//! attendance report aggregation.

mod attendance_report;
mod leave_days;
mod payroll_amounts;
mod working_hours;

pub use attendance_report::{DEFAULT_LATE_AFTER_HOUR, is_late, summarize_attendance};
pub use leave_days::{default_entitlements, inclusive_day_count};
pub use payroll_amounts::{
    CURRENCY_DECIMAL_PLACES, DEFAULT_TAX_RATE, compute_tax, net_salary, round_currency,
    summarize_payroll,
};
pub use working_hours::{
    DEFAULT_STANDARD_DAILY_HOURS, HOURS_DECIMAL_PLACES, WorkingHours, clocked_hours,
    derive_working_hours, split_overtime,
};
