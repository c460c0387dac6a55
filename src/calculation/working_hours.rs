//! Worked-hours derivation for clock-in/clock-out pairs.
//!
//! This module splits the raw duration between a clock-in and a clock-out into
//! regular worked hours (capped at the standard day) and overtime hours.

use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Standard working hours per day; time beyond this is overtime.
pub const DEFAULT_STANDARD_DAILY_HOURS: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Decimal places kept on derived hour figures.
pub const HOURS_DECIMAL_PLACES: u32 = 2;

/// The split of a clocked duration into regular and overtime hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    /// Regular hours, never more than the standard day.
    pub worked_hours: Decimal,
    /// Hours beyond the standard day, never negative.
    pub overtime_hours: Decimal,
}

impl WorkingHours {
    /// No hours worked.
    pub const ZERO: WorkingHours = WorkingHours {
        worked_hours: Decimal::ZERO,
        overtime_hours: Decimal::ZERO,
    };
}

/// Splits `raw_hours` at `standard_hours`.
///
/// # Examples
///
/// ```
/// use hr_ledger::calculation::{split_overtime, DEFAULT_STANDARD_DAILY_HOURS};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let hours = split_overtime(Decimal::from_str("10.5").unwrap(), DEFAULT_STANDARD_DAILY_HOURS);
/// assert_eq!(hours.worked_hours, Decimal::from_str("8").unwrap());
/// assert_eq!(hours.overtime_hours, Decimal::from_str("2.5").unwrap());
/// ```
pub fn split_overtime(raw_hours: Decimal, standard_hours: Decimal) -> WorkingHours {
    if raw_hours > standard_hours {
        WorkingHours {
            worked_hours: standard_hours,
            overtime_hours: raw_hours - standard_hours,
        }
    } else {
        WorkingHours {
            worked_hours: raw_hours,
            overtime_hours: Decimal::ZERO,
        }
    }
}

/// Converts a clock-in/clock-out pair into fractional hours, rounded to
/// [`HOURS_DECIMAL_PLACES`] from whole minutes.
///
/// Returns a `ValidationError` if the clock-out precedes the clock-in.
pub fn clocked_hours(clock_in: NaiveDateTime, clock_out: NaiveDateTime) -> EngineResult<Decimal> {
    let minutes = (clock_out - clock_in).num_minutes();
    if minutes < 0 {
        return Err(EngineError::validation(
            "clock_out",
            format!("clock-out {} precedes clock-in {}", clock_out, clock_in),
        ));
    }

    Ok((Decimal::from(minutes) / Decimal::from(60))
        .round_dp_with_strategy(HOURS_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero))
}

/// Derives worked and overtime hours for a clocked day.
///
/// # Examples
///
/// ```
/// use hr_ledger::calculation::{derive_working_hours, DEFAULT_STANDARD_DAILY_HOURS};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let day = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// let hours = derive_working_hours(
///     day.and_hms_opt(8, 0, 0).unwrap(),
///     day.and_hms_opt(18, 30, 0).unwrap(),
///     DEFAULT_STANDARD_DAILY_HOURS,
/// )
/// .unwrap();
/// assert_eq!(hours.worked_hours, Decimal::new(8, 0));
/// assert_eq!(hours.overtime_hours, Decimal::new(25, 1));
/// ```
pub fn derive_working_hours(
    clock_in: NaiveDateTime,
    clock_out: NaiveDateTime,
    standard_hours: Decimal,
) -> EngineResult<WorkingHours> {
    let raw = clocked_hours(clock_in, clock_out)?;
    Ok(split_overtime(raw, standard_hours))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 2)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_short_day_has_no_overtime() {
        let hours = derive_working_hours(at(9, 0), at(15, 45), DEFAULT_STANDARD_DAILY_HOURS).unwrap();
        assert_eq!(hours.worked_hours, dec("6.75"));
        assert_eq!(hours.overtime_hours, Decimal::ZERO);
    }

    #[test]
    fn test_exact_standard_day_has_no_overtime() {
        let hours = derive_working_hours(at(9, 0), at(17, 0), DEFAULT_STANDARD_DAILY_HOURS).unwrap();
        assert_eq!(hours.worked_hours, dec("8"));
        assert_eq!(hours.overtime_hours, Decimal::ZERO);
    }

    #[test]
    fn test_long_day_caps_worked_and_carries_overtime() {
        let hours = derive_working_hours(at(8, 0), at(18, 30), DEFAULT_STANDARD_DAILY_HOURS).unwrap();
        assert_eq!(hours.worked_hours, dec("8"));
        assert_eq!(hours.overtime_hours, dec("2.5"));
    }

    #[test]
    fn test_fractional_minutes_round_to_two_places() {
        // 20 minutes = 0.333... hours
        let raw = clocked_hours(at(9, 0), at(9, 20)).unwrap();
        assert_eq!(raw, dec("0.33"));
    }

    #[test]
    fn test_clock_out_before_clock_in_is_rejected() {
        let result = clocked_hours(at(17, 0), at(9, 0));
        assert!(matches!(
            result,
            Err(EngineError::ValidationError { ref field, .. }) if field == "clock_out"
        ));
    }

    #[test]
    fn test_custom_standard_hours() {
        let hours = split_overtime(dec("7.5"), dec("7"));
        assert_eq!(hours.worked_hours, dec("7"));
        assert_eq!(hours.overtime_hours, dec("0.5"));
    }

    proptest! {
        #[test]
        fn prop_split_preserves_total(minutes in 0i64..(24 * 60)) {
            let raw = Decimal::from(minutes) / Decimal::from(60);
            let hours = split_overtime(raw, DEFAULT_STANDARD_DAILY_HOURS);
            prop_assert_eq!(hours.worked_hours + hours.overtime_hours, raw);
            prop_assert!(hours.worked_hours <= DEFAULT_STANDARD_DAILY_HOURS);
            prop_assert!(hours.overtime_hours >= Decimal::ZERO);
        }
    }
}
