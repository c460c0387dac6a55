//! Payroll amount calculations: flat-rate tax, net salary and period totals.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{PayrollRecord, PayrollSummary};

/// Flat tax rate applied to basic salary at generation time (10%).
pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Decimal places kept on monetary amounts.
pub const CURRENCY_DECIMAL_PLACES: u32 = 2;

/// Rounds a monetary amount to cents, midpoint away from zero.
///
/// ```
/// use hr_ledger::calculation::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_currency(Decimal::from_str("10.005").unwrap()), Decimal::from_str("10.01").unwrap());
/// ```
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Tax withheld on `salary` at `rate`.
pub fn compute_tax(salary: Decimal, rate: Decimal) -> Decimal {
    round_currency(salary * rate)
}

/// `basic + allowances - deductions - tax`, rounded to cents.
pub fn net_salary(basic: Decimal, allowances: Decimal, deductions: Decimal, tax: Decimal) -> Decimal {
    round_currency(basic + allowances - deductions - tax)
}

/// Sums every amount over a period's records. An empty slice yields all zeros.
pub fn summarize_payroll(records: &[PayrollRecord]) -> PayrollSummary {
    records
        .iter()
        .fold(PayrollSummary::default(), |mut summary, record| {
            summary.total_employees += 1;
            summary.total_basic_pay += record.basic_salary;
            summary.total_allowances += record.allowances;
            summary.total_deductions += record.deductions;
            summary.total_tax += record.tax;
            summary.total_net_pay += record.net_salary;
            summary
        })
}
