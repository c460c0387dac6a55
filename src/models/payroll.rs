//! Payroll models.
//!
//! This module contains the [`PayrollRecord`] generated once per employee per
//! period, the [`PayrollAdjustment`] used for manual corrections, and the
//! [`PayrollSummary`] aggregate for a period.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment status of a payroll record. `Pending` moves once to `Paid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollStatus {
    /// Generated, not yet disbursed.
    Pending,
    /// Disbursed; `payment_date` is set.
    Paid,
}

/// One employee's payroll for one (month, year) period.
///
/// # Example
///
/// ```
/// use hr_ledger::models::{PayrollRecord, PayrollStatus};
/// use rust_decimal::Decimal;
/// use chrono::Utc;
///
/// let record = PayrollRecord {
///     id: 1,
///     employee_id: 4,
///     month: 3,
///     year: 2026,
///     basic_salary: Decimal::new(500000, 2),
///     allowances: Decimal::ZERO,
///     deductions: Decimal::ZERO,
///     tax: Decimal::new(50000, 2),
///     net_salary: Decimal::new(450000, 2),
///     payment_date: None,
///     status: PayrollStatus::Pending,
///     created_at: Utc::now(),
/// };
/// assert!(!record.is_paid());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Store-assigned identifier; increases with creation order.
    pub id: u64,
    /// The paid employee.
    pub employee_id: u64,
    /// Period month (1-12).
    pub month: u32,
    /// Period year.
    pub year: i32,
    /// Salary snapshotted at generation time.
    pub basic_salary: Decimal,
    /// Additional allowances.
    pub allowances: Decimal,
    /// Deductions.
    pub deductions: Decimal,
    /// Withheld tax.
    pub tax: Decimal,
    /// `basic_salary + allowances - deductions - tax`.
    pub net_salary: Decimal,
    /// When payment was processed.
    pub payment_date: Option<DateTime<Utc>>,
    /// Payment status.
    pub status: PayrollStatus,
    /// When the record was generated.
    pub created_at: DateTime<Utc>,
}

impl PayrollRecord {
    /// Returns true once payment has been processed.
    pub fn is_paid(&self) -> bool {
        self.status == PayrollStatus::Paid
    }
}

/// Manually adjusted amounts for a payroll record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollAdjustment {
    /// New basic salary.
    pub basic_salary: Decimal,
    /// New allowances.
    #[serde(default)]
    pub allowances: Decimal,
    /// New deductions.
    #[serde(default)]
    pub deductions: Decimal,
    /// New tax.
    #[serde(default)]
    pub tax: Decimal,
}

/// Filters for listing payroll records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollFilter {
    /// Only records for this month.
    #[serde(default)]
    pub month: Option<u32>,
    /// Only records for this year.
    #[serde(default)]
    pub year: Option<i32>,
}

impl PayrollFilter {
    /// Returns true if the record satisfies every set filter.
    pub fn matches(&self, record: &PayrollRecord) -> bool {
        self.month.is_none_or(|month| record.month == month)
            && self.year.is_none_or(|year| record.year == year)
    }
}

/// Aggregate totals for a payroll period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSummary {
    /// Number of records in the period.
    pub total_employees: u32,
    /// Sum of basic salaries.
    pub total_basic_pay: Decimal,
    /// Sum of allowances.
    pub total_allowances: Decimal,
    /// Sum of deductions.
    pub total_deductions: Decimal,
    /// Sum of tax.
    pub total_tax: Decimal,
    /// Sum of net salaries.
    pub total_net_pay: Decimal,
}
