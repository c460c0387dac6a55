//! Payroll slip rendering.
//!
//! The engine hands a fully populated paid record to a [`SlipRenderer`] and
//! treats the output as opaque bytes.

use chrono::Month;
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, PayrollRecord};

/// Produces a payroll slip document.
pub trait SlipRenderer: Send + Sync {
    /// Renders the slip for a paid record and its employee.
    fn render(&self, record: &PayrollRecord, employee: &Employee) -> EngineResult<Vec<u8>>;

    /// MIME type of the rendered document.
    fn content_type(&self) -> &'static str;

    /// File extension for downloads, without the leading dot.
    fn file_extension(&self) -> &'static str;
}

/// Renders a fixed-width plain-text slip.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextSlipRenderer;

impl PlainTextSlipRenderer {
    fn line(label: &str, amount: Decimal) -> String {
        format!("{:<20}{:>18}\n", label, format!("{:.2}", amount))
    }
}

impl SlipRenderer for PlainTextSlipRenderer {
    fn render(&self, record: &PayrollRecord, employee: &Employee) -> EngineResult<Vec<u8>> {
        let month = u8::try_from(record.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .ok_or_else(|| EngineError::RenderError {
                message: format!("payroll {} has invalid month {}", record.id, record.month),
            })?;
        let paid_on = record.payment_date.ok_or_else(|| EngineError::RenderError {
            message: format!("payroll {} has no payment date", record.id),
        })?;

        let mut slip = String::new();
        slip.push_str("PAYROLL SLIP\n");
        slip.push_str(&"=".repeat(38));
        slip.push('\n');
        slip.push_str(&format!("Employee: {}\n", employee.full_name()));
        slip.push_str(&format!("Code:     {}\n", employee.employee_code));
        if !employee.position.is_empty() {
            slip.push_str(&format!("Position: {}\n", employee.position));
        }
        slip.push_str(&format!("Period:   {} {}\n", month.name(), record.year));
        slip.push_str(&"-".repeat(38));
        slip.push('\n');
        slip.push_str(&Self::line("Basic salary", record.basic_salary));
        slip.push_str(&Self::line("Allowances", record.allowances));
        slip.push_str(&Self::line("Deductions", record.deductions));
        slip.push_str(&Self::line("Tax", record.tax));
        slip.push_str(&"-".repeat(38));
        slip.push('\n');
        slip.push_str(&Self::line("Net salary", record.net_salary));
        slip.push_str(&format!("Paid on:  {}\n", paid_on.format("%Y-%m-%d")));

        Ok(slip.into_bytes())
    }

    fn content_type(&self) -> &'static str {
        "text/plain; charset=utf-8"
    }

    fn file_extension(&self) -> &'static str {
        "txt"
    }
}
