//! Payroll generation, adjustment, settlement and reporting.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::calculation::{compute_tax, net_salary, round_currency, summarize_payroll};
use crate::config::{PaginationSettings, PayrollSettings};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Page, PageRequest, PayrollAdjustment, PayrollFilter, PayrollRecord, PayrollStatus,
    PayrollSummary,
};
use crate::store::{EmployeeDirectory, PayrollStore};

use super::slip::SlipRenderer;
use super::ensure_employee;

/// A rendered payroll slip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSlip {
    /// MIME type reported by the renderer.
    pub content_type: &'static str,
    /// Suggested download file name.
    pub file_name: String,
    /// Document bytes.
    pub bytes: Vec<u8>,
}

/// Generates and settles payroll records, one per employee per period.
///
/// Every write goes through a single conditional store operation, so
/// calculators sharing a store cannot create a period twice or pay a record
/// twice.
pub struct PayrollCalculator {
    directory: Arc<dyn EmployeeDirectory>,
    store: Arc<dyn PayrollStore>,
    renderer: Arc<dyn SlipRenderer>,
    settings: PayrollSettings,
}

impl PayrollCalculator {
    /// Creates a calculator over the given directory, store and slip renderer.
    pub fn new(
        directory: Arc<dyn EmployeeDirectory>,
        store: Arc<dyn PayrollStore>,
        renderer: Arc<dyn SlipRenderer>,
        settings: PayrollSettings,
    ) -> Self {
        Self {
            directory,
            store,
            renderer,
            settings,
        }
    }

    /// Creates a pending record for every active employee without one for
    /// the period, and returns only the newly created records.
    ///
    /// Tax is the configured flat rate on the employee's current salary;
    /// allowances and deductions start at zero.
    pub fn generate(&self, month: u32, year: i32) -> EngineResult<Vec<PayrollRecord>> {
        validate_month(month)?;

        let mut created = Vec::new();
        let mut skipped = 0usize;
        for employee in self.directory.list_active()? {
            let basic_salary = round_currency(employee.salary);
            let tax = compute_tax(basic_salary, self.settings.tax_rate);
            let inserted = self.store.create_if_absent(PayrollRecord {
                id: 0,
                employee_id: employee.id,
                month,
                year,
                basic_salary,
                allowances: Decimal::ZERO,
                deductions: Decimal::ZERO,
                tax,
                net_salary: net_salary(basic_salary, Decimal::ZERO, Decimal::ZERO, tax),
                payment_date: None,
                status: PayrollStatus::Pending,
                created_at: Utc::now(),
            })?;
            match inserted {
                Some(record) => created.push(record),
                None => skipped += 1,
            }
        }

        info!(
            period = %format!("{:02}/{}", month, year),
            created = created.len(),
            skipped,
            "Generated payroll"
        );
        Ok(created)
    }

    /// Returns a single record.
    pub fn get(&self, id: u64) -> EngineResult<PayrollRecord> {
        self.store
            .find_by_id(id)?
            .ok_or_else(|| EngineError::not_found("payroll", id))
    }

    /// Lists records matching the filter, newest first.
    pub fn list(
        &self,
        filter: PayrollFilter,
        page: PageRequest,
    ) -> EngineResult<Page<PayrollRecord>> {
        let PaginationSettings {
            default_limit,
            max_limit,
        } = self.settings.pagination;
        self.store.list(&filter, page.normalize(default_limit, max_limit))
    }

    /// Overwrites a record's amounts and recomputes its net salary.
    ///
    /// Paid records are not protected: adjusting one changes the stored net
    /// salary without touching the payment status or date.
    pub fn update(&self, id: u64, adjustment: PayrollAdjustment) -> EngineResult<PayrollRecord> {
        let record = self.store.modify(id, &mut |record: &mut PayrollRecord| {
            if record.is_paid() {
                warn!(payroll_id = id, "Adjusting a payroll record that is already paid");
            }

            record.basic_salary = round_currency(adjustment.basic_salary);
            record.allowances = round_currency(adjustment.allowances);
            record.deductions = round_currency(adjustment.deductions);
            record.tax = round_currency(adjustment.tax);
            record.net_salary = net_salary(
                record.basic_salary,
                record.allowances,
                record.deductions,
                record.tax,
            );
            Ok(())
        })?;

        info!(payroll_id = id, net_salary = %record.net_salary, "Updated payroll");
        Ok(record)
    }

    /// Marks a pending record paid and stamps the payment date.
    ///
    /// Fails `AlreadyProcessed` if the record is already paid. The paid check
    /// and the status change happen in one store operation.
    pub fn process_payment(&self, id: u64) -> EngineResult<PayrollRecord> {
        let record = self.store.modify(id, &mut |record: &mut PayrollRecord| {
            if record.is_paid() {
                warn!(payroll_id = id, "Payment already processed");
                return Err(EngineError::AlreadyProcessed { id });
            }

            record.status = PayrollStatus::Paid;
            record.payment_date = Some(Utc::now());
            Ok(())
        })?;

        info!(
            payroll_id = id,
            employee_id = record.employee_id,
            net_salary = %record.net_salary,
            "Processed payment"
        );
        Ok(record)
    }

    /// Totals every record in a period. A period without records is all zeros.
    pub fn summary(&self, month: u32, year: i32) -> EngineResult<PayrollSummary> {
        validate_month(month)?;
        let records = self.store.find_by_period(month, year)?;
        Ok(summarize_payroll(&records))
    }

    /// Renders the slip for a paid record.
    ///
    /// Fails `NotFound` if the record or its employee is missing and
    /// `InvalidState` if the record has not been paid.
    pub fn render_slip(&self, id: u64) -> EngineResult<RenderedSlip> {
        let record = self.get(id)?;
        if !record.is_paid() {
            return Err(EngineError::InvalidState {
                message: format!("payroll {} must be paid before download", id),
            });
        }

        let employee = ensure_employee(self.directory.as_ref(), record.employee_id)?;
        let bytes = self.renderer.render(&record, &employee)?;

        Ok(RenderedSlip {
            content_type: self.renderer.content_type(),
            file_name: format!(
                "payslip_{}_{}_{:02}.{}",
                employee.employee_code,
                record.year,
                record.month,
                self.renderer.file_extension()
            ),
            bytes,
        })
    }
}

fn validate_month(month: u32) -> EngineResult<()> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(EngineError::validation(
            "month",
            format!("{} is not between 1 and 12", month),
        ))
    }
}
