//! Leave ledger: request validation, balance accounting and approvals.

use std::sync::Arc;

use chrono::{Datelike, Utc};
use tracing::{info, warn};

use crate::calculation::inclusive_day_count;
use crate::config::{LeaveSettings, PaginationSettings};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    LeaveBalance, LeaveDecision, LeaveFilter, LeaveRequest, LeaveStatus, NewLeaveRequest, Page,
    PageRequest,
};
use crate::store::{EmployeeDirectory, LeaveStore};

use super::ensure_employee;

/// Validates leave requests and keeps per-type, per-year balances.
///
/// Balance rows are created lazily from the configured entitlement schedule
/// by [`LeaveLedger::ensure_balances`]. Decisions are applied by the store
/// against its own rows, so ledgers sharing a store never lose each other's
/// balance changes.
pub struct LeaveLedger {
    directory: Arc<dyn EmployeeDirectory>,
    store: Arc<dyn LeaveStore>,
    settings: LeaveSettings,
    pagination: PaginationSettings,
}

impl LeaveLedger {
    /// Creates a ledger over the given directory and store.
    pub fn new(
        directory: Arc<dyn EmployeeDirectory>,
        store: Arc<dyn LeaveStore>,
        settings: LeaveSettings,
        pagination: PaginationSettings,
    ) -> Self {
        Self {
            directory,
            store,
            settings,
            pagination,
        }
    }

    /// Validates and stores a new pending request.
    ///
    /// Fails `NotFound` for an unknown employee, `ValidationError` if the end
    /// date precedes the start date, and `InsufficientBalance` if the balance
    /// for the start date's year cannot cover the request. The balance is only
    /// checked here; it is consumed on approval.
    pub fn create_request(&self, input: NewLeaveRequest) -> EngineResult<LeaveRequest> {
        ensure_employee(self.directory.as_ref(), input.employee_id)?;
        let total_days = inclusive_day_count(input.start_date, input.end_date)?;

        let year = input.start_date.year();
        let balance = self
            .ensure_balances(input.employee_id, year)?
            .into_iter()
            .find(|b| b.leave_type == input.leave_type);

        if let Some(balance) = balance {
            if balance.remaining_days < total_days {
                warn!(
                    employee_id = input.employee_id,
                    leave_type = %input.leave_type,
                    requested = total_days,
                    remaining = balance.remaining_days,
                    "Insufficient leave balance"
                );
                return Err(EngineError::InsufficientBalance {
                    leave_type: input.leave_type.to_string(),
                    requested: total_days,
                    remaining: balance.remaining_days,
                });
            }
        }

        let request = self.store.create_request(LeaveRequest {
            id: 0,
            employee_id: input.employee_id,
            leave_type: input.leave_type,
            start_date: input.start_date,
            end_date: input.end_date,
            total_days,
            reason: input.reason,
            status: LeaveStatus::Pending,
            approved_by: None,
            approved_at: None,
            created_at: Utc::now(),
        })?;

        info!(
            request_id = request.id,
            employee_id = request.employee_id,
            leave_type = %request.leave_type,
            total_days,
            "Created leave request"
        );
        Ok(request)
    }

    /// Decides a pending request.
    ///
    /// Fails `NotFound` if the request is missing and `InvalidState` if it has
    /// already been decided. Approval adds the request's days to the matching
    /// balance without re-checking sufficiency, so `remaining_days` can go
    /// negative. Rejection leaves the balance untouched.
    pub fn approve(
        &self,
        request_id: u64,
        approver_id: u64,
        decision: LeaveDecision,
    ) -> EngineResult<LeaveRequest> {
        let (request, balance) = self
            .store
            .apply_decision(request_id, decision, approver_id, Utc::now())
            .inspect_err(|e| {
                if let EngineError::InvalidState { .. } = e {
                    warn!(request_id, "Leave request already decided");
                }
            })?;

        info!(
            request_id,
            approver_id,
            status = ?request.status,
            remaining_days = balance.as_ref().map(|b| b.remaining_days),
            "Decided leave request"
        );
        Ok(request)
    }

    /// Returns a single request.
    pub fn get(&self, request_id: u64) -> EngineResult<LeaveRequest> {
        self.store
            .find_request(request_id)?
            .ok_or_else(|| EngineError::not_found("leave request", request_id))
    }

    /// Lists requests matching the filter, newest first.
    pub fn list(&self, filter: LeaveFilter, page: PageRequest) -> EngineResult<Page<LeaveRequest>> {
        let page = page.normalize(self.pagination.default_limit, self.pagination.max_limit);
        self.store.list_requests(&filter, page)
    }

    /// Returns the employee's balances for the current calendar year,
    /// materializing the default schedule if none exist yet.
    pub fn get_balance(&self, employee_id: u64) -> EngineResult<Vec<LeaveBalance>> {
        self.balances_for_year(employee_id, Utc::now().year())
    }

    /// Returns the employee's balances for `year`, materializing the default
    /// schedule if none exist yet.
    pub fn balances_for_year(&self, employee_id: u64, year: i32) -> EngineResult<Vec<LeaveBalance>> {
        ensure_employee(self.directory.as_ref(), employee_id)?;
        self.ensure_balances(employee_id, year)
    }

    /// Creates whichever default entitlement rows are missing for
    /// (employee, year), then returns all of the employee's balances for that
    /// year.
    ///
    /// This is the only read path with a write side effect.
    pub fn ensure_balances(&self, employee_id: u64, year: i32) -> EngineResult<Vec<LeaveBalance>> {
        let existing = self.store.find_balances(employee_id, year)?;
        let missing: Vec<_> = self
            .settings
            .default_entitlements
            .iter()
            .filter(|(leave_type, _)| !existing.iter().any(|b| b.leave_type == **leave_type))
            .collect();
        if missing.is_empty() {
            return Ok(existing);
        }

        for (leave_type, days) in &missing {
            let created = self
                .store
                .create_balance(LeaveBalance::new(employee_id, **leave_type, year, **days));
            // Another ledger on the same store may have created the row first.
            if let Err(e) = created {
                if self.store.find_balance(employee_id, **leave_type, year)?.is_none() {
                    return Err(e);
                }
            }
        }
        info!(
            employee_id,
            year,
            types = missing.len(),
            "Initialized default leave balances"
        );

        self.store.find_balances(employee_id, year)
    }
}
