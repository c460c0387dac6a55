//! Application state for the HR ledger API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, EngineConfig};
use crate::services::{AttendanceTracker, LeaveLedger, PayrollCalculator, PlainTextSlipRenderer};
use crate::store::{AttendanceStore, EmployeeDirectory, LeaveStore, MemoryStore, PayrollStore};

/// Shared application state.
///
/// Holds one instance of each engine service. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    attendance: Arc<AttendanceTracker>,
    leave: Arc<LeaveLedger>,
    payroll: Arc<PayrollCalculator>,
}

impl AppState {
    /// Wires every service to a single backend that implements all stores.
    pub fn new<S>(config: &EngineConfig, store: Arc<S>) -> Self
    where
        S: EmployeeDirectory + AttendanceStore + LeaveStore + PayrollStore + 'static,
    {
        Self {
            attendance: Arc::new(AttendanceTracker::new(
                store.clone(),
                store.clone(),
                config.attendance.clone(),
            )),
            leave: Arc::new(LeaveLedger::new(
                store.clone(),
                store.clone(),
                config.leave.clone(),
                config.pagination(),
            )),
            payroll: Arc::new(PayrollCalculator::new(
                store.clone(),
                store,
                Arc::new(PlainTextSlipRenderer),
                config.payroll.clone(),
            )),
        }
    }

    /// Builds state over an in-memory store seeded with the loaded roster.
    pub fn from_config(loader: ConfigLoader) -> Self {
        let (config, employees) = loader.into_parts();
        Self::new(&config, Arc::new(MemoryStore::with_employees(employees)))
    }

    /// The attendance service.
    pub fn attendance(&self) -> &AttendanceTracker {
        &self.attendance
    }

    /// The leave service.
    pub fn leave(&self) -> &LeaveLedger {
        &self.leave
    }

    /// The payroll service.
    pub fn payroll(&self) -> &PayrollCalculator {
        &self.payroll
    }
}
