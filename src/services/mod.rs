//! Engine services.
//!
//! Each service owns the business rules for one area of the ledger and talks
//! to storage only through the traits in [`crate::store`]. Leave decisions
//! and payroll writes are conditional store operations. Attendance writes are
//! serialized per tracker, and the store's unique keys settle races between
//! trackers.

mod attendance;
mod leave;
mod payroll;
mod slip;

use std::sync::{Mutex, MutexGuard};

use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::Employee;
use crate::store::EmployeeDirectory;

pub use attendance::AttendanceTracker;
pub use leave::LeaveLedger;
pub use payroll::{PayrollCalculator, RenderedSlip};
pub use slip::{PlainTextSlipRenderer, SlipRenderer};

/// Resolves an employee or fails `NotFound`.
pub(crate) fn ensure_employee(
    directory: &dyn EmployeeDirectory,
    employee_id: u64,
) -> EngineResult<Employee> {
    match directory.find_by_id(employee_id)? {
        Some(employee) => Ok(employee),
        None => {
            warn!(employee_id, "Unknown employee");
            Err(EngineError::not_found("employee", employee_id))
        }
    }
}

/// Acquires a service's write lock.
pub(crate) fn serialize(lock: &Mutex<()>) -> EngineResult<MutexGuard<'_, ()>> {
    lock.lock().map_err(|_| EngineError::StorageError {
        message: "write lock poisoned".to_string(),
    })
}
