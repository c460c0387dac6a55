//! HTTP API module for the HR ledger engine.
//!
//! This module exposes the attendance, leave and payroll services as REST
//! endpoints. See [`create_router`] for the route table.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    ApproveRequest, AttendanceQuery, ClockRequest, GeneratePayrollRequest, LeaveListQuery,
    PayrollListQuery, PeriodQuery, ReportQuery,
};
pub use response::{ApiError, AttendanceReport, GeneratedPayroll};
pub use state::AppState;
