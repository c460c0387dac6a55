//! Configuration loading and management for the HR ledger engine.
//!
//! This module provides functionality to load engine settings from YAML files:
//! the standard working day, lateness threshold, default leave entitlements,
//! payroll tax rate and pagination limits.
//!
//! # Example
//!
//! ```no_run
//! use hr_ledger::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/hr").unwrap();
//! println!("Standard day: {}h", config.config().attendance.standard_daily_hours);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AttendanceSettings, EmployeeRoster, EngineConfig, LeaveSettings, PaginationSettings,
    PayrollSettings,
};
