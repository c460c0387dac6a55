//! Configuration types for the HR ledger engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Every section has a
//! `Default` matching the shipped configuration.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::calculation::{
    DEFAULT_LATE_AFTER_HOUR, DEFAULT_STANDARD_DAILY_HOURS, DEFAULT_TAX_RATE, default_entitlements,
};
use crate::models::{Employee, LeaveType};

/// Attendance settings from attendance.yaml.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AttendanceSettings {
    /// Hours in a standard working day; anything beyond is overtime.
    pub standard_daily_hours: Decimal,
    /// Clock-ins after this hour of the day are reported as late.
    pub late_after_hour: u32,
}

impl Default for AttendanceSettings {
    fn default() -> Self {
        Self {
            standard_daily_hours: DEFAULT_STANDARD_DAILY_HOURS,
            late_after_hour: DEFAULT_LATE_AFTER_HOUR,
        }
    }
}

/// Leave settings from leave.yaml.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LeaveSettings {
    /// Days granted per leave type when an employee's balances are first materialized.
    pub default_entitlements: BTreeMap<LeaveType, i32>,
}

impl Default for LeaveSettings {
    fn default() -> Self {
        Self {
            default_entitlements: default_entitlements(),
        }
    }
}

/// Pagination limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PaginationSettings {
    /// Page size used when the caller's limit is missing or out of range.
    pub default_limit: u32,
    /// Largest page size a caller may request.
    pub max_limit: u32,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 100,
        }
    }
}

/// Payroll settings from payroll.yaml.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PayrollSettings {
    /// Flat tax rate applied to basic salary.
    pub tax_rate: Decimal,
    /// Pagination limits for listings.
    #[serde(default)]
    pub pagination: PaginationSettings,
}

impl Default for PayrollSettings {
    fn default() -> Self {
        Self {
            tax_rate: DEFAULT_TAX_RATE,
            pagination: PaginationSettings::default(),
        }
    }
}

/// Employee roster from the optional employees.yaml.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeRoster {
    /// Employees to seed the directory with.
    #[serde(default)]
    pub employees: Vec<Employee>,
}

/// The complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineConfig {
    /// Attendance settings.
    pub attendance: AttendanceSettings,
    /// Leave settings.
    pub leave: LeaveSettings,
    /// Payroll settings.
    pub payroll: PayrollSettings,
}

impl EngineConfig {
    /// Returns the pagination limits shared by all listings.
    pub fn pagination(&self) -> PaginationSettings {
        self.payroll.pagination
    }
}
