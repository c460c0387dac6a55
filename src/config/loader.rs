//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, LeaveType};

use super::types::{
    AttendanceSettings, EmployeeRoster, EngineConfig, LeaveSettings, PayrollSettings,
};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/hr/
/// ├── attendance.yaml  # Standard day length and lateness threshold
/// ├── leave.yaml       # Default entitlement schedule
/// ├── payroll.yaml     # Tax rate and pagination limits
/// └── employees.yaml   # Optional roster to seed the directory
/// ```
///
/// # Example
///
/// ```no_run
/// use hr_ledger::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/hr").unwrap();
/// println!("Tax rate: {}", loader.config().payroll.tax_rate);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
    employees: Vec<Employee>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any required file is missing, contains invalid
    /// YAML, or holds values outside their valid range.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let attendance = Self::load_yaml::<AttendanceSettings>(&path.join("attendance.yaml"))?;
        let leave = Self::load_yaml::<LeaveSettings>(&path.join("leave.yaml"))?;
        let payroll = Self::load_yaml::<PayrollSettings>(&path.join("payroll.yaml"))?;

        let roster_path = path.join("employees.yaml");
        let employees = if roster_path.exists() {
            Self::load_yaml::<EmployeeRoster>(&roster_path)?.employees
        } else {
            debug!(path = %roster_path.display(), "No employee roster found");
            Vec::new()
        };

        let config = EngineConfig {
            attendance,
            leave,
            payroll,
        };
        Self::validate(&config, path)?;

        info!(
            path = %path.display(),
            employees = employees.len(),
            "Loaded engine configuration"
        );

        Ok(Self { config, employees })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Rejects values the services cannot work with.
    fn validate(config: &EngineConfig, dir: &Path) -> EngineResult<()> {
        let invalid = |file: &str, message: String| EngineError::ConfigParseError {
            path: dir.join(file).display().to_string(),
            message,
        };

        if config.attendance.standard_daily_hours <= Decimal::ZERO {
            return Err(invalid(
                "attendance.yaml",
                "standard_daily_hours must be positive".to_string(),
            ));
        }
        if config.attendance.late_after_hour > 23 {
            return Err(invalid(
                "attendance.yaml",
                "late_after_hour must be an hour of the day".to_string(),
            ));
        }
        if config.leave.default_entitlements.contains_key(&LeaveType::Unpaid) {
            return Err(invalid(
                "leave.yaml",
                "unpaid leave does not carry an entitlement".to_string(),
            ));
        }
        if let Some((leave_type, days)) = config
            .leave
            .default_entitlements
            .iter()
            .find(|(_, days)| **days < 0)
        {
            return Err(invalid(
                "leave.yaml",
                format!("{} entitlement cannot be negative ({})", leave_type, days),
            ));
        }
        if config.payroll.tax_rate < Decimal::ZERO || config.payroll.tax_rate > Decimal::ONE {
            return Err(invalid(
                "payroll.yaml",
                "tax_rate must be between 0 and 1".to_string(),
            ));
        }
        let pagination = config.payroll.pagination;
        if pagination.default_limit == 0 || pagination.default_limit > pagination.max_limit {
            return Err(invalid(
                "payroll.yaml",
                "pagination.default_limit must be between 1 and max_limit".to_string(),
            ));
        }

        Ok(())
    }

    /// Returns the loaded engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the seeded employee roster (empty if no roster file exists).
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Consumes the loader, returning the configuration and roster.
    pub fn into_parts(self) -> (EngineConfig, Vec<Employee>) {
        (self.config, self.employees)
    }
}
