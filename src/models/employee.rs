//! Employee model and related types.
//!
//! Employees are owned by the employee directory; the ledger only reads them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents the employment status of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    /// Currently employed and included in payroll runs.
    #[default]
    Active,
    /// On extended leave or suspended; excluded from payroll runs.
    Inactive,
    /// No longer employed.
    Terminated,
}

/// Represents an employee known to the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: u64,
    /// Human-facing employee code (e.g., "EMP001").
    pub employee_code: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Job title.
    #[serde(default)]
    pub position: String,
    /// The date the employee was hired.
    pub hire_date: NaiveDate,
    /// Monthly basic salary.
    pub salary: Decimal,
    /// Current employment status.
    #[serde(default)]
    pub status: EmploymentStatus,
}

impl Employee {
    /// Returns true if the employee should be included in payroll runs.
    ///
    /// # Examples
    ///
    /// ```
    /// use hr_ledger::models::{Employee, EmploymentStatus};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: 1,
    ///     employee_code: "EMP001".to_string(),
    ///     first_name: "Sari".to_string(),
    ///     last_name: "Wibowo".to_string(),
    ///     position: "Accountant".to_string(),
    ///     hire_date: NaiveDate::from_ymd_opt(2022, 3, 1).unwrap(),
    ///     salary: Decimal::new(8_000_000, 0),
    ///     status: EmploymentStatus::Active,
    /// };
    /// assert!(employee.is_active());
    /// ```
    pub fn is_active(&self) -> bool {
        self.status == EmploymentStatus::Active
    }

    /// Returns the employee's display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_employee_defaults_to_active() {
        let json = r#"{
            "id": 7,
            "employee_code": "EMP007",
            "first_name": "Dewi",
            "last_name": "Lestari",
            "hire_date": "2021-08-16",
            "salary": "12500000.00"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, 7);
        assert_eq!(employee.status, EmploymentStatus::Active);
        assert_eq!(employee.salary, Decimal::new(1_250_000_000, 2));
        assert!(employee.position.is_empty());
    }

    #[test]
    fn test_terminated_employee_is_not_active() {
        let json = r#"{
            "id": 8,
            "employee_code": "EMP008",
            "first_name": "Budi",
            "last_name": "Santoso",
            "hire_date": "2019-01-02",
            "salary": "9000000",
            "status": "terminated"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert!(!employee.is_active());
        assert_eq!(employee.full_name(), "Budi Santoso");
    }

    #[test]
    fn test_employment_status_serialization() {
        assert_eq!(
            serde_json::to_string(&EmploymentStatus::Inactive).unwrap(),
            "\"inactive\""
        );
    }
}
