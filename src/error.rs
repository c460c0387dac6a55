//! Error types for the HR ledger engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure an engine operation can return to its caller.

use thiserror::Error;

/// The main error type for the HR ledger engine.
///
/// Domain failures (`NotFound` through `AlreadyProcessed`) describe why an
/// operation was refused. Infrastructure failures (`StorageError` and the
/// configuration/rendering variants) describe why it could not be carried out.
///
/// # Example
///
/// ```
/// use hr_ledger::error::EngineError;
///
/// let error = EngineError::NotFound {
///     entity: "employee",
///     id: "42".to_string(),
/// };
/// assert_eq!(error.to_string(), "employee not found: 42");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity that was looked up (e.g. "employee").
        entity: &'static str,
        /// The identifier or key that was looked up.
        id: String,
    },

    /// A duplicate creation attempt.
    #[error("Conflict: {message}")]
    Conflict {
        /// A description of the conflicting record.
        message: String,
    },

    /// Structurally invalid input.
    #[error("Invalid '{field}': {message}")]
    ValidationError {
        /// The input field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A leave request would exceed the remaining entitlement.
    #[error("Insufficient {leave_type} leave balance: requested {requested} days, {remaining} remaining")]
    InsufficientBalance {
        /// The leave type that was requested.
        leave_type: String,
        /// The number of days requested.
        requested: i32,
        /// The number of days remaining in the balance.
        remaining: i32,
    },

    /// The operation is not permitted in the record's current lifecycle state.
    #[error("Invalid state: {message}")]
    InvalidState {
        /// A description of the state violation.
        message: String,
    },

    /// A payroll payment was requested twice.
    #[error("Payroll {id} already paid")]
    AlreadyProcessed {
        /// The payroll record identifier.
        id: u64,
    },

    /// The storage layer failed (constraint violation, lock failure).
    #[error("Storage error: {message}")]
    StorageError {
        /// A description of the storage failure.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The slip renderer could not produce a document.
    #[error("Failed to render payroll slip: {message}")]
    RenderError {
        /// A description of the rendering failure.
        message: String,
    },
}

/// Fieldless category of an [`EngineError`], for callers that only branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`EngineError::NotFound`].
    NotFound,
    /// See [`EngineError::Conflict`].
    Conflict,
    /// See [`EngineError::ValidationError`].
    Validation,
    /// See [`EngineError::InsufficientBalance`].
    InsufficientBalance,
    /// See [`EngineError::InvalidState`].
    InvalidState,
    /// See [`EngineError::AlreadyProcessed`].
    AlreadyProcessed,
    /// Storage, configuration and rendering failures.
    Infrastructure,
}

impl EngineError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::NotFound { .. } => ErrorKind::NotFound,
            EngineError::Conflict { .. } => ErrorKind::Conflict,
            EngineError::ValidationError { .. } => ErrorKind::Validation,
            EngineError::InsufficientBalance { .. } => ErrorKind::InsufficientBalance,
            EngineError::InvalidState { .. } => ErrorKind::InvalidState,
            EngineError::AlreadyProcessed { .. } => ErrorKind::AlreadyProcessed,
            EngineError::StorageError { .. }
            | EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::RenderError { .. } => ErrorKind::Infrastructure,
        }
    }

    pub(crate) fn not_found(entity: &'static str, id: impl ToString) -> Self {
        EngineError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub(crate) fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_displays_entity_and_id() {
        let error = EngineError::not_found("leave request", 7);
        assert_eq!(error.to_string(), "leave request not found: 7");
        assert_eq!(error.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_insufficient_balance_displays_days() {
        let error = EngineError::InsufficientBalance {
            leave_type: "annual".to_string(),
            requested: 5,
            remaining: 4,
        };
        assert_eq!(
            error.to_string(),
            "Insufficient annual leave balance: requested 5 days, 4 remaining"
        );
    }

    #[test]
    fn test_validation_error_displays_field_and_message() {
        let error = EngineError::validation("end_date", "must not be before start_date");
        assert_eq!(
            error.to_string(),
            "Invalid 'end_date': must not be before start_date"
        );
        assert_eq!(error.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_already_processed_displays_id() {
        let error = EngineError::AlreadyProcessed { id: 3 };
        assert_eq!(error.to_string(), "Payroll 3 already paid");
        assert_eq!(error.kind(), ErrorKind::AlreadyProcessed);
    }

    #[test]
    fn test_infrastructure_kinds() {
        let storage = EngineError::StorageError {
            message: "lock poisoned".to_string(),
        };
        let config = EngineError::ConfigNotFound {
            path: "/missing/leave.yaml".to_string(),
        };
        assert_eq!(storage.kind(), ErrorKind::Infrastructure);
        assert_eq!(config.kind(), ErrorKind::Infrastructure);
        assert_eq!(
            config.to_string(),
            "Configuration file not found: /missing/leave.yaml"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_conflict() -> EngineResult<()> {
            Err(EngineError::Conflict {
                message: "already clocked in".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_conflict()?;
            Ok(())
        }

        assert!(matches!(
            propagates_error(),
            Err(EngineError::Conflict { .. })
        ));
    }
}
