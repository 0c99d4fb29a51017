//! Error types for the Tillage ORM.

use thiserror::Error;

/// Result type alias for Tillage operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error surfaced by an executor, passed through to callers untouched.
pub type ExecutorError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error types for ORM operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or empty declaration, duplicate primary key, unknown column.
    #[error("schema error: {message}")]
    Schema { message: String },
    /// A field value violates its declared range, choices or length.
    #[error("validation failed for column {column}: {message}")]
    Validation { column: String, message: String },
    /// A row could not be turned back into a record.
    #[error("mapping error: {message}")]
    Mapping { message: String },
    /// Operation not allowed for the record's identity state.
    #[error("invalid record state: {message}")]
    State { message: String },
    /// Invalid configuration.
    #[error("invalid configuration: {message}")]
    Config { message: String },
    /// Error reported by the executor.
    #[error(transparent)]
    Executor(ExecutorError),
}

impl Error {
    /// Creates a schema error.
    pub fn schema(message: impl Into<String>) -> Self {
        Error::Schema {
            message: message.into(),
        }
    }

    /// Creates a validation error for the given column.
    pub fn validation(column: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Validation {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Creates a mapping error.
    pub fn mapping(message: impl Into<String>) -> Self {
        Error::Mapping {
            message: message.into(),
        }
    }

    /// Creates a state error.
    pub fn state(message: impl Into<String>) -> Self {
        Error::State {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Wraps an executor error.
    pub fn executor(err: impl Into<ExecutorError>) -> Self {
        Error::Executor(err.into())
    }

    /// Returns the executor error if this error came from the executor.
    pub fn as_executor(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Error::Executor(err) => Some(err.as_ref()),
            _ => None,
        }
    }

    /// Returns true for schema errors.
    pub fn is_schema(&self) -> bool {
        matches!(self, Error::Schema { .. })
    }

    /// Returns true for validation errors.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }

    /// Returns true for mapping errors.
    pub fn is_mapping(&self) -> bool {
        matches!(self, Error::Mapping { .. })
    }

    /// Returns true for state errors.
    pub fn is_state(&self) -> bool {
        matches!(self, Error::State { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct ConstraintViolation;

    impl fmt::Display for ConstraintViolation {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("NOT NULL constraint failed: fertilizers.name")
        }
    }

    impl std::error::Error for ConstraintViolation {}

    #[test]
    fn test_error_display() {
        let err = Error::schema("declaration has no columns");
        assert!(err.to_string().contains("no columns"));

        let err = Error::validation("amount", "5000 is above the maximum 1000");
        assert!(err.to_string().contains("amount"));
        assert!(err.is_validation());

        let err = Error::state("record has no identity");
        assert!(err.is_state());
    }

    #[test]
    fn test_executor_error_passthrough() {
        let err = Error::executor(ConstraintViolation);
        assert_eq!(
            err.to_string(),
            "NOT NULL constraint failed: fertilizers.name"
        );
        let inner = err.as_executor().unwrap();
        assert!(inner.downcast_ref::<ConstraintViolation>().is_some());
    }
}
