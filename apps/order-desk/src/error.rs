//! Error types for the order desk.
//!
//! Two recoverable kinds, mirroring the workflow's failure modes:
//!
//! - [`ValidationError`]: bad or missing user input. Nothing was written;
//!   the caller reports the message and lets the user resubmit.
//! - [`StorageError`]: the embedded store failed (open, query, constraint,
//!   transaction). The submission as a whole failed and was rolled back;
//!   the caller may retry it, no automatic retry is performed.
//!
//! [`WorkflowError`] wraps both for operations that can fail either way.
//! Neither kind is fatal to the process.

use thiserror::Error;

/// Errors from the persistence gateway.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The store could not be opened.
    #[error("store open error: {0}")]
    Open(String),

    /// A read query failed.
    #[error("query error: {0}")]
    Query(String),

    /// A write statement failed.
    #[error("execute error: {0}")]
    Execute(String),

    /// A constraint was violated (bad reference, duplicate key).
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// A transaction could not be started or committed.
    #[error("transaction error: {0}")]
    Transaction(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(cause, _)
                if cause.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Self::Constraint(err.to_string())
            }
            _ => Self::Query(err.to_string()),
        }
    }
}

/// Errors from validating a proposed order or registration.
///
/// These are raised before any write happens, so a validation failure
/// never leaves partial state behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The selected book id does not reference an existing book.
    #[error("unknown book: {book_id}")]
    UnknownBook {
        /// The offending book id.
        book_id: i64,
    },

    /// The selected customer id does not reference an existing customer.
    #[error("unknown customer: {customer_id}")]
    UnknownCustomer {
        /// The offending customer id.
        customer_id: i64,
    },

    /// The sale price is not a non-negative integer.
    #[error("invalid price: {input:?}")]
    InvalidPrice {
        /// The raw input that failed to parse or was negative.
        input: String,
    },

    /// A new-customer draft is missing a required field.
    #[error("incomplete customer data: {field} is blank")]
    IncompleteCustomer {
        /// Name of the blank field.
        field: &'static str,
    },
}

/// Combined error for operations that validate and then write.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// User input was rejected; nothing was written.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The store failed; the whole unit of work was rolled back.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<rusqlite::Error> for WorkflowError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_name_the_problem() {
        let err = ValidationError::UnknownBook { book_id: 99 };
        assert_eq!(err.to_string(), "unknown book: 99");

        let err = ValidationError::InvalidPrice {
            input: "-5".to_string(),
        };
        assert!(err.to_string().starts_with("invalid price"));

        let err = ValidationError::IncompleteCustomer { field: "phone" };
        assert_eq!(err.to_string(), "incomplete customer data: phone is blank");
    }

    #[test]
    fn workflow_error_wraps_both_kinds() {
        let v: WorkflowError = ValidationError::UnknownBook { book_id: 1 }.into();
        assert!(matches!(v, WorkflowError::Validation(_)));

        let s: WorkflowError = StorageError::Open("no such file".to_string()).into();
        assert!(matches!(s, WorkflowError::Storage(_)));
        assert_eq!(s.to_string(), "store open error: no such file");
    }
}
