//! Error values and thrown-value results.
//!
//! This module provides the error type used for rejection reasons created by
//! the runtime itself (such as type errors), along with the
//! [`JsResult`] alias used by every callable in the value model.

use std::fmt;

use crate::Value;

/// Result of a callable: `Ok` with the returned value, `Err` with the thrown value.
///
/// Any value can be thrown, not only [`JsError`]s.
pub type JsResult<T> = Result<T, Value>;

/// The kind of error.
///
/// These correspond to the built-in error constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Generic error
    Error,
    /// Type error (e.g., calling a non-function, chaining cycles)
    TypeError,
}

impl ErrorKind {
    /// Get the constructor name of this error kind
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::Error => "Error",
            ErrorKind::TypeError => "TypeError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An error with a kind and a message.
///
/// # Examples
///
/// ```
/// use core_types::{JsError, ErrorKind, Value};
///
/// let error = JsError::type_error("undefined is not a function");
/// assert_eq!(error.kind, ErrorKind::TypeError);
/// assert_eq!(error.to_string(), "TypeError: undefined is not a function");
///
/// let thrown: Value = error.into();
/// assert!(thrown.is_error_of(ErrorKind::TypeError));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct JsError {
    /// The type of error
    pub kind: ErrorKind,
    /// Human-readable error message
    pub message: String,
}

impl JsError {
    /// Creates an error of the given kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates a plain `Error`.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Error, message)
    }

    /// Creates a `TypeError`.
    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TypeError, message)
    }
}
