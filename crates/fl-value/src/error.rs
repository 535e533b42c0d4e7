//! Errors shared by the workspace.

use thiserror::Error;

use crate::Value;

/// Errors raised while constructing values, declaring type classes or
/// dispatching operations.
///
/// Cycles in structural comparison are never errors, and membership tests
/// never fail; they answer `false` instead.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// An operation was invoked on a value whose type lacks the capability.
    #[error("`{capability}` is not supported by values of type {type_name}")]
    Unsupported {
        /// The capability that could not be resolved.
        capability: String,
        /// The runtime type of the subject.
        type_name: String,
    },

    /// A native function was called with too few arguments.
    #[error("{function} expects {expected} argument(s), got {got}")]
    Arity {
        /// The function name.
        function: String,
        /// The number of arguments required.
        expected: usize,
        /// The number of arguments supplied.
        got: usize,
    },

    /// A type class was declared with degenerate arguments.
    #[error("invalid type class declaration: {0}")]
    Declaration(String),

    /// A value of the wrong kind was supplied.
    #[error("type error: expected {expected}, got {got}")]
    TypeError {
        /// The kind required.
        expected: String,
        /// The runtime type found.
        got: String,
    },

    /// Acyclic nesting exceeded the configured depth.
    #[error("maximum structural recursion depth of {0} exceeded")]
    RecursionLimit(usize),

    /// A value could not be constructed.
    #[error("invalid value: {0}")]
    Invalid(String),

    /// A failure raised by caller-supplied code.
    #[error("{0}")]
    User(String),
}

impl Error {
    /// Creates an [`Error::Unsupported`] naming the subject's type.
    ///
    /// Type representatives are described by their display name.
    #[must_use]
    pub fn unsupported(capability: impl Into<String>, subject: &Value) -> Self {
        Error::Unsupported {
            capability: capability.into(),
            type_name: subject.describe(),
        }
    }

    /// Creates an [`Error::TypeError`] for an unexpected value.
    #[must_use]
    pub fn type_error(expected: impl Into<String>, got: &Value) -> Self {
        Error::TypeError {
            expected: expected.into(),
            got: got.describe(),
        }
    }

    /// Creates an [`Error::User`].
    #[must_use]
    pub fn user(message: impl Into<String>) -> Self {
        Error::User(message.into())
    }
}

/// Result alias used across the workspace.
pub type Result<T, E = Error> = std::result::Result<T, E>;
