//! Error types for typeweave.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::value::Value;

/// The main error type for typeweave operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }

    /// Creates a validation error.
    ///
    /// `path` lists the segments from the outermost constructor down to the
    /// offending value.
    #[must_use]
    pub fn validation(expected: impl Into<String>, actual: Value, path: Vec<String>) -> Self {
        Self::new(ErrorKind::Validation {
            expected: expected.into(),
            actual,
            path,
        })
    }

    /// Creates an arity mismatch error.
    #[must_use]
    pub fn arity(type_name: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::new(ErrorKind::Arity {
            type_name: type_name.into(),
            expected,
            actual,
        })
    }

    /// Creates a duplicate-field conflict error.
    #[must_use]
    pub fn conflict(field: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict {
            field: field.into(),
            target: target.into(),
        })
    }

    /// Creates a union dispatch error.
    #[must_use]
    pub fn dispatch(union: impl Into<String>, actual: Value) -> Self {
        Self::new(ErrorKind::Dispatch {
            union: union.into(),
            actual,
        })
    }

    /// Creates an update error.
    #[must_use]
    pub fn update(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Update {
            message: message.into(),
        })
    }

    /// Creates an error for a write-once slot that was already filled.
    #[must_use]
    pub fn already_assigned(slot: &'static str, type_name: impl Into<String>) -> Self {
        Self::new(ErrorKind::AlreadyAssigned {
            slot,
            type_name: type_name.into(),
        })
    }

    /// Creates an error for a mutation attempted after the registries froze.
    #[must_use]
    pub fn registry_frozen(registry: impl Into<String>) -> Self {
        Self::new(ErrorKind::RegistryFrozen(registry.into()))
    }

    /// Creates a semantic limit exceeded error.
    #[must_use]
    pub fn limit_exceeded(limit: SemanticLimit) -> Self {
        Self::new(ErrorKind::LimitExceeded(limit))
    }

    /// Creates a failed assertion error.
    #[must_use]
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Assertion(message.into()))
    }

    /// Creates a missing method error.
    #[must_use]
    pub fn method_not_found(type_name: impl Into<String>, method: impl Into<String>) -> Self {
        Self::new(ErrorKind::MethodNotFound {
            type_name: type_name.into(),
            method: method.into(),
        })
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A value failed a type's predicate or shape.
    #[error("invalid value {actual:?} supplied to {} (expected {expected})", .path.join("/"))]
    Validation {
        /// Name of the type that rejected the value.
        expected: String,
        /// The offending value.
        actual: Value,
        /// Type name, field and index segments leading to the value.
        path: Vec<String>,
    },

    /// Wrong number of elements for a tuple or arguments for a function.
    #[error("arity mismatch for {type_name}: expected {expected}, got {actual}")]
    Arity {
        /// Name of the tuple or function type.
        type_name: String,
        /// Expected length.
        expected: usize,
        /// Supplied length.
        actual: usize,
    },

    /// A field name appeared in more than one merge source.
    #[error("conflicting field {field:?} while building {target}")]
    Conflict {
        /// The repeated field name.
        field: String,
        /// Name of the type or object being built.
        target: String,
    },

    /// No union member accepted the value.
    #[error("no member of {union} matches {actual:?}")]
    Dispatch {
        /// Name of the union.
        union: String,
        /// The value that could not be dispatched.
        actual: Value,
    },

    /// Malformed update spec or unknown command.
    #[error("update failed: {message}")]
    Update {
        /// Description of the failure.
        message: String,
    },

    /// A write-once slot (union dispatch, record behavior) was already set.
    #[error("{slot} of {type_name} was already assigned")]
    AlreadyAssigned {
        /// Name of the slot.
        slot: &'static str,
        /// Name of the owning type.
        type_name: String,
    },

    /// A process-wide registry was mutated after `freeze`.
    #[error("registry is frozen: {0}")]
    RegistryFrozen(String),

    /// Semantic limit exceeded.
    #[error("limit exceeded: {0}")]
    LimitExceeded(SemanticLimit),

    /// A caller-supplied assertion did not hold.
    #[error("assertion failed: {0}")]
    Assertion(String),

    /// No method with the given name on a record type or its ancestors.
    #[error("method {method:?} not found on {type_name}")]
    MethodNotFound {
        /// Name of the record type.
        type_name: String,
        /// The requested method name.
        method: String,
    },

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Semantic limits that can be exceeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticLimit {
    /// Maximum nesting of an update spec exceeded.
    MaxUpdateDepth {
        /// The configured limit.
        limit: usize,
    },
}

impl fmt::Display for SemanticLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxUpdateDepth { limit } => write!(f, "max update depth ({limit}) exceeded"),
        }
    }
}
