//! Value error types
//!
//! Every fallible operation of the value layer returns [`ValueError`]. Writer
//! failures are never converted into this type: [`Value::write_to`] hands the
//! writer's own error back unchanged.
//!
//! [`Value::write_to`]: crate::Value::write_to

use thiserror::Error;

// ============================================================================
// MAIN ERROR TYPE
// ============================================================================

/// Errors raised by the value layer itself
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// The value does not support the requested coercion or operation
    #[error("Operation '{operation}' not supported for {value_type}")]
    UnsupportedOperation {
        operation: String,
        value_type: String,
    },

    /// A value of one kind was supplied where another was expected
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// A configured limit was exceeded
    #[error("{limit} exceeded: {actual} > {max}")]
    LimitExceeded {
        limit: String,
        max: usize,
        actual: usize,
    },

    /// Temporal components do not describe a valid date, time or duration
    #[error("Invalid temporal value: {0}")]
    InvalidTemporal(String),

    /// Point coordinates do not match the coordinate reference system
    #[error("Invalid point: {0}")]
    InvalidPoint(String),

    /// Arithmetic overflow while normalizing a value
    #[error("Numeric overflow in {operation}")]
    Overflow { operation: String },

    /// Writer calls arrived in an order the writer cannot accept
    #[error("Writer protocol violation: {0}")]
    WriterProtocol(String),

    /// Encoded bytes could not be decoded
    #[error("Decode error at offset {offset}: {reason}")]
    Decode { offset: usize, reason: String },
}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl ValueError {
    /// Create an unsupported operation error
    pub fn unsupported(operation: impl Into<String>, value_type: impl Into<String>) -> Self {
        Self::UnsupportedOperation {
            operation: operation.into(),
            value_type: value_type.into(),
        }
    }

    /// Create a type mismatch error
    pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a limit exceeded error
    pub fn limit_exceeded(limit: impl Into<String>, max: usize, actual: usize) -> Self {
        Self::LimitExceeded {
            limit: limit.into(),
            max,
            actual,
        }
    }

    /// Create an invalid temporal error
    pub fn invalid_temporal(reason: impl Into<String>) -> Self {
        Self::InvalidTemporal(reason.into())
    }

    /// Create an invalid point error
    pub fn invalid_point(reason: impl Into<String>) -> Self {
        Self::InvalidPoint(reason.into())
    }

    /// Create an overflow error
    pub fn overflow(operation: impl Into<String>) -> Self {
        Self::Overflow {
            operation: operation.into(),
        }
    }

    /// Create a writer protocol error
    pub fn protocol(reason: impl Into<String>) -> Self {
        Self::WriterProtocol(reason.into())
    }

    /// Create a decode error
    pub fn decode(offset: usize, reason: impl Into<String>) -> Self {
        Self::Decode {
            offset,
            reason: reason.into(),
        }
    }
}

// ============================================================================
// ERROR CLASSIFICATION
// ============================================================================

impl ValueError {
    /// Get error code for monitoring
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedOperation { .. } => "VALUE_UNSUPPORTED_OPERATION",
            Self::TypeMismatch { .. } => "VALUE_TYPE_MISMATCH",
            Self::LimitExceeded { .. } => "VALUE_LIMIT_EXCEEDED",
            Self::InvalidTemporal(_) => "VALUE_INVALID_TEMPORAL",
            Self::InvalidPoint(_) => "VALUE_INVALID_POINT",
            Self::Overflow { .. } => "VALUE_OVERFLOW",
            Self::WriterProtocol(_) => "VALUE_WRITER_PROTOCOL",
            Self::Decode { .. } => "VALUE_DECODE",
        }
    }

    /// Check if this is a client error (caller supplied bad input)
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::WriterProtocol(_))
    }
}

// ============================================================================
// RESULT TYPE
// ============================================================================

/// Result type alias for value operations
pub type ValueResult<T> = std::result::Result<T, ValueError>;
