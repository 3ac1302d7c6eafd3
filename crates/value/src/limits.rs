//! Size limits for values rebuilt from untrusted input
//!
//! [`ValueBuilder`](crate::writer::ValueBuilder) and
//! [`decode_value`](crate::codec::decode_value) consult these limits before
//! allocating, so a hostile length prefix cannot exhaust memory.

use crate::error::{ValueError, ValueResult};

/// Configurable limits for value construction
///
/// # Example
///
/// ```
/// use strata_value::ValueLimits;
///
/// let limits = ValueLimits::default();
/// assert_eq!(limits.max_array_length, 1_000_000);
///
/// let strict = ValueLimits::strict();
/// assert_eq!(strict.max_array_length, 10_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ValueLimits {
    /// Maximum number of elements in an array
    pub max_array_length: usize,

    /// Maximum string length in bytes
    pub max_string_bytes: usize,
}

impl Default for ValueLimits {
    fn default() -> Self {
        Self {
            max_array_length: 1_000_000,
            max_string_bytes: 10_000_000,
        }
    }
}

impl ValueLimits {
    /// Permissive limits for trusted environments
    pub fn permissive() -> Self {
        Self {
            max_array_length: 10_000_000,
            max_string_bytes: 100_000_000,
        }
    }

    /// Strict limits for untrusted input
    pub fn strict() -> Self {
        Self {
            max_array_length: 10_000,
            max_string_bytes: 1_000_000,
        }
    }

    /// No limits
    pub const fn unlimited() -> Self {
        Self {
            max_array_length: usize::MAX,
            max_string_bytes: usize::MAX,
        }
    }

    /// Validate array length
    #[inline]
    pub fn check_array_length(&self, len: usize) -> ValueResult<()> {
        check("max_array_length", self.max_array_length, len)
    }

    /// Validate string byte length
    #[inline]
    pub fn check_string_bytes(&self, bytes: usize) -> ValueResult<()> {
        check("max_string_bytes", self.max_string_bytes, bytes)
    }
}

fn check(limit: &'static str, max: usize, actual: usize) -> ValueResult<()> {
    if actual > max {
        tracing::debug!(limit, max, actual, "value limit exceeded");
        Err(ValueError::limit_exceeded(limit, max, actual))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let limits = ValueLimits::default();
        assert!(limits.check_array_length(1000).is_ok());
        assert!(limits.check_array_length(2_000_000).is_err());
    }

    #[test]
    fn test_strict_limits() {
        let limits = ValueLimits::strict();
        assert!(limits.check_array_length(5000).is_ok());
        assert!(limits.check_array_length(20_000).is_err());
        assert!(limits.check_string_bytes(2_000_000).is_err());
    }

    #[test]
    fn test_permissive_limits() {
        let limits = ValueLimits::permissive();
        assert!(limits.check_array_length(5_000_000).is_ok());
    }

    #[test]
    fn test_unlimited() {
        let limits = ValueLimits::unlimited();
        assert!(limits.check_array_length(usize::MAX - 1).is_ok());
        assert!(limits.check_string_bytes(usize::MAX).is_ok());
    }

    #[test]
    fn test_error_names_the_limit() {
        let err = ValueLimits::strict().check_string_bytes(1_000_001).unwrap_err();
        assert_eq!(
            err,
            ValueError::limit_exceeded("max_string_bytes", 1_000_000, 1_000_001)
        );
    }
}
