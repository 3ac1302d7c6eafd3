//! The total order over [`Value`]
//!
//! Values of the same group compare by the group's own rule, values of
//! different groups compare by [`ValueGroup`] order. Equality is derived from
//! the order, so `a == b` holds exactly when `a.cmp(b)` is `Equal`.
//!
//! [`ValueGroup`]: crate::ValueGroup

use core::cmp::Ordering;

use crate::value::Value;

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.compare(b),
            (Self::Text(a), Self::Text(b)) => a.compare(b),
            (Self::Boolean(a), Self::Boolean(b)) => a.cmp(b),
            (Self::Temporal(a), Self::Temporal(b)) => a.compare(b),
            (Self::Point(a), Self::Point(b)) => a.compare(b),
            (Self::Array(a), Self::Array(b)) => a.compare(b),
            (Self::NoValue, Self::NoValue) => Ordering::Equal,
            _ => self.value_group().cmp(&other.value_group()),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for Value {}

impl Value {
    /// Three-valued equality: `None` when either side is `NoValue`
    ///
    /// ```rust
    /// use strata_value::Value;
    ///
    /// assert_eq!(Value::int(1).ternary_equals(&Value::double(1.0)), Some(true));
    /// assert_eq!(Value::int(1).ternary_equals(&Value::NoValue), None);
    /// ```
    pub fn ternary_equals(&self, other: &Self) -> Option<bool> {
        if self.is_no_value() || other.is_no_value() {
            None
        } else {
            Some(self == other)
        }
    }
}
