//! Value groups: coarse classification used for dispatch and ordering.
//!
//! Every [`Value`](crate::Value) belongs to exactly one [`ValueGroup`]. The
//! group is independent of storage width: `Int(5)` and `Double(5.0)` are both
//! [`ValueGroup::Number`], an `i8[]` and an `f64[]` are both
//! [`ValueGroup::NumberArray`].
//!
//! The declaration order of the variants *is* the outer sort order of the
//! value total order. Values of different groups compare by group alone.
//!
//! ```rust
//! use strata_value::{Value, ValueGroup};
//!
//! assert_eq!(Value::byte(1).value_group(), ValueGroup::Number);
//! assert!(ValueGroup::Number < ValueGroup::Text);
//! assert!(ValueGroup::GeometryArray < ValueGroup::NoValue);
//! ```

use core::fmt::{Display, Formatter};

/// Coarse value category
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ValueGroup {
    Number,
    Text,
    Boolean,
    ZonedDateTime,
    LocalDateTime,
    Date,
    ZonedTime,
    LocalTime,
    Duration,
    Geometry,
    NumberArray,
    TextArray,
    BooleanArray,
    ZonedDateTimeArray,
    LocalDateTimeArray,
    DateArray,
    ZonedTimeArray,
    LocalTimeArray,
    DurationArray,
    GeometryArray,
    NoValue,
}

impl ValueGroup {
    /// All groups in sort order
    pub const ALL: [Self; 21] = [
        Self::Number,
        Self::Text,
        Self::Boolean,
        Self::ZonedDateTime,
        Self::LocalDateTime,
        Self::Date,
        Self::ZonedTime,
        Self::LocalTime,
        Self::Duration,
        Self::Geometry,
        Self::NumberArray,
        Self::TextArray,
        Self::BooleanArray,
        Self::ZonedDateTimeArray,
        Self::LocalDateTimeArray,
        Self::DateArray,
        Self::ZonedTimeArray,
        Self::LocalTimeArray,
        Self::DurationArray,
        Self::GeometryArray,
        Self::NoValue,
    ];

    /// Check if this group holds arrays
    pub const fn is_array(&self) -> bool {
        matches!(
            self,
            Self::NumberArray
                | Self::TextArray
                | Self::BooleanArray
                | Self::ZonedDateTimeArray
                | Self::LocalDateTimeArray
                | Self::DateArray
                | Self::ZonedTimeArray
                | Self::LocalTimeArray
                | Self::DurationArray
                | Self::GeometryArray
        )
    }

    /// Check if this group holds scalar temporal values
    pub const fn is_temporal(&self) -> bool {
        matches!(
            self,
            Self::ZonedDateTime
                | Self::LocalDateTime
                | Self::Date
                | Self::ZonedTime
                | Self::LocalTime
                | Self::Duration
        )
    }

    /// Group of the elements of an array group, `None` for scalar groups
    pub const fn element_group(&self) -> Option<Self> {
        match self {
            Self::NumberArray => Some(Self::Number),
            Self::TextArray => Some(Self::Text),
            Self::BooleanArray => Some(Self::Boolean),
            Self::ZonedDateTimeArray => Some(Self::ZonedDateTime),
            Self::LocalDateTimeArray => Some(Self::LocalDateTime),
            Self::DateArray => Some(Self::Date),
            Self::ZonedTimeArray => Some(Self::ZonedTime),
            Self::LocalTimeArray => Some(Self::LocalTime),
            Self::DurationArray => Some(Self::Duration),
            Self::GeometryArray => Some(Self::Geometry),
            _ => None,
        }
    }

    /// Stable upper-case name, used in error messages
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Number => "NUMBER",
            Self::Text => "TEXT",
            Self::Boolean => "BOOLEAN",
            Self::ZonedDateTime => "ZONED_DATE_TIME",
            Self::LocalDateTime => "LOCAL_DATE_TIME",
            Self::Date => "DATE",
            Self::ZonedTime => "ZONED_TIME",
            Self::LocalTime => "LOCAL_TIME",
            Self::Duration => "DURATION",
            Self::Geometry => "GEOMETRY",
            Self::NumberArray => "NUMBER_ARRAY",
            Self::TextArray => "TEXT_ARRAY",
            Self::BooleanArray => "BOOLEAN_ARRAY",
            Self::ZonedDateTimeArray => "ZONED_DATE_TIME_ARRAY",
            Self::LocalDateTimeArray => "LOCAL_DATE_TIME_ARRAY",
            Self::DateArray => "DATE_ARRAY",
            Self::ZonedTimeArray => "ZONED_TIME_ARRAY",
            Self::LocalTimeArray => "LOCAL_TIME_ARRAY",
            Self::DurationArray => "DURATION_ARRAY",
            Self::GeometryArray => "GEOMETRY_ARRAY",
            Self::NoValue => "NO_VALUE",
        }
    }
}

impl Display for ValueGroup {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_sorted_and_exhaustive() {
        let mut sorted = ValueGroup::ALL;
        sorted.sort();
        assert_eq!(sorted, ValueGroup::ALL);
        assert_eq!(ValueGroup::ALL.first(), Some(&ValueGroup::Number));
        assert_eq!(ValueGroup::ALL.last(), Some(&ValueGroup::NoValue));
    }

    #[test]
    fn array_groups_map_to_scalar_groups() {
        for group in ValueGroup::ALL {
            match group.element_group() {
                Some(element) => {
                    assert!(group.is_array());
                    assert!(!element.is_array());
                    assert!(element < group);
                }
                None => assert!(!group.is_array()),
            }
        }
    }

    #[test]
    fn temporal_groups() {
        assert!(ValueGroup::Duration.is_temporal());
        assert!(ValueGroup::ZonedTime.is_temporal());
        assert!(!ValueGroup::DateArray.is_temporal());
        assert!(!ValueGroup::Geometry.is_temporal());
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(ValueGroup::LocalDateTime.to_string(), "LOCAL_DATE_TIME");
        assert_eq!(ValueGroup::NoValue.to_string(), "NO_VALUE");
    }
}
