//! The storable value type
//!
//! [`Value`] is the closed set of everything a node or relationship property
//! can hold. Each variant wraps the per-kind type that carries its rules:
//! [`NumberValue`], [`TextValue`], [`TemporalValue`], [`PointValue`] and
//! [`ArrayValue`]. Absence of a value is [`Value::NoValue`].
//!
//! ```rust
//! use strata_value::{Value, ValueGroup};
//!
//! let five = Value::int(5);
//! assert_eq!(five, Value::long(5));
//! assert_eq!(five, Value::double(5.0));
//! assert_eq!(five.value_group(), ValueGroup::Number);
//! assert_eq!(five.pretty_print(), "Int(5)");
//! assert_eq!(Value::string("abc").to_string(), "'abc'");
//! ```

use core::fmt;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

use crate::array::ArrayValue;
use crate::error::{ValueError, ValueResult};
use crate::group::ValueGroup;
use crate::number::NumberValue;
use crate::point::PointValue;
use crate::temporal::{DurationValue, OffsetTime, TemporalValue};
use crate::text::TextValue;
use crate::writer::{JsonWriter, Notation, PrettyPrinter, ValueWriter};

/// A storable property value
///
/// Values are immutable. Cloning is cheap: strings and arrays share their
/// backing storage.
///
/// `Eq`, `Ord` and `Hash` implement one total order over all values; see the
/// crate docs for the rules.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Absence of a value; sorts after everything else
    #[default]
    NoValue,
    Boolean(bool),
    Number(NumberValue),
    Text(TextValue),
    Temporal(TemporalValue),
    Point(PointValue),
    Array(ArrayValue),
}

// ==================== Constructors ====================

impl Value {
    pub const fn no_value() -> Self {
        Self::NoValue
    }

    pub const fn boolean(v: bool) -> Self {
        Self::Boolean(v)
    }

    pub const fn byte(v: i8) -> Self {
        Self::Number(NumberValue::Byte(v))
    }

    pub const fn short(v: i16) -> Self {
        Self::Number(NumberValue::Short(v))
    }

    pub const fn int(v: i32) -> Self {
        Self::Number(NumberValue::Int(v))
    }

    pub const fn long(v: i64) -> Self {
        Self::Number(NumberValue::Long(v))
    }

    pub const fn float(v: f32) -> Self {
        Self::Number(NumberValue::Float(v))
    }

    pub const fn double(v: f64) -> Self {
        Self::Number(NumberValue::Double(v))
    }

    pub const fn char(v: char) -> Self {
        Self::Text(TextValue::Char(v))
    }

    pub fn string(v: impl Into<Arc<str>>) -> Self {
        Self::Text(TextValue::String(v.into()))
    }

    pub const fn date(v: NaiveDate) -> Self {
        Self::Temporal(TemporalValue::Date(v))
    }

    pub const fn local_time(v: NaiveTime) -> Self {
        Self::Temporal(TemporalValue::LocalTime(v))
    }

    pub const fn time(v: OffsetTime) -> Self {
        Self::Temporal(TemporalValue::Time(v))
    }

    pub const fn local_date_time(v: NaiveDateTime) -> Self {
        Self::Temporal(TemporalValue::LocalDateTime(v))
    }

    pub const fn date_time(v: DateTime<FixedOffset>) -> Self {
        Self::Temporal(TemporalValue::DateTime(v))
    }

    pub const fn duration(v: DurationValue) -> Self {
        Self::Temporal(TemporalValue::Duration(v))
    }

    pub const fn point(v: PointValue) -> Self {
        Self::Point(v)
    }

    pub fn array(v: impl Into<ArrayValue>) -> Self {
        Self::Array(v.into())
    }
}

// ==================== Classification ====================

impl Value {
    /// The group this value belongs to
    pub const fn value_group(&self) -> ValueGroup {
        match self {
            Self::NoValue => ValueGroup::NoValue,
            Self::Boolean(_) => ValueGroup::Boolean,
            Self::Number(_) => ValueGroup::Number,
            Self::Text(_) => ValueGroup::Text,
            Self::Temporal(t) => t.value_group(),
            Self::Point(_) => ValueGroup::Geometry,
            Self::Array(a) => a.value_group(),
        }
    }

    /// Name of the concrete kind, used in error messages
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::NoValue => "no_value",
            Self::Boolean(_) => "boolean",
            Self::Number(n) => match n {
                NumberValue::Byte(_) => "byte",
                NumberValue::Short(_) => "short",
                NumberValue::Int(_) => "int",
                NumberValue::Long(_) => "long",
                NumberValue::Float(_) => "float",
                NumberValue::Double(_) => "double",
            },
            Self::Text(TextValue::Char(_)) => "char",
            Self::Text(TextValue::String(_)) => "string",
            Self::Temporal(t) => match t {
                TemporalValue::Date(_) => "date",
                TemporalValue::LocalTime(_) => "local_time",
                TemporalValue::Time(_) => "time",
                TemporalValue::LocalDateTime(_) => "local_date_time",
                TemporalValue::DateTime(_) => "date_time",
                TemporalValue::Duration(_) => "duration",
            },
            Self::Point(_) => "point",
            Self::Array(_) => "array",
        }
    }

    #[inline]
    pub const fn is_no_value(&self) -> bool {
        matches!(self, Self::NoValue)
    }

    #[inline]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    #[inline]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    #[inline]
    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    pub const fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub const fn as_number(&self) -> Option<&NumberValue> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    pub const fn as_text(&self) -> Option<&TextValue> {
        match self {
            Self::Text(t) => Some(t),
            _ => None,
        }
    }

    pub const fn as_temporal(&self) -> Option<&TemporalValue> {
        match self {
            Self::Temporal(t) => Some(t),
            _ => None,
        }
    }

    pub const fn as_point(&self) -> Option<&PointValue> {
        match self {
            Self::Point(p) => Some(p),
            _ => None,
        }
    }

    pub const fn as_array(&self) -> Option<&ArrayValue> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }
}

// ==================== Coercions ====================

impl Value {
    /// Numeric value as `i64`; see [`NumberValue::long_value`]
    ///
    /// # Errors
    ///
    /// [`ValueError::UnsupportedOperation`] for anything that is not a number.
    pub fn long_value(&self) -> ValueResult<i64> {
        match self {
            Self::Number(n) => Ok(n.long_value()),
            other => Err(ValueError::unsupported("long_value", other.type_name())),
        }
    }

    /// Numeric value as `f64`; see [`NumberValue::double_value`]
    ///
    /// # Errors
    ///
    /// [`ValueError::UnsupportedOperation`] for anything that is not a number.
    pub fn double_value(&self) -> ValueResult<f64> {
        match self {
            Self::Number(n) => Ok(n.double_value()),
            other => Err(ValueError::unsupported("double_value", other.type_name())),
        }
    }
}

// ==================== Writer dispatch ====================

impl Value {
    /// Push this value through `writer`
    ///
    /// Scalars make exactly one writer call at their stored width. Arrays
    /// stream their elements between `begin_array` and `end_array`. The
    /// writer's error is returned as is.
    pub fn write_to<W: ValueWriter + ?Sized>(&self, writer: &mut W) -> Result<(), W::Error> {
        match self {
            Self::NoValue => writer.write_null(),
            Self::Boolean(b) => writer.write_boolean(*b),
            Self::Number(n) => n.write_to(writer),
            Self::Text(t) => t.write_to(writer),
            Self::Temporal(t) => t.write_to(writer),
            Self::Point(p) => p.write_to(writer),
            Self::Array(a) => a.write_to(writer),
        }
    }

    /// Owned, host-neutral copy of this value
    pub fn as_object_copy(&self) -> serde_json::Value {
        let mut writer = JsonWriter::new();
        let Ok(()) = self.write_to(&mut writer);
        writer.into_value()
    }

    /// Tagged diagnostic rendering such as `Int(5)` or `String("abc")`
    ///
    /// Identical for every storage width of the same logical value.
    pub fn pretty_print(&self) -> String {
        let mut out = String::new();
        // writing into a String never fails
        let _ = self.write_to(&mut PrettyPrinter::new(&mut out, Notation::Tagged));
        out
    }
}

/// Literal rendering: `5`, `5.0`, `'abc'`, `true`, `null`, `[1, 2]`
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(&mut PrettyPrinter::new(f, Notation::Literal))
    }
}

// ==================== From impls ====================

macro_rules! impl_from_scalar {
    ($($ty:ty => $ctor:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$ctor(v)
                }
            }
        )*
    };
}

impl_from_scalar! {
    bool => boolean,
    i8 => byte,
    i16 => short,
    i32 => int,
    i64 => long,
    f32 => float,
    f64 => double,
    char => char,
    NaiveDate => date,
    NaiveTime => local_time,
    OffsetTime => time,
    NaiveDateTime => local_date_time,
    DateTime<FixedOffset> => date_time,
    DurationValue => duration,
    PointValue => point,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::string(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::string(v)
    }
}

impl From<NumberValue> for Value {
    fn from(v: NumberValue) -> Self {
        Self::Number(v)
    }
}

impl From<TextValue> for Value {
    fn from(v: TextValue) -> Self {
        Self::Text(v)
    }
}

impl From<TemporalValue> for Value {
    fn from(v: TemporalValue) -> Self {
        Self::Temporal(v)
    }
}

impl From<ArrayValue> for Value {
    fn from(v: ArrayValue) -> Self {
        Self::Array(v)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Self>,
{
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::NoValue, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_ignore_width() {
        assert_eq!(Value::byte(1).value_group(), ValueGroup::Number);
        assert_eq!(Value::float(1.0).value_group(), ValueGroup::Number);
        assert_eq!(Value::char('a').value_group(), ValueGroup::Text);
        assert_eq!(Value::array(vec![1_i8]).value_group(), ValueGroup::NumberArray);
        assert_eq!(Value::NoValue.value_group(), ValueGroup::NoValue);
        assert_eq!(
            Value::duration(DurationValue::ZERO).value_group(),
            ValueGroup::Duration
        );
    }

    #[test]
    fn coercions_reject_non_numbers() {
        assert_eq!(Value::short(-7).long_value(), Ok(-7));
        assert_eq!(Value::double(2.9).long_value(), Ok(2));
        assert_eq!(Value::int(3).double_value(), Ok(3.0));

        let err = Value::string("12").long_value().unwrap_err();
        assert_eq!(err, ValueError::unsupported("long_value", "string"));
        assert!(Value::NoValue.double_value().is_err());
    }

    #[test]
    fn option_maps_none_to_no_value() {
        assert!(Value::from(None::<i64>).is_no_value());
        assert_eq!(Value::from(Some(3_i64)), Value::long(3));
    }

    #[test]
    fn accessors() {
        assert_eq!(Value::boolean(true).as_boolean(), Some(true));
        assert!(Value::int(1).as_boolean().is_none());
        assert!(Value::string("x").as_text().is_some());
        assert_eq!(Value::array(vec![1_i32, 2]).as_array().map(ArrayValue::len), Some(2));
    }
}
