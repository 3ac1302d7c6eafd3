//! Homogeneous arrays of storable scalars
//!
//! An array is a fixed-length sequence of one scalar kind, backed by an
//! `Arc<[T]>` so clones share storage. Arrays never nest.
//!
//! Logical behavior ignores the backing width: an `i8[]` holding `[1, 2]`
//! equals an `f64[]` holding `[1.0, 2.0]` and hashes the same. Ordering is by
//! [`ValueGroup`] first, then element by element, then by length.

use core::cmp::Ordering;
use core::hash::{Hash, Hasher};
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{ValueError, ValueResult};
use crate::group::ValueGroup;
use crate::number::NumberValue;
use crate::point::PointValue;
use crate::temporal::{DurationValue, OffsetTime, TemporalValue};
use crate::text::TextValue;
use crate::value::Value;
use crate::writer::{ArrayType, ValueWriter};

/// Hash prefix shared by arrays and lists, so equal sequences hash alike
/// regardless of how they are stored
pub(crate) const SEQUENCE_HASH_TAG: u8 = 0x80;

/// A homogeneous, immutable array
#[derive(Debug, Clone)]
pub enum ArrayValue {
    Byte(Arc<[i8]>),
    Short(Arc<[i16]>),
    Int(Arc<[i32]>),
    Long(Arc<[i64]>),
    Float(Arc<[f32]>),
    Double(Arc<[f64]>),
    Boolean(Arc<[bool]>),
    Char(Arc<[char]>),
    String(Arc<[Arc<str>]>),
    Date(Arc<[NaiveDate]>),
    LocalTime(Arc<[NaiveTime]>),
    Time(Arc<[OffsetTime]>),
    LocalDateTime(Arc<[NaiveDateTime]>),
    DateTime(Arc<[DateTime<FixedOffset>]>),
    Duration(Arc<[DurationValue]>),
    Point(Arc<[PointValue]>),
}

impl ArrayValue {
    pub fn len(&self) -> usize {
        match self {
            Self::Byte(a) => a.len(),
            Self::Short(a) => a.len(),
            Self::Int(a) => a.len(),
            Self::Long(a) => a.len(),
            Self::Float(a) => a.len(),
            Self::Double(a) => a.len(),
            Self::Boolean(a) => a.len(),
            Self::Char(a) => a.len(),
            Self::String(a) => a.len(),
            Self::Date(a) => a.len(),
            Self::LocalTime(a) => a.len(),
            Self::Time(a) => a.len(),
            Self::LocalDateTime(a) => a.len(),
            Self::DateTime(a) => a.len(),
            Self::Duration(a) => a.len(),
            Self::Point(a) => a.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Backing element kind
    pub const fn element_type(&self) -> ArrayType {
        match self {
            Self::Byte(_) => ArrayType::Byte,
            Self::Short(_) => ArrayType::Short,
            Self::Int(_) => ArrayType::Int,
            Self::Long(_) => ArrayType::Long,
            Self::Float(_) => ArrayType::Float,
            Self::Double(_) => ArrayType::Double,
            Self::Boolean(_) => ArrayType::Boolean,
            Self::Char(_) => ArrayType::Char,
            Self::String(_) => ArrayType::String,
            Self::Date(_) => ArrayType::Date,
            Self::LocalTime(_) => ArrayType::LocalTime,
            Self::Time(_) => ArrayType::Time,
            Self::LocalDateTime(_) => ArrayType::LocalDateTime,
            Self::DateTime(_) => ArrayType::DateTime,
            Self::Duration(_) => ArrayType::Duration,
            Self::Point(_) => ArrayType::Point,
        }
    }

    pub const fn value_group(&self) -> ValueGroup {
        self.element_type().value_group()
    }

    /// Element at `index` as a scalar [`Value`]
    pub fn get(&self, index: usize) -> Option<Value> {
        match self {
            Self::Byte(a) => a.get(index).map(|&v| Value::byte(v)),
            Self::Short(a) => a.get(index).map(|&v| Value::short(v)),
            Self::Int(a) => a.get(index).map(|&v| Value::int(v)),
            Self::Long(a) => a.get(index).map(|&v| Value::long(v)),
            Self::Float(a) => a.get(index).map(|&v| Value::float(v)),
            Self::Double(a) => a.get(index).map(|&v| Value::double(v)),
            Self::Boolean(a) => a.get(index).map(|&v| Value::boolean(v)),
            Self::Char(a) => a.get(index).map(|&v| Value::char(v)),
            Self::String(a) => a.get(index).map(|v| Value::string(Arc::clone(v))),
            Self::Date(a) => a.get(index).map(|&v| Value::date(v)),
            Self::LocalTime(a) => a.get(index).map(|&v| Value::local_time(v)),
            Self::Time(a) => a.get(index).map(|&v| Value::time(v)),
            Self::LocalDateTime(a) => a.get(index).map(|&v| Value::local_date_time(v)),
            Self::DateTime(a) => a.get(index).map(|&v| Value::date_time(v)),
            Self::Duration(a) => a.get(index).map(|&v| Value::duration(v)),
            Self::Point(a) => a.get(index).map(|v| Value::point(v.clone())),
        }
    }

    /// Elements as scalar values
    pub fn iter(&self) -> impl Iterator<Item = Value> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }

    /// Build an array of `element_type` from scalar values
    ///
    /// Every value must be exactly of the element kind: an `Int` does not go
    /// into a `Long` array.
    pub fn from_values(element_type: ArrayType, values: Vec<Value>) -> ValueResult<Self> {
        macro_rules! collect {
            ($variant:ident, $pattern:pat => $out:expr) => {{
                let items = values
                    .into_iter()
                    .map(|value| match value {
                        $pattern => Ok($out),
                        other => Err(ValueError::type_mismatch(
                            element_type.name(),
                            other.type_name(),
                        )),
                    })
                    .collect::<ValueResult<Vec<_>>>()?;
                Self::$variant(items.into())
            }};
        }

        Ok(match element_type {
            ArrayType::Byte => collect!(Byte, Value::Number(NumberValue::Byte(v)) => v),
            ArrayType::Short => collect!(Short, Value::Number(NumberValue::Short(v)) => v),
            ArrayType::Int => collect!(Int, Value::Number(NumberValue::Int(v)) => v),
            ArrayType::Long => collect!(Long, Value::Number(NumberValue::Long(v)) => v),
            ArrayType::Float => collect!(Float, Value::Number(NumberValue::Float(v)) => v),
            ArrayType::Double => collect!(Double, Value::Number(NumberValue::Double(v)) => v),
            ArrayType::Boolean => collect!(Boolean, Value::Boolean(v) => v),
            ArrayType::Char => collect!(Char, Value::Text(TextValue::Char(v)) => v),
            ArrayType::String => collect!(String, Value::Text(TextValue::String(v)) => v),
            ArrayType::Date => collect!(Date, Value::Temporal(TemporalValue::Date(v)) => v),
            ArrayType::LocalTime => {
                collect!(LocalTime, Value::Temporal(TemporalValue::LocalTime(v)) => v)
            }
            ArrayType::Time => collect!(Time, Value::Temporal(TemporalValue::Time(v)) => v),
            ArrayType::LocalDateTime => {
                collect!(LocalDateTime, Value::Temporal(TemporalValue::LocalDateTime(v)) => v)
            }
            ArrayType::DateTime => {
                collect!(DateTime, Value::Temporal(TemporalValue::DateTime(v)) => v)
            }
            ArrayType::Duration => {
                collect!(Duration, Value::Temporal(TemporalValue::Duration(v)) => v)
            }
            ArrayType::Point => collect!(Point, Value::Point(v) => v),
        })
    }

    /// Group, then elements, then length
    pub fn compare(&self, other: &Self) -> Ordering {
        self.value_group().cmp(&other.value_group()).then_with(|| {
            self.iter()
                .zip(other.iter())
                .map(|(a, b)| a.cmp(&b))
                .find(|o| o.is_ne())
                .unwrap_or_else(|| self.len().cmp(&other.len()))
        })
    }

    /// Sequence marker, length, then each element's value hash
    pub(crate) fn hash_into<H: Hasher>(&self, state: &mut H) {
        state.write_u8(SEQUENCE_HASH_TAG);
        state.write_u64(self.len() as u64);
        for element in self.iter() {
            element.hash(state);
        }
    }

    /// Stream the array through the writer
    ///
    /// Byte arrays use [`ValueWriter::write_byte_array`]; every other kind is
    /// bracketed by `begin_array`/`end_array` with one call per element.
    pub fn write_to<W: ValueWriter + ?Sized>(&self, writer: &mut W) -> Result<(), W::Error> {
        match self {
            Self::Byte(a) => writer.write_byte_array(a),
            Self::Short(a) => write_elements(writer, ArrayType::Short, a, |w, &v| w.write_i16(v)),
            Self::Int(a) => write_elements(writer, ArrayType::Int, a, |w, &v| w.write_i32(v)),
            Self::Long(a) => write_elements(writer, ArrayType::Long, a, |w, &v| w.write_i64(v)),
            Self::Float(a) => write_elements(writer, ArrayType::Float, a, |w, &v| w.write_f32(v)),
            Self::Double(a) => {
                write_elements(writer, ArrayType::Double, a, |w, &v| w.write_f64(v))
            }
            Self::Boolean(a) => {
                write_elements(writer, ArrayType::Boolean, a, |w, &v| w.write_boolean(v))
            }
            Self::Char(a) => write_elements(writer, ArrayType::Char, a, |w, &v| w.write_char(v)),
            Self::String(a) => {
                write_elements(writer, ArrayType::String, a, |w, v| w.write_string(v))
            }
            Self::Date(a) => write_elements(writer, ArrayType::Date, a, |w, &v| w.write_date(v)),
            Self::LocalTime(a) => {
                write_elements(writer, ArrayType::LocalTime, a, |w, &v| w.write_local_time(v))
            }
            Self::Time(a) => write_elements(writer, ArrayType::Time, a, |w, &v| w.write_time(v)),
            Self::LocalDateTime(a) => write_elements(writer, ArrayType::LocalDateTime, a, |w, &v| {
                w.write_local_date_time(v)
            }),
            Self::DateTime(a) => {
                write_elements(writer, ArrayType::DateTime, a, |w, &v| w.write_date_time(v))
            }
            Self::Duration(a) => {
                write_elements(writer, ArrayType::Duration, a, |w, &v| w.write_duration(v))
            }
            Self::Point(a) => write_elements(writer, ArrayType::Point, a, |w, v| v.write_to(w)),
        }
    }
}

fn write_elements<W, T>(
    writer: &mut W,
    element_type: ArrayType,
    items: &[T],
    mut write: impl FnMut(&mut W, &T) -> Result<(), W::Error>,
) -> Result<(), W::Error>
where
    W: ValueWriter + ?Sized,
{
    writer.begin_array(items.len(), element_type)?;
    for item in items {
        write(writer, item)?;
    }
    writer.end_array()
}

impl PartialEq for ArrayValue {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other).is_eq()
    }
}

impl Eq for ArrayValue {}

macro_rules! impl_from_vec {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<Vec<$ty>> for ArrayValue {
                fn from(items: Vec<$ty>) -> Self {
                    Self::$variant(items.into())
                }
            }
        )*
    };
}

impl_from_vec! {
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    bool => Boolean,
    char => Char,
    Arc<str> => String,
    NaiveDate => Date,
    NaiveTime => LocalTime,
    OffsetTime => Time,
    NaiveDateTime => LocalDateTime,
    DateTime<FixedOffset> => DateTime,
    DurationValue => Duration,
    PointValue => Point,
}

impl From<Vec<&str>> for ArrayValue {
    fn from(items: Vec<&str>) -> Self {
        Self::String(items.into_iter().map(Arc::from).collect())
    }
}

impl From<Vec<String>> for ArrayValue {
    fn from(items: Vec<String>) -> Self {
        Self::String(items.into_iter().map(Arc::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::hash::DefaultHasher;

    fn hash_of(array: &ArrayValue) -> u64 {
        let mut hasher = DefaultHasher::new();
        array.hash_into(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn backing_width_is_invisible() {
        let bytes = ArrayValue::from(vec![1_i8, 2, 3]);
        let doubles = ArrayValue::from(vec![1.0_f64, 2.0, 3.0]);
        assert_eq!(bytes, doubles);
        assert_eq!(hash_of(&bytes), hash_of(&doubles));
        assert_eq!(bytes.value_group(), ValueGroup::NumberArray);
    }

    #[test]
    fn length_breaks_ties() {
        let short = ArrayValue::from(vec![1_i32, 2]);
        let long = ArrayValue::from(vec![1_i32, 2, 3]);
        assert_ne!(short, long);
        assert_eq!(short.compare(&long), Ordering::Less);
        assert_eq!(
            ArrayValue::from(vec![1_i32, 3]).compare(&long),
            Ordering::Greater
        );
    }

    #[test]
    fn group_comes_before_elements() {
        let numbers = ArrayValue::from(vec![100_i64]);
        let texts = ArrayValue::from(vec!["a"]);
        assert_eq!(numbers.compare(&texts), Ordering::Less);

        let empty_ints = ArrayValue::from(Vec::<i32>::new());
        let empty_strings = ArrayValue::from(Vec::<String>::new());
        assert_ne!(empty_ints, empty_strings);
    }

    #[test]
    fn char_and_string_arrays_agree() {
        let chars = ArrayValue::from(vec!['a', 'b']);
        let strings = ArrayValue::from(vec!["a", "b"]);
        assert_eq!(chars, strings);
        assert_eq!(hash_of(&chars), hash_of(&strings));
    }

    #[test]
    fn from_values_requires_exact_kind() {
        let ok = ArrayValue::from_values(ArrayType::Int, vec![Value::int(1), Value::int(2)]).unwrap();
        assert_eq!(ok.element_type(), ArrayType::Int);
        assert_eq!(ok.len(), 2);

        let err = ArrayValue::from_values(ArrayType::Int, vec![Value::int(1), Value::long(2)])
            .unwrap_err();
        assert_eq!(err, ValueError::type_mismatch("int", "long"));
    }

    #[test]
    fn get_yields_scalars() {
        let array = ArrayValue::from(vec![PointValue::cartesian(1.0, 2.0)]);
        assert_eq!(array.get(0), Some(Value::point(PointValue::cartesian(1.0, 2.0))));
        assert_eq!(array.get(1), None);
        assert_eq!(array.iter().count(), 1);
    }
}
