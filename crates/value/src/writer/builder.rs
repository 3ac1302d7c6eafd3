//! Rebuilding values from the writer call stream
//!
//! [`ValueBuilder`] is the reading side of the writer contract: feed it the
//! calls a value makes in [`Value::write_to`] and [`ValueBuilder::finish`]
//! hands back an equal value at the same storage width. Decoders drive it the
//! same way after parsing their own format.
//!
//! ```rust
//! use strata_value::{Value, ValueBuilder};
//!
//! let original = Value::array(vec![1_i16, 2, 3]);
//! let mut builder = ValueBuilder::new();
//! original.write_to(&mut builder).unwrap();
//! assert_eq!(builder.finish().unwrap(), original);
//! ```

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::{debug, trace};

use super::{ArrayType, ValueWriter};
use crate::array::ArrayValue;
use crate::error::{ValueError, ValueResult};
use crate::limits::ValueLimits;
use crate::point::{CoordinateReferenceSystem, PointValue};
use crate::temporal::{DurationValue, OffsetTime};
use crate::value::Value;

/// Upper bound on pre-allocated array capacity, whatever length is announced
const MAX_PREALLOCATED_ELEMENTS: usize = 4096;

#[derive(Debug)]
struct ArrayFrame {
    element_type: ArrayType,
    expected: usize,
    items: Vec<Value>,
}

/// Writer that reconstructs exactly one [`Value`]
#[derive(Debug, Default)]
pub struct ValueBuilder {
    limits: ValueLimits,
    array: Option<ArrayFrame>,
    result: Option<Value>,
}

impl ValueBuilder {
    /// Builder with default limits
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: ValueLimits) -> Self {
        Self {
            limits,
            array: None,
            result: None,
        }
    }

    /// Take the built value
    ///
    /// # Errors
    ///
    /// [`ValueError::WriterProtocol`] if an array is still open or nothing
    /// was written.
    pub fn finish(self) -> ValueResult<Value> {
        if let Some(frame) = self.array {
            return Err(protocol(format!(
                "array of {} elements was never closed",
                frame.expected
            )));
        }
        self.result
            .ok_or_else(|| protocol("no value was written"))
    }

    fn push(&mut self, value: Value) -> ValueResult<()> {
        if let Some(frame) = &mut self.array {
            if frame.items.len() == frame.expected {
                return Err(protocol(format!(
                    "{} array announced {} elements but received more",
                    frame.element_type.name(),
                    frame.expected
                )));
            }
            frame.items.push(value);
            return Ok(());
        }
        if self.result.is_some() {
            return Err(protocol("more than one top-level value"));
        }
        self.result = Some(value);
        Ok(())
    }

    fn ensure_not_in_array(&self) -> ValueResult<()> {
        if self.array.is_some() {
            return Err(protocol("arrays cannot be nested"));
        }
        Ok(())
    }
}

fn protocol(reason: impl Into<String>) -> ValueError {
    let error = ValueError::protocol(reason);
    debug!(%error, "rejected writer call sequence");
    error
}

impl ValueWriter for ValueBuilder {
    type Error = ValueError;

    fn write_null(&mut self) -> ValueResult<()> {
        self.push(Value::NoValue)
    }

    fn write_boolean(&mut self, value: bool) -> ValueResult<()> {
        self.push(Value::boolean(value))
    }

    fn write_i8(&mut self, value: i8) -> ValueResult<()> {
        self.push(Value::byte(value))
    }

    fn write_i16(&mut self, value: i16) -> ValueResult<()> {
        self.push(Value::short(value))
    }

    fn write_i32(&mut self, value: i32) -> ValueResult<()> {
        self.push(Value::int(value))
    }

    fn write_i64(&mut self, value: i64) -> ValueResult<()> {
        self.push(Value::long(value))
    }

    fn write_f32(&mut self, value: f32) -> ValueResult<()> {
        self.push(Value::float(value))
    }

    fn write_f64(&mut self, value: f64) -> ValueResult<()> {
        self.push(Value::double(value))
    }

    fn write_char(&mut self, value: char) -> ValueResult<()> {
        self.push(Value::char(value))
    }

    fn write_string(&mut self, value: &str) -> ValueResult<()> {
        self.limits.check_string_bytes(value.len())?;
        self.push(Value::string(value))
    }

    fn write_date(&mut self, value: NaiveDate) -> ValueResult<()> {
        self.push(Value::date(value))
    }

    fn write_local_time(&mut self, value: NaiveTime) -> ValueResult<()> {
        self.push(Value::local_time(value))
    }

    fn write_time(&mut self, value: OffsetTime) -> ValueResult<()> {
        self.push(Value::time(value))
    }

    fn write_local_date_time(&mut self, value: NaiveDateTime) -> ValueResult<()> {
        self.push(Value::local_date_time(value))
    }

    fn write_date_time(&mut self, value: DateTime<FixedOffset>) -> ValueResult<()> {
        self.push(Value::date_time(value))
    }

    fn write_duration(&mut self, value: DurationValue) -> ValueResult<()> {
        self.push(Value::duration(value))
    }

    fn write_point(
        &mut self,
        crs: CoordinateReferenceSystem,
        coordinates: &[f64],
    ) -> ValueResult<()> {
        self.push(Value::point(PointValue::new(crs, coordinates)?))
    }

    fn begin_array(&mut self, len: usize, element_type: ArrayType) -> ValueResult<()> {
        self.ensure_not_in_array()?;
        if self.result.is_some() {
            return Err(protocol("more than one top-level value"));
        }
        self.limits.check_array_length(len)?;
        self.array = Some(ArrayFrame {
            element_type,
            expected: len,
            items: Vec::with_capacity(len.min(MAX_PREALLOCATED_ELEMENTS)),
        });
        Ok(())
    }

    fn end_array(&mut self) -> ValueResult<()> {
        let frame = self
            .array
            .take()
            .ok_or_else(|| protocol("end_array without begin_array"))?;
        if frame.items.len() != frame.expected {
            return Err(protocol(format!(
                "{} array announced {} elements but received {}",
                frame.element_type.name(),
                frame.expected,
                frame.items.len()
            )));
        }
        let array = ArrayValue::from_values(frame.element_type, frame.items)?;
        trace!(
            element_type = frame.element_type.name(),
            len = array.len(),
            "built array"
        );
        self.push(Value::Array(array))
    }

    fn write_byte_array(&mut self, value: &[i8]) -> ValueResult<()> {
        self.ensure_not_in_array()?;
        self.limits.check_array_length(value.len())?;
        self.push(Value::array(value.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rebuild(value: &Value) -> Value {
        let mut builder = ValueBuilder::new();
        value.write_to(&mut builder).unwrap();
        builder.finish().unwrap()
    }

    #[test]
    fn round_trip_keeps_width() {
        let value = Value::short(7);
        let rebuilt = rebuild(&value);
        assert_eq!(rebuilt.type_name(), "short");
        assert_eq!(rebuilt, value);

        let array = Value::array(vec![DurationValue::ZERO]);
        assert_eq!(rebuild(&array), array);
    }

    #[test]
    fn rejects_nested_arrays() {
        let mut builder = ValueBuilder::new();
        builder.begin_array(1, ArrayType::Int).unwrap();
        let err = builder.begin_array(0, ArrayType::Int).unwrap_err();
        assert_eq!(err, ValueError::protocol("arrays cannot be nested"));
        assert!(builder.write_byte_array(&[1]).is_err());
    }

    #[test]
    fn rejects_wrong_element_count() {
        let mut builder = ValueBuilder::new();
        builder.begin_array(2, ArrayType::Long).unwrap();
        builder.write_i64(1).unwrap();
        assert!(builder.end_array().is_err());

        let mut builder = ValueBuilder::new();
        builder.begin_array(0, ArrayType::Long).unwrap();
        assert!(builder.write_i64(1).is_err());
    }

    #[test]
    fn rejects_mixed_element_kinds() {
        let mut builder = ValueBuilder::new();
        builder.begin_array(2, ArrayType::Long).unwrap();
        builder.write_i64(1).unwrap();
        builder.write_i32(2).unwrap();
        assert_eq!(
            builder.end_array().unwrap_err(),
            ValueError::type_mismatch("long", "int")
        );
    }

    #[test]
    fn rejects_unbalanced_and_repeated_values() {
        let mut builder = ValueBuilder::new();
        assert!(builder.end_array().is_err());

        let mut builder = ValueBuilder::new();
        builder.write_boolean(true).unwrap();
        assert!(builder.write_boolean(false).is_err());

        assert!(ValueBuilder::new().finish().is_err());

        let mut builder = ValueBuilder::new();
        builder.begin_array(1, ArrayType::Char).unwrap();
        assert!(builder.finish().is_err());
    }

    #[test]
    fn enforces_limits() {
        let limits = ValueLimits {
            max_array_length: 2,
            max_string_bytes: 3,
        };
        let mut builder = ValueBuilder::with_limits(limits);
        assert!(matches!(
            builder.begin_array(3, ArrayType::Int),
            Err(ValueError::LimitExceeded { .. })
        ));
        let mut builder = ValueBuilder::with_limits(limits);
        assert!(matches!(
            builder.write_string("abcd"),
            Err(ValueError::LimitExceeded { .. })
        ));
    }
}
