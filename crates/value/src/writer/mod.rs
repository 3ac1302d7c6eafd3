//! The writer contract
//!
//! A [`ValueWriter`] is a destination-agnostic sink with one method per
//! primitive kind. Values push themselves into a writer through
//! [`Value::write_to`](crate::Value::write_to): the value decides which method
//! fires, the writer decides what the bytes, text or objects look like.
//! Implementing every method of the trait is sufficient to serialize every
//! value variant.
//!
//! Integers and floats arrive at their exact stored width. A writer that
//! wants a canonical width widens on its own side.
//!
//! Arrays are streamed: `begin_array(len, element_type)`, exactly `len`
//! element calls, then `end_array()`. Byte arrays go through
//! [`ValueWriter::write_byte_array`], which defaults to that same bracketed
//! stream so simple writers need not special-case it.
//!
//! ## Writers shipped with the crate
//!
//! - [`PrettyPrinter`] renders diagnostic and literal text
//! - [`JsonWriter`] produces host-neutral `serde_json::Value` copies
//! - [`ValueBuilder`] rebuilds a [`Value`](crate::Value) from the call stream
//! - [`BinaryWriter`](crate::codec::BinaryWriter) encodes a compact byte form

mod builder;
mod json;
mod pretty;

pub use builder::ValueBuilder;
pub use json::JsonWriter;
pub use pretty::{Notation, PrettyPrinter};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

use crate::any::{NodeReference, RelationshipReference};
use crate::group::ValueGroup;
use crate::point::CoordinateReferenceSystem;
use crate::temporal::{DurationValue, OffsetTime};

/// Element kind announced by [`ValueWriter::begin_array`]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ArrayType {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Boolean,
    Char,
    String,
    Date,
    LocalTime,
    Time,
    LocalDateTime,
    DateTime,
    Duration,
    Point,
}

impl ArrayType {
    /// All element kinds
    pub const ALL: [Self; 16] = [
        Self::Byte,
        Self::Short,
        Self::Int,
        Self::Long,
        Self::Float,
        Self::Double,
        Self::Boolean,
        Self::Char,
        Self::String,
        Self::Date,
        Self::LocalTime,
        Self::Time,
        Self::LocalDateTime,
        Self::DateTime,
        Self::Duration,
        Self::Point,
    ];

    /// Group of an array with this element kind
    pub const fn value_group(&self) -> ValueGroup {
        match self {
            Self::Byte | Self::Short | Self::Int | Self::Long | Self::Float | Self::Double => {
                ValueGroup::NumberArray
            }
            Self::Boolean => ValueGroup::BooleanArray,
            Self::Char | Self::String => ValueGroup::TextArray,
            Self::Date => ValueGroup::DateArray,
            Self::LocalTime => ValueGroup::LocalTimeArray,
            Self::Time => ValueGroup::ZonedTimeArray,
            Self::LocalDateTime => ValueGroup::LocalDateTimeArray,
            Self::DateTime => ValueGroup::ZonedDateTimeArray,
            Self::Duration => ValueGroup::DurationArray,
            Self::Point => ValueGroup::GeometryArray,
        }
    }

    /// Lower-case element name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Boolean => "boolean",
            Self::Char => "char",
            Self::String => "string",
            Self::Date => "date",
            Self::LocalTime => "local_time",
            Self::Time => "time",
            Self::LocalDateTime => "local_date_time",
            Self::DateTime => "date_time",
            Self::Duration => "duration",
            Self::Point => "point",
        }
    }
}

/// Output sink for storable values
///
/// `Error` is the writer's own failure type. Values never inspect, wrap or
/// swallow it.
pub trait ValueWriter {
    /// Failure type of this writer
    type Error;

    fn write_null(&mut self) -> Result<(), Self::Error>;

    fn write_boolean(&mut self, value: bool) -> Result<(), Self::Error>;

    fn write_i8(&mut self, value: i8) -> Result<(), Self::Error>;

    fn write_i16(&mut self, value: i16) -> Result<(), Self::Error>;

    fn write_i32(&mut self, value: i32) -> Result<(), Self::Error>;

    fn write_i64(&mut self, value: i64) -> Result<(), Self::Error>;

    fn write_f32(&mut self, value: f32) -> Result<(), Self::Error>;

    fn write_f64(&mut self, value: f64) -> Result<(), Self::Error>;

    fn write_char(&mut self, value: char) -> Result<(), Self::Error>;

    fn write_string(&mut self, value: &str) -> Result<(), Self::Error>;

    fn write_date(&mut self, value: NaiveDate) -> Result<(), Self::Error>;

    fn write_local_time(&mut self, value: NaiveTime) -> Result<(), Self::Error>;

    fn write_time(&mut self, value: OffsetTime) -> Result<(), Self::Error>;

    fn write_local_date_time(&mut self, value: NaiveDateTime) -> Result<(), Self::Error>;

    fn write_date_time(&mut self, value: DateTime<FixedOffset>) -> Result<(), Self::Error>;

    fn write_duration(&mut self, value: DurationValue) -> Result<(), Self::Error>;

    /// `coordinates.len()` always equals `crs.dimension()`
    fn write_point(
        &mut self,
        crs: CoordinateReferenceSystem,
        coordinates: &[f64],
    ) -> Result<(), Self::Error>;

    fn begin_array(&mut self, len: usize, element_type: ArrayType) -> Result<(), Self::Error>;

    fn end_array(&mut self) -> Result<(), Self::Error>;

    /// Write a whole byte array
    fn write_byte_array(&mut self, value: &[i8]) -> Result<(), Self::Error> {
        self.begin_array(value.len(), ArrayType::Byte)?;
        for &b in value {
            self.write_i8(b)?;
        }
        self.end_array()
    }
}

/// Output sink for query-result values: storable values plus graph entities
/// and virtual collections
pub trait AnyValueWriter: ValueWriter {
    fn write_node_reference(&mut self, node: NodeReference) -> Result<(), Self::Error>;

    fn write_relationship_reference(
        &mut self,
        relationship: RelationshipReference,
    ) -> Result<(), Self::Error>;

    fn begin_list(&mut self, len: usize) -> Result<(), Self::Error>;

    fn end_list(&mut self) -> Result<(), Self::Error>;

    /// Entries follow as `write_map_key` + one value, `len` times
    fn begin_map(&mut self, len: usize) -> Result<(), Self::Error>;

    fn write_map_key(&mut self, key: &str) -> Result<(), Self::Error>;

    fn end_map(&mut self) -> Result<(), Self::Error>;

    /// `relationships.len() + 1 == nodes.len()`
    fn write_path(
        &mut self,
        nodes: &[NodeReference],
        relationships: &[RelationshipReference],
    ) -> Result<(), Self::Error>;
}
