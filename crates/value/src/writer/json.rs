//! Host-neutral copies as `serde_json::Value`
//!
//! Mapping:
//! - integers of every width become JSON integers
//! - finite floats become JSON numbers; `NaN`, `Infinity` and `-Infinity`
//!   become those strings
//! - text becomes a string, temporals their ISO-8601 string
//! - points become `{"crs": "cartesian", "srid": 7203, "coordinates": [..]}`
//! - arrays and lists become JSON arrays, maps JSON objects
//! - nodes and relationships become `{"id": 1, "type": "node"}`
//! - paths become `{"nodes": [..], "relationships": [..]}` of ids
//! - no value becomes `null`

use core::convert::Infallible;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::{Map, Number, Value as Json, json};

use super::{AnyValueWriter, ArrayType, ValueWriter};
use crate::any::{NodeReference, RelationshipReference};
use crate::point::CoordinateReferenceSystem;
use crate::temporal::{
    DATE_TIME_FORMAT, DurationValue, LOCAL_DATE_TIME_FORMAT, LOCAL_TIME_FORMAT, OffsetTime,
};

enum Frame {
    Array(Vec<Json>),
    Object {
        entries: Map<String, Json>,
        key: Option<String>,
    },
}

/// Writer that builds a `serde_json::Value`
#[derive(Default)]
pub struct JsonWriter {
    frames: Vec<Frame>,
    root: Option<Json>,
}

impl JsonWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The finished JSON value; `null` if nothing was written
    pub fn into_value(self) -> Json {
        self.root.unwrap_or(Json::Null)
    }

    fn push(&mut self, value: Json) -> Result<(), Infallible> {
        match self.frames.last_mut() {
            Some(Frame::Array(items)) => items.push(value),
            Some(Frame::Object { entries, key }) => {
                let key = key.take().unwrap_or_default();
                entries.insert(key, value);
            }
            None => self.root = Some(value),
        }
        Ok(())
    }

    fn pop(&mut self) -> Result<(), Infallible> {
        let value = match self.frames.pop() {
            Some(Frame::Array(items)) => Json::Array(items),
            Some(Frame::Object { entries, .. }) => Json::Object(entries),
            None => {
                tracing::debug!("json writer received an unbalanced close");
                return Ok(());
            }
        };
        self.push(value)
    }
}

fn floating(value: f64) -> Json {
    Number::from_f64(value).map_or_else(
        || {
            let name = if value.is_nan() {
                "NaN"
            } else if value > 0.0 {
                "Infinity"
            } else {
                "-Infinity"
            };
            Json::String(name.to_owned())
        },
        Json::Number,
    )
}

fn entity(id: i64, kind: &str) -> Json {
    json!({ "id": id, "type": kind })
}

impl ValueWriter for JsonWriter {
    type Error = Infallible;

    fn write_null(&mut self) -> Result<(), Infallible> {
        self.push(Json::Null)
    }

    fn write_boolean(&mut self, value: bool) -> Result<(), Infallible> {
        self.push(Json::Bool(value))
    }

    fn write_i8(&mut self, value: i8) -> Result<(), Infallible> {
        self.push(Json::from(value))
    }

    fn write_i16(&mut self, value: i16) -> Result<(), Infallible> {
        self.push(Json::from(value))
    }

    fn write_i32(&mut self, value: i32) -> Result<(), Infallible> {
        self.push(Json::from(value))
    }

    fn write_i64(&mut self, value: i64) -> Result<(), Infallible> {
        self.push(Json::from(value))
    }

    fn write_f32(&mut self, value: f32) -> Result<(), Infallible> {
        self.push(floating(value.into()))
    }

    fn write_f64(&mut self, value: f64) -> Result<(), Infallible> {
        self.push(floating(value))
    }

    fn write_char(&mut self, value: char) -> Result<(), Infallible> {
        self.push(Json::String(value.to_string()))
    }

    fn write_string(&mut self, value: &str) -> Result<(), Infallible> {
        self.push(Json::String(value.to_owned()))
    }

    fn write_date(&mut self, value: NaiveDate) -> Result<(), Infallible> {
        self.push(Json::String(value.format("%Y-%m-%d").to_string()))
    }

    fn write_local_time(&mut self, value: NaiveTime) -> Result<(), Infallible> {
        self.push(Json::String(value.format(LOCAL_TIME_FORMAT).to_string()))
    }

    fn write_time(&mut self, value: OffsetTime) -> Result<(), Infallible> {
        self.push(Json::String(value.to_string()))
    }

    fn write_local_date_time(&mut self, value: NaiveDateTime) -> Result<(), Infallible> {
        self.push(Json::String(
            value.format(LOCAL_DATE_TIME_FORMAT).to_string(),
        ))
    }

    fn write_date_time(&mut self, value: DateTime<FixedOffset>) -> Result<(), Infallible> {
        self.push(Json::String(value.format(DATE_TIME_FORMAT).to_string()))
    }

    fn write_duration(&mut self, value: DurationValue) -> Result<(), Infallible> {
        self.push(Json::String(value.to_string()))
    }

    fn write_point(
        &mut self,
        crs: CoordinateReferenceSystem,
        coordinates: &[f64],
    ) -> Result<(), Infallible> {
        let coordinates: Vec<Json> = coordinates.iter().copied().map(floating).collect();
        self.push(json!({
            "crs": crs.name(),
            "srid": crs.code(),
            "coordinates": coordinates,
        }))
    }

    fn begin_array(&mut self, len: usize, _element_type: ArrayType) -> Result<(), Infallible> {
        self.frames.push(Frame::Array(Vec::with_capacity(len)));
        Ok(())
    }

    fn end_array(&mut self) -> Result<(), Infallible> {
        self.pop()
    }

    fn write_byte_array(&mut self, value: &[i8]) -> Result<(), Infallible> {
        self.push(Json::Array(value.iter().map(|&b| Json::from(b)).collect()))
    }
}

impl AnyValueWriter for JsonWriter {
    fn write_node_reference(&mut self, node: NodeReference) -> Result<(), Infallible> {
        self.push(entity(node.id(), "node"))
    }

    fn write_relationship_reference(
        &mut self,
        relationship: RelationshipReference,
    ) -> Result<(), Infallible> {
        self.push(entity(relationship.id(), "relationship"))
    }

    fn begin_list(&mut self, len: usize) -> Result<(), Infallible> {
        self.frames.push(Frame::Array(Vec::with_capacity(len)));
        Ok(())
    }

    fn end_list(&mut self) -> Result<(), Infallible> {
        self.pop()
    }

    fn begin_map(&mut self, _len: usize) -> Result<(), Infallible> {
        self.frames.push(Frame::Object {
            entries: Map::new(),
            key: None,
        });
        Ok(())
    }

    fn write_map_key(&mut self, key: &str) -> Result<(), Infallible> {
        if let Some(Frame::Object { key: pending, .. }) = self.frames.last_mut() {
            *pending = Some(key.to_owned());
        }
        Ok(())
    }

    fn end_map(&mut self) -> Result<(), Infallible> {
        self.pop()
    }

    fn write_path(
        &mut self,
        nodes: &[NodeReference],
        relationships: &[RelationshipReference],
    ) -> Result<(), Infallible> {
        let nodes: Vec<i64> = nodes.iter().map(NodeReference::id).collect();
        let relationships: Vec<i64> = relationships
            .iter()
            .map(RelationshipReference::id)
            .collect();
        self.push(json!({ "nodes": nodes, "relationships": relationships }))
    }
}
