//! Text rendering writer
//!
//! Two notations share one writer:
//!
//! | value | [`Notation::Tagged`] | [`Notation::Literal`] |
//! |---|---|---|
//! | any integral width | `Int(5)` | `5` |
//! | any floating width | `Float(5.0)`, `Float(NaN)` | `5.0`, `NaN` |
//! | boolean | `Boolean(true)` | `true` |
//! | char or string | `String("abc")` | `'abc'` |
//! | no value | `NoValue` | `null` |
//! | date | `Date(2020-01-31)` | `2020-01-31` |
//! | local time | `LocalTime(12:30:00)` | `12:30:00` |
//! | time | `Time(12:30:00+01:00)` | `12:30:00+01:00` |
//! | local date time | `LocalDateTime(2020-01-31T12:30:00)` | `2020-01-31T12:30:00` |
//! | date time | `DateTime(2020-01-31T12:30:00+01:00)` | `2020-01-31T12:30:00+01:00` |
//! | duration | `Duration(P1DT2H)` | `P1DT2H` |
//! | point | `Point({x: 1.0, y: 2.0, crs: 'cartesian'})` | `point({x: 1.0, y: 2.0, crs: 'cartesian'})` |
//! | array, list | `[Int(1), Int(2)]` | `[1, 2]` |
//! | map | `Map{a: Int(1)}` | `{a: 1}` |
//! | node, relationship | `Node(1)`, `Relationship(2)` | `node(1)`, `relationship(2)` |
//! | path | `Path(Node(1), Relationship(2), Node(3))` | `path(node(1), relationship(2), node(3))` |
//!
//! Floats of either width render their exact `f64` value in the shortest form
//! that round-trips, so equal numbers print identically: `0.1_f32` renders as
//! `0.10000000149011612`, the double it widens to, and `-0.0` renders as `0.0`.
//!
//! Map keys that are not plain identifiers are single-quoted and escaped like
//! text: `{'a, b': 1}`.

use core::fmt::{self, Write};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

use super::{AnyValueWriter, ArrayType, ValueWriter};
use crate::any::{NodeReference, RelationshipReference};
use crate::point::CoordinateReferenceSystem;
use crate::temporal::{
    DATE_TIME_FORMAT, DurationValue, LOCAL_DATE_TIME_FORMAT, LOCAL_TIME_FORMAT, OffsetTime,
};

/// Output notation of a [`PrettyPrinter`]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
pub enum Notation {
    /// Diagnostic form with a kind tag: `Int(5)`
    #[default]
    Tagged,
    /// Query-literal form: `5`
    Literal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameKind {
    Sequence,
    Map,
}

#[derive(Debug)]
struct Frame {
    kind: FrameKind,
    written: usize,
}

/// Writer that renders values as text into any [`fmt::Write`]
#[derive(Debug)]
pub struct PrettyPrinter<W> {
    out: W,
    notation: Notation,
    frames: Vec<Frame>,
}

impl<W: Write> PrettyPrinter<W> {
    pub const fn new(out: W, notation: Notation) -> Self {
        Self {
            out,
            notation,
            frames: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    const fn tagged(&self) -> bool {
        matches!(self.notation, Notation::Tagged)
    }

    /// Separator before an element of the enclosing sequence
    fn begin_item(&mut self) -> fmt::Result {
        if let Some(frame) = self.frames.last_mut() {
            if frame.kind == FrameKind::Sequence {
                if frame.written > 0 {
                    self.out.write_str(", ")?;
                }
                frame.written += 1;
            }
        }
        Ok(())
    }

    fn open(&mut self, kind: FrameKind, bracket: &str) -> fmt::Result {
        self.begin_item()?;
        self.out.write_str(bracket)?;
        self.frames.push(Frame { kind, written: 0 });
        Ok(())
    }

    fn close(&mut self, bracket: &str) -> fmt::Result {
        self.frames.pop();
        self.out.write_str(bracket)
    }

    /// `Tag(body)` in tagged notation, `body` in literal notation
    fn scalar(&mut self, tag: &str, body: fmt::Arguments<'_>) -> fmt::Result {
        self.begin_item()?;
        if self.tagged() {
            write!(self.out, "{tag}({body})")
        } else {
            self.out.write_fmt(body)
        }
    }

    fn floating(&mut self, repr: &str) -> fmt::Result {
        self.scalar("Float", format_args!("{repr}"))
    }

    fn text(&mut self, s: &str) -> fmt::Result {
        self.begin_item()?;
        if self.tagged() {
            write!(self.out, "String({s:?})")
        } else {
            write_quoted(&mut self.out, s)
        }
    }

    fn node(&mut self, node: NodeReference) -> fmt::Result {
        let tag = if self.tagged() { "Node" } else { "node" };
        write!(self.out, "{tag}({})", node.id())
    }

    fn relationship(&mut self, relationship: RelationshipReference) -> fmt::Result {
        let tag = if self.tagged() {
            "Relationship"
        } else {
            "relationship"
        };
        write!(self.out, "{tag}({})", relationship.id())
    }
}

fn write_quoted<W: Write>(out: &mut W, s: &str) -> fmt::Result {
    out.write_char('\'')?;
    for c in s.chars() {
        match c {
            '\'' => out.write_str("\\'")?,
            '\\' => out.write_str("\\\\")?,
            c => out.write_char(c)?,
        }
    }
    out.write_char('\'')
}

/// `{:?}` for finite values, `NaN`/`Infinity`/`-Infinity` otherwise; `-0.0`
/// prints as `0.0`
fn float_repr(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_owned()
    } else if value == f64::INFINITY {
        "Infinity".to_owned()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_owned()
    } else if value == 0.0 {
        "0.0".to_owned()
    } else {
        format!("{value:?}")
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
fn is_plain_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl<W: Write> ValueWriter for PrettyPrinter<W> {
    type Error = fmt::Error;

    fn write_null(&mut self) -> fmt::Result {
        self.begin_item()?;
        self.out
            .write_str(if self.tagged() { "NoValue" } else { "null" })
    }

    fn write_boolean(&mut self, value: bool) -> fmt::Result {
        self.scalar("Boolean", format_args!("{value}"))
    }

    fn write_i8(&mut self, value: i8) -> fmt::Result {
        self.write_i64(value.into())
    }

    fn write_i16(&mut self, value: i16) -> fmt::Result {
        self.write_i64(value.into())
    }

    fn write_i32(&mut self, value: i32) -> fmt::Result {
        self.write_i64(value.into())
    }

    fn write_i64(&mut self, value: i64) -> fmt::Result {
        self.scalar("Int", format_args!("{value}"))
    }

    fn write_f32(&mut self, value: f32) -> fmt::Result {
        self.write_f64(value.into())
    }

    fn write_f64(&mut self, value: f64) -> fmt::Result {
        let repr = float_repr(value);
        self.floating(&repr)
    }

    fn write_char(&mut self, value: char) -> fmt::Result {
        let mut buf = [0_u8; 4];
        self.text(value.encode_utf8(&mut buf))
    }

    fn write_string(&mut self, value: &str) -> fmt::Result {
        self.text(value)
    }

    fn write_date(&mut self, value: NaiveDate) -> fmt::Result {
        self.scalar("Date", format_args!("{}", value.format("%Y-%m-%d")))
    }

    fn write_local_time(&mut self, value: NaiveTime) -> fmt::Result {
        self.scalar(
            "LocalTime",
            format_args!("{}", value.format(LOCAL_TIME_FORMAT)),
        )
    }

    fn write_time(&mut self, value: OffsetTime) -> fmt::Result {
        self.scalar("Time", format_args!("{value}"))
    }

    fn write_local_date_time(&mut self, value: NaiveDateTime) -> fmt::Result {
        self.scalar(
            "LocalDateTime",
            format_args!("{}", value.format(LOCAL_DATE_TIME_FORMAT)),
        )
    }

    fn write_date_time(&mut self, value: DateTime<FixedOffset>) -> fmt::Result {
        self.scalar(
            "DateTime",
            format_args!("{}", value.format(DATE_TIME_FORMAT)),
        )
    }

    fn write_duration(&mut self, value: DurationValue) -> fmt::Result {
        self.scalar("Duration", format_args!("{value}"))
    }

    fn write_point(&mut self, crs: CoordinateReferenceSystem, coordinates: &[f64]) -> fmt::Result {
        self.begin_item()?;
        self.out
            .write_str(if self.tagged() { "Point({" } else { "point({" })?;
        for (axis, value) in crs.axis_names().iter().zip(coordinates) {
            let repr = float_repr(*value);
            write!(self.out, "{axis}: {repr}, ")?;
        }
        write!(self.out, "crs: '{crs}'}})")
    }

    fn begin_array(&mut self, _len: usize, _element_type: ArrayType) -> fmt::Result {
        self.open(FrameKind::Sequence, "[")
    }

    fn end_array(&mut self) -> fmt::Result {
        self.close("]")
    }
}

impl<W: Write> AnyValueWriter for PrettyPrinter<W> {
    fn write_node_reference(&mut self, node: NodeReference) -> fmt::Result {
        self.begin_item()?;
        self.node(node)
    }

    fn write_relationship_reference(
        &mut self,
        relationship: RelationshipReference,
    ) -> fmt::Result {
        self.begin_item()?;
        self.relationship(relationship)
    }

    fn begin_list(&mut self, _len: usize) -> fmt::Result {
        self.open(FrameKind::Sequence, "[")
    }

    fn end_list(&mut self) -> fmt::Result {
        self.close("]")
    }

    fn begin_map(&mut self, _len: usize) -> fmt::Result {
        let bracket = if self.tagged() { "Map{" } else { "{" };
        self.open(FrameKind::Map, bracket)
    }

    fn write_map_key(&mut self, key: &str) -> fmt::Result {
        if let Some(frame) = self.frames.last_mut() {
            if frame.written > 0 {
                self.out.write_str(", ")?;
            }
            frame.written += 1;
        }
        if is_plain_identifier(key) {
            self.out.write_str(key)?;
        } else {
            write_quoted(&mut self.out, key)?;
        }
        self.out.write_str(": ")
    }

    fn end_map(&mut self) -> fmt::Result {
        self.close("}")
    }

    fn write_path(
        &mut self,
        nodes: &[NodeReference],
        relationships: &[RelationshipReference],
    ) -> fmt::Result {
        self.begin_item()?;
        self.out
            .write_str(if self.tagged() { "Path(" } else { "path(" })?;
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                self.out.write_str(", ")?;
                if let Some(relationship) = relationships.get(i - 1) {
                    self.relationship(*relationship)?;
                    self.out.write_str(", ")?;
                }
            }
            self.node(*node)?;
        }
        self.out.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;
    use crate::any::{AnyValue, MapValue};

    fn literal(value: &Value) -> String {
        let mut out = String::new();
        value
            .write_to(&mut PrettyPrinter::new(&mut out, Notation::Literal))
            .unwrap();
        out
    }

    #[test]
    fn string_quoting() {
        assert_eq!(Value::string("it's").pretty_print(), "String(\"it's\")");
        assert_eq!(literal(&Value::string("it's")), "'it\\'s'");
        assert_eq!(literal(&Value::char('\\')), "'\\\\'");
    }

    #[test]
    fn floats_render_their_widened_value() {
        assert_eq!(Value::float(0.1).pretty_print(), "Float(0.10000000149011612)");
        assert_eq!(
            Value::float(0.1).pretty_print(),
            Value::double(f64::from(0.1_f32)).pretty_print()
        );
        assert_eq!(Value::double(0.1).pretty_print(), "Float(0.1)");
        assert_eq!(Value::float(2.5).pretty_print(), "Float(2.5)");
        assert_eq!(Value::double(-0.0).pretty_print(), "Float(0.0)");
        assert_eq!(Value::double(1e300).pretty_print(), "Float(1e300)");
        assert_eq!(Value::float(f32::NEG_INFINITY).pretty_print(), "Float(-Infinity)");
        assert_eq!(literal(&Value::double(f64::NAN)), "NaN");
    }

    #[test]
    fn nested_separators() {
        let value = Value::array(vec![1_i16, 2, 3]);
        assert_eq!(value.pretty_print(), "[Int(1), Int(2), Int(3)]");
        assert_eq!(literal(&value), "[1, 2, 3]");
        assert_eq!(Value::array(Vec::<bool>::new()).pretty_print(), "[]");
    }

    #[test]
    fn map_keys_are_quoted_unless_plain() {
        let map: MapValue = [
            ("a, b: c", AnyValue::from(1_i32)),
            ("plain_key1", AnyValue::from(2_i32)),
            ("it's", AnyValue::from(3_i32)),
            ("", AnyValue::from(4_i32)),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            AnyValue::from(map.clone()).pretty_print(),
            "Map{'': Int(4), 'a, b: c': Int(1), 'it\\'s': Int(3), plain_key1: Int(2)}"
        );
        assert_eq!(
            AnyValue::from(map).to_string(),
            "{'': 4, 'a, b: c': 1, 'it\\'s': 3, plain_key1: 2}"
        );
    }

    #[test]
    fn plain_identifiers() {
        assert!(is_plain_identifier("name"));
        assert!(is_plain_identifier("_x9"));
        assert!(!is_plain_identifier("9x"));
        assert!(!is_plain_identifier("a b"));
        assert!(!is_plain_identifier(""));
    }
}
