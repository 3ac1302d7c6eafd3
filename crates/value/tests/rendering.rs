//! Rendering tables for `pretty_print`, `Display` and `as_object_copy`

use chrono::{DateTime, NaiveDate, NaiveTime};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;
use strata_value::{
    AnyValue, DurationValue, ListValue, MapValue, NodeReference, OffsetTime, PathValue,
    PointValue, RelationshipReference, Value,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn time(h: u32, m: u32, s: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, s).unwrap()
}

#[rstest]
#[case::byte(Value::byte(5), "Int(5)", "5")]
#[case::short(Value::short(5), "Int(5)", "5")]
#[case::int(Value::int(5), "Int(5)", "5")]
#[case::long(Value::long(5), "Int(5)", "5")]
#[case::negative(Value::long(i64::MIN), "Int(-9223372036854775808)", "-9223372036854775808")]
#[case::float(Value::float(5.0), "Float(5.0)", "5.0")]
#[case::double(Value::double(5.0), "Float(5.0)", "5.0")]
#[case::fraction(Value::double(-0.25), "Float(-0.25)", "-0.25")]
#[case::nan(Value::double(f64::NAN), "Float(NaN)", "NaN")]
#[case::infinity(Value::float(f32::INFINITY), "Float(Infinity)", "Infinity")]
#[case::neg_infinity(Value::double(f64::NEG_INFINITY), "Float(-Infinity)", "-Infinity")]
#[case::boolean(Value::boolean(true), "Boolean(true)", "true")]
#[case::string(Value::string("abc"), "String(\"abc\")", "'abc'")]
#[case::char(Value::char('a'), "String(\"a\")", "'a'")]
#[case::no_value(Value::NoValue, "NoValue", "null")]
#[case::date(Value::date(date(2020, 1, 31)), "Date(2020-01-31)", "2020-01-31")]
#[case::local_time(Value::local_time(time(12, 30, 0)), "LocalTime(12:30:00)", "12:30:00")]
#[case::time(
    Value::time(OffsetTime::from_hms_nano(12, 30, 0, 0, 3600).unwrap()),
    "Time(12:30:00+01:00)",
    "12:30:00+01:00"
)]
#[case::local_date_time(
    Value::local_date_time(date(2020, 1, 31).and_time(time(12, 30, 0))),
    "LocalDateTime(2020-01-31T12:30:00)",
    "2020-01-31T12:30:00"
)]
#[case::date_time(
    Value::date_time(DateTime::parse_from_rfc3339("2020-01-31T12:30:00.5+01:00").unwrap()),
    "DateTime(2020-01-31T12:30:00.500+01:00)",
    "2020-01-31T12:30:00.500+01:00"
)]
#[case::duration(
    Value::duration(DurationValue::new(14, 3, 4 * 3600 + 5 * 60 + 6, 500_000_000).unwrap()),
    "Duration(P1Y2M3DT4H5M6.5S)",
    "P1Y2M3DT4H5M6.5S"
)]
#[case::point(
    Value::point(PointValue::cartesian(1.0, 2.0)),
    "Point({x: 1.0, y: 2.0, crs: 'cartesian'})",
    "point({x: 1.0, y: 2.0, crs: 'cartesian'})"
)]
#[case::geographic_point(
    Value::point(PointValue::wgs84_3d(12.5, 55.5, 10.0)),
    "Point({longitude: 12.5, latitude: 55.5, height: 10.0, crs: 'wgs-84-3d'})",
    "point({longitude: 12.5, latitude: 55.5, height: 10.0, crs: 'wgs-84-3d'})"
)]
#[case::byte_array(Value::array(vec![1_i8, 2]), "[Int(1), Int(2)]", "[1, 2]")]
#[case::long_array(Value::array(vec![1_i64, 2]), "[Int(1), Int(2)]", "[1, 2]")]
#[case::string_array(Value::array(vec!["a", "b"]), "[String(\"a\"), String(\"b\")]", "['a', 'b']")]
#[case::empty_array(Value::array(Vec::<f64>::new()), "[]", "[]")]
fn renders(#[case] value: Value, #[case] tagged: &str, #[case] literal: &str) {
    assert_eq!(value.pretty_print(), tagged);
    assert_eq!(value.to_string(), literal);
}

#[rstest]
#[case::tenth(0.1)]
#[case::third(1.0 / 3.0)]
#[case::largest(f32::MAX)]
#[case::tiny(1e-45)]
#[case::negative_zero(-0.0)]
#[case::nan(f32::NAN)]
fn float_renders_like_its_widened_double(#[case] f: f32) {
    let float = Value::float(f);
    let double = Value::double(f64::from(f));
    assert_eq!(float, double);
    assert_eq!(float.pretty_print(), double.pretty_print());
    assert_eq!(float.to_string(), double.to_string());
}

#[test]
fn unequal_floats_render_differently() {
    let float = Value::float(0.1);
    let double = Value::double(0.1);
    assert_ne!(float, double);
    assert_ne!(float.pretty_print(), double.pretty_print());
}

#[test]
fn rendering_is_deterministic() {
    let value = Value::array(vec![0.1_f64, f64::NAN]);
    assert_eq!(value.pretty_print(), value.clone().pretty_print());
    assert_eq!(value.pretty_print(), "[Float(0.1), Float(NaN)]");
}

#[rstest]
#[case::integer(Value::short(-3), json!(-3))]
#[case::double(Value::double(0.5), json!(0.5))]
#[case::nan(Value::double(f64::NAN), json!("NaN"))]
#[case::infinity(Value::double(f64::INFINITY), json!("Infinity"))]
#[case::text(Value::char('q'), json!("q"))]
#[case::no_value(Value::NoValue, json!(null))]
#[case::date(Value::date(date(1999, 12, 31)), json!("1999-12-31"))]
#[case::duration(Value::duration(DurationValue::ZERO), json!("PT0S"))]
#[case::point(
    Value::point(PointValue::cartesian(1.0, -1.0)),
    json!({ "crs": "cartesian", "srid": 7203, "coordinates": [1.0, -1.0] })
)]
#[case::array(Value::array(vec![true, false]), json!([true, false]))]
fn object_copies(#[case] value: Value, #[case] expected: serde_json::Value) {
    assert_eq!(value.as_object_copy(), expected);
}

fn sample_path() -> PathValue {
    PathValue::new(
        vec![NodeReference::new(1), NodeReference::new(3)],
        vec![RelationshipReference::new(2)],
    )
    .unwrap()
}

fn sample_map() -> MapValue {
    [
        ("b", AnyValue::from(Value::array(vec![1_i32]))),
        ("a", AnyValue::from("x")),
    ]
    .into_iter()
    .collect()
}

#[rstest]
#[case::node(AnyValue::from(NodeReference::new(7)), "Node(7)", "node(7)")]
#[case::relationship(
    AnyValue::from(RelationshipReference::new(8)),
    "Relationship(8)",
    "relationship(8)"
)]
#[case::list(
    AnyValue::from(ListValue::from(vec![AnyValue::from(1_i64), AnyValue::from(NodeReference::new(2))])),
    "[Int(1), Node(2)]",
    "[1, node(2)]"
)]
#[case::map(AnyValue::from(sample_map()), "Map{a: String(\"x\"), b: [Int(1)]}", "{a: 'x', b: [1]}")]
#[case::path(
    AnyValue::from(sample_path()),
    "Path(Node(1), Relationship(2), Node(3))",
    "path(node(1), relationship(2), node(3))"
)]
#[case::nested(
    AnyValue::from(ListValue::from(vec![
        AnyValue::from(ListValue::default()),
        AnyValue::from(MapValue::default()),
    ])),
    "[[], Map{}]",
    "[[], {}]"
)]
fn renders_any_values(#[case] value: AnyValue, #[case] tagged: &str, #[case] literal: &str) {
    assert_eq!(value.pretty_print(), tagged);
    assert_eq!(value.to_string(), literal);
}

#[test]
fn any_value_object_copies() {
    let value = AnyValue::from(ListValue::from(vec![
        AnyValue::from(NodeReference::new(1)),
        AnyValue::from(sample_map()),
        AnyValue::from(sample_path()),
    ]));
    assert_eq!(
        value.as_object_copy(),
        json!([
            { "id": 1, "type": "node" },
            { "a": "x", "b": [1] },
            { "nodes": [1, 3], "relationships": [2] },
        ])
    );
}
