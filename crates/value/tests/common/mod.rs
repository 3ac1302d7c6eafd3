//! Strategies shared by the integration tests

#![allow(dead_code)]

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use proptest::prelude::*;
use strata_value::{
    ArrayValue, CoordinateReferenceSystem, DurationValue, OffsetTime, PointValue, Value,
};

pub fn any_offset() -> impl Strategy<Value = FixedOffset> {
    (-18 * 3600..=18 * 3600_i32).prop_filter_map("valid offset", FixedOffset::east_opt)
}

pub fn any_date() -> impl Strategy<Value = NaiveDate> {
    (-200_000..1_000_000_i32).prop_filter_map("valid date", NaiveDate::from_num_days_from_ce_opt)
}

pub fn any_local_time() -> impl Strategy<Value = NaiveTime> {
    (0..86_400_u32, 0..1_000_000_000_u32).prop_filter_map("valid time", |(s, n)| {
        NaiveTime::from_num_seconds_from_midnight_opt(s, n)
    })
}

pub fn any_local_date_time() -> impl Strategy<Value = NaiveDateTime> {
    (-10_000_000_000..10_000_000_000_i64, 0..1_000_000_000_u32).prop_filter_map(
        "valid instant",
        |(s, n)| DateTime::from_timestamp(s, n).map(|dt| dt.naive_utc()),
    )
}

pub fn any_date_time() -> impl Strategy<Value = DateTime<FixedOffset>> {
    (any_local_date_time(), any_offset()).prop_map(|(dt, offset)| dt.and_utc().with_timezone(&offset))
}

pub fn any_duration() -> impl Strategy<Value = DurationValue> {
    (
        -10_000..10_000_i64,
        -100_000..100_000_i64,
        -1_000_000_000..1_000_000_000_i64,
        0..1_000_000_000_i64,
    )
        .prop_filter_map("valid duration", |(m, d, s, n)| DurationValue::new(m, d, s, n).ok())
}

pub fn any_coordinate() -> impl Strategy<Value = f64> {
    prop_oneof![
        8 => -1_000.0..1_000.0_f64,
        1 => Just(f64::NAN),
        1 => Just(0.0),
    ]
}

pub fn any_point() -> impl Strategy<Value = PointValue> {
    (
        prop::sample::select(CoordinateReferenceSystem::ALL.to_vec()),
        prop::collection::vec(any_coordinate(), 3),
    )
        .prop_filter_map("valid point", |(crs, coordinates)| {
            PointValue::new(crs, &coordinates[..crs.dimension()]).ok()
        })
}

/// Every float bit pattern, plus the interesting ones more often
pub fn any_double() -> impl Strategy<Value = f64> {
    prop_oneof![
        4 => any::<f64>(),
        2 => (-1_000..1_000_i64).prop_map(|v| v as f64),
        1 => Just(f64::NAN),
        1 => Just(-0.0),
        1 => Just(f64::INFINITY),
        1 => Just(f64::NEG_INFINITY),
    ]
}

pub fn any_number() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i8>().prop_map(Value::byte),
        any::<i16>().prop_map(Value::short),
        any::<i32>().prop_map(Value::int),
        any::<i64>().prop_map(Value::long),
        (-100..100_i64).prop_map(Value::long),
        any::<f32>().prop_map(Value::float),
        any_double().prop_map(Value::double),
    ]
}

pub fn any_text() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<char>().prop_map(Value::char),
        "[a-c]{0,3}".prop_map(Value::string),
        ".{0,8}".prop_map(Value::string),
    ]
}

pub fn any_temporal() -> impl Strategy<Value = Value> {
    prop_oneof![
        any_date().prop_map(Value::date),
        any_local_time().prop_map(Value::local_time),
        (any_local_time(), any_offset()).prop_map(|(t, o)| Value::time(OffsetTime::new(t, o))),
        any_local_date_time().prop_map(Value::local_date_time),
        any_date_time().prop_map(Value::date_time),
        any_duration().prop_map(Value::duration),
    ]
}

pub fn any_array() -> impl Strategy<Value = ArrayValue> {
    let len = 0..4_usize;
    prop_oneof![
        prop::collection::vec(-3..3_i8, len.clone()).prop_map(ArrayValue::from),
        prop::collection::vec(-3..3_i16, len.clone()).prop_map(ArrayValue::from),
        prop::collection::vec(-3..3_i32, len.clone()).prop_map(ArrayValue::from),
        prop::collection::vec(-3..3_i64, len.clone()).prop_map(ArrayValue::from),
        prop::collection::vec(-3..3_i8, len.clone())
            .prop_map(|v| ArrayValue::from(v.into_iter().map(f32::from).collect::<Vec<_>>())),
        prop::collection::vec(any_double(), len.clone()).prop_map(ArrayValue::from),
        prop::collection::vec(any::<bool>(), len.clone()).prop_map(ArrayValue::from),
        prop::collection::vec(prop::char::range('a', 'c'), len.clone()).prop_map(ArrayValue::from),
        prop::collection::vec("[a-c]{0,2}", len.clone()).prop_map(ArrayValue::from),
        prop::collection::vec(any_date(), len.clone()).prop_map(ArrayValue::from),
        prop::collection::vec(any_local_time(), len.clone()).prop_map(ArrayValue::from),
        prop::collection::vec(
            (any_local_time(), any_offset()).prop_map(|(t, o)| OffsetTime::new(t, o)),
            len.clone()
        )
        .prop_map(ArrayValue::from),
        prop::collection::vec(any_local_date_time(), len.clone()).prop_map(ArrayValue::from),
        prop::collection::vec(any_date_time(), len.clone()).prop_map(ArrayValue::from),
        prop::collection::vec(any_duration(), len.clone()).prop_map(ArrayValue::from),
        prop::collection::vec(any_point(), len).prop_map(ArrayValue::from),
    ]
}

/// Any storable value, biased towards collisions across widths and kinds
pub fn any_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        1 => Just(Value::NoValue),
        1 => any::<bool>().prop_map(Value::boolean),
        4 => any_number(),
        2 => any_text(),
        2 => any_temporal(),
        1 => any_point().prop_map(Value::point),
        3 => any_array().prop_map(Value::Array),
    ]
}
