//! End-to-end scenarios across comparison, hashing and writers

use std::collections::{BTreeSet, HashSet};

use pretty_assertions::assert_eq;
use rstest::rstest;
use strata_value::prelude::*;
use strata_value::{AnyValue, ListValue, ValueBuilder};

#[test]
fn int_five_equals_double_five() {
    let int = Value::int(5);
    let double = Value::double(5.0);
    assert_eq!(int, double);
    assert_eq!(int.hash_code(), double.hash_code());

    let set: HashSet<Value> = [int, double, Value::byte(5), Value::float(5.0)].into();
    assert_eq!(set.len(), 1);
}

#[test]
fn long_max_is_below_its_rounded_double() {
    let long = Value::long(i64::MAX);
    let double = Value::double(9_223_372_036_854_775_807.0);
    assert_ne!(long, double);
    assert!(long < double);
    assert!(double > long);
    assert!(Value::long(i64::MAX - 1) < long);
}

#[test]
fn long_min_equals_its_exact_double() {
    assert_eq!(Value::long(i64::MIN), Value::double(-9_223_372_036_854_775_808.0));
}

#[rstest]
#[case::equal(Value::int(1), Value::long(1), Some(true))]
#[case::unequal(Value::int(1), Value::string("1"), Some(false))]
#[case::nan(Value::double(f64::NAN), Value::double(f64::NAN), Some(true))]
#[case::left_missing(Value::NoValue, Value::int(1), None)]
#[case::both_missing(Value::NoValue, Value::NoValue, None)]
fn ternary_equality(#[case] a: Value, #[case] b: Value, #[case] expected: Option<bool>) {
    assert_eq!(a.ternary_equals(&b), expected);
    assert_eq!(b.ternary_equals(&a), expected);
}

#[test]
fn mixed_values_sort_by_group_then_payload() {
    let sorted: BTreeSet<Value> = [
        Value::NoValue,
        Value::array(vec![1_i32]),
        Value::string("b"),
        Value::boolean(false),
        Value::double(f64::NAN),
        Value::char('a'),
        Value::long(-1),
        Value::float(2.5),
    ]
    .into();
    let rendered: Vec<String> = sorted.iter().map(Value::pretty_print).collect();
    assert_eq!(
        rendered,
        [
            "Int(-1)",
            "Float(2.5)",
            "Float(NaN)",
            "String(\"a\")",
            "String(\"b\")",
            "Boolean(false)",
            "[Int(1)]",
            "NoValue",
        ]
    );
}

#[test]
fn char_and_single_char_string_are_interchangeable() {
    let set: HashSet<Value> = [Value::char('x'), Value::string("x")].into();
    assert_eq!(set.len(), 1);
    assert!(Value::char('x') < Value::string("xa"));
}

#[test]
fn arrays_compare_across_element_widths() {
    let ints = Value::array(vec![1_i8, 2]);
    let doubles = Value::array(vec![1.0_f64, 2.0]);
    assert_eq!(ints, doubles);
    assert_eq!(ints.hash_code(), doubles.hash_code());
    assert!(Value::array(vec![1_i64]) < Value::array(vec![1_i64, 0]));
    assert_ne!(Value::array(vec!['a']), Value::array(vec![1_i32]));
}

#[test]
fn list_of_numbers_matches_number_array() {
    let list = AnyValue::from(ListValue::from(vec![AnyValue::from(1_i64), AnyValue::from(2.0)]));
    let array = AnyValue::from(Value::array(vec![1_i32, 2]));
    assert_eq!(list, array);
    assert_eq!(array, list);
    assert_eq!(list.hash_code(), array.hash_code());
}

#[test]
fn builder_rejects_mixed_array_elements() {
    let mut builder = ValueBuilder::new();
    builder.begin_array(2, ArrayType::Int).unwrap();
    builder.write_i32(1).unwrap();
    assert!(builder.write_string("two").is_ok());
    let err = builder.end_array().unwrap_err();
    assert!(matches!(err, ValueError::TypeMismatch { .. }), "{err}");
}

#[test]
fn numeric_accessors_reject_other_groups() {
    assert_eq!(Value::byte(-2).long_value().unwrap(), -2);
    assert_eq!(Value::float(0.5).double_value().unwrap(), 0.5);
    assert!(Value::string("5").long_value().is_err());
    assert!(Value::NoValue.double_value().is_err());
}
