//! Hashing consistent with value equality
//!
//! Equal values hash equally across every width and representation:
//!
//! - numbers hash their widened form; integral doubles in the `i64` range
//!   hash like that long, NaN has one canonical hash, `-0.0` hashes as `0`
//! - a `char` hashes like the one-character string
//! - arrays hash a sequence marker, the length and each element, without
//!   the backing type, so lists and arrays with equal elements agree
//!
//! Scalars prefix their payload with the group so unrelated groups with the
//! same payload bits stay apart.

use core::hash::{Hash, Hasher};
use std::hash::DefaultHasher;

use crate::value::Value;

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if let Self::Array(array) = self {
            array.hash_into(state);
            return;
        }
        state.write_u8(self.value_group() as u8);
        match self {
            Self::NoValue | Self::Array(_) => {}
            Self::Boolean(b) => b.hash(state),
            Self::Number(n) => n.hash_into(state),
            Self::Text(t) => t.hash_into(state),
            Self::Temporal(t) => t.hash_into(state),
            Self::Point(p) => p.hash_into(state),
        }
    }
}

impl Value {
    /// 64-bit hash of this value, consistent with `==`
    ///
    /// Stable within one build only: the hasher may change between Rust
    /// releases, so never persist it.
    pub fn hash_code(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn equal_numbers_collapse_in_a_set() {
        let set: HashSet<Value> = [
            Value::byte(5),
            Value::short(5),
            Value::int(5),
            Value::long(5),
            Value::float(5.0),
            Value::double(5.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn signed_zero_and_nan() {
        assert_eq!(Value::double(-0.0).hash_code(), Value::int(0).hash_code());
        assert_eq!(
            Value::double(f64::NAN).hash_code(),
            Value::float(-f32::NAN).hash_code()
        );
    }

    #[test]
    fn char_hashes_like_string() {
        assert_eq!(Value::char('x').hash_code(), Value::string("x").hash_code());
    }

    /// Records which integer widths a hash feeds in
    #[derive(Default)]
    struct WidthRecorder {
        calls: Vec<&'static str>,
    }

    impl Hasher for WidthRecorder {
        fn finish(&self) -> u64 {
            0
        }
        fn write(&mut self, _: &[u8]) {
            self.calls.push("bytes");
        }
        fn write_u64(&mut self, _: u64) {
            self.calls.push("u64");
        }
        fn write_usize(&mut self, _: usize) {
            self.calls.push("usize");
        }
    }

    fn widths(value: &impl Hash) -> Vec<&'static str> {
        let mut recorder = WidthRecorder::default();
        value.hash(&mut recorder);
        recorder.calls
    }

    #[test]
    fn sequence_lengths_hash_at_fixed_width() {
        use crate::any::{AnyValue, ListValue, MapValue, NodeReference, PathValue};

        let array = Value::array(vec![1_i32, 2]);
        let list = AnyValue::from(ListValue::from(vec![AnyValue::from(1_i32)]));
        let map = AnyValue::from(
            [("k", AnyValue::from(true))]
                .into_iter()
                .collect::<MapValue>(),
        );
        let path = AnyValue::from(PathValue::single(NodeReference::new(1)));

        for calls in [widths(&array), widths(&list), widths(&map), widths(&path)] {
            assert!(calls.contains(&"u64"), "{calls:?}");
            assert!(!calls.contains(&"usize"), "{calls:?}");
        }
    }

    #[test]
    fn hash_code_is_stable() {
        let v = Value::array(vec!["a", "b"]);
        assert_eq!(v.hash_code(), v.clone().hash_code());
    }
}
