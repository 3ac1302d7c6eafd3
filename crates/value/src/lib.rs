//! # strata-value
//!
//! Typed property values for the Strata graph database.
//!
//! Every node and relationship property, every query-result cell and every
//! value crossing a storage or wire boundary is a [`Value`]. This crate
//! defines that type together with the one total order, equality and hash
//! that indexes, sort operators and equality predicates all share, and the
//! [`ValueWriter`] contract through which values are serialized without
//! knowing the destination format.
//!
//! ## Ordering and equality
//!
//! - values of different [`ValueGroup`]s order by group; `NoValue` is last
//! - numbers compare by logical value regardless of width: `Int(5)`,
//!   `Long(5)` and `Double(5.0)` are all equal
//! - integral vs floating comparison never rounds the integer, so
//!   `i64::MAX` is less than the double `9223372036854775807.0` (which is
//!   2^63)
//! - NaN is greater than every other number and equal to itself; `-0.0`
//!   equals `0.0`
//! - arrays order elementwise, then by length
//! - `a == b` exactly when `a.cmp(&b)` is `Equal`, and equal values hash
//!   equally
//!
//! ## Quick start
//!
//! ```rust
//! use strata_value::prelude::*;
//!
//! let a = Value::int(5);
//! let b = Value::double(5.0);
//! assert_eq!(a, b);
//! assert_eq!(a.hash_code(), b.hash_code());
//!
//! assert!(Value::long(i64::MAX) < Value::double(9_223_372_036_854_775_807.0));
//! assert!(Value::double(f64::NAN) > Value::double(f64::INFINITY));
//!
//! assert_eq!(Value::array(vec![1_i8, 2]).pretty_print(), "[Int(1), Int(2)]");
//! assert_eq!(Value::array(vec![1_i8, 2]).to_string(), "[1, 2]");
//! ```
//!
//! ## Writers
//!
//! [`Value::write_to`] makes exactly one writer call per scalar, at the
//! stored width, and brackets arrays with `begin_array`/`end_array`. A
//! writer's own error type flows back unchanged. The crate ships
//! [`PrettyPrinter`], [`JsonWriter`], [`ValueBuilder`] and the reference
//! [`BinaryWriter`](codec::BinaryWriter).

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

pub mod any;
pub mod array;
pub mod codec;
mod compare;
pub mod error;
pub mod group;
mod hash;
pub mod limits;
pub mod number;
pub mod point;
pub mod temporal;
pub mod text;
pub mod value;
pub mod writer;

pub use any::{AnyValue, ListValue, MapValue, NodeReference, PathValue, RelationshipReference};
pub use array::ArrayValue;
pub use codec::{decode_value, encode_value};
pub use error::{ValueError, ValueResult};
pub use group::ValueGroup;
pub use limits::ValueLimits;
pub use number::NumberValue;
pub use point::{CoordinateReferenceSystem, PointValue};
pub use temporal::{DurationValue, OffsetTime, TemporalValue};
pub use text::TextValue;
pub use value::Value;
pub use writer::{
    AnyValueWriter, ArrayType, JsonWriter, Notation, PrettyPrinter, ValueBuilder, ValueWriter,
};

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        AnyValue, AnyValueWriter, ArrayType, ArrayValue, CoordinateReferenceSystem, DurationValue,
        NumberValue, OffsetTime, PointValue, TemporalValue, TextValue, Value, ValueError,
        ValueGroup, ValueResult, ValueWriter,
    };
}

static_assertions::assert_impl_all!(Value: Send, Sync, Clone, Ord, core::hash::Hash);
static_assertions::assert_impl_all!(AnyValue: Send, Sync, Clone, core::hash::Hash);
static_assertions::assert_impl_all!(ValueError: Send, Sync, std::error::Error);
