//! Query-result values
//!
//! [`AnyValue`] is a superset of [`Value`]: besides storable values it holds
//! graph entity references and the virtual collections a query can produce
//! (lists, maps and paths). These never reach storage, so they carry equality
//! and hashing but no total order.
//!
//! A list equals an array with equal elements, and hashes the same:
//!
//! ```rust
//! use strata_value::{AnyValue, ListValue, Value};
//!
//! let list = AnyValue::from(ListValue::from(vec![
//!     AnyValue::from(Value::int(1)),
//!     AnyValue::from(Value::int(2)),
//! ]));
//! let array = AnyValue::from(Value::array(vec![1_i64, 2]));
//! assert_eq!(list, array);
//! assert_eq!(list.hash_code(), array.hash_code());
//! ```

use core::fmt;
use core::hash::{Hash, Hasher};
use std::hash::DefaultHasher;
use std::sync::Arc;

use im::{OrdMap, Vector};

use crate::array::{ArrayValue, SEQUENCE_HASH_TAG};
use crate::error::{ValueError, ValueResult};
use crate::value::Value;
use crate::writer::{AnyValueWriter, JsonWriter, Notation, PrettyPrinter};

const NODE_HASH_TAG: u8 = 0xA0;
const RELATIONSHIP_HASH_TAG: u8 = 0xA1;
const MAP_HASH_TAG: u8 = 0xA2;
const PATH_HASH_TAG: u8 = 0xA3;

// ============================================================================
// ENTITY REFERENCES
// ============================================================================

/// Reference to a node by id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeReference {
    id: i64,
}

impl NodeReference {
    pub const fn new(id: i64) -> Self {
        Self { id }
    }

    pub const fn id(&self) -> i64 {
        self.id
    }
}

/// Reference to a relationship by id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RelationshipReference {
    id: i64,
}

impl RelationshipReference {
    pub const fn new(id: i64) -> Self {
        Self { id }
    }

    pub const fn id(&self) -> i64 {
        self.id
    }
}

// ============================================================================
// COLLECTIONS
// ============================================================================

/// Heterogeneous list of any values
///
/// Backed by a persistent vector, so clones share structure.
#[derive(Debug, Clone, Default)]
pub struct ListValue(Vector<AnyValue>);

impl ListValue {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&AnyValue> {
        self.0.get(index)
    }

    pub fn iter(&self) -> im::vector::Iter<'_, AnyValue> {
        self.0.iter()
    }

    fn equals_array(&self, array: &ArrayValue) -> bool {
        self.len() == array.len()
            && self.iter().zip(array.iter()).all(|(item, element)| match item {
                AnyValue::Value(v) => *v == element,
                _ => false,
            })
    }
}

impl From<Vec<AnyValue>> for ListValue {
    fn from(items: Vec<AnyValue>) -> Self {
        Self(items.into_iter().collect())
    }
}

impl FromIterator<AnyValue> for ListValue {
    fn from_iter<I: IntoIterator<Item = AnyValue>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl PartialEq for ListValue {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

/// String-keyed map of any values, iterated in key order
#[derive(Debug, Clone, Default)]
pub struct MapValue(OrdMap<Arc<str>, AnyValue>);

impl MapValue {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&AnyValue> {
        self.0.get(key)
    }

    /// Copy of this map with `key` set to `value`; the original is unchanged
    pub fn update(&self, key: impl Into<Arc<str>>, value: AnyValue) -> Self {
        Self(self.0.update(key.into(), value))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnyValue)> {
        self.0.iter().map(|(k, v)| (k.as_ref(), v))
    }
}

impl<K: Into<Arc<str>>> FromIterator<(K, AnyValue)> for MapValue {
    fn from_iter<I: IntoIterator<Item = (K, AnyValue)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl PartialEq for MapValue {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

/// Alternating sequence of nodes and relationships, starting and ending with
/// a node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathValue {
    nodes: Arc<[NodeReference]>,
    relationships: Arc<[RelationshipReference]>,
}

impl PathValue {
    /// # Errors
    ///
    /// [`ValueError::TypeMismatch`] unless there is exactly one more node than
    /// relationships.
    pub fn new(
        nodes: Vec<NodeReference>,
        relationships: Vec<RelationshipReference>,
    ) -> ValueResult<Self> {
        if nodes.len() != relationships.len() + 1 {
            return Err(ValueError::type_mismatch(
                format!("{} nodes", relationships.len() + 1),
                format!("{} nodes", nodes.len()),
            ));
        }
        Ok(Self {
            nodes: nodes.into(),
            relationships: relationships.into(),
        })
    }

    /// Zero-length path
    pub fn single(node: NodeReference) -> Self {
        Self {
            nodes: Arc::new([node]),
            relationships: Arc::new([]),
        }
    }

    pub fn nodes(&self) -> &[NodeReference] {
        &self.nodes
    }

    pub fn relationships(&self) -> &[RelationshipReference] {
        &self.relationships
    }

    /// Number of relationships
    pub fn len(&self) -> usize {
        self.relationships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
    }
}

// ============================================================================
// ANY VALUE
// ============================================================================

/// Any value a query can produce
///
/// `==` is not transitive in one case: an empty list equals every empty
/// array, while empty arrays of different groups are unequal to each other.
/// For non-empty sequences, equality with a list implies the elements share
/// the array's group, so transitivity holds. This is why `AnyValue` is not
/// `Eq`.
#[derive(Debug, Clone)]
pub enum AnyValue {
    Value(Value),
    Node(NodeReference),
    Relationship(RelationshipReference),
    List(ListValue),
    Map(MapValue),
    Path(PathValue),
}

impl AnyValue {
    /// The storable value, if this is one
    pub const fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_no_value(&self) -> bool {
        matches!(self, Self::Value(Value::NoValue))
    }

    /// Push this value through `writer`
    pub fn write_to<W: AnyValueWriter + ?Sized>(&self, writer: &mut W) -> Result<(), W::Error> {
        match self {
            Self::Value(v) => v.write_to(writer),
            Self::Node(n) => writer.write_node_reference(*n),
            Self::Relationship(r) => writer.write_relationship_reference(*r),
            Self::List(list) => {
                writer.begin_list(list.len())?;
                for item in list.iter() {
                    item.write_to(writer)?;
                }
                writer.end_list()
            }
            Self::Map(map) => {
                writer.begin_map(map.len())?;
                for (key, value) in map.iter() {
                    writer.write_map_key(key)?;
                    value.write_to(writer)?;
                }
                writer.end_map()
            }
            Self::Path(path) => writer.write_path(path.nodes(), path.relationships()),
        }
    }

    /// Owned, host-neutral copy of this value
    pub fn as_object_copy(&self) -> serde_json::Value {
        let mut writer = JsonWriter::new();
        let Ok(()) = self.write_to(&mut writer);
        writer.into_value()
    }

    /// Tagged diagnostic rendering
    pub fn pretty_print(&self) -> String {
        let mut out = String::new();
        // writing into a String never fails
        let _ = self.write_to(&mut PrettyPrinter::new(&mut out, Notation::Tagged));
        out
    }

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

impl PartialEq for AnyValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Value(a), Self::Value(b)) => a == b,
            (Self::Node(a), Self::Node(b)) => a == b,
            (Self::Relationship(a), Self::Relationship(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::List(list), Self::Value(Value::Array(array)))
            | (Self::Value(Value::Array(array)), Self::List(list)) => list.equals_array(array),
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Path(a), Self::Path(b)) => a == b,
            _ => false,
        }
    }
}

impl Hash for AnyValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Value(v) => v.hash(state),
            Self::Node(n) => {
                state.write_u8(NODE_HASH_TAG);
                state.write_i64(n.id());
            }
            Self::Relationship(r) => {
                state.write_u8(RELATIONSHIP_HASH_TAG);
                state.write_i64(r.id());
            }
            Self::List(list) => {
                state.write_u8(SEQUENCE_HASH_TAG);
                state.write_u64(list.len() as u64);
                for item in list.iter() {
                    item.hash(state);
                }
            }
            Self::Map(map) => {
                state.write_u8(MAP_HASH_TAG);
                state.write_u64(map.len() as u64);
                for (key, value) in map.iter() {
                    key.hash(state);
                    value.hash(state);
                }
            }
            Self::Path(path) => {
                state.write_u8(PATH_HASH_TAG);
                state.write_u64(path.nodes().len() as u64);
                for node in path.nodes() {
                    state.write_i64(node.id());
                }
                for relationship in path.relationships() {
                    state.write_i64(relationship.id());
                }
            }
        }
    }
}

/// Literal rendering, same notation as [`Value`]'s `Display`
impl fmt::Display for AnyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(&mut PrettyPrinter::new(f, Notation::Literal))
    }
}

impl From<Value> for AnyValue {
    fn from(v: Value) -> Self {
        Self::Value(v)
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for AnyValue {
                fn from(v: $ty) -> Self {
                    Self::Value(Value::from(v))
                }
            }
        )*
    };
}

impl_from_scalar!(bool, i8, i16, i32, i64, f32, f64, char, &str, String);

impl From<NodeReference> for AnyValue {
    fn from(v: NodeReference) -> Self {
        Self::Node(v)
    }
}

impl From<RelationshipReference> for AnyValue {
    fn from(v: RelationshipReference) -> Self {
        Self::Relationship(v)
    }
}

impl From<ListValue> for AnyValue {
    fn from(v: ListValue) -> Self {
        Self::List(v)
    }
}

impl From<MapValue> for AnyValue {
    fn from(v: MapValue) -> Self {
        Self::Map(v)
    }
}

impl From<PathValue> for AnyValue {
    fn from(v: PathValue) -> Self {
        Self::Path(v)
    }
}
