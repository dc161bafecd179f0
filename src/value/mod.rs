//! The dynamic element model.
//!
//! Every set in this crate stores [`Value`]s. A value is either a scalar
//! (boolean, integer, float, string), a composite (an ordered [`Array`](Value::Array)
//! or a string-keyed [`Map`]), or an [`Object`]: a shared handle to any type
//! implementing [`Structural`].
//!
//! [`Value::Null`] is the absent marker. Sets never store it; see
//! [`NullPolicy`](crate::NullPolicy).
//!
//! # Examples
//!
//! ```rust
//! use structural_sets::{values, Kind, Value};
//!
//! let elements = values!["abc", 1, 2.5, true, [1, 2]];
//! assert_eq!(elements[0].kind(), Some(Kind::String));
//! assert_eq!(elements[4].kind(), Some(Kind::Array));
//! assert_eq!(Value::Null.kind(), None);
//! ```

mod object;

pub use object::{Comparable, Object, Record, Structural};

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

// =============================================================================
// Value Definition
// =============================================================================

/// A dynamically typed set element.
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// The absent marker.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// A UTF-8 string.
    Str(String),
    /// An ordered sequence of values.
    Array(Vec<Value>),
    /// An ordered, string-keyed associative array.
    Map(Map),
    /// A user-defined or dynamic object.
    Object(Object),
}

/// Generates `is_*` predicates and copying `as_*` accessors for scalar variants.
macro_rules! scalar_accessors {
    ($($variant:ident => $name:ident: $inner:ty),* $(,)?) => {
        paste::paste! {
            impl Value {
                $(
                    #[doc = concat!("Returns `true` if the value is a [`", stringify!($variant), "`](Value::", stringify!($variant), ").")]
                    #[inline]
                    #[must_use]
                    pub const fn [<is_ $name>](&self) -> bool {
                        matches!(self, Self::$variant(_))
                    }

                    #[doc = concat!("Returns the inner `", stringify!($inner), "` of a [`", stringify!($variant), "`](Value::", stringify!($variant), ").")]
                    #[inline]
                    #[must_use]
                    pub const fn [<as_ $name>](&self) -> Option<$inner> {
                        match self {
                            Self::$variant(inner) => Some(*inner),
                            _ => None,
                        }
                    }
                )*
            }
        }
    };
}

scalar_accessors! {
    Bool => bool: bool,
    Int => int: i64,
    Float => float: f64,
}

impl Value {
    /// Returns `true` for the absent marker.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value is a [`Str`](Value::Str).
    #[inline]
    #[must_use]
    pub const fn is_str(&self) -> bool {
        matches!(self, Self::Str(_))
    }

    /// Returns the string slice of a [`Str`](Value::Str).
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(content) => Some(content),
            _ => None,
        }
    }

    /// Returns the elements of an [`Array`](Value::Array).
    #[must_use]
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(elements) => Some(elements),
            _ => None,
        }
    }

    /// Returns the inner [`Map`].
    #[must_use]
    pub const fn as_map(&self) -> Option<&Map> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the inner [`Object`].
    #[must_use]
    pub const fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// The runtime kind of the value, or `None` for [`Null`](Value::Null).
    #[must_use]
    pub fn kind(&self) -> Option<Kind> {
        match self {
            Self::Null => None,
            Self::Bool(_) => Some(Kind::Boolean),
            Self::Int(_) => Some(Kind::Integer),
            Self::Float(_) => Some(Kind::Float),
            Self::Str(_) => Some(Kind::String),
            Self::Array(_) | Self::Map(_) => Some(Kind::Array),
            Self::Object(object) => Some(Kind::Object(object.type_name())),
        }
    }

    /// Returns `true` for booleans, numbers and strings.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::Bool(_) | Self::Int(_) | Self::Float(_) | Self::Str(_)
        )
    }

    /// Returns `true` for objects exposing the [`Comparable`] capability.
    #[must_use]
    pub fn is_comparable(&self) -> bool {
        self.as_object().is_some_and(Object::is_comparable)
    }

    /// Returns `true` if the value can live in a [`SortedSet`](crate::SortedSet).
    #[must_use]
    pub fn is_sortable(&self) -> bool {
        self.is_scalar() || self.is_comparable()
    }

    /// Returns `true` if the value can be located with
    /// [`SetLike::index_of`](crate::SetLike::index_of).
    #[must_use]
    pub fn is_queryable(&self) -> bool {
        self.is_sortable() || matches!(self, Self::Array(_) | Self::Map(_))
    }
}

// =============================================================================
// Kind
// =============================================================================

/// The runtime type of a non-null [`Value`].
///
/// [`Value::Array`] and [`Value::Map`] share [`Kind::Array`]. Objects are
/// identified by their [`Structural::type_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// `true` or `false`.
    Boolean,
    /// A signed integer.
    Integer,
    /// A floating-point number.
    Float,
    /// A string.
    String,
    /// An array or map.
    Array,
    /// An object of the named concrete type.
    Object(&'static str),
}

impl Kind {
    /// The human-readable name of the kind.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
            Self::Array => "array",
            Self::Object(name) => *name,
        }
    }

    /// Returns `true` for [`Integer`](Kind::Integer) and [`Float`](Kind::Float).
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

// =============================================================================
// Map
// =============================================================================

/// An ordered, string-keyed associative array.
///
/// Keys are unique; inserting an existing key replaces its value in place.
/// Fingerprints only consider the values, in order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Map {
    entries: Vec<(String, Value)>,
}

impl Map {
    /// Creates an empty map.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts a value, returning the previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    /// Number of entries.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map has no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&str, &Value)> + ExactSizeIterator {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Iterates over keys in insertion order.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &str> + ExactSizeIterator {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Iterates over values in insertion order.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &Value> + ExactSizeIterator {
        self.entries.iter().map(|(_, value)| value)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Map {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl IntoIterator for Map {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

// =============================================================================
// Equality and Display
// =============================================================================

/// Deep structural equality.
///
/// Unlike fingerprint identity, variants must match: `Int(1)` is not equal to
/// `Float(1.0)` here even though both land on the same set slot.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(left), Self::Bool(right)) => left == right,
            (Self::Int(left), Self::Int(right)) => left == right,
            (Self::Float(left), Self::Float(right)) => left == right,
            (Self::Str(left), Self::Str(right)) => left == right,
            (Self::Array(left), Self::Array(right)) => left == right,
            (Self::Map(left), Self::Map(right)) => left == right,
            (Self::Object(left), Self::Object(right)) => left == right,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => formatter.write_str("null"),
            Self::Bool(value) => write!(formatter, "{value}"),
            Self::Int(value) => write!(formatter, "{value}"),
            Self::Float(value) => write!(formatter, "{value:?}"),
            Self::Str(value) => write!(formatter, "{value:?}"),
            Self::Array(elements) => {
                formatter.write_str("[")?;
                for (index, element) in elements.iter().enumerate() {
                    if index > 0 {
                        formatter.write_str(", ")?;
                    }
                    write!(formatter, "{element}")?;
                }
                formatter.write_str("]")
            }
            Self::Map(map) => {
                formatter.write_str("{")?;
                for (index, (key, value)) in map.iter().enumerate() {
                    if index > 0 {
                        formatter.write_str(", ")?;
                    }
                    write!(formatter, "{key}: {value}")?;
                }
                formatter.write_str("}")
            }
            Self::Object(object) => write!(formatter, "{object}"),
        }
    }
}

/// Builds a `Vec<Value>` from heterogeneous expressions.
///
/// # Examples
///
/// ```rust
/// use structural_sets::{values, Value};
///
/// let elements = values!["a", 1, [2, 3]];
/// assert_eq!(elements, vec![
///     Value::from("a"),
///     Value::from(1),
///     Value::Array(vec![Value::from(2), Value::from(3)]),
/// ]);
/// ```
#[macro_export]
macro_rules! values {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($element:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($element)),+]
    };
}

// =============================================================================
// Conversions
// =============================================================================

macro_rules! from_integer {
    ($($source:ty),*) => {
        $(
            impl From<$source> for Value {
                #[inline]
                fn from(value: $source) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! from_wide_integer {
    ($($source:ty),*) => {
        $(
            /// Values outside the `i64` range fall back to a float.
            impl From<$source> for Value {
                #[allow(clippy::cast_precision_loss)]
                fn from(value: $source) -> Self {
                    i64::try_from(value).map_or(Self::Float(value as f64), Self::Int)
                }
            }
        )*
    };
}

from_wide_integer!(u64, usize, isize, i128);

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f32> for Value {
    #[inline]
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<String> for Value {
    #[inline]
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::Array(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(values: [T; N]) -> Self {
        Self::Array(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<Map> for Value {
    #[inline]
    fn from(map: Map) -> Self {
        Self::Map(map)
    }
}

impl From<Object> for Value {
    #[inline]
    fn from(object: Object) -> Self {
        Self::Object(object)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Self::Object(Object::new(record))
    }
}

// =============================================================================
// ToValue
// =============================================================================

/// Conversion of borrowed data into a [`Value`].
///
/// This is what `#[derive(Structural)]` calls on every reflected field.
pub trait ToValue {
    /// Builds a value describing `self`.
    fn to_value(&self) -> Value;
}

macro_rules! to_value_by_copy {
    ($($source:ty),*) => {
        $(
            impl ToValue for $source {
                #[inline]
                fn to_value(&self) -> Value {
                    Value::from(*self)
                }
            }
        )*
    };
}

to_value_by_copy!(
    bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize, f32, f64, char
);

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::from(self)
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::Str(self.clone())
    }
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl ToValue for Map {
    fn to_value(&self) -> Value {
        Value::Map(self.clone())
    }
}

impl ToValue for Object {
    fn to_value(&self) -> Value {
        Value::Object(self.clone())
    }
}

impl ToValue for Record {
    fn to_value(&self) -> Value {
        Value::from(self.clone())
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue, const N: usize> ToValue for [T; N] {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, ToValue::to_value)
    }
}

impl<T: ToValue> ToValue for BTreeMap<String, T> {
    fn to_value(&self) -> Value {
        let mut map = Map::new();
        for (key, value) in self {
            map.insert(key.clone(), value.to_value());
        }
        Value::Map(map)
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Rc<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Value::from(true), Some(Kind::Boolean))]
    #[case(Value::from(7), Some(Kind::Integer))]
    #[case(Value::from(7.5), Some(Kind::Float))]
    #[case(Value::from("seven"), Some(Kind::String))]
    #[case(Value::from([1, 2]), Some(Kind::Array))]
    #[case(Value::from(Map::from_iter([("a", 1)])), Some(Kind::Array))]
    #[case(Value::Null, None)]
    fn test_kind_of_value(#[case] value: Value, #[case] expected: Option<Kind>) {
        assert_eq!(value.kind(), expected);
    }

    #[rstest]
    fn test_record_kind_uses_record_type_name() {
        let value = Value::from(Record::new().with("foo", "bar"));
        assert_eq!(value.kind(), Some(Kind::Object(Record::TYPE_NAME)));
        assert_eq!(value.kind().map(|kind| kind.to_string()), Some("Record".to_owned()));
    }

    #[rstest]
    fn test_scalar_accessors() {
        assert_eq!(Value::from(3).as_int(), Some(3));
        assert_eq!(Value::from(3).as_float(), None);
        assert!(Value::from(false).is_bool());
        assert_eq!(Value::from("text").as_str(), Some("text"));
    }

    #[rstest]
    fn test_option_none_converts_to_null() {
        let absent: Option<i32> = None;
        assert!(Value::from(absent).is_null());
        assert_eq!(Value::from(Some(4)), Value::Int(4));
    }

    #[rstest]
    fn test_wide_integer_out_of_range_falls_back_to_float() {
        assert_eq!(Value::from(u64::MAX).kind(), Some(Kind::Float));
        assert_eq!(Value::from(12_u64), Value::Int(12));
    }

    #[rstest]
    fn test_map_insert_replaces_existing_key_in_place() {
        let mut map = Map::new();
        map.insert("a", 1);
        map.insert("b", 2);
        let previous = map.insert("a", 3);

        assert_eq!(previous, Some(Value::Int(1)));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(map.get("a"), Some(&Value::Int(3)));
    }

    #[rstest]
    fn test_equality_distinguishes_variants() {
        assert_ne!(Value::Int(1), Value::Float(1.0));
        assert_eq!(Value::from([1, 2]), Value::from(vec![1, 2]));
    }

    #[rstest]
    fn test_display_nested_value() {
        let value = Value::Array(values!["a", 1, [2.5]]);
        assert_eq!(value.to_string(), r#"["a", 1, [2.5]]"#);
    }

    #[rstest]
    fn test_sortable_and_queryable() {
        assert!(Value::from(1).is_sortable());
        assert!(!Value::from([1]).is_sortable());
        assert!(Value::from([1]).is_queryable());
        assert!(!Value::from(Record::new()).is_queryable());
    }
}
