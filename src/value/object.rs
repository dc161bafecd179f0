//! Object capabilities: [`Structural`], [`Comparable`], [`Object`] and [`Record`].

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use super::{Map, Value};

// =============================================================================
// Capabilities
// =============================================================================

/// A type whose identity is the sequence of its field values.
///
/// Two objects with the same [`type_name`](Structural::type_name) and equal
/// [`fields`](Structural::fields) are the same set member, no matter how they
/// were constructed. Implement it by hand or with `#[derive(Structural)]`.
///
/// # Examples
///
/// ```rust
/// use structural_sets::{Set, SetLike, Structural, Value};
///
/// #[derive(Clone, Debug)]
/// struct Point {
///     x: i64,
///     y: i64,
/// }
///
/// impl Structural for Point {
///     fn fields(&self) -> Vec<Value> {
///         vec![Value::from(self.x), Value::from(self.y)]
///     }
/// }
///
/// let mut set = Set::new();
/// set.add(Value::Object(structural_sets::Object::new(Point { x: 1, y: 2 }))).unwrap();
/// let duplicate = Value::Object(structural_sets::Object::new(Point { x: 1, y: 2 }));
/// assert!(set.contains(&duplicate));
/// ```
pub trait Structural: Any + fmt::Debug {
    /// The concrete type identity used by [`Kind::Object`](crate::Kind::Object).
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// The reflected field values, in declaration order.
    fn fields(&self) -> Vec<Value>;

    /// The three-way comparison capability, if the type has one.
    fn as_comparable(&self) -> Option<&dyn Comparable> {
        None
    }
}

/// Three-way comparison between objects.
///
/// Consumed by [`SortedSet`](crate::SortedSet). The comparison must be a
/// total order over the values of one type, otherwise sorting may panic.
pub trait Comparable {
    /// Compares `self` against another object.
    fn compare(&self, other: &Object) -> Ordering;
}

// =============================================================================
// Object
// =============================================================================

/// A shared, immutable handle to a [`Structural`] value.
#[derive(Clone)]
pub struct Object(Rc<dyn Structural>);

impl Object {
    /// Wraps a structural value.
    pub fn new<T: Structural>(value: T) -> Self {
        Self(Rc::new(value))
    }

    /// See [`Structural::type_name`].
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.0.type_name()
    }

    /// See [`Structural::fields`].
    #[must_use]
    pub fn fields(&self) -> Vec<Value> {
        self.0.fields()
    }

    /// See [`Structural::as_comparable`].
    #[must_use]
    pub fn as_comparable(&self) -> Option<&dyn Comparable> {
        self.0.as_comparable()
    }

    /// Returns `true` if the object can be ordered.
    #[must_use]
    pub fn is_comparable(&self) -> bool {
        self.as_comparable().is_some()
    }

    /// Returns the concrete value if it has type `T`.
    #[must_use]
    pub fn downcast_ref<T: Structural>(&self) -> Option<&T> {
        let any: &dyn Any = &*self.0;
        any.downcast_ref::<T>()
    }

    /// Returns `true` if both handles point at the same allocation.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
            || (self.type_name() == other.type_name() && self.fields() == other.fields())
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, formatter)
    }
}

impl fmt::Display for Object {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let type_name = self.type_name();
        let short_name = type_name.rsplit("::").next().unwrap_or(type_name);
        write!(formatter, "{short_name}(")?;
        for (index, field) in self.fields().iter().enumerate() {
            if index > 0 {
                formatter.write_str(", ")?;
            }
            write!(formatter, "{field}")?;
        }
        formatter.write_str(")")
    }
}

// =============================================================================
// Record
// =============================================================================

/// A generic dynamic object without a declared schema.
///
/// Fields keep their insertion order, and only their values take part in the
/// fingerprint.
///
/// # Examples
///
/// ```rust
/// use structural_sets::{Record, Set, SetLike};
///
/// let first = Record::new().with("foo", "bar").with("depth", 1);
/// let second = Record::new().with("foo", "bar").with("depth", 1);
///
/// let mut set = Set::new();
/// assert!(set.add(first).unwrap());
/// assert!(!set.add(second).unwrap());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    fields: Map,
}

impl Record {
    /// The type name shared by every record.
    pub const TYPE_NAME: &'static str = "Record";

    /// Creates a record with no fields.
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Map::new() }
    }

    /// Adds or replaces a field, builder style.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name, value);
        self
    }

    /// Adds or replaces a field, returning the previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(name, value)
    }

    /// Returns a field value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Number of fields.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter()
    }
}

impl Structural for Record {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn fields(&self) -> Vec<Value> {
        self.fields.values().cloned().collect()
    }
}
