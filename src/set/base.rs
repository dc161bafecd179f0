//! The insertion-ordered [`Set`].

use std::fmt;
use std::iter::FusedIterator;

use super::capability::SetLike;
use super::table::{Entry, FingerprintTable};
use crate::config::{NullPolicy, SetConfig};
use crate::error::SetError;
use crate::fingerprint::StructuralHasher;
use crate::value::{Object, Structural, ToValue, Value};

/// An insertion-ordered collection of structurally distinct [`Value`]s.
///
/// Two elements are the same member when their
/// [`Fingerprint`](crate::Fingerprint)s match, so `1`, `1.0` and `true`
/// occupy one slot, as do objects of one type with equal fields.
///
/// # Examples
///
/// ```rust
/// use structural_sets::{values, Set, SetError, SetLike, Value};
///
/// let mut set = Set::from_values(values!["abc", "123", 1, [1, 2]]).unwrap();
///
/// assert_eq!(set.add(1.0), Ok(false));
/// assert_eq!(set.add("ABC"), Ok(true));
/// assert_eq!(set.add(Value::Null), Err(SetError::InvalidElement));
/// assert_eq!(set.len(), 5);
/// assert_eq!(set.first(), Some(&Value::from("abc")));
/// ```
#[derive(Clone, Default)]
pub struct Set {
    pub(crate) table: FingerprintTable,
    pub(crate) config: SetConfig,
}

static_assertions::assert_not_impl_any!(Set: Send, Sync);

impl Set {
    /// Creates an empty set with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty set with the given configuration.
    #[must_use]
    pub fn with_config(config: SetConfig) -> Self {
        Self::from_table(FingerprintTable::new(), config)
    }

    /// Creates a set from initial elements, in order.
    ///
    /// # Errors
    ///
    /// [`SetError::InvalidElement`] if the elements contain a null.
    pub fn from_values<I>(values: I) -> Result<Self, SetError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Self::from_values_with_config(values, SetConfig::default())
    }

    /// Creates a set from initial elements with the given configuration.
    ///
    /// # Errors
    ///
    /// [`SetError::InvalidElement`] if the elements contain a null the
    /// configuration rejects.
    pub fn from_values_with_config<I>(values: I, config: SetConfig) -> Result<Self, SetError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let mut set = Self::with_config(config);
        set.add_all(values)?;
        Ok(set)
    }

    pub(crate) const fn from_table(table: FingerprintTable, config: SetConfig) -> Self {
        Self { table, config }
    }

    /// Iterates over the elements in order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            entries: self.table.entries().iter(),
        }
    }

    /// Accepts or refuses a null according to the configuration.
    pub(crate) fn admit_null(&self) -> Result<bool, SetError> {
        match self.config.null_policy {
            NullPolicy::Reject => {
                tracing::debug!("rejected null element");
                Err(SetError::InvalidElement)
            }
            NullPolicy::Ignore => Ok(false),
        }
    }

    /// Full element removal returning the position that was freed.
    pub(crate) fn remove_entry(&mut self, value: &Value) -> Option<usize> {
        if value.is_null() {
            return None;
        }
        let fingerprint = StructuralHasher::fingerprint(value);
        let (position, _) = self.table.remove(&fingerprint)?;
        tracing::trace!(%fingerprint, position, "removed element");
        Some(position)
    }
}

impl SetLike for Set {
    fn as_set(&self) -> &Set {
        self
    }

    fn insert(&mut self, value: Value) -> Result<bool, SetError> {
        if value.is_null() {
            return self.admit_null();
        }
        let fingerprint = StructuralHasher::fingerprint(&value);
        match self.table.push_entry(fingerprint.clone(), value) {
            Some(position) => {
                tracing::trace!(%fingerprint, position, "inserted element");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn remove(&mut self, value: &Value) -> bool {
        self.remove_entry(value).is_some()
    }

    fn clear(&mut self) {
        self.table.clear();
    }

    fn pop(&mut self) -> Option<Value> {
        self.table.pop()
    }

    fn shift(&mut self) -> Option<Value> {
        self.table.shift()
    }
}

// =============================================================================
// Iteration
// =============================================================================

/// Borrowing iterator over a set's elements, created by [`Set::iter`].
#[derive(Clone)]
pub struct Iter<'a> {
    entries: std::slice::Iter<'a, Entry>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Value;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().map(|entry| &entry.value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.entries.next_back().map(|entry| &entry.value)
    }
}

impl ExactSizeIterator for Iter<'_> {
    #[inline]
    fn len(&self) -> usize {
        self.entries.len()
    }
}

impl FusedIterator for Iter<'_> {}

impl fmt::Debug for Iter<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.clone()).finish()
    }
}

/// Owning iterator over a set's elements.
pub struct IntoIter {
    values: std::vec::IntoIter<Value>,
}

impl Iterator for IntoIter {
    type Item = Value;

    fn next(&mut self) -> Option<Self::Item> {
        self.values.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl DoubleEndedIterator for IntoIter {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.values.next_back()
    }
}

impl ExactSizeIterator for IntoIter {}

impl FusedIterator for IntoIter {}

impl<'a> IntoIterator for &'a Set {
    type Item = &'a Value;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Set {
    type Item = Value;
    type IntoIter = IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        let values: Vec<Value> = self
            .table
            .entries()
            .iter()
            .map(|entry| entry.value.clone())
            .collect();
        IntoIter {
            values: values.into_iter(),
        }
    }
}

// =============================================================================
// Standard traits
// =============================================================================

impl fmt::Debug for Set {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for Set {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("{")?;
        for (index, value) in self.iter().enumerate() {
            if index > 0 {
                formatter.write_str(", ")?;
            }
            write!(formatter, "{value}")?;
        }
        formatter.write_str("}")
    }
}

/// Order-sensitive fingerprint equality, see [`SetLike::equals`].
impl PartialEq for Set {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl TryFrom<Vec<Value>> for Set {
    type Error = SetError;

    fn try_from(values: Vec<Value>) -> Result<Self, Self::Error> {
        Self::from_values(values)
    }
}

/// A set nested inside another value hashes as one array of its elements.
impl Structural for Set {
    fn type_name(&self) -> &'static str {
        "Set"
    }

    fn fields(&self) -> Vec<Value> {
        vec![Value::Array(self.to_vec())]
    }
}

impl From<Set> for Value {
    fn from(set: Set) -> Self {
        Self::Object(Object::new(set))
    }
}

impl ToValue for Set {
    fn to_value(&self) -> Value {
        Value::from(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values;
    use rstest::rstest;

    #[rstest]
    fn test_insert_reports_new_and_duplicate() {
        let mut set = Set::new();
        assert_eq!(set.insert(Value::from("a")), Ok(true));
        assert_eq!(set.insert(Value::from("a")), Ok(false));
        assert_eq!(set.len(), 1);
    }

    #[rstest]
    fn test_null_policy() {
        assert_eq!(Set::new().add(Value::Null), Err(SetError::InvalidElement));
        let mut tolerant = Set::with_config(SetConfig::ignoring_nulls());
        assert_eq!(tolerant.add(Value::Null), Ok(false));
        assert!(tolerant.is_empty());
    }

    #[rstest]
    fn test_into_iter_yields_owned_values_in_order() {
        let set = Set::from_values(values![3, 1, 2]).unwrap();
        let collected: Vec<Value> = set.into_iter().collect();
        assert_eq!(collected, values![3, 1, 2]);
    }

    #[rstest]
    fn test_iter_is_double_ended() {
        let set = Set::from_values(values![1, 2, 3]).unwrap();
        let reversed: Vec<&Value> = set.iter().rev().collect();
        assert_eq!(reversed, vec![&Value::Int(3), &Value::Int(2), &Value::Int(1)]);
        assert_eq!(set.iter().len(), 3);
    }

    #[rstest]
    fn test_display() {
        let set = Set::from_values(values!["a", 1]).unwrap();
        assert_eq!(set.to_string(), r#"{"a", 1}"#);
    }

    #[rstest]
    fn test_nested_set_is_an_object_member() {
        let inner = Set::from_values(values![1, 2]).unwrap();
        let mut outer = Set::new();
        assert_eq!(outer.add(inner.clone()), Ok(true));
        assert_eq!(outer.add(inner), Ok(false));
        assert_eq!(outer.first().and_then(Value::kind).map(|kind| kind.name()), Some("Set"));
    }
}
