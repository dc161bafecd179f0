//! [`SortedSet`]: a strict set kept in comparator order.
//!
//! # Ordering
//!
//! [`natural_order`] compares two values as follows:
//!
//! 1. comparable objects through [`Comparable::compare`](crate::Comparable::compare);
//! 2. strings lexicographically, ignoring ASCII case;
//! 3. numbers numerically, mixing integers and floats freely;
//! 4. booleans with `false` before `true`;
//! 5. anything else as equal.
//!
//! The sort is stable, so elements the comparator considers equal (`"abc"`
//! and `"ABC"`) keep their insertion order.

use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::base::{Iter, Set};
use super::capability::SetLike;
use super::strict::StrictSet;
use super::table::FingerprintTable;
use crate::config::SetConfig;
use crate::error::SetError;
use crate::levenshtein;
use crate::value::{Kind, Value};

// =============================================================================
// Order
// =============================================================================

/// Direction of a [`SortedSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Order {
    /// Smallest element first.
    #[default]
    Ascending,
    /// Largest element first.
    Descending,
}

impl Order {
    /// The opposite direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Compares two values in this direction.
    #[must_use]
    pub fn compare(self, left: &Value, right: &Value) -> Ordering {
        match self {
            Self::Ascending => natural_order(left, right),
            Self::Descending => natural_order(right, left),
        }
    }
}

/// The ascending comparator of [`SortedSet`].
///
/// # Examples
///
/// ```rust
/// use std::cmp::Ordering;
/// use structural_sets::{natural_order, Value};
///
/// assert_eq!(natural_order(&Value::from("abc"), &Value::from("ABD")), Ordering::Less);
/// assert_eq!(natural_order(&Value::from(9.4), &Value::from(10)), Ordering::Less);
/// assert_eq!(natural_order(&Value::from(false), &Value::from(true)), Ordering::Less);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn natural_order(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Object(left_object), Value::Object(right_object)) => {
            match left_object.as_comparable() {
                Some(comparable) if right_object.is_comparable() => comparable.compare(right_object),
                _ => Ordering::Equal,
            }
        }
        (Value::Str(left_text), Value::Str(right_text)) => {
            compare_ignoring_ascii_case(left_text, right_text)
        }
        (Value::Int(left_number), Value::Int(right_number)) => left_number.cmp(right_number),
        (Value::Float(left_number), Value::Float(right_number)) => {
            left_number.total_cmp(right_number)
        }
        (Value::Int(left_number), Value::Float(right_number)) => {
            (*left_number as f64).total_cmp(right_number)
        }
        (Value::Float(left_number), Value::Int(right_number)) => {
            left_number.total_cmp(&(*right_number as f64))
        }
        (Value::Bool(left_flag), Value::Bool(right_flag)) => left_flag.cmp(right_flag),
        _ => Ordering::Equal,
    }
}

fn compare_ignoring_ascii_case(left: &str, right: &str) -> Ordering {
    left.bytes()
        .map(|byte| byte.to_ascii_lowercase())
        .cmp(right.bytes().map(|byte| byte.to_ascii_lowercase()))
}

// =============================================================================
// SortedSet
// =============================================================================

/// A [`StrictSet`] whose iteration order always follows [`natural_order`].
///
/// Only scalars and comparable objects are accepted. Every successful
/// insertion re-sorts the elements.
///
/// # Examples
///
/// ```rust
/// use structural_sets::{values, SetLike, SortedSet, Value};
///
/// let set = SortedSet::from_values(values![0, 9, 7, 5, 10, 970]).unwrap();
///
/// assert_eq!(set.to_vec(), values![0, 5, 7, 9, 10, 970]);
/// assert_eq!(set.ceiling(9.4), Some(Value::from(10)));
/// assert_eq!(set.floor(9.4), Some(Value::from(9)));
/// assert_eq!(set.ceiling(1000), None);
/// ```
#[derive(Clone)]
pub struct SortedSet {
    inner: StrictSet,
    order: Order,
}

static_assertions::assert_not_impl_any!(SortedSet: Send, Sync);

impl SortedSet {
    const CONTAINER: &'static str = "SortedSet";

    /// Creates an empty ascending set.
    #[must_use]
    pub fn new() -> Self {
        Self::with_order(Order::Ascending)
    }

    /// Creates an empty set sorted in `order`.
    #[must_use]
    pub fn with_order(order: Order) -> Self {
        Self::with_config(SetConfig::default(), order)
    }

    /// Creates an empty set with the given configuration and order.
    #[must_use]
    pub fn with_config(config: SetConfig, order: Order) -> Self {
        Self {
            inner: StrictSet::named(Self::CONTAINER, config),
            order,
        }
    }

    /// Creates an ascending set from initial elements.
    ///
    /// # Errors
    ///
    /// The first null, unsortable element or kind violation.
    pub fn from_values<I>(values: I) -> Result<Self, SetError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let mut set = Self::new();
        set.add_all(values)?;
        Ok(set)
    }

    /// The sort direction.
    #[must_use]
    pub const fn order(&self) -> Order {
        self.order
    }

    /// See [`StrictSet::managed_kind`].
    #[must_use]
    pub const fn managed_kind(&self) -> Option<Kind> {
        self.inner.managed_kind()
    }

    /// See [`StrictSet::is_managed_kind`].
    #[must_use]
    pub fn is_managed_kind(&self, value: &Value) -> bool {
        self.inner.is_managed_kind(value)
    }

    /// Iterates over the elements in sort order.
    pub fn iter(&self) -> Iter<'_> {
        self.as_set().iter()
    }

    /// Drops the ordering constraint, keeping the current order.
    #[must_use]
    pub fn into_strict(self) -> StrictSet {
        self.inner
    }

    /// A copy sorted in the opposite direction, which then stays reversed.
    ///
    /// Elements the comparator considers equal keep their relative order.
    #[must_use]
    pub fn reverse(&self) -> Self {
        let mut reversed = self.clone();
        reversed.order = self.order.reversed();
        reversed.sort();
        reversed
    }

    // =========================================================================
    // Range queries
    // =========================================================================

    /// `value` itself if present, otherwise [`higher`](Self::higher).
    pub fn ceiling(&self, value: impl Into<Value>) -> Option<Value> {
        let value = value.into();
        if self.is_compatible(&value) && self.contains(&value) {
            return Some(value);
        }
        self.higher(&value).cloned()
    }

    /// `value` itself if present, otherwise [`lower`](Self::lower).
    pub fn floor(&self, value: impl Into<Value>) -> Option<Value> {
        let value = value.into();
        if self.is_compatible(&value) && self.contains(&value) {
            return Some(value);
        }
        self.lower(&value).cloned()
    }

    /// The least element strictly greater than `value`, in ascending terms.
    ///
    /// `None` when no element qualifies or `value` can not be compared with
    /// the managed kind.
    #[must_use]
    pub fn higher(&self, value: &Value) -> Option<&Value> {
        if !self.is_compatible(value) {
            return None;
        }
        let greater = |candidate: &&Value| natural_order(candidate, value) == Ordering::Greater;
        match self.order {
            Order::Ascending => self.iter().find(greater),
            Order::Descending => self.iter().rev().find(greater),
        }
    }

    /// The greatest element strictly less than `value`, in ascending terms.
    ///
    /// `None` when no element qualifies or `value` can not be compared with
    /// the managed kind.
    #[must_use]
    pub fn lower(&self, value: &Value) -> Option<&Value> {
        if !self.is_compatible(value) {
            return None;
        }
        let less = |candidate: &&Value| natural_order(candidate, value) == Ordering::Less;
        match self.order {
            Order::Ascending => self.iter().rev().find(less),
            Order::Descending => self.iter().find(less),
        }
    }

    /// A slice of the set with array-slice conventions.
    ///
    /// A negative `offset` counts from the end. A missing `length` runs to
    /// the end, a negative one stops that many elements before it. Ranges
    /// past the end are empty. The result keeps this set's order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use structural_sets::{values, SetLike, SortedSet};
    ///
    /// let set = SortedSet::from_values(values!["a", "z", "x", "y"]).unwrap();
    ///
    /// assert_eq!(set.partition(1, None).to_vec(), values!["x", "y", "z"]);
    /// assert_eq!(set.partition(-3, Some(-1)).to_vec(), values!["x", "y"]);
    /// assert!(set.partition(99, Some(99)).is_empty());
    /// ```
    #[must_use]
    pub fn partition(&self, offset: isize, length: Option<isize>) -> Self {
        let (start, end) = slice_bounds(self.len(), offset, length);
        self.slice(start, end)
    }

    /// The elements before `value`; the whole set if `value` is absent.
    #[must_use]
    pub fn head_set(&self, value: &Value) -> Self {
        self.index_of(value)
            .map_or_else(|| self.clone(), |position| self.slice(0, position))
    }

    /// The elements from `value` onwards; the whole set if `value` is absent.
    #[must_use]
    pub fn tail_set(&self, value: &Value) -> Self {
        self.index_of(value)
            .map_or_else(|| self.clone(), |position| self.slice(position, self.len()))
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn is_compatible(&self, value: &Value) -> bool {
        match (self.managed_kind(), value.kind()) {
            (Some(managed), Some(found)) => {
                managed == found || (managed.is_numeric() && found.is_numeric())
            }
            _ => false,
        }
    }

    fn slice(&self, start: usize, end: usize) -> Self {
        let table: FingerprintTable = self.as_set().table.entries()[start..end]
            .iter()
            .cloned()
            .collect();
        Self {
            inner: self.inner.with_table(table),
            order: self.order,
        }
    }

    fn insert_unsorted(&mut self, value: Value) -> Result<bool, SetError> {
        if let Some(found) = value.kind()
            && !value.is_sortable()
        {
            tracing::debug!(%found, "rejected unsortable element");
            return Err(SetError::Unsortable { found });
        }
        self.inner.insert(value)
    }

    fn sort(&mut self) {
        let order = self.order;
        self.inner
            .set_mut()
            .table
            .sort_by(|left, right| order.compare(left, right));
        tracing::debug!(len = self.len(), ?order, "sorted elements");
    }
}

/// Resolves array-slice arguments to a `start..end` range within `len`.
fn slice_bounds(len: usize, offset: isize, length: Option<isize>) -> (usize, usize) {
    let start = if offset < 0 {
        len.saturating_sub(offset.unsigned_abs())
    } else {
        offset.unsigned_abs().min(len)
    };
    let end = match length {
        None => len,
        Some(length) if length < 0 => len.saturating_sub(length.unsigned_abs()).max(start),
        Some(length) => start.saturating_add(length.unsigned_abs()).min(len),
    };
    (start, end)
}

impl Default for SortedSet {
    fn default() -> Self {
        Self::new()
    }
}

impl SetLike for SortedSet {
    fn as_set(&self) -> &Set {
        self.inner.as_set()
    }

    fn insert(&mut self, value: Value) -> Result<bool, SetError> {
        let inserted = self.insert_unsorted(value)?;
        if inserted {
            self.sort();
        }
        Ok(inserted)
    }

    fn remove(&mut self, value: &Value) -> bool {
        self.inner.remove(value)
    }

    fn clear(&mut self) {
        self.inner.clear();
    }

    fn pop(&mut self) -> Option<Value> {
        self.inner.pop()
    }

    fn shift(&mut self) -> Option<Value> {
        self.inner.shift()
    }

    /// Sorts once after the batch, even when an element is rejected midway.
    fn add_all<I>(&mut self, values: I) -> Result<(), SetError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let mut changed = false;
        let mut outcome = Ok(());
        for value in values {
            match self.insert_unsorted(value.into()) {
                Ok(inserted) => changed |= inserted,
                Err(error) => {
                    outcome = Err(error);
                    break;
                }
            }
        }
        if changed {
            self.sort();
        }
        outcome
    }

    /// Only string-managed sets have candidates.
    fn levenshtein(&self, query: &str) -> Option<String> {
        if self.managed_kind() != Some(Kind::String) {
            return None;
        }
        levenshtein::closest(query, self.iter().filter_map(Value::as_str))
    }
}

impl fmt::Debug for SortedSet {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct(Self::CONTAINER)
            .field("order", &self.order)
            .field("managed", &self.managed_kind())
            .field("elements", self.as_set())
            .finish()
    }
}

impl fmt::Display for SortedSet {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_set(), formatter)
    }
}

impl PartialEq for SortedSet {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl<'a> IntoIterator for &'a SortedSet {
    type Item = &'a Value;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<SortedSet> for Set {
    fn from(set: SortedSet) -> Self {
        set.into_strict().into_set()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values;
    use rstest::rstest;

    #[rstest]
    #[case(0, None, (0, 4))]
    #[case(99, Some(99), (4, 4))]
    #[case(1, Some(-1), (1, 3))]
    #[case(-3, Some(-1), (1, 3))]
    #[case(-10, Some(2), (0, 2))]
    #[case(2, Some(-5), (2, 2))]
    fn test_slice_bounds(
        #[case] offset: isize,
        #[case] length: Option<isize>,
        #[case] expected: (usize, usize),
    ) {
        assert_eq!(slice_bounds(4, offset, length), expected);
    }

    #[rstest]
    fn test_strings_compare_ignoring_ascii_case() {
        assert_eq!(compare_ignoring_ascii_case("abc", "ABC"), Ordering::Equal);
        assert_eq!(compare_ignoring_ascii_case("123", "123 "), Ordering::Less);
    }

    #[rstest]
    fn test_descending_swaps_operands() {
        let (small, large) = (Value::from(1), Value::from(2));
        assert_eq!(Order::Descending.compare(&small, &large), Ordering::Greater);
        assert_eq!(Order::Ascending.reversed(), Order::Descending);
    }

    #[rstest]
    fn test_unsortable_element_rejected() {
        let mut set = SortedSet::new();
        let error = set.add([1, 2]).unwrap_err();
        assert_eq!(error, SetError::Unsortable { found: Kind::Array });
        assert!(set.is_empty());
    }

    #[rstest]
    fn test_add_all_sorts_before_reporting_error() {
        let mut set = SortedSet::new();
        let outcome = set.add_all(values![3, 1, "x", 2]);
        assert!(outcome.is_err());
        assert_eq!(set.to_vec(), values![1, 3]);
    }

    #[rstest]
    fn test_incompatible_query_has_no_neighbours() {
        let set = SortedSet::from_values(values![1, 2]).unwrap();
        assert_eq!(set.higher(&Value::from("1")), None);
        assert_eq!(set.lower(&Value::from(true)), None);
        assert_eq!(set.ceiling("2"), None);
    }
}
