//! The operations every set variant shares.
//!
//! Variants implement the six required methods of [`SetLike`]: access to the
//! underlying [`Set`] plus the mutations whose rules differ per variant.
//! Queries, algebra, iteration and sampling are provided on top of those and
//! always work on fingerprints, never on element equality.

use std::borrow::Borrow;

use rand::Rng;

use super::base::{Iter, Set};
use crate::config::SetConfig;
use crate::error::SetError;
use crate::fingerprint::{Fingerprint, StructuralHasher};
use crate::flatten::{self, Depth};
use crate::levenshtein;
use crate::value::{Map, Value};

/// The common capability of [`Set`], [`StrictSet`](crate::StrictSet) and
/// [`SortedSet`](crate::SortedSet).
///
/// Operations producing a new collection (`union`, `intersection`,
/// `difference`, `filter`, `map`, `flatten`) return a plain [`Set`] carrying
/// the receiver's [`SetConfig`]. Operands are never modified.
pub trait SetLike {
    // =========================================================================
    // Required
    // =========================================================================

    /// The underlying insertion-ordered set.
    fn as_set(&self) -> &Set;

    /// Adds an element.
    ///
    /// Returns `Ok(true)` if it was appended and `Ok(false)` if its
    /// fingerprint was already present (or it was an ignored null).
    ///
    /// # Errors
    ///
    /// [`SetError::InvalidElement`] for a rejected null, and the variant's own
    /// kind violations.
    fn insert(&mut self, value: Value) -> Result<bool, SetError>;

    /// Removes the element with the same fingerprint, preserving the order of
    /// the rest. Null is never present.
    fn remove(&mut self, value: &Value) -> bool;

    /// Removes every element.
    fn clear(&mut self);

    /// Removes and returns the last element.
    fn pop(&mut self) -> Option<Value>;

    /// Removes and returns the first element.
    fn shift(&mut self) -> Option<Value>;

    // =========================================================================
    // Mutation
    // =========================================================================

    /// [`insert`](SetLike::insert) for anything convertible into a [`Value`].
    ///
    /// # Errors
    ///
    /// See [`insert`](SetLike::insert).
    fn add<V: Into<Value>>(&mut self, value: V) -> Result<bool, SetError> {
        self.insert(value.into())
    }

    /// Adds every element in order, skipping duplicates.
    ///
    /// # Errors
    ///
    /// Stops at the first rejected element; the elements before it stay.
    fn add_all<I>(&mut self, values: I) -> Result<(), SetError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        for value in values {
            self.insert(value.into())?;
        }
        Ok(())
    }

    /// Removes every listed element, returning how many were present.
    fn remove_all<I>(&mut self, values: I) -> usize
    where
        I: IntoIterator,
        I::Item: Borrow<Value>,
    {
        values
            .into_iter()
            .filter(|value| self.remove(value.borrow()))
            .count()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The construction options.
    fn config(&self) -> SetConfig {
        self.as_set().config
    }

    /// Number of elements.
    fn len(&self) -> usize {
        self.as_set().table.len()
    }

    /// Returns `true` if the set has no elements.
    fn is_empty(&self) -> bool {
        self.as_set().table.is_empty()
    }

    /// Returns `true` if an element with the same fingerprint is present.
    ///
    /// Null is never contained.
    fn contains(&self, value: &Value) -> bool {
        !value.is_null()
            && self
                .as_set()
                .table
                .contains(&StructuralHasher::fingerprint(value))
    }

    /// The position of the element in iteration order.
    ///
    /// Only scalars, arrays, maps and comparable objects can be located; other
    /// values yield `None`.
    fn index_of(&self, value: &Value) -> Option<usize> {
        if !value.is_queryable() {
            return None;
        }
        self.as_set()
            .table
            .position(&StructuralHasher::fingerprint(value))
    }

    /// The first element in iteration order.
    fn first(&self) -> Option<&Value> {
        self.as_set().table.get(0)
    }

    /// The last element in iteration order.
    fn last(&self) -> Option<&Value> {
        let table = &self.as_set().table;
        table.len().checked_sub(1).and_then(|position| table.get(position))
    }

    /// Iterates over the elements in order.
    fn iter(&self) -> Iter<'_> {
        self.as_set().iter()
    }

    /// Iterates over the fingerprints in element order.
    fn fingerprints(&self) -> impl ExactSizeIterator<Item = &Fingerprint> {
        self.as_set()
            .table
            .entries()
            .iter()
            .map(|entry| &entry.fingerprint)
    }

    // =========================================================================
    // Export
    // =========================================================================

    /// Clones the elements into a vector, in order.
    fn to_vec(&self) -> Vec<Value> {
        self.iter().cloned().collect()
    }

    /// Pairs the elements positionally with `keys`.
    ///
    /// # Errors
    ///
    /// [`SetError::KeyCountMismatch`] unless there is exactly one key per element.
    fn to_map<I>(&self, keys: I) -> Result<Map, SetError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        if keys.len() != self.len() {
            return Err(SetError::KeyCountMismatch {
                keys: keys.len(),
                values: self.len(),
            });
        }
        Ok(keys.into_iter().zip(self.iter().cloned()).collect())
    }

    // =========================================================================
    // Algebra
    // =========================================================================

    /// Elements of `self` followed by the elements of `other` not already present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use structural_sets::{values, Set, SetLike};
    ///
    /// let left = Set::from_values(values!["a", 1]).unwrap();
    /// let right = Set::from_values(values![1, "b"]).unwrap();
    ///
    /// assert_eq!(left.union(&right).to_vec(), values!["a", 1, "b"]);
    /// ```
    fn union<S: SetLike + ?Sized>(&self, other: &S) -> Set {
        let this = self.as_set();
        let mut table = this.table.clone();
        for entry in other.as_set().table.entries() {
            table.push_entry(entry.fingerprint.clone(), entry.value.clone());
        }
        Set::from_table(table, this.config)
    }

    /// Elements of `other`, in `other`'s order, that are also in `self`.
    fn intersection<S: SetLike + ?Sized>(&self, other: &S) -> Set {
        let this = self.as_set();
        let table = other
            .as_set()
            .table
            .entries()
            .iter()
            .filter(|entry| this.table.contains(&entry.fingerprint))
            .cloned()
            .collect();
        Set::from_table(table, this.config)
    }

    /// Elements of **`other`** that are absent from `self`.
    ///
    /// Note the direction: this is `other \ self`, not `self \ other`. When
    /// `self` is empty the result holds every element of `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use structural_sets::{values, Set, SetLike};
    ///
    /// let receiver = Set::from_values(values!["a", "c"]).unwrap();
    /// let other = Set::from_values(values!["a", "b"]).unwrap();
    ///
    /// assert_eq!(receiver.difference(&other).to_vec(), values!["b"]);
    /// ```
    fn difference<S: SetLike + ?Sized>(&self, other: &S) -> Set {
        let this = self.as_set();
        let table = other
            .as_set()
            .table
            .entries()
            .iter()
            .filter(|entry| !this.table.contains(&entry.fingerprint))
            .cloned()
            .collect();
        Set::from_table(table, this.config)
    }

    /// Returns `true` if both sets are non-empty and every element of `self`
    /// is in `other`.
    fn subset<S: SetLike + ?Sized>(&self, other: &S) -> bool {
        let (this, that) = (self.as_set(), other.as_set());
        !this.table.is_empty()
            && !that.table.is_empty()
            && this
                .table
                .entries()
                .iter()
                .all(|entry| that.table.contains(&entry.fingerprint))
    }

    /// Returns `true` if both sets hold the same fingerprints in the same order.
    fn equals<S: SetLike + ?Sized>(&self, other: &S) -> bool {
        self.len() == other.len() && self.fingerprints().eq(other.fingerprints())
    }

    // =========================================================================
    // Higher-order
    // =========================================================================

    /// The elements satisfying `predicate`, in order.
    fn filter<P>(&self, mut predicate: P) -> Set
    where
        P: FnMut(&Value) -> bool,
    {
        let this = self.as_set();
        let table = this
            .table
            .entries()
            .iter()
            .filter(|entry| predicate(&entry.value))
            .cloned()
            .collect();
        Set::from_table(table, this.config)
    }

    /// Transforms every element, deduplicating the results.
    ///
    /// # Errors
    ///
    /// [`SetError::InvalidElement`] if the transform yields a null the
    /// receiver's configuration rejects.
    fn map<F, V>(&self, mut transform: F) -> Result<Set, SetError>
    where
        F: FnMut(&Value) -> V,
        V: Into<Value>,
    {
        let mut result = Set::with_config(self.config());
        for value in self.iter() {
            result.insert(transform(value).into())?;
        }
        Ok(result)
    }

    /// Returns `true` if at least one element satisfies `predicate`.
    fn any_match<P: FnMut(&Value) -> bool>(&self, predicate: P) -> bool {
        self.iter().any(predicate)
    }

    /// Returns `true` if every element satisfies `predicate`. Vacuously true
    /// when empty.
    fn all_match<P: FnMut(&Value) -> bool>(&self, predicate: P) -> bool {
        self.iter().all(predicate)
    }

    /// Returns `true` if no element satisfies `predicate`.
    fn none_match<P: FnMut(&Value) -> bool>(&self, predicate: P) -> bool {
        !self.any_match(predicate)
    }

    // =========================================================================
    // Sampling and search
    // =========================================================================

    /// One uniformly random element, using the thread-local generator.
    fn choose(&self) -> Option<&Value> {
        self.choose_with(&mut rand::rng())
    }

    /// One uniformly random element drawn from `rng`.
    fn choose_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Value> {
        let table = &self.as_set().table;
        if table.is_empty() {
            return None;
        }
        table.get(rng.random_range(0..table.len()))
    }

    /// `quantity` distinct random elements, using the thread-local generator.
    ///
    /// See [`choose_many_with`](SetLike::choose_many_with).
    fn choose_many(&self, quantity: isize) -> Vec<&Value> {
        self.choose_many_with(quantity, &mut rand::rng())
    }

    /// `quantity` distinct random elements drawn from `rng`.
    ///
    /// A quantity below one yields nothing and a quantity of at least
    /// [`len`](SetLike::len) yields every element. The sample keeps
    /// iteration order.
    fn choose_many_with<R: Rng + ?Sized>(&self, quantity: isize, rng: &mut R) -> Vec<&Value> {
        let table = &self.as_set().table;
        let quantity = match usize::try_from(quantity) {
            Ok(0) | Err(_) => return Vec::new(),
            Ok(quantity) => quantity,
        };
        if quantity >= table.len() {
            return self.iter().collect();
        }
        let mut positions = rand::seq::index::sample(rng, table.len(), quantity).into_vec();
        positions.sort_unstable();
        positions
            .into_iter()
            .filter_map(|position| table.get(position))
            .collect()
    }

    /// The string element closest to `query` by edit distance.
    ///
    /// An exact match returns `query`. Otherwise the nearest string within
    /// [`MAX_DISTANCE`](crate::levenshtein::MAX_DISTANCE) edits wins, the
    /// earliest one on ties. Non-string elements are ignored.
    fn levenshtein(&self, query: &str) -> Option<String> {
        levenshtein::closest(query, self.iter().filter_map(Value::as_str))
    }

    /// A set of the flattened elements, see [`flatten`](crate::flatten::flatten).
    ///
    /// # Errors
    ///
    /// [`SetError::InvalidElement`] if flattening surfaces a nested null the
    /// receiver's configuration rejects.
    fn flatten<D: Into<Depth>>(&self, depth: D) -> Result<Set, SetError> {
        let mut result = Set::with_config(self.config());
        result.add_all(flatten::flatten(self.iter(), depth.into()))?;
        Ok(result)
    }
}

// =============================================================================
// Cursor
// =============================================================================

/// A position in a set's iteration order that survives mutation.
///
/// The cursor does not borrow the set, so elements may be removed between
/// steps. Removing the element just returned shifts its successor into the
/// cursor's slot, and the next step then skips that successor.
///
/// # Examples
///
/// ```rust
/// use structural_sets::{values, Cursor, Set, SetLike};
///
/// let mut set = Set::from_values(values!["keep", "drop", "also"]).unwrap();
/// let mut cursor = Cursor::new();
///
/// while let Some(value) = cursor.next(&set).cloned() {
///     if value.as_str() == Some("also") {
///         set.remove(&value);
///     }
/// }
/// assert_eq!(set.to_vec(), values!["keep", "drop"]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    position: usize,
}

impl Cursor {
    /// A cursor on the first element.
    #[must_use]
    pub const fn new() -> Self {
        Self { position: 0 }
    }

    /// The index the cursor points at.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// The element under the cursor.
    pub fn current<'a, S: SetLike + ?Sized>(&self, set: &'a S) -> Option<&'a Value> {
        set.as_set().table.get(self.position)
    }

    /// Returns the element under the cursor and moves past it.
    pub fn next<'a, S: SetLike + ?Sized>(&mut self, set: &'a S) -> Option<&'a Value> {
        let value = self.current(set)?;
        self.position += 1;
        Some(value)
    }

    /// Moves to the following position.
    pub const fn advance(&mut self) {
        self.position += 1;
    }

    /// Returns `true` while the cursor points at an element.
    pub fn is_valid<S: SetLike + ?Sized>(&self, set: &S) -> bool {
        self.position < set.len()
    }

    /// Moves back to the first element.
    pub const fn rewind(&mut self) {
        self.position = 0;
    }
}
