//! [`StrictSet`]: a set holding a single kind of element.

use std::fmt;

use super::base::Set;
use super::capability::SetLike;
use super::table::FingerprintTable;
use crate::config::SetConfig;
use crate::error::SetError;
use crate::value::{Kind, Value};

/// A [`Set`] whose elements all share one [`Kind`].
///
/// The first successful insertion fixes the managed kind; later elements of
/// another kind are refused with [`SetError::TypeMismatch`]. Integers and
/// floats are different kinds here, as are objects of different types.
/// Clearing the set keeps the managed kind.
///
/// # Examples
///
/// ```rust
/// use structural_sets::{Kind, SetLike, StrictSet};
///
/// let mut set = StrictSet::new();
/// set.add("abc").unwrap();
///
/// let error = set.add(123).unwrap_err();
/// assert_eq!(error.to_string(), "StrictSet managed type string does not expect integer");
/// assert_eq!(set.managed_kind(), Some(Kind::String));
/// ```
#[derive(Clone)]
pub struct StrictSet {
    inner: Set,
    managed: Option<Kind>,
    container: &'static str,
}

static_assertions::assert_not_impl_any!(StrictSet: Send, Sync);

impl StrictSet {
    const CONTAINER: &'static str = "StrictSet";

    /// Creates an empty set with no managed kind.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SetConfig::default())
    }

    /// Creates an empty set with the given configuration.
    #[must_use]
    pub fn with_config(config: SetConfig) -> Self {
        Self::named(Self::CONTAINER, config)
    }

    pub(crate) fn named(container: &'static str, config: SetConfig) -> Self {
        Self {
            inner: Set::with_config(config),
            managed: None,
            container,
        }
    }

    /// Creates a set from initial elements, in order.
    ///
    /// # Errors
    ///
    /// The first null or kind violation among the elements.
    pub fn from_values<I>(values: I) -> Result<Self, SetError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let mut set = Self::new();
        set.add_all(values)?;
        Ok(set)
    }

    /// The kind fixed by the first insertion, if any.
    #[must_use]
    pub const fn managed_kind(&self) -> Option<Kind> {
        self.managed
    }

    /// Returns `true` if `value` has the managed kind.
    ///
    /// Always `false` before the first insertion and for null.
    #[must_use]
    pub fn is_managed_kind(&self, value: &Value) -> bool {
        self.managed.is_some() && value.kind() == self.managed
    }

    /// Drops the kind constraint, keeping the elements.
    #[must_use]
    pub fn into_set(self) -> Set {
        self.inner
    }

    /// Refuses `value` if its kind differs from the managed kind.
    pub(crate) fn check_kind(&self, value: &Value) -> Result<(), SetError> {
        if let Some(managed) = self.managed
            && let Some(found) = value.kind()
            && managed != found
        {
            tracing::debug!(container = self.container, %managed, %found, "rejected element kind");
            return Err(SetError::TypeMismatch {
                container: self.container,
                managed,
                found,
            });
        }
        Ok(())
    }

    pub(crate) const fn set_mut(&mut self) -> &mut Set {
        &mut self.inner
    }

    /// An empty-or-filled sibling sharing this set's configuration and managed kind.
    pub(crate) fn with_table(&self, table: FingerprintTable) -> Self {
        Self {
            inner: Set::from_table(table, self.inner.config),
            managed: self.managed,
            container: self.container,
        }
    }
}

impl Default for StrictSet {
    fn default() -> Self {
        Self::new()
    }
}

impl SetLike for StrictSet {
    fn as_set(&self) -> &Set {
        &self.inner
    }

    fn insert(&mut self, value: Value) -> Result<bool, SetError> {
        self.check_kind(&value)?;
        let found = value.kind();
        let inserted = self.inner.insert(value)?;
        if inserted && self.managed.is_none() {
            self.managed = found;
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
}

impl fmt::Debug for StrictSet {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct(self.container)
            .field("managed", &self.managed)
            .field("elements", &self.inner)
            .finish()
    }
}

impl fmt::Display for StrictSet {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, formatter)
    }
}

impl PartialEq for StrictSet {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl<'a> IntoIterator for &'a StrictSet {
    type Item = &'a Value;
    type IntoIter = super::base::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

impl From<StrictSet> for Set {
    fn from(set: StrictSet) -> Self {
        set.into_set()
    }
}
