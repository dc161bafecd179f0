//! Errors raised when a set refuses an element.

use thiserror::Error;

use crate::value::Kind;

/// The ways a set mutation or conversion can fail.
///
/// Queries never fail; they return `None` or an empty result instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetError {
    /// A null was added to a set whose [`NullPolicy`](crate::NullPolicy) rejects it.
    #[error("set elements can not be null")]
    InvalidElement,

    /// The element kind differs from the kind a strict set manages.
    #[error("{container} managed type {managed} does not expect {found}")]
    TypeMismatch {
        /// The container type refusing the element.
        container: &'static str,
        /// The kind fixed by the first insertion.
        managed: Kind,
        /// The kind of the rejected element.
        found: Kind,
    },

    /// The element has no ordering, so a sorted set can not hold it.
    #[error("sorted set elements must be scalars or comparable objects, found {found}")]
    Unsortable {
        /// The kind of the rejected element.
        found: Kind,
    },

    /// [`to_map`](crate::SetLike::to_map) received a different number of keys
    /// than the set has elements.
    #[error("expected {values} keys, got {keys}")]
    KeyCountMismatch {
        /// Number of keys supplied.
        keys: usize,
        /// Number of elements in the set.
        values: usize,
    },
}

impl SetError {
    /// Returns `true` for [`SetError::InvalidElement`].
    #[must_use]
    pub const fn is_invalid_element(&self) -> bool {
        matches!(self, Self::InvalidElement)
    }

    /// Returns `true` for kind violations, including [`SetError::Unsortable`].
    #[must_use]
    pub const fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. } | Self::Unsortable { .. })
    }
}
