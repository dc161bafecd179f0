//! Construction-time options.
//!
//! With the `serde` feature these types serialize, so a set layout can be
//! described in an application's configuration file.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What a set does with [`Value::Null`](crate::Value::Null).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NullPolicy {
    /// Adding null fails with [`SetError::InvalidElement`](crate::SetError::InvalidElement).
    #[default]
    Reject,
    /// Adding null is a silent no-op.
    Ignore,
}

/// Options shared by every set variant.
///
/// # Examples
///
/// ```rust
/// use structural_sets::{NullPolicy, Set, SetConfig, SetLike, Value};
///
/// let mut set = Set::with_config(SetConfig::ignoring_nulls());
/// assert_eq!(set.add(Value::Null), Ok(false));
/// assert_eq!(set.config().null_policy, NullPolicy::Ignore);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SetConfig {
    /// Null handling on insertion.
    pub null_policy: NullPolicy,
}

impl SetConfig {
    /// The default configuration: nulls are rejected.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            null_policy: NullPolicy::Reject,
        }
    }

    /// Replaces the null policy.
    #[must_use]
    pub const fn with_null_policy(mut self, null_policy: NullPolicy) -> Self {
        self.null_policy = null_policy;
        self
    }

    /// A configuration that silently drops nulls.
    #[must_use]
    pub const fn ignoring_nulls() -> Self {
        Self::new().with_null_policy(NullPolicy::Ignore)
    }

    /// Returns `true` if nulls are dropped instead of rejected.
    #[must_use]
    pub const fn ignores_nulls(&self) -> bool {
        matches!(self.null_policy, NullPolicy::Ignore)
    }
}
