//! # structural-sets
//!
//! Insertion-ordered, structurally deduplicated sets over dynamically typed
//! values.
//!
//! ## Overview
//!
//! Elements are [`Value`]s: scalars, nested arrays and maps, generic
//! [`Record`]s and user types implementing [`Structural`]. Membership is
//! decided by a deep [`Fingerprint`] of the content, so two objects built
//! separately with the same field values are one member.
//!
//! - **[`Set`]**: insertion order, set algebra, predicates, sampling,
//!   fuzzy string lookup and flattening
//! - **[`StrictSet`]**: a set that only accepts the kind of its first element
//! - **[`SortedSet`]**: a strict set kept sorted, with `ceiling`, `floor`,
//!   `higher`, `lower`, `partition`, `head_set` and `tail_set`
//!
//! All three implement [`SetLike`], which carries the shared operations.
//!
//! ## Feature Flags
//!
//! - `derive` (default): `#[derive(Structural)]`
//! - `serde`: `Serialize`/`Deserialize` for [`SetConfig`], [`NullPolicy`] and [`Order`]
//! - `fxhash`: use `rustc-hash` for the fingerprint index
//! - `full`: `derive` and `serde`
//!
//! ## Example
//!
//! ```rust
//! use structural_sets::prelude::*;
//!
//! let mut set = Set::new();
//! set.add_all(values!["abc", "123", 1, 1.0, true, [1, 2]]).unwrap();
//! assert_eq!(set.to_vec(), values!["abc", "123", 1, [1, 2]]);
//!
//! let sorted = SortedSet::from_values(values!["def", "abc", "ABC", "123"]).unwrap();
//! assert_eq!(sorted.to_vec(), values!["123", "abc", "ABC", "def"]);
//! assert_eq!(sorted.reverse().first(), Some(&Value::from("def")));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports the set types, [`SetLike`] and the value model.
///
/// # Usage
///
/// ```rust
/// use structural_sets::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{NullPolicy, SetConfig};
    pub use crate::error::SetError;
    pub use crate::flatten::Depth;
    pub use crate::set::{Cursor, Order, Set, SetLike, SortedSet, StrictSet};
    pub use crate::value::{Comparable, Kind, Map, Object, Record, Structural, ToValue, Value};
    pub use crate::values;

    #[cfg(feature = "derive")]
    pub use structural_sets_derive::Structural;
}

pub mod config;
pub mod error;
pub mod fingerprint;
pub mod flatten;
pub mod levenshtein;
pub mod set;
pub mod value;

pub use config::{NullPolicy, SetConfig};
pub use error::SetError;
pub use fingerprint::{Fingerprint, StructuralHasher};
pub use flatten::Depth;
pub use set::{natural_order, Cursor, Order, Set, SetLike, SortedSet, StrictSet};
pub use value::{Comparable, Kind, Map, Object, Record, Structural, ToValue, Value};

#[cfg(feature = "derive")]
pub use structural_sets_derive::Structural;
