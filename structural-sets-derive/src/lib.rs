//! Derive macro for structural-sets fingerprinting.
//!
//! This crate provides `#[derive(Structural)]`, which reflects a type's
//! fields so instances can be deduplicated by content inside
//! `structural_sets` collections.
//!
//! # Example
//!
//! ```rust,ignore
//! use structural_sets::{Set, SetLike, Structural};
//!
//! #[derive(Clone, Debug, Structural)]
//! struct Foo {
//!     bar: String,
//! }
//!
//! let mut set = Set::new();
//! set.add(Foo { bar: "bazz".into() }).unwrap();
//! assert!(!set.add(Foo { bar: "bazz".into() }).unwrap());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod structural;

use proc_macro::TokenStream;

/// Derive macro implementing `structural_sets::Structural`.
///
/// The fields are reflected in declaration order; each one must implement
/// `structural_sets::ToValue`. For enums the variant name is reflected
/// first, followed by the variant's fields.
///
/// # Requirements
///
/// - The type must be `'static`, `Debug` and `Clone`
/// - Unions are not supported
///
/// # Attributes
///
/// - `#[structural(comparable)]` on the type: the type implements
///   `structural_sets::Comparable` and may live in a `SortedSet`
/// - `#[structural(skip)]` on a field: the field does not take part in the
///   fingerprint
///
/// # Generated Code
///
/// ```rust,ignore
/// impl ::structural_sets::Structural for TypeName { ... }
/// impl ::core::convert::From<TypeName> for ::structural_sets::Value { ... }
/// impl ::structural_sets::ToValue for TypeName { ... }
/// ```
///
/// # Example
///
/// ```rust,ignore
/// use std::cmp::Ordering;
/// use structural_sets::{Comparable, Object, SetLike, SortedSet, Structural};
///
/// #[derive(Clone, Debug, Structural)]
/// #[structural(comparable)]
/// struct Version {
///     major: u32,
///     #[structural(skip)]
///     label: String,
/// }
///
/// impl Comparable for Version {
///     fn compare(&self, other: &Object) -> Ordering {
///         other
///             .downcast_ref::<Self>()
///             .map_or(Ordering::Greater, |other| self.major.cmp(&other.major))
///     }
/// }
///
/// let mut set = SortedSet::new();
/// set.add(Version { major: 2, label: "two".into() }).unwrap();
/// set.add(Version { major: 1, label: "one".into() }).unwrap();
/// assert!(!set.add(Version { major: 1, label: "uno".into() }).unwrap());
/// ```
#[proc_macro_derive(Structural, attributes(structural))]
pub fn derive_structural(input: TokenStream) -> TokenStream {
    structural::derive_structural_impl(input)
}
