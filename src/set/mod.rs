//! Set variants and their shared capability.
//!
//! - [`Set`]: insertion-ordered, structurally deduplicated
//! - [`StrictSet`]: a [`Set`] restricted to one [`Kind`](crate::Kind)
//! - [`SortedSet`]: a [`StrictSet`] kept in [`natural_order`]
//!
//! Shared operations live on [`SetLike`]; bring it into scope (or use the
//! [`prelude`](crate::prelude)) to call them.
//!
//! # Examples
//!
//! ```rust
//! use structural_sets::prelude::*;
//!
//! let left = Set::from_values(values!["a", "c", "e", 1, 3]).unwrap();
//! let right = SortedSet::from_values(values![5, 3, 1]).unwrap();
//!
//! assert_eq!(left.intersection(&right).to_vec(), values![1, 3]);
//! assert!(!left.subset(&right));
//! ```

mod base;
mod capability;
mod sorted;
mod strict;
mod table;

pub use base::{IntoIter, Iter, Set};
pub use capability::{Cursor, SetLike};
pub use sorted::{natural_order, Order, SortedSet};
pub use strict::StrictSet;
