//! Deep structural fingerprints.
//!
//! [`StructuralHasher`] maps any [`Value`] to a [`Fingerprint`], the key under
//! which sets deduplicate their elements. The computation is deterministic
//! across runs and processes and looks only at content, never at identity.
//!
//! # Algorithm
//!
//! Starting from the seed `7` with multiplier `31`:
//!
//! - booleans and integers contribute `31 * 7 + value`;
//! - whole floats below `2^63` contribute like the equal integer, other
//!   floats contribute `31 * 7` plus the float kept as a separate part;
//! - strings contribute `31 * 7 + digest`, where digest is the 128-bit
//!   SipHash-1-3 of the UTF-8 bytes under zero keys;
//! - arrays, maps and objects contribute `7 + sum of their children`;
//! - a nested null contributes `7`.
//!
//! The integer and float parts are summed independently, so a fractional
//! price next to a string digest still changes the fingerprint.
//!
//! The sum over children does not depend on their order, so `[1, 2]` and
//! `[2, 1]` share a fingerprint. `true`, `1` and `1.0` also share one.
//!
//! # Examples
//!
//! ```rust
//! use structural_sets::{StructuralHasher, Value};
//!
//! assert_eq!(StructuralHasher::fingerprint(&Value::from(1)).as_str(), "218");
//! assert_eq!(
//!     StructuralHasher::fingerprint(&Value::from(true)),
//!     StructuralHasher::fingerprint(&Value::from(1.0)),
//! );
//! ```

use std::fmt;
use std::hash::Hasher as _;
use std::ops::Add;

use siphasher::sip128::{Hasher128 as _, SipHasher13};

use crate::value::Value;

/// Starting value of every accumulation.
pub const SEED: i128 = 7;

/// Factor applied to the seed for scalar elements.
pub const MULTIPLIER: i128 = 31;

const SCALAR_BASE: i128 = SEED * MULTIPLIER;

/// `2^63`, the magnitude from which whole floats stay in the float part.
const WHOLE_FLOAT_LIMIT: f64 = 9_223_372_036_854_775_808.0;

// =============================================================================
// Accumulator
// =============================================================================

/// The running numeric state of a fingerprint computation.
///
/// The exact part wraps on overflow. The inexact part collects the floats
/// that are not small whole numbers; it renders only when non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Accumulator {
    exact: i128,
    inexact: f64,
}

impl Accumulator {
    /// The seed accumulator.
    pub const SEED: Self = Self::integer(SEED);

    /// An accumulator holding an exact integer.
    #[must_use]
    pub const fn integer(value: i128) -> Self {
        Self {
            exact: value,
            inexact: 0.0,
        }
    }

    /// An accumulator holding a float, folded into the exact part when whole.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn float(value: f64) -> Self {
        if value.fract() == 0.0 && value.abs() < WHOLE_FLOAT_LIMIT {
            Self::integer(value as i128)
        } else {
            Self {
                exact: 0,
                inexact: value,
            }
        }
    }

    /// The exact integer part.
    #[must_use]
    pub const fn exact(self) -> i128 {
        self.exact
    }

    /// The float part.
    #[must_use]
    pub const fn inexact(self) -> f64 {
        self.inexact
    }

    /// Renders the accumulator as fingerprint text.
    #[must_use]
    pub fn render(self) -> Fingerprint {
        Fingerprint(self.to_string())
    }
}

impl Add for Accumulator {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            exact: self.exact.wrapping_add(other.exact),
            inexact: self.inexact + other.inexact,
        }
    }
}

/// `exact` alone, or `exact` followed by the signed float part.
impl fmt::Display for Accumulator {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inexact == 0.0 {
            write!(formatter, "{}", self.exact)
        } else {
            write!(formatter, "{}{:+}", self.exact, self.inexact)
        }
    }
}

// =============================================================================
// Fingerprint
// =============================================================================

/// The textual identity of a value.
///
/// Equal fingerprints mean the same set slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// The rendered text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// StructuralHasher
// =============================================================================

/// Computes fingerprints. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralHasher;

impl StructuralHasher {
    /// Fingerprints a value.
    #[must_use]
    pub fn fingerprint(value: &Value) -> Fingerprint {
        Self::accumulate(value).render()
    }

    /// The unrendered accumulator of a value.
    #[must_use]
    pub fn accumulate(value: &Value) -> Accumulator {
        match value {
            Value::Null => Accumulator::SEED,
            Value::Bool(flag) => Accumulator::integer(SCALAR_BASE + i128::from(*flag)),
            Value::Int(number) => Accumulator::integer(SCALAR_BASE + i128::from(*number)),
            Value::Float(number) => Accumulator::integer(SCALAR_BASE) + Accumulator::float(*number),
            Value::Str(content) => Accumulator::integer(SCALAR_BASE.wrapping_add(digest(content))),
            Value::Array(elements) => Self::composite(elements.iter()),
            Value::Map(map) => Self::composite(map.values()),
            Value::Object(object) => Self::composite(object.fields().iter()),
        }
    }

    fn composite<'a>(children: impl Iterator<Item = &'a Value>) -> Accumulator {
        children.fold(Accumulator::SEED, |sum, child| sum + Self::accumulate(child))
    }
}

/// 128-bit SipHash-1-3 of the string, reinterpreted as a signed integer.
#[allow(clippy::cast_possible_wrap)]
fn digest(content: &str) -> i128 {
    let mut hasher = SipHasher13::new_with_keys(0, 0);
    hasher.write(content.as_bytes());
    hasher.finish128().as_u128() as i128
}
