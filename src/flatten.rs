//! Depth-bounded flattening of nested arrays and maps.
//!
//! Maps are flattened through their values; keys are dropped. Objects are
//! never opened, even when they expose fields.
//!
//! # Examples
//!
//! ```rust
//! use structural_sets::flatten::{flatten, Depth};
//! use structural_sets::{values, Value};
//!
//! let nested = values![1, values![2, values![3, values![4]]]];
//!
//! assert_eq!(flatten(&nested, Depth::Levels(1)), values![1, 2, values![3, values![4]]]);
//! assert_eq!(flatten(&nested, Depth::Full), values![1, 2, 3, 4]);
//! ```

use crate::value::Value;

/// How many levels of nesting to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Depth {
    /// Open at most this many levels. `Levels(0)` copies the input.
    Levels(usize),
    /// Open every level.
    Full,
}

impl Depth {
    /// The depth used for the children of an opened composite.
    const fn descend(self) -> Option<Self> {
        match self {
            Self::Levels(0) => None,
            Self::Levels(levels) => Some(Self::Levels(levels - 1)),
            Self::Full => Some(Self::Full),
        }
    }
}

impl Default for Depth {
    fn default() -> Self {
        Self::Levels(1)
    }
}

impl From<usize> for Depth {
    fn from(levels: usize) -> Self {
        Self::Levels(levels)
    }
}

/// Flattens `values` up to `depth` levels, preserving order.
pub fn flatten<'a, I>(values: I, depth: Depth) -> Vec<Value>
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut output = Vec::new();
    flatten_into(values, depth, &mut output);
    output
}

fn flatten_into<'a, I>(values: I, depth: Depth, output: &mut Vec<Value>)
where
    I: IntoIterator<Item = &'a Value>,
{
    for value in values {
        match (value, depth.descend()) {
            (Value::Array(elements), Some(child_depth)) => {
                flatten_into(elements, child_depth, output);
            }
            (Value::Map(map), Some(child_depth)) => flatten_into(map.values(), child_depth, output),
            _ => output.push(value.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Map, Record};
    use crate::values;
    use rstest::rstest;

    #[rstest]
    fn test_zero_depth_copies() {
        let nested = values![[1, 2], 3];
        assert_eq!(flatten(&nested, Depth::Levels(0)), nested);
    }

    #[rstest]
    fn test_map_values_are_flattened_without_keys() {
        let map: Map = [("first", Value::from(1)), ("second", Value::from([2, 3]))]
            .into_iter()
            .collect();
        let input = vec![Value::Map(map)];

        assert_eq!(flatten(&input, Depth::Levels(1)), values![1, [2, 3]]);
        assert_eq!(flatten(&input, Depth::Full), values![1, 2, 3]);
    }

    #[rstest]
    fn test_objects_stay_opaque() {
        let input = vec![Value::from(Record::new().with("inner", [1, 2]))];
        assert_eq!(flatten(&input, Depth::Full), input);
    }

    #[rstest]
    #[case(Depth::default(), Depth::Levels(1))]
    #[case(Depth::from(3), Depth::Levels(3))]
    fn test_depth_construction(#[case] actual: Depth, #[case] expected: Depth) {
        assert_eq!(actual, expected);
    }
}
