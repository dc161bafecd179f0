//! Integration tests for StrictSet.

use rstest::rstest;
use structural_sets::prelude::*;

#[derive(Clone, Debug)]
struct Tag(&'static str);

impl Structural for Tag {
    fn type_name(&self) -> &'static str {
        "Tag"
    }

    fn fields(&self) -> Vec<Value> {
        vec![Value::from(self.0)]
    }
}

#[rstest]
#[case(values!["abc", 123], Kind::String, Kind::Integer)]
#[case(values![1, 1.5], Kind::Integer, Kind::Float)]
#[case(values![true, "true"], Kind::Boolean, Kind::String)]
#[case(values![[1], 1], Kind::Array, Kind::Integer)]
fn test_mixed_kinds_are_rejected(
    #[case] elements: Vec<Value>,
    #[case] managed: Kind,
    #[case] found: Kind,
) {
    let error = StrictSet::from_values(elements).unwrap_err();
    assert_eq!(
        error,
        SetError::TypeMismatch {
            container: "StrictSet",
            managed,
            found,
        }
    );
    assert!(error.is_type_mismatch());
}

#[rstest]
fn test_mismatch_message_names_both_kinds() {
    let mut set = StrictSet::new();
    set.add("abc").unwrap();
    let error = set.add(123).unwrap_err();
    assert_eq!(
        error.to_string(),
        "StrictSet managed type string does not expect integer"
    );
    assert_eq!(set.len(), 1);
}

#[rstest]
fn test_arrays_and_maps_share_a_kind() {
    let map: Map = [("key", 1)].into_iter().collect();
    let mut set = StrictSet::new();
    set.add([1, 2]).unwrap();
    assert_eq!(set.add(map), Ok(true));
    assert_eq!(set.managed_kind(), Some(Kind::Array));
}

#[rstest]
fn test_objects_are_kinded_by_type() {
    let mut set = StrictSet::new();
    set.add(Object::new(Tag("a"))).unwrap();
    set.add(Object::new(Tag("b"))).unwrap();

    let error = set.add(Record::new().with("name", "a")).unwrap_err();
    assert_eq!(
        error.to_string(),
        "StrictSet managed type Tag does not expect Record"
    );
    assert_eq!(set.managed_kind(), Some(Kind::Object("Tag")));
}

#[rstest]
fn test_duplicates_are_still_deduplicated() {
    let set = StrictSet::from_values(values![1, 2, 1, 3, 2]).unwrap();
    assert_eq!(set.to_vec(), values![1, 2, 3]);
}

#[rstest]
fn test_null_follows_the_configured_policy() {
    let mut strict = StrictSet::new();
    assert_eq!(strict.add(Value::Null), Err(SetError::InvalidElement));

    let mut tolerant = StrictSet::with_config(SetConfig::ignoring_nulls());
    assert_eq!(tolerant.add(Value::Null), Ok(false));
    assert_eq!(tolerant.managed_kind(), None);
    tolerant.add(1.5).unwrap();
    assert_eq!(tolerant.managed_kind(), Some(Kind::Float));
}

#[rstest]
fn test_clear_keeps_the_managed_kind() {
    let mut set = StrictSet::from_values(values![1, 2]).unwrap();
    set.clear();
    assert!(set.add("a").unwrap_err().is_type_mismatch());
    assert_eq!(set.add(3), Ok(true));
}

#[rstest]
fn test_algebra_returns_plain_sets() {
    let numbers = StrictSet::from_values(values![1, 2, 3]).unwrap();
    let words = StrictSet::from_values(values!["a"]).unwrap();

    let union = numbers.union(&words);
    assert_eq!(union.to_vec(), values![1, 2, 3, "a"]);
    assert!(numbers.intersection(&words).is_empty());
    assert_eq!(numbers.difference(&words).to_vec(), values!["a"]);
}

#[rstest]
fn test_into_set_drops_the_constraint() {
    let strict = StrictSet::from_values(values![1]).unwrap();
    let mut set: Set = strict.into();
    assert_eq!(set.add("a"), Ok(true));
}

#[rstest]
fn test_equality_is_order_sensitive() {
    let left = StrictSet::from_values(values![1, 2]).unwrap();
    let right = StrictSet::from_values(values![2, 1]).unwrap();
    assert_ne!(left, right);
    assert!(left.equals(&Set::from_values(values![1, 2]).unwrap()));
}
