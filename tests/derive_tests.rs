#![cfg(feature = "derive")]

//! Tests for `#[derive(Structural)]`.

use std::cmp::Ordering;

use rstest::rstest;
use structural_sets::prelude::*;
use structural_sets::StructuralHasher;

// =============================================================================
// Test Structures
// =============================================================================

#[derive(Clone, Debug, Structural)]
struct Foo {
    bar: String,
}

impl Foo {
    fn new(bar: &str) -> Self {
        Self { bar: bar.to_owned() }
    }
}

#[derive(Clone, Debug, Structural)]
struct Point(i32, i32);

#[derive(Clone, Debug, Structural)]
struct Marker;

#[derive(Clone, Debug, Structural)]
struct Cached {
    key: u32,
    #[structural(skip)]
    hits: u64,
}

#[derive(Clone, Debug, Structural)]
struct Nested {
    name: String,
    inner: Foo,
    tags: Vec<&'static str>,
    parent: Option<Box<Nested>>,
}

#[derive(Clone, Debug, Structural)]
enum Shape {
    Circle { radius: u32 },
    Square(u32),
    Empty,
}

#[derive(Clone, Debug, Structural)]
struct Pair<T> {
    left: T,
    right: T,
}

#[derive(Clone, Debug, Structural)]
#[structural(comparable)]
struct Version {
    major: u32,
    #[structural(skip)]
    label: &'static str,
}

impl Comparable for Version {
    fn compare(&self, other: &Object) -> Ordering {
        other
            .downcast_ref::<Self>()
            .map_or(Ordering::Greater, |other| self.major.cmp(&other.major))
    }
}

// =============================================================================
// Structs
// =============================================================================

#[rstest]
fn test_named_struct_reflects_fields() {
    assert_eq!(Foo::new("bazz").fields(), values!["bazz"]);
}

#[rstest]
fn test_equal_structs_are_one_member() {
    let mut set = Set::new();
    assert_eq!(set.add(Foo::new("bazz")), Ok(true));
    assert_eq!(set.add(Foo::new("bazz")), Ok(false));
    assert_eq!(set.add(Foo::new("other")), Ok(true));
    assert_eq!(set.len(), 2);
}

#[rstest]
fn test_tuple_struct_reflects_positions() {
    assert_eq!(Point(3, 4).fields(), values![3, 4]);
}

#[rstest]
fn test_unit_struct_has_no_fields() {
    assert!(Marker.fields().is_empty());
    assert_eq!(
        StructuralHasher::fingerprint(&Value::from(Marker)).as_str(),
        "7"
    );
}

#[rstest]
fn test_skipped_field_is_ignored() {
    let mut set = Set::new();
    set.add(Cached { key: 1, hits: 10 }).unwrap();
    assert_eq!(set.add(Cached { key: 1, hits: 99 }), Ok(false));
    assert_eq!(Cached { key: 1, hits: 0 }.fields(), values![1]);
}

#[rstest]
fn test_nested_fields_are_reflected_deeply() {
    let leaf = Nested {
        name: "leaf".into(),
        inner: Foo::new("a"),
        tags: vec!["x"],
        parent: None,
    };
    let root = Nested {
        name: "root".into(),
        inner: Foo::new("b"),
        tags: vec![],
        parent: Some(Box::new(leaf.clone())),
    };

    let fields = root.fields();
    assert_eq!(fields.len(), 4);
    assert_eq!(fields[1], Value::from(Foo::new("b")));
    assert_eq!(fields[3], Value::from(leaf));
    assert!(Nested { parent: None, ..root }.fields()[3].is_null());
}

// =============================================================================
// Enums
// =============================================================================

#[rstest]
#[case(Shape::Circle { radius: 2 }, values!["Circle", 2])]
#[case(Shape::Square(2), values!["Square", 2])]
#[case(Shape::Empty, values!["Empty"])]
fn test_enum_reflects_variant_then_fields(#[case] shape: Shape, #[case] expected: Vec<Value>) {
    assert_eq!(shape.fields(), expected);
}

#[rstest]
fn test_variants_with_equal_payloads_differ() {
    let mut set = StrictSet::new();
    set.add(Shape::Circle { radius: 2 }).unwrap();
    assert_eq!(set.add(Shape::Square(2)), Ok(true));
    assert_eq!(set.add(Shape::Square(2)), Ok(false));
}

// =============================================================================
// Generics and kinds
// =============================================================================

#[rstest]
fn test_generic_struct() {
    let pair = Pair { left: 1, right: 2 };
    assert_eq!(pair.fields(), values![1, 2]);

    let words = Pair { left: "a", right: "b" };
    assert_eq!(words.fields(), values!["a", "b"]);
}

#[rstest]
fn test_derived_types_are_distinct_kinds() {
    let mut set = StrictSet::new();
    set.add(Foo::new("a")).unwrap();
    let error = set.add(Point(1, 2)).unwrap_err();
    assert!(error.is_type_mismatch());
}

// =============================================================================
// Comparable
// =============================================================================

#[rstest]
fn test_comparable_attribute_enables_sorted_sets() {
    let mut set = SortedSet::new();
    set.add(Version { major: 3, label: "three" }).unwrap();
    set.add(Version { major: 1, label: "one" }).unwrap();
    set.add(Version { major: 2, label: "two" }).unwrap();
    assert_eq!(set.add(Version { major: 1, label: "uno" }), Ok(false));

    let majors: Vec<Value> = set
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|object| object.downcast_ref::<Version>())
        .map(|version| Value::from(version.major))
        .collect();
    assert_eq!(majors, values![1, 2, 3]);
}

#[rstest]
fn test_types_without_capability_are_unsortable() {
    let mut set = SortedSet::new();
    let error = set.add(Foo::new("a")).unwrap_err();
    assert!(matches!(error, SetError::Unsortable { .. }));
}
