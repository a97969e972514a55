//! Hover lookup policy.
//!
//! Receiver calls are looked up in a fixed order: user-defined type methods,
//! then the receiver's typed prefix, then the `*.name` wildcard bucket, then
//! each declared alias, then the bare name. These tests pin that order.

use once_cell::sync::Lazy;
use pinelens::hir::{Alias, Arg, Category, DocRecord, SymbolIndex};
use pinelens::ide::{HoverResult, ResolverConfig, generate_candidate_names, hover};
use rstest::rstest;

static INDEX: Lazy<SymbolIndex> = Lazy::new(|| {
    let first = |name: &str| vec![Arg::new(name, None), Arg::new("length", Some("int"))];
    SymbolIndex::new()
        .with(Category::Functions, DocRecord::function("plot", first("series"), None))
        .with(Category::Functions, DocRecord::function("ta.highest", first("source"), Some("float")))
        .with(Category::Functions, DocRecord::function("ta.max", first("source"), Some("float")))
        .with(Category::Functions, DocRecord::function("math.max", first("number0"), Some("float")))
        .with(
            Category::Methods,
            DocRecord::method("array.push", vec![Arg::new("id", Some("array<type>"))], None),
        )
        .with(
            Category::Methods,
            DocRecord::method("array.copy", vec![Arg::new("id", Some("array<type>"))], None),
        )
        .with(Category::Methods, DocRecord::method("*.copy", vec![Arg::new("id", None)], None))
        .with(
            Category::Methods,
            DocRecord::method("Point.dist", vec![Arg::new("this", Some("Point"))], Some("float")),
        )
        .with(Category::Variables, DocRecord::variable("close", Some("series float")))
        .with(Category::Variables, DocRecord::variable("myArray", Some("float[]")))
        .with(Category::Variables, DocRecord::variable("grid", Some("matrix<int>")))
        .with(Category::Variables, DocRecord::variable("pt", Some("Point")))
        .with(Category::Types, DocRecord::user_type("Point", vec![]))
        .with_alias(Alias::namespace("ta"))
        .with_alias(Alias::namespace("math"))
});

fn lookup(key: &str) -> Option<HoverResult> {
    hover(&*INDEX, &ResolverConfig::default(), key).unwrap()
}

#[test]
fn test_bare_name_has_no_namespace() {
    let hit = lookup("close").unwrap();
    assert_eq!(hit.record.name, "close");
    assert_eq!(hit.function_name, "close");
    assert_eq!(hit.namespace, None);
}

#[test]
fn test_receiver_patches_a_copy() {
    let hit = lookup("myArray.push").unwrap();
    assert_eq!(hit.record.name, "array.push");
    assert_eq!(hit.record.args()[0].name, "myArray");
    assert_eq!(hit.function_name, "push");
    assert_eq!(hit.namespace.as_deref(), Some("myArray"));

    let stored = INDEX.lookup(Category::Methods, "array.push").unwrap();
    assert_eq!(stored.args()[0].name, "id");
}

#[test]
fn test_user_type_method_is_unpatched() {
    let hit = lookup("pt.dist").unwrap();
    assert_eq!(hit.record.name, "Point.dist");
    assert_eq!(hit.function_name, "Point.dist");
    assert_eq!(hit.record.args()[0].name, "this");
    assert_eq!(hit.namespace.as_deref(), Some("pt"));
}

#[rstest]
#[case::typed_prefix_beats_wildcard("myArray.copy", "array.copy")]
#[case::wildcard_beats_aliases("grid.copy", "*.copy")]
#[case::aliases_in_declaration_order("anything.max", "ta.max")]
#[case::bare_name_last("anything.plot", "plot")]
#[case::dotted_namespace("a.b.highest", "ta.highest")]
fn test_lookup_precedence(#[case] key: &str, #[case] expected: &str) {
    let hit = lookup(key).unwrap();
    assert_eq!(hit.record.name, expected);

    let (namespace, _) = key.rsplit_once('.').unwrap();
    assert_eq!(hit.record.args()[0].name, namespace);
}

#[test]
fn test_miss_is_none() {
    assert!(lookup("anything.nothing").is_none());
    assert!(lookup("nothing").is_none());
    assert!(lookup("").is_none());
}

#[test]
fn test_candidate_names_end_with_bare_name() {
    let aliases = INDEX.alias_list();
    let names = generate_candidate_names(aliases, "max");
    assert_eq!(names.len(), aliases.len() + 1);
    assert_eq!(names.last().map(String::as_str), Some("max"));
    assert_eq!(names, vec!["ta.max", "math.max", "max"]);
}
