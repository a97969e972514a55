//! Type-directed method resolution.
//!
//! Checks that `receiver.member` completion only offers methods whose
//! declared receiver type is compatible with the receiver's inferred type,
//! and that the container compatibility rules hold for parsed type tags.

use once_cell::sync::Lazy;
use pinelens::hir::{Alias, Arg, Category, DocRecord, SymbolIndex, TypeTag, compatible, normalize};
use pinelens::ide::{MethodResolver, ResolverConfig};
use rstest::rstest;

static INDEX: Lazy<SymbolIndex> = Lazy::new(|| {
    let method = |name: &str, receiver: &str| {
        DocRecord::method(name, vec![Arg::new("id", Some(receiver)), Arg::new("value", None)], None)
    };
    SymbolIndex::new()
        .with(Category::Methods, method("array.push", "array<type>"))
        .with(Category::Methods, method("array.pop", "array<type>"))
        .with(Category::Methods, method("array.size", "array<type>"))
        .with(Category::Methods, method("matrix.rows", "matrix<type>"))
        .with(Category::Methods, method("map.keys", "map<type, type>"))
        .with(Category::Methods, method("Point.dist", "Point"))
        .with(Category::Methods, method("*.copy", "array<type>"))
        .with(Category::Variables, DocRecord::variable("prices", Some("float[]")))
        .with(Category::Variables, DocRecord::variable("grid", Some("matrix<int>")))
        .with(Category::Variables, DocRecord::variable("lookup", Some("map<string, float>")))
        .with(Category::Variables, DocRecord::variable("pt", Some("Point")))
        .with(Category::Variables, DocRecord::variable("title", Some("series string")))
        .with(Category::Types, DocRecord::user_type("Point", vec![Arg::new("x", Some("float"))]))
        .with_alias(Alias::namespace("ta"))
});

fn resolve(namespace: &str, member: &str) -> Vec<String> {
    let config = ResolverConfig::default();
    MethodResolver::new(&*INDEX, &config)
        .resolve_methods(namespace, member)
        .unwrap()
        .records
        .iter()
        .map(|record| record.name.to_string())
        .collect()
}

#[rstest]
#[case("grid", "rows", &["matrix.rows"])]
#[case("lookup", "keys", &["map.keys"])]
#[case("pt", "dist", &["Point.dist"])]
#[case("title", "push", &[])]
#[case("ta", "push", &[])]
#[case("undeclared", "push", &[])]
#[case("ta.sma(close)", "push", &[])]
#[case("", "push", &[])]
fn test_receiver_type_filters_methods(
    #[case] namespace: &str,
    #[case] member: &str,
    #[case] expected: &[&str],
) {
    assert_eq!(resolve(namespace, member), expected);
}

#[test]
fn test_array_receiver_sees_only_array_methods() {
    let found = resolve("prices", "push");
    assert_eq!(found.first().map(String::as_str), Some("array.push"));
    assert!(found.iter().all(|name| name.starts_with("array.")), "{found:?}");
}

#[test]
fn test_wildcard_bucket_is_hover_only() {
    assert!(!resolve("prices", "copy").iter().any(|name| name == "*.copy"));
}

#[test]
fn test_results_keep_index_order() {
    let found = resolve("prices", "push");
    let mut sorted = found.clone();
    sorted.sort_by_key(|name| INDEX.iter(Category::Methods).position(|(key, _)| key == name));
    assert_eq!(found, sorted);
}

#[rstest]
#[case("array<int>", "array<float>", true)]
#[case("array<int>", "matrix<int>", false)]
#[case("array<any>", "array<UDT_Foo>", true)]
#[case("array<UDT_Foo>", "array<type>", true)]
#[case("int[]", "array<int>", true)]
#[case("map<string, int>", "map<type, type>", true)]
#[case("float", "series float", true)]
#[case("string", "int", false)]
fn test_compatibility(#[case] receiver: &str, #[case] declared: &str, #[case] expected: bool) {
    let receiver = TypeTag::parse(receiver).unwrap();
    let declared = TypeTag::parse(declared).unwrap();
    assert_eq!(compatible(&receiver, &declared), expected);
    assert_eq!(compatible(&declared, &receiver), expected);
}

#[test]
fn test_bracket_normalization() {
    assert_eq!(normalize("int[]"), "array<int>");
    assert_eq!(normalize(&normalize("int[]")), "array<int>");
}
