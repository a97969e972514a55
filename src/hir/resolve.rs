//! Type resolution — inferring the type of a receiver identifier.
//!
//! Resolution is deliberately shallow: an identifier (or a dotted field path
//! such as `obj.field`) is looked up by exact key among the variable and
//! field categories. Anything else (calls, indexing, arithmetic) is opaque
//! and resolves to [`ResolveResult::NotFound`], which makes callers skip
//! type-based filtering rather than guess.

use tracing::trace;

use crate::base::ident::is_identifier_path;

use super::error::Result;
use super::index::{Category, SymbolSource};
use super::ty::TypeTag;

/// Result of resolving an identifier's type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveResult {
    /// Exactly one declared type.
    Found(TypeTag),
    /// The identifier is declared with conflicting types.
    Ambiguous(Vec<TypeTag>),
    /// Unknown, untyped, or not a plain identifier.
    NotFound,
}

impl ResolveResult {
    /// Get the type if resolution succeeded unambiguously.
    pub fn ty(&self) -> Option<&TypeTag> {
        match self {
            ResolveResult::Found(ty) => Some(ty),
            _ => None,
        }
    }

    /// Consume into the resolved type, if unambiguous.
    pub fn into_ty(self) -> Option<TypeTag> {
        match self {
            ResolveResult::Found(ty) => Some(ty),
            _ => None,
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, ResolveResult::Ambiguous(_))
    }
}

/// Infers semantic types of identifiers against a symbol source.
#[derive(Clone, Copy)]
pub struct TypeResolver<'a> {
    source: &'a dyn SymbolSource,
}

impl<'a> TypeResolver<'a> {
    /// Create a resolver over `source`.
    pub fn new(source: &'a dyn SymbolSource) -> Self {
        Self { source }
    }

    /// Resolve the declared type of `identifier`.
    ///
    /// Each value category contributes the record's declared type or, absent
    /// that, its return type. Bracket arrays are already normalized by
    /// [`TypeTag`] parsing.
    pub fn resolve(&self, identifier: &str) -> Result<ResolveResult> {
        let identifier = identifier.trim();
        if !is_identifier_path(identifier) {
            trace!("[TYPE] '{}' is not an identifier path; treating as opaque", identifier);
            return Ok(ResolveResult::NotFound);
        }

        let mut found: Vec<TypeTag> = Vec::new();
        for &category in Category::VALUES {
            let Some(record) = self.source.get(&[category], identifier)? else {
                continue;
            };
            if let Some(ty) = record.declared_type() {
                if !found.contains(ty) {
                    found.push(ty.clone());
                }
            }
        }

        let result = match found.len() {
            0 => ResolveResult::NotFound,
            1 => ResolveResult::Found(found.remove(0)),
            _ => ResolveResult::Ambiguous(found),
        };
        trace!("[TYPE] '{}' -> {:?}", identifier, result);
        Ok(result)
    }

    /// Resolve to a type, collapsing ambiguity into `None`.
    pub fn resolve_type(&self, identifier: &str) -> Result<Option<TypeTag>> {
        Ok(self.resolve(identifier)?.into_ty())
    }

    /// Whether `ty` names a user-defined type declared in the index.
    pub fn is_user_type(&self, ty: &TypeTag) -> Result<bool> {
        match ty.name() {
            Some(name) => Ok(self.source.get(&[Category::Types], name)?.is_some()),
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::{DocRecord, SymbolIndex};

    fn index() -> SymbolIndex {
        SymbolIndex::new()
            .with(Category::Variables, DocRecord::variable("myArray", Some("float[]")))
            .with(Category::Variables, DocRecord::variable("pt", Some("UDT_Point")))
            .with(Category::Variables, DocRecord::function("lastBar", vec![], Some("int")))
            .with(Category::Variables, DocRecord::variable("untyped", None))
            .with(Category::Variables, DocRecord::variable("dup", Some("int")))
            .with(Category::Fields, DocRecord::field("dup", Some("string")))
            .with(Category::Fields, DocRecord::field("pt.x", Some("float")))
            .with(Category::Types, DocRecord::user_type("UDT_Point", vec![]))
    }

    #[test]
    fn test_resolve_normalizes_brackets() {
        let index = index();
        let resolver = TypeResolver::new(&index);

        let ty = resolver.resolve_type("myArray").unwrap().unwrap();
        assert_eq!(ty.to_string(), "array<float>");
    }

    #[test]
    fn test_resolve_falls_back_to_return_type() {
        let index = index();
        let resolver = TypeResolver::new(&index);

        assert_eq!(resolver.resolve_type("lastBar").unwrap().unwrap().to_string(), "int");
    }

    #[test]
    fn test_resolve_field_path() {
        let index = index();
        let resolver = TypeResolver::new(&index);

        assert_eq!(resolver.resolve_type("pt.x").unwrap().unwrap().to_string(), "float");
    }

    #[test]
    fn test_unknown_untyped_and_opaque() {
        let index = index();
        let resolver = TypeResolver::new(&index);

        assert_eq!(resolver.resolve("nothing").unwrap(), ResolveResult::NotFound);
        assert_eq!(resolver.resolve("untyped").unwrap(), ResolveResult::NotFound);
        assert_eq!(resolver.resolve("f(x).y").unwrap(), ResolveResult::NotFound);
        assert_eq!(resolver.resolve("").unwrap(), ResolveResult::NotFound);
    }

    #[test]
    fn test_conflicting_declarations_are_ambiguous() {
        let index = index();
        let resolver = TypeResolver::new(&index);

        let result = resolver.resolve("dup").unwrap();
        assert!(result.is_ambiguous());
        assert!(resolver.resolve_type("dup").unwrap().is_none());
    }

    #[test]
    fn test_is_user_type() {
        let index = index();
        let resolver = TypeResolver::new(&index);

        assert!(resolver.is_user_type(&TypeTag::named("UDT_Point")).unwrap());
        assert!(!resolver.is_user_type(&TypeTag::named("int")).unwrap());
        assert!(!resolver.is_user_type(&TypeTag::parse("int[]").unwrap()).unwrap());
    }
}
