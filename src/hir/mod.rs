//! Semantic model — documentation records, types, and the symbol index.
//!
//! Everything in this module is read-only at request time. The index is
//! built once (by the editor integration or by [`crate::project`]) and then
//! queried through [`SymbolSource`].

mod error;
mod index;
mod resolve;
mod symbols;
mod ty;

pub use error::{ResolveError, Result};
pub use index::{Category, CategoryMap, SymbolIndex, SymbolSource};
pub use resolve::{ResolveResult, TypeResolver};
pub use symbols::{
    Alias, AliasKind, Arg, Binding, DocRecord, RecordKind, Signature, SymbolKind, TypeDecl,
};
pub use ty::{ContainerClass, TypeKind, TypeTag, compatible, normalize};
