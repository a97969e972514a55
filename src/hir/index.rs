//! Symbol index — the category-partitioned documentation store.
//!
//! The resolver only ever reads the index, through the [`SymbolSource`]
//! trait. Editors that keep documentation elsewhere implement the trait;
//! [`SymbolIndex`] is the in-memory implementation used by the loader and
//! by tests.
//!
//! # Key Data Structures
//!
//! - [`Category`] - The partitions records live in
//! - [`CategoryMap`] - An ordered view over one or more categories
//! - [`SymbolIndex`] - One insertion-ordered map per category, plus aliases

use std::sync::Arc;

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::error::Result;
use super::symbols::{Alias, DocRecord};

/// A partition of the symbol index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Functions,
    Methods,
    Variables,
    Constants,
    /// User-defined type declarations
    Types,
    /// User-defined type fields
    Fields,
}

impl Category {
    /// All categories, in storage order.
    pub const ALL: [Category; 6] = [
        Category::Functions,
        Category::Methods,
        Category::Variables,
        Category::Constants,
        Category::Types,
        Category::Fields,
    ];

    /// Categories scanned by free-symbol completion.
    pub const FREE_SYMBOLS: &'static [Category] = &[
        Category::Functions,
        Category::Variables,
        Category::Constants,
        Category::Types,
        Category::Fields,
    ];

    /// Categories holding invocable symbols.
    pub const CALLABLES: &'static [Category] = &[Category::Functions, Category::Methods];

    /// Categories holding typed values an identifier can name.
    pub const VALUES: &'static [Category] = &[Category::Variables, Category::Fields];

    /// Get the category's name as used in documentation bundles.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Functions => "functions",
            Category::Methods => "methods",
            Category::Variables => "variables",
            Category::Constants => "constants",
            Category::Types => "types",
            Category::Fields => "fields",
        }
    }

    /// Parse a category name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// Ordered mapping from qualified name to record.
pub type CategoryMap = IndexMap<SmolStr, Arc<DocRecord>>;

/// Read-only access to a documentation store.
///
/// An `Err` means the store could not answer ("index unavailable"), which
/// callers must be able to tell apart from an empty answer.
pub trait SymbolSource: Send + Sync {
    /// Merge the named categories, in order, into one ordered mapping.
    ///
    /// A key present in several categories keeps its first position and takes
    /// the value from the later category.
    fn category(&self, categories: &[Category]) -> Result<CategoryMap>;

    /// Declared aliases of the analyzed document.
    fn aliases(&self) -> Result<Vec<Alias>>;

    /// Exact-key lookup across categories; later categories win.
    fn get(&self, categories: &[Category], key: &str) -> Result<Option<Arc<DocRecord>>> {
        Ok(self.category(categories)?.get(key).cloned())
    }

    /// Whether `name` is a declared alias.
    fn find_alias(&self, name: &str) -> Result<Option<Alias>> {
        Ok(self.aliases()?.into_iter().find(|alias| alias.name == name))
    }
}

/// In-memory, category-partitioned symbol index.
#[derive(Clone, Debug, Default)]
pub struct SymbolIndex {
    /// One map per [`Category`], indexed by `Category::slot`.
    categories: [CategoryMap; 6],
    aliases: Vec<Alias>,
}

impl SymbolIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record under its qualified name, replacing any record with
    /// the same name in that category.
    pub fn insert(&mut self, category: Category, record: impl Into<Arc<DocRecord>>) {
        let record = record.into();
        self.categories[category.slot()].insert(record.name.clone(), record);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, category: Category, record: DocRecord) -> Self {
        self.insert(category, record);
        self
    }

    /// Declare an alias. Redeclaring a name replaces the earlier alias.
    pub fn add_alias(&mut self, alias: Alias) {
        match self.aliases.iter_mut().find(|a| a.name == alias.name) {
            Some(existing) => *existing = alias,
            None => self.aliases.push(alias),
        }
    }

    /// Builder-style [`add_alias`](Self::add_alias).
    pub fn with_alias(mut self, alias: Alias) -> Self {
        self.add_alias(alias);
        self
    }

    /// Remove a record, preserving the order of the rest.
    pub fn remove(&mut self, category: Category, name: &str) -> Option<Arc<DocRecord>> {
        self.categories[category.slot()].shift_remove(name)
    }

    /// Look up a record in one category.
    pub fn lookup(&self, category: Category, name: &str) -> Option<&Arc<DocRecord>> {
        self.categories[category.slot()].get(name)
    }

    /// Iterate over one category in insertion order.
    pub fn iter(&self, category: Category) -> impl Iterator<Item = (&SmolStr, &Arc<DocRecord>)> {
        self.categories[category.slot()].iter()
    }

    /// Declared aliases.
    pub fn alias_list(&self) -> &[Alias] {
        &self.aliases
    }

    /// Total number of records.
    pub fn len(&self) -> usize {
        self.categories.iter().map(|c| c.len()).sum()
    }

    /// Check if the index holds no records.
    pub fn is_empty(&self) -> bool {
        self.categories.iter().all(|c| c.is_empty())
    }
}

impl SymbolSource for SymbolIndex {
    fn category(&self, categories: &[Category]) -> Result<CategoryMap> {
        let mut merged = CategoryMap::new();
        for &category in categories {
            for (name, record) in &self.categories[category.slot()] {
                merged.insert(name.clone(), Arc::clone(record));
            }
        }
        Ok(merged)
    }

    fn aliases(&self) -> Result<Vec<Alias>> {
        Ok(self.aliases.clone())
    }

    fn get(&self, categories: &[Category], key: &str) -> Result<Option<Arc<DocRecord>>> {
        Ok(categories
            .iter()
            .rev()
            .find_map(|&category| self.lookup(category, key))
            .cloned())
    }

    fn find_alias(&self, name: &str) -> Result<Option<Alias>> {
        Ok(self.aliases.iter().find(|alias| alias.name == name).cloned())
    }
}
