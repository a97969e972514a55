//! # pinelens-base
//!
//! Core library for Pine Script symbol resolution: completion and hover
//! over a pre-built documentation index.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! project → Documentation bundle loading (feature `json`)
//!   ↓
//! ide     → IDE features (completion, hover, argument handoff)
//!   ↓
//! hir     → Semantic model: records, type tags, symbol index
//!   ↓
//! base    → Primitives (DocumentId, LineCol, identifier classes)
//! ```

/// Foundation types: DocumentId, positions, identifier classes
pub mod base;

/// Semantic model: documentation records, type tags, the symbol index
pub mod hir;

/// IDE features: completion, hover, argument-slot handoff
pub mod ide;

/// Loading documentation bundles and resolver config from JSON
#[cfg(feature = "json")]
pub mod project;

// Re-export foundation types
pub use base::{DocumentId, LineCol, LineIndex, TextRange, TextSize};
pub use hir::{Category, DocRecord, SymbolIndex, SymbolSource, TypeTag};
pub use ide::{AnalysisHost, ResolverConfig};
