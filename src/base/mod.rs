//! Foundation types for the pinelens toolchain.
//!
//! This module provides fundamental types used throughout the resolver:
//! - [`DocumentId`] - Per-document identifiers
//! - [`TextRange`], [`TextSize`] - Source positions
//! - [`LineCol`], [`LineIndex`] - Line/column conversion and line access
//! - [`ident`] - Identifier character classes
//!
//! This module has NO dependencies on other pinelens modules.

mod document_id;
pub mod ident;
mod span;

pub use document_id::DocumentId;
pub use span::{LineCol, LineIndex, TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
