//! Hover lookup for a dotted key.

use std::sync::Arc;

use smol_str::SmolStr;
use tracing::debug;

use crate::hir::{DocRecord, Result, SymbolSource};

use super::config::ResolverConfig;
use super::methods::MethodResolver;
use super::text_utils::split_namespace;

/// What a hover resolved to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoverResult {
    /// The record to render. For receiver calls this is a patched copy whose
    /// first argument is named after the receiver.
    pub record: Arc<DocRecord>,
    /// The function name, or the full key for user-type methods
    pub function_name: SmolStr,
    /// The receiver text, absent for bare names
    pub namespace: Option<SmolStr>,
}

/// Resolve the hover for `key` (`close`, `myArray.push`, `a.b.method`).
///
/// The key is split at its last dot. Source failures propagate; a miss is
/// `Ok(None)`.
pub fn hover(source: &dyn SymbolSource, config: &ResolverConfig, key: &str) -> Result<Option<HoverResult>> {
    let key = key.trim();
    if key.is_empty() {
        return Ok(None);
    }
    let (namespace, function) = split_namespace(key);
    debug!("[HOVER] key '{}' -> namespace '{}', function '{}'", key, namespace, function);
    MethodResolver::new(source, config).resolve_method(namespace, function)
}
