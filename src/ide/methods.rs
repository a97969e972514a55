//! Method resolution: matching `receiver.member` against typed methods.
//!
//! Two entry points share one resolver:
//!
//! - [`MethodResolver::resolve_methods`] (completion) returns every method
//!   whose name matches the typed member and whose declared receiver type is
//!   compatible with the receiver's inferred type.
//! - [`MethodResolver::resolve_method`] (hover) finds the single record a
//!   dotted key refers to, walking the lookup states below.
//!
//! ```text
//! NoDot ──────────────► bare record, unpatched
//!   │ (has namespace)
//!   ▼
//! UserTypeLookup ─────► `<UserType>.fn`, unpatched
//!   │ (miss)
//!   ▼
//! AliasExpansion ─────► typed prefix → `*.fn` → `alias.fn`... → `fn`
//!                       first hit, patched with the receiver
//! ```

use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::hir::{
    Alias, AliasKind, Category, DocRecord, ResolveError, Result, SymbolSource, TypeResolver,
    TypeTag, compatible,
};

use super::config::ResolverConfig;
use super::hover::HoverResult;
use super::matcher::NameMatcher;

/// Methods accepted for a `receiver.member` completion.
#[derive(Clone, Debug, Default)]
pub struct MethodCandidates {
    /// Matches in index order
    pub records: Vec<Arc<DocRecord>>,
    /// Records skipped because they break the index contract
    pub errors: Vec<ResolveError>,
}

impl MethodCandidates {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Resolves methods against a symbol source.
#[derive(Clone, Copy)]
pub struct MethodResolver<'a> {
    source: &'a dyn SymbolSource,
    config: &'a ResolverConfig,
    matcher: NameMatcher,
}

impl<'a> MethodResolver<'a> {
    pub fn new(source: &'a dyn SymbolSource, config: &'a ResolverConfig) -> Self {
        Self {
            source,
            config,
            matcher: NameMatcher::from_config(config),
        }
    }

    fn types(&self) -> TypeResolver<'a> {
        TypeResolver::new(self.source)
    }

    // ========================================================================
    // Completion
    // ========================================================================

    /// Methods callable on `namespace` whose name matches `member`.
    ///
    /// An empty or untyped namespace yields no candidates, as does a
    /// namespace alias (an import alias is never a receiver). A method
    /// record without a derivable receiver type is skipped and reported in
    /// [`MethodCandidates::errors`].
    pub fn resolve_methods(&self, namespace: &str, member: &str) -> Result<MethodCandidates> {
        let mut out = MethodCandidates::default();
        let namespace = namespace.trim();
        if namespace.is_empty() {
            return Ok(out);
        }

        let alias = self.source.find_alias(namespace)?;
        if alias.as_ref().is_some_and(|a| a.kind == AliasKind::Namespace) {
            debug!("[METHOD] '{}' is a namespace alias, not a receiver", namespace);
            return Ok(out);
        }

        let Some(receiver) = self.receiver_type(namespace, alias.as_ref())? else {
            debug!("[METHOD] receiver '{}' has no known type", namespace);
            return Ok(out);
        };

        for (key, record) in self.source.category(&[Category::Methods])? {
            if !record.is_method() || self.config.is_wildcard(&key) {
                continue;
            }
            if !self.matcher.matches_member(namespace, member, &record.name) {
                continue;
            }
            let Some(declared) = record.receiver_type(self.config.wildcard_prefix) else {
                warn!("[METHOD] skipping '{}': no receiver type", record.name);
                out.errors.push(ResolveError::MissingReceiver {
                    name: record.name.clone(),
                });
                continue;
            };
            if !compatible(&receiver, &declared) {
                trace!("[METHOD] '{}' wants {}, receiver is {}", record.name, declared, receiver);
                continue;
            }
            out.records.push(record);
        }

        debug!(
            "[METHOD] {}.{} ({}) -> {} candidates",
            namespace,
            member,
            receiver,
            out.records.len()
        );
        Ok(out)
    }

    /// The receiver's type: declared on the identifier itself or, for an
    /// instance alias, taken from the alias target.
    fn receiver_type(&self, namespace: &str, alias: Option<&Alias>) -> Result<Option<TypeTag>> {
        if let Some(ty) = self.types().resolve_type(namespace)? {
            return Ok(Some(ty));
        }
        Ok(alias
            .and_then(|a| a.target.as_deref())
            .and_then(TypeTag::parse))
    }

    // ========================================================================
    // Hover
    // ========================================================================

    /// The record a hover over `namespace.function` refers to.
    ///
    /// Returns `Ok(None)` when nothing matches. Errors from the source are
    /// propagated.
    pub fn resolve_method(&self, namespace: &str, function: &str) -> Result<Option<HoverResult>> {
        if function.is_empty() {
            return Ok(None);
        }
        if namespace.is_empty() {
            return self.resolve_bare(function);
        }

        let receiver = self.types().resolve_type(namespace)?;

        if let Some(ty) = &receiver {
            if let Some(hit) = self.resolve_user_type_method(namespace, ty, function)? {
                return Ok(Some(hit));
            }
        }

        let Some(record) = self.expand_aliases(receiver.as_ref(), function)? else {
            debug!("[HOVER] {}.{}: no match", namespace, function);
            return Ok(None);
        };
        Ok(Some(HoverResult {
            record: Arc::new(record.with_receiver_arg(namespace)),
            function_name: function.into(),
            namespace: Some(namespace.into()),
        }))
    }

    /// NoDot: the bare name, callables first.
    fn resolve_bare(&self, name: &str) -> Result<Option<HoverResult>> {
        for &category in &Category::ALL {
            if let Some(record) = self.source.get(&[category], name)? {
                debug!("[HOVER] '{}' found in {}", name, category.as_str());
                return Ok(Some(HoverResult {
                    record,
                    function_name: name.into(),
                    namespace: None,
                }));
            }
        }
        Ok(None)
    }

    /// UserTypeLookup: methods registered as `<UserType>.function`.
    fn resolve_user_type_method(
        &self,
        namespace: &str,
        ty: &TypeTag,
        function: &str,
    ) -> Result<Option<HoverResult>> {
        if !self.types().is_user_type(ty)? {
            return Ok(None);
        }
        let Some(type_name) = ty.name() else {
            return Ok(None);
        };

        let key = format!("{type_name}.{function}");
        let Some(record) = self.source.get(Category::CALLABLES, &key)? else {
            trace!("[HOVER] user type lookup '{}' missed", key);
            return Ok(None);
        };
        debug!("[HOVER] '{}.{}' resolved via user type {}", namespace, function, type_name);
        Ok(Some(HoverResult {
            record,
            function_name: key.into(),
            namespace: Some(namespace.into()),
        }))
    }

    /// AliasExpansion: typed prefix, then the wildcard bucket, then the
    /// alias candidates with the bare name last.
    fn expand_aliases(&self, receiver: Option<&TypeTag>, function: &str) -> Result<Option<Arc<DocRecord>>> {
        if let Some(ty) = receiver {
            for prefix in ty.lookup_prefixes() {
                let key = format!("{prefix}.{function}");
                if let Some(record) = self.source.get(Category::CALLABLES, &key)? {
                    debug!("[HOVER] typed lookup hit '{}'", key);
                    return Ok(Some(record));
                }
            }
        }

        let wildcard = self.config.wildcard_key(function);
        if let Some(record) = self.source.get(&[Category::Methods], &wildcard)? {
            debug!("[HOVER] wildcard lookup hit '{}'", wildcard);
            return Ok(Some(record));
        }

        let aliases = self.source.aliases()?;
        for name in generate_candidate_names(&aliases, function) {
            if let Some(record) = self.source.get(Category::CALLABLES, &name)? {
                debug!("[HOVER] alias lookup hit '{}'", name);
                return Ok(Some(record));
            }
        }
        Ok(None)
    }
}

/// Names tried during alias expansion: `alias.function` for every declared
/// alias in declaration order, then the bare `function`.
pub fn generate_candidate_names(aliases: &[Alias], function: &str) -> Vec<String> {
    aliases
        .iter()
        .map(|alias| format!("{}.{}", alias.name, function))
        .chain(std::iter::once(function.to_string()))
        .collect()
}
