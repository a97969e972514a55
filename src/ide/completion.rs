//! Completion candidates for the fragment before the cursor.
//!
//! A request runs in one of two modes:
//!
//! 1. **Argument slot**: the document's [`HandoffSlot`] was armed by
//!    signature help. Its candidates replace ordinary resolution.
//! 2. **Ordinary**: the trailing `[\w.]+` fragment is matched against free
//!    symbols (functions, variables, constants, types, fields) and, when it
//!    contains a dot, against methods of the receiver's type. The two
//!    passes are concatenated, free symbols first.
//!
//! Failures never abort a request. A pass that cannot read the index
//! contributes nothing and its error lands in [`CompletionList::errors`].

use std::sync::Arc;

use smol_str::SmolStr;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use crate::base::{LineCol, LineIndex};
use crate::hir::{Category, DocRecord, ResolveError, SymbolKind, SymbolSource};

use super::config::ResolverConfig;
use super::handoff::HandoffSlot;
use super::matcher::NameMatcher;
use super::methods::MethodResolver;
use super::text_utils::{argument_start, extract_fragment, fragment_start, split_namespace};

/// Presentation-neutral kind of a completion candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompletionKind {
    Function,
    Method,
    Variable,
    Constant,
    Type,
    Field,
    Parameter,
}

impl From<SymbolKind> for CompletionKind {
    fn from(kind: SymbolKind) -> Self {
        match kind {
            SymbolKind::Function => CompletionKind::Function,
            SymbolKind::Method => CompletionKind::Method,
            SymbolKind::Variable => CompletionKind::Variable,
            SymbolKind::Constant => CompletionKind::Constant,
            SymbolKind::Type => CompletionKind::Type,
            SymbolKind::Field => CompletionKind::Field,
            SymbolKind::Parameter => CompletionKind::Parameter,
        }
    }
}

/// One completion candidate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionCandidate {
    /// Text the candidate is shown and inserted as
    pub display_name: SmolStr,
    /// Receiver text for method candidates
    pub namespace: Option<SmolStr>,
    pub record: Arc<DocRecord>,
    /// Offered for an argument position rather than as a bare name
    pub is_argument_slot: bool,
    pub kind: CompletionKind,
    /// Position in the producer's order, for argument-slot candidates
    pub sort_index: Option<u32>,
}

impl CompletionCandidate {
    fn free(record: Arc<DocRecord>) -> Self {
        Self {
            display_name: record.name.clone(),
            namespace: None,
            kind: record.symbol_kind().into(),
            record,
            is_argument_slot: false,
            sort_index: None,
        }
    }

    fn method(namespace: &str, record: Arc<DocRecord>) -> Self {
        Self {
            display_name: SmolStr::new(format!("{}.{}", namespace, record.member_name())),
            namespace: Some(SmolStr::new(namespace)),
            kind: CompletionKind::Method,
            record,
            is_argument_slot: false,
            sort_index: None,
        }
    }

    fn argument(index: usize, record: Arc<DocRecord>) -> Self {
        Self {
            display_name: record.name.clone(),
            namespace: None,
            kind: record.symbol_kind().into(),
            record,
            is_argument_slot: true,
            sort_index: Some(slot_rank(index)),
        }
    }

    /// The display label; callables read as `name()`.
    pub fn label(&self) -> String {
        if self.is_callable() {
            format!("{}()", self.display_name)
        } else {
            self.display_name.to_string()
        }
    }

    /// Whether accepting this candidate should re-open parameter hints.
    pub fn triggers_signature_help(&self) -> bool {
        !self.is_argument_slot && self.is_callable()
    }

    fn is_callable(&self) -> bool {
        self.record.symbol_kind().is_callable()
    }
}

/// The answer to a completion request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionList {
    pub items: Vec<CompletionCandidate>,
    /// Where inserted text starts replacing on the cursor's line
    pub replace_start: LineCol,
    /// The editor should re-query as the user keeps typing
    pub is_incomplete: bool,
    /// Failures that were degraded to "no candidates"
    pub errors: Vec<ResolveError>,
}

impl CompletionList {
    /// An empty, complete list anchored at `position`.
    pub fn empty(position: LineCol) -> Self {
        Self {
            items: Vec::new(),
            replace_start: position,
            is_incomplete: false,
            errors: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Compute completions at `position` in `text`.
///
/// A pending handoff in `slot` is consumed by every request and served on
/// any existing line, including blank continuation lines of a call.
/// Blank, comment and import lines get no ordinary candidates. A request
/// whose token is cancelled clears the slot and returns an empty list.
pub fn completions(
    source: &dyn SymbolSource,
    config: &ResolverConfig,
    slot: &HandoffSlot,
    text: &str,
    position: LineCol,
    cancel: Option<&CancellationToken>,
) -> CompletionList {
    let cancelled = || cancel.is_some_and(CancellationToken::is_cancelled);
    if cancelled() {
        slot.clear();
        return CompletionList::empty(position);
    }

    let handoff = slot.consume_if_flagged();

    let index = LineIndex::new(text);
    let (Some(line), Some(prefix)) = (
        index.line_text(text, position.line),
        index.text_before(text, position),
    ) else {
        return CompletionList::empty(position);
    };
    if !handoff.is_empty() {
        return argument_completions(handoff, position, prefix);
    }

    if line.trim().is_empty() || config.is_excluded_line(line) {
        trace!("[COMPLETION] line {} is excluded", position.line);
        return CompletionList::empty(position);
    }

    let Some(fragment) = extract_fragment(prefix) else {
        return CompletionList::empty(position);
    };

    let mut list = CompletionList {
        items: Vec::new(),
        replace_start: position.with_col(fragment_start(prefix) as u32),
        is_incomplete: true,
        errors: Vec::new(),
    };

    match free_symbol_completions(source, config, fragment) {
        Ok(items) => list.items.extend(items),
        Err(err) => {
            warn!("[COMPLETION] free-symbol pass failed: {}", err);
            list.errors.push(err);
        }
    }

    if cancelled() {
        debug!("[COMPLETION] cancelled after free-symbol pass");
        return CompletionList::empty(position);
    }

    if fragment.contains('.') {
        let (namespace, member) = split_namespace(fragment);
        match MethodResolver::new(source, config).resolve_methods(namespace, member) {
            Ok(found) => {
                list.items.extend(
                    found
                        .records
                        .into_iter()
                        .map(|record| CompletionCandidate::method(namespace, record)),
                );
                list.errors.extend(found.errors);
            }
            Err(err) => {
                warn!("[COMPLETION] method pass failed: {}", err);
                list.errors.push(err);
            }
        }
    }

    debug!(
        "[COMPLETION] '{}' -> {} candidates ({} errors)",
        fragment,
        list.items.len(),
        list.errors.len()
    );
    list
}

/// Free-symbol pass over every category except methods.
fn free_symbol_completions(
    source: &dyn SymbolSource,
    config: &ResolverConfig,
    fragment: &str,
) -> Result<Vec<CompletionCandidate>, ResolveError> {
    let matcher = NameMatcher::from_config(config);
    let symbols = source.category(Category::FREE_SYMBOLS)?;
    Ok(symbols
        .into_iter()
        .filter(|(name, _)| matcher.matches_free(fragment, name))
        .map(|(_, record)| CompletionCandidate::free(record))
        .collect())
}

/// Producer order as a sort key; positions past `u32::MAX` share the last rank.
fn slot_rank(index: usize) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX)
}

fn argument_completions(records: Vec<Arc<DocRecord>>, position: LineCol, prefix: &str) -> CompletionList {
    debug!("[COMPLETION] serving {} argument-slot candidates", records.len());
    CompletionList {
        items: records
            .into_iter()
            .enumerate()
            .map(|(i, record)| CompletionCandidate::argument(i, record))
            .collect(),
        replace_start: position.with_col(argument_start(prefix) as u32),
        is_incomplete: false,
        errors: Vec::new(),
    }
}
