//! `AnalysisHost` and `Analysis` — the entry point for editor integrations.
//!
//! The host owns the symbol source, the resolver config, and one handoff
//! session per open document. [`AnalysisHost::analysis`] hands out a cheap
//! borrowed view that answers requests.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::base::{DocumentId, LineCol, LineIndex};
use crate::hir::{Result, SymbolSource};

use super::completion::{CompletionList, completions};
use super::config::ResolverConfig;
use super::handoff::HandoffSlot;
use super::hover::{HoverResult, hover};
use super::text_utils::extract_qualified_name_at_cursor;

/// Owns the state shared by requests.
pub struct AnalysisHost {
    source: Arc<dyn SymbolSource>,
    config: ResolverConfig,
    sessions: RwLock<FxHashMap<DocumentId, Arc<HandoffSlot>>>,
}

impl AnalysisHost {
    /// Create a host over `source` with the default config.
    pub fn new(source: Arc<dyn SymbolSource>) -> Self {
        Self::with_config(source, ResolverConfig::default())
    }

    pub fn with_config(source: Arc<dyn SymbolSource>, config: ResolverConfig) -> Self {
        Self {
            source,
            config,
            sessions: RwLock::new(FxHashMap::default()),
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Replace the symbol source, e.g. after the documentation bundle was
    /// reloaded. Pending handoffs are dropped with it.
    pub fn set_source(&mut self, source: Arc<dyn SymbolSource>) {
        self.source = source;
        self.sessions.get_mut().clear();
    }

    /// The handoff slot of `doc`, created on first use.
    pub fn session(&self, doc: DocumentId) -> Arc<HandoffSlot> {
        if let Some(slot) = self.sessions.read().get(&doc) {
            return Arc::clone(slot);
        }
        Arc::clone(self.sessions.write().entry(doc).or_default())
    }

    /// Forget the session of a closed document.
    pub fn close_document(&self, doc: DocumentId) {
        if self.sessions.write().remove(&doc).is_some() {
            debug!("[HOST] closed {}", doc);
        }
    }

    /// Number of documents with a live session.
    pub fn session_count(&self) -> usize {
        self.sessions.read().len()
    }

    /// A view for answering requests.
    pub fn analysis(&self) -> Analysis<'_> {
        Analysis { host: self }
    }
}

/// A borrowed view of an [`AnalysisHost`].
#[derive(Clone, Copy)]
pub struct Analysis<'a> {
    host: &'a AnalysisHost,
}

impl<'a> Analysis<'a> {
    pub fn source(&self) -> &'a dyn SymbolSource {
        self.host.source.as_ref()
    }

    /// Completions at `position` in `doc`, whose current text is `text`.
    pub fn completions(
        &self,
        doc: DocumentId,
        text: &str,
        position: LineCol,
        cancel: Option<&CancellationToken>,
    ) -> CompletionList {
        let slot = self.host.session(doc);
        completions(self.source(), &self.host.config, &slot, text, position, cancel)
    }

    /// Hover for a dotted key.
    pub fn hover(&self, key: &str) -> Result<Option<HoverResult>> {
        hover(self.source(), &self.host.config, key)
    }

    /// Hover for the dotted name under `position` in `text`.
    pub fn hover_at(&self, text: &str, position: LineCol) -> Result<Option<HoverResult>> {
        let Some(line) = LineIndex::new(text).line_text(text, position.line) else {
            return Ok(None);
        };
        match extract_qualified_name_at_cursor(line, position.col as usize) {
            Some(key) => self.hover(key),
            None => Ok(None),
        }
    }

    /// The handoff slot signature help arms for `doc`.
    pub fn handoff(&self, doc: DocumentId) -> Arc<HandoffSlot> {
        self.host.session(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::{Category, DocRecord, SymbolIndex};
    use indexmap::IndexMap;

    fn host() -> AnalysisHost {
        let index = SymbolIndex::new()
            .with(Category::Functions, DocRecord::function("average", vec![], Some("float")))
            .with(Category::Variables, DocRecord::variable("close", Some("series float")));
        AnalysisHost::new(Arc::new(index))
    }

    #[test]
    fn test_sessions_are_per_document() {
        let host = host();
        let analysis = host.analysis();
        let (a, b) = (DocumentId::new(1), DocumentId::new(2));

        let value = DocRecord::constant("shape.circle", None).shared();
        analysis.handoff(a).set(0, IndexMap::from([(0, vec![value])]));

        let other = analysis.completions(b, "av", LineCol::new(0, 2), None);
        assert!(other.items.iter().all(|item| !item.is_argument_slot));
        assert!(analysis.handoff(a).is_armed());

        let mine = analysis.completions(a, "av", LineCol::new(0, 2), None);
        assert!(mine.items[0].is_argument_slot);
        assert_eq!(host.session_count(), 2);

        host.close_document(a);
        assert_eq!(host.session_count(), 1);
    }

    #[test]
    fn test_hover_at_cursor() {
        let host = host();
        let text = "x = 1\ny = average(close)";
        let hit = host.analysis().hover_at(text, LineCol::new(1, 6)).unwrap().unwrap();
        assert_eq!(hit.function_name, "average");

        let none = host.analysis().hover_at(text, LineCol::new(1, 2)).unwrap();
        assert!(none.is_none());
    }
}
