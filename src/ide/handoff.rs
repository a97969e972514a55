//! Argument-slot handoff from signature help to the next completion.
//!
//! When the user picks an overload in signature help, the editor arms the
//! document's slot with per-argument candidates (enum members and the
//! like). The next completion request on that document consumes them
//! instead of running ordinary resolution.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::Mutex;
use tracing::debug;

use crate::hir::DocRecord;

/// Candidates waiting for the next completion request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PendingHandoff {
    /// The argument the cursor is on
    pub active_argument: usize,
    /// Candidates per argument position
    pub by_argument: IndexMap<usize, Vec<Arc<DocRecord>>>,
}

/// A single-value slot, one per document.
#[derive(Debug, Default)]
pub struct HandoffSlot {
    pending: Mutex<Option<PendingHandoff>>,
}

impl HandoffSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the slot, replacing anything pending.
    pub fn set(&self, active_argument: usize, by_argument: IndexMap<usize, Vec<Arc<DocRecord>>>) {
        debug!(
            "[HANDOFF] armed for argument {} ({} positions)",
            active_argument,
            by_argument.len()
        );
        *self.pending.lock() = Some(PendingHandoff {
            active_argument,
            by_argument,
        });
    }

    /// Take the active argument's candidates and disarm the slot.
    ///
    /// Reading and clearing happen under one lock, so a pending value is
    /// served at most once. Returns an empty list when nothing is armed.
    pub fn consume_if_flagged(&self) -> Vec<Arc<DocRecord>> {
        let Some(mut pending) = self.pending.lock().take() else {
            return Vec::new();
        };
        let records = pending
            .by_argument
            .swap_remove(&pending.active_argument)
            .unwrap_or_default();
        debug!(
            "[HANDOFF] consumed {} candidates for argument {}",
            records.len(),
            pending.active_argument
        );
        records
    }

    /// Drop any pending value.
    pub fn clear(&self) {
        if self.pending.lock().take().is_some() {
            debug!("[HANDOFF] cleared");
        }
    }

    pub fn is_armed(&self) -> bool {
        self.pending.lock().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> Arc<DocRecord> {
        DocRecord::constant(name, Some("const string")).shared()
    }

    #[test]
    fn test_consume_once() {
        let slot = HandoffSlot::new();
        let (a, b) = (record("shape.circle"), record("shape.square"));
        slot.set(0, IndexMap::from([(0, vec![a.clone(), b.clone()])]));
        assert!(slot.is_armed());

        assert_eq!(slot.consume_if_flagged(), vec![a, b]);
        assert!(slot.consume_if_flagged().is_empty());
        assert!(!slot.is_armed());
    }

    #[test]
    fn test_inactive_argument_consumes_empty() {
        let slot = HandoffSlot::new();
        slot.set(2, IndexMap::from([(0, vec![record("a")])]));

        assert!(slot.consume_if_flagged().is_empty());
        assert!(!slot.is_armed());
    }

    #[test]
    fn test_set_overwrites_and_clear() {
        let slot = HandoffSlot::new();
        slot.set(0, IndexMap::from([(0, vec![record("old")])]));
        slot.set(1, IndexMap::from([(1, vec![record("new")])]));
        assert_eq!(slot.consume_if_flagged()[0].name, "new");

        slot.set(0, IndexMap::from([(0, vec![record("x")])]));
        slot.clear();
        assert!(slot.consume_if_flagged().is_empty());
    }

    #[test]
    fn test_concurrent_consumers_see_one_value() {
        let slot = Arc::new(HandoffSlot::new());
        slot.set(0, IndexMap::from([(0, vec![record("only")])]));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let slot = Arc::clone(&slot);
                std::thread::spawn(move || slot.consume_if_flagged().len())
            })
            .collect();
        let served: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(served, 1);
    }
}
