//! Reference Registry - Active-consumer counts per stylesheet.
//!
//! Tracks how many mounted consumers currently reference each stylesheet id:
//! - Absent id means count 0
//! - An id is present iff its count is > 0
//! - Decrements floor at 0, so unbalanced removals never go negative
//!
//! The counter is a cheap handle; clones share the same map.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::{trace, warn};

use crate::types::StyleSheetId;

// =============================================================================
// Reference Counter
// =============================================================================

/// Shared `StyleSheetId → count` map.
#[derive(Debug, Clone, Default)]
pub struct ReferenceCounter {
    counts: Rc<RefCell<HashMap<StyleSheetId, usize>>>,
}

impl ReferenceCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current count for `id`, 0 if absent.
    pub fn count(&self, id: StyleSheetId) -> usize {
        self.counts.borrow().get(&id).copied().unwrap_or(0)
    }

    /// Increment the count for `id` and return the new value (always >= 1).
    pub fn add_reference(&self, id: StyleSheetId) -> usize {
        let mut counts = self.counts.borrow_mut();
        let count = counts.entry(id).or_insert(0);
        *count += 1;
        trace!(target: "spark_style::engine", "{id}: {} -> {}", *count - 1, *count);
        *count
    }

    /// Decrement the count for `id` and return the new value.
    ///
    /// A result of 0 deletes the entry. Removing an absent id yields 0.
    pub fn remove_reference(&self, id: StyleSheetId) -> usize {
        let mut counts = self.counts.borrow_mut();
        let Some(current) = counts.get(&id).copied() else {
            warn!(target: "spark_style::engine", "{id}: reference removed without a matching add");
            return 0;
        };

        let next = current.saturating_sub(1);
        if next > 0 {
            counts.insert(id, next);
        } else {
            counts.remove(&id);
        }
        trace!(target: "spark_style::engine", "{id}: {current} -> {next}");
        next
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Number of ids with at least one active consumer.
    pub fn len(&self) -> usize {
        self.counts.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.borrow().is_empty()
    }

    /// Ids with at least one active consumer, sorted.
    pub fn active_ids(&self) -> Vec<StyleSheetId> {
        let mut ids: Vec<_> = self.counts.borrow().keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Drop every count (for testing).
    pub fn clear(&self) {
        self.counts.borrow_mut().clear();
    }
}
