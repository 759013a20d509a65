//! Cross-page selection bookkeeping.
//!
//! The table only ever reports which of the *visible* rows are checked. The
//! tracker folds those reports into one accumulator that spans every page,
//! so a page's rows are diffed against the accumulator on each change while
//! ids from other pages are left alone.

use std::collections::BTreeSet;

use tracing::debug;

use crate::models::ArtworkId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionTracker {
    set: BTreeSet<ArtworkId>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a new selection for the visible page.
    ///
    /// Every visible id in `chosen` ends up selected and every visible id
    /// missing from `chosen` ends up deselected. Ids in `chosen` that are not
    /// on the visible page are ignored.
    pub fn reconcile(&mut self, visible: &[ArtworkId], chosen: &[ArtworkId]) {
        let mut added = 0usize;
        let mut removed = 0usize;
        for id in visible {
            if chosen.contains(id) {
                if self.set.insert(*id) {
                    added += 1;
                }
            } else if self.set.remove(id) {
                removed += 1;
            }
        }
        let ignored = chosen.iter().filter(|id| !visible.contains(id)).count();
        debug!(added, removed, ignored, total = self.set.len(), "selection reconciled");
    }

    /// Flips one visible row. Ids not on the visible page are a no-op.
    pub fn toggle(&mut self, visible: &[ArtworkId], id: ArtworkId) {
        if !visible.contains(&id) {
            return;
        }
        let mut chosen = self.visible_selection(visible);
        if let Some(pos) = chosen.iter().position(|c| *c == id) {
            chosen.remove(pos);
        } else {
            chosen.push(id);
        }
        self.reconcile(visible, &chosen);
    }

    /// Select all / deselect all, scoped to the visible page.
    pub fn toggle_all(&mut self, visible: &[ArtworkId]) {
        if self.all_selected(visible) {
            self.reconcile(visible, &[]);
        } else {
            self.reconcile(visible, visible);
        }
    }

    /// Selects the first `n` visible rows and deselects the rest of the page.
    pub fn select_leading(&mut self, visible: &[ArtworkId], n: usize) {
        let n = n.min(visible.len());
        self.reconcile(visible, &visible[..n]);
    }

    /// The visible ids that are selected, in page order.
    pub fn visible_selection(&self, visible: &[ArtworkId]) -> Vec<ArtworkId> {
        visible
            .iter()
            .copied()
            .filter(|id| self.set.contains(id))
            .collect()
    }

    /// True when the page is non-empty and every row on it is selected.
    pub fn all_selected(&self, visible: &[ArtworkId]) -> bool {
        !visible.is_empty() && visible.iter().all(|id| self.set.contains(id))
    }

    pub fn contains(&self, id: ArtworkId) -> bool {
        self.set.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Selected ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = ArtworkId> + '_ {
        self.set.iter().copied()
    }
}
