//! Row selection state.
//!
//! Selection is keyed by [`RowId`] so it stays attached to the same logical
//! rows when they are re-sorted or re-fetched.

use std::collections::HashSet;

use crate::model::RowId;

/// ID-based selection state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Currently selected IDs
    selected: HashSet<RowId>,
    /// Anchor for range selection (Shift+click starting point)
    anchor: Option<RowId>,
}

impl Selection {
    /// Create a new empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all selected IDs (sorted for deterministic ordering).
    pub fn selected(&self) -> Vec<RowId> {
        let mut ids: Vec<_> = self.selected.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Check if an ID is selected.
    pub fn is_selected(&self, id: &RowId) -> bool {
        self.selected.contains(id)
    }

    /// Get the number of selected items.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Get the anchor ID for range selection.
    pub fn anchor(&self) -> Option<&RowId> {
        self.anchor.as_ref()
    }

    /// Clear all selection.
    /// Returns the IDs that were deselected.
    pub fn clear(&mut self) -> Vec<RowId> {
        let removed: Vec<_> = self.selected.drain().collect();
        self.anchor = None;
        removed
    }

    /// Select or deselect one ID (row checkbox).
    /// Returns `true` if the selection changed.
    pub fn set(&mut self, id: RowId, selected: bool) -> bool {
        let changed = if selected {
            self.selected.insert(id.clone())
        } else {
            self.selected.remove(&id)
        };
        self.anchor = Some(id);
        changed
    }

    /// Toggle selection of an ID (Ctrl+click behavior).
    /// Returns `true` if the ID is selected afterwards.
    pub fn toggle(&mut self, id: RowId) -> bool {
        let now_selected = !self.selected.contains(&id);
        self.set(id, now_selected);
        now_selected
    }

    /// Replace the selection with exactly the given IDs.
    pub fn replace(&mut self, ids: impl IntoIterator<Item = RowId>) {
        self.selected = ids.into_iter().collect();
        self.anchor = None;
    }

    /// Keep only the IDs for which `keep` returns `true`.
    /// Returns the number of IDs dropped.
    pub fn retain(&mut self, keep: impl FnMut(&RowId) -> bool) -> usize {
        let before = self.selected.len();
        self.selected.retain(keep);
        if self.anchor.as_ref().is_some_and(|anchor| !self.selected.contains(anchor)) {
            self.anchor = None;
        }
        before - self.selected.len()
    }

    /// Range select from anchor to target ID (Shift+click behavior).
    ///
    /// Requires the ordered list of all visible IDs to determine the range.
    /// If `extend` is false, clears selection outside the range first.
    ///
    /// Returns (added, removed) IDs.
    pub fn range_select(
        &mut self,
        target_id: &RowId,
        all_ids_ordered: &[RowId],
        extend: bool,
    ) -> (Vec<RowId>, Vec<RowId>) {
        let anchor_id = self.anchor.clone().unwrap_or_else(|| target_id.clone());

        // Find positions of anchor and target in the ordered list
        let anchor_pos = all_ids_ordered.iter().position(|id| id == &anchor_id);
        let target_pos = all_ids_ordered.iter().position(|id| id == target_id);

        let range_ids: HashSet<RowId> = match (anchor_pos, target_pos) {
            (Some(a), Some(t)) => all_ids_ordered[a.min(t)..=a.max(t)].iter().cloned().collect(),
            // Anchor not visible: select just the target
            _ => HashSet::from([target_id.clone()]),
        };

        let mut removed = Vec::new();
        if !extend {
            removed = self
                .selected
                .iter()
                .filter(|id| !range_ids.contains(*id))
                .cloned()
                .collect();
            for id in &removed {
                self.selected.remove(id);
            }
        }

        let mut added = Vec::new();
        for id in range_ids {
            if self.selected.insert(id.clone()) {
                added.push(id);
            }
        }
        added.sort();
        removed.sort();

        // The anchor stays put so repeated Shift+clicks pivot around it.
        if self.anchor.is_none() {
            self.anchor = Some(target_id.clone());
        }

        (added, removed)
    }
}

/// State of a "select all on this page" header checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectAllState {
    /// No visible row is selected.
    None,
    /// Some, but not all, visible rows are selected.
    Partial,
    /// Every visible row is selected (and there is at least one).
    All,
}

impl SelectAllState {
    /// Computes the header state for the visible rows.
    pub fn of(selection: &Selection, visible: &[RowId]) -> Self {
        let selected = visible.iter().filter(|id| selection.is_selected(id)).count();
        match selected {
            0 => SelectAllState::None,
            n if n == visible.len() => SelectAllState::All,
            _ => SelectAllState::Partial,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(range: std::ops::RangeInclusive<i64>) -> Vec<RowId> {
        range.map(RowId::Num).collect()
    }

    #[test]
    fn test_set_and_toggle() {
        let mut selection = Selection::new();
        assert!(selection.set(RowId::Num(1), true));
        assert!(!selection.set(RowId::Num(1), true));
        assert!(!selection.toggle(RowId::Num(1)));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_range_select_from_anchor() {
        let visible = ids(1..=6);
        let mut selection = Selection::new();
        selection.set(RowId::Num(2), true);

        let (added, removed) = selection.range_select(&RowId::Num(4), &visible, false);
        assert_eq!(added, ids(3..=4));
        assert!(removed.is_empty());
        assert_eq!(selection.selected(), ids(2..=4));

        // Shrinking the range without extend drops what falls outside.
        let (_, removed) = selection.range_select(&RowId::Num(3), &visible, false);
        assert_eq!(removed, ids(4..=4));
        assert_eq!(selection.selected(), ids(2..=3));
    }

    #[test]
    fn test_range_select_without_anchor() {
        let visible = ids(1..=3);
        let mut selection = Selection::new();

        selection.range_select(&RowId::Num(2), &visible, true);
        assert_eq!(selection.selected(), ids(2..=2));
        assert_eq!(selection.anchor(), Some(&RowId::Num(2)));
    }

    #[test]
    fn test_select_all_state() {
        let visible = ids(1..=3);
        let mut selection = Selection::new();
        assert_eq!(SelectAllState::of(&selection, &visible), SelectAllState::None);

        selection.set(RowId::Num(2), true);
        assert_eq!(SelectAllState::of(&selection, &visible), SelectAllState::Partial);

        selection.replace(visible.clone());
        assert_eq!(SelectAllState::of(&selection, &visible), SelectAllState::All);
        assert_eq!(SelectAllState::of(&selection, &[]), SelectAllState::None);
    }
}
