//! List selection widget that keeps items, the selection index and ratatui's
//! `ListState` in sync.

use ratatui::widgets::ListState;

/// A list of items with an optional selection and a synced `ListState`.
///
/// Replacing the items keeps the selection index numerically unchanged when it
/// still fits, clamps it to the last row when it does not, and clears it when
/// the list becomes empty.
#[derive(Debug, Clone)]
pub struct SelectableList<T> {
    items: Vec<T>,
    selected: Option<usize>,
    list_state: ListState,
}

impl<T> Default for SelectableList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SelectableList<T> {
    /// Create an empty selectable list.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            selected: None,
            list_state: ListState::default(),
        }
    }

    /// Replace all items. Clamps the selection to the new length.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        let selected = match (self.selected, self.items.len()) {
            (_, 0) => None,
            (Some(i), len) => Some(i.min(len - 1)),
            (None, _) => Some(0),
        };
        self.sync(selected);
    }

    fn sync(&mut self, selected: Option<usize>) {
        self.selected = selected;
        self.list_state.select(selected);
    }

    /// Move selection to the next item (wraps around).
    pub fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let next = self.selected.map_or(0, |i| (i + 1) % self.items.len());
        self.sync(Some(next));
    }

    /// Move selection to the previous item (wraps around).
    pub fn select_prev(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let prev = match self.selected {
            Some(0) | None => self.items.len() - 1,
            Some(i) => i - 1,
        };
        self.sync(Some(prev));
    }

    /// Move selection to a specific index. Clamps to valid range.
    pub fn select(&mut self, index: usize) {
        if self.items.is_empty() {
            return;
        }
        self.sync(Some(index.min(self.items.len() - 1)));
    }

    pub fn select_first(&mut self) {
        self.select(0);
    }

    pub fn select_last(&mut self) {
        self.select(usize::MAX);
    }

    /// Get the currently selected item, if any.
    pub fn selected_item(&self) -> Option<&T> {
        self.selected.and_then(|i| self.items.get(i))
    }

    /// Get the current selection index.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Get a mutable reference to the ListState (needed by render_stateful_widget).
    pub fn list_state_mut(&mut self) -> &mut ListState {
        &mut self.list_state
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}
