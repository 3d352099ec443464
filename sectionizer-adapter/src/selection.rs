use alloc::vec::Vec;

use sectionizer::ItemPosition;

/// How many items may be selected at once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectionMode {
    /// Selection requests are ignored.
    #[default]
    None,
    /// Selecting an item replaces the previous selection.
    Single,
    /// Selected items accumulate.
    Multiple,
}

/// Selected item coordinates, kept in the order they were selected.
///
/// Selection is positional: it refers to `(section, item)` coordinates, not to item content, and
/// is not adjusted when the data changes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Selection {
    mode: SelectionMode,
    selected: Vec<ItemPosition>,
}

impl Selection {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            selected: Vec::new(),
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Switches the mode. The current selection is dropped if the mode changes.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        if self.mode != mode {
            self.mode = mode;
            self.selected.clear();
        }
    }

    pub fn is_selected(&self, at: ItemPosition) -> bool {
        self.selected.contains(&at)
    }

    pub fn selected(&self) -> &[ItemPosition] {
        &self.selected
    }

    /// The most recently selected item.
    pub fn selected_item(&self) -> Option<ItemPosition> {
        self.selected.last().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Returns `true` if the selection changed.
    pub fn select(&mut self, at: ItemPosition) -> bool {
        match self.mode {
            SelectionMode::None => false,
            SelectionMode::Single => {
                if self.selected == [at] {
                    return false;
                }
                self.selected.clear();
                self.selected.push(at);
                true
            }
            SelectionMode::Multiple => {
                if self.is_selected(at) {
                    return false;
                }
                self.selected.push(at);
                true
            }
        }
    }

    /// Returns `true` if the selection changed.
    pub fn deselect(&mut self, at: ItemPosition) -> bool {
        let before = self.selected.len();
        self.selected.retain(|&p| p != at);
        self.selected.len() != before
    }

    /// Flips the selection state of `at`, as a tap does. Returns whether `at` is now selected.
    pub fn toggle(&mut self, at: ItemPosition) -> bool {
        if self.is_selected(at) {
            self.deselect(at);
            false
        } else {
            self.select(at);
            self.is_selected(at)
        }
    }

    /// Returns `true` if anything was selected.
    pub fn clear(&mut self) -> bool {
        let changed = !self.selected.is_empty();
        self.selected.clear();
        changed
    }
}
