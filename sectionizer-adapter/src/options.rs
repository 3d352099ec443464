use sectionizer::PositionKind;

use crate::SelectionMode;

/// A numeric view type handed to native recyclers.
pub type ViewType = u32;

/// Configuration for [`crate::MeasuredLayout`], [`crate::ViewTypeRegistry`] and
/// [`crate::Controller`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdapterOptions {
    /// Size in the scroll axis used for positions that have no carried measurement.
    pub estimated_size: u32,
    /// Reuse pool capacity for item view types.
    pub item_pool_size: usize,
    /// Reuse pool capacity for section header/footer view types.
    pub section_pool_size: usize,
    /// Reuse pool capacity for the global header/footer view types.
    pub global_pool_size: usize,
    /// View types are handed out starting after this value.
    pub view_type_base: ViewType,
    /// Whether drag reorders may move items between sections.
    pub can_mix_sections: bool,
    pub selection_mode: SelectionMode,
}

impl Default for AdapterOptions {
    fn default() -> Self {
        Self {
            estimated_size: 50,
            item_pool_size: 10,
            section_pool_size: 5,
            global_pool_size: 1,
            view_type_base: 100,
            can_mix_sections: false,
            selection_mode: SelectionMode::None,
        }
    }
}

impl AdapterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_estimated_size(mut self, estimated_size: u32) -> Self {
        self.estimated_size = estimated_size;
        self
    }

    pub fn with_item_pool_size(mut self, item_pool_size: usize) -> Self {
        self.item_pool_size = item_pool_size;
        self
    }

    pub fn with_section_pool_size(mut self, section_pool_size: usize) -> Self {
        self.section_pool_size = section_pool_size;
        self
    }

    pub fn with_global_pool_size(mut self, global_pool_size: usize) -> Self {
        self.global_pool_size = global_pool_size;
        self
    }

    pub fn with_view_type_base(mut self, view_type_base: ViewType) -> Self {
        self.view_type_base = view_type_base;
        self
    }

    pub fn with_can_mix_sections(mut self, can_mix_sections: bool) -> Self {
        self.can_mix_sections = can_mix_sections;
        self
    }

    pub fn with_selection_mode(mut self, selection_mode: SelectionMode) -> Self {
        self.selection_mode = selection_mode;
        self
    }

    /// Reuse pool capacity for a view type first registered by a `kind` slot.
    pub fn pool_size_for(&self, kind: PositionKind) -> usize {
        match kind {
            PositionKind::Header | PositionKind::Footer => self.global_pool_size,
            PositionKind::Item => self.item_pool_size,
            PositionKind::SectionHeader | PositionKind::SectionFooter => self.section_pool_size,
        }
    }
}
