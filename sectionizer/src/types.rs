/// What a flat position holds.
///
/// Within a section the order is fixed: `SectionHeader`, then the items, then `SectionFooter`.
/// The global `Header` precedes section 0 and the global `Footer` follows the last section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PositionKind {
    Header,
    SectionHeader,
    Item,
    SectionFooter,
    Footer,
}

impl PositionKind {
    pub fn is_global(self) -> bool {
        matches!(self, Self::Header | Self::Footer)
    }

    pub fn is_section_chrome(self) -> bool {
        matches!(self, Self::SectionHeader | Self::SectionFooter)
    }
}

/// A `(section, item)` coordinate, as used by selection and scroll-to-item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemPosition {
    pub section: usize,
    pub item: usize,
}

impl ItemPosition {
    pub fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }
}

/// The decoded coordinate of one flat slot.
///
/// `section` is `None` for the global header/footer and `item` is `None` for anything that is
/// not an [`PositionKind::Item`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionInfo {
    pub position: usize,
    pub kind: PositionKind,
    pub section: Option<usize>,
    pub item: Option<usize>,
    /// Selection state overlaid by the caller. The index always produces `false`.
    pub is_selected: bool,
}

impl PositionInfo {
    pub(crate) fn global(position: usize, kind: PositionKind) -> Self {
        Self {
            position,
            kind,
            section: None,
            item: None,
            is_selected: false,
        }
    }

    pub(crate) fn section_chrome(position: usize, kind: PositionKind, section: usize) -> Self {
        Self {
            position,
            kind,
            section: Some(section),
            item: None,
            is_selected: false,
        }
    }

    pub(crate) fn item(position: usize, section: usize, item: usize) -> Self {
        Self {
            position,
            kind: PositionKind::Item,
            section: Some(section),
            item: Some(item),
            is_selected: false,
        }
    }

    /// Returns the `(section, item)` coordinate for `Item` slots.
    pub fn item_position(&self) -> Option<ItemPosition> {
        match (self.kind, self.section, self.item) {
            (PositionKind::Item, Some(section), Some(item)) => Some(ItemPosition { section, item }),
            _ => None,
        }
    }

    pub fn with_selected(mut self, is_selected: bool) -> Self {
        self.is_selected = is_selected;
        self
    }
}

/// Presence of the list-wide header and footer, supplied by host view state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlobalChrome {
    pub header: bool,
    pub footer: bool,
}

impl GlobalChrome {
    pub fn new(header: bool, footer: bool) -> Self {
        Self { header, footer }
    }

    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    pub fn with_footer(mut self, footer: bool) -> Self {
        self.footer = footer;
        self
    }
}

/// Adapter data behind a flat position, passed through untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PositionData<S, I> {
    /// Section object, for section headers and footers.
    Section(S),
    /// Item object.
    Item(I),
}
