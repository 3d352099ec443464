use alloc::vec::Vec;
use core::ops::Range;

use crate::{
    GlobalChrome, ItemPosition, PositionData, PositionInfo, PositionKind, SectionAdapter,
    ViewSelector,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct SectionSpan {
    /// Flat position of the section's first slot (its header, or its first item).
    start: usize,
    items_start: usize,
    item_count: usize,
    has_header: bool,
    has_footer: bool,
}

impl SectionSpan {
    fn end(&self) -> usize {
        self.items_start + self.item_count + usize::from(self.has_footer)
    }
}

/// The flat position space of a sectioned list.
///
/// Flattens the global header, every section's header/items/footer and the global footer into
/// one contiguous, gap-free `0..total_count()` range, and maps between flat positions and
/// `(kind, section, item)` coordinates in O(1).
///
/// The mapping depends only on section/item counts and chrome presence, never on item
/// content. It is an immutable snapshot between calls to [`PositionIndex::rebuild`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PositionIndex {
    infos: Vec<PositionInfo>,
    sections: Vec<SectionSpan>,
    chrome: GlobalChrome,
}

impl PositionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a fresh index; see [`PositionIndex::rebuild`].
    pub fn build<A, S>(adapter: Option<&A>, selector: &S, chrome: GlobalChrome) -> Self
    where
        A: SectionAdapter + ?Sized,
        S: ViewSelector + ?Sized,
    {
        let mut index = Self::new();
        index.rebuild(adapter, selector, chrome);
        index
    }

    /// Recomputes the whole table from the adapter's current counts.
    ///
    /// Runs in O(S + I). A missing adapter produces an empty index (no global chrome either).
    /// Negative section/item counts are clamped to zero.
    pub fn rebuild<A, S>(&mut self, adapter: Option<&A>, selector: &S, chrome: GlobalChrome)
    where
        A: SectionAdapter + ?Sized,
        S: ViewSelector + ?Sized,
    {
        self.infos.clear();
        self.sections.clear();
        self.chrome = GlobalChrome::default();

        let Some(adapter) = adapter else {
            vdebug!("PositionIndex::rebuild: no adapter");
            return;
        };
        self.chrome = chrome;

        let section_count = clamp_count(adapter.section_count());
        self.sections.reserve_exact(section_count);

        if chrome.header {
            self.infos
                .push(PositionInfo::global(self.infos.len(), PositionKind::Header));
        }

        for section in 0..section_count {
            let raw = adapter.item_count(section);
            if raw < 0 {
                vwarn!(section, count = raw, "negative item count clamped to zero");
            }
            let item_count = clamp_count(raw);
            let has_header = selector.section_has_header(section);
            let has_footer = selector.section_has_footer(section);

            let start = self.infos.len();
            if has_header {
                self.infos.push(PositionInfo::section_chrome(
                    start,
                    PositionKind::SectionHeader,
                    section,
                ));
            }
            let items_start = self.infos.len();
            self.infos.reserve(item_count + usize::from(has_footer));
            for item in 0..item_count {
                self.infos
                    .push(PositionInfo::item(items_start + item, section, item));
            }
            if has_footer {
                self.infos.push(PositionInfo::section_chrome(
                    self.infos.len(),
                    PositionKind::SectionFooter,
                    section,
                ));
            }

            self.sections.push(SectionSpan {
                start,
                items_start,
                item_count,
                has_header,
                has_footer,
            });
        }

        if chrome.footer {
            self.infos
                .push(PositionInfo::global(self.infos.len(), PositionKind::Footer));
        }

        vdebug!(
            sections = section_count,
            total = self.infos.len(),
            "PositionIndex::rebuild"
        );
    }

    /// The flat length; use it directly as the host recycler's item count.
    pub fn total_count(&self) -> usize {
        self.infos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }

    pub fn chrome(&self) -> GlobalChrome {
        self.chrome
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Item count of a section as seen by the last rebuild (after clamping).
    pub fn item_count(&self, section: usize) -> Option<usize> {
        self.sections.get(section).map(|s| s.item_count)
    }

    /// Decodes a flat position. Returns `None` for positions `>= total_count()`.
    pub fn info(&self, position: usize) -> Option<PositionInfo> {
        let info = self.infos.get(position).copied();
        if info.is_none() {
            vtrace!(position, total = self.infos.len(), "info: out of range");
        }
        info
    }

    /// Flat position of an item slot, or `None` if the coordinate is not a current item
    /// (e.g. a stale coordinate after a section shrank).
    pub fn position(&self, section: usize, item: usize) -> Option<usize> {
        let span = self.sections.get(section)?;
        (item < span.item_count).then(|| span.items_start + item)
    }

    pub fn position_of(&self, at: ItemPosition) -> Option<usize> {
        self.position(at.section, at.item)
    }

    pub fn infos(&self) -> &[PositionInfo] {
        &self.infos
    }

    pub fn iter(&self) -> impl Iterator<Item = PositionInfo> + '_ {
        self.infos.iter().copied()
    }

    /// Decoded infos for a flat range, clamped to the current length.
    pub fn infos_in(&self, range: Range<usize>) -> &[PositionInfo] {
        let end = range.end.min(self.infos.len());
        let start = range.start.min(end);
        &self.infos[start..end]
    }

    /// Flat range covering a section's header, items and footer.
    pub fn section_range(&self, section: usize) -> Option<Range<usize>> {
        let span = self.sections.get(section)?;
        Some(span.start..span.end())
    }

    pub fn section_header_position(&self, section: usize) -> Option<usize> {
        let span = self.sections.get(section)?;
        span.has_header.then_some(span.start)
    }

    pub fn section_footer_position(&self, section: usize) -> Option<usize> {
        let span = self.sections.get(section)?;
        span.has_footer
            .then(|| span.items_start + span.item_count)
    }

    pub fn header_position(&self) -> Option<usize> {
        self.chrome.header.then_some(0)
    }

    pub fn footer_position(&self) -> Option<usize> {
        if self.chrome.footer {
            self.infos.len().checked_sub(1)
        } else {
            None
        }
    }

    /// Decodes a flat position and overlays selection state.
    ///
    /// Only `Item` slots can be selected; `is_selected` is not consulted for anything else.
    pub fn info_with_selection(
        &self,
        position: usize,
        is_selected: impl FnOnce(ItemPosition) -> bool,
    ) -> Option<PositionInfo> {
        let info = self.info(position)?;
        let selected = info.item_position().is_some_and(is_selected);
        Some(info.with_selected(selected))
    }

    /// Fetches the adapter data behind a decoded position.
    ///
    /// Items resolve to the item object, section chrome to the section object, and the global
    /// header/footer to `None`.
    pub fn data_for<A>(
        &self,
        adapter: &A,
        info: &PositionInfo,
    ) -> Option<PositionData<A::Section, A::Item>>
    where
        A: SectionAdapter + ?Sized,
    {
        match (info.kind, info.section, info.item) {
            (PositionKind::Item, Some(section), Some(item)) => {
                adapter.item(section, item).map(PositionData::Item)
            }
            (PositionKind::SectionHeader | PositionKind::SectionFooter, Some(section), _) => {
                adapter.section(section).map(PositionData::Section)
            }
            _ => None,
        }
    }

    /// Validates a drag reorder between two flat positions.
    ///
    /// Both positions must exist and be items. Unless `can_mix_sections` is set, they must also
    /// belong to the same section.
    pub fn resolve_move(
        &self,
        from: usize,
        to: usize,
        can_mix_sections: bool,
    ) -> Option<(PositionInfo, PositionInfo)> {
        let from = self.info(from)?;
        let to = self.info(to)?;
        if from.kind != PositionKind::Item || to.kind != PositionKind::Item {
            vtrace!(from = from.position, to = to.position, "resolve_move: not items");
            return None;
        }
        if !can_mix_sections && from.section != to.section {
            vtrace!(from = from.position, to = to.position, "resolve_move: crosses sections");
            return None;
        }
        Some((from, to))
    }
}

fn clamp_count(count: isize) -> usize {
    usize::try_from(count).unwrap_or(0)
}
