use alloc::rc::Rc;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::{ItemPosition, PositionInfo};

/// A source of runtime identity for item fingerprints.
///
/// The shared-pointer implementations hash the allocation address, so an item is "unchanged"
/// exactly when the adapter keeps returning the same allocation. Replacing an item with an
/// equal but distinct allocation is reported as a change.
///
/// Data without a natural handle (plain values, copies) should implement this trait with a
/// stable key or version instead, e.g. a database id combined with a revision counter.
///
/// Addresses may be reused after an allocation is freed. Fingerprints are collision-tolerant,
/// so a reused address can at worst carry a stale measured size forward.
pub trait Identity {
    fn identity(&self) -> u64;
}

impl<T: ?Sized> Identity for Arc<T> {
    fn identity(&self) -> u64 {
        Arc::as_ptr(self).cast::<()>() as usize as u64
    }
}

impl<T: ?Sized> Identity for Rc<T> {
    fn identity(&self) -> u64 {
        Rc::as_ptr(self).cast::<()>() as usize as u64
    }
}

impl<T: ?Sized> Identity for &T {
    fn identity(&self) -> u64 {
        (*self as *const T).cast::<()>() as usize as u64
    }
}

/// The data provider behind a sectioned list.
///
/// Counts are signed so that a misbehaving provider can be represented; negative counts are
/// treated as zero.
pub trait SectionAdapter {
    type Section;
    type Item: Identity;

    fn section_count(&self) -> isize;

    fn item_count(&self, section: usize) -> isize;

    /// Section data, used for section header/footer data lookups.
    fn section(&self, section: usize) -> Option<Self::Section>;

    fn item(&self, section: usize, item: usize) -> Option<Self::Item>;
}

impl<A: SectionAdapter + ?Sized> SectionAdapter for &A {
    type Section = A::Section;
    type Item = A::Item;

    fn section_count(&self) -> isize {
        (**self).section_count()
    }

    fn item_count(&self, section: usize) -> isize {
        (**self).item_count(section)
    }

    fn section(&self, section: usize) -> Option<Self::Section> {
        (**self).section(section)
    }

    fn item(&self, section: usize, item: usize) -> Option<Self::Item> {
        (**self).item(section, item)
    }
}

/// An adapter that supports interactive (drag) reordering.
pub trait ReorderableAdapter: SectionAdapter {
    fn can_reorder_item(&self, info: &PositionInfo) -> bool;

    /// Moves the item at `from` to `to`. Returns `false` to reject the move.
    fn move_item(&mut self, from: &PositionInfo, to: &PositionInfo) -> bool;

    /// Called once the drag ends, with the coordinate the item started at and where it landed.
    fn reorder_complete(&mut self, original: ItemPosition, destination: ItemPosition) {
        let _ = (original, destination);
    }
}

/// Per-section chrome presence (whether a section renders a header and/or footer).
pub trait ViewSelector {
    fn section_has_header(&self, section: usize) -> bool;

    fn section_has_footer(&self, section: usize) -> bool;
}

/// A selector that applies the same chrome to every section.
///
/// This matches hosts where a section header/footer template is either configured for the
/// whole list or not at all.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UniformSelector {
    pub headers: bool,
    pub footers: bool,
}

impl UniformSelector {
    pub fn new(headers: bool, footers: bool) -> Self {
        Self { headers, footers }
    }
}

impl ViewSelector for UniformSelector {
    fn section_has_header(&self, _section: usize) -> bool {
        self.headers
    }

    fn section_has_footer(&self, _section: usize) -> bool {
        self.footers
    }
}

impl<H, F> ViewSelector for (H, F)
where
    H: Fn(usize) -> bool,
    F: Fn(usize) -> bool,
{
    fn section_has_header(&self, section: usize) -> bool {
        (self.0)(section)
    }

    fn section_has_footer(&self, section: usize) -> bool {
        (self.1)(section)
    }
}

/// An in-memory adapter over `(section, items)` pairs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SectionList<S, I> {
    sections: Vec<(S, Vec<I>)>,
}

impl<S, I> SectionList<S, I> {
    pub fn new() -> Self {
        Self {
            sections: Vec::new(),
        }
    }

    pub fn from_sections(sections: Vec<(S, Vec<I>)>) -> Self {
        Self { sections }
    }

    pub fn push_section(&mut self, section: S, items: Vec<I>) {
        self.sections.push((section, items));
    }

    pub fn sections(&self) -> &[(S, Vec<I>)] {
        &self.sections
    }

    pub fn items_mut(&mut self, section: usize) -> Option<&mut Vec<I>> {
        self.sections.get_mut(section).map(|(_, items)| items)
    }

    /// Moves an item between two coordinates. Returns `false` if either is out of range.
    ///
    /// `to.item` may equal the destination section's length when moving across sections
    /// (append).
    pub fn move_item(&mut self, from: ItemPosition, to: ItemPosition) -> bool {
        let Some((_, src)) = self.sections.get(from.section) else {
            return false;
        };
        if from.item >= src.len() {
            return false;
        }
        let Some((_, dst)) = self.sections.get(to.section) else {
            return false;
        };
        let dst_len = if to.section == from.section {
            dst.len().saturating_sub(1)
        } else {
            dst.len()
        };
        if to.item > dst_len {
            return false;
        }

        let item = self.sections[from.section].1.remove(from.item);
        self.sections[to.section].1.insert(to.item, item);
        true
    }
}

impl<S: Clone, I: Identity + Clone> SectionAdapter for SectionList<S, I> {
    type Section = S;
    type Item = I;

    fn section_count(&self) -> isize {
        self.sections.len() as isize
    }

    fn item_count(&self, section: usize) -> isize {
        self.sections
            .get(section)
            .map_or(0, |(_, items)| items.len() as isize)
    }

    fn section(&self, section: usize) -> Option<S> {
        self.sections.get(section).map(|(s, _)| s.clone())
    }

    fn item(&self, section: usize, item: usize) -> Option<I> {
        self.sections
            .get(section)
            .and_then(|(_, items)| items.get(item))
            .cloned()
    }
}

impl<S: Clone, I: Identity + Clone> ReorderableAdapter for SectionList<S, I> {
    fn can_reorder_item(&self, info: &PositionInfo) -> bool {
        info.item_position().is_some()
    }

    fn move_item(&mut self, from: &PositionInfo, to: &PositionInfo) -> bool {
        let (Some(from), Some(to)) = (from.item_position(), to.item_position()) else {
            return false;
        };
        SectionList::move_item(self, from, to)
    }
}
