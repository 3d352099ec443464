use alloc::vec::Vec;

use sectionizer::{
    ContentFingerprintCache, GlobalChrome, ItemPosition, PositionIndex, PositionInfo,
    ReorderableAdapter, SectionAdapter, ViewSelector,
};

use crate::{
    AdapterOptions, LayoutUpdate, MeasuredLayout, Selection, SelectionMode, ViewType,
    ViewTypeRegistry,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Drag {
    origin: ItemPosition,
}

/// A framework-neutral controller that sequences the work a host list does on invalidation.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `invalidate` when data, chrome presence or templates change
/// - `measure` when a realized view reports its size
/// - `move_item` / `end_move` while the user drags an item
/// - `tap` / `select_item` / `deselect_item` when the user changes the selection
///
/// Reloads can be suspended (e.g. while a drag is in flight). Invalidations received in the
/// meantime are remembered; `resume_reload` reports whether one is pending so the host can
/// replay it.
#[derive(Clone, Debug)]
pub struct Controller {
    options: AdapterOptions,
    index: PositionIndex,
    fingerprints: ContentFingerprintCache,
    layout: MeasuredLayout,
    view_types: ViewTypeRegistry,
    selection: Selection,
    suspended: bool,
    pending: bool,
    drag: Option<Drag>,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(AdapterOptions::default())
    }
}

impl Controller {
    pub fn new(options: AdapterOptions) -> Self {
        Self {
            options,
            index: PositionIndex::new(),
            fingerprints: ContentFingerprintCache::new(),
            layout: MeasuredLayout::new(options.estimated_size),
            view_types: ViewTypeRegistry::new(options),
            selection: Selection::new(options.selection_mode),
            suspended: false,
            pending: false,
            drag: None,
        }
    }

    pub fn options(&self) -> &AdapterOptions {
        &self.options
    }

    pub fn index(&self) -> &PositionIndex {
        &self.index
    }

    pub fn fingerprints(&self) -> &ContentFingerprintCache {
        &self.fingerprints
    }

    pub fn layout(&self) -> &MeasuredLayout {
        &self.layout
    }

    pub fn view_types(&self) -> &ViewTypeRegistry {
        &self.view_types
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The item count for the native list widget.
    pub fn count(&self) -> usize {
        self.index.total_count()
    }

    /// Rebuilds the index, refreshes fingerprints and carries measured sizes forward.
    ///
    /// Returns `None` when reloads are suspended; the invalidation is then remembered.
    pub fn invalidate<A, S>(
        &mut self,
        adapter: Option<&A>,
        selector: &S,
        chrome: GlobalChrome,
    ) -> Option<LayoutUpdate>
    where
        A: SectionAdapter + ?Sized,
        S: ViewSelector + ?Sized,
    {
        if self.suspended {
            vtrace!("invalidate: reload suspended");
            self.pending = true;
            return None;
        }
        self.pending = false;

        self.index.rebuild(adapter, selector, chrome);
        self.fingerprints.refresh(&self.index, adapter);
        let update = self.layout.apply_snapshot(self.fingerprints.current());
        vdebug!(
            count = self.index.total_count(),
            unchanged = self.fingerprints.is_unchanged(),
            ?update,
            "invalidate"
        );
        Some(update)
    }

    pub fn suspend_reload(&mut self) {
        self.suspended = true;
    }

    /// Lifts a suspension. Returns `true` if an invalidation arrived while suspended.
    pub fn resume_reload(&mut self) -> bool {
        self.suspended = false;
        core::mem::take(&mut self.pending)
    }

    pub fn is_reload_suspended(&self) -> bool {
        self.suspended
    }

    pub fn measure(&mut self, position: usize, size: u32) -> i64 {
        self.layout.measure(position, size)
    }

    /// The view type for the slot at `position`, registering `reuse_id` on first use.
    pub fn view_type(&mut self, position: usize, reuse_id: &str) -> Option<ViewType> {
        let info = self.index.info(position)?;
        Some(self.view_types.view_type(reuse_id, info.kind))
    }

    pub fn reset_view_types(&mut self) {
        self.view_types.reset();
    }

    /// Scroll offset of an item, or `None` for a stale coordinate.
    pub fn scroll_offset_for_item(&self, at: ItemPosition) -> Option<u64> {
        let position = self.index.position_of(at)?;
        self.layout.offset_of(position)
    }

    /// Decodes `position` with the current selection overlaid.
    pub fn info(&self, position: usize) -> Option<PositionInfo> {
        self.index
            .info_with_selection(position, |at| self.selection.is_selected(at))
    }

    /// Decoded infos for the positions intersecting the viewport, with selection overlaid.
    pub fn collect_visible_infos(&self, offset: u64, viewport: u32, out: &mut Vec<PositionInfo>) {
        out.clear();
        let range = self.layout.visible_range(offset, viewport);
        out.extend(self.index.infos_in(range).iter().map(|info| {
            let selected = info
                .item_position()
                .is_some_and(|at| self.selection.is_selected(at));
            info.with_selected(selected)
        }));
    }

    pub fn visible_infos(&self, offset: u64, viewport: u32) -> Vec<PositionInfo> {
        let mut out = Vec::new();
        self.collect_visible_infos(offset, viewport, &mut out);
        out
    }

    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        self.options.selection_mode = mode;
        self.selection.set_mode(mode);
    }

    pub fn select_item(&mut self, at: ItemPosition) -> bool {
        self.selection.select(at)
    }

    pub fn deselect_item(&mut self, at: ItemPosition) -> bool {
        self.selection.deselect(at)
    }

    pub fn clear_selection(&mut self) -> bool {
        self.selection.clear()
    }

    /// Toggles the selection of the item at flat `position`.
    ///
    /// Returns the item's new selection state, or `None` if `position` is not an item.
    pub fn tap(&mut self, position: usize) -> Option<bool> {
        let at = self.index.info(position)?.item_position()?;
        let selected = self.selection.toggle(at);
        vtrace!(position, selected, "tap");
        Some(selected)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Applies one step of an interactive move from flat `from` to flat `to`.
    ///
    /// On success the adapter has moved the item, the index and fingerprints reflect the new
    /// order, measured sizes have followed their items and reloads stay suspended until
    /// [`Controller::end_move`].
    pub fn move_item<A, S>(
        &mut self,
        adapter: &mut A,
        selector: &S,
        chrome: GlobalChrome,
        from: usize,
        to: usize,
    ) -> bool
    where
        A: ReorderableAdapter,
        S: ViewSelector + ?Sized,
    {
        let can_mix = self.options.can_mix_sections;
        let Some((from_info, to_info)) = self.index.resolve_move(from, to, can_mix) else {
            return false;
        };
        if !adapter.can_reorder_item(&from_info) {
            return false;
        }
        let Some(origin) = from_info.item_position() else {
            return false;
        };
        if !adapter.move_item(&from_info, &to_info) {
            vtrace!(from, to, "move_item: rejected by adapter");
            return false;
        }

        if self.drag.is_none() {
            self.drag = Some(Drag { origin });
        }
        self.suspended = true;
        self.index.rebuild(Some(&*adapter), selector, chrome);
        self.fingerprints.refresh(&self.index, Some(&*adapter));
        self.layout.apply_snapshot(self.fingerprints.current());
        vtrace!(from, to, "move_item");
        true
    }

    /// Finishes an interactive move that ended at flat `destination`.
    ///
    /// Notifies the adapter with the original and final coordinates, lifts the suspension and
    /// runs a full invalidation.
    pub fn end_move<A, S>(
        &mut self,
        adapter: &mut A,
        selector: &S,
        chrome: GlobalChrome,
        destination: usize,
    ) -> Option<LayoutUpdate>
    where
        A: ReorderableAdapter,
        S: ViewSelector + ?Sized,
    {
        if let Some(drag) = self.drag.take() {
            match self.index.info(destination).and_then(|i| i.item_position()) {
                Some(landed) => adapter.reorder_complete(drag.origin, landed),
                None => {
                    vwarn!(destination, "end_move: destination is not an item");
                }
            }
        }
        self.suspended = false;
        self.pending = false;
        self.invalidate(Some(&*adapter), selector, chrome)
    }
}
