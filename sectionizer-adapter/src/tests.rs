use crate::*;

use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;

use sectionizer::{
    Fingerprint, GlobalChrome, Identity, ItemPosition, PositionInfo, PositionKind,
    ReorderableAdapter, SectionAdapter, SectionList, Snapshot, UniformSelector,
};

use crate::fenwick::Fenwick;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 11
    }

    fn gen_range(&mut self, start: u64, end_exclusive: u64) -> u64 {
        start + self.next_u64() % (end_exclusive - start)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Key(u64);

impl Identity for Key {
    fn identity(&self) -> u64 {
        self.0
    }
}

fn snapshot(seq: &[Fingerprint]) -> Snapshot {
    Snapshot::from_sequence(seq.to_vec())
}

fn expected_lower_bound(sizes: &[u32], target: u64) -> usize {
    let mut prefix = 0u64;
    let mut consumed = 0usize;
    for &size in sizes {
        if prefix + size as u64 <= target {
            prefix += size as u64;
            consumed += 1;
        } else {
            break;
        }
    }
    consumed
}

#[test]
fn fenwick_matches_naive_prefix_sums() {
    let mut rng = Lcg(42);
    for _ in 0..100 {
        let n = rng.gen_range(0, 40) as usize;
        let mut sizes: Vec<u32> = (0..n).map(|_| rng.gen_range(0, 20) as u32).collect();
        let mut tree = Fenwick::from_sizes(&sizes);

        for _ in 0..5 {
            if n > 0 {
                let i = rng.gen_range(0, n as u64) as usize;
                let next = rng.gen_range(0, 20) as u32;
                tree.add(i, next as i64 - sizes[i] as i64);
                sizes[i] = next;
            }
            assert_eq!(tree.len(), n);
            assert_eq!(tree.total(), sizes.iter().map(|&s| s as u64).sum::<u64>());
            for count in 0..=n {
                let naive: u64 = sizes[..count].iter().map(|&s| s as u64).sum();
                assert_eq!(tree.prefix_sum(count), naive);
            }
            for target in 0..tree.total() + 3 {
                assert_eq!(
                    tree.lower_bound(target),
                    expected_lower_bound(&sizes, target),
                    "sizes={sizes:?} target={target}"
                );
            }
        }
    }
}

#[test]
fn unmeasured_positions_use_the_estimate() {
    let mut layout = MeasuredLayout::new(50);
    let update = layout.apply_snapshot(&snapshot(&[1, 2, 3]));
    assert_eq!(
        update,
        LayoutUpdate::Rebuilt {
            carried: 0,
            estimated: 3
        }
    );
    assert_eq!(layout.total_extent(), 150);
    assert_eq!(layout.offset_of(2), Some(100));
    assert_eq!(layout.offset_of(3), None);
    assert!(!layout.is_measured(0));
}

#[test]
fn same_snapshot_keeps_the_layout() {
    let mut layout = MeasuredLayout::default();
    let s = snapshot(&[1, 2]);
    layout.apply_snapshot(&s);
    layout.measure(0, 7);
    assert_eq!(layout.apply_snapshot(&s), LayoutUpdate::Kept);
    assert_eq!(layout.size_of(0), Some(7));
}

#[test]
fn measurements_follow_fingerprints_across_insertion_and_reorder() {
    let mut layout = MeasuredLayout::new(50);
    layout.apply_snapshot(&snapshot(&[1, 2, 3]));
    assert_eq!(layout.measure(0, 10), -40);
    assert_eq!(layout.measure(2, 90), 40);
    assert_eq!(layout.total_extent(), 150);

    // Insert 9 in front and swap 2/3.
    let update = layout.apply_snapshot(&snapshot(&[9, 1, 3, 2]));
    assert_eq!(
        update,
        LayoutUpdate::Rebuilt {
            carried: 2,
            estimated: 2
        }
    );
    assert_eq!(layout.size_of(0), Some(50));
    assert_eq!(layout.size_of(1), Some(10));
    assert_eq!(layout.size_of(2), Some(90));
    assert_eq!(layout.size_of(3), Some(50));
    assert!(layout.is_measured(1));
    assert!(!layout.is_measured(3));
    assert_eq!(layout.offset_of(2), Some(60));
    assert_eq!(layout.total_extent(), 200);
}

#[test]
fn measure_ignores_out_of_range_positions() {
    let mut layout = MeasuredLayout::new(10);
    layout.apply_snapshot(&snapshot(&[1]));
    assert_eq!(layout.measure(5, 100), 0);
    assert_eq!(layout.measure(0, 10), 0);
    assert!(layout.is_measured(0));
    assert_eq!(layout.measurement_cache_len(), 1);
    assert_eq!(layout.measure_many([(0, 15), (3, 1)]), 5);
}

#[test]
fn swap_sizes_exchanges_positions() {
    let mut layout = MeasuredLayout::new(10);
    layout.apply_snapshot(&snapshot(&[1, 2, 3]));
    layout.measure(0, 30);
    assert!(layout.swap_sizes(0, 2));
    assert_eq!(layout.size_of(0), Some(10));
    assert_eq!(layout.size_of(2), Some(30));
    assert_eq!(layout.fingerprint_of(2), Some(1));
    assert_eq!(layout.offset_of(2), Some(20));
    assert_eq!(layout.total_extent(), 50);
    assert!(!layout.swap_sizes(1, 1));
    assert!(!layout.swap_sizes(0, 3));
}

#[test]
fn offsets_map_back_to_positions() {
    let mut layout = MeasuredLayout::new(10);
    assert_eq!(layout.position_at_offset(0), None);
    assert_eq!(layout.visible_range(0, 100), 0..0);

    layout.apply_snapshot(&snapshot(&[1, 2, 3, 4]));
    layout.measure(1, 30);
    // [0,10) [10,40) [40,50) [50,60)
    assert_eq!(layout.position_at_offset(0), Some(0));
    assert_eq!(layout.position_at_offset(10), Some(1));
    assert_eq!(layout.position_at_offset(39), Some(1));
    assert_eq!(layout.position_at_offset(40), Some(2));
    assert_eq!(layout.position_at_offset(1_000), Some(3));

    assert_eq!(layout.visible_range(5, 10), 0..2);
    assert_eq!(layout.visible_range(10, 30), 1..2);
    assert_eq!(layout.visible_range(45, 100), 2..4);
    assert_eq!(layout.visible_range(60, 10), 4..4);
    assert_eq!(layout.visible_range(0, 0), 0..0);

    let mut seen = Vec::new();
    layout.for_each_visible(35, 10, |item| seen.push((item.position, item.start, item.end())));
    assert_eq!(seen, vec![(1, 10, 40), (2, 40, 50)]);
}

#[test]
fn measurement_cache_round_trips_through_export() {
    let mut a = MeasuredLayout::new(10);
    a.apply_snapshot(&snapshot(&[1, 2, 3]));
    a.measure(1, 25);
    a.measure(2, 35);
    let mut exported = a.export_measurement_cache();
    exported.sort_unstable();
    assert_eq!(exported, vec![(2, 25), (3, 35)]);

    let mut b = MeasuredLayout::new(10);
    b.apply_snapshot(&snapshot(&[3, 4]));
    b.import_measurement_cache(exported);
    assert_eq!(b.size_of(0), Some(35));
    assert_eq!(b.size_of(1), Some(10));
    assert_eq!(b.total_extent(), 45);

    b.reset_measurements();
    assert_eq!(b.measurement_cache_len(), 0);
    assert_eq!(b.total_extent(), 20);
}

#[test]
fn estimate_change_leaves_measured_positions_alone() {
    let mut layout = MeasuredLayout::new(10);
    layout.apply_snapshot(&snapshot(&[1, 2]));
    layout.measure(0, 3);
    layout.set_estimated_size(20);
    assert_eq!(layout.size_of(0), Some(3));
    assert_eq!(layout.size_of(1), Some(20));
    assert_eq!(layout.total_extent(), 23);
}

#[test]
fn view_types_are_interned_with_pool_sizes() {
    let mut reg = ViewTypeRegistry::new(AdapterOptions::default().with_item_pool_size(12));
    let item = reg.view_type("row", PositionKind::Item);
    let header = reg.view_type("header", PositionKind::Header);
    let section = reg.view_type("section", PositionKind::SectionFooter);

    assert_eq!(item, 101);
    assert_eq!(header, 102);
    assert_eq!(section, 103);
    assert_eq!(reg.view_type("row", PositionKind::Footer), 101);
    assert_eq!(reg.len(), 3);

    assert_eq!(reg.pool_size(item), Some(12));
    assert_eq!(reg.pool_size(header), Some(1));
    assert_eq!(reg.pool_size(section), Some(5));
    assert_eq!(reg.pool_size(100), None);
    assert_eq!(reg.pool_size(104), None);
    assert_eq!(reg.get("header"), Some(102));

    reg.reset();
    assert!(reg.is_empty());
    assert_eq!(reg.get("row"), None);
    assert_eq!(reg.view_type("other", PositionKind::Item), 101);
}

#[derive(Debug)]
struct Row(&'static str);

type Rows = SectionList<&'static str, Arc<Row>>;

fn rows(names: &[&'static str]) -> Vec<Arc<Row>> {
    names.iter().map(|n| Arc::new(Row(n))).collect()
}

#[test]
fn controller_carries_measurements_to_shifted_positions() {
    let mut adapter = Rows::from_sections(vec![("a", rows(&["r0", "r1", "r2"]))]);
    let selector = UniformSelector::new(true, false);
    let chrome = GlobalChrome::new(true, false);
    let mut c = Controller::new(AdapterOptions::default().with_estimated_size(50));

    let first = c.invalidate(Some(&adapter), &selector, chrome);
    assert_eq!(
        first,
        Some(LayoutUpdate::Rebuilt {
            carried: 0,
            estimated: 5
        })
    );
    assert_eq!(c.count(), 5);
    assert_eq!(c.measure(3, 80), 30);
    assert_eq!(c.layout().total_extent(), 280);

    assert_eq!(
        c.invalidate(Some(&adapter), &selector, chrome),
        Some(LayoutUpdate::Kept)
    );

    adapter
        .items_mut(0)
        .unwrap()
        .insert(0, Arc::new(Row("new")));
    let update = c.invalidate(Some(&adapter), &selector, chrome);
    assert_eq!(
        update,
        Some(LayoutUpdate::Rebuilt {
            carried: 1,
            estimated: 5
        })
    );
    assert_eq!(c.count(), 6);
    assert_eq!(c.layout().size_of(4), Some(80));
    assert_eq!(c.scroll_offset_for_item(ItemPosition::new(0, 2)), Some(200));
    assert_eq!(c.scroll_offset_for_item(ItemPosition::new(0, 9)), None);
}

#[test]
fn controller_without_adapter_is_empty() {
    let mut c = Controller::default();
    c.invalidate(
        None::<&Rows>,
        &UniformSelector::new(true, true),
        GlobalChrome::new(true, true),
    );
    assert_eq!(c.count(), 0);
    assert!(c.fingerprints().current().is_empty());
    assert!(c.visible_infos(0, 100).is_empty());
}

#[test]
fn suspended_reload_is_remembered() {
    let adapter = Rows::from_sections(vec![("a", rows(&["r0"]))]);
    let selector = UniformSelector::default();
    let mut c = Controller::default();

    c.suspend_reload();
    assert!(c.is_reload_suspended());
    assert_eq!(c.invalidate(Some(&adapter), &selector, GlobalChrome::default()), None);
    assert_eq!(c.count(), 0);

    assert!(c.resume_reload());
    assert!(!c.resume_reload());
    assert!(c.invalidate(Some(&adapter), &selector, GlobalChrome::default()).is_some());
    assert_eq!(c.count(), 1);
}

#[test]
fn visible_infos_overlay_selection() {
    let adapter = SectionList::<u8, Key>::from_sections(vec![(
        0,
        vec![Key(1), Key(2), Key(3), Key(4)],
    )]);
    let mut c =
        Controller::new(AdapterOptions::default().with_selection_mode(SelectionMode::Multiple));
    c.invalidate(Some(&adapter), &UniformSelector::default(), GlobalChrome::default());
    assert!(c.select_item(ItemPosition::new(0, 1)));

    let infos = c.visible_infos(60, 50);
    let got: Vec<_> = infos.iter().map(|i| (i.position, i.is_selected)).collect();
    assert_eq!(got, vec![(1, true), (2, false)]);
}

#[test]
fn view_type_uses_the_slot_kind() {
    let adapter = Rows::from_sections(vec![("a", rows(&["r0"]))]);
    let mut c = Controller::default();
    c.invalidate(
        Some(&adapter),
        &UniformSelector::new(true, false),
        GlobalChrome::new(true, false),
    );
    let header = c.view_type(0, "global").unwrap();
    let section = c.view_type(1, "section").unwrap();
    let row = c.view_type(2, "row").unwrap();
    assert_eq!(c.view_type(3, "row"), None);
    assert_eq!(c.view_types().pool_size(header), Some(1));
    assert_eq!(c.view_types().pool_size(section), Some(5));
    assert_eq!(c.view_types().pool_size(row), Some(10));

    c.reset_view_types();
    assert!(c.view_types().is_empty());
}

/// Records completed reorders on top of a [`SectionList`].
struct Recording {
    list: SectionList<u8, Key>,
    completed: Vec<(ItemPosition, ItemPosition)>,
}

impl SectionAdapter for Recording {
    type Section = u8;
    type Item = Key;

    fn section_count(&self) -> isize {
        self.list.section_count()
    }

    fn item_count(&self, section: usize) -> isize {
        self.list.item_count(section)
    }

    fn section(&self, section: usize) -> Option<u8> {
        self.list.section(section)
    }

    fn item(&self, section: usize, item: usize) -> Option<Key> {
        self.list.item(section, item)
    }
}

impl ReorderableAdapter for Recording {
    fn can_reorder_item(&self, info: &PositionInfo) -> bool {
        info.item != Some(2)
    }

    fn move_item(&mut self, from: &PositionInfo, to: &PositionInfo) -> bool {
        ReorderableAdapter::move_item(&mut self.list, from, to)
    }

    fn reorder_complete(&mut self, original: ItemPosition, destination: ItemPosition) {
        self.completed.push((original, destination));
    }
}

#[test]
fn drag_reorder_carries_sizes_and_completes_once() {
    let mut adapter = Recording {
        list: SectionList::from_sections(vec![
            (0, vec![Key(1), Key(2), Key(3)]),
            (1, vec![Key(4)]),
        ]),
        completed: Vec::new(),
    };
    let selector = UniformSelector::default();
    let chrome = GlobalChrome::default();
    let mut c = Controller::new(AdapterOptions::default().with_estimated_size(10));
    c.invalidate(Some(&adapter), &selector, chrome);
    c.measure(0, 40);

    // Crossing sections is not allowed by default; the third item is pinned.
    assert!(!c.move_item(&mut adapter, &selector, chrome, 0, 3));
    assert!(!c.move_item(&mut adapter, &selector, chrome, 2, 1));
    assert!(!c.is_dragging());

    assert!(c.move_item(&mut adapter, &selector, chrome, 0, 1));
    assert!(c.is_dragging());
    assert!(c.is_reload_suspended());
    assert_eq!(adapter.list.sections()[0].1, vec![Key(2), Key(1), Key(3)]);
    assert_eq!(c.layout().size_of(1), Some(40));
    assert_eq!(c.invalidate(Some(&adapter), &selector, chrome), None);

    // The drag steps already laid out the final order.
    let update = c.end_move(&mut adapter, &selector, chrome, 1);
    assert_eq!(update, Some(LayoutUpdate::Kept));
    assert!(!c.is_dragging());
    assert!(!c.is_reload_suspended());
    assert_eq!(
        adapter.completed,
        vec![(ItemPosition::new(0, 0), ItemPosition::new(0, 1))]
    );
    assert_eq!(c.layout().size_of(1), Some(40));
    assert_eq!(c.layout().size_of(0), Some(10));
}

#[test]
fn drag_across_sections_when_allowed() {
    let mut adapter = Recording {
        list: SectionList::from_sections(vec![(0, vec![Key(1), Key(2)]), (1, vec![Key(4)])]),
        completed: Vec::new(),
    };
    let selector = UniformSelector::default();
    let chrome = GlobalChrome::default();
    let mut c = Controller::new(AdapterOptions::default().with_can_mix_sections(true));
    c.invalidate(Some(&adapter), &selector, chrome);

    assert!(c.move_item(&mut adapter, &selector, chrome, 0, 2));
    assert_eq!(adapter.list.sections()[0].1, vec![Key(2)]);
    assert_eq!(adapter.list.sections()[1].1, vec![Key(1), Key(4)]);

    c.end_move(&mut adapter, &selector, chrome, 1);
    assert_eq!(
        adapter.completed,
        vec![(ItemPosition::new(0, 0), ItemPosition::new(1, 0))]
    );
    assert_eq!(c.count(), 3);
}

fn layout_fingerprints(c: &Controller) -> Vec<Fingerprint> {
    (0..c.layout().len())
        .filter_map(|p| c.layout().fingerprint_of(p))
        .collect()
}

fn layout_sizes(c: &Controller) -> Vec<u32> {
    (0..c.layout().len())
        .filter_map(|p| c.layout().size_of(p))
        .collect()
}

#[test]
fn drag_step_over_several_slots_keeps_layout_in_sync() {
    let mut adapter = Recording {
        list: SectionList::from_sections(vec![
            (0, vec![Key(1), Key(2), Key(3)]),
            (1, vec![Key(4)]),
        ]),
        completed: Vec::new(),
    };
    let selector = UniformSelector::default();
    let chrome = GlobalChrome::default();
    let mut c = Controller::new(AdapterOptions::default().with_estimated_size(10));
    c.invalidate(Some(&adapter), &selector, chrome);
    c.measure(0, 40);
    c.measure(1, 20);
    c.measure(2, 30);

    assert!(c.move_item(&mut adapter, &selector, chrome, 0, 2));
    assert_eq!(adapter.list.sections()[0].1, vec![Key(2), Key(3), Key(1)]);
    assert_eq!(layout_sizes(&c), vec![20, 30, 40, 10]);
    assert_eq!(
        layout_fingerprints(&c),
        Snapshot::compute(c.index(), Some(&adapter)).sequence()
    );
    assert_eq!(c.layout().total_extent(), 100);
}

#[test]
fn drag_across_sections_keeps_layout_in_sync() {
    let mut adapter = Recording {
        list: SectionList::from_sections(vec![(0, vec![Key(1), Key(2)]), (1, vec![Key(4)])]),
        completed: Vec::new(),
    };
    let selector = UniformSelector::new(true, false);
    let chrome = GlobalChrome::default();
    let mut c = Controller::new(
        AdapterOptions::default()
            .with_estimated_size(10)
            .with_can_mix_sections(true),
    );
    c.invalidate(Some(&adapter), &selector, chrome);
    // [SH0, K1, K2, SH1, K4]
    c.measure(1, 40);
    c.measure(2, 20);
    c.measure(4, 30);

    // (0, 0) onto (1, 0): lands at the head of section 1.
    assert!(c.move_item(&mut adapter, &selector, chrome, 1, 4));
    assert_eq!(adapter.list.sections()[1].1, vec![Key(1), Key(4)]);
    assert_eq!(layout_sizes(&c), vec![10, 20, 10, 40, 30]);
    assert_eq!(
        layout_fingerprints(&c),
        Snapshot::compute(c.index(), Some(&adapter)).sequence()
    );
}

#[test]
fn measuring_a_shared_fingerprint_updates_every_copy() {
    let mut layout = MeasuredLayout::new(10);
    layout.apply_snapshot(&snapshot(&[1, 2, 1]));
    assert_eq!(layout.measure(0, 30), 40);
    assert_eq!(layout.size_of(2), Some(30));
    assert!(layout.is_measured(2));
    assert_eq!(layout.total_extent(), 70);

    assert_eq!(layout.apply_snapshot(&snapshot(&[1, 2, 1])), LayoutUpdate::Kept);
    assert_eq!(layout.size_of(2), Some(30));

    // Positions are re-indexed after a swap.
    assert!(layout.swap_sizes(1, 2));
    assert_eq!(layout.measure(1, 5), -50);
    assert_eq!(layout.size_of(0), Some(5));
    assert_eq!(layout.size_of(2), Some(10));
}

#[test]
fn measurements_of_departed_items_are_forgotten() {
    let mut layout = MeasuredLayout::new(10);
    layout.apply_snapshot(&snapshot(&[1, 2]));
    layout.measure(0, 30);
    layout.measure(1, 40);

    // Still in the previous snapshot: kept.
    layout.apply_snapshot(&snapshot(&[2, 3]));
    assert_eq!(layout.measurement_cache_len(), 2);

    layout.apply_snapshot(&snapshot(&[3]));
    let mut cached = layout.export_measurement_cache();
    cached.sort_unstable();
    assert_eq!(cached, vec![(2, 40)]);

    // A new item that happens to reuse the departed fingerprint starts from the estimate.
    layout.apply_snapshot(&snapshot(&[1]));
    assert_eq!(layout.size_of(0), Some(10));
    assert!(!layout.is_measured(0));
}

#[test]
fn single_selection_replaces() {
    let (a, b) = (ItemPosition::new(0, 0), ItemPosition::new(1, 2));
    let mut sel = Selection::new(SelectionMode::Single);
    assert!(sel.select(a));
    assert!(!sel.select(a));
    assert!(sel.select(b));
    assert_eq!(sel.selected(), &[b]);
    assert_eq!(sel.selected_item(), Some(b));
    assert!(!sel.is_selected(a));

    assert!(!sel.deselect(a));
    assert!(sel.deselect(b));
    assert!(sel.is_empty());

    assert!(sel.toggle(a));
    assert!(sel.toggle(b));
    assert!(!sel.is_selected(a));
    assert!(!sel.toggle(b));
    assert!(sel.is_empty());
}

#[test]
fn multiple_selection_accumulates() {
    let (a, b) = (ItemPosition::new(0, 0), ItemPosition::new(0, 1));
    let mut sel = Selection::new(SelectionMode::Multiple);
    assert!(sel.select(a));
    assert!(sel.select(b));
    assert!(!sel.select(a));
    assert_eq!(sel.selected(), &[a, b]);

    assert!(!sel.toggle(a));
    assert_eq!(sel.selected(), &[b]);
    assert!(sel.clear());
    assert!(!sel.clear());

    sel.select(a);
    sel.set_mode(SelectionMode::Single);
    assert!(sel.is_empty());
}

#[test]
fn no_selection_mode_ignores_requests() {
    let a = ItemPosition::new(0, 0);
    let mut sel = Selection::default();
    assert_eq!(sel.mode(), SelectionMode::None);
    assert!(!sel.select(a));
    assert!(!sel.toggle(a));
    assert!(sel.is_empty());
}

#[test]
fn tap_toggles_items_only() {
    let adapter = SectionList::<u8, Key>::from_sections(vec![(0, vec![Key(1), Key(2)])]);
    let mut c =
        Controller::new(AdapterOptions::default().with_selection_mode(SelectionMode::Single));
    c.invalidate(
        Some(&adapter),
        &UniformSelector::new(true, false),
        GlobalChrome::new(true, false),
    );

    // [H, SH, K1, K2]
    assert_eq!(c.tap(0), None);
    assert_eq!(c.tap(1), None);
    assert_eq!(c.tap(9), None);
    assert_eq!(c.tap(2), Some(true));
    assert_eq!(c.tap(3), Some(true));
    assert!(!c.info(2).unwrap().is_selected);
    assert!(c.info(3).unwrap().is_selected);
    assert!(!c.info(1).unwrap().is_selected);

    assert_eq!(c.tap(3), Some(false));
    assert!(c.selection().is_empty());

    c.set_selection_mode(SelectionMode::None);
    assert_eq!(c.tap(2), Some(false));
    assert!(!c.clear_selection());
}
