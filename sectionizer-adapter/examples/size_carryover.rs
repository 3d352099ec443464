// Example: measured sizes follow items when the data set is reordered.
use std::sync::Arc;

use sectionizer::{GlobalChrome, ItemPosition, SectionList, UniformSelector};
use sectionizer_adapter::{AdapterOptions, Controller};

fn main() {
    let rows: Vec<Arc<String>> = (0..5).map(|i| Arc::new(format!("row {i}"))).collect();
    let mut adapter = SectionList::from_sections(vec![("all", rows)]);
    let selector = UniformSelector::default();
    let chrome = GlobalChrome::default().with_header(true);

    let mut c = Controller::new(AdapterOptions::default().with_estimated_size(20));
    c.invalidate(Some(&adapter), &selector, chrome);

    // The host realizes the header and the first two rows and reports their sizes.
    c.measure(0, 64);
    c.measure(1, 33);
    c.measure(2, 48);
    println!("total_extent={}", c.layout().total_extent());

    // Reverse the rows: every position changes, no measurement is lost.
    if let Some(items) = adapter.items_mut(0) {
        items.reverse();
    }
    let update = c.invalidate(Some(&adapter), &selector, chrome);
    println!("update={update:?} total_extent={}", c.layout().total_extent());

    for position in 0..c.count() {
        println!(
            "position {position}: size={:?} measured={}",
            c.layout().size_of(position),
            c.layout().is_measured(position)
        );
    }
    println!(
        "offset of (0, 4)={:?}",
        c.scroll_offset_for_item(ItemPosition::new(0, 4))
    );
}
