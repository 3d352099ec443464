// Example: flatten a sectioned list and look positions up both ways.
use std::sync::Arc;

use sectionizer::{GlobalChrome, PositionIndex, SectionList, UniformSelector};

fn main() {
    let adapter = SectionList::from_sections(vec![
        ("fruit", vec![Arc::new("apple"), Arc::new("pear")]),
        ("empty", Vec::new()),
        ("veg", vec![Arc::new("leek")]),
    ]);
    let index = PositionIndex::build(
        Some(&adapter),
        &UniformSelector::new(true, true),
        GlobalChrome::new(true, true),
    );

    println!("total_count={}", index.total_count());
    for info in index.iter() {
        let data = index.data_for(&adapter, &info);
        println!(
            "{:>2} {:?} section={:?} item={:?} data={:?}",
            info.position, info.kind, info.section, info.item, data
        );
    }

    println!("position(2, 0)={:?}", index.position(2, 0));
    println!("position(0, 5)={:?}", index.position(0, 5));
    println!("info(99)={:?}", index.info(99));
}
