// Example: diff two snapshots by fingerprint after an insertion.
use std::sync::Arc;

use sectionizer::{
    ContentFingerprintCache, GlobalChrome, PositionIndex, SectionList, UniformSelector,
};

fn main() {
    let mut adapter = SectionList::from_sections(vec![(
        "inbox",
        vec![Arc::new("hello"), Arc::new("world")],
    )]);
    let selector = UniformSelector::new(true, false);
    let chrome = GlobalChrome::default();

    let mut index = PositionIndex::build(Some(&adapter), &selector, chrome);
    let mut cache = ContentFingerprintCache::new();
    cache.refresh(&index, Some(&adapter));

    // Nothing changed: the aggregate gate says so without a per-position walk.
    println!("no-op refresh: {:?}", cache.refresh(&index, Some(&adapter)));

    // A new message arrives at the top. Positions shift, fingerprints do not.
    if let Some(items) = adapter.items_mut(0) {
        items.insert(0, Arc::new("breaking"));
    }
    index.rebuild(Some(&adapter), &selector, chrome);
    println!("after insert: {:?}", cache.refresh(&index, Some(&adapter)));

    for (position, reuse) in cache.classify().into_iter().enumerate() {
        println!("position {position}: {reuse:?}");
    }
}
