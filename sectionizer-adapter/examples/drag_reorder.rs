// Example: drive an interactive reorder through the controller.
use std::sync::Arc;

use sectionizer::{GlobalChrome, SectionList, UniformSelector};
use sectionizer_adapter::{AdapterOptions, Controller};

fn main() {
    let mut adapter = SectionList::from_sections(vec![(
        "tasks",
        vec![Arc::new("write"), Arc::new("review"), Arc::new("ship")],
    )]);
    let selector = UniformSelector::default();
    let chrome = GlobalChrome::default();

    let mut c = Controller::new(AdapterOptions::default().with_estimated_size(40));
    c.invalidate(Some(&adapter), &selector, chrome);
    c.measure(0, 90);

    // Drag "write" down two slots, one step at a time.
    let moved = c.move_item(&mut adapter, &selector, chrome, 0, 1)
        && c.move_item(&mut adapter, &selector, chrome, 1, 2);
    println!("moved={moved} suspended={}", c.is_reload_suspended());

    // Data-changed signals during the drag are deferred.
    println!("invalidate while dragging: {:?}", c.invalidate(Some(&adapter), &selector, chrome));

    let update = c.end_move(&mut adapter, &selector, chrome, 2);
    println!("drop: {update:?}");
    println!("order: {:?}", adapter.sections()[0].1);
    println!("size at 2: {:?}", c.layout().size_of(2));
}
