#![no_main]

use form::{DropTarget, ElementId, ElementTree};
use libfuzzer_sys::fuzz_target;

const NAMES: [&str; 4] = ["a", "b", "", "c"];

fuzz_target!(|data: &[u8]| {
    let mut tree = ElementTree::new();
    let mut ids: Vec<ElementId> = Vec::new();

    for chunk in data.chunks(4) {
        let [op, x, y, z] = match chunk {
            [op, x, y, z] => [*op, *x, *y, *z],
            _ => break,
        };
        if ids.is_empty() || op % 10 == 0 {
            let name = NAMES[x as usize % NAMES.len()];
            let id = if name.is_empty() && y % 2 == 0 {
                tree.create_gap()
            } else {
                tree.create_named(name)
            };
            ids.push(id);
            continue;
        }
        let a = ids[x as usize % ids.len()];
        let b = ids[y as usize % ids.len()];
        let c = ids[z as usize % ids.len()];
        let path = NAMES[z as usize % NAMES.len()];
        match op % 10 {
            1 => {
                let _ = tree.add(a, &[b, c]);
            }
            2 => {
                let _ = tree.add_after(a, b, &[c]);
            }
            3 => {
                let _ = tree.remove(a);
            }
            4 => {
                let _ = tree.set_children(a, &[b, c]);
            }
            5 => {
                let _ = tree.set_parent(a, Some(b));
            }
            6 => {
                let _ = tree.keep(a, path);
            }
            7 => {
                let _ = tree.drop_element(a, DropTarget::Element(b));
            }
            8 => {
                let _ = tree.drop_element(a, path);
            }
            _ => {
                if let Some(found) = tree.find(a, path) {
                    assert!(tree.is_ancestor(a, found));
                }
                let _ = tree.path(b);
            }
        }
        if let Err(violation) = tree.check_invariants() {
            panic!("invariant violated: {violation}");
        }
    }
});
