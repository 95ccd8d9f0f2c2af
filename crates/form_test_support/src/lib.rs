//! Shared fixture trees for the form crate's tests and benches.

use form::{ElementId, ElementTree};
use serde_json::Value;

/// Handles into the gap fixture built by [`gap_tree`].
///
/// ```text
/// root
/// └─ (gap)                      gap1
///    ├─ child11
///    │  ├─ child111
///    │  └─ (gap)                gap112
///    │     └─ child1121
///    └─ (gap)                   gap12
///       └─ child121
///          ├─ child1211
///          └─ child111          child111_duplicate
/// ```
#[derive(Clone, Copy, Debug)]
pub struct GapTree {
    pub root: ElementId,
    pub gap1: ElementId,
    pub child11: ElementId,
    pub child111: ElementId,
    pub gap112: ElementId,
    pub child1121: ElementId,
    pub gap12: ElementId,
    pub child121: ElementId,
    pub child1211: ElementId,
    pub child111_duplicate: ElementId,
}

pub fn gap_tree(tree: &mut ElementTree) -> GapTree {
    let root = tree.create_named("root");
    let gap1 = tree.create_gap();
    let child11 = tree.create_named("child11");
    let child111 = tree.create_named("child111");
    let gap112 = tree.create_gap();
    let child1121 = tree.create_named("child1121");
    let gap12 = tree.create_gap();
    let child121 = tree.create_named("child121");
    let child1211 = tree.create_named("child1211");
    let child111_duplicate = tree.create_named("child111");

    attach(tree, gap112, &[child1121]);
    attach(tree, child11, &[child111, gap112]);
    attach(tree, child121, &[child1211, child111_duplicate]);
    attach(tree, gap12, &[child121]);
    attach(tree, gap1, &[child11, gap12]);
    attach(tree, root, &[gap1]);

    GapTree {
        root,
        gap1,
        child11,
        child111,
        gap112,
        child1121,
        gap12,
        child121,
        child1211,
        child111_duplicate,
    }
}

/// `root → [child1, child2 → child21 → child211]`.
#[derive(Clone, Copy, Debug)]
pub struct DropTree {
    pub root: ElementId,
    pub child1: ElementId,
    pub child2: ElementId,
    pub child21: ElementId,
    pub child211: ElementId,
}

pub fn drop_tree(tree: &mut ElementTree) -> DropTree {
    let root = tree.create_named("root");
    let child1 = tree.create_named("child1");
    let child2 = tree.create_named("child2");
    let child21 = tree.create_named("child21");
    let child211 = tree.create_named("child211");

    attach(tree, child21, &[child211]);
    attach(tree, child2, &[child21]);
    attach(tree, root, &[child1, child2]);

    DropTree {
        root,
        child1,
        child2,
        child21,
        child211,
    }
}

/// Unnamed form with `[field1, formElement1 → [field2], formElement2]`.
#[derive(Clone, Copy, Debug)]
pub struct SampleForm {
    pub form: ElementId,
    pub field1: ElementId,
    pub form_element1: ElementId,
    pub field2: ElementId,
    pub form_element2: ElementId,
}

pub fn sample_form(tree: &mut ElementTree) -> SampleForm {
    let form = tree.create_form();
    let field1 = tree.create_field("string", "field1");
    let form_element1 = tree.create_named("formElement1");
    let field2 = tree.create_field("string", "field2");
    let form_element2 = tree.create_named("formElement2");

    attach(tree, form_element1, &[field2]);
    attach(tree, form, &[field1, form_element1, form_element2]);

    SampleForm {
        form,
        field1,
        form_element1,
        field2,
        form_element2,
    }
}

/// Balanced tree of `depth` levels with `fan_out` children per node.
/// Every third level is a gap; other nodes are named `n<level>_<index>`.
/// Returns the root.
pub fn wide_tree(tree: &mut ElementTree, depth: usize, fan_out: usize) -> ElementId {
    let root = tree.create_named("root");
    let mut level = vec![root];
    for d in 1..=depth {
        let mut next = Vec::with_capacity(level.len() * fan_out);
        for (i, parent) in level.iter().enumerate() {
            let mut kids = Vec::with_capacity(fan_out);
            for k in 0..fan_out {
                let child = if d % 3 == 0 {
                    tree.create_gap()
                } else {
                    tree.create_named(&format!("n{d}_{}", i * fan_out + k))
                };
                kids.push(child);
            }
            attach(tree, *parent, &kids);
            next.extend(kids);
        }
        level = next;
    }
    root
}

/// Assert that the tree's links are consistent, with a readable message.
#[track_caller]
pub fn assert_links_consistent(tree: &ElementTree) {
    if let Err(violation) = tree.check_invariants() {
        panic!("tree links inconsistent: {violation}");
    }
}

/// Unwrap a `serde_json::json!` object literal into a map.
#[track_caller]
pub fn obj(value: Value) -> form::Obj {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

#[track_caller]
fn attach(tree: &mut ElementTree, parent: ElementId, children: &[ElementId]) {
    if let Err(err) = tree.add(parent, children) {
        panic!("fixture construction failed: {err}");
    }
}
