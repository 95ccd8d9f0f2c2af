#![no_main]

use form::{ElementTree, Obj};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(obj) = serde_json::from_slice::<Obj>(data) else {
        return;
    };
    let mut tree = ElementTree::new();
    match tree.from_obj(&obj) {
        Ok(id) => {
            let saved = tree.to_tree_obj(id, &[]).expect("rebuilt element serializes");
            let again = tree.from_obj(&saved).expect("saved form rebuilds");
            assert_eq!(tree.to_tree_obj(again, &[]).ok(), Some(saved));
        }
        Err(_) => assert!(tree.is_empty()),
    }
    if let Err(violation) = tree.check_invariants() {
        panic!("invariant violated: {violation}");
    }
});
