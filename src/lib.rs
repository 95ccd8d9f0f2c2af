//! Form element trees: linkage, gap-tolerant lookup, pruning and the
//! plain-object form. See the `form` crate for the engine itself.

pub use core_types::ElementId;
pub use form::{
    CLASS_KEY, DropTarget, ElementKind, ElementPath, ElementTree, Extensions, InvariantViolation,
    Obj, ObjError, TreeConfig, TreeError,
};
