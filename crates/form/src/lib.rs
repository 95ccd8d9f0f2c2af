//! Structural engine for form element trees.
//!
//! Elements live in an [`ElementTree`] arena and are addressed by
//! [`ElementId`] handles. The tree keeps parent and child links consistent,
//! resolves dotted name paths through unnamed gap elements, prunes whole
//! branches, and converts elements to and from a plain object form.
//!
//! ```
//! use form::ElementTree;
//!
//! let mut tree = ElementTree::new();
//! let form = tree.create_form();
//! let group = tree.create_gap();
//! let email = tree.create_field("string", "email");
//! let group = tree.add(group, &[email]).unwrap();
//! tree.add(form, &[group]).unwrap();
//!
//! assert_eq!(tree.find(form, "email"), Some(email));
//! assert_eq!(tree.path(email), "email");
//! ```

pub mod config;
pub mod error;
pub mod obj;
pub mod path;
pub mod prune;
#[cfg(any(test, feature = "tree-snapshot"))]
pub mod snapshot;
pub mod traverse;
pub mod tree;

mod types;

pub use crate::config::TreeConfig;
pub use crate::error::{InvariantViolation, ObjError, TreeError};
pub use crate::obj::{CLASS_KEY, Obj};
pub use crate::path::ElementPath;
pub use crate::prune::DropTarget;
pub use crate::tree::ElementTree;
pub use crate::types::{ElementKind, Extensions};
pub use core_types::ElementId;
