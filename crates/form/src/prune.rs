//! Branch-level pruning: keep a single path, or drop an element and every
//! ancestor left empty by its removal.

use crate::error::TreeError;
use crate::path::ElementPath;
use crate::tree::ElementTree;
use core_types::ElementId;

const LOG_TARGET: &str = "form.prune";

/// What `drop_element` removes, relative to the element it is called on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropTarget {
    /// The element the call is made on.
    Itself,
    /// A specific element; must be the caller or one of its descendants.
    Element(ElementId),
    /// An element resolved with `find` from the caller.
    Path(ElementPath),
}

impl From<ElementId> for DropTarget {
    fn from(value: ElementId) -> Self {
        DropTarget::Element(value)
    }
}

impl From<ElementPath> for DropTarget {
    fn from(value: ElementPath) -> Self {
        DropTarget::Path(value)
    }
}

impl From<&str> for DropTarget {
    fn from(value: &str) -> Self {
        DropTarget::Path(value.into())
    }
}

impl From<String> for DropTarget {
    fn from(value: String) -> Self {
        DropTarget::Path(value.into())
    }
}

impl From<Vec<String>> for DropTarget {
    fn from(value: Vec<String>) -> Self {
        DropTarget::Path(value.into())
    }
}

impl<const N: usize> From<[&str; N]> for DropTarget {
    fn from(value: [&str; N]) -> Self {
        DropTarget::Path(value.into())
    }
}

impl ElementTree {
    /// Cut every branch except the one leading from `from` to the element
    /// at `path`. The target's own subtree is left intact.
    ///
    /// Returns the kept target, or `None` (with no change) when `path` does
    /// not resolve.
    pub fn keep(
        &mut self,
        from: ElementId,
        path: impl Into<ElementPath>,
    ) -> Result<Option<ElementId>, TreeError> {
        self.require(from)?;
        let path = path.into();
        let Some(target) = self.resolve(from, &path) else {
            log::debug!(target: LOG_TARGET, "keep {path:?}: no match below {from}, tree unchanged");
            return Ok(None);
        };

        let mut chain = vec![target];
        chain.extend(self.ancestors(target).take_while(|a| *a != from));
        chain.push(from);
        chain.reverse();

        for link in chain.windows(2) {
            self.set_children(link[0], &[link[1]])?;
        }
        log::debug!(
            target: LOG_TARGET,
            "keep {path:?}: kept {target} through {} levels",
            chain.len() - 1
        );
        Ok(Some(target))
    }

    /// Detach the resolved target, then keep detaching each ancestor that
    /// is left without children, stopping at the first ancestor that still
    /// has one (or above the root). The climb is not bounded by `from`.
    ///
    /// Returns the dropped element, or `None` (with no change) when the
    /// target does not resolve.
    pub fn drop_element(
        &mut self,
        from: ElementId,
        target: impl Into<DropTarget>,
    ) -> Result<Option<ElementId>, TreeError> {
        self.require(from)?;
        let dropped = match target.into() {
            DropTarget::Itself => Some(from),
            DropTarget::Element(id) => {
                self.require(id)?;
                (id == from || self.is_ancestor(from, id)).then_some(id)
            }
            DropTarget::Path(path) => self.resolve(from, &path),
        };
        let Some(dropped) = dropped else {
            log::debug!(target: LOG_TARGET, "drop below {from}: nothing to drop");
            return Ok(None);
        };

        let mut parent = self.detach(dropped);
        let mut collapsed = 0usize;
        while let Some(current) = parent {
            if !self.children(current).is_empty() {
                break;
            }
            parent = self.detach(current);
            if parent.is_some() {
                collapsed += 1;
            }
        }
        self.debug_check();
        log::debug!(
            target: LOG_TARGET,
            "dropped {dropped}, collapsed {collapsed} empty ancestors"
        );
        Ok(Some(dropped))
    }
}
