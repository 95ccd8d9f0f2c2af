use crate::tree::ElementTree;
use core_types::ElementId;

/// Pre-order walk over the strict subtree of an element.
///
/// Children are visited in stored order and each child's subtree is
/// exhausted before its next sibling.
pub struct Descendants<'a> {
    tree: &'a ElementTree,
    stack: Vec<ElementId>,
}

impl<'a> Descendants<'a> {
    pub(crate) fn new(tree: &'a ElementTree, start: ElementId) -> Self {
        let mut stack = Vec::new();
        stack.extend(tree.children(start).iter().rev().copied());
        Self { tree, stack }
    }
}

impl Iterator for Descendants<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<ElementId> {
        let current = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(current).iter().rev().copied());
        Some(current)
    }
}

/// Walk up the parent links, nearest ancestor first.
pub struct Ancestors<'a> {
    tree: &'a ElementTree,
    next: Option<ElementId>,
}

impl<'a> Ancestors<'a> {
    pub(crate) fn new(tree: &'a ElementTree, start: ElementId) -> Self {
        Self {
            tree,
            next: tree.parent(start),
        }
    }
}

impl Iterator for Ancestors<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<ElementId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}
