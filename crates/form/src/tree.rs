//! Arena-backed element tree and its linkage primitives.
//!
//! Invariants (checked by [`ElementTree::check_invariants`]):
//! - `child.parent == Some(parent)` iff `parent.children` lists `child`, exactly once.
//! - A node has at most one parent.
//! - The parent relation is acyclic.
//! - Child order only changes when an operation repositions a node.
//!
//! Every mutator validates its input before touching any link, so a rejected
//! call leaves the tree exactly as it was.

use crate::config::TreeConfig;
use crate::error::{InvariantViolation, TreeError};
use crate::traverse::{Ancestors, Descendants};
use crate::types::{ElementKind, ElementRecord, Extensions};
use core_types::ElementId;
use serde_json::Value;
use std::collections::HashSet;

const LOG_TARGET: &str = "form.tree";

#[derive(Clone, Debug, Default)]
pub struct ElementTree {
    slots: Vec<Option<ElementRecord>>,
    live: usize,
    config: TreeConfig,
}

impl ElementTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TreeConfig) -> Self {
        Self {
            slots: Vec::new(),
            live: 0,
            config,
        }
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Number of live elements, attached or not.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.record(id).is_some()
    }

    // ---- creation -------------------------------------------------------

    /// Create a detached element.
    pub fn create(&mut self, kind: ElementKind, name: Option<&str>) -> ElementId {
        let raw = u32::try_from(self.slots.len()).expect("element arena exhausted u32 handles");
        let id = ElementId::from_raw(raw);
        self.slots
            .push(Some(ElementRecord::new(kind, name.map(str::to_owned))));
        self.live += 1;
        id
    }

    /// Plain named element.
    pub fn create_named(&mut self, name: &str) -> ElementId {
        self.create(ElementKind::Element, Some(name))
    }

    /// Unnamed element; transparent to `path` and `find`.
    pub fn create_gap(&mut self) -> ElementId {
        self.create(ElementKind::Element, None)
    }

    pub fn create_field(&mut self, value_kind: &str, name: &str) -> ElementId {
        self.create(ElementKind::field(value_kind), Some(name))
    }

    pub fn create_form(&mut self) -> ElementId {
        self.create(ElementKind::Form, None)
    }

    /// Free a detached element together with its subtree.
    ///
    /// Handles of released elements are never reissued. Prototype links
    /// pointing at them read as absent afterwards.
    pub fn release(&mut self, id: ElementId) -> Result<(), TreeError> {
        let record = self.require(id)?;
        if record.parent.is_some() {
            return Err(TreeError::Attached(id));
        }
        let mut doomed: Vec<ElementId> = self.descendants(id).collect();
        doomed.push(id);
        for gone in &doomed {
            self.slots[gone.slot()] = None;
        }
        self.live -= doomed.len();
        log::trace!(target: LOG_TARGET, "released {id} ({} elements)", doomed.len());
        Ok(())
    }

    // ---- accessors ------------------------------------------------------

    pub(crate) fn record(&self, id: ElementId) -> Option<&ElementRecord> {
        self.slots.get(id.slot()).and_then(Option::as_ref)
    }

    fn record_mut(&mut self, id: ElementId) -> Option<&mut ElementRecord> {
        self.slots.get_mut(id.slot()).and_then(Option::as_mut)
    }

    pub(crate) fn require(&self, id: ElementId) -> Result<&ElementRecord, TreeError> {
        self.record(id).ok_or(TreeError::UnknownElement(id))
    }

    fn require_mut(&mut self, id: ElementId) -> Result<&mut ElementRecord, TreeError> {
        self.record_mut(id).ok_or(TreeError::UnknownElement(id))
    }

    pub fn kind(&self, id: ElementId) -> Option<&ElementKind> {
        self.record(id).map(|r| &r.kind)
    }

    pub fn name(&self, id: ElementId) -> Option<&str> {
        self.record(id).and_then(|r| r.name.as_deref())
    }

    pub fn set_name(&mut self, id: ElementId, name: Option<&str>) -> Result<(), TreeError> {
        self.require_mut(id)?.name = name.map(str::to_owned);
        Ok(())
    }

    /// Non-empty name, if any. Elements without one are gaps.
    pub(crate) fn segment_name(&self, id: ElementId) -> Option<&str> {
        self.record(id).and_then(ElementRecord::segment_name)
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.record(id).and_then(|r| r.parent)
    }

    /// Current children in stored order; empty for unknown handles.
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.record(id).map(|r| r.children.as_slice()).unwrap_or(&[])
    }

    pub fn is_attached(&self, id: ElementId) -> bool {
        self.parent(id).is_some()
    }

    pub fn prototype(&self, id: ElementId) -> Option<ElementId> {
        self.record(id)
            .and_then(|r| r.prototype)
            .filter(|proto| self.contains(*proto))
    }

    /// Point `id` at a prototype element. The prototype is not linked into
    /// the tree and is never visited by `find`, `path`, `keep` or `drop`.
    pub fn set_prototype(
        &mut self,
        id: ElementId,
        prototype: Option<ElementId>,
    ) -> Result<(), TreeError> {
        if let Some(proto) = prototype {
            self.require(proto)?;
        }
        self.require_mut(id)?.prototype = prototype;
        Ok(())
    }

    pub fn widget(&self, id: ElementId) -> Option<&Value> {
        self.record(id).and_then(|r| r.widget.as_ref())
    }

    pub fn set_widget(&mut self, id: ElementId, widget: Option<Value>) -> Result<(), TreeError> {
        self.require_mut(id)?.widget = widget;
        Ok(())
    }

    pub fn more(&self, id: ElementId) -> Option<&Extensions> {
        self.record(id).map(|r| &r.more)
    }

    pub fn more_mut(&mut self, id: ElementId) -> Option<&mut Extensions> {
        self.record_mut(id).map(|r| &mut r.more)
    }

    // ---- navigation -----------------------------------------------------

    /// Topmost ancestor, or `id` itself when detached.
    pub fn root(&self, id: ElementId) -> ElementId {
        self.ancestors(id).last().unwrap_or(id)
    }

    /// Strict ancestors, nearest first.
    pub fn ancestors(&self, id: ElementId) -> Ancestors<'_> {
        Ancestors::new(self, id)
    }

    /// Strict descendants in pre-order.
    pub fn descendants(&self, id: ElementId) -> Descendants<'_> {
        Descendants::new(self, id)
    }

    /// Whether `ancestor` lies strictly above `id`.
    pub fn is_ancestor(&self, ancestor: ElementId, id: ElementId) -> bool {
        self.ancestors(id).any(|a| a == ancestor)
    }

    // ---- linkage --------------------------------------------------------

    /// Append `items` to `parent`, in order. Items are detached from their
    /// current parent first; an item already under `parent` moves to the end.
    ///
    /// Returns `parent` so trees can be built bottom-up.
    pub fn add(&mut self, parent: ElementId, items: &[ElementId]) -> Result<ElementId, TreeError> {
        self.require(parent)?;
        let items = dedup_ids(items);
        for &item in &items {
            self.ensure_attachable(parent, item)?;
        }
        for item in items {
            self.detach(item);
            self.attach_at(parent, item, None);
        }
        self.debug_check();
        Ok(parent)
    }

    /// Insert `items` right after `reference`, which must be a child of `parent`.
    pub fn add_after(
        &mut self,
        parent: ElementId,
        reference: ElementId,
        items: &[ElementId],
    ) -> Result<ElementId, TreeError> {
        self.require(parent)?;
        if self.require(reference)?.parent != Some(parent) {
            return Err(TreeError::NotAChild {
                parent,
                child: reference,
            });
        }
        let items = dedup_ids(items);
        for &item in &items {
            if item == reference {
                return Err(TreeError::InvalidReference(reference));
            }
            self.ensure_attachable(parent, item)?;
        }
        for &item in &items {
            self.detach(item);
        }
        let Some(pos) = self.position_of(parent, reference) else {
            return Err(TreeError::NotAChild {
                parent,
                child: reference,
            });
        };
        for (offset, item) in items.into_iter().enumerate() {
            self.attach_at(parent, item, Some(pos + 1 + offset));
        }
        self.debug_check();
        Ok(parent)
    }

    /// Detach `item` from its parent. Returns whether it was attached.
    pub fn remove(&mut self, item: ElementId) -> Result<bool, TreeError> {
        self.require(item)?;
        let detached = self.detach(item).is_some();
        self.debug_check();
        Ok(detached)
    }

    /// Detach `item` if it is a direct child of `parent`; otherwise a no-op.
    pub fn remove_child(&mut self, parent: ElementId, item: ElementId) -> Result<bool, TreeError> {
        self.require(parent)?;
        if self.require(item)?.parent != Some(parent) {
            return Ok(false);
        }
        self.detach(item);
        self.debug_check();
        Ok(true)
    }

    /// Replace every child of `parent` in one step.
    ///
    /// Previous children that are not listed end up detached; listed items
    /// are taken from wherever they are currently attached.
    pub fn set_children(
        &mut self,
        parent: ElementId,
        items: &[ElementId],
    ) -> Result<(), TreeError> {
        self.require(parent)?;
        let items = dedup_ids(items);
        for &item in &items {
            self.ensure_attachable(parent, item)?;
        }
        let previous = std::mem::take(&mut self.require_mut(parent)?.children);
        for old in &previous {
            if let Some(record) = self.record_mut(*old) {
                record.parent = None;
            }
        }
        for item in items {
            self.detach(item);
            self.attach_at(parent, item, None);
        }
        log::trace!(
            target: LOG_TARGET,
            "replaced children of {parent}: {} -> {}",
            previous.len(),
            self.children(parent).len()
        );
        self.debug_check();
        Ok(())
    }

    /// Move `id` under `parent` (appended last), or detach it when `None`.
    pub fn set_parent(
        &mut self,
        id: ElementId,
        parent: Option<ElementId>,
    ) -> Result<(), TreeError> {
        match parent {
            Some(parent) => self.add(parent, &[id]).map(|_| ()),
            None => self.remove(id).map(|_| ()),
        }
    }

    fn ensure_attachable(&self, parent: ElementId, item: ElementId) -> Result<(), TreeError> {
        self.require(item)?;
        if item == parent || self.is_ancestor(item, parent) {
            return Err(TreeError::Cycle {
                parent,
                child: item,
            });
        }
        Ok(())
    }

    fn position_of(&self, parent: ElementId, child: ElementId) -> Option<usize> {
        self.children(parent).iter().position(|c| *c == child)
    }

    /// Unlink `item` from its parent, returning the former parent.
    pub(crate) fn detach(&mut self, item: ElementId) -> Option<ElementId> {
        let parent = self.record_mut(item)?.parent.take()?;
        if let Some(record) = self.record_mut(parent) {
            if let Some(pos) = record.children.iter().position(|c| *c == item) {
                record.children.remove(pos);
            }
        }
        log::trace!(target: LOG_TARGET, "detached {item} from {parent}");
        Some(parent)
    }

    /// Link an already detached `item` under `parent`.
    fn attach_at(&mut self, parent: ElementId, item: ElementId, index: Option<usize>) {
        if let Some(record) = self.record_mut(parent) {
            match index {
                Some(index) if index < record.children.len() => record.children.insert(index, item),
                _ => record.children.push(item),
            }
        }
        if let Some(record) = self.record_mut(item) {
            record.parent = Some(parent);
        }
        log::trace!(target: LOG_TARGET, "attached {item} under {parent}");
    }

    // ---- invariants -----------------------------------------------------

    /// Verify link consistency across the whole arena.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        for (slot, record) in self.slots.iter().enumerate() {
            let Some(record) = record else { continue };
            let id = ElementId::from_raw(slot as u32);
            let mut seen = HashSet::with_capacity(record.children.len());
            for &child in &record.children {
                let Some(child_record) = self.record(child) else {
                    return Err(InvariantViolation::DanglingChild { parent: id, child });
                };
                if !seen.insert(child) {
                    return Err(InvariantViolation::DuplicateChild { parent: id, child });
                }
                if child_record.parent != Some(id) {
                    return Err(InvariantViolation::ParentMismatch { parent: id, child });
                }
            }
            if let Some(parent) = record.parent {
                let listed = self
                    .record(parent)
                    .is_some_and(|p| p.children.contains(&id));
                if !listed {
                    return Err(InvariantViolation::Unlisted { parent, child: id });
                }
            }
            let mut steps = 0usize;
            let mut cursor = record.parent;
            while let Some(up) = cursor {
                steps += 1;
                if up == id || steps > self.live {
                    return Err(InvariantViolation::Cycle(id));
                }
                cursor = self.record(up).and_then(|r| r.parent);
            }
        }
        Ok(())
    }

    #[cfg(feature = "tree-invariants")]
    pub(crate) fn debug_check(&self) {
        if let Err(violation) = self.check_invariants() {
            debug_assert!(false, "tree invariant violated: {violation}");
        }
    }

    #[cfg(not(feature = "tree-invariants"))]
    #[inline]
    pub(crate) fn debug_check(&self) {}

    /// Drop every slot allocated at or after `first` (used to roll back a
    /// failed multi-element construction).
    pub(crate) fn truncate_slots(&mut self, first: usize) {
        if first >= self.slots.len() {
            return;
        }
        let dropped = self.slots[first..].iter().filter(|s| s.is_some()).count();
        self.slots.truncate(first);
        self.live -= dropped;
    }

    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

fn dedup_ids(items: &[ElementId]) -> Vec<ElementId> {
    let mut seen = HashSet::with_capacity(items.len());
    items.iter().copied().filter(|id| seen.insert(*id)).collect()
}
