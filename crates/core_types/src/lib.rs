//! Identifiers shared by the form crates.

/// Opaque handle for an element stored in an `ElementTree`.
///
/// Handles are only meaningful for the tree that issued them. A handle is
/// never reused inside one tree, so a released element stays unknown rather
/// than aliasing a newer one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u32);

impl ElementId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn as_raw(self) -> u32 {
        self.0
    }

    /// Slot index inside the issuing arena.
    #[inline]
    pub const fn slot(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for ElementId {
    #[inline]
    fn from(raw: u32) -> Self {
        Self::from_raw(raw)
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
