use core_types::ElementId;

/// Rejected structural mutation. Raised before anything is changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TreeError {
    UnknownElement(ElementId),
    NotAChild {
        parent: ElementId,
        child: ElementId,
    },
    Cycle {
        parent: ElementId,
        child: ElementId,
    },
    InvalidReference(ElementId),
    Attached(ElementId),
}

impl std::fmt::Display for TreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreeError::UnknownElement(id) => write!(f, "unknown element {id}"),
            TreeError::NotAChild { parent, child } => {
                write!(f, "{child} is not a child of {parent}")
            }
            TreeError::Cycle { parent, child } => {
                write!(f, "attaching {child} under {parent} would create a cycle")
            }
            TreeError::InvalidReference(id) => {
                write!(f, "{id} cannot be inserted relative to itself")
            }
            TreeError::Attached(id) => write!(f, "{id} is still attached to a parent"),
        }
    }
}

impl std::error::Error for TreeError {}

/// Failure while converting between elements and their object form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ObjError {
    UnknownElement(ElementId),
    MissingClass,
    UnknownClass(String),
    InvalidField {
        key: &'static str,
        expected: &'static str,
    },
    PrototypeCycle(ElementId),
    Tree(TreeError),
}

impl std::fmt::Display for ObjError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjError::UnknownElement(id) => write!(f, "unknown element {id}"),
            ObjError::MissingClass => write!(f, "object has no class discriminator"),
            ObjError::UnknownClass(class) => write!(f, "unknown element class: {class:?}"),
            ObjError::InvalidField { key, expected } => {
                write!(f, "field {key:?} must be {expected}")
            }
            ObjError::PrototypeCycle(id) => {
                write!(f, "prototype chain of {id} refers back to itself")
            }
            ObjError::Tree(err) => write!(f, "rebuilding element: {err}"),
        }
    }
}

impl std::error::Error for ObjError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ObjError::Tree(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TreeError> for ObjError {
    fn from(err: TreeError) -> Self {
        ObjError::Tree(err)
    }
}

/// Broken link found by `ElementTree::check_invariants`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// `parent` lists `child`, but `child` points elsewhere.
    ParentMismatch { parent: ElementId, child: ElementId },
    /// `child` points at `parent`, but `parent` does not list it.
    Unlisted { parent: ElementId, child: ElementId },
    DuplicateChild { parent: ElementId, child: ElementId },
    DanglingChild { parent: ElementId, child: ElementId },
    Cycle(ElementId),
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvariantViolation::ParentMismatch { parent, child } => {
                write!(f, "{parent} lists {child} but {child} has another parent")
            }
            InvariantViolation::Unlisted { parent, child } => {
                write!(f, "{child} claims parent {parent} which does not list it")
            }
            InvariantViolation::DuplicateChild { parent, child } => {
                write!(f, "{parent} lists {child} more than once")
            }
            InvariantViolation::DanglingChild { parent, child } => {
                write!(f, "{parent} lists released element {child}")
            }
            InvariantViolation::Cycle(id) => write!(f, "{id} is its own ancestor"),
        }
    }
}

impl std::error::Error for InvariantViolation {}
