use core_types::ElementId;
use serde_json::Value;

/// Open extension map attached to every element.
pub type Extensions = serde_json::Map<String, Value>;

/// Concrete element kind, used as the serialization discriminator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ElementKind {
    /// Plain structural element (a group or a gap).
    Element,
    /// Leaf value field tagged with the kind of value it holds.
    Field { value_kind: String },
    /// Conventional top of a form tree.
    Form,
}

impl ElementKind {
    pub const ELEMENT_CLASS: &'static str = "FormElement";
    pub const FIELD_CLASS: &'static str = "Field";
    pub const FORM_CLASS: &'static str = "Form";

    pub fn field(value_kind: impl Into<String>) -> Self {
        ElementKind::Field {
            value_kind: value_kind.into(),
        }
    }

    /// Discriminator value written under the class key.
    pub fn class_name(&self) -> &'static str {
        match self {
            ElementKind::Element => Self::ELEMENT_CLASS,
            ElementKind::Field { .. } => Self::FIELD_CLASS,
            ElementKind::Form => Self::FORM_CLASS,
        }
    }

    pub fn value_kind(&self) -> Option<&str> {
        match self {
            ElementKind::Field { value_kind } => Some(value_kind),
            _ => None,
        }
    }
}

/// Arena slot payload for a single element.
#[derive(Clone, Debug)]
pub(crate) struct ElementRecord {
    pub(crate) kind: ElementKind,
    pub(crate) name: Option<String>,
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
    pub(crate) prototype: Option<ElementId>,
    pub(crate) widget: Option<Value>,
    pub(crate) more: Extensions,
}

impl ElementRecord {
    pub(crate) fn new(kind: ElementKind, name: Option<String>) -> Self {
        Self {
            kind,
            name,
            parent: None,
            children: Vec::new(),
            prototype: None,
            widget: None,
            more: Extensions::new(),
        }
    }

    /// Name usable as a path segment; empty names are gaps.
    pub(crate) fn segment_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}
