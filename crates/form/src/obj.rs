//! Plain-object form of elements.
//!
//! The object form is a JSON object with a reserved class key naming the
//! element kind:
//!
//! ```text
//! { "@class": "Field", "name": "email", "valueType": "string",
//!   "prototype": { "@class": "FormElement", ... },
//!   "widget": <any>, "more": { ... } }
//! ```
//!
//! `name`, `prototype` and `widget` are written only when set, `more` only
//! when non-empty. Parent and children are not part of the object form;
//! [`ElementTree::to_tree_obj`] additionally writes a `children` array for
//! whole-subtree persistence, which [`ElementTree::from_obj`] reads back.

use crate::error::ObjError;
use crate::tree::ElementTree;
use crate::types::{ElementKind, Extensions};
use core_types::ElementId;
use serde_json::Value;
use std::collections::HashSet;

pub type Obj = serde_json::Map<String, Value>;

pub const CLASS_KEY: &str = "@class";
pub const NAME_KEY: &str = "name";
pub const VALUE_TYPE_KEY: &str = "valueType";
pub const PROTOTYPE_KEY: &str = "prototype";
pub const WIDGET_KEY: &str = "widget";
pub const MORE_KEY: &str = "more";
pub const CHILDREN_KEY: &str = "children";

const LOG_TARGET: &str = "form.obj";

impl ElementTree {
    /// Object form of `id` without tree links. Keys listed in `exclude` are
    /// omitted at every nesting level.
    pub fn to_obj(&self, id: ElementId, exclude: &[&str]) -> Result<Obj, ObjError> {
        let writer = ObjWriter {
            tree: self,
            exclude,
            with_children: false,
        };
        writer.write(id, &mut HashSet::new())
    }

    /// Like [`to_obj`](Self::to_obj), plus a `children` array holding the
    /// object form of every child, recursively.
    pub fn to_tree_obj(&self, id: ElementId, exclude: &[&str]) -> Result<Obj, ObjError> {
        let writer = ObjWriter {
            tree: self,
            exclude,
            with_children: true,
        };
        writer.write(id, &mut HashSet::new())
    }

    /// Rebuild an element from its object form. The result is detached.
    ///
    /// A nested prototype becomes its own (detached) element; a `children`
    /// array is rebuilt and attached in order. On error nothing is left
    /// behind in the tree.
    pub fn from_obj(&mut self, obj: &Obj) -> Result<ElementId, ObjError> {
        let mark = self.slot_count();
        match self.read_obj(obj) {
            Ok(id) => Ok(id),
            Err(err) => {
                log::debug!(target: LOG_TARGET, "from_obj failed: {err}");
                self.truncate_slots(mark);
                Err(err)
            }
        }
    }

    fn read_obj(&mut self, obj: &Obj) -> Result<ElementId, ObjError> {
        let kind = read_kind(obj)?;
        let name = optional_str(obj, NAME_KEY)?.map(str::to_owned);
        let widget = obj.get(WIDGET_KEY).cloned();
        let more = match obj.get(MORE_KEY) {
            None | Some(Value::Null) => Extensions::new(),
            Some(Value::Object(more)) => more.clone(),
            Some(_) => {
                return Err(ObjError::InvalidField {
                    key: MORE_KEY,
                    expected: "an object",
                });
            }
        };
        let prototype = match obj.get(PROTOTYPE_KEY) {
            None | Some(Value::Null) => None,
            Some(Value::Object(proto)) => Some(self.read_obj(proto)?),
            Some(_) => {
                return Err(ObjError::InvalidField {
                    key: PROTOTYPE_KEY,
                    expected: "an object",
                });
            }
        };

        let id = self.create(kind, name.as_deref());
        self.set_prototype(id, prototype)?;
        self.set_widget(id, widget)?;
        if let Some(slot) = self.more_mut(id) {
            *slot = more;
        }

        match obj.get(CHILDREN_KEY) {
            None | Some(Value::Null) => {}
            Some(Value::Array(children)) => {
                let mut built = Vec::with_capacity(children.len());
                for child in children {
                    let Value::Object(child) = child else {
                        return Err(ObjError::InvalidField {
                            key: CHILDREN_KEY,
                            expected: "an array of objects",
                        });
                    };
                    built.push(self.read_obj(child)?);
                }
                self.add(id, &built)?;
            }
            Some(_) => {
                return Err(ObjError::InvalidField {
                    key: CHILDREN_KEY,
                    expected: "an array of objects",
                });
            }
        }
        Ok(id)
    }
}

struct ObjWriter<'a> {
    tree: &'a ElementTree,
    exclude: &'a [&'a str],
    with_children: bool,
}

impl ObjWriter<'_> {
    fn included(&self, key: &str) -> bool {
        !self.exclude.contains(&key)
    }

    fn write(&self, id: ElementId, visiting: &mut HashSet<ElementId>) -> Result<Obj, ObjError> {
        let tree = self.tree;
        let kind = tree.kind(id).ok_or(ObjError::UnknownElement(id))?;
        if !visiting.insert(id) {
            return Err(ObjError::PrototypeCycle(id));
        }

        let mut obj = Obj::new();
        if self.included(CLASS_KEY) {
            obj.insert(CLASS_KEY.to_owned(), Value::from(kind.class_name()));
        }
        if let Some(name) = tree.name(id) {
            if self.included(NAME_KEY) {
                obj.insert(NAME_KEY.to_owned(), Value::from(name));
            }
        }
        if let Some(value_kind) = kind.value_kind() {
            if self.included(VALUE_TYPE_KEY) {
                obj.insert(VALUE_TYPE_KEY.to_owned(), Value::from(value_kind));
            }
        }
        if let Some(proto) = tree.prototype(id) {
            if self.included(PROTOTYPE_KEY) {
                let proto = self.write(proto, visiting)?;
                obj.insert(PROTOTYPE_KEY.to_owned(), Value::Object(proto));
            }
        }
        if let Some(widget) = tree.widget(id) {
            if self.included(WIDGET_KEY) {
                obj.insert(WIDGET_KEY.to_owned(), widget.clone());
            }
        }
        if let Some(more) = tree.more(id).filter(|m| !m.is_empty()) {
            if self.included(MORE_KEY) {
                obj.insert(MORE_KEY.to_owned(), Value::Object(more.clone()));
            }
        }
        if self.with_children && self.included(CHILDREN_KEY) {
            let children = tree
                .children(id)
                .iter()
                .map(|child| self.write(*child, visiting).map(Value::Object))
                .collect::<Result<Vec<_>, _>>()?;
            if !children.is_empty() {
                obj.insert(CHILDREN_KEY.to_owned(), Value::Array(children));
            }
        }

        visiting.remove(&id);
        Ok(obj)
    }
}

fn read_kind(obj: &Obj) -> Result<ElementKind, ObjError> {
    let class = match obj.get(CLASS_KEY) {
        None => return Err(ObjError::MissingClass),
        Some(Value::String(class)) => class.as_str(),
        Some(_) => {
            return Err(ObjError::InvalidField {
                key: CLASS_KEY,
                expected: "a string",
            });
        }
    };
    match class {
        ElementKind::ELEMENT_CLASS => Ok(ElementKind::Element),
        ElementKind::FORM_CLASS => Ok(ElementKind::Form),
        ElementKind::FIELD_CLASS => {
            let value_kind = optional_str(obj, VALUE_TYPE_KEY)?.ok_or(ObjError::InvalidField {
                key: VALUE_TYPE_KEY,
                expected: "a string",
            })?;
            Ok(ElementKind::field(value_kind))
        }
        other => Err(ObjError::UnknownClass(other.to_owned())),
    }
}

fn optional_str<'a>(obj: &'a Obj, key: &'static str) -> Result<Option<&'a str>, ObjError> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.as_str())),
        Some(_) => Err(ObjError::InvalidField {
            key,
            expected: "a string",
        }),
    }
}
