use crate::tree::ElementTree;
use crate::types::ElementKind;
use core_types::ElementId;
use std::fmt;

/// Deterministic outline of a subtree for test comparisons.
/// Not a stable format.
///
/// One line per element, indented two spaces per level:
/// - `Form`, `FormElement` or `Field<kind>` for the element kind,
/// - followed by the quoted name when one is set (`""` for an empty name),
/// - followed by ` +proto`, ` +widget`, ` +more` markers when present.
#[derive(Debug)]
pub struct TreeSnapshot {
    lines: Vec<String>,
}

impl TreeSnapshot {
    pub fn new(tree: &ElementTree, root: ElementId) -> Self {
        let mut lines = Vec::new();
        walk(tree, root, 0, &mut lines);
        Self { lines }
    }

    pub fn as_lines(&self) -> &[String] {
        &self.lines
    }

    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

impl fmt::Display for TreeSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i != 0 {
                f.write_str("\n")?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}

fn walk(tree: &ElementTree, id: ElementId, depth: usize, out: &mut Vec<String>) {
    let Some(kind) = tree.kind(id) else {
        return;
    };
    let mut line = "  ".repeat(depth);
    match kind {
        ElementKind::Field { value_kind } => {
            line.push_str("Field<");
            line.push_str(value_kind);
            line.push('>');
        }
        other => line.push_str(other.class_name()),
    }
    if let Some(name) = tree.name(id) {
        line.push_str(&format!(" {name:?}"));
    }
    if tree.prototype(id).is_some() {
        line.push_str(" +proto");
    }
    if tree.widget(id).is_some() {
        line.push_str(" +widget");
    }
    if tree.more(id).is_some_and(|m| !m.is_empty()) {
        line.push_str(" +more");
    }
    out.push(line);
    for child in tree.children(id) {
        walk(tree, *child, depth + 1, out);
    }
}

/// Panic with both outlines when the subtree at `root` does not render as
/// `expected` (lines compared after trimming trailing whitespace).
#[track_caller]
pub fn assert_outline(tree: &ElementTree, root: ElementId, expected: &str) {
    let actual = TreeSnapshot::new(tree, root);
    let expected_lines: Vec<&str> = expected
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.is_empty())
        .collect();
    let actual_lines: Vec<&str> = actual.as_lines().iter().map(String::as_str).collect();
    if expected_lines != actual_lines {
        panic!(
            "tree outline mismatch\nexpected:\n{}\nactual:\n{}",
            expected_lines.join("\n"),
            actual.render()
        );
    }
}
