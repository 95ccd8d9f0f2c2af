//! Name paths and gap-tolerant lookup.
//!
//! A path is a sequence of element names. Unnamed (or empty-named) elements
//! are gaps: they never contribute a segment and never match one, but lookups
//! still descend through them.

use crate::tree::ElementTree;
use core_types::ElementId;
use memchr::memchr_iter;

const LOG_TARGET: &str = "form.path";

/// Lookup path, either separator-joined or already split into segments.
///
/// String paths are split with the tree's configured separator at lookup time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ElementPath {
    Joined(String),
    Segments(Vec<String>),
}

impl ElementPath {
    /// Segments to match, in order. An empty string has no segments.
    pub fn segments(&self, separator: char) -> Vec<&str> {
        match self {
            ElementPath::Joined(joined) => split_segments(joined, separator),
            ElementPath::Segments(segments) => segments.iter().map(String::as_str).collect(),
        }
    }
}

fn split_segments(joined: &str, separator: char) -> Vec<&str> {
    if joined.is_empty() {
        return Vec::new();
    }
    if !separator.is_ascii() {
        return joined.split(separator).collect();
    }
    let mut out = Vec::new();
    let mut start = 0;
    for pos in memchr_iter(separator as u8, joined.as_bytes()) {
        out.push(&joined[start..pos]);
        start = pos + 1;
    }
    out.push(&joined[start..]);
    out
}

impl From<&str> for ElementPath {
    fn from(value: &str) -> Self {
        ElementPath::Joined(value.to_owned())
    }
}

impl From<String> for ElementPath {
    fn from(value: String) -> Self {
        ElementPath::Joined(value)
    }
}

impl From<&String> for ElementPath {
    fn from(value: &String) -> Self {
        ElementPath::Joined(value.clone())
    }
}

impl From<Vec<String>> for ElementPath {
    fn from(value: Vec<String>) -> Self {
        ElementPath::Segments(value)
    }
}

impl From<&[&str]> for ElementPath {
    fn from(value: &[&str]) -> Self {
        ElementPath::Segments(value.iter().map(|s| (*s).to_owned()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ElementPath {
    fn from(value: [&str; N]) -> Self {
        ElementPath::from(&value[..])
    }
}

impl From<&ElementPath> for ElementPath {
    fn from(value: &ElementPath) -> Self {
        value.clone()
    }
}

impl ElementTree {
    /// Names of `id` and its named ancestors, root first, joined by the
    /// configured separator. Empty when `id` itself is a gap.
    pub fn path(&self, id: ElementId) -> String {
        let Some(own) = self.segment_name(id) else {
            return String::new();
        };
        let mut names = vec![own];
        names.extend(self.ancestors(id).filter_map(|a| self.segment_name(a)));
        names.reverse();

        let mut sep = [0u8; 4];
        let sep = self.config().path_separator.encode_utf8(&mut sep);
        names.join(&*sep)
    }

    /// Resolve `path` below `from`.
    ///
    /// Each segment selects the first element, in pre-order over the strict
    /// subtree of the current match, whose name equals it. Any depth counts,
    /// so gaps and unmentioned named elements are skipped over. A path with
    /// no segments, or any segment without a match, resolves to `None`.
    pub fn find(&self, from: ElementId, path: impl Into<ElementPath>) -> Option<ElementId> {
        self.resolve(from, &path.into())
    }

    pub(crate) fn resolve(&self, from: ElementId, path: &ElementPath) -> Option<ElementId> {
        if !self.contains(from) {
            return None;
        }
        let segments = path.segments(self.config().path_separator);
        if segments.is_empty() {
            log::trace!(target: LOG_TARGET, "empty path below {from}");
            return None;
        }
        let mut context = from;
        for segment in segments {
            let found = self
                .descendants(context)
                .find(|candidate| self.segment_name(*candidate) == Some(segment));
            match found {
                Some(next) => context = next,
                None => {
                    log::trace!(target: LOG_TARGET, "no {segment:?} below {context}");
                    return None;
                }
            }
        }
        Some(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_separator_and_keeps_empty_segments() {
        assert_eq!(split_segments("a.b.c", '.'), vec!["a", "b", "c"]);
        assert_eq!(split_segments("a..b", '.'), vec!["a", "", "b"]);
        assert_eq!(split_segments("a", '.'), vec!["a"]);
        assert!(split_segments("", '.').is_empty());
    }

    #[test]
    fn splits_on_non_ascii_separator() {
        assert_eq!(split_segments("a→b", '→'), vec!["a", "b"]);
    }

    #[test]
    fn segment_paths_are_used_verbatim() {
        let path = ElementPath::from(["a.b", "c"]);
        assert_eq!(path.segments('.'), vec!["a.b", "c"]);
        assert!(ElementPath::from(Vec::<String>::new()).segments('.').is_empty());
    }
}
