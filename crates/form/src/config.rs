use serde::Deserialize;

/// Tree-wide settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Separator joining names in `path` and splitting string paths in `find`.
    pub path_separator: char,
}

impl TreeConfig {
    pub const DEFAULT_SEPARATOR: char = '.';
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            path_separator: Self::DEFAULT_SEPARATOR,
        }
    }
}
