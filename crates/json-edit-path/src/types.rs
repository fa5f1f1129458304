//! Type definitions for document paths.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A step in a document path.
///
/// Either an object key or an array index. Serializes as a bare JSON string
/// or number, so `["customer", 0]` round-trips through serde unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathStep {
    Index(usize),
    Key(String),
}

/// A path into a JSON document. The empty path is the document root.
pub type Path = Vec<PathStep>;

impl PathStep {
    /// The step spelled as an object key. Indices use their decimal form.
    pub fn as_key(&self) -> Cow<'_, str> {
        match self {
            PathStep::Key(key) => Cow::Borrowed(key),
            PathStep::Index(idx) => Cow::Owned(idx.to_string()),
        }
    }

    /// The array index, if this is an index step.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathStep::Index(idx) => Some(*idx),
            PathStep::Key(_) => None,
        }
    }
}

impl From<usize> for PathStep {
    fn from(idx: usize) -> Self {
        PathStep::Index(idx)
    }
}

impl From<String> for PathStep {
    fn from(key: String) -> Self {
        PathStep::Key(key)
    }
}

impl From<&str> for PathStep {
    fn from(key: &str) -> Self {
        PathStep::Key(key.to_string())
    }
}

/// Renders one bracketed segment: `["key"]` or `[3]`.
impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::Index(idx) => write!(f, "[{idx}]"),
            PathStep::Key(key) => {
                let quoted = serde_json::to_string(key).map_err(|_| fmt::Error)?;
                write!(f, "[{quoted}]")
            }
        }
    }
}
