//! Paths into JSON documents.
//!
//! A path is an ordered list of [`PathStep`]s, each an object key or an array
//! index. The empty path addresses the document root.
//!
//! # Example
//!
//! ```
//! use json_edit_path::{format_path, parse_path, get, PathStep};
//!
//! let path = vec![PathStep::from("customer"), PathStep::Index(0)];
//! assert_eq!(format_path(&path), r#"$["customer"][0]"#);
//! assert_eq!(parse_path(r#"$["customer"][0]"#).unwrap(), path);
//!
//! let doc = serde_json::json!({"customer": [{"name": "Ada"}]});
//! assert_eq!(get(&doc, &path), Some(&serde_json::json!({"name": "Ada"})));
//! ```

use thiserror::Error;

pub mod types;
pub use types::{Path, PathStep};

pub mod get;
pub use get::get;

pub mod validate;
pub use validate::{validate_path, MAX_PATH_LENGTH};

/// Marker rendered for the document root.
pub const ROOT_MARKER: &str = "$";

/// Format a path for display.
///
/// The root renders as `$`. Every other path renders as `$` followed by one
/// bracket pair per step, keys as JSON string literals and indices bare.
///
/// # Example
///
/// ```
/// use json_edit_path::{format_path, PathStep};
///
/// assert_eq!(format_path(&[]), "$");
/// assert_eq!(format_path(&[PathStep::from("a"), PathStep::Index(0)]), r#"$["a"][0]"#);
/// ```
pub fn format_path(path: &[PathStep]) -> String {
    let mut out = String::from(ROOT_MARKER);
    for step in path {
        out.push_str(&step.to_string());
    }
    out
}

/// Parse a path written in the [`format_path`] notation.
///
/// # Errors
///
/// - `PathError::MissingRoot` - the text does not start with `$`
/// - `PathError::UnexpectedEnd` - a bracket or string literal is not closed
/// - `PathError::InvalidSegment` - anything other than a string literal or an
///   index inside a bracket pair; carries the byte offset
/// - `PathError::InvalidIndex` - an index with leading zeros or out of range
/// - `PathError::PathTooLong` - more than [`MAX_PATH_LENGTH`] steps
pub fn parse_path(text: &str) -> Result<Path, PathError> {
    let text = text.trim();
    let rest = text
        .strip_prefix(ROOT_MARKER)
        .ok_or(PathError::MissingRoot)?;
    let offset = ROOT_MARKER.len();
    let bytes = rest.as_bytes();
    let mut path = Path::new();
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos] != b'[' {
            return Err(PathError::InvalidSegment(offset + pos));
        }
        pos += 1;
        match bytes.get(pos) {
            None => return Err(PathError::UnexpectedEnd),
            Some(b'"') => {
                let end = closing_quote(bytes, pos).ok_or(PathError::UnexpectedEnd)?;
                let key: String = serde_json::from_str(&rest[pos..=end])
                    .map_err(|_| PathError::InvalidSegment(offset + pos))?;
                path.push(PathStep::Key(key));
                pos = end + 1;
            }
            Some(b) if b.is_ascii_digit() => {
                let start = pos;
                while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                    pos += 1;
                }
                let digits = &rest[start..pos];
                if !is_valid_index(digits) {
                    return Err(PathError::InvalidIndex);
                }
                let idx = digits.parse().map_err(|_| PathError::InvalidIndex)?;
                path.push(PathStep::Index(idx));
            }
            Some(_) => return Err(PathError::InvalidSegment(offset + pos)),
        }
        match bytes.get(pos) {
            Some(b']') => pos += 1,
            Some(_) => return Err(PathError::InvalidSegment(offset + pos)),
            None => return Err(PathError::UnexpectedEnd),
        }
    }

    validate_path(&path)?;
    Ok(path)
}

/// Byte offset of the quote closing the string literal opened at `open`.
fn closing_quote(bytes: &[u8], open: usize) -> Option<usize> {
    let mut i = open + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// Unescapes a JSON Pointer path component.
///
/// Per RFC 6901, `~1` is replaced with `/` and `~0` is replaced with `~`.
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    // ~1 before ~0, otherwise "~01" decodes wrong
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes a JSON Pointer path component.
///
/// Per RFC 6901, `/` is replaced with `~1` and `~` is replaced with `~0`.
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}

/// Format a path as a JSON Pointer (RFC 6901).
///
/// # Example
///
/// ```
/// use json_edit_path::{to_json_pointer, PathStep};
///
/// assert_eq!(to_json_pointer(&[]), "");
/// assert_eq!(to_json_pointer(&[PathStep::from("a/b"), PathStep::Index(2)]), "/a~1b/2");
/// ```
pub fn to_json_pointer(path: &[PathStep]) -> String {
    let mut out = String::new();
    for step in path {
        out.push('/');
        out.push_str(&escape_component(&step.as_key()));
    }
    out
}

/// Parse a JSON Pointer (RFC 6901) into a path.
///
/// Components that are valid array indices become [`PathStep::Index`], all
/// others [`PathStep::Key`].
///
/// # Errors
///
/// Returns `PathError::PointerInvalid` if a non-empty pointer does not start
/// with `/`.
pub fn from_json_pointer(pointer: &str) -> Result<Path, PathError> {
    if pointer.is_empty() {
        return Ok(Path::new());
    }
    let body = pointer.strip_prefix('/').ok_or(PathError::PointerInvalid)?;
    let path: Path = body
        .split('/')
        .map(|component| {
            if is_valid_index(component) {
                if let Ok(idx) = component.parse() {
                    return PathStep::Index(idx);
                }
            }
            PathStep::Key(unescape_component(component))
        })
        .collect();
    validate_path(&path)?;
    Ok(path)
}

/// Get the parent path of a given path.
///
/// # Errors
///
/// Returns an error if the path has no parent (is the root).
pub fn parent(path: &[PathStep]) -> Result<Path, PathError> {
    match path.split_last() {
        Some((_, head)) => Ok(head.to_vec()),
        None => Err(PathError::NoParent),
    }
}

/// Check if a string represents a valid non-negative integer array index.
///
/// # Example
///
/// ```
/// use json_edit_path::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("123"));
/// assert!(!is_valid_index("-1"));
/// assert!(!is_valid_index("01"));
/// ```
pub fn is_valid_index(index: &str) -> bool {
    if index.is_empty() {
        return false;
    }
    let bytes = index.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|b| b.is_ascii_digit())
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("path must start with `$`")]
    MissingRoot,
    #[error("unexpected end of path")]
    UnexpectedEnd,
    #[error("invalid path segment at byte {0}")]
    InvalidSegment(usize),
    #[error("invalid array index")]
    InvalidIndex,
    #[error("JSON pointer must start with `/`")]
    PointerInvalid,
    #[error("path too long")]
    PathTooLong,
    #[error("root has no parent")]
    NoParent,
}
