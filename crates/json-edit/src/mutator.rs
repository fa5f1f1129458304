//! Installing a value at a path inside a serialized document.
//!
//! The document text is always parsed fresh; the text pane may have changed
//! it since the node was selected. The tree is consumed and rebuilt along the
//! path only: every node on the path is taken out of its parent, updated and
//! put back, while siblings are moved untouched.

use json_edit_path::{format_path, validate_path, PathStep};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::errors::EditError;
use crate::json_pretty::to_string_indented;
use crate::types::{EditOptions, ValueType};

/// How far past the end of an array an index may reach. The gap is filled
/// with `null`.
const MAX_ARRAY_GAP: usize = 10_000;

/// Deepest container nesting `serde_json` will parse back. A saved document
/// must stay within it so the next edit can read it.
pub const MAX_DOCUMENT_DEPTH: usize = 127;

/// Install `value` at `path` in `document`, with default formatting.
///
/// See [`apply_with`].
pub fn apply(document: &str, path: &[PathStep], value: Value) -> Result<String, EditError> {
    apply_with(document, path, value, &EditOptions::default())
}

/// Install `value` at `path` in `document` and return the new document text.
///
/// The empty path replaces the whole document. Missing intermediate values
/// are created as empty objects, including under index steps.
///
/// # Errors
///
/// - `EditError::MalformedDocument` - `document` is not valid JSON
/// - `EditError::ApplyFailed` - the path runs through a scalar or `null`,
///   uses a key on an array, reaches too far past an array's end, is too
///   long, or the result nests deeper than [`MAX_DOCUMENT_DEPTH`]
///
/// # Example
///
/// ```
/// use json_edit::apply;
/// use json_edit_path::PathStep;
/// use serde_json::json;
///
/// let out = apply(r#"{"a": 1}"#, &[PathStep::from("b"), PathStep::from("c")], json!(2)).unwrap();
/// assert_eq!(out, "{\n  \"a\": 1,\n  \"b\": {\n    \"c\": 2\n  }\n}");
/// ```
#[instrument(level = "debug", skip_all, fields(path = %format_path(path)))]
pub fn apply_with(
    document: &str,
    path: &[PathStep],
    value: Value,
    options: &EditOptions,
) -> Result<String, EditError> {
    validate_path(path)?;
    let doc: Value = serde_json::from_str(document)
        .map_err(|e| EditError::MalformedDocument(e.to_string()))?;
    let doc = set_in(doc, path, value)?;
    if exceeds_depth(&doc, MAX_DOCUMENT_DEPTH) {
        return Err(EditError::ApplyFailed(format!(
            "the edit would nest the document deeper than {MAX_DOCUMENT_DEPTH} levels"
        )));
    }
    let text = to_string_indented(&doc, options.indent)
        .map_err(|e| EditError::ApplyFailed(e.to_string()))?;
    debug!(bytes = text.len(), "document rebuilt");
    Ok(text)
}

/// Return `doc` with `value` installed at `path`.
///
/// Consumes `doc`; only the containers on the path are rebuilt.
pub fn set_in(doc: Value, path: &[PathStep], value: Value) -> Result<Value, EditError> {
    set_at(doc, path, 0, value)
}

fn set_at(node: Value, path: &[PathStep], depth: usize, value: Value) -> Result<Value, EditError> {
    let Some(step) = path.get(depth) else {
        return Ok(value);
    };
    match node {
        Value::Object(mut map) => {
            let key = step.as_key();
            let current = match map.get_mut(key.as_ref()) {
                Some(slot) => std::mem::take(slot),
                None => vivify(path, depth),
            };
            let child = set_at(current, path, depth + 1, value)?;
            // insert on an existing key keeps its position
            map.insert(key.into_owned(), child);
            Ok(Value::Object(map))
        }
        Value::Array(mut arr) => {
            let idx = match step {
                PathStep::Index(idx) => *idx,
                PathStep::Key(key) => {
                    return Err(EditError::ApplyFailed(format!(
                        "cannot use key {key:?} on the array at {}",
                        format_path(&path[..depth])
                    )));
                }
            };
            if idx >= arr.len() {
                if idx - arr.len() > MAX_ARRAY_GAP {
                    return Err(EditError::ApplyFailed(format!(
                        "index {idx} is too far past the end of the array at {} (length {})",
                        format_path(&path[..depth]),
                        arr.len()
                    )));
                }
                arr.resize(idx, Value::Null);
                arr.push(vivify(path, depth));
            }
            let current = std::mem::take(&mut arr[idx]);
            arr[idx] = set_at(current, path, depth + 1, value)?;
            Ok(Value::Array(arr))
        }
        scalar => Err(EditError::ApplyFailed(format!(
            "cannot step into the {} at {}",
            ValueType::of(&scalar),
            format_path(&path[..depth])
        ))),
    }
}

/// Whether `value` nests containers more than `budget` levels deep.
fn exceeds_depth(value: &Value, budget: usize) -> bool {
    match value {
        Value::Object(map) => budget == 0 || map.values().any(|v| exceeds_depth(v, budget - 1)),
        Value::Array(arr) => budget == 0 || arr.iter().any(|v| exceeds_depth(v, budget - 1)),
        _ => false,
    }
}

/// Placeholder for a missing child. Intermediate containers are always
/// objects, even under an index step.
fn vivify(path: &[PathStep], depth: usize) -> Value {
    if depth + 1 < path.len() {
        debug!(at = %format_path(&path[..=depth]), "creating missing container");
    }
    Value::Object(Map::new())
}
